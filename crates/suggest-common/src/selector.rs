/// Suggestion selection: turns a classifier's probability distribution into the ranked,
/// policy-filtered list returned to the UI.
///
/// The result holds the top candidate, plus the runner-up when the two are within
/// `AMBIGUITY_MARGIN` of each other. A second entry is how ambiguity is signalled; there is
/// no separate flag. At most two entries are ever returned, however close a third candidate is.
use crate::api::{CategoryId, CategoryScore, SuggestionResponse};

/// Confidence gap below which the top two candidates are both surfaced.
pub const AMBIGUITY_MARGIN: f64 = 0.15;

/// Name used for ids the category directory does not know.
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

const MAX_SUGGESTIONS: usize = 2;

/// Rank `scores` and pick the suggestions to surface.
///
/// `scores` is in classifier emission order, which breaks ties between equal confidences.
/// `name_of` resolves display names; misses fall back to [`UNKNOWN_CATEGORY_NAME`].
pub fn select<'a, F>(scores: &[(CategoryId, f64)], name_of: F) -> SuggestionResponse
where
    F: Fn(&CategoryId) -> Option<&'a str>,
{
    let ranked = rank(scores, name_of);

    let Some(top1) = ranked.first() else {
        return SuggestionResponse::default();
    };

    let mut suggestions = Vec::with_capacity(MAX_SUGGESTIONS);
    suggestions.push(top1.clone());

    if let Some(top2) = ranked.get(1) {
        if top1.confidence - top2.confidence < AMBIGUITY_MARGIN {
            suggestions.push(top2.clone());
        }
    }

    SuggestionResponse { suggestions }
}

/// Pair every score with its name and sort descending by confidence.
///
/// `sort_by` is stable, so equal confidences keep emission order.
pub fn rank<'a, F>(scores: &[(CategoryId, f64)], name_of: F) -> Vec<CategoryScore>
where
    F: Fn(&CategoryId) -> Option<&'a str>,
{
    let mut ranked: Vec<CategoryScore> = scores
        .iter()
        .map(|(id, confidence)| CategoryScore {
            category_id: id.clone(),
            category_name: name_of(id).unwrap_or(UNKNOWN_CATEGORY_NAME).to_string(),
            confidence: *confidence,
        })
        .collect();
    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    ranked
}
