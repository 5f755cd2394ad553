/// TF-IDF text model with a multinomial linear (softmax) head.
///
/// This is the runtime half of the trained pipeline: the vocabulary, IDF weights and
/// per-class coefficients come from a JSON artifact produced offline. Inference is:
///
/// 1. lowercase, tokenize on runs of two or more word characters, drop stop words
/// 2. count vocabulary terms, scale by IDF, L2-normalize
/// 3. `logits = coef · x + intercept`, softmax
use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::Deserialize;

use crate::api::CategoryId;
use crate::classifier::Classifier;
use crate::error::CommonError;

const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// On-disk form of the model, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub classes: Vec<CategoryId>,
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default)]
    pub stop_words: Vec<String>,
    /// One row per class, one column per vocabulary term.
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

pub struct TfidfModel {
    classes: Vec<CategoryId>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    stop_words: HashSet<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    token_re: Regex,
}

impl std::fmt::Debug for TfidfModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfidfModel")
            .field("classes", &self.classes.len())
            .field("vocabulary_size", &self.vocabulary.len())
            .field("stop_words", &self.stop_words.len())
            .finish()
    }
}

impl TfidfModel {
    /// Validate an artifact's shapes and build the model.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, CommonError> {
        let ModelArtifact {
            classes,
            vocabulary,
            idf,
            stop_words,
            coef,
            intercept,
        } = artifact;

        let width = vocabulary.len();

        let unique: HashSet<&CategoryId> = classes.iter().collect();
        if unique.len() != classes.len() {
            return Err(CommonError::Artifact("duplicate class labels".to_string()));
        }
        if idf.len() != width {
            return Err(CommonError::Artifact(format!(
                "idf has {} entries, vocabulary has {width}",
                idf.len()
            )));
        }
        if let Some((term, idx)) = vocabulary.iter().find(|(_, idx)| **idx >= width) {
            return Err(CommonError::Artifact(format!(
                "vocabulary term {term:?} has index {idx}, expected < {width}"
            )));
        }
        let distinct: HashSet<usize> = vocabulary.values().copied().collect();
        if distinct.len() != width {
            return Err(CommonError::Artifact(
                "vocabulary indices are not unique".to_string(),
            ));
        }
        if coef.len() != classes.len() || intercept.len() != classes.len() {
            return Err(CommonError::Artifact(format!(
                "expected {} coefficient rows and intercepts, got {} and {}",
                classes.len(),
                coef.len(),
                intercept.len()
            )));
        }
        if let Some(row) = coef.iter().position(|r| r.len() != width) {
            return Err(CommonError::Artifact(format!(
                "coefficient row {row} has {} columns, expected {width}",
                coef[row].len()
            )));
        }

        let token_re = Regex::new(TOKEN_PATTERN)
            .map_err(|e| CommonError::Artifact(format!("token pattern: {e}")))?;

        Ok(Self {
            classes,
            vocabulary,
            idf,
            stop_words: stop_words.into_iter().map(|w| w.to_lowercase()).collect(),
            coef,
            intercept,
            token_re,
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Lowercased tokens of `text` with stop words removed.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_re
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .map(str::to_string)
            .collect()
    }

    /// Sparse, L2-normalized TF-IDF vector as `(term index, weight)` pairs.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in self.tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        features.sort_by_key(|(idx, _)| *idx);

        let norm = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut features {
                *w /= norm;
            }
        }
        features
    }
}

impl Classifier for TfidfModel {
    fn classes(&self) -> &[CategoryId] {
        &self.classes
    }

    fn predict_proba(&self, text: &str) -> Result<Vec<f64>, CommonError> {
        let features = self.transform(text);
        let logits: Vec<f64> = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| b + features.iter().map(|(idx, w)| row[*idx] * w).sum::<f64>())
            .collect();
        softmax(&logits)
    }
}

fn softmax(logits: &[f64]) -> Result<Vec<f64>, CommonError> {
    if logits.is_empty() {
        return Ok(Vec::new());
    }
    if logits.iter().any(|l| !l.is_finite()) {
        return Err(CommonError::Inference("non-finite logit".to_string()));
    }
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| e / total).collect())
}
