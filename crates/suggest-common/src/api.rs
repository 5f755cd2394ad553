use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque category identifier, serialized exactly as the model artifact spells it.
///
/// Accounts keyed by database id come through as integers, accounts keyed by code
/// (e.g. "CC001") as strings. Both forms round-trip unchanged to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryId {
    Int(i64),
    Text(String),
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CategoryId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A category paired with the classifier's confidence for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    #[serde(rename = "accountId")]
    pub category_id: CategoryId,
    #[serde(rename = "accountName")]
    pub category_name: String,
    /// Classifier probability in [0, 1].
    pub confidence: f64,
}

/// Body of a successful `/predict` call.
///
/// Holds zero, one or two entries. Two entries means the leading candidates were too close
/// to call and the caller should ask the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<CategoryScore>,
}

impl SuggestionResponse {
    pub fn is_ambiguous(&self) -> bool {
        self.suggestions.len() > 1
    }
}

/// Inbound `/predict` body. Missing or null text fields are treated as empty.
///
/// Any `amount` field sent by clients is accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub partner_name: Option<String>,
}

impl PredictRequest {
    pub fn product_name(&self) -> &str {
        self.product_name.as_deref().unwrap_or_default()
    }

    pub fn partner_name(&self) -> &str {
        self.partner_name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_score_uses_account_field_names() {
        let score = CategoryScore {
            category_id: CategoryId::Int(7),
            category_name: "Logistics".to_string(),
            confidence: 0.5,
        };
        let value = serde_json::to_value(&score).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"accountId": 7, "accountName": "Logistics", "confidence": 0.5})
        );
    }

    #[test]
    fn category_id_keeps_its_json_kind() {
        let ids: Vec<CategoryId> = serde_json::from_str(r#"[3, "CC001"]"#).unwrap();
        assert_eq!(ids, vec![CategoryId::Int(3), CategoryId::from("CC001")]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[3,"CC001"]"#);
    }

    #[test]
    fn predict_request_defaults_missing_and_null_fields() {
        let req: PredictRequest =
            serde_json::from_str(r#"{"productName": null, "amount": 1200.5}"#).unwrap();
        assert_eq!(req.product_name(), "");
        assert_eq!(req.partner_name(), "");

        let req: PredictRequest =
            serde_json::from_str(r#"{"productName": "teak", "partnerName": "Vendor 4"}"#).unwrap();
        assert_eq!(req.product_name(), "teak");
        assert_eq!(req.partner_name(), "Vendor 4");
    }
}
