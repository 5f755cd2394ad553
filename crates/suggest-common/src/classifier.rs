/// Classifier adapter.
///
/// Wraps whatever trained model is loaded behind the `Classifier` trait, builds the feature
/// string from the request fields, and checks that the model's output is a full probability
/// distribution before handing it to the selector.
use std::sync::Arc;

use crate::api::CategoryId;
use crate::error::CommonError;

/// Allowed deviation of a distribution's sum from 1.0.
const SUM_TOLERANCE: f64 = 1e-6;

/// A trained text classifier producing one probability per known class.
pub trait Classifier: Send + Sync {
    /// Class labels, in the order `predict_proba` reports them.
    fn classes(&self) -> &[CategoryId];

    /// Probability of each class for `text`, aligned with `classes()`.
    fn predict_proba(&self, text: &str) -> Result<Vec<f64>, CommonError>;
}

/// Builds the single feature string the model was trained on: product, then partner,
/// separated by one space. Changing the order changes what the model sees.
pub fn feature_text(product_name: &str, partner_name: &str) -> String {
    format!("{product_name} {partner_name}")
}

/// Holds the loaded classifier, if any. Cheap to clone; the model is shared read-only.
#[derive(Clone, Default)]
pub struct ClassifierAdapter {
    model: Option<Arc<dyn Classifier>>,
}

impl ClassifierAdapter {
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        Self { model: Some(model) }
    }

    /// An adapter with no model. Every `classify` call fails with `ModelUnavailable`.
    pub fn unloaded() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    /// Per-category confidences for a transaction, in the model's class order.
    ///
    /// Covers every trained category exactly once. An untrained model with no classes yields
    /// an empty list, which is not the same as `ModelUnavailable`.
    pub fn classify(
        &self,
        product_name: &str,
        partner_name: &str,
    ) -> Result<Vec<(CategoryId, f64)>, CommonError> {
        let model = self.model.as_ref().ok_or(CommonError::ModelUnavailable)?;
        let text = feature_text(product_name, partner_name);

        let classes = model.classes();
        let probs = model.predict_proba(&text)?;
        check_distribution(classes.len(), &probs)?;

        Ok(classes.iter().cloned().zip(probs).collect())
    }
}

fn check_distribution(class_count: usize, probs: &[f64]) -> Result<(), CommonError> {
    if probs.len() != class_count {
        return Err(CommonError::Inference(format!(
            "classifier returned {} probabilities for {class_count} classes",
            probs.len()
        )));
    }
    if let Some(p) = probs
        .iter()
        .find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0)
    {
        return Err(CommonError::Inference(format!(
            "classifier returned probability {p} outside [0, 1]"
        )));
    }
    if probs.is_empty() {
        return Ok(());
    }
    let sum: f64 = probs.iter().sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(CommonError::Inference(format!(
            "classifier probabilities sum to {sum}, expected 1"
        )));
    }
    Ok(())
}
