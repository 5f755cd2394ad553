pub mod api;
pub mod artifact;
pub mod classifier;
pub mod directory;
pub mod error;
pub mod selector;
pub mod tfidf;
