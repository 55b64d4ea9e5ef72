//! QuantumViz explanations.
//!
//! [`Explainer`] turns a concept or a circuit into prose. When a
//! [`LanguageModel`] is configured it is asked first; if it is missing,
//! unreachable or returns nothing, a static explanation is served instead,
//! so callers always get text back.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use qviz_explain::{Explainer, GeminiClient};
//!
//! let model = GeminiClient::new(std::env::var("GEMINI_API_KEY")?, Duration::from_secs(30))?;
//! let explainer = Explainer::with_model(Arc::new(model));
//! let explanation = explainer.explain_concept("entanglement", "beginner").await;
//! println!("[{}] {}", explanation.source, explanation.text);
//! ```

mod error;
mod explainer;
pub mod fallback;
mod gemini;
mod model;

pub use error::{ExplainError, ExplainResult};
pub use explainer::{
    DEFAULT_CONCEPT, DEFAULT_LEVEL, Explainer, Explanation, FALLBACK_SOURCE, circuit_prompt,
    concept_prompt,
};
pub use gemini::{DEFAULT_MODEL, GeminiClient};
pub use model::{CompletionOptions, LanguageModel};
