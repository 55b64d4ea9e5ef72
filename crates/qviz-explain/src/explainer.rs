//! Explanations with a model-or-fallback policy.

use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, warn};

use qviz_hal::Counts;
use qviz_ir::Circuit;

use crate::fallback;
use crate::model::{CompletionOptions, LanguageModel};

/// Default concept.
pub const DEFAULT_CONCEPT: &str = "quantum superposition";

/// Default audience level.
pub const DEFAULT_LEVEL: &str = "beginner";

/// Source label for static explanations.
pub const FALLBACK_SOURCE: &str = "fallback";

/// A generated or static explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub text: String,
    pub concept: String,
    pub level: String,
    /// Model name, or `"fallback"`.
    pub source: String,
}

impl Explanation {
    /// Whether the text came from the static fallback.
    pub fn is_fallback(&self) -> bool {
        self.source == FALLBACK_SOURCE
    }
}

/// Produces explanations, using a model when one is configured and reachable.
#[derive(Clone, Default)]
pub struct Explainer {
    model: Option<Arc<dyn LanguageModel>>,
    options: CompletionOptions,
}

impl std::fmt::Debug for Explainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explainer")
            .field("model", &self.model.as_ref().map(|m| m.name().to_string()))
            .field("options", &self.options)
            .finish()
    }
}

impl Explainer {
    /// An explainer that only serves fallback text.
    pub fn offline() -> Self {
        Self::default()
    }

    /// An explainer backed by `model`.
    pub fn with_model(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model: Some(model),
            options: CompletionOptions::default(),
        }
    }

    /// Override the sampling options.
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    /// Name of the configured model, if any.
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().map(|m| m.name())
    }

    async fn generate(&self, prompt: &str) -> Option<(String, String)> {
        let model = self.model.as_ref()?;
        match model.complete(prompt, &self.options).await {
            Ok(text) => Some((text, model.name().to_string())),
            Err(e) => {
                warn!(model = model.name(), error = %e, "explanation model failed; using fallback");
                None
            }
        }
    }

    /// Explain a concept for an audience level. Never fails.
    pub async fn explain_concept(&self, concept: &str, level: &str) -> Explanation {
        let concept = non_empty(concept, DEFAULT_CONCEPT);
        let level = non_empty(level, DEFAULT_LEVEL);
        let prompt = concept_prompt(concept, level);

        let (text, source) = match self.generate(&prompt).await {
            Some(generated) => generated,
            None => (fallback::concept_text(concept, level), FALLBACK_SOURCE.into()),
        };
        debug!(concept, level, %source, "concept explained");

        Explanation {
            text,
            concept: concept.to_string(),
            level: level.to_string(),
            source,
        }
    }

    /// Explain what a circuit does and, when given, what its results show.
    pub async fn explain_circuit(
        &self,
        circuit: &Circuit,
        counts: Option<&Counts>,
        level: &str,
    ) -> Explanation {
        let level = non_empty(level, DEFAULT_LEVEL);
        let prompt = circuit_prompt(circuit, counts, level);

        let (text, source) = match self.generate(&prompt).await {
            Some(generated) => generated,
            None => (fallback::circuit_text(circuit, counts), FALLBACK_SOURCE.into()),
        };

        Explanation {
            text,
            concept: "circuit".to_string(),
            level: level.to_string(),
            source,
        }
    }
}

fn non_empty<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { default } else { trimmed }
}

/// Prompt asking for a structured concept explanation.
pub fn concept_prompt(concept: &str, level: &str) -> String {
    format!(
        "Explain the quantum concept '{concept}' for a {level} audience.\n\
         Include:\n\
         1. Simple definition\n\
         2. Real-world analogy\n\
         3. Mathematical representation\n\
         4. Why it's important for quantum computing\n\n\
         Keep it concise and engaging."
    )
}

/// Prompt describing a circuit gate by gate.
pub fn circuit_prompt(circuit: &Circuit, counts: Option<&Counts>, level: &str) -> String {
    let mut prompt = format!(
        "Explain what this {}-qubit quantum circuit does for a {level} audience.\nGates in order:\n",
        circuit.num_qubits()
    );
    for (i, gate) in circuit.gates().iter().enumerate() {
        let _ = writeln!(prompt, "{}. {gate}", i + 1);
    }
    if let Some(counts) = counts {
        let _ = writeln!(prompt, "Measurement counts over {} shots:", counts.total());
        for (bitstring, count) in counts {
            let _ = writeln!(prompt, "  {bitstring}: {count}");
        }
        prompt.push_str("Bit-strings list qubit 0 first.\n");
    }
    prompt.push_str("Describe the role of each gate and what the results show. Keep it concise.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExplainError, ExplainResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoModel {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LanguageModel for EchoModel {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, prompt: &str, _: &CompletionOptions) -> ExplainResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("generated".into())
        }
    }

    struct BrokenModel;

    #[async_trait]
    impl LanguageModel for BrokenModel {
        fn name(&self) -> &str {
            "broken"
        }

        async fn complete(&self, _: &str, _: &CompletionOptions) -> ExplainResult<String> {
            Err(ExplainError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn test_model_text_is_used() {
        let model = Arc::new(EchoModel {
            prompts: Mutex::new(Vec::new()),
        });
        let explainer = Explainer::with_model(model.clone());
        let explanation = explainer.explain_concept("entanglement", "advanced").await;

        assert_eq!(explanation.text, "generated");
        assert_eq!(explanation.source, "echo");
        assert!(!explanation.is_fallback());
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("'entanglement' for a advanced audience"));
    }

    #[tokio::test]
    async fn test_failing_model_falls_back() {
        let explainer = Explainer::with_model(Arc::new(BrokenModel));
        let explanation = explainer.explain_concept("", "").await;

        assert!(explanation.is_fallback());
        assert_eq!(explanation.concept, DEFAULT_CONCEPT);
        assert_eq!(explanation.level, DEFAULT_LEVEL);
        assert!(explanation.text.contains("spinning coin"));
    }

    #[tokio::test]
    async fn test_offline_circuit_explanation() {
        let explanation = Explainer::offline()
            .explain_circuit(&Circuit::bell(), None, "beginner")
            .await;
        assert!(explanation.is_fallback());
        assert_eq!(explanation.concept, "circuit");
        assert!(explanation.text.contains("entangling"));
    }

    #[test]
    fn test_circuit_prompt_lists_gates() {
        let counts: Counts = [("00".to_string(), 3)].into_iter().collect();
        let prompt = circuit_prompt(&Circuit::bell(), Some(&counts), "beginner");
        assert!(prompt.contains("2-qubit"));
        assert!(prompt.contains("1. "));
        assert!(prompt.contains("00: 3"));
    }
}
