//! Application state for the API server.

use std::sync::Arc;

use qviz_adapter_sim::{SimulatorBackend, SimulatorConfig};
use qviz_explain::Explainer;
use qviz_hal::Backend;
use qviz_viz::{ArtifactStore, MemoryArtifactStore};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::ApiError;

/// Shared application state.
pub struct AppState {
    /// Configured backends (name -> Backend instance).
    pub backends: Arc<RwLock<FxHashMap<String, Arc<dyn Backend>>>>,
    /// Server configuration.
    pub config: Config,
    /// Explanation service; falls back to static text when offline.
    pub explainer: Explainer,
    /// Where rendered visualizations are stored.
    pub artifacts: Arc<dyn ArtifactStore>,
}

impl AppState {
    /// Create state with the local simulator, an offline explainer and an
    /// in-memory artifact store.
    pub fn new(config: Config) -> Self {
        let simulator = SimulatorBackend::with_config(SimulatorConfig {
            max_qubits: config.simulation.max_qubits,
            max_shots: config.simulation.max_shots,
            seed: config.simulation.seed,
        });
        let mut backends: FxHashMap<String, Arc<dyn Backend>> = FxHashMap::default();
        backends.insert(simulator.name().to_string(), Arc::new(simulator));

        Self {
            backends: Arc::new(RwLock::new(backends)),
            config,
            explainer: Explainer::offline(),
            artifacts: Arc::new(MemoryArtifactStore::new()),
        }
    }

    /// Replace the explainer.
    pub fn with_explainer(mut self, explainer: Explainer) -> Self {
        self.explainer = explainer;
        self
    }

    /// Replace the artifact store.
    pub fn with_artifact_store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.artifacts = store;
        self
    }

    /// Register a backend.
    pub async fn register_backend(&self, backend: Arc<dyn Backend>) {
        let name = backend.name().to_string();
        let mut backends = self.backends.write().await;
        backends.insert(name, backend);
    }

    /// Look up a backend, defaulting to the configured one.
    pub async fn backend(&self, name: Option<&str>) -> Result<Arc<dyn Backend>, ApiError> {
        let name = name.unwrap_or(&self.config.simulation.default_backend);
        self.backends
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::Validation(format!("unknown backend: {name}")))
    }

    /// Names of all registered backends, sorted.
    pub async fn backend_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Requested shots, or the default; must lie in `1..=max_shots`.
    pub fn resolve_shots(&self, shots: Option<u32>) -> Result<u32, ApiError> {
        let sim = &self.config.simulation;
        let shots = shots.unwrap_or(sim.default_shots);
        if shots == 0 || shots > sim.max_shots {
            return Err(ApiError::Validation(format!(
                "shots must be between 1 and {}, got {shots}",
                sim.max_shots
            )));
        }
        Ok(shots)
    }

    /// RNG for the algorithm demos; seeded per request when a seed is configured.
    pub fn rng(&self) -> StdRng {
        match self.config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_backend_is_simulator() {
        let state = AppState::default();
        assert_eq!(state.backend_names().await, vec!["simulator"]);
        assert_eq!(state.backend(None).await.unwrap().name(), "simulator");
        assert!(matches!(
            state.backend(Some("braket")).await,
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_resolve_shots() {
        let state = AppState::default();
        assert_eq!(state.resolve_shots(None).unwrap(), 1024);
        assert_eq!(state.resolve_shots(Some(10)).unwrap(), 10);
        assert!(state.resolve_shots(Some(0)).is_err());
        assert!(state.resolve_shots(Some(100_001)).is_err());
    }
}
