//! QuantumViz visualizations.
//!
//! Builds Plotly figures for qubit states, circuits and measurement results,
//! renders them into standalone HTML pages and stores those pages in an
//! [`ArtifactStore`].
//!
//! # Example
//!
//! ```rust
//! use qviz_viz::{Amplitude, QubitState, bloch_figure, render_html};
//!
//! let state = QubitState::from_amplitudes(&[Amplitude::Real(1.0), Amplitude::Real(1.0)]).unwrap();
//! let bloch = state.bloch();
//! assert!((bloch.x - 1.0).abs() < 1e-9);
//!
//! let html = render_html("|+⟩", &bloch_figure(&bloch));
//! assert!(html.contains("Plotly.newPlot"));
//! ```

mod error;
mod figure;
mod html;
mod state;
mod store;

pub use error::{VizError, VizResult};
pub use figure::{bloch_figure, circuit_figure, histogram_figure};
pub use html::{PLOTLY_CDN, render_html};
pub use state::{Amplitude, BlochVector, QubitState};
pub use store::{
    Artifact, ArtifactRef, ArtifactStore, DEFAULT_PREFIX, HTML_CONTENT_TYPE, MemoryArtifactStore,
    S3ArtifactStore, artifact_key,
};

use serde_json::Value;

/// Render `figure` to HTML and store it under a fresh `{prefix}/{kind}_{uuid}.html` key.
pub async fn publish(
    store: &dyn ArtifactStore,
    prefix: &str,
    kind: &str,
    title: &str,
    figure: &Value,
) -> VizResult<ArtifactRef> {
    let key = artifact_key(prefix, kind);
    let html = render_html(title, figure);
    let artifact = store.put(&key, html.into_bytes(), HTML_CONTENT_TYPE).await?;
    tracing::info!(store = store.name(), key = %artifact.key, "published visualization");
    Ok(artifact)
}
