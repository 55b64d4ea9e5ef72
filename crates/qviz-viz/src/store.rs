//! Artifact storage for rendered visualizations.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::{VizError, VizResult};

/// Default key prefix for stored visualizations.
pub const DEFAULT_PREFIX: &str = "visualizations";

/// Content type of rendered pages.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Build a unique key: `{prefix}/{kind}_{uuid}.html`.
pub fn artifact_key(prefix: &str, kind: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let id = uuid::Uuid::new_v4().simple();
    if prefix.is_empty() {
        format!("{kind}_{id}.html")
    } else {
        format!("{prefix}/{kind}_{id}.html")
    }
}

/// Where a stored artifact can be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub key: String,
    pub url: String,
}

/// A stored artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Persistent store for visualization artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store name for logs and health output.
    fn name(&self) -> &str;

    /// Store `body` under `key`.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> VizResult<ArtifactRef>;

    /// Fetch an artifact by key.
    async fn get(&self, key: &str) -> VizResult<Artifact>;
}

/// Artifacts held in memory, in insertion order.
#[derive(Debug, Default)]
struct MemoryArtifacts {
    by_key: FxHashMap<String, Artifact>,
    order: VecDeque<String>,
}

/// In-process store; artifacts are served back by the HTTP server.
///
/// Holds at most `capacity` artifacts and drops the oldest when full.
#[derive(Debug, Clone)]
pub struct MemoryArtifactStore {
    url_base: String,
    capacity: usize,
    artifacts: Arc<RwLock<MemoryArtifacts>>,
}

impl MemoryArtifactStore {
    /// Route under which the server exposes stored artifacts.
    pub const DEFAULT_URL_BASE: &'static str = "/api/artifacts";

    /// Artifacts kept before the oldest is evicted.
    pub const DEFAULT_CAPACITY: usize = 512;

    pub fn new() -> Self {
        Self::with_url_base(Self::DEFAULT_URL_BASE)
    }

    /// Use a different URL base for returned references.
    pub fn with_url_base(url_base: impl Into<String>) -> Self {
        Self {
            url_base: url_base.into().trim_end_matches('/').to_string(),
            capacity: Self::DEFAULT_CAPACITY,
            artifacts: Arc::new(RwLock::new(MemoryArtifacts::default())),
        }
    }

    /// Keep at most `capacity` artifacts (at least one).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Number of stored artifacts.
    pub async fn len(&self) -> usize {
        self.artifacts.read().await.by_key.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.artifacts.read().await.by_key.is_empty()
    }
}

impl Default for MemoryArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> VizResult<ArtifactRef> {
        if key.is_empty() || key.split('/').any(|s| s == "..") {
            return Err(VizError::Storage(format!("invalid key: {key:?}")));
        }
        let artifact = Artifact {
            body,
            content_type: content_type.to_string(),
        };

        let mut artifacts = self.artifacts.write().await;
        if artifacts.by_key.insert(key.to_string(), artifact).is_none() {
            artifacts.order.push_back(key.to_string());
            while artifacts.order.len() > self.capacity {
                let Some(oldest) = artifacts.order.pop_front() else {
                    break;
                };
                artifacts.by_key.remove(&oldest);
                debug!(key = %oldest, "evicted artifact");
            }
        }

        Ok(ArtifactRef {
            key: key.to_string(),
            url: format!("{}/{key}", self.url_base),
        })
    }

    async fn get(&self, key: &str) -> VizResult<Artifact> {
        self.artifacts
            .read()
            .await
            .by_key
            .get(key)
            .cloned()
            .ok_or_else(|| VizError::NotFound(key.to_string()))
    }
}

/// Amazon S3 store; artifacts are served by S3 itself.
#[derive(Debug, Clone)]
pub struct S3ArtifactStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3ArtifactStore {
    /// Default bucket.
    pub const DEFAULT_BUCKET: &'static str = "quantumviz-agent-assets";

    /// Default region.
    pub const DEFAULT_REGION: &'static str = "eu-central-1";

    /// Connect using the default AWS credential chain.
    pub async fn connect(bucket: impl Into<String>, region: impl Into<String>) -> VizResult<Self> {
        let bucket = bucket.into();
        let region = region.into();
        if bucket.trim().is_empty() {
            return Err(VizError::Storage("S3 bucket name is empty".into()));
        }

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()))
            .timeout_config(
                aws_config::timeout::TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(30))
                    .connect_timeout(Duration::from_secs(10))
                    .build(),
            )
            .load()
            .await;

        Ok(Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket,
            region,
        })
    }

    /// Public URL of an object.
    pub fn object_url(&self, key: &str) -> String {
        object_url(&self.bucket, &self.region, key)
    }
}

fn object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    fn name(&self) -> &str {
        "s3"
    }

    #[instrument(skip(self, body), fields(bucket = %self.bucket, size = body.len()))]
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> VizResult<ArtifactRef> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(aws_sdk_s3::primitives::ByteStream::from(body))
            .send()
            .await
            .map_err(|e| VizError::Storage(e.to_string()))?;
        debug!(key, "stored artifact in S3");

        Ok(ArtifactRef {
            key: key.to_string(),
            url: self.object_url(key),
        })
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn get(&self, key: &str) -> VizResult<Artifact> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| VizError::Storage(e.to_string()))?;

        let content_type = resp
            .content_type()
            .unwrap_or(HTML_CONTENT_TYPE)
            .to_string();
        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| VizError::Storage(e.to_string()))?;

        Ok(Artifact {
            body: body.into_bytes().to_vec(),
            content_type,
        })
    }
}
