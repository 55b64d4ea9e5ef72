//! AWS Braket API client wrapper.
//!
//! Wraps the AWS SDK for Braket and S3: task creation, status polling, and
//! result retrieval from the task's S3 output location.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{BraketError, BraketResult};

/// AWS Braket API client.
pub struct BraketClient {
    braket: aws_sdk_braket::Client,
    s3: aws_sdk_s3::Client,
    s3_bucket: String,
    s3_prefix: String,
    region: String,
}

impl fmt::Debug for BraketClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BraketClient")
            .field("s3_bucket", &self.s3_bucket)
            .field("s3_prefix", &self.s3_prefix)
            .field("region", &self.region)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}

impl BraketClient {
    /// Create a new Braket client.
    ///
    /// Loads AWS credentials from the default chain (environment, SSO,
    /// config files, IAM role).
    pub async fn new(
        region: impl Into<String>,
        s3_bucket: impl Into<String>,
        s3_prefix: impl Into<String>,
    ) -> BraketResult<Self> {
        let region = region.into();

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()))
            .timeout_config(
                aws_config::timeout::TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(60))
                    .connect_timeout(Duration::from_secs(10))
                    .build(),
            )
            .load()
            .await;

        Ok(Self {
            braket: aws_sdk_braket::Client::new(&config),
            s3: aws_sdk_s3::Client::new(&config),
            s3_bucket: s3_bucket.into(),
            s3_prefix: s3_prefix.into(),
            region,
        })
    }

    /// Fetch the device's status.
    #[instrument(skip(self))]
    pub async fn get_device_status(&self, device_arn: &str) -> BraketResult<DeviceStatus> {
        let resp = self
            .braket
            .get_device()
            .device_arn(device_arn)
            .send()
            .await
            .map_err(|e| BraketError::BraketApi(e.to_string()))?;

        Ok(match resp.device_status() {
            aws_sdk_braket::types::DeviceStatus::Online => DeviceStatus::Online,
            aws_sdk_braket::types::DeviceStatus::Retired => DeviceStatus::Retired,
            _ => DeviceStatus::Offline,
        })
    }

    /// Create a quantum task running an OpenQASM 3 program.
    ///
    /// Returns the task ARN.
    #[instrument(skip(self, qasm))]
    pub async fn create_task(&self, device_arn: &str, qasm: &str, shots: u32) -> BraketResult<String> {
        let action = serde_json::json!({
            "braketSchemaHeader": {
                "name": "braket.ir.openqasm.program",
                "version": "1"
            },
            "source": qasm
        });

        let resp = self
            .braket
            .create_quantum_task()
            .device_arn(device_arn)
            .action(action.to_string())
            .shots(i64::from(shots))
            .output_s3_bucket(&self.s3_bucket)
            .output_s3_key_prefix(&self.s3_prefix)
            .send()
            .await
            .map_err(|e| BraketError::BraketApi(e.to_string()))?;

        debug!(task_arn = resp.quantum_task_arn(), "quantum task created");
        Ok(resp.quantum_task_arn().to_string())
    }

    /// Get quantum task status.
    #[instrument(skip(self))]
    pub async fn get_task_status(&self, task_arn: &str) -> BraketResult<TaskStatus> {
        let resp = self
            .braket
            .get_quantum_task()
            .quantum_task_arn(task_arn)
            .send()
            .await
            .map_err(|e| {
                if e.to_string().contains("ResourceNotFoundException") {
                    BraketError::TaskNotFound(task_arn.to_string())
                } else {
                    BraketError::BraketApi(e.to_string())
                }
            })?;

        use aws_sdk_braket::types::QuantumTaskStatus as Q;
        Ok(match resp.status() {
            Q::Created | Q::Queued => TaskStatus::Queued,
            Q::Running => TaskStatus::Running,
            Q::Completed => TaskStatus::Completed,
            Q::Failed => TaskStatus::Failed(
                resp.failure_reason()
                    .unwrap_or("Unknown failure")
                    .to_string(),
            ),
            Q::Cancelling | Q::Cancelled => TaskStatus::Cancelled,
            other => TaskStatus::Failed(format!("Unknown task status: {other:?}")),
        })
    }

    /// Get a task's result document from S3.
    ///
    /// Braket writes results to `{prefix}/{task_id}/results.json`.
    #[instrument(skip(self))]
    pub async fn get_task_result(&self, task_arn: &str) -> BraketResult<TaskResult> {
        let key = format!("{}/{}/results.json", self.s3_prefix, task_id(task_arn)?);

        let resp = self
            .s3
            .get_object()
            .bucket(&self.s3_bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| BraketError::S3(e.to_string()))?;

        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| BraketError::S3(e.to_string()))?;

        Ok(serde_json::from_slice(&body.into_bytes())?)
    }
}

/// Task ID from an ARN of the form `arn:aws:braket:<region>:<account>:quantum-task/<id>`.
pub fn task_id(task_arn: &str) -> BraketResult<&str> {
    task_arn
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty() && *id != task_arn)
        .ok_or_else(|| BraketError::InvalidArn(task_arn.to_string()))
}

/// Device status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// Device is online and accepting tasks.
    Online,
    /// Device is offline.
    Offline,
    /// Device is retired.
    Retired,
}

/// Quantum task status, collapsed to the states the backend distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task is created or queued.
    Queued,
    /// Task is running.
    Running,
    /// Task completed successfully.
    Completed,
    /// Task failed with reason.
    Failed(String),
    /// Task was cancelled or is being cancelled.
    Cancelled,
}

/// Task result document stored in S3.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    /// Measurement counts (bitstring -> count).
    #[serde(default)]
    pub measurement_counts: Option<BTreeMap<String, u64>>,
    /// Measurement probabilities (bitstring -> probability).
    #[serde(default)]
    pub measurement_probabilities: Option<BTreeMap<String, f64>>,
    /// Raw per-shot measurements.
    #[serde(default)]
    pub measurements: Option<Vec<Vec<u8>>>,
    /// Qubits that were measured, in bit-string order.
    #[serde(default)]
    pub measured_qubits: Option<Vec<u32>>,
}
