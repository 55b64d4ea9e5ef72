//! AWS Braket backend implementation.

use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use qviz_hal::{
    Backend, BackendAvailability, Capabilities, Counts, ExecutionResult, HalError, HalResult,
    JobId, JobStatus,
};
use qviz_ir::{Circuit, qasm};

use crate::api::{BraketClient, DeviceStatus, TaskResult, TaskStatus};
use crate::device::{self, SV1};
use crate::error::{BraketError, BraketResult};

/// Maximum number of cached jobs before eviction of terminal entries.
const MAX_CACHED_JOBS: usize = 10_000;

/// Connection settings for a Braket device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BraketConfig {
    /// Device ARN, or a short name such as `sv1`.
    pub device_arn: String,
    /// AWS region.
    pub region: String,
    /// S3 bucket receiving task results.
    pub s3_bucket: String,
    /// S3 key prefix for task results.
    pub s3_prefix: String,
}

impl Default for BraketConfig {
    fn default() -> Self {
        Self {
            device_arn: SV1.to_string(),
            region: "us-east-1".to_string(),
            s3_bucket: String::new(),
            s3_prefix: "quantumviz-results".to_string(),
        }
    }
}

/// A cached job entry.
struct CachedJob {
    status: JobStatus,
    result: Option<ExecutionResult>,
    shots: u32,
}

/// AWS Braket backend adapter.
///
/// Runs circuits on a Braket managed simulator. Each submission becomes a
/// quantum task; results are read back from the task's S3 output.
pub struct BraketBackend {
    client: Arc<BraketClient>,
    device_arn: String,
    capabilities: Capabilities,
    jobs: Arc<Mutex<FxHashMap<String, CachedJob>>>,
}

impl BraketBackend {
    /// Backend name used for registration.
    pub const NAME: &'static str = "braket";

    /// Connect to a Braket device.
    ///
    /// AWS credentials are loaded from the default chain; nothing is sent to
    /// AWS until the first submission.
    pub async fn connect(config: BraketConfig) -> BraketResult<Self> {
        if config.s3_bucket.trim().is_empty() {
            return Err(BraketError::MissingS3Bucket);
        }

        let device_arn = device::arn_for_name(&config.device_arn)
            .map_or_else(|| config.device_arn.clone(), str::to_string);
        if !device_arn.starts_with("arn:aws:braket:") {
            return Err(BraketError::InvalidArn(device_arn));
        }

        let client = BraketClient::new(&config.region, &config.s3_bucket, &config.s3_prefix).await?;

        // Unknown devices get conservative simulator limits.
        let mut capabilities = device::capabilities_for_device(&device_arn)
            .unwrap_or_else(|| Capabilities::simulator(device_arn.clone(), 34, device::MAX_SHOTS));
        capabilities.name = Self::NAME.to_string();

        info!(%device_arn, region = %config.region, "connected to Braket");

        Ok(Self {
            client: Arc::new(client),
            device_arn,
            capabilities,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
        })
    }

    /// Get the device ARN.
    pub fn device_arn(&self) -> &str {
        &self.device_arn
    }

    /// Convert a task result document into counts.
    ///
    /// Prefers `measurementCounts`, then raw `measurements`, then
    /// `measurementProbabilities` scaled to `shots` by largest-remainder
    /// rounding so the counts still sum to `shots`.
    pub(crate) fn parse_result(result: &TaskResult, shots: u32) -> BraketResult<Counts> {
        if let Some(measurement_counts) = &result.measurement_counts {
            return Ok(measurement_counts
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect());
        }

        if let Some(measurements) = &result.measurements {
            let mut counts = Counts::new();
            for measurement in measurements {
                let bitstring: String = measurement
                    .iter()
                    .map(|b| if *b == 0 { '0' } else { '1' })
                    .collect();
                counts.add(bitstring, 1);
            }
            return Ok(counts);
        }

        if let Some(probs) = &result.measurement_probabilities {
            return Ok(largest_remainder(probs.iter().map(|(k, p)| (k.as_str(), *p)), shots));
        }

        Err(BraketError::ResultParse(
            "result has no measurementCounts, measurements or measurementProbabilities".into(),
        ))
    }
}

/// Scale a probability distribution to integer counts summing to `shots`.
fn largest_remainder<'a>(probs: impl Iterator<Item = (&'a str, f64)>, shots: u32) -> Counts {
    let probs: Vec<(&str, f64)> = probs.map(|(k, p)| (k, p.max(0.0))).collect();
    let norm: f64 = probs.iter().map(|(_, p)| p).sum();
    if norm <= 0.0 {
        return Counts::new();
    }

    let exact: Vec<(&str, f64)> = probs
        .iter()
        .map(|(k, p)| (*k, p / norm * f64::from(shots)))
        .collect();
    let mut floors: Vec<u64> = exact.iter().map(|(_, x)| x.floor() as u64).collect();
    let assigned: u64 = floors.iter().sum();
    let mut remaining = u64::from(shots).saturating_sub(assigned);

    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a].1 - exact[a].1.floor();
        let rb = exact[b].1 - exact[b].1.floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });
    for i in order {
        if remaining == 0 {
            break;
        }
        floors[i] += 1;
        remaining -= 1;
    }

    let mut counts = Counts::new();
    for ((key, _), n) in exact.iter().zip(floors) {
        if n > 0 {
            counts.add(*key, n);
        }
    }
    counts
}

#[async_trait]
impl Backend for BraketBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        match self.client.get_device_status(&self.device_arn).await {
            Ok(DeviceStatus::Online) => Ok(BackendAvailability::always_available()),
            Ok(status) => Ok(BackendAvailability::unavailable(format!(
                "{} is {status:?}",
                self.device_arn
            ))),
            Err(e) => {
                warn!(error = %e, "failed to query Braket device");
                Ok(BackendAvailability::unavailable("failed to query device"))
            }
        }
    }

    #[instrument(skip(self, circuit), fields(device = %self.device_arn))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.validate(circuit, shots)?;

        let program = qasm::emit(circuit);
        let task_arn = self
            .client
            .create_task(&self.device_arn, &program, shots)
            .await?;

        {
            let mut jobs = self.jobs.lock().await;
            if jobs.len() >= MAX_CACHED_JOBS {
                jobs.retain(|_, j| !j.status.is_terminal());
            }
            jobs.insert(
                task_arn.clone(),
                CachedJob {
                    status: JobStatus::Queued,
                    result: None,
                    shots,
                },
            );
        }

        Ok(JobId(task_arn))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let job_status = match self.client.get_task_status(&job_id.0).await? {
            TaskStatus::Queued => JobStatus::Queued,
            TaskStatus::Running => JobStatus::Running,
            TaskStatus::Completed => JobStatus::Completed,
            TaskStatus::Failed(msg) => JobStatus::Failed(msg),
            TaskStatus::Cancelled => JobStatus::Cancelled,
        };

        let mut jobs = self.jobs.lock().await;
        if let Some(cached) = jobs.get_mut(&job_id.0) {
            cached.status = job_status.clone();
        }

        Ok(job_status)
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let submitted_shots = {
            let jobs = self.jobs.lock().await;
            match jobs.get(&job_id.0) {
                Some(CachedJob {
                    result: Some(result),
                    ..
                }) => return Ok(result.clone()),
                Some(cached) => cached.shots,
                None => return Err(HalError::JobNotFound(job_id.0.clone())),
            }
        };

        let task_result = self.client.get_task_result(&job_id.0).await?;
        let counts = Self::parse_result(&task_result, submitted_shots)?;
        let shots = u32::try_from(counts.total()).unwrap_or(u32::MAX);
        let result = ExecutionResult::new(counts, shots);

        let mut jobs = self.jobs.lock().await;
        if let Some(cached) = jobs.get_mut(&job_id.0) {
            cached.result = Some(result.clone());
            cached.status = JobStatus::Completed;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_result_counts() {
        let result = TaskResult {
            measurement_counts: Some(BTreeMap::from([
                ("00".to_string(), 500),
                ("11".to_string(), 524),
            ])),
            ..TaskResult::default()
        };

        let counts = BraketBackend::parse_result(&result, 1024).unwrap();
        assert_eq!(counts.get("00"), 500);
        assert_eq!(counts.get("11"), 524);
        assert_eq!(counts.total(), 1024);
    }

    #[test]
    fn test_parse_result_measurements() {
        let result = TaskResult {
            measurements: Some(vec![vec![0, 0], vec![1, 1], vec![0, 0], vec![1, 0]]),
            ..TaskResult::default()
        };

        let counts = BraketBackend::parse_result(&result, 4).unwrap();
        assert_eq!(counts.get("00"), 2);
        assert_eq!(counts.get("11"), 1);
        assert_eq!(counts.get("10"), 1);
    }

    #[test]
    fn test_parse_result_probabilities_sum_to_shots() {
        let result = TaskResult {
            measurement_probabilities: Some(BTreeMap::from([
                ("00".to_string(), 1.0 / 3.0),
                ("01".to_string(), 1.0 / 3.0),
                ("11".to_string(), 1.0 / 3.0),
            ])),
            ..TaskResult::default()
        };

        let counts = BraketBackend::parse_result(&result, 100).unwrap();
        assert_eq!(counts.total(), 100);
        assert_eq!(counts.get("00"), 34);
        assert_eq!(counts.get("01"), 33);
        assert_eq!(counts.get("11"), 33);
    }

    #[test]
    fn test_parse_result_empty_document() {
        let err = BraketBackend::parse_result(&TaskResult::default(), 10).unwrap_err();
        assert!(matches!(err, BraketError::ResultParse(_)));
    }

    #[test]
    fn test_largest_remainder_favors_biggest_fraction() {
        let counts = largest_remainder([("0", 0.126), ("1", 0.874)].into_iter(), 10);
        assert_eq!(counts.get("0"), 1);
        assert_eq!(counts.get("1"), 9);
    }

    #[test]
    fn test_default_config_targets_sv1() {
        let config = BraketConfig::default();
        assert_eq!(config.device_arn, SV1);
        assert!(config.s3_bucket.is_empty());
    }

    #[tokio::test]
    async fn test_connect_requires_bucket() {
        let err = BraketBackend::connect(BraketConfig::default())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, BraketError::MissingS3Bucket));
    }
}
