//! Background execution of CPU-heavy calibration steps.
//!
//! Each computation runs on Tokio's blocking pool while the caller waits
//! with a deadline and a periodic progress message.

use crate::config::WorkerConfig;
use anyhow::{Result, anyhow, bail};
use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{Instant, interval_at, sleep},
};

#[derive(Clone, Debug)]
pub struct Worker {
    progress_interval: Duration,
}

impl Default for Worker {
    fn default() -> Self {
        Self::from_config(&WorkerConfig::default())
    }
}

impl Worker {
    pub fn new(progress_interval: Duration) -> Self {
        Self { progress_interval }
    }

    pub fn from_config(config: &WorkerConfig) -> Self {
        Self::new(config.progress_interval())
    }

    /// Starts `task` on the blocking pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit<T, E, F>(&self, label: impl Into<String>, task: F) -> TaskHandle<T, E>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let label = label.into();
        tracing::debug!(task = %label, "submitted calculation");
        TaskHandle {
            label,
            handle: tokio::task::spawn_blocking(task),
            progress_interval: self.progress_interval,
        }
    }
}

/// A computation started by [`Worker::submit`].
#[must_use = "calculations are only observed through `wait`"]
pub struct TaskHandle<T, E> {
    label: String,
    handle: JoinHandle<Result<T, E>>,
    progress_interval: Duration,
}

impl<T, E> TaskHandle<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Waits up to `timeout` for the result, logging progress while the
    /// computation runs.
    ///
    /// A computation that outlives the deadline is detached; its result is
    /// discarded.
    pub async fn wait(self, timeout: Duration) -> Result<T> {
        let Self {
            label,
            mut handle,
            progress_interval,
        } = self;

        let mut progress = interval_at(Instant::now() + progress_interval, progress_interval);
        let deadline = sleep(timeout);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                joined = &mut handle => {
                    return match joined {
                        Ok(Ok(value)) => Ok(value),
                        Ok(Err(err)) => Err(anyhow::Error::new(err)
                            .context(format!("Error in remote calculation: {label}"))),
                        Err(err) => Err(anyhow!("Error in remote calculation: {label}: {err}")),
                    };
                }
                _ = progress.tick() => {
                    tracing::info!("Wait for calculations..");
                }
                _ = &mut deadline => {
                    handle.abort();
                    bail!("calculation '{label}' did not finish within {}s", timeout.as_secs_f64());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resonance_core::CalibrationError;

    fn worker() -> Worker {
        Worker::new(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn returns_result() {
        let handle = worker().submit("sum", || Ok::<_, CalibrationError>(2 + 2));
        assert_eq!(handle.label(), "sum");
        assert_eq!(handle.wait(Duration::from_secs(5)).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn keeps_the_failure_cause() {
        let handle = worker().submit("fit", || {
            Err::<(), _>(CalibrationError::ComputeFailure {
                stage: "shaper fitting",
            })
        });
        let err = handle.wait(Duration::from_secs(5)).await.unwrap_err();
        assert_eq!(err.to_string(), "Error in remote calculation: fit");
        assert_eq!(
            err.downcast_ref::<CalibrationError>(),
            Some(&CalibrationError::ComputeFailure {
                stage: "shaper fitting"
            })
        );
    }

    #[tokio::test]
    async fn reports_panics() {
        let handle = worker().submit("boom", || -> Result<(), CalibrationError> {
            panic!("exploded")
        });
        let err = handle.wait(Duration::from_secs(5)).await.unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Error in remote calculation: boom")
        );
    }

    #[tokio::test]
    async fn times_out() {
        let handle = worker().submit("slow", || {
            std::thread::sleep(Duration::from_millis(500));
            Ok::<_, CalibrationError>(())
        });
        let err = handle.wait(Duration::from_millis(50)).await.unwrap_err();
        assert!(err.to_string().contains("did not finish"));
    }
}
