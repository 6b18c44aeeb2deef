//! Single-threaded placement worker.
//!
//! One OS thread owns the engine and its provider; requests are queued on a channel and
//! answered one at a time, so coordinate-mode changes from different requests can never
//! interleave. Replies travel over oneshot channels and can be awaited from async code.

use std::thread::{self, JoinHandle};

use tokio::sync::{mpsc, oneshot};

use crate::engine::Engine;
use crate::ephemeris::EphemerisProvider;
use crate::error::ChartError;
use crate::gates::DualSnapshot;
use crate::health::HealthReport;
use crate::placements::PlacementAggregate;
use crate::settings::EngineSettings;
use crate::temporal::BirthMoment;

type Reply<T> = oneshot::Sender<Result<T, ChartError>>;

enum Job {
    Placements(BirthMoment, Reply<PlacementAggregate>),
    Snapshot(BirthMoment, Reply<DualSnapshot>),
}

pub struct EngineWorker {
    sender: Option<mpsc::UnboundedSender<Job>>,
    handle: Option<JoinHandle<()>>,
    health: HealthReport,
}

/// Run `op`, and run it once more if the first failure came from the provider.
fn retry_once<T>(label: &str, mut op: impl FnMut() -> Result<T, ChartError>) -> Result<T, ChartError> {
    match op() {
        Err(e) if e.is_retryable() => {
            log::warn!("{label} failed, retrying once: {e}");
            op()
        }
        other => other,
    }
}

impl EngineWorker {
    /// Start the worker thread. The provider is built and health-checked on that thread;
    /// this call blocks until the check has passed or failed.
    pub fn spawn<P, F>(make_provider: F, settings: EngineSettings) -> Result<Self, ChartError>
    where
        P: EphemerisProvider + 'static,
        F: FnOnce() -> Result<P, ChartError> + Send + 'static,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<HealthReport, ChartError>>();

        let handle = thread::Builder::new()
            .name("urania-worker".to_string())
            .spawn(move || {
                let engine = make_provider().and_then(|provider| Engine::new(provider, settings));
                let mut engine = match engine {
                    Ok(engine) => {
                        let _ = ready_tx.send(Ok(engine.health().clone()));
                        engine
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                while let Some(job) = receiver.blocking_recv() {
                    match job {
                        Job::Placements(moment, reply) => {
                            let result = retry_once("placement computation", || engine.compute(&moment));
                            let _ = reply.send(result);
                        }
                        Job::Snapshot(moment, reply) => {
                            let result = retry_once("gate snapshot", || engine.dual_snapshot(&moment));
                            let _ = reply.send(result);
                        }
                    }
                }
                log::info!("Placement worker shutting down");
            })
            .map_err(|e| ChartError::Configuration {
                message: format!("failed to start worker thread: {e}"),
            })?;

        let health = match ready_rx.recv() {
            Ok(Ok(health)) => health,
            Ok(Err(e)) => {
                let _ = handle.join();
                return Err(e);
            }
            Err(_) => {
                let _ = handle.join();
                return Err(ChartError::WorkerStopped);
            }
        };
        log::info!("Placement worker ready");

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
            health,
        })
    }

    pub fn health(&self) -> &HealthReport {
        &self.health
    }

    fn submit<T>(&self, make_job: impl FnOnce(Reply<T>) -> Job) -> Result<oneshot::Receiver<Result<T, ChartError>>, ChartError> {
        let (reply, response) = oneshot::channel();
        let sender = self.sender.as_ref().ok_or(ChartError::WorkerStopped)?;
        sender
            .send(make_job(reply))
            .map_err(|_| ChartError::WorkerStopped)?;
        Ok(response)
    }

    pub async fn placements(&self, moment: BirthMoment) -> Result<PlacementAggregate, ChartError> {
        let response = self.submit(|reply| Job::Placements(moment, reply))?;
        response.await.map_err(|_| ChartError::WorkerStopped)?
    }

    pub async fn dual_snapshot(&self, moment: BirthMoment) -> Result<DualSnapshot, ChartError> {
        let response = self.submit(|reply| Job::Snapshot(moment, reply))?;
        response.await.map_err(|_| ChartError::WorkerStopped)?
    }

    /// Blocking variant for callers outside an async runtime.
    pub fn placements_blocking(&self, moment: BirthMoment) -> Result<PlacementAggregate, ChartError> {
        let response = self.submit(|reply| Job::Placements(moment, reply))?;
        response.blocking_recv().map_err(|_| ChartError::WorkerStopped)?
    }

    /// Close the queue and wait for in-flight work to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Placement worker thread panicked");
            }
        }
    }
}

impl Drop for EngineWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
