use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use singlish_core::Engine;
use tracing::debug;

use crate::Rendered;

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("failed to spawn conversion worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("conversion worker has stopped")]
    Disconnected,
    #[error("no conversion result within the timeout")]
    Timeout,
}

struct ConversionWork {
    buffer: String,
    generation: u64,
}

/// Background conversion thread with generation-based supersession.
///
/// Each `submit` bumps the generation; the worker drains its queue to the
/// latest buffer, waits out the debounce window, and drops any result whose
/// generation has moved on before or after converting.
pub struct ConversionWorker {
    work_tx: Option<mpsc::Sender<ConversionWork>>,
    result_rx: Mutex<mpsc::Receiver<Rendered>>,
    generation: Arc<AtomicU64>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ConversionWorker {
    pub fn spawn(engine: Arc<Engine>, debounce: Duration) -> Result<Self, WorkerError> {
        let generation = Arc::new(AtomicU64::new(0));
        let (work_tx, work_rx) = mpsc::channel::<ConversionWork>();
        let (result_tx, result_rx) = mpsc::channel::<Rendered>();
        let handle = {
            let generation = Arc::clone(&generation);
            thread::Builder::new()
                .name("singlish-convert".into())
                .spawn(move || {
                    conversion_worker(work_rx, result_tx, generation, engine, debounce);
                })?
        };
        Ok(Self {
            work_tx: Some(work_tx),
            result_rx: Mutex::new(result_rx),
            generation,
            handle: Some(handle),
        })
    }

    /// Queue `buffer` for conversion, superseding anything still pending.
    pub fn submit(&self, buffer: impl Into<String>) -> Result<u64, WorkerError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.work_tx
            .as_ref()
            .ok_or(WorkerError::Disconnected)?
            .send(ConversionWork {
                buffer: buffer.into(),
                generation,
            })
            .map_err(|_| WorkerError::Disconnected)?;
        Ok(generation)
    }

    /// Drop pending and in-flight work without submitting anything new.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Generation of the most recent submit or invalidate.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn try_recv(&self) -> Option<Rendered> {
        let rx = self.result_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Rendered, WorkerError> {
        let rx = self
            .result_rx
            .lock()
            .map_err(|_| WorkerError::Disconnected)?;
        rx.recv_timeout(timeout).map_err(|e| match e {
            mpsc::RecvTimeoutError::Timeout => WorkerError::Timeout,
            mpsc::RecvTimeoutError::Disconnected => WorkerError::Disconnected,
        })
    }
}

impl Drop for ConversionWorker {
    fn drop(&mut self) {
        // closing the channel ends the worker loop
        self.work_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn conversion_worker(
    rx: mpsc::Receiver<ConversionWork>,
    tx: mpsc::Sender<Rendered>,
    gen: Arc<AtomicU64>,
    engine: Arc<Engine>,
    debounce: Duration,
) {
    while let Ok(work) = rx.recv() {
        // Drain: if multiple work items queued, skip to latest
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            latest = newer;
        }

        if !debounce.is_zero() {
            thread::sleep(debounce);
        }

        // Check staleness before doing work
        if latest.generation != gen.load(Ordering::SeqCst) {
            debug!(generation = latest.generation, "dropping stale buffer");
            continue;
        }

        let text = engine.convert(&latest.buffer);

        // Check staleness after conversion
        if latest.generation != gen.load(Ordering::SeqCst) {
            debug!(generation = latest.generation, "dropping stale result");
            continue;
        }

        if tx
            .send(Rendered {
                generation: latest.generation,
                text,
            })
            .is_err()
        {
            break;
        }
    }
}
