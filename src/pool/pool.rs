use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use thiserror::Error;
use tokio::sync::oneshot;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Failures surfaced by pool submission and result retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The pool no longer accepts work.
    #[error("worker pool is shut down")]
    ShutDown,
    /// The worker dropped the job without producing a result.
    #[error("worker abandoned the job before completion")]
    Abandoned,
}

/// Fixed-size pool of worker threads for blocking work.
pub struct WorkerPool {
    sender: Mutex<Option<mpsc::Sender<Job>>>,
    capacity: usize,
}

impl WorkerPool {
    /// Creates a pool with `capacity` worker threads.
    ///
    /// A capacity of 0 selects the host-reported parallelism.
    pub fn new(capacity: usize) -> io::Result<Self> {
        let capacity = if capacity == 0 {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
        } else {
            capacity
        };

        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        for id in 0..capacity {
            let receiver = Arc::clone(&receiver);
            // Workers are detached; they exit once the job channel closes.
            thread::Builder::new()
                .name(format!("search-worker-{id}"))
                .spawn(move || worker_loop(id, receiver))?;
        }

        tracing::info!("started worker pool with {capacity} slots");

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            capacity,
        })
    }

    /// Number of worker slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Queues a unit of work and returns the handle for its result.
    ///
    /// Never blocks the caller beyond queuing. Fails once the pool has shut
    /// down.
    pub fn submit<T, F>(&self, job: F) -> Result<JobHandle<T>, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let work: Job = Box::new(move || {
            // The caller may have stopped waiting; a dropped receiver is fine.
            let _ = tx.send(job());
        });

        let guard = self.sender.lock().unwrap_or_else(|err| err.into_inner());
        let sender = guard.as_ref().ok_or(PoolError::ShutDown)?;
        sender.send(work).map_err(|_| PoolError::ShutDown)?;

        Ok(JobHandle { result: rx })
    }

    /// Stops accepting new work.
    ///
    /// Queued and in-flight jobs still run to completion; worker threads exit
    /// once the queue drains. Nothing waits on them.
    pub fn shutdown(&self) {
        let taken = self
            .sender
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .take();
        if taken.is_some() {
            tracing::info!("worker pool shutting down");
        }
    }
}

fn worker_loop(id: usize, jobs: Arc<Mutex<mpsc::Receiver<Job>>>) {
    loop {
        // The lock covers only the dequeue; jobs run with the queue free.
        let job = match jobs.lock() {
            Ok(receiver) => receiver.recv(),
            Err(_) => break,
        };
        match job {
            Ok(job) => job(),
            // Channel closed: the pool shut down or was dropped.
            Err(_) => break,
        }
    }
    tracing::debug!("search worker {id} exiting");
}

/// Handle to one submitted unit of work.
pub struct JobHandle<T> {
    result: oneshot::Receiver<T>,
}

impl<T> JobHandle<T> {
    /// Waits for this specific item to complete.
    pub async fn join(self) -> Result<T, PoolError> {
        self.result.await.map_err(|_| PoolError::Abandoned)
    }
}
