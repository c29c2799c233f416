//! Worker Pool Module
//!
//! A fixed-size pool of execution slots for blocking work. Engine calls block the
//! thread they run on for the full duration of the call, so the async request
//! handlers never run them inline; they submit a job here and await its handle.
//!
//! ## Architecture Overview
//! 1. **Submission**: `submit` queues a job on a shared channel and hands back a
//!    [`JobHandle`] tied to that specific item. Queuing never blocks the caller.
//! 2. **Execution**: Dedicated, named OS threads pull jobs off the channel one at a
//!    time. Items submitted concurrently complete in no guaranteed order.
//! 3. **Completion**: Each job reports through a oneshot channel; `JobHandle::join`
//!    blocks the awaiting task until its own item finishes.
//! 4. **Shutdown**: `shutdown` closes intake. Queued and in-flight jobs still run;
//!    worker threads exit once the queue drains.
//!
//! ## Submodules
//! - **`pool`**: The `WorkerPool`, its worker loop, and the job handle.

pub mod pool;


pub use pool::{JobHandle, PoolError, WorkerPool};
