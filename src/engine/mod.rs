//! Engine Collaborator Boundary
//!
//! The entity-resolution engine itself is an external collaborator: a blocking call
//! taking a JSON attribute payload, a search profile, and a flag mask, and returning
//! either a result document or a typed failure.
//!
//! ## Responsibilities
//! - **Contract**: The [`SearchEngine`] trait every backend implements. The handle is
//!   shared process-wide and invoked concurrently by every worker slot, so backends
//!   must be safe for concurrent invocation.
//! - **Failure taxonomy**: [`EngineError`], the closed set of failure kinds the rest
//!   of the system categorizes on.
//! - **Flags**: The fixed table of named bit-flag tokens combined into the mask passed
//!   to each search call.
//!
//! ## Submodules
//! - **`types`**: The `SearchEngine` trait and the `EngineError` failure kinds.
//! - **`flags`**: Named flag constants, the token table, and `combine_flags`.
//! - **`stub`**: A deterministic backend standing in for the native SDK binding.

pub mod flags;
pub mod stub;
pub mod types;


pub use types::{EngineError, SearchEngine};

use std::sync::Arc;

use stub::StubEngine;

/// Search profile applied when a request does not select one.
pub const DEFAULT_SEARCH_PROFILE: &str = "SEARCH";

/// Initializes the engine exactly once at startup and returns the shared handle.
///
/// The returned handle is read and invoked concurrently by every worker slot with no
/// external locking; implementations are required to be internally thread-safe.
pub fn connect(instance_name: &str, config_json: &str) -> Result<Arc<dyn SearchEngine>, EngineError> {
    let engine = StubEngine::new(config_json)?;
    tracing::info!("engine initialized (instance: {instance_name})");
    Ok(Arc::new(engine))
}
