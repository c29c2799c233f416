//! Entity Search Service Library
//!
//! This library crate defines the core modules of the search service.
//! It serves as the foundation for the server binary (`main.rs`) and for the
//! companion load driver (`sz-search-perftest`), which talks to it over HTTP.
//!
//! ## Architecture Modules
//! The service is composed of four loosely coupled subsystems:
//!
//! - **`engine`**: The boundary to the external entity-resolution engine. Defines the
//!   `SearchEngine` trait, the failure taxonomy, and the named flag table controlling
//!   search behavior.
//! - **`pool`**: A fixed-size pool of worker threads that runs blocking engine calls
//!   on behalf of the async request handlers.
//! - **`search`**: The per-request dispatch logic and the HTTP surface. Resolves flags
//!   and profiles, submits work to the pool, and maps failures to response statuses.
//! - **`config`**: Process configuration assembled from environment variables at startup.

pub mod config;
pub mod engine;
pub mod pool;
pub mod search;
