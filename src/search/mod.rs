//! Search Dispatch Module
//!
//! The per-request path of the service: everything between the HTTP surface and the
//! engine call.
//!
//! ## Overview
//! Each request carries an opaque JSON attribute payload plus optional `flags` and
//! `profile` query parameters. The dispatcher resolves those into a concrete engine
//! invocation, runs it on a worker-pool slot, and shapes the outcome into an HTTP
//! status and JSON body.
//!
//! ## Responsibilities
//! - **Parameter resolution**: Pipe-delimited flag tokens OR-combined against the
//!   fixed table; a default profile when none is selected.
//! - **Dispatch**: Submitting the blocking engine call to the pool and awaiting that
//!   specific result.
//! - **Status mapping**: An exhaustive failure-kind to HTTP-status table; never
//!   inferred from message text.
//! - **API**: The `POST /search` handler for the Axum web server.
//!
//! ## Submodules
//! - **`dispatcher`**: Per-request logic and the exception-to-status table.
//! - **`handlers`**: HTTP request handlers and the shared application context.
//! - **`types`**: Query parameters and response-shaping options.

pub mod dispatcher;
pub mod handlers;
pub mod types;
