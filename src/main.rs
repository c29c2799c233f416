use std::sync::Arc;

use axum::routing::post;
use axum::Router;

use sz_search::config::ServiceConfig;
use sz_search::engine;
use sz_search::pool::WorkerPool;
use sz_search::search::dispatcher::SearchDispatcher;
use sz_search::search::handlers::{handle_search, AppContext};
use sz_search::search::types::DispatchOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Configuration and engine problems are operator errors: report them on
    // stderr and leave before any socket is bound.
    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    // Initialize the engine exactly once and prime it. The handle is shared
    // by every worker slot for the life of the process.
    let engine = match engine::connect("sz-search-service", &config.engine_config_json) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = engine.prime() {
        eprintln!("{err}");
        std::process::exit(1);
    }

    let pool = Arc::new(WorkerPool::new(config.worker_threads)?);
    let options = DispatchOptions {
        echo_request: config.echo_request,
        map_error_status: config.map_error_status,
    };
    let dispatcher = Arc::new(SearchDispatcher::new(engine, Arc::clone(&pool), options));
    let ctx = AppContext { dispatcher };

    let app = Router::new()
        .route("/search", post(handle_search))
        .with_state(ctx);

    tracing::info!(
        "search service listening on {} with {} worker slots",
        config.bind,
        pool.capacity()
    );

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
