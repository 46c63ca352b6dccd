//! # Mock Interview Backend - Main Application Entry Point
//!
//! This is the main entry point for the mock interview web server.
//! It sets up an Actix-web HTTP server that hands out interview sessions, serves
//! questions one at a time and stores recorded answers on disk.
//!
//! ## Key Rust Concepts Used:
//! - **async/await**: Every request handler is asynchronous
//! - **modules**: Code is organized into separate modules (mod statements)
//! - **Result<T, E>**: Startup failures are returned, not panicked on
//! - **Arc**: Shared state handed to every worker thread
//!
//! ## Application Architecture:
//! - **config**: Application configuration (TOML files + environment variables)
//! - **catalog**: The ordered interview questions
//! - **session**: Per-candidate progress and the session store
//! - **sink**: Writes uploaded recordings to the upload directory
//! - **state**: Shared application state and request metrics
//! - **health**: Liveness and diagnostics endpoints
//! - **middleware**: Request logging and metrics
//! - **handlers**: The interview API
//! - **error**: Error types and their HTTP responses

mod catalog;
mod config;
mod error;
mod handlers;
mod health;
mod middleware;
mod session;
mod sink;
mod state;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use crate::config::AppConfig;
use crate::sink::AnswerSink;
use crate::state::AppState;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// The main application entry point.
///
/// ## What this function does:
/// 1. **Loads configuration** from files and environment variables
/// 2. **Sets up logging** for debugging and monitoring
/// 3. **Creates the upload directory** if it does not exist yet
/// 4. **Configures the HTTP server** with middleware and routes
/// 5. **Handles graceful shutdown** when receiving system signals
#[actix_web::main]
async fn main() -> Result<()> {
    // .ok() means "ignore errors" - it's fine if there's no .env file
    dotenv::dotenv().ok();

    init_tracing();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!("Starting mock-interview-backend v{}", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = config.server.port,
        questions = config.interview.questions.len(),
        reject_after_completion = config.interview.reject_after_completion,
        "Configuration loaded"
    );

    let sink = AnswerSink::new(&config.storage.upload_dir)
        .with_context(|| format!("Failed to create upload directory '{}'", config.storage.upload_dir))?;
    info!(upload_dir = %sink.root().display(), "Answer recordings will be stored on disk");

    let bind_addr = config.bind_addr();
    let app_state = web::Data::new(AppState::new(config, sink));

    info!("Starting HTTP server on {}", bind_addr);

    let server = HttpServer::new(move || {
        // Browsers run the interview frontend from another origin
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(app_state.clone())
            // Middleware executes in reverse order of registration for requests
            .wrap(cors)
            .wrap(middleware::MetricsMiddleware)
            .wrap(middleware::RequestLogging)
            .wrap(TracingLogger::default())
            .configure(handlers::configure)
    })
    .disable_signals()  // shutdown_signal() below owns SIGINT/SIGTERM
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    // Whichever finishes first wins: the server stopping on its own, or a signal
    tokio::select! {
        result = server_task => {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("Server error: {}", e),
                Err(e) => error!("Server task error: {}", e),
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received, stopping server...");
            server_handle.stop(true).await;  // let in-flight uploads finish
        }
    }

    info!("Server stopped gracefully");
    Ok(())
}

/// Initialize the tracing (logging) system for the application.
///
/// ## Environment Variables:
/// - `RUST_LOG`: Controls what gets logged (e.g., "debug", "mock_interview_backend=trace")
/// - If not set, defaults to "mock_interview_backend=debug,actix_web=info"
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_interview_backend=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolve when the process is asked to stop (Ctrl+C, or SIGTERM on Unix).
///
/// If a handler cannot be installed we log it and wait on the other one instead of
/// aborting startup.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received SIGINT");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received SIGTERM");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
