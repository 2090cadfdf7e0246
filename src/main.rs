//! # Foo API — REST service with centralised failure translation
//!
//! ```text
//!  request ──▶ [TraceLayer] ──▶ [advice: translate_failures] ──▶ [CatchPanic] ──▶ route / fallback
//!                                        ▲                                            │
//!                                        │          Err(Failure) parked on response   │
//!                                        └────────────────────────────────────────────┘
//!                                        │
//!                                        ▼
//!                               ErrorTranslator ──▶ { status, title, detail }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable         | Default        | Description                    |
//! |------------------|----------------|--------------------------------|
//! | `BIND_ADDR`      | `0.0.0.0:3000` | Address Axum listens on        |
//! | `FOO_ADMIN_ROLE` | `ROLE_ADMIN`   | Role required to list foos     |
//! | `RUST_LOG`       | `foo_api=debug`| Tracing filter                 |

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod advice;
mod auth;
mod config;
mod engine;
mod error;
mod extract;
mod models;
mod routes;
mod service;
mod state;
mod validation;

use config::Config;
use state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("foo_api=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    // ── 3. Config & shared state ──────────────────────────────────────────────
    let config = Config::from_env()?;
    let state = build_state(&config);

    // ── 4. CORS ───────────────────────────────────────────────────────────────
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 5. Router ─────────────────────────────────────────────────────────────
    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // ── 6. Bind & Serve ───────────────────────────────────────────────────────
    info!(addr = ?config.bind_addr, admin_role = %config.admin_role, "🚀 Foo API starting");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
