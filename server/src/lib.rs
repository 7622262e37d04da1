//! Entrega Server
//!
//! Backend for a single-store food delivery operation: order intake with
//! neighborhood-based delivery fees, the order status lifecycle, and the
//! three panel surfaces (admin, motoboy, customer lookup).
//!
//! # Modules
//!
//! - [`core`] - configuration, server state, HTTP server
//! - [`api`] - route modules and handlers
//! - [`auth`] - panel password gate
//! - [`db`] - embedded SurrealDB service, models, repositories
//! - [`delivery`] - neighborhood fee table and quote resolver
//! - [`orders`] - checkout and status-transition services
//! - [`utils`] - errors, logging, time helpers

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod delivery;
pub mod orders;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

/// Load `.env`, create the work directory layout and install the logger.
/// Call once at process start, before anything else.
pub fn setup_environment() -> std::io::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    config.ensure_work_dir_structure()?;
    utils::logger::init(&config);
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
  ┌─────────────────────────────────┐
  │      E N T R E G A   ·   E S    │
  │   pedidos · entregas · painel   │
  └─────────────────────────────────┘
"#
    );
}
