//! Server configuration from environment variables.

use std::path::{Path, PathBuf};

/// Runtime configuration. Everything comes from the environment with sane
/// defaults, so a bare `entrega-server` starts out of the box.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for database and logs.
    pub work_dir: String,
    /// HTTP listen port.
    pub http_port: u16,
    /// "development" or "production".
    pub environment: String,
    /// Shared password for the admin and motoboy panels
    /// (checked against the `x-painel-senha` header).
    pub panel_password: String,
    /// Log level filter when RUST_LOG is not set.
    pub log_level: String,
    /// Write logs to a daily-rolling file in addition to stdout.
    pub log_to_file: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./entrega-data".to_string()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            panel_password: std::env::var("PANEL_PASSWORD")
                .unwrap_or_else(|_| "troque-esta-senha".to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_to_file: std::env::var("LOG_TO_FILE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Test/override constructor.
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..Self::from_env()
        }
    }

    pub fn database_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("database")
    }

    pub fn log_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("logs")
    }

    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
