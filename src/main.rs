#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

#[cfg(target_os = "windows")]
mod windows_main;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use wincenter::model::{DEFAULT_LOG_LEVEL, LOG_ENV_VAR};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .init();

    #[cfg(target_os = "windows")]
    {
        windows_main::run()
    }

    #[cfg(not(target_os = "windows"))]
    {
        anyhow::bail!("wincenter only runs on Windows")
    }
}
