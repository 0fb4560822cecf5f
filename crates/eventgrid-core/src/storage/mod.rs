mod config;

pub use config::{Config, LayoutConfig, OverflowConfig};

use std::path::PathBuf;

/// Returns `~/.config/eventgrid[-dev]/` based on EVENTGRID_ENV.
///
/// Set EVENTGRID_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("EVENTGRID_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("eventgrid-dev")
    } else {
        base_dir.join("eventgrid")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
