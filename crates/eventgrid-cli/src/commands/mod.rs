pub mod config;
pub mod layout;

use std::path::Path;

use eventgrid_core::error::Result;
use eventgrid_core::Config;

/// Load the config from `path` if given, else from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}
