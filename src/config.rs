use crate::*;
use confique::Config as _;
use std::sync::OnceLock;

#[derive(Debug, confique::Config)]
pub struct Config {
    /// Record every parse decision on the returned statement.
    #[config(env = "DDLVIEW_TRACE", default = false)]
    pub trace: bool,
    /// Report non-reserved keywords used as view or column names.
    #[config(env = "DDLVIEW_WARN_NON_RESERVED", default = true)]
    pub warn_non_reserved: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace: false,
            warn_non_reserved: true,
        }
    }
}

/// Load the configuration from the current environment.
pub fn load_config() -> Result<Config> {
    Ok(Config::builder().env().load()?)
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        load_config().unwrap_or_else(|e| {
            warn!("Falling back to default configuration: {e}");
            Config::default()
        })
    })
}
