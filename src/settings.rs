//! Settings read from an optional `ontolith.toml` next to the binary, with
//! `ONTOLITH_*` environment variables taking precedence. The reserved query
//! builtin names are part of the configuration so deployments can extend the
//! shipped default set.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{OntolithError, Result};
use crate::rule::QueryBuiltins;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log: LogSettings,
    #[serde(default)]
    pub builtins: BuiltinSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_level")]
    pub level: String,
}
impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}
fn default_level() -> String {
    String::from("info")
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuiltinSettings {
    /// Extra reserved query builtin names, merged into the default set.
    #[serde(default)]
    pub additional: Vec<String>,
}

impl Settings {
    pub fn load() -> Result<Settings> {
        let config = Config::builder()
            .add_source(File::with_name("ontolith").required(false))
            .add_source(Environment::with_prefix("ONTOLITH").separator("__"))
            .build()
            .map_err(|e| OntolithError::Config(e.to_string()))?;
        config
            .try_deserialize()
            .map_err(|e| OntolithError::Config(e.to_string()))
    }
    pub fn query_builtins(&self) -> QueryBuiltins {
        QueryBuiltins::with_additional(&self.builtins.additional)
    }
}
