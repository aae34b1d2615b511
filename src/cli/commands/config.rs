//! Implementation of the `lbenrich config` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Debug, Serialize)]
pub struct ConfigOutput<'a> {
    #[serde(flatten)]
    pub config: &'a Config,
}

impl CommandOutput for ConfigOutput<'_> {
    fn to_human(&self) -> String {
        serde_yaml::to_string(self.config)
            .unwrap_or_else(|err| format!("Could not render configuration: {err}"))
    }
}

/// Print the effective configuration.
pub fn execute(config: &Config, json_mode: bool) -> Result<()> {
    output(&ConfigOutput { config }, json_mode);
    Ok(())
}
