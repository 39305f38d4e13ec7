use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::cli::Cli;
use crate::util::json::{save_json_output, to_json_string, JsonStyle};

/// Where and how command results are written.
#[derive(Clone, Debug, Default)]
pub struct OutputOptions {
    /// Print JSON instead of tables and trees
    pub json: bool,
    /// Print nothing on stdout
    pub no_stdout: bool,
    /// Also save the result to this file
    pub output: Option<PathBuf>,
}

impl OutputOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            no_stdout: cli.no_stdout,
            output: cli.output.clone(),
        }
    }

    /// Human-readable output is wanted on stdout.
    pub fn human(&self) -> bool {
        !self.json && !self.no_stdout
    }

    /// Print `data` as JSON when `--json` is set, then save it if `--output` is set.
    pub fn write<T: Serialize>(&self, data: &T) -> Result<()> {
        if self.json && !self.no_stdout {
            println!("{}", to_json_string(data, JsonStyle::Pretty)?);
        }
        self.save(data);
        Ok(())
    }

    /// Save `data` to the `--output` file. Failures are logged.
    pub fn save<T: Serialize>(&self, data: &T) {
        if let Some(path) = &self.output {
            match save_json_output(data, path, JsonStyle::Pretty) {
                Ok(_) => tracing::info!("JSON output saved to {}", path.display()),
                Err(e) => tracing::error!("Failed to save JSON output: {:#}", e),
            }
        }
    }
}
