//! `kb links` command implementation.

use clap::Args;

use super::BuildArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    #[command(flatten)]
    pub build: BuildArgs,
}

impl LinksArgs {
    /// Execute the links command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or output can't be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let build = self.build.build(&output)?;
        output.result(&serde_json::to_string_pretty(&build.links)?)?;
        Ok(())
    }
}
