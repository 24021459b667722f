//! `kb nav` command implementation.

use clap::Args;
use kb_nav::{Navigation, on_nav};

use super::{Build, BuildArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    pub build: BuildArgs,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or output can't be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let build = self.build.build(&output)?;
        output.result(&render(&build)?)?;
        Ok(())
    }
}

/// Rendered navigation with knowledge base links, as pretty JSON.
fn render(build: &Build) -> Result<String, CliError> {
    let mut nav = Navigation::from_config(build.config.host.get("nav"));
    on_nav(&mut nav, &build.links, &build.options);
    Ok(serde_json::to_string_pretty(&nav)?)
}
