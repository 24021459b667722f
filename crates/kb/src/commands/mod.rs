//! CLI command implementations.

pub(crate) mod config;
pub(crate) mod links;
pub(crate) mod nav;

use std::path::{Path, PathBuf};

use clap::Args;
use kb_config::{CliSettings, Config};
use kb_nav::{KnowledgeBaseOptions, LinkTable, on_config};
use serde_yaml::{Mapping, Value};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use config::ConfigArgs;
pub(crate) use links::LinksArgs;
pub(crate) use nav::NavArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover mkdocs.yml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Title of the navigation entry to generate.
    #[arg(long, default_value = "Knowledge Base")]
    section: String,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Configuration after the config-phase hook ran.
pub(crate) struct Build {
    pub config: Config,
    pub options: KnowledgeBaseOptions,
    pub links: LinkTable,
}

impl BuildArgs {
    /// Load the configuration and run the config-phase hook.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration can't be loaded.
    pub(crate) fn build(&self, output: &Output) -> Result<Build, CliError> {
        let cli_settings = CliSettings {
            docs_dir: self.docs_dir.clone(),
        };
        let mut config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(docs_dir = %config.docs_dir.display(), "Using docs directory");

        let options = KnowledgeBaseOptions {
            section_title: self.section.clone(),
            ..KnowledgeBaseOptions::from_config(&config)
        };

        let links = on_config(&mut config, &options);
        let posts_root = config.docs_dir.join(options.blog.posts_dir());
        if let Some(reason) = skipped_reason(&config.host, &links, &posts_root) {
            output.warning(&reason);
        }

        Ok(Build {
            config,
            options,
            links,
        })
    }
}

/// Why the config-phase hook produced no sections, if it didn't.
fn skipped_reason(host: &Mapping, links: &LinkTable, posts_root: &Path) -> Option<String> {
    match host.get("nav") {
        None => Some("Configuration has no nav entry; navigation left unchanged".to_owned()),
        Some(Value::Sequence(_)) if links.is_empty() => Some(format!(
            "No knowledge base sections found under {}",
            posts_root.display()
        )),
        Some(Value::Sequence(_)) => None,
        Some(_) => Some("Configuration nav is not a list; navigation left unchanged".to_owned()),
    }
}
