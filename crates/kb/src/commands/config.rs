//! `kb config` command implementation.
//!
//! Only the top-level `nav` block of the original file is rewritten; every
//! other line is copied verbatim, so host-specific YAML tags such as
//! `!!python/name:` and comments survive.

use std::path::PathBuf;

use clap::Args;
use serde_yaml::{Mapping, Value};

use super::BuildArgs;
use crate::error::CliError;
use crate::output::Output;

/// Top-level key replaced in the original configuration text.
const NAV_KEY: &str = "nav";

/// Arguments for the config command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Write the configuration to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ConfigArgs {
    /// Execute the config command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or output can't be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let build = self.build.build(&output)?;

        let yaml = match &build.config.config_path {
            Some(path) => {
                let source = std::fs::read_to_string(path)?;
                match build.config.host.get(NAV_KEY) {
                    Some(nav @ Value::Sequence(_)) => splice_nav(&source, nav)?,
                    _ => source,
                }
            }
            None => serde_yaml::to_string(&build.config.host)?,
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, yaml)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => output.result(&yaml)?,
        }
        Ok(())
    }
}

/// Replace the top-level `nav` block of `source` with `nav`.
///
/// The block runs from the `nav:` line up to the next top-level line that
/// isn't a sequence item, comment or blank line. Trailing blank and comment
/// lines stay in place. Text without a top-level `nav:` key is returned
/// unchanged.
fn splice_nav(source: &str, nav: &Value) -> Result<String, CliError> {
    let lines: Vec<&str> = source.lines().collect();
    let Some(start) = lines.iter().position(|line| is_nav_key(line)) else {
        return Ok(source.to_owned());
    };

    let mut end = start + 1;
    for (i, line) in lines.iter().enumerate().skip(start + 1) {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if line.starts_with([' ', '\t', '-']) {
            end = i + 1;
        } else {
            break;
        }
    }

    let mut block = Mapping::new();
    block.insert(Value::from(NAV_KEY), nav.clone());
    let rendered = serde_yaml::to_string(&block)?;

    let mut out = String::with_capacity(source.len() + rendered.len());
    for line in &lines[..start] {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&rendered);
    for line in &lines[end..] {
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}

/// True for a column-0 `nav:` key, with or without an inline value.
fn is_nav_key(line: &str) -> bool {
    line.strip_prefix(NAV_KEY)
        .and_then(|rest| rest.strip_prefix(':'))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn nav(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_splice_keeps_python_tags() {
        let source = "\
site_name: KB
nav:
  - Home: index.md
  - Knowledge Base: []
markdown_extensions:
  - pymdownx.emoji:
      emoji_index: !!python/name:material.extensions.emoji.twemoji
";

        let spliced = splice_nav(source, &nav("- Home: index.md\n- Knowledge Base:\n  - Faq: []\n"))
            .unwrap();

        assert_eq!(
            spliced,
            "\
site_name: KB
nav:
- Home: index.md
- Knowledge Base:
  - Faq: []
markdown_extensions:
  - pymdownx.emoji:
      emoji_index: !!python/name:material.extensions.emoji.twemoji
"
        );
    }

    #[test]
    fn test_splice_unindented_list_and_trailing_comment() {
        let source = "nav:\n- a.md\n- b.md\n\n# theme settings\ntheme: material\n";

        let spliced = splice_nav(source, &nav("- c.md\n")).unwrap();

        assert_eq!(spliced, "nav:\n- c.md\n\n# theme settings\ntheme: material\n");
    }

    #[test]
    fn test_splice_ignores_similar_keys() {
        let source = "navigation_depth: 2\nextra:\n  nav: x\n";

        let spliced = splice_nav(source, &nav("- c.md\n")).unwrap();

        assert_eq!(spliced, source);
    }

    #[test]
    fn test_execute_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docs/blog/posts/faq")).unwrap();
        let config_path = dir.path().join("mkdocs.yml");
        std::fs::write(
            &config_path,
            "theme:\n  name: material\nnav:\n  - Knowledge Base: []\nmarkdown_extensions:\n  - pymdownx.superfences:\n      custom_fences:\n        - format: !!python/name:pymdownx.superfences.fence_code_format\n",
        )
        .unwrap();
        let out = dir.path().join("out.yml");

        let args = ConfigArgs {
            build: BuildArgs {
                config: Some(config_path),
                docs_dir: None,
                section: "Knowledge Base".to_owned(),
                verbose: false,
            },
            output: Some(out.clone()),
        };
        args.execute().unwrap();

        let written = std::fs::read_to_string(out).unwrap();
        assert_eq!(
            written,
            "theme:\n  name: material\nnav:\n- Knowledge Base:\n  - Overview: blog/index.md\n  - Faq: []\nmarkdown_extensions:\n  - pymdownx.superfences:\n      custom_fences:\n        - format: !!python/name:pymdownx.superfences.fence_code_format\n"
        );
    }

    #[test]
    fn test_execute_without_nav_list_copies_source() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("mkdocs.yml");
        let source = "site_name: KB\nnav: index.md\nextra_css: [a.css]\n";
        std::fs::write(&config_path, source).unwrap();
        let out = dir.path().join("out.yml");

        let args = ConfigArgs {
            build: BuildArgs {
                config: Some(config_path),
                docs_dir: None,
                section: "Knowledge Base".to_owned(),
                verbose: false,
            },
            output: Some(out.clone()),
        };
        args.execute().unwrap();

        assert_eq!(std::fs::read_to_string(out).unwrap(), source);
    }
}
