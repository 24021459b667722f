//! Environment variable expansion for configuration values.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - `!ENV VAR` / `!ENV [VAR, OTHER, default]` - the host's YAML tag form

use serde_yaml::Value;

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Resolve a YAML string value, honouring the `!ENV` tag.
///
/// - plain string: returned as-is
/// - `!ENV NAME`: value of `NAME`, or `None` if unset
/// - `!ENV [A, B, fallback]`: first set variable; when none is set the
///   last entry is used literally
///
/// Any other value shape yields `None`.
pub(crate) fn resolve_env_tag(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) if tagged.tag == "ENV" => match &tagged.value {
            Value::String(name) => std::env::var(name).ok(),
            Value::Sequence(names) => {
                let names: Vec<&str> = names.iter().filter_map(Value::as_str).collect();
                names
                    .iter()
                    .find_map(|name| std::env::var(name).ok())
                    .or_else(|| (names.len() > 1).then(|| names[names.len() - 1].to_owned()))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("KB_TEST_VAR_SIMPLE", "site");
        }
        let result = expand_env("${KB_TEST_VAR_SIMPLE}", "docs_dir").unwrap();
        assert_eq!(result, "site");
        unsafe {
            std::env::remove_var("KB_TEST_VAR_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("KB_UNSET_VAR_TEST");
        }
        let result = expand_env("${KB_UNSET_VAR_TEST:-docs}", "docs_dir").unwrap();
        assert_eq!(result, "docs");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("KB_MISSING_VAR_TEST");
        }
        let err = expand_env("${KB_MISSING_VAR_TEST}", "docs_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("KB_MISSING_VAR_TEST"));
        assert!(err.to_string().contains("docs_dir"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        assert_eq!(expand_env("docs", "docs_dir").unwrap(), "docs");
        assert_eq!(expand_env("$VAR", "docs_dir").unwrap(), "$VAR");
    }

    #[test]
    fn test_env_tag_single_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("KB_TEST_ENV_TAG", "content");
        }
        let value: Value = serde_yaml::from_str("!ENV KB_TEST_ENV_TAG").unwrap();
        assert_eq!(resolve_env_tag(&value), Some("content".to_owned()));
        unsafe {
            std::env::remove_var("KB_TEST_ENV_TAG");
        }
    }

    #[test]
    fn test_env_tag_unset_var_is_none() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("KB_TEST_ENV_TAG_UNSET");
        }
        let value: Value = serde_yaml::from_str("!ENV KB_TEST_ENV_TAG_UNSET").unwrap();
        assert_eq!(resolve_env_tag(&value), None);
    }

    #[test]
    fn test_env_tag_list_falls_back_to_last() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("KB_TEST_ENV_A");
            std::env::remove_var("KB_TEST_ENV_B");
        }
        let value: Value = serde_yaml::from_str("!ENV [KB_TEST_ENV_A, KB_TEST_ENV_B, site]").unwrap();
        assert_eq!(resolve_env_tag(&value), Some("site".to_owned()));
    }

    #[test]
    fn test_plain_string_passes_through() {
        assert_eq!(
            resolve_env_tag(&Value::from("docs")),
            Some("docs".to_owned())
        );
        assert_eq!(resolve_env_tag(&Value::from(3)), None);
    }
}
