//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Strings without a `${` sequence are returned unchanged, so literal
/// passwords containing `$` only need escaping when they also contain `{`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
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

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(v) = value.as_deref() {
        *value = Some(expand_env(v, field)?);
    }
    Ok(())
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
            std::env::set_var("MDWIKI_TEST_VAR_SIMPLE", "hello");
        }
        let result = expand_env("${MDWIKI_TEST_VAR_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("MDWIKI_TEST_VAR_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDWIKI_UNSET_VAR_TEST");
        }
        let result = expand_env("${MDWIKI_UNSET_VAR_TEST:-TEST}", "confluence.space_key").unwrap();
        assert_eq!(result, "TEST");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDWIKI_MISSING_VAR_TEST");
        }
        let err = expand_env("${MDWIKI_MISSING_VAR_TEST}", "confluence.password").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MDWIKI_MISSING_VAR_TEST"));
        assert!(err.to_string().contains("confluence.password"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("literal string", "test.field").unwrap();
        assert_eq!(result, "literal string");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDWIKI_HOST_TEST", "wiki.example.com");
        }
        let result = expand_env("https://${MDWIKI_HOST_TEST}/confluence", "test.url").unwrap();
        assert_eq!(result, "https://wiki.example.com/confluence");
        unsafe {
            std::env::remove_var("MDWIKI_HOST_TEST");
        }
    }

    #[test]
    fn test_expand_opt_none_untouched() {
        let mut value: Option<String> = None;
        expand_opt(&mut value, "confluence.token").unwrap();
        assert!(value.is_none());
    }
}
