//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// `${VAR}` errors when the variable is unset; `${VAR:-default}` falls back
/// to the default. Text outside references passes through unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(ConfigError::EnvVar {
                field: field.to_owned(),
                message: "unterminated ${ reference".to_owned(),
            });
        };

        let reference = &after[..end];
        let (name, default) = match reference.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (reference, None),
        };

        match std::env::var(name) {
            Ok(var_value) => result.push_str(&var_value),
            Err(_) => match default {
                Some(default) => result.push_str(default),
                None => {
                    return Err(ConfigError::EnvVar {
                        field: field.to_owned(),
                        message: format!("${{{name}}} not set"),
                    });
                }
            },
        }

        rest = &after[end + 1..];
    }

    result.push_str(rest);
    Ok(result)
}

/// Expand an optional config value in place.
pub(crate) fn expand_env_opt(
    value: &mut Option<String>,
    field: &str,
) -> Result<(), ConfigError> {
    if let Some(inner) = value {
        *inner = expand_env(inner, field)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("plain value", "f").unwrap(), "plain value");
    }

    #[test]
    fn test_expands_set_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CHORUS_EXPAND_TEST", "hello");
        }

        assert_eq!(expand_env("${CHORUS_EXPAND_TEST}!", "f").unwrap(), "hello!");

        unsafe {
            std::env::remove_var("CHORUS_EXPAND_TEST");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CHORUS_EXPAND_MISSING");
        }

        assert_eq!(
            expand_env("${CHORUS_EXPAND_MISSING:-fallback}", "f").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_missing_required_variable_errors() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CHORUS_EXPAND_MISSING");
        }

        let err = expand_env("${CHORUS_EXPAND_MISSING}", "cms.token").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CHORUS_EXPAND_MISSING"));
        assert!(err.to_string().contains("cms.token"));
    }

    #[test]
    fn test_unterminated_reference_errors() {
        let err = expand_env("${OOPS", "f").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
    }
}
