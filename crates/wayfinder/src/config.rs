//! Menu settings loaded from environment variables.

use std::env;

use anyhow::{Context, Result, bail};

/// Default prefix for generated locale keys.
pub const DEFAULT_ROOT_LOCALE: &str = "menu";

/// Deployment-wide menu settings.
///
/// Supplied once when the pipeline is constructed rather than read from
/// global state on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSettings {
    /// Use raw route names as labels instead of looking them up (default: false).
    pub disable_locale: bool,

    /// Locale key prefix for top-level items (default: "menu").
    pub root_locale: String,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            disable_locale: false,
            root_locale: DEFAULT_ROOT_LOCALE.to_string(),
        }
    }
}

impl MenuSettings {
    /// Load settings from environment variables.
    ///
    /// - `WAYFINDER_DISABLE_LOCALE`: `true`/`false`/`1`/`0`
    /// - `WAYFINDER_ROOT_LOCALE`: non-empty locale prefix
    pub fn from_env() -> Result<Self> {
        let disable_locale = match optional_var("WAYFINDER_DISABLE_LOCALE")? {
            Some(raw) => {
                parse_flag(&raw).context("WAYFINDER_DISABLE_LOCALE must be a boolean")?
            }
            None => false,
        };

        let root_locale = optional_var("WAYFINDER_ROOT_LOCALE")?
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_ROOT_LOCALE.to_string());
        if root_locale.is_empty() {
            bail!("WAYFINDER_ROOT_LOCALE must not be empty");
        }

        Ok(Self {
            disable_locale,
            root_locale,
        })
    }

    /// Builder-style toggle for the locale switch.
    pub fn with_locale_disabled(mut self, disabled: bool) -> Self {
        self.disable_locale = disabled;
        self
    }
}

/// Read a variable that may be unset; set-but-not-UTF-8 is an error.
fn optional_var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e @ env::VarError::NotUnicode(_)) => {
            Err(e).with_context(|| format!("{name} must be valid UTF-8"))
        }
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognised flag value {other:?}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = MenuSettings::default();
        assert!(!settings.disable_locale);
        assert_eq!(settings.root_locale, "menu");
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" 1 ").unwrap());
        assert!(parse_flag("ON").unwrap());
        assert!(!parse_flag("false").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(!parse_flag("").unwrap());
    }

    #[test]
    fn parse_flag_rejects_garbage() {
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn unset_variable_is_none() {
        assert_eq!(
            optional_var("WAYFINDER_TEST_SURELY_UNSET_VARIABLE").unwrap(),
            None
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_variable_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = "WAYFINDER_TEST_NON_UNICODE_VALUE";
        // SAFETY: the variable name is unique to this test.
        unsafe { env::set_var(name, OsStr::from_bytes(b"\xff\xfe")) };
        let result = optional_var(name);
        // SAFETY: as above.
        unsafe { env::remove_var(name) };

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("must be valid UTF-8"), "{message}");
    }

    #[test]
    fn with_locale_disabled_toggles() {
        let settings = MenuSettings::default().with_locale_disabled(true);
        assert!(settings.disable_locale);
        assert_eq!(settings.root_locale, DEFAULT_ROOT_LOCALE);
    }
}
