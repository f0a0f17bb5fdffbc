//! Loader for refresher configuration with environment + YAML overlays.
//!
//! The canonical source is the process environment: `NIHMS_USER`,
//! `NIHMS_PASSWORD` and `NIHMS_OUTFILE`, plus `__`-separated nested keys such
//! as `NIHMS_WEBDRIVER__URL`. An optional YAML file can supply the same keys,
//! with `${VAR}` placeholders expanded against the environment. Required
//! fields are checked before a browser session is ever started.
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use pacm_common::{Credentials, PortalConfig, RefreshConfig, WebDriverConfig};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Merged-but-unvalidated shape of the configuration sources.
#[derive(Debug, Default, Deserialize)]
struct RawRefreshConfig {
    user: Option<String>,
    password: Option<String>,
    outfile: Option<PathBuf>,
    #[serde(default)]
    portal: PortalConfig,
    #[serde(default)]
    webdriver: WebDriverConfig,
}

/// Expand `${VAR}` placeholders, following references up to a fixed depth so
/// cyclic definitions terminate. Unknown variables are left untouched.
fn expand_env_str(input: &str) -> String {
    let mut current = input.to_string();
    for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
        let expanded = match shellexpand::env(&current) {
            Ok(cow) => cow.into_owned(),
            Err(_) => return current,
        };
        if expanded == current {
            break;
        }
        current = expanded;
    }
    current
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) if s.contains('$') => *s = expand_env_str(s),
        Value::Array(items) => items.iter_mut().for_each(expand_env_in_value),
        Value::Object(map) => map.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

fn validate(raw: RawRefreshConfig) -> Result<RefreshConfig, ConfigError> {
    let mut missing = Vec::new();
    if raw.user.as_deref().map_or(true, str::is_empty) {
        missing.push("NIHMS_USER");
    }
    if raw.password.as_deref().map_or(true, str::is_empty) {
        missing.push("NIHMS_PASSWORD");
    }
    if raw
        .outfile
        .as_ref()
        .map_or(true, |p| p.as_os_str().is_empty())
    {
        missing.push("NIHMS_OUTFILE");
    }
    if !missing.is_empty() {
        return Err(ConfigError::Message(format!(
            "missing required configuration: {}",
            missing.join(", ")
        )));
    }

    for (key, value) in [
        ("portal.login_url", &raw.portal.login_url),
        ("webdriver.url", &raw.webdriver.url),
    ] {
        Url::parse(value).map_err(|e| {
            ConfigError::Message(format!("{key} is not a valid URL ({value}): {e}"))
        })?;
    }

    if !(raw.webdriver.speed > 0.0 && raw.webdriver.speed <= 1.0) {
        return Err(ConfigError::Message(format!(
            "webdriver.speed must be in (0, 1], got {}",
            raw.webdriver.speed
        )));
    }

    Ok(RefreshConfig {
        credentials: Credentials {
            user: raw.user.unwrap_or_default(),
            password: raw.password.unwrap_or_default(),
        },
        outfile: raw.outfile.unwrap_or_default(),
        portal: raw.portal,
        webdriver: raw.webdriver,
    })
}

/// Builder hiding the `config` crate wiring (env + YAML + overrides).
pub struct RefreshConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for RefreshConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshConfigLoader {
    /// Start with the default sources: `NIHMS_`-prefixed environment
    /// variables with `__` as the nesting separator.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(
            Environment::with_prefix("NIHMS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers the format by
    /// suffix. Environment values still win over file values.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet (tests and doc examples).
    ///
    /// ```
    /// use pacm_config::RefreshConfigLoader;
    ///
    /// let cfg = RefreshConfigLoader::new()
    ///     .with_yaml_str("user: alice\npassword: s3cret\noutfile: /tmp/token")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(cfg.credentials.user, "alice");
    /// assert!(cfg.webdriver.headless);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Force a single key to a value, beating every other source. Used for
    /// CLI flags.
    pub fn with_override<V: Into<config::Value>>(
        mut self,
        key: &str,
        value: V,
    ) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Consume the builder: merge the sources, expand `${VAR}` placeholders,
    /// and validate into a [`RefreshConfig`].
    pub fn load(self) -> Result<RefreshConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let raw: RawRefreshConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        validate(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("PACM_TEST_REGION", Some("us-east"), || {
            let mut v = json!("portal-${PACM_TEST_REGION}");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("portal-us-east"));
        });
    }

    #[test]
    fn expands_nested_structures() {
        temp_env::with_vars(
            [
                ("PACM_TEST_HOST", Some("localhost")),
                ("PACM_TEST_PORT", Some("9515")),
            ],
            || {
                let mut v = json!({
                    "webdriver": { "url": "http://${PACM_TEST_HOST}:${PACM_TEST_PORT}" },
                    "tags": ["a-$PACM_TEST_HOST", 1, null]
                });
                expand_env_in_value(&mut v);
                assert_eq!(
                    v,
                    json!({
                        "webdriver": { "url": "http://localhost:9515" },
                        "tags": ["a-localhost", 1, null]
                    })
                );
            },
        );
    }

    #[test]
    fn expansion_follows_references() {
        temp_env::with_vars(
            [
                ("PACM_TEST_INNER", Some("token")),
                ("PACM_TEST_OUTER", Some("dir/${PACM_TEST_INNER}")),
            ],
            || {
                let mut v = json!("/data/${PACM_TEST_OUTER}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("/data/dir/token"));
            },
        );
    }

    #[test]
    fn expansion_terminates_on_cycles() {
        temp_env::with_vars(
            [
                ("PACM_TEST_A", Some("${PACM_TEST_B}")),
                ("PACM_TEST_B", Some("${PACM_TEST_A}")),
            ],
            || {
                let mut v = json!("x=${PACM_TEST_A}");
                // Only termination matters here; the cycle is unresolvable.
                expand_env_in_value(&mut v);
                assert!(v.as_str().unwrap().starts_with("x="));
            },
        );
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${PACM_TEST_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${PACM_TEST_DOES_NOT_EXIST}"));
    }

    #[test]
    fn validate_rejects_out_of_range_speed() {
        let raw = RawRefreshConfig {
            user: Some("u".into()),
            password: Some("p".into()),
            outfile: Some("/tmp/token".into()),
            portal: PortalConfig::default(),
            webdriver: WebDriverConfig {
                speed: 0.0,
                ..WebDriverConfig::default()
            },
        };
        let err = validate(raw).unwrap_err();
        assert!(err.to_string().contains("webdriver.speed"));
    }
}
