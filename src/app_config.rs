//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use orcid_lookup::LookupConfig;

/// `key = value` file configuration for lookup defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Search endpoint base URL.
    pub search_url: Option<String>,
    /// Reverse lookup endpoint base URL.
    pub reverse_url: Option<String>,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Overall request timeout in seconds.
    pub read_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        validate_url("search_url", self.search_url.as_deref())?;
        validate_url("reverse_url", self.reverse_url.as_deref())?;
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }

    /// Layers file values over `base`.
    #[must_use]
    pub fn apply(&self, mut base: LookupConfig) -> LookupConfig {
        if let Some(search_url) = &self.search_url {
            base.search_url.clone_from(search_url);
        }
        if let Some(reverse_url) = &self.reverse_url {
            base.reverse_url = Some(reverse_url.clone());
        }
        if let Some(secs) = self.connect_timeout_secs {
            base.connect_timeout_secs = secs;
        }
        if let Some(secs) = self.read_timeout_secs {
            base.read_timeout_secs = secs;
        }
        base
    }
}

fn validate_url(field: &str, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let parsed = url::Url::parse(value)
        .with_context(|| format!("Invalid config value for `{field}`: '{value}' is not a URL"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "Invalid config value for `{field}`: scheme '{}' is not supported. Use http:// or https://",
            parsed.scheme()
        );
    }
    Ok(())
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/orcid-lookup/config.toml`
/// 2. `$HOME/.config/orcid-lookup/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("orcid-lookup")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("orcid-lookup")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from `explicit` when given, else from the default path if
/// that file exists.
///
/// An explicit path that does not exist is an error; a missing default file
/// is not.
pub fn load_file_config(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    if let Some(path) = explicit {
        return read_file_config(path).map(Some);
    }

    match resolve_default_config_path() {
        Some(path) if path.exists() => read_file_config(&path).map(Some),
        _ => Ok(None),
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    let config = parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file '{}'", path.display()))?;
    Ok(config)
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "search_url" => {
                cfg.search_url = Some(parse_string_literal(value).with_context(|| {
                    format!("Invalid `search_url` value on line {}", line_index + 1)
                })?);
            }
            "reverse_url" => {
                cfg.reverse_url = Some(parse_string_literal(value).with_context(|| {
                    format!("Invalid `reverse_url` value on line {}", line_index + 1)
                })?);
            }
            "connect_timeout_secs" => {
                cfg.connect_timeout_secs = Some(parse_integer_u64(value).with_context(|| {
                    format!("Invalid `connect_timeout_secs` value on line {}", line_index + 1)
                })?);
            }
            "read_timeout_secs" => {
                cfg.read_timeout_secs = Some(parse_integer_u64(value).with_context(|| {
                    format!("Invalid `read_timeout_secs` value on line {}", line_index + 1)
                })?);
            }
            other => bail!("Unknown config key `{other}` on line {}", line_index + 1),
        }
    }
    Ok(cfg)
}

/// Drops a trailing `# comment` that is not inside a quoted string.
fn strip_inline_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(value: &str) -> Result<String> {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        bail!("expected a double-quoted string");
    };
    Ok(inner.to_string())
}

fn parse_integer_u64(value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .with_context(|| format!("expected a non-negative integer, got '{value}'"))
}
