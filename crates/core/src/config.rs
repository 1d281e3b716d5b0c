use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog_api: CatalogApiConfig,
    pub server: ServerConfig,
    pub branding: BrandingConfig,
    pub logging: LoggingConfig,
}

/// Where the external catalog/persistence collaborators live.
#[derive(Clone, Debug)]
pub struct CatalogApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

/// Static branding rendered into every quotation document.
#[derive(Clone, Debug)]
pub struct BrandingConfig {
    pub agency_name: String,
    pub contact_line: String,
    pub logo_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_base_url: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_api: CatalogApiConfig {
                base_url: "http://localhost:5000/api".to_string(),
                timeout_secs: 30,
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                graceful_shutdown_secs: 15,
            },
            branding: BrandingConfig {
                agency_name: "Tripquote Travel".to_string(),
                contact_line: "bookings@tripquote.example | +91 00000 00000".to_string(),
                logo_url: None,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog_api: Option<CatalogApiPatch>,
    server: Option<ServerPatch>,
    branding: Option<BrandingPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogApiPatch {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct BrandingPatch {
    agency_name: Option<String>,
    contact_line: Option<String>,
    logo_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<String>,
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch)?;
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("tripquote.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) -> Result<(), ConfigError> {
        if let Some(catalog_api) = patch.catalog_api {
            if let Some(base_url) = catalog_api.base_url {
                self.catalog_api.base_url = base_url;
            }
            if let Some(timeout_secs) = catalog_api.timeout_secs {
                self.catalog_api.timeout_secs = timeout_secs;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(branding) = patch.branding {
            if let Some(agency_name) = branding.agency_name {
                self.branding.agency_name = agency_name;
            }
            if let Some(contact_line) = branding.contact_line {
                self.branding.contact_line = contact_line;
            }
            if let Some(logo_url) = branding.logo_url {
                self.branding.logo_url = Some(logo_url);
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format.parse()?;
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("TRIPQUOTE_CATALOG_BASE_URL") {
            self.catalog_api.base_url = value;
        }
        if let Some(value) = read_env("TRIPQUOTE_CATALOG_TIMEOUT_SECS") {
            self.catalog_api.timeout_secs = parse_u64("TRIPQUOTE_CATALOG_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("TRIPQUOTE_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("TRIPQUOTE_SERVER_PORT") {
            self.server.port = parse_u16("TRIPQUOTE_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("TRIPQUOTE_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("TRIPQUOTE_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        if let Some(value) = read_env("TRIPQUOTE_BRANDING_AGENCY_NAME") {
            self.branding.agency_name = value;
        }
        if let Some(value) = read_env("TRIPQUOTE_BRANDING_CONTACT_LINE") {
            self.branding.contact_line = value;
        }
        if let Some(value) = read_env("TRIPQUOTE_BRANDING_LOGO_URL") {
            self.branding.logo_url = Some(value);
        }

        let log_level =
            read_env("TRIPQUOTE_LOGGING_LEVEL").or_else(|| read_env("TRIPQUOTE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("TRIPQUOTE_LOGGING_FORMAT").or_else(|| read_env("TRIPQUOTE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(catalog_base_url) = overrides.catalog_base_url {
            self.catalog_api.base_url = catalog_base_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.catalog_api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Validation("catalog_api.base_url must not be empty".into()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "catalog_api.base_url must be an http(s) URL".into(),
            ));
        }
        if self.catalog_api.timeout_secs == 0 || self.catalog_api.timeout_secs > 300 {
            return Err(ConfigError::Validation(
                "catalog_api.timeout_secs must be in range 1..=300".into(),
            ));
        }
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Validation("server.bind_address must not be empty".into()));
        }
        if self.branding.agency_name.trim().is_empty() {
            return Err(ConfigError::Validation("branding.agency_name must not be empty".into()));
        }
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("tripquote.toml"), PathBuf::from("config/tripquote.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

/// Expands `${VAR}` expressions inside the config file before parsing.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidEnvOverride { key: key.into(), value: value.into() })
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidEnvOverride { key: key.into(), value: value.into() })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create temp config");
        file.write_all(contents.as_bytes()).expect("write temp config");
        file
    }

    #[test]
    fn defaults_load_without_a_file() {
        let config = AppConfig::load(LoadOptions::default()).expect("defaults load");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn file_patch_overrides_defaults() {
        let file = write_config(
            r#"
            [catalog_api]
            base_url = "https://catalog.internal/api"
            timeout_secs = 10

            [branding]
            agency_name = "Sunset Tours"

            [logging]
            format = "json"
            "#,
        );

        let config = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides::default(),
        })
        .expect("config loads");

        assert_eq!(config.catalog_api.base_url, "https://catalog.internal/api");
        assert_eq!(config.catalog_api.timeout_secs, 10);
        assert_eq!(config.branding.agency_name, "Sunset Tours");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = AppConfig::load(LoadOptions {
            config_path: Some("does-not-exist.toml".into()),
            require_file: true,
            overrides: ConfigOverrides::default(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn explicit_overrides_win_over_file_values() {
        let file = write_config(
            r#"
            [catalog_api]
            base_url = "https://catalog.internal/api"
            "#,
        );

        let config = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides {
                catalog_base_url: Some("https://staging.internal/api".into()),
                log_level: Some("debug".into()),
            },
        })
        .expect("config loads");

        assert_eq!(config.catalog_api.base_url, "https://staging.internal/api");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn invalid_base_url_fails_validation() {
        let file = write_config(
            r#"
            [catalog_api]
            base_url = "ftp://catalog.internal"
            "#,
        );

        let result = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            overrides: ConfigOverrides::default(),
        });
        assert!(result.is_err());
    }
}
