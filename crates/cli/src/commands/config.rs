use std::env;
use std::path::{Path, PathBuf};

use toml::Value;

use tripquote_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let fields: [(&str, String, Option<&str>); 8] = [
        (
            "catalog_api.base_url",
            config.catalog_api.base_url.clone(),
            Some("TRIPQUOTE_CATALOG_BASE_URL"),
        ),
        (
            "catalog_api.timeout_secs",
            config.catalog_api.timeout_secs.to_string(),
            Some("TRIPQUOTE_CATALOG_TIMEOUT_SECS"),
        ),
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            Some("TRIPQUOTE_SERVER_BIND_ADDRESS"),
        ),
        ("server.port", config.server.port.to_string(), Some("TRIPQUOTE_SERVER_PORT")),
        (
            "branding.agency_name",
            config.branding.agency_name.clone(),
            Some("TRIPQUOTE_BRANDING_AGENCY_NAME"),
        ),
        (
            "branding.contact_line",
            config.branding.contact_line.clone(),
            Some("TRIPQUOTE_BRANDING_CONTACT_LINE"),
        ),
        ("logging.level", config.logging.level.clone(), Some("TRIPQUOTE_LOGGING_LEVEL")),
        ("logging.format", format!("{:?}", config.logging.format), Some("TRIPQUOTE_LOGGING_FORMAT")),
    ];

    for (key, value, env_key) in fields {
        let source =
            field_source(key, env_key, config_file_doc.as_ref(), config_file_path.as_deref());
        lines.push(format!("  {key} = {value}  ({source})"));
    }

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("tripquote.toml"), PathBuf::from("config/tripquote.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = std::fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key: &str,
    env_key: Option<&str>,
    doc: Option<&Value>,
    path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var(env_key).map(|v| !v.trim().is_empty()).unwrap_or(false) {
            return format!("env {env_key}");
        }
    }

    if let (Some(doc), Some(path)) = (doc, path) {
        let mut cursor = Some(doc);
        for part in key.split('.') {
            cursor = cursor.and_then(|value| value.get(part));
        }
        if cursor.is_some() {
            return format!("file {}", path.display());
        }
    }

    "default".to_string()
}

#[cfg(test)]
mod tests {
    use super::field_source;

    #[test]
    fn unset_field_attributes_to_default() {
        assert_eq!(field_source("server.port", None, None, None), "default");
    }

    #[test]
    fn file_backed_field_attributes_to_the_file() {
        let doc: toml::Value = "[server]\nport = 9090\n".parse().expect("toml");
        let source = field_source(
            "server.port",
            None,
            Some(&doc),
            Some(std::path::Path::new("tripquote.toml")),
        );
        assert_eq!(source, "file tripquote.toml");
    }
}
