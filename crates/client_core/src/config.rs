use std::{collections::HashMap, fs, io::ErrorKind, path::Path};

use anyhow::{bail, Context};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub customer_id: String,
    pub api_key: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/odata/Employees".into(),
            customer_id: String::new(),
            api_key: String::new(),
        }
    }
}

/// Defaults, then the TOML file at `path` (if it exists), then environment overrides.
pub fn load_service_config(path: Option<&Path>) -> anyhow::Result<ServiceConfig> {
    load_with_env(path, |key| std::env::var(key).ok())
}

fn load_with_env(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ServiceConfig> {
    let mut config = ServiceConfig::default();

    if let Some(path) = path {
        match fs::read_to_string(path) {
            Ok(raw) => apply_file(&mut config, &raw)
                .with_context(|| format!("invalid config file '{}'", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read config file '{}'", path.display()))
            }
        }
    }

    apply_env(&mut config, lookup);
    config.base_url = normalize_base_url(&config.base_url)?;
    Ok(config)
}

fn apply_file(config: &mut ServiceConfig, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;
    if let Some(v) = file_cfg.get("base_url") {
        config.base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("customer_id") {
        config.customer_id = v.clone();
    }
    if let Some(v) = file_cfg.get("api_key") {
        config.api_key = v.clone();
    }
    Ok(())
}

fn apply_env(config: &mut ServiceConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("EMPLOYEE_API_BASE_URL") {
        config.base_url = v;
    }
    if let Some(v) = lookup("APP__BASE_URL") {
        config.base_url = v;
    }

    if let Some(v) = lookup("EMPLOYEE_API_CUSTOMER_ID") {
        config.customer_id = v;
    }
    if let Some(v) = lookup("APP__CUSTOMER_ID") {
        config.customer_id = v;
    }

    if let Some(v) = lookup("EMPLOYEE_API_KEY") {
        config.api_key = v;
    }
    if let Some(v) = lookup("APP__API_KEY") {
        config.api_key = v;
    }
}

pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("employee service base url is empty");
    }

    let url = Url::parse(trimmed).with_context(|| format!("invalid base url '{trimmed}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("unsupported base url scheme '{}'", url.scheme());
    }

    Ok(trimmed.to_string())
}
