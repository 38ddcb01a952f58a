use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use competition::Catalog;

#[derive(Debug)]
pub struct Settings {
    pub server_bind: String,
    pub frontend_url: String,
    pub catalog_path: Option<String>,
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "0.0.0.0:3001".into(),
            frontend_url: "http://localhost:3000".into(),
            catalog_path: None,
            admin_username: "admin".into(),
            admin_password: "admin123".into(),
        }
    }
}

impl Settings {
    pub fn admin_credentials(&self) -> AdminCredentials {
        AdminCredentials {
            username: self.admin_username.clone(),
            password: self.admin_password.clone(),
        }
    }
}

/// The fixed controller credential. Checking it grants nothing server-side;
/// the presenter UI uses the answer to decide whether to show its controls.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    settings_from_sources(file.as_deref(), |key| std::env::var(key).ok())
}

fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("frontend_url") {
                settings.frontend_url = v.clone();
            }
            if let Some(v) = file_cfg.get("catalog_path") {
                settings.catalog_path = Some(v.clone());
            }
            if let Some(v) = file_cfg.get("admin_username") {
                settings.admin_username = v.clone();
            }
            if let Some(v) = file_cfg.get("admin_password") {
                settings.admin_password = v.clone();
            }
        }
    }

    if let Some(v) = env("PORT") {
        if let Ok(port) = v.trim().parse::<u16>() {
            settings.server_bind = format!("0.0.0.0:{port}");
        }
    }
    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("FRONTEND_URL") {
        settings.frontend_url = v;
    }
    if let Some(v) = env("APP__FRONTEND_URL") {
        settings.frontend_url = v;
    }

    if let Some(v) = env("CATALOG_PATH") {
        settings.catalog_path = Some(v);
    }
    if let Some(v) = env("APP__CATALOG_PATH") {
        settings.catalog_path = Some(v);
    }

    if let Some(v) = env("ADMIN_USERNAME") {
        settings.admin_username = v;
    }
    if let Some(v) = env("APP__ADMIN_USERNAME") {
        settings.admin_username = v;
    }

    if let Some(v) = env("ADMIN_PASSWORD") {
        settings.admin_password = v;
    }
    if let Some(v) = env("APP__ADMIN_PASSWORD") {
        settings.admin_password = v;
    }

    settings
}

/// Loads the configured catalog file, or the built-in riddles when none is set.
pub fn prepare_catalog(catalog_path: Option<&str>) -> anyhow::Result<Catalog> {
    match catalog_path.map(str::trim).filter(|path| !path.is_empty()) {
        Some(path) => Catalog::load(Path::new(path))
            .with_context(|| format!("failed to load question catalog from '{path}'")),
        None => Catalog::builtin().context("built-in question catalog is invalid"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
