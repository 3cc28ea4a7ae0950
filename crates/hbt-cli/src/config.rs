// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use hbt_tui::Theme;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const CONFIG_PATH_ENV: &str = "HBT_CONFIG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub storage: Storage,
    pub ui: Ui,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Storage {
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ui {
    #[serde(default)]
    pub theme: ThemeName,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Plain,
}

/// File layout before the version is checked.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    version: Option<i64>,
    #[serde(default)]
    storage: Storage,
    #[serde(default)]
    ui: Ui,
}

impl Config {
    /// `HBT_CONFIG_PATH`, else `<config dir>/hbt/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let app_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("no config directory on this platform; set {CONFIG_PATH_ENV}"))?
            .join(hbt_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    /// Missing file means defaults; anything else must parse as a version 1
    /// config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("config {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(raw).context("invalid TOML")?;
        match raw.version {
            Some(CONFIG_VERSION) => {}
            Some(other) => bail!("version = {other} is not supported; this build reads version = 1"),
            None => bail!("missing `version = 1` line"),
        }
        if let Some(db_path) = &raw.storage.db_path {
            hbt_db::validate_db_path(db_path)?;
        }
        Ok(Self {
            storage: raw.storage,
            ui: raw.ui,
        })
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        self.storage
            .db_path
            .as_ref()
            .map_or_else(hbt_db::default_db_path, |path| Ok(PathBuf::from(path)))
    }

    pub fn theme(&self) -> Theme {
        match self.ui.theme {
            ThemeName::Dark => Theme::dark(),
            ThemeName::Plain => Theme::plain(),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "\
# hbt config
# Place this file at: {}

version = {CONFIG_VERSION}

[storage]
# Optional. Default is platform data dir (for example ~/.local/share/hbt/hbt.db)
# db_path = \"/absolute/path/to/hbt.db\"

[ui]
# \"dark\" for colored category headers, \"plain\" for monochrome terminals
theme = \"dark\"
",
            path.display(),
        )
    }
}
