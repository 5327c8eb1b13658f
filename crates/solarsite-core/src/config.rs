//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (nested keys separated by `__`, e.g.
//! `APP_REBATE__STC_PRICE_CENTS`). Provides helpers to expand `~` and `${VAR}`
//! and to resolve relative paths against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebateSettings {
    /// Years of certificates paid out at installation.
    pub deeming_years: u32,
    pub stc_price_cents: u64,
    pub state_rebate_cents: u64,
    /// Certificates per kW per deeming year, zones 1 to 4.
    pub zone_factors: [f64; 4],
}

impl Default for RebateSettings {
    fn default() -> Self {
        Self {
            deeming_years: 6,
            stc_price_cents: 3_800,
            state_rebate_cents: 140_000,
            zone_factors: [1.622, 1.536, 1.382, 1.185],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeSettings {
    /// File or directory of JSON chunks; the built-in corpus is used when unset.
    pub corpus_path: Option<String>,
    pub context_limit: usize,
    pub search_limit: usize,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self { corpus_path: None, context_limit: 3, search_limit: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSettings {
    pub business_name: String,
    /// One-line answer used when nothing in the knowledge base matches.
    pub fallback_message: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            business_name: "Brightside Energy".to_string(),
            fallback_message: "Brightside Energy designs and installs solar panels, home batteries and EV chargers across Victoria. Ask me about systems, rebates or booking a free consultation.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub rebate: RebateSettings,
    pub knowledge: KnowledgeSettings,
    pub chat: ChatSettings,
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name, &env::current_dir()?)
    }

    /// Load `config.toml` and the `env` overlay from `base_dir`.
    pub fn load_for_env(env_name: &str, base_dir: &Path) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base_dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.validate_for_env(env_name)?;
        Ok(config)
    }

    /// Defaults overlaid with an inline TOML document; no files or env vars.
    pub fn from_toml_str(toml: &str, base_dir: &Path) -> anyhow::Result<Self> {
        let figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::string(toml));
        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.validate_for_env("test")?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))
    }

    /// The configured corpus location, expanded and resolved against the base dir.
    pub fn corpus_path(&self) -> anyhow::Result<Option<PathBuf>> {
        let settings = self.settings()?;
        Ok(settings.knowledge.corpus_path.map(|p| resolve_with_base(&self.base_dir, p)))
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        let settings = self.settings()?;
        validate_settings(&settings)?;
        if matches!(env, "prod" | "production") {
            if let Some(path) = self.corpus_path()? {
                if !path.exists() {
                    anyhow::bail!("Prod config points at a missing corpus: {}", path.display());
                }
            }
        }
        Ok(())
    }
}

fn validate_settings(settings: &Settings) -> Result<()> {
    let invalid = |msg: String| -> Result<()> { Err(Error::InvalidConfig(msg)) };
    let rebate = &settings.rebate;
    if rebate.deeming_years == 0 {
        return invalid("rebate.deeming_years must be at least 1".to_string());
    }
    if rebate.stc_price_cents == 0 {
        return invalid("rebate.stc_price_cents must be positive".to_string());
    }
    if let Some(bad) = rebate.zone_factors.iter().find(|f| !f.is_finite() || **f <= 0.0) {
        return invalid(format!("rebate.zone_factors must be positive, got {}", bad));
    }
    if settings.knowledge.context_limit == 0 || settings.knowledge.search_limit == 0 {
        return invalid("knowledge limits must be at least 1".to_string());
    }
    if settings.chat.fallback_message.trim().is_empty() {
        return invalid("chat.fallback_message must not be empty".to_string());
    }
    Ok(())
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
