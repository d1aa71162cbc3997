use serde::Deserialize;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// Optional `<SWITCHBOARD_HOME>/config.toml`. Environment flags win over it.
#[derive(Debug, Default, Deserialize)]
pub struct UserConfig {
    pub logging: Option<LoggingCfg>,
    pub settings: Option<SettingsCfg>,
    pub health: Option<HealthCfg>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingCfg {
    pub to_file: Option<bool>,
    pub dir: Option<String>,
    pub json: Option<bool>,
    pub compact: Option<bool>,
    pub pretty: Option<bool>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsCfg {
    /// Provider settings TOML (preference + overrides). Defaults to
    /// `<SWITCHBOARD_HOME>/provider-settings.toml`.
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HealthCfg {
    pub timeout_ms: Option<u64>,
}

pub fn load_user_config(sb_home: &Path) -> anyhow::Result<Option<UserConfig>> {
    let path = sb_home.join("config.toml");
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let cfg: UserConfig =
        toml::from_str(&s).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(cfg))
}

/// [`load_user_config`] for binaries: a malformed file is reported on stderr
/// and ignored.
pub fn load_user_config_or_report(sb_home: &Path) -> Option<UserConfig> {
    match load_user_config(sb_home) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ignoring user config: {e:#}");
            None
        }
    }
}

pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// `SWITCHBOARD_HOME` if set, else `$HOME/.provider-switchboard`, else
/// `./.provider-switchboard`.
pub fn switchboard_home() -> PathBuf {
    match std::env::var("SWITCHBOARD_HOME") {
        Ok(dir) if !dir.is_empty() => expand_home(&dir),
        _ => match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".provider-switchboard"),
            Err(_) => std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".provider-switchboard"),
        },
    }
}

/// Settings file path: explicit value, then user config, then the default
/// under `sb_home`.
pub fn settings_path(explicit: Option<&str>, user_cfg: Option<&UserConfig>, sb_home: &Path) -> PathBuf {
    if let Some(p) = explicit.filter(|p| !p.is_empty()) {
        return expand_home(p);
    }
    user_cfg
        .and_then(|c| c.settings.as_ref())
        .and_then(|s| s.file.as_deref())
        .map(expand_home)
        .unwrap_or_else(|| sb_home.join("provider-settings.toml"))
}
