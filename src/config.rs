use anyhow::Context;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UfwCliConfig {
    pub firewall: FirewallConfig,
    pub elevation: ElevationConfig,
    pub install: InstallConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallConfig {
    /// Firewall utility to drive.
    pub program: String,
    /// Service aliases allowed by `setup`, in order.
    pub baseline_services: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationConfig {
    pub enabled: bool,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Package manager used when the firewall utility is missing.
    pub program: String,
    pub args: Vec<String>,
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self {
            program: "ufw".to_string(),
            baseline_services: vec!["ssh".to_string(), "http".to_string(), "https".to_string()],
        }
    }
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "sudo".to_string(),
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        // Debian-based hosts
        Self {
            program: "apt-get".to_string(),
            args: vec!["install".to_string(), "ufw".to_string(), "-y".to_string()],
        }
    }
}

impl UfwCliConfig {
    /// Loads `explicit` if given (it must exist and parse), otherwise the
    /// per-user config file, otherwise the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Ok(Self::load_or_default(&Self::config_path())),
        }
    }

    /// A missing or broken per-user file never stops a verb.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Ignoring config {}: {:#}", path.display(), e);
                eprintln!(
                    "{} {:#}",
                    "[!] Ignoring unusable config, using defaults:".yellow(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parse config: {}", path.display()))
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn elevator(&self) -> Option<&str> {
        if self.elevation.enabled {
            Some(self.elevation.command.as_str())
        } else {
            None
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ufw-cli")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let cfg: UfwCliConfig = toml::from_str(
            r#"
[elevation]
command = "doas"
"#,
        )
        .unwrap();
        assert!(cfg.elevation.enabled);
        assert_eq!(cfg.elevator(), Some("doas"));
        assert_eq!(cfg.firewall, FirewallConfig::default());
        assert_eq!(cfg.install.args, ["install", "ufw", "-y"]);
    }

    #[test]
    fn disabled_elevation_has_no_elevator() {
        let cfg: UfwCliConfig = toml::from_str("[elevation]\nenabled = false\n").unwrap();
        assert_eq!(cfg.elevator(), None);
    }

    #[test]
    fn rendered_toml_parses_back_to_the_same_config() {
        let cfg = UfwCliConfig::default();
        let rendered = cfg.to_toml().unwrap();
        assert!(rendered.contains("baseline_services"));
        assert_eq!(toml::from_str::<UfwCliConfig>(&rendered).unwrap(), cfg);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(UfwCliConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn malformed_file_is_an_error_when_named() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[firewall\nprogram = ").unwrap();
        assert!(UfwCliConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn malformed_default_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[firewall\n").unwrap();
        assert_eq!(
            UfwCliConfig::load_or_default(file.path()),
            UfwCliConfig::default()
        );
    }

    #[test]
    fn absent_default_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            UfwCliConfig::load_or_default(&dir.path().join("config.toml")),
            UfwCliConfig::default()
        );
    }

    #[test]
    fn valid_default_file_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[firewall]\nprogram = \"ufw-test\"\n").unwrap();
        assert_eq!(
            UfwCliConfig::load_or_default(file.path()).firewall.program,
            "ufw-test"
        );
    }
}
