use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::state::{default_ledger_path, ensure_tally_home, tally_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerSection,
    #[serde(default)]
    pub summary: SummarySection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSection {
    /// Ledger CSV location (default: ~/.tally/transactions.csv)
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySection {
    /// How many descriptions `tally summary` lists by spending
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
}

fn default_top_categories() -> usize {
    5
}

impl Default for SummarySection {
    fn default() -> Self {
        Self {
            top_categories: default_top_categories(),
        }
    }
}

impl Config {
    /// `--ledger` beats the config file, which beats the default location
    pub fn ledger_path(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        match cli_override.or_else(|| self.ledger.path.clone()) {
            Some(p) => Ok(p),
            None => default_ledger_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("config.toml"))
}

/// Config for one command. Reading it never creates `~/.tally`.
pub fn load_config(has_ledger_override: bool) -> Result<Config> {
    resolve_config(config_path(), has_ledger_override)
}

/// With `--ledger` given, an unknown home directory just means defaults.
/// A config file that exists but does not parse is still an error.
fn resolve_config(path: Result<PathBuf>, has_ledger_override: bool) -> Result<Config> {
    match path {
        Ok(p) => load_config_from(&p),
        Err(e) if has_ledger_override => {
            debug!(error = %e, "no home directory, using default config");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_tally_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config {
        ledger: LedgerSection {
            path: Some(default_ledger_path()?),
        },
        ..Config::default()
    };
    save_config_to(&cfg, &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.summary.top_categories, 5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[ledger]\npath = \"/data/ledger.csv\"\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.ledger.path, Some(PathBuf::from("/data/ledger.csv")));
        assert_eq!(cfg.summary.top_categories, 5);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let cfg = Config {
            ledger: LedgerSection {
                path: Some(PathBuf::from("/tmp/t.csv")),
            },
            summary: SummarySection { top_categories: 3 },
        };
        save_config_to(&cfg, &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn test_cli_override_wins() {
        let cfg = Config {
            ledger: LedgerSection {
                path: Some(PathBuf::from("/from/config.csv")),
            },
            ..Config::default()
        };
        assert_eq!(
            cfg.ledger_path(Some(PathBuf::from("/from/cli.csv"))).unwrap(),
            PathBuf::from("/from/cli.csv")
        );
        assert_eq!(cfg.ledger_path(None).unwrap(), PathBuf::from("/from/config.csv"));
    }

    #[test]
    fn test_missing_home_is_fine_with_explicit_ledger() {
        let no_home = || Err(anyhow::anyhow!("HOME is not set"));

        let cfg = resolve_config(no_home(), true).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(
            cfg.ledger_path(Some(PathBuf::from("/data/l.csv"))).unwrap(),
            PathBuf::from("/data/l.csv")
        );

        assert!(resolve_config(no_home(), false).is_err());
    }

    #[test]
    fn test_reading_config_does_not_create_home() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join(".tally");
        let cfg = resolve_config(Ok(home.join("config.toml")), false).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(!home.exists());
    }

    #[test]
    fn test_bad_config_is_error_even_with_explicit_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "not = [valid").unwrap();
        assert!(resolve_config(Ok(p), true).is_err());
    }

    #[test]
    fn test_bad_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[summary]\ntop_categories = \"five\"\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
