//! Job configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog;

/// Top-level typequiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypequizConfig {
    /// Where the generator writes and the normalizer reads raw documents.
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    /// Root of the canonical output tree.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Where scored results are persisted.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Topics the generator job produces, one document each.
    #[serde(default = "default_topics")]
    pub topics: Vec<String>,
    /// Fixed generator seed. Random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_raw_dir() -> PathBuf {
    PathBuf::from("data/tests")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("data/canonical")
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("data/results")
}
fn default_topics() -> Vec<String> {
    catalog::DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect()
}

impl Default for TypequizConfig {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            output_dir: default_output_dir(),
            results_dir: default_results_dir(),
            topics: default_topics(),
            seed: None,
        }
    }
}

/// Expand `${NAME}` references from the environment. Unset names expand to
/// nothing; expanded text is not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &rest[start + 2..start + 2 + len];
        out.push_str(&std::env::var(name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    out.push_str(rest);
    out
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `typequiz.toml` in the current directory
/// 2. `~/.config/typequiz/config.toml`
///
/// Environment variable overrides: `TYPEQUIZ_OUTPUT_DIR`, `TYPEQUIZ_SEED`.
pub fn load_config() -> Result<TypequizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TypequizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("typequiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TypequizConfig::default(),
    };

    if let Ok(dir) = std::env::var("TYPEQUIZ_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }
    if let Ok(seed) = std::env::var("TYPEQUIZ_SEED") {
        let seed = seed
            .parse()
            .with_context(|| format!("TYPEQUIZ_SEED is not an integer: {seed}"))?;
        config.seed = Some(seed);
    }

    config.raw_dir = resolve_path(&config.raw_dir);
    config.output_dir = resolve_path(&config.output_dir);
    config.results_dir = resolve_path(&config.results_dir);

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<TypequizConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("typequiz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_TYPEQUIZ_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_TYPEQUIZ_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_TYPEQUIZ_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no_braces_${oops"), "no_braces_${oops");
        std::env::remove_var("_TYPEQUIZ_TEST_VAR");
    }

    #[test]
    fn self_referencing_value_expands_once() {
        std::env::set_var("_TYPEQUIZ_LOOP_VAR", "a/${_TYPEQUIZ_LOOP_VAR}");
        assert_eq!(
            resolve_env_vars("${_TYPEQUIZ_LOOP_VAR}/out"),
            "a/${_TYPEQUIZ_LOOP_VAR}/out"
        );
        std::env::remove_var("_TYPEQUIZ_LOOP_VAR");
        assert_eq!(resolve_env_vars("x${_TYPEQUIZ_UNSET_VAR}y"), "xy");
    }

    #[test]
    fn default_config() {
        let config = TypequizConfig::default();
        assert_eq!(config.raw_dir, PathBuf::from("data/tests"));
        assert_eq!(config.topics.len(), 10);
        assert!(config.seed.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
output_dir = "out"
topics = ["여행", "음악"]
seed = 42
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.raw_dir, PathBuf::from("data/tests"));
        assert_eq!(config.topics, vec!["여행", "음악"]);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        assert!(load_config_from(Some(Path::new("/no/such/typequiz.toml"))).is_err());
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typequiz.toml");
        std::fs::write(&path, "raw_dir = \"raw\"\nresults_dir = \"res\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.raw_dir, PathBuf::from("raw"));
        assert_eq!(config.results_dir, PathBuf::from("res"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typequiz.toml");
        std::fs::write(&path, "seed = \"not a number\"").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }
}
