//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HerbicalibError, HerbicalibResult};

use super::types::{Config, LedgerBackend, Verbosity};

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "herbicalib.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// A resolved configuration and where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the values were read from; `None` means built-in defaults
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> HerbicalibResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| HerbicalibError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| HerbicalibError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve configuration; the first source found wins:
/// 1. `explicit` (must exist)
/// 2. `./herbicalib.toml`
/// 3. `~/.config/herbicalib/config.toml`
/// 4. Built-in defaults
///
/// Environment overrides are applied on top of whichever source won.
pub fn resolve(explicit: Option<&Path>) -> HerbicalibResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project = PathBuf::from(PROJECT_CONFIG_FILE);
            let user = dirs_config_dir().map(|d| d.join("herbicalib/config.toml"));
            [Some(project), user]
                .into_iter()
                .flatten()
                .find(|p| p.exists())
        }
    };

    let (config, warnings) = match &candidate {
        Some(path) => load_with_warnings(path)?,
        None => (Config::default(), Vec::new()),
    };

    tracing::debug!(
        source = %candidate.as_ref().map_or("defaults".to_string(), |p| p.display().to_string()),
        warnings = warnings.len(),
        "resolved configuration"
    );

    Ok(LoadedConfig {
        config: with_env_overrides(config),
        source: candidate,
        warnings,
    })
}

/// Apply environment variable overrides (HERBICALIB_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_env(mut config: Config, get_env: impl Fn(&str) -> Option<String>) -> Config {
    // HERBICALIB_DELETE_SECRET
    if let Some(secret) = get_env("HERBICALIB_DELETE_SECRET") {
        config.auth.delete_secret = Some(secret);
    }

    // HERBICALIB_LEDGER_BACKEND
    if let Some(backend) = get_env("HERBICALIB_LEDGER_BACKEND") {
        match backend.to_lowercase().as_str() {
            "file" | "jsonl" => config.ledger.backend = LedgerBackend::File,
            "sqlite" => config.ledger.backend = LedgerBackend::Sqlite,
            other => tracing::warn!(value = other, "ignoring unknown HERBICALIB_LEDGER_BACKEND"),
        }
    }

    // HERBICALIB_LEDGER_PATH
    if let Some(path) = get_env("HERBICALIB_LEDGER_PATH") {
        if !path.is_empty() {
            config.ledger.path = Some(PathBuf::from(path));
        }
    }

    // HERBICALIB_VERBOSITY
    if let Some(verbosity) = get_env("HERBICALIB_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    config
}

/// Get XDG config directory
fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

/// Directory holding the default ledger store
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("herbicalib"))
        .unwrap_or_else(|| PathBuf::from(".herbicalib"))
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "calibration",
        "capacity_l",
        "dose_ratio",
        "mode",
        "ledger",
        "backend",
        "path",
        "auth",
        "delete_secret",
        "export",
        "delimiter",
        "output",
        "verbosity",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_key_finds_close_match() {
        assert_eq!(suggest_key("dose_ration"), Some("dose_ratio".to_string()));
        assert_eq!(suggest_key("backnd"), Some("backend".to_string()));
        assert_eq!(suggest_key("completely_unrelated"), None);
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("mode", "mode"), 0);
        assert_eq!(levenshtein("mode", "node"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn expand_home_leaves_plain_paths() {
        assert_eq!(
            expand_home(Path::new("/var/lib/ledger.jsonl")),
            PathBuf::from("/var/lib/ledger.jsonl")
        );
        let expanded = expand_home(Path::new("~/ledger.jsonl"));
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
