//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::ToolchainRequirement;

use super::types::Config;
use super::{ConfigError, ConfigWarning};

pub const PROJECT_CONFIG_FILE: &str = "ctxplan.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown = Vec::new();
    let config: Config =
        serde_ignored::deserialize(toml::de::Deserializer::new(&content), |key_path| {
            unknown.push(key_path.to_string());
        })
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    // Report the leaf key, located by its first occurrence in the file.
    let warnings = unknown
        .iter()
        .map(|key_path| {
            let key = key_path.rsplit('.').next().unwrap_or(key_path).to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

pub fn load_for_solution(solution_dir: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let candidates = [
        Some(solution_dir.join(PROJECT_CONFIG_FILE)),
        user_config_path(),
    ];
    let (config, warnings) = match candidates.into_iter().flatten().find(|p| p.exists()) {
        Some(path) => load_with_warnings(&path)?,
        None => (Config::default(), Vec::new()),
    };
    Ok((config.with_env_overrides()?, warnings))
}

/// `<config_dir>/ctxplan/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ctxplan").join("config.toml"))
}

/// Apply `CTXPLAN_*` overrides read through `var`.
pub fn apply_env(
    mut config: Config,
    var: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    // CTXPLAN_LOAD
    if let Some(load) = var("CTXPLAN_LOAD") {
        config.packs.load = load.parse()?;
    }

    // CTXPLAN_FROZEN_PACKS
    if let Some(frozen) = var("CTXPLAN_FROZEN_PACKS") {
        config.packs.frozen = frozen.to_lowercase() != "false" && frozen != "0";
    }

    // CTXPLAN_LAYER_PATH (OS path list)
    if let Some(paths) = var("CTXPLAN_LAYER_PATH") {
        let parsed: Vec<PathBuf> = std::env::split_paths(&paths)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        if !parsed.is_empty() {
            config.layers.search_paths = parsed;
        }
    }

    // CTXPLAN_TOOLCHAIN
    if let Some(toolchain) = var("CTXPLAN_TOOLCHAIN") {
        if !toolchain.trim().is_empty() {
            config.toolchain.selected = Some(ToolchainRequirement::parse(&toolchain)?);
        }
    }

    Ok(config)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

const KNOWN_KEYS: &[&str] = &[
    "packs",
    "load",
    "frozen",
    "layers",
    "search_paths",
    "selection",
    "yml_order",
    "context_set",
    "output",
    "dir",
    "verbosity",
    "toolchain",
    "selected",
    "inventory",
    "file",
];

/// Closest known key within two edits.
fn suggest_key(unknown: &str) -> Option<String> {
    KNOWN_KEYS
        .iter()
        .map(|key| (levenshtein(unknown, key), *key))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, key)| key.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == *cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}
