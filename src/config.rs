/// External configuration loader.
///
/// Reads `mines.toml` from the executable's directory (or CWD).
/// Every key is optional; a missing file plays exactly like the defaults.
/// Only presentation is configurable. Gameplay constants are fixed.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_FILE: &str = "mines.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub display: DisplayConfig,
    pub sound: SoundConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    pub splash_frame: Duration,
    pub flash: Duration,
}

#[derive(Clone, Debug)]
pub struct SoundConfig {
    pub enabled: bool,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    /// Log target. With `None` every line is discarded, even under `RUST_LOG`.
    pub file: Option<PathBuf>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    sound: TomlSound,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_splash_frame")]
    splash_frame_ms: u64,
    #[serde(default = "default_flash")]
    flash_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlSound {
    #[serde(default = "default_sound_enabled")]
    enabled: bool,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_level")]
    level: String,
    #[serde(default)]
    file: String,
}

// ── Defaults ──

fn default_splash_frame() -> u64 { 50 }
fn default_flash() -> u64 { 60 }
fn default_sound_enabled() -> bool { true }
fn default_log_level() -> String { "info".into() }

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay {
            splash_frame_ms: default_splash_frame(),
            flash_ms: default_flash(),
        }
    }
}

impl Default for TomlSound {
    fn default() -> Self {
        TomlSound { enabled: default_sound_enabled() }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `mines.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    pub fn load() -> Self {
        match read_config_text(&candidate_dirs()) {
            Some(text) => Self::parse(&text),
            None => Self::default(),
        }
    }

    /// Parse config text directly. Unknown or malformed input falls back
    /// to defaults with a warning on stderr.
    pub fn parse(text: &str) -> Self {
        match toml::from_str::<TomlConfig>(text) {
            Ok(cfg) => Self::from_toml(cfg),
            Err(e) => {
                eprintln!("Warning: {CONFIG_FILE} parse error: {e}");
                eprintln!("Using default settings.");
                Self::from_toml(TomlConfig::default())
            }
        }
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        let file = cfg.log.file.trim();
        GameConfig {
            display: DisplayConfig {
                splash_frame: Duration::from_millis(cfg.display.splash_frame_ms),
                flash: Duration::from_millis(cfg.display.flash_ms),
            },
            sound: SoundConfig { enabled: cfg.sound.enabled },
            log: LogConfig {
                level: cfg.log.level,
                file: (!file.is_empty()).then(|| PathBuf::from(file)),
            },
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default())
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Text of the first readable config file in the search path.
fn read_config_text(search_dirs: &[PathBuf]) -> Option<String> {
    for dir in search_dirs {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => return Some(text),
            Err(e) => eprintln!("Warning: could not read {}: {e}", path.display()),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = GameConfig::parse("");
        assert_eq!(cfg.display.splash_frame, Duration::from_millis(50));
        assert_eq!(cfg.display.flash, Duration::from_millis(60));
        assert!(cfg.sound.enabled);
        assert_eq!(cfg.log.level, "info");
        assert!(cfg.log.file.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::parse(
            r#"
            [display]
            splash_frame_ms = 5

            [log]
            file = "mines.log"
            level = "debug"
            "#,
        );
        assert_eq!(cfg.display.splash_frame, Duration::from_millis(5));
        assert_eq!(cfg.display.flash, Duration::from_millis(60));
        assert!(cfg.sound.enabled);
        assert_eq!(cfg.log.file, Some(PathBuf::from("mines.log")));
        assert_eq!(cfg.log.level, "debug");
    }

    #[test]
    fn malformed_file_falls_back() {
        let cfg = GameConfig::parse("[sound]\nenabled = \"loud\"");
        assert!(cfg.sound.enabled);
    }
}
