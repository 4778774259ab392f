//! Saved command-line defaults.
//!
//! Flags live in an rc file of whitespace-separated tokens, one flag per
//! line. The global file is merged first, then the local `.editorpanelrc`,
//! then the actual command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "editor-panel";
const LOCAL_RC: &str = ".editorpanelrc";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    /// Start with the dark marker set
    pub dark: bool,
    /// JSON file backing the module settings
    pub settings: Option<PathBuf>,
    /// File whose content drives the dark marker
    pub theme_marker: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`; booleans accumulate, options prefer `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            dark: self.dark || other.dark,
            settings: other.settings.clone().or_else(|| self.settings.clone()),
            theme_marker: other
                .theme_marker
                .clone()
                .or_else(|| self.theme_marker.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join(APP_DIR)
                .join("config");
        }
    }

    PathBuf::from(LOCAL_RC)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_RC)
}

/// Default location of the settings file when none is configured.
pub fn default_settings_path() -> PathBuf {
    global_config_path().with_file_name("settings.json")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# editor-panel defaults (saved with --save)".to_string()];
    if flags.dark {
        lines.push("--dark".to_string());
    }
    if let Some(settings) = &flags.settings {
        lines.push(format!("--settings {}", settings.display()));
    }
    if let Some(marker) = &flags.theme_marker {
        lines.push(format!("--theme-marker {}", marker.display()));
    }
    if let Some(log) = &flags.log_file {
        lines.push(format!("--log-file {}", log.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of `tokens`, ignoring everything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--dark" {
            flags.dark = true;
        } else if let Some(slot) = path_flag(&mut flags, token) {
            if let Some(next) = tokens.get(i + 1) {
                *slot = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some((name, value)) = token.split_once('=') {
            if let Some(slot) = path_flag(&mut flags, name) {
                *slot = Some(PathBuf::from(value));
            }
        }
        i += 1;
    }
    flags
}

fn path_flag<'a>(flags: &'a mut ConfigFlags, name: &str) -> Option<&'a mut Option<PathBuf>> {
    match name {
        "--settings" => Some(&mut flags.settings),
        "--theme-marker" => Some(&mut flags.theme_marker),
        "--log-file" => Some(&mut flags.log_file),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "editor-panel",
            "--dark",
            "--settings",
            "settings.json",
            "--theme-marker=theme",
            "--log-file",
            "panel.log",
            "--unknown",
        ]));
        assert!(flags.dark);
        assert_eq!(flags.settings, Some(PathBuf::from("settings.json")));
        assert_eq!(flags.theme_marker, Some(PathBuf::from("theme")));
        assert_eq!(flags.log_file, Some(PathBuf::from("panel.log")));
    }

    #[test]
    fn test_trailing_path_flag_without_value() {
        let flags = parse_flag_tokens(&tokens(&["--settings"]));
        assert_eq!(flags.settings, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            dark: true,
            settings: Some(PathBuf::from("file.json")),
            log_file: Some(PathBuf::from("file.log")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            settings: Some(PathBuf::from("cli.json")),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.dark);
        assert_eq!(merged.settings, Some(PathBuf::from("cli.json")));
        assert_eq!(merged.log_file, Some(PathBuf::from("file.log")));
        assert_eq!(merged.theme_marker, None);
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(LOCAL_RC);
        let flags = ConfigFlags {
            dark: true,
            settings: Some(PathBuf::from("settings.json")),
            theme_marker: Some(PathBuf::from("theme")),
            log_file: Some(PathBuf::from("panel.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }

    #[test]
    fn test_default_settings_next_to_global_config() {
        let path = default_settings_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("settings.json"));
    }
}
