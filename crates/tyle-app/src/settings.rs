// Settings persistence: global configuration stored separately from session state.
// Uses platform-native config dir: e.g. ~/Library/Application Support/tyle/settings.json
// on macOS, ~/.config/tyle/settings.json on Linux.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tyle_core::Size;
use tyle_input::{Command, Hotkey, Keymap};
use tyle_layout::LayoutConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TyleSettings {
    /// Item opened in tiles created without explicit items.
    #[serde(default = "default_pane_seed")]
    pub default_pane_seed: String,
    /// Prefix that search queries are appended to.
    #[serde(default = "default_search_url_prefix")]
    pub search_url_prefix: String,
    #[serde(default = "default_workspace_count")]
    pub workspace_count: u32,
    /// Weight units added or removed per resize step.
    #[serde(default = "default_resize_step")]
    pub resize_step: i32,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    #[serde(default)]
    pub keybindings: Vec<KeybindingOverride>,
}

fn default_pane_seed() -> String {
    "https://www.google.com".to_string()
}

fn default_search_url_prefix() -> String {
    "https://www.google.com/search?q=".to_string()
}

fn default_workspace_count() -> u32 {
    4
}

fn default_resize_step() -> i32 {
    30
}

fn default_viewport_width() -> f32 {
    1400.0
}

fn default_viewport_height() -> f32 {
    900.0
}

impl Default for TyleSettings {
    fn default() -> Self {
        Self {
            default_pane_seed: default_pane_seed(),
            search_url_prefix: default_search_url_prefix(),
            workspace_count: default_workspace_count(),
            resize_step: default_resize_step(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            keybindings: Vec::new(),
        }
    }
}

impl TyleSettings {
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            default_pane_seed: self.default_pane_seed.clone(),
            viewport: Size::new(self.viewport_width, self.viewport_height),
        }
    }

    /// Default hotkeys with the user's overrides applied. Overrides naming an
    /// unknown action or key are skipped.
    pub fn keymap(&self) -> Keymap {
        if self.keybindings.is_empty() {
            return Keymap::new();
        }
        let overrides: Vec<(Hotkey, Command)> = self
            .keybindings
            .iter()
            .filter_map(|o| {
                let binding = o.to_binding();
                if binding.is_none() {
                    log::warn!("Ignoring keybinding override {:?}", o);
                }
                binding
            })
            .collect();
        Keymap::with_overrides(overrides)
    }
}

/// A single keybinding override stored in settings.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeybindingOverride {
    pub action: String,
    pub key: String,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeybindingOverride {
    /// Convert to a (Hotkey, Command) pair.
    pub fn to_binding(&self) -> Option<(Hotkey, Command)> {
        let command = Command::from_action_key(&self.action)?;
        let key = Hotkey::key_from_name(&self.key)?;
        let hotkey = Hotkey::new(key, self.shift, self.ctrl, self.meta, self.alt);
        Some((hotkey, command))
    }

    /// Create from a Hotkey and Command. Commands without an action key
    /// cannot be stored.
    pub fn from_binding(hotkey: &Hotkey, command: &Command) -> Option<Self> {
        Some(Self {
            action: command.action_key()?,
            key: hotkey.key_name(),
            shift: hotkey.shift,
            ctrl: hotkey.ctrl,
            meta: hotkey.meta,
            alt: hotkey.alt,
        })
    }
}

/// Every binding of `keymap` in override form, for writing a complete,
/// editable table to settings.json.
pub fn export_keybindings(keymap: &Keymap) -> Vec<KeybindingOverride> {
    keymap
        .bindings
        .iter()
        .filter_map(|(hotkey, command)| KeybindingOverride::from_binding(hotkey, command))
        .collect()
}

// ──────────────────────────────────────────────
// Settings file I/O
// ──────────────────────────────────────────────

pub fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("tyle").join("settings.json"))
}

pub fn load_settings() -> TyleSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => TyleSettings::default(),
    }
}

/// Missing or unreadable files give the defaults; a malformed file is
/// reported and also gives the defaults.
pub fn load_settings_from(path: &Path) -> TyleSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                TyleSettings::default()
            }
        },
        Err(_) => TyleSettings::default(),
    }
}

pub fn save_settings(settings: &TyleSettings) {
    match settings_path() {
        Some(path) => save_settings_to(settings, &path),
        None => log::warn!("Cannot determine settings path"),
    }
}

pub fn save_settings_to(settings: &TyleSettings, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tyle_core::{Key, Modifiers, TilingMode};

    #[test]
    fn missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings_from(&temp.path().join("nope.json"));
        assert_eq!(settings.workspace_count, 4);
        assert_eq!(settings.resize_step, 30);
        assert_eq!(settings.default_pane_seed, "https://www.google.com");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, r#"{"workspace_count": 6, "default_pane_seed": "about:blank"}"#).unwrap();

        let settings = load_settings_from(&path);
        assert_eq!(settings.workspace_count, 6);
        assert_eq!(settings.default_pane_seed, "about:blank");
        assert_eq!(settings.search_url_prefix, "https://www.google.com/search?q=");
        assert_eq!(settings.layout_config().viewport, Size::new(1400.0, 900.0));
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path).workspace_count, 4);
    }

    #[test]
    fn save_then_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("settings.json");
        let settings = TyleSettings {
            resize_step: 50,
            ..Default::default()
        };
        save_settings_to(&settings, &path);
        assert_eq!(load_settings_from(&path).resize_step, 50);
    }

    #[test]
    fn keybinding_overrides_apply() {
        let settings = TyleSettings {
            keybindings: vec![
                KeybindingOverride {
                    action: "mode_bsp".to_string(),
                    key: "B".to_string(),
                    shift: false,
                    ctrl: false,
                    meta: true,
                    alt: false,
                },
                KeybindingOverride {
                    action: "no_such_action".to_string(),
                    key: "X".to_string(),
                    shift: false,
                    ctrl: true,
                    meta: false,
                    alt: false,
                },
            ],
            ..Default::default()
        };

        let keymap = settings.keymap();
        let meta = Modifiers {
            meta: true,
            ..Default::default()
        };
        assert_eq!(
            keymap.match_hotkey(Key::Char('b'), meta),
            Some(Command::SetTilingMode(TilingMode::Bsp))
        );
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        assert_eq!(keymap.match_hotkey(Key::Char('x'), ctrl), None);
    }

    #[test]
    fn exported_table_reproduces_default_keymap() {
        let defaults = Keymap::new();
        let settings = TyleSettings {
            keybindings: export_keybindings(&defaults),
            ..Default::default()
        };
        assert_eq!(settings.keybindings.len(), defaults.bindings.len());

        let restored = settings.keymap();
        for (hotkey, command) in &defaults.bindings {
            assert_eq!(
                restored.match_hotkey(hotkey.key, hotkey.modifiers()).as_ref(),
                Some(command),
                "{}",
                hotkey.display()
            );
        }
    }

    #[test]
    fn override_round_trips_through_binding() {
        let hotkey = Hotkey::new(Key::Left, true, false, false, true);
        let stored = KeybindingOverride::from_binding(&hotkey, &Command::MoveFocus(-1)).unwrap();
        assert_eq!(stored.action, "focus_prev");
        assert_eq!(stored.to_binding(), Some((hotkey, Command::MoveFocus(-1))));
        assert!(KeybindingOverride::from_binding(&Hotkey::new(Key::Enter, false, false, false, false), &Command::Show)
            .is_none());
    }
}
