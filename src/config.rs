use std::io::ErrorKind;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// The four display switches. Plain flags, flipped by key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggles {
    pub show_color: bool,
    pub show_glitch: bool,
    pub show_animation: bool,
    pub show_monitor: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Toggles {
            show_color: true,
            show_glitch: true,
            show_animation: true,
            show_monitor: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Color,
    Glitch,
    Animation,
    Monitor,
}

impl Toggles {
    pub fn flip(&mut self, toggle: Toggle) {
        let flag = match toggle {
            Toggle::Color => &mut self.show_color,
            Toggle::Glitch => &mut self.show_glitch,
            Toggle::Animation => &mut self.show_animation,
            Toggle::Monitor => &mut self.show_monitor,
        };
        *flag = !*flag;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetConfig {
    #[serde(default = "default_image_path")]
    pub image_path: String,
    #[serde(flatten)]
    pub toggles: Toggles,
    #[serde(default = "default_target_width")]
    pub target_width: NonZeroU32,
    #[serde(default)]
    pub key_bindings: KeyBindings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub toggle_color: String,
    pub toggle_glitch: String,
    pub toggle_animation: String,
    pub toggle_monitor: String,
    pub reload: String,
    pub quit: String,
    #[serde(default = "default_quit_alt")]
    pub quit_alt: String,
}

/// Shipped image used when no other image can be loaded.
pub const DEFAULT_IMAGE_PATH: &str = "assets/idle.png";

fn default_image_path() -> String { DEFAULT_IMAGE_PATH.into() }
fn default_target_width() -> NonZeroU32 { NonZeroU32::new(50).unwrap_or(NonZeroU32::MIN) }
fn default_quit_alt() -> String { "Esc".into() }

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            toggle_color: "c".into(),
            toggle_glitch: "g".into(),
            toggle_animation: "a".into(),
            toggle_monitor: "Tab".into(),
            reload: "r".into(),
            quit: "q".into(),
            quit_alt: default_quit_alt(),
        }
    }
}

impl Default for PetConfig {
    fn default() -> Self {
        PetConfig {
            image_path: default_image_path(),
            toggles: Toggles::default(),
            target_width: default_target_width(),
            key_bindings: KeyBindings::default(),
        }
    }
}

impl PetConfig {
    /// A missing file yields defaults, and so does a file that does not
    /// parse. Any other read error is returned.
    pub fn load(path: &Path) -> Result<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        match serde_json::from_str(&json) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("invalid config {} ({e}), using defaults", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("config saved to {}", path.display());
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        match ProjectDirs::from("", "", "ascii-pet") {
            Some(dirs) => dirs.config_dir().join("config.json"),
            None => PathBuf::from("config.json"),
        }
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(ch) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return match ch.chars().next() {
            Some(c) => event.code == KeyCode::Char(c),
            None => false,
        };
    }

    // Plain bindings must not fire on Ctrl or Alt chords.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    match binding {
        "Esc" => event.code == KeyCode::Esc,
        "Tab" => event.code == KeyCode::Tab,
        "Enter" => event.code == KeyCode::Enter,
        "Space" => event.code == KeyCode::Char(' '),
        s => {
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return event.code == KeyCode::F(n);
                }
            }
            match s.chars().next() {
                Some(c) => event.code == KeyCode::Char(c),
                None => false,
            }
        }
    }
}
