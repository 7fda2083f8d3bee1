//! Player preferences
//!
//! Persisted separately from the leaderboard cache in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Game settings/preferences
///
/// Music and hitboxes have in-game keys (M and H). Volumes and reduced motion
/// are storage-only: set them by editing the JSON under `swan_dash_settings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Background music (toggled with M)
    pub music_enabled: bool,
    /// Master volume (0.0 - 1.0), storage-only
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0), storage-only
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0), storage-only
    pub music_volume: f32,

    // === Debug ===
    /// Draw hitbox outlines (toggled with H)
    pub show_hitboxes: bool,

    // === Accessibility ===
    /// Skip the full-page colour inversion at score milestones, storage-only
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.5,

            show_hitboxes: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "swan_dash_settings";

    /// Load settings from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        match storage::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        storage::save_json(Self::STORAGE_KEY, self);
    }

    /// Flip background music; returns the new value
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }

    /// Flip the hitbox overlay; returns the new value
    pub fn toggle_hitboxes(&mut self) -> bool {
        self.show_hitboxes = !self.show_hitboxes;
        self.show_hitboxes
    }

    /// Whether the page-level inversion filter should follow the theme flag
    pub fn effective_inversion(&self, inverted: bool) -> bool {
        inverted && !self.reduced_motion
    }

    /// Clamp volumes into range (hand-edited storage)
    pub fn sanitized(mut self) -> Self {
        self.master_volume = sanitize_volume(self.master_volume);
        self.sfx_volume = sanitize_volume(self.sfx_volume);
        self.music_volume = sanitize_volume(self.music_volume);
        self
    }
}

fn sanitize_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.music_enabled);
        assert!(!settings.show_hitboxes);
    }

    #[test]
    fn test_toggles() {
        let mut settings = Settings::default();
        assert!(!settings.toggle_music());
        assert!(settings.toggle_music());
        assert!(settings.toggle_hitboxes());
    }

    #[test]
    fn test_reduced_motion_suppresses_inversion() {
        let mut settings = Settings::default();
        assert!(settings.effective_inversion(true));
        settings.reduced_motion = true;
        assert!(!settings.effective_inversion(true));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"show_hitboxes": true}"#).unwrap();
        assert!(settings.show_hitboxes);
        assert!(settings.music_enabled);
    }

    #[test]
    fn test_storage_only_fields_from_json() {
        let json = r#"{"reduced_motion": true, "music_volume": 0.2, "sfx_volume": 0.4}"#;
        let settings = serde_json::from_str::<Settings>(json).unwrap().sanitized();
        assert!(settings.reduced_motion);
        assert_eq!(settings.music_volume, 0.2);
        assert_eq!(settings.sfx_volume, 0.4);
        assert_eq!(settings.master_volume, 1.0);
        assert!(!settings.effective_inversion(true));
    }

    #[test]
    fn test_sanitized_volumes() {
        let settings = Settings {
            master_volume: 3.0,
            sfx_volume: f32::NAN,
            music_volume: -1.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(settings.music_volume, 0.0);
    }
}
