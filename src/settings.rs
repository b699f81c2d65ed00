use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::detection::SignalKind;

/// Which detection kinds the user has switched on, mirroring the three
/// checkboxes in the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalToggles {
    pub person_absence: bool,
    pub phone_visible: bool,
    pub drowsiness: bool,
}

impl Default for SignalToggles {
    fn default() -> Self {
        Self {
            person_absence: true,
            phone_visible: true,
            drowsiness: true,
        }
    }
}

impl SignalToggles {
    pub fn for_kind(&self, kind: SignalKind) -> bool {
        match kind {
            SignalKind::PersonAbsence => self.person_absence,
            SignalKind::PhoneVisible => self.phone_visible,
            SignalKind::Drowsiness => self.drowsiness,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserSettings {
    signal_toggles: SignalToggles,
    alert_volume: f32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            signal_toggles: SignalToggles::default(),
            alert_volume: 0.8,
        }
    }
}

/// JSON-backed user settings. Corrupt or missing files fall back to
/// defaults; every update is persisted immediately.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn signal_toggles(&self) -> SignalToggles {
        self.data
            .read()
            .map(|guard| guard.signal_toggles)
            .unwrap_or_default()
    }

    pub fn update_signal_toggles(&self, toggles: SignalToggles) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow::anyhow!("settings store poisoned"))?;
        guard.signal_toggles = toggles;
        self.persist(&guard)
    }

    pub fn alert_volume(&self) -> f32 {
        self.data
            .read()
            .map(|guard| guard.alert_volume)
            .unwrap_or(0.8)
    }

    pub fn set_alert_volume(&self, volume: f32) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow::anyhow!("settings store poisoned"))?;
        guard.alert_volume = volume.clamp(0.0, 1.0);
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();

        let toggles = store.signal_toggles();
        assert!(toggles.person_absence && toggles.phone_visible && toggles.drowsiness);
        assert_eq!(store.alert_volume(), 0.8);
    }

    #[test]
    fn updates_survive_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update_signal_toggles(SignalToggles {
                person_absence: true,
                phone_visible: false,
                drowsiness: false,
            })
            .unwrap();
        store.set_alert_volume(0.3).unwrap();

        let reloaded = SettingsStore::new(path).unwrap();
        assert!(!reloaded.signal_toggles().for_kind(SignalKind::PhoneVisible));
        assert!(reloaded.signal_toggles().for_kind(SignalKind::PersonAbsence));
        assert_eq!(reloaded.alert_volume(), 0.3);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert!(store.signal_toggles().drowsiness);
    }

    #[test]
    fn volume_is_clamped() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        store.set_alert_volume(3.0).unwrap();
        assert_eq!(store.alert_volume(), 1.0);
    }
}
