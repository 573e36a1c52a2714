//! Zentrale Konfiguration für die Greif-Werkzeuge.
//!
//! `GrabberOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::tools::{HighlightMode, PlacementMode};

// ── Hand-Greifer ────────────────────────────────────────────────────

/// Greif-Radius um die Hand in Metern.
pub const HAND_GRAB_RADIUS: f32 = 0.1;
/// Nachführ-Anteil pro Tick für gefederte Anheftung (0..=1).
pub const SPRING_STIFFNESS: f32 = 0.35;

// ── Strahl-Greifer ──────────────────────────────────────────────────

/// Maximale Strahllänge in Metern.
pub const RAY_MAX_DISTANCE: f32 = 100.0;

// ── Events ──────────────────────────────────────────────────────────

/// Maximale Anzahl gepufferter Greif-Events.
pub const EVENT_LOG_CAPACITY: usize = 1000;

/// Einstellungen des Hand-Greifers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandOptions {
    /// Gefederte statt starrer Anheftung
    pub using_springs: bool,
    /// Greif-Radius in Metern
    pub grab_radius: f32,
    /// Nachführ-Anteil pro Tick bei gefederter Anheftung
    #[serde(default = "default_spring_stiffness")]
    pub spring_stiffness: f32,
    /// Ablegemodus
    pub placement_mode: PlacementMode,
    /// Darstellungsart der Hervorhebung
    pub highlight_mode: HighlightMode,
}

impl Default for HandOptions {
    fn default() -> Self {
        Self {
            using_springs: false,
            grab_radius: HAND_GRAB_RADIUS,
            spring_stiffness: SPRING_STIFFNESS,
            placement_mode: PlacementMode::MidAir,
            highlight_mode: HighlightMode::Outline,
        }
    }
}

/// Einstellungen des Strahl-Greifers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RayOptions {
    /// Maximale Strahllänge in Metern
    pub max_distance: f32,
    /// Darstellungsart der Hervorhebung
    pub highlight_mode: HighlightMode,
}

impl Default for RayOptions {
    fn default() -> Self {
        Self {
            max_distance: RAY_MAX_DISTANCE,
            highlight_mode: HighlightMode::Outline,
        }
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Greifer-Optionen.
/// Wird als `vr_grab_tools.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrabberOptions {
    /// Highlights aller Kandidaten vorab registrieren und nur ein-/ausblenden
    pub pre_load_highlights: bool,
    /// Jeden Tick auf Schnitt testen, solange nichts gehalten wird
    pub test_intersection: bool,
    /// Kollisionsabfragen auf Objekte mit Greif-Tag beschränken
    pub use_tool_tag: bool,
    /// Maximale Anzahl gepufferter Events
    #[serde(default = "default_event_log_capacity")]
    pub event_log_capacity: usize,
    /// Hand-Greifer
    #[serde(default)]
    pub hand: HandOptions,
    /// Strahl-Greifer
    #[serde(default)]
    pub ray: RayOptions,
}

impl Default for GrabberOptions {
    fn default() -> Self {
        Self {
            pre_load_highlights: true,
            test_intersection: true,
            use_tool_tag: true,
            event_log_capacity: EVENT_LOG_CAPACITY,
            hand: HandOptions::default(),
            ray: RayOptions::default(),
        }
    }
}

/// Serde-Default für `spring_stiffness` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_spring_stiffness() -> f32 {
    SPRING_STIFFNESS
}

/// Serde-Default für `event_log_capacity` (Abwärtskompatibilität).
fn default_event_log_capacity() -> usize {
    EVENT_LOG_CAPACITY
}

impl GrabberOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("vr_grab_tools"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("vr_grab_tools.toml")
    }
}
