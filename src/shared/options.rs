//! Zentrale Konfiguration der Platzierungs-Prüfung.
//!
//! `SessionOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Einschluss-Erkennung ────────────────────────────────────────────

/// Schrittbudget der Flutung als Vielfaches der Kartenzellen.
pub const FLOOD_FILL_BUDGET_FACTOR: usize = 4;

// ── Navigation ──────────────────────────────────────────────────────

/// Name der Navigationsliste für Hindernisse.
pub const OBSTACLE_LIST_NAME: &str = "Hindernisse";
/// Name der Navigationsliste für Zonenteile.
pub const REGION_LIST_NAME: &str = "Zonenteile";

// ── Ansagen ─────────────────────────────────────────────────────────

/// Maximale Anzahl gespeicherter Ansagen.
pub const ANNOUNCEMENT_LOG_CAPACITY: usize = 200;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `placement_review.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Schrittbudget der Flutung (Breite × Höhe × Faktor)
    pub flood_fill_budget_factor: usize,
    /// Name der Hindernis-Liste
    pub obstacle_list_name: String,
    /// Name der Zonenteil-Liste
    pub region_list_name: String,
    /// Lücken als eigene Einträge in der Hindernis-Liste kennzeichnen
    pub include_gaps_in_navigation: bool,
    /// Liste nach Abstand zum Cursor sortieren
    pub sort_navigation_by_distance: bool,
    /// Kapazität des Ansage-Protokolls
    pub announcement_log_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            flood_fill_budget_factor: FLOOD_FILL_BUDGET_FACTOR,
            obstacle_list_name: OBSTACLE_LIST_NAME.to_owned(),
            region_list_name: REGION_LIST_NAME.to_owned(),
            include_gaps_in_navigation: true,
            sort_navigation_by_distance: false,
            announcement_log_capacity: ANNOUNCEMENT_LOG_CAPACITY,
        }
    }
}

impl SessionOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler werden Standardwerte verwendet.
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

    /// Speichert die Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Pfad der Konfigurationsdatei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("placement-review"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("placement_review.toml")
    }
}
