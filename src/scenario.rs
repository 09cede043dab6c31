//! Szenario-Dateien: Karte, Optionen und eine Folge von Eingaben als TOML.
//!
//! Ein Szenario wird über den Controller abgespielt und liefert das
//! Ansage-Protokoll.
//!
//! ```toml
//! name = "Raum"
//! map = ["....", "...."]
//!
//! [[steps]]
//! action = "draw_completed"
//! request = { shape = "line", from = { x = 0, z = 0 }, to = { x = 3, z = 0 }, edit = { kind = "wall" } }
//! ```

use crate::app::{Announcement, AppCommand, AppController, AppIntent, AppState, SessionPhase};
use crate::shared::SessionOptions;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Abspielbares Szenario.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    /// Anzeigename
    pub name: String,
    /// Karte als ASCII-Zeilen
    pub map: Vec<String>,
    /// Optionen (fehlend = Standardwerte bzw. Konfigurationsdatei)
    #[serde(default)]
    pub options: Option<SessionOptions>,
    /// Eingaben in Reihenfolge
    #[serde(default)]
    pub steps: Vec<AppIntent>,
}

/// Ergebnis eines Szenario-Laufs.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Name des Szenarios
    pub name: String,
    /// Phase der Sitzung nach dem letzten Schritt
    pub final_phase: SessionPhase,
    /// Anzahl ausgeführter Commands
    pub command_count: usize,
    /// Davon Commands, die die Prüfung verändert haben (nur gehaltene Spur)
    pub session_edits: usize,
    /// Jüngste Commands, älteste zuerst
    pub commands: Vec<AppCommand>,
    /// Alle Ansagen, älteste zuerst
    pub announcements: Vec<Announcement>,
}

impl Scenario {
    /// Parst ein Szenario aus TOML-Text.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Szenario-Datei fehlerhaft")
    }

    /// Lädt ein Szenario aus einer Datei.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Szenario nicht lesbar: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Spielt das Szenario ab und gibt den Endzustand zurück.
    ///
    /// `fallback` gilt, wenn das Szenario keine eigenen Optionen enthält.
    pub fn run(&self, fallback: &SessionOptions) -> anyhow::Result<AppState> {
        let options = self.options.clone().unwrap_or_else(|| fallback.clone());
        let mut state = AppState::with_options(options);
        let mut controller = AppController::new();

        log::info!("Szenario '{}' startet ({} Schritte)", self.name, self.steps.len());
        controller.handle_intent(
            &mut state,
            AppIntent::LoadMapRequested {
                rows: self.map.clone(),
            },
        )?;
        for (i, step) in self.steps.iter().enumerate() {
            controller
                .handle_intent(&mut state, step.clone())
                .with_context(|| format!("Schritt {} ({:?}) fehlgeschlagen", i + 1, step))?;
        }
        log::info!("Szenario '{}' beendet", self.name);
        Ok(state)
    }

    /// Spielt das Szenario ab und fasst das Ergebnis zusammen.
    pub fn report(&self, fallback: &SessionOptions) -> anyhow::Result<ScenarioReport> {
        let state = self.run(fallback)?;
        Ok(ScenarioReport {
            name: self.name.clone(),
            final_phase: state.session.phase(),
            command_count: state.command_log.total_recorded(),
            session_edits: state.command_log.session_edit_count(),
            commands: state.command_log.entries().to_vec(),
            announcements: state.announcements.to_vec(),
        })
    }
}
