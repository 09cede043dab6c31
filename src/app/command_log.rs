//! Spur der ausgeführten Commands für Szenario-Berichte.
//!
//! Gehalten werden nur die jüngsten Einträge; der Gesamtzähler zählt auch
//! die bereits verworfenen mit.

use super::AppCommand;

/// Begrenzte Command-Spur eines Laufs.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<AppCommand>,
    total: usize,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt eine leere Spur.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt einen ausgeführten Command an.
    /// Bei voller Spur fällt die ältere Hälfte weg.
    pub fn record(&mut self, command: &AppCommand) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            let dropped = Self::MAX_ENTRIES / 2;
            self.entries.drain(..dropped);
            log::debug!("Command-Spur voll, {} älteste Einträge verworfen", dropped);
        }
        log::trace!("Command #{}: {:?}", self.total, command);
        self.entries.push(command.clone());
        self.total += 1;
    }

    /// Anzahl gehaltener Commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alle jemals aufgezeichneten Commands, verworfene eingeschlossen.
    pub fn total_recorded(&self) -> usize {
        self.total
    }

    /// Anzahl verworfener Commands.
    pub fn dropped(&self) -> usize {
        self.total - self.entries.len()
    }

    /// Gehaltene Commands, die die Prüfung verändert haben.
    pub fn session_edit_count(&self) -> usize {
        self.entries.iter().filter(|c| c.edits_session()).count()
    }

    /// Gehaltene Einträge, älteste zuerst.
    pub fn entries(&self) -> &[AppCommand] {
        &self.entries
    }
}
