use crate::app::tools::DrawRequest;
use crate::core::Cell;
use crate::shared::SessionOptions;
use serde::Serialize;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AppCommand {
    /// Karte aus ASCII-Zeilen laden (laufende Prüfung wird abgebrochen)
    LoadMap { rows: Vec<String> },
    /// Cursor setzen
    MoveCursor { cell: Cell },
    /// Form rastern und als Segment in die Prüfung aufnehmen
    DrawShape { request: DrawRequest },
    /// Zonenzelle umschalten
    ToggleCell { cell: Cell },
    /// Prüfung bestätigen
    ConfirmPlacement,
    /// Letztes Segment zurücknehmen
    UndoLastSegment,
    /// Alle Segmente zurücknehmen
    UndoAllSegments,
    /// Prüfung abbrechen und alles zurücknehmen
    CancelPlacement,
    /// In den Zeichenmodus für ein weiteres Segment wechseln
    BeginAddingMore,
    /// Zeichenmodus verlassen, Prüfung unverändert
    CancelAddingMore,
    /// Navigationsliste neu veröffentlichen
    RefreshNavigation,
    /// Nächsten Listeneintrag fokussieren
    FocusNextItem,
    /// Vorherigen Listeneintrag fokussieren
    FocusPreviousItem,
    /// Optionen übernehmen
    ApplyOptions { options: SessionOptions },
    /// Optionen speichern
    SaveOptions,
}

impl AppCommand {
    /// `true` für Commands, die Segmente der Prüfung anlegen, ändern oder abschließen.
    pub fn edits_session(&self) -> bool {
        matches!(
            self,
            AppCommand::DrawShape { .. }
                | AppCommand::ToggleCell { .. }
                | AppCommand::ConfirmPlacement
                | AppCommand::UndoLastSegment
                | AppCommand::UndoAllSegments
                | AppCommand::CancelPlacement
        )
    }
}
