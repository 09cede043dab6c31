use crate::app::tools::DrawRequest;
use crate::core::Cell;
use crate::shared::SessionOptions;
use serde::Deserialize;

/// App-Intent Events.
/// Intents sind Eingaben aus Eingabegerät/Szenario ohne direkte Mutationslogik.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AppIntent {
    /// Karte aus ASCII-Zeilen laden
    LoadMapRequested { rows: Vec<String> },
    /// Cursor auf eine Zelle bewegt
    CursorMoved { cell: Cell },
    /// Form fertig gezeichnet (Maus losgelassen / Eingabe bestätigt)
    DrawCompleted { request: DrawRequest },
    /// Zelle unter dem Cursor umschalten
    ToggleAtCursorRequested,
    /// Prüfung bestätigen
    ConfirmRequested,
    /// Letztes Segment rückgängig machen
    UndoLastRequested,
    /// Alle Segmente rückgängig machen
    UndoAllRequested,
    /// Abbrechen (Zeichenmodus oder ganze Prüfung)
    CancelRequested,
    /// Weiteres Segment zeichnen
    AddMoreRequested,
    /// Nächsten Listeneintrag anspringen
    NavigateNextRequested,
    /// Vorherigen Listeneintrag anspringen
    NavigatePreviousRequested,
    /// Optionen wurden geändert (nur im Speicher)
    OptionsChanged { options: SessionOptions },
    /// Optionen in die Konfigurationsdatei schreiben
    SaveOptionsRequested,
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptionsRequested,
}
