//! Mapping von Eingabe-Intents auf mutierende App-Commands.

use super::session::SessionPhase;
use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
///
/// Jede Operation, die die Prüfung verändert, wird von
/// `RefreshNavigation` gefolgt.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::LoadMapRequested { rows } => {
            vec![AppCommand::LoadMap { rows }, AppCommand::RefreshNavigation]
        }
        AppIntent::CursorMoved { cell } => vec![AppCommand::MoveCursor { cell }],
        AppIntent::DrawCompleted { request } => vec![
            AppCommand::DrawShape { request },
            AppCommand::RefreshNavigation,
        ],
        AppIntent::ToggleAtCursorRequested => vec![
            AppCommand::ToggleCell { cell: state.cursor },
            AppCommand::RefreshNavigation,
        ],
        AppIntent::ConfirmRequested => {
            vec![AppCommand::ConfirmPlacement, AppCommand::RefreshNavigation]
        }
        AppIntent::UndoLastRequested => {
            vec![AppCommand::UndoLastSegment, AppCommand::RefreshNavigation]
        }
        AppIntent::UndoAllRequested => {
            vec![AppCommand::UndoAllSegments, AppCommand::RefreshNavigation]
        }
        AppIntent::CancelRequested => match state.session.phase() {
            // Nur den Zeichenmodus verlassen, Segmente bleiben
            SessionPhase::AddingMore => vec![AppCommand::CancelAddingMore],
            SessionPhase::Reviewing | SessionPhase::Inactive => {
                vec![AppCommand::CancelPlacement, AppCommand::RefreshNavigation]
            }
        },
        AppIntent::AddMoreRequested => vec![AppCommand::BeginAddingMore],
        AppIntent::NavigateNextRequested => vec![AppCommand::FocusNextItem],
        AppIntent::NavigatePreviousRequested => vec![AppCommand::FocusPreviousItem],
        AppIntent::OptionsChanged { options } => vec![
            AppCommand::ApplyOptions { options },
            AppCommand::RefreshNavigation,
        ],
        AppIntent::SaveOptionsRequested => vec![AppCommand::SaveOptions],
        AppIntent::ResetOptionsRequested => vec![
            AppCommand::ApplyOptions {
                options: Default::default(),
            },
            AppCommand::RefreshNavigation,
        ],
    }
}
