//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert Eingabe-Events und Handler auf den AppState.
#[derive(Debug, Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Karte & Cursor ===
            AppCommand::LoadMap { rows } => handlers::map::load(state, &rows)?,
            AppCommand::MoveCursor { cell } => handlers::map::move_cursor(state, cell),

            // === Platzierung ===
            AppCommand::DrawShape { request } => handlers::placement::draw(state, &request)?,
            AppCommand::ToggleCell { cell } => handlers::placement::toggle(state, cell),
            AppCommand::ConfirmPlacement => handlers::placement::confirm(state),
            AppCommand::UndoLastSegment => handlers::placement::undo_last(state),
            AppCommand::UndoAllSegments => handlers::placement::undo_all(state),
            AppCommand::CancelPlacement => handlers::placement::cancel(state),
            AppCommand::BeginAddingMore => handlers::placement::begin_adding_more(state),
            AppCommand::CancelAddingMore => handlers::placement::cancel_adding_more(state),

            // === Navigation ===
            AppCommand::RefreshNavigation => handlers::navigation::refresh(state),
            AppCommand::FocusNextItem => handlers::navigation::focus_next(state),
            AppCommand::FocusPreviousItem => handlers::navigation::focus_previous(state),

            // === Optionen ===
            AppCommand::ApplyOptions { options } => handlers::options::apply(state, options),
            AppCommand::SaveOptions => handlers::options::save(state)?,
        }

        Ok(())
    }
}
