//! Key mapping from terminal events to game actions.

use crate::types::{GameAction, GamePhase};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// Map keyboard input to game actions, ignoring the game phase.
///
/// Space always maps to [`GameAction::HardDrop`] here; see [`map_key`].
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::RotateCw),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(GameAction::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameAction::Hold)
        }
        // Only reported by terminals with the keyboard enhancement protocol.
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
            Some(GameAction::Hold)
        }

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Reset),

        _ => None,
    }
}

/// Reinterpret an action for the current phase.
///
/// Hard drop shares the Space key with start and restart: it starts the
/// game from the title overlay and restarts it from the game-over overlay.
pub fn resolve_for_phase(action: GameAction, phase: GamePhase) -> GameAction {
    match (action, phase) {
        (GameAction::HardDrop, GamePhase::AwaitingStart) => GameAction::Start,
        (GameAction::HardDrop, GamePhase::GameOver) => GameAction::Reset,
        (action, _) => action,
    }
}

/// Map keyboard input to the action it means in `phase`.
pub fn map_key(key: KeyEvent, phase: GamePhase) -> Option<GameAction> {
    handle_key_event(key).map(|action| resolve_for_phase(action, phase))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
