//! Key mapping from terminal events to game actions.

use crate::types::{BoardSize, Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Key releases and Ctrl chords map to nothing, so Ctrl-C never doubles as
/// "continue".
pub fn map_key(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::Move(Direction::Right))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::Move(Direction::Down))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameAction::Move(Direction::Up))
        }

        // Session
        KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::Backspace => Some(GameAction::Undo),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(GameAction::NewGame)
        }
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::ContinueAfterWin),

        // Board size
        KeyCode::Char(c @ '0'..='9') => c
            .to_digit(10)
            .and_then(|d| BoardSize::new(d as u8))
            .map(GameAction::SetBoardSize),

        // Display and sound
        KeyCode::Char('g') | KeyCode::Char('G') => Some(GameAction::ToggleGrid),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::ToggleSound),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::ToggleHighlight),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> Option<GameAction> {
        map_key(KeyEvent::from(code))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(key(KeyCode::Left), Some(GameAction::Move(Direction::Left)));
        assert_eq!(key(KeyCode::Right), Some(GameAction::Move(Direction::Right)));
        assert_eq!(key(KeyCode::Up), Some(GameAction::Move(Direction::Up)));
        assert_eq!(key(KeyCode::Down), Some(GameAction::Move(Direction::Down)));
    }

    #[test]
    fn test_wasd_and_vi_keys() {
        let cases = [
            ('w', Direction::Up),
            ('a', Direction::Left),
            ('s', Direction::Down),
            ('d', Direction::Right),
            ('K', Direction::Up),
            ('H', Direction::Left),
            ('J', Direction::Down),
            ('L', Direction::Right),
        ];
        for (c, dir) in cases {
            assert_eq!(key(KeyCode::Char(c)), Some(GameAction::Move(dir)), "key {c}");
        }
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(key(KeyCode::Char('u')), Some(GameAction::Undo));
        assert_eq!(key(KeyCode::Backspace), Some(GameAction::Undo));
        assert_eq!(key(KeyCode::Char('n')), Some(GameAction::NewGame));
        assert_eq!(key(KeyCode::Char('R')), Some(GameAction::NewGame));
        assert_eq!(key(KeyCode::Char('c')), Some(GameAction::ContinueAfterWin));
    }

    #[test]
    fn test_board_size_keys() {
        for side in 3u8..=8 {
            let c = char::from(b'0' + side);
            assert_eq!(
                key(KeyCode::Char(c)),
                BoardSize::new(side).map(GameAction::SetBoardSize)
            );
        }
        assert_eq!(key(KeyCode::Char('2')), None);
        assert_eq!(key(KeyCode::Char('9')), None);
    }

    #[test]
    fn test_toggle_keys() {
        assert_eq!(key(KeyCode::Char('g')), Some(GameAction::ToggleGrid));
        assert_eq!(key(KeyCode::Char('m')), Some(GameAction::ToggleSound));
        assert_eq!(key(KeyCode::Char('p')), Some(GameAction::ToggleHighlight));
        assert_eq!(key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_ctrl_and_release_are_ignored() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
