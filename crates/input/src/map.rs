//! Key mapping from terminal events to quiz inputs.

use crate::types::{CountryId, QuizCommand, OPTION_COUNT};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key means on the question screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayInput {
    /// Pick the option at this presentation index
    Choose(usize),
    Hint,
    Skip,
    Fifty,
    Next,
    Abandon,
}

/// Menu and list navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavInput {
    Up,
    Down,
    Left,
    Right,
    Select,
    Back,
    Tab,
    /// Printable character, for search fields
    Text(char),
    Erase,
}

/// Map keyboard input on the question screen.
pub fn play_input(key: KeyEvent) -> Option<PlayInput> {
    match key.code {
        // Options
        KeyCode::Char(c @ '1'..='4') => Some(PlayInput::Choose(c as usize - '1' as usize)),
        KeyCode::Char(c @ ('a'..='d' | 'A'..='D')) => {
            Some(PlayInput::Choose(c.to_ascii_lowercase() as usize - 'a' as usize))
        }

        // Powerups
        KeyCode::Char('h') | KeyCode::Char('H') => Some(PlayInput::Hint),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(PlayInput::Skip),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(PlayInput::Fifty),

        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') | KeyCode::Char('N') => {
            Some(PlayInput::Next)
        }
        KeyCode::Esc => Some(PlayInput::Abandon),

        _ => None,
    }
}

/// Map keyboard input on menus and lists.
pub fn nav_input(key: KeyEvent) -> Option<NavInput> {
    match key.code {
        KeyCode::Up => Some(NavInput::Up),
        KeyCode::Down => Some(NavInput::Down),
        KeyCode::Left => Some(NavInput::Left),
        KeyCode::Right => Some(NavInput::Right),
        KeyCode::Enter => Some(NavInput::Select),
        KeyCode::Esc => Some(NavInput::Back),
        KeyCode::Tab => Some(NavInput::Tab),
        KeyCode::Backspace => Some(NavInput::Erase),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(NavInput::Text(c))
        }
        _ => None,
    }
}

/// Resolve a play input against the shown options.
///
/// Returns `None` when `Choose` points past the option list.
pub fn to_command(input: PlayInput, options: &[CountryId; OPTION_COUNT]) -> Option<QuizCommand> {
    match input {
        PlayInput::Choose(i) => options.get(i).copied().map(QuizCommand::SubmitAnswer),
        PlayInput::Hint => Some(QuizCommand::UseHint),
        PlayInput::Skip => Some(QuizCommand::UseSkip),
        PlayInput::Fifty => Some(QuizCommand::UseFifty),
        PlayInput::Next => Some(QuizCommand::Next),
        PlayInput::Abandon => Some(QuizCommand::Abandon),
    }
}

/// Ctrl+C, honoured everywhere including text fields.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) || is_interrupt(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    const OPTIONS: [CountryId; OPTION_COUNT] =
        [CountryId(7), CountryId(3), CountryId(11), CountryId(0)];

    #[test]
    fn test_option_keys() {
        assert_eq!(
            play_input(KeyEvent::from(KeyCode::Char('1'))),
            Some(PlayInput::Choose(0))
        );
        assert_eq!(
            play_input(KeyEvent::from(KeyCode::Char('4'))),
            Some(PlayInput::Choose(3))
        );
        assert_eq!(
            play_input(KeyEvent::from(KeyCode::Char('b'))),
            Some(PlayInput::Choose(1))
        );
        assert_eq!(
            play_input(KeyEvent::from(KeyCode::Char('D'))),
            Some(PlayInput::Choose(3))
        );
        assert_eq!(play_input(KeyEvent::from(KeyCode::Char('5'))), None);
    }

    #[test]
    fn test_powerup_keys() {
        assert_eq!(
            play_input(KeyEvent::from(KeyCode::Char('h'))),
            Some(PlayInput::Hint)
        );
        assert_eq!(
            play_input(KeyEvent::from(KeyCode::Char('S'))),
            Some(PlayInput::Skip)
        );
        assert_eq!(
            play_input(KeyEvent::from(KeyCode::Char('f'))),
            Some(PlayInput::Fifty)
        );
    }

    #[test]
    fn test_flow_keys() {
        assert_eq!(
            play_input(KeyEvent::from(KeyCode::Enter)),
            Some(PlayInput::Next)
        );
        assert_eq!(
            play_input(KeyEvent::from(KeyCode::Esc)),
            Some(PlayInput::Abandon)
        );
    }

    #[test]
    fn test_to_command() {
        assert_eq!(
            to_command(PlayInput::Choose(2), &OPTIONS),
            Some(QuizCommand::SubmitAnswer(CountryId(11)))
        );
        assert_eq!(to_command(PlayInput::Choose(4), &OPTIONS), None);
        assert_eq!(
            to_command(PlayInput::Fifty, &OPTIONS),
            Some(QuizCommand::UseFifty)
        );
    }

    #[test]
    fn test_nav_keys() {
        assert_eq!(nav_input(KeyEvent::from(KeyCode::Up)), Some(NavInput::Up));
        assert_eq!(
            nav_input(KeyEvent::from(KeyCode::Enter)),
            Some(NavInput::Select)
        );
        assert_eq!(
            nav_input(KeyEvent::from(KeyCode::Char('x'))),
            Some(NavInput::Text('x'))
        );
        assert_eq!(
            nav_input(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert!(!is_interrupt(KeyEvent::from(KeyCode::Char('c'))));
    }
}
