//! Event handling.
//!
//! Terminal events are reduced to the small set of inputs screens dispatch on.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Non-character keys routed through `key_down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum LauncherKey {
    Tab,
    /// Shift+Tab.
    BackTab,
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Input after translation from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Special key.
    KeyDown(LauncherKey),
    /// Printable character.
    KeyPress(char),
    /// Left button pressed.
    MouseDown {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },
    /// Left button released.
    MouseUp {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },
    /// Pointer moved, with or without a button held.
    MouseMove {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },
    /// Wheel scrolled; positive is up.
    MouseWheel(i32),
    /// Terminal resized.
    Resize {
        /// Columns.
        width: i32,
        /// Rows.
        height: i32,
    },
    /// Quit requested.
    Quit,
}

/// Checks if key is a quit event.
#[must_use]
pub fn is_quit_event(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('c' | 'q'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

/// Translates a terminal event. Returns `None` for events screens never see.
#[must_use]
pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize {
            width: i32::from(*width),
            height: i32::from(*height),
        }),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_quit_event(key) {
        return Some(InputEvent::Quit);
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let special = match key.code {
        KeyCode::Tab if shift => LauncherKey::BackTab,
        KeyCode::Tab => LauncherKey::Tab,
        KeyCode::BackTab => LauncherKey::BackTab,
        KeyCode::Enter => LauncherKey::Enter,
        KeyCode::Esc => LauncherKey::Escape,
        KeyCode::Backspace => LauncherKey::Backspace,
        KeyCode::Delete => LauncherKey::Delete,
        KeyCode::Left => LauncherKey::Left,
        KeyCode::Right => LauncherKey::Right,
        KeyCode::Up => LauncherKey::Up,
        KeyCode::Down => LauncherKey::Down,
        KeyCode::Home => LauncherKey::Home,
        KeyCode::End => LauncherKey::End,
        KeyCode::PageUp => LauncherKey::PageUp,
        KeyCode::PageDown => LauncherKey::PageDown,
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            return Some(InputEvent::KeyPress(c));
        }
        _ => return None,
    };
    Some(InputEvent::KeyDown(special))
}

fn translate_mouse(mouse: &MouseEvent) -> Option<InputEvent> {
    let x = i32::from(mouse.column);
    let y = i32::from(mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::MouseDown { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::MouseUp { x, y }),
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
            Some(InputEvent::MouseMove { x, y })
        }
        MouseEventKind::ScrollUp => Some(InputEvent::MouseWheel(1)),
        MouseEventKind::ScrollDown => Some(InputEvent::MouseWheel(-1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            modifiers,
            KeyEventKind::Press,
        ))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test_case(KeyCode::Tab, KeyModifiers::NONE, LauncherKey::Tab ; "tab")]
    #[test_case(KeyCode::Tab, KeyModifiers::SHIFT, LauncherKey::BackTab ; "shift tab")]
    #[test_case(KeyCode::BackTab, KeyModifiers::SHIFT, LauncherKey::BackTab ; "backtab")]
    #[test_case(KeyCode::Enter, KeyModifiers::NONE, LauncherKey::Enter ; "enter")]
    #[test_case(KeyCode::Left, KeyModifiers::NONE, LauncherKey::Left ; "left")]
    fn test_special_keys(code: KeyCode, modifiers: KeyModifiers, expected: LauncherKey) {
        assert_eq!(
            translate(&make_key_event(code, modifiers)),
            Some(InputEvent::KeyDown(expected))
        );
    }

    #[test]
    fn test_characters_become_key_press() {
        assert_eq!(
            translate(&make_key_event(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(InputEvent::KeyPress('A'))
        );
        assert_eq!(
            translate(&make_key_event(KeyCode::Char('x'), KeyModifiers::ALT)),
            None
        );
    }

    #[test]
    fn test_quit_events() {
        assert_eq!(
            translate(&make_key_event(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
        assert_eq!(
            translate(&make_key_event(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
        assert_eq!(
            translate(&make_key_event(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(InputEvent::KeyPress('q'))
        );
    }

    #[test]
    fn test_release_ignored() {
        let event = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(translate(&event), None);
    }

    #[test]
    fn test_mouse_translation() {
        assert_eq!(
            translate(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(InputEvent::MouseDown { x: 4, y: 7 })
        );
        assert_eq!(
            translate(&mouse(MouseEventKind::Drag(MouseButton::Left))),
            Some(InputEvent::MouseMove { x: 4, y: 7 })
        );
        assert_eq!(
            translate(&mouse(MouseEventKind::ScrollDown)),
            Some(InputEvent::MouseWheel(-1))
        );
        assert_eq!(
            translate(&mouse(MouseEventKind::Down(MouseButton::Right))),
            None
        );
    }
}
