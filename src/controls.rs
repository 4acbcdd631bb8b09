use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::config::{SWIPE_UNITS_PER_COLUMN, SWIPE_UNITS_PER_ROW};
use crate::input::{Direction, GameInput, SwipeTracker};
use crate::ui::buttons::{ButtonHit, hit_test};

/// Events the main loop reacts to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HostEvent {
    Input(GameInput),
    Resize { columns: u16, rows: u16 },
}

/// Runtime input options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputConfig {
    pub mouse: bool,
    pub swipe_threshold: f64,
}

/// Translates crossterm events from keyboard, buttons, and mouse drags.
#[derive(Debug)]
pub struct InputHandler {
    mouse: bool,
    swipe: SwipeTracker,
}

impl InputHandler {
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        Self {
            mouse: config.mouse,
            swipe: SwipeTracker::new(config.swipe_threshold),
        }
    }

    /// Waits up to `timeout` for one event and translates it.
    pub fn poll_input(
        &mut self,
        timeout: Duration,
        buttons: &[ButtonHit],
    ) -> io::Result<Option<HostEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(self.translate(event::read()?, buttons))
    }

    /// Maps one raw terminal event.
    pub fn translate(&mut self, event: Event, buttons: &[ButtonHit]) -> Option<HostEvent> {
        match event {
            Event::Key(key) => key_to_input(key).map(HostEvent::Input),
            Event::Mouse(mouse) if self.mouse => {
                self.translate_mouse(mouse, buttons).map(HostEvent::Input)
            }
            Event::Resize(columns, rows) => Some(HostEvent::Resize { columns, rows }),
            _ => None,
        }
    }

    fn translate_mouse(
        &mut self,
        mouse: MouseEvent,
        buttons: &[ButtonHit],
    ) -> Option<GameInput> {
        let (x, y) = swipe_units(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(button) = hit_test(buttons, mouse.column, mouse.row) {
                    self.swipe.end();
                    return Some(button.input());
                }
                self.swipe.begin(x, y);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.swipe.update(x, y).map(GameInput::Direction)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.swipe.end();
                None
            }
            _ => None,
        }
    }
}

/// Maps a key press to a game input; releases and repeats of unbound keys
/// are dropped.
#[must_use]
pub fn key_to_input(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ' | 'p' | 'P') => GameInput::TogglePause,
        KeyCode::Enter | KeyCode::Char('r' | 'R') => GameInput::Start,
        KeyCode::Esc => GameInput::CloseModal,
        KeyCode::Char('x' | 'X') => GameInput::Stop,
        KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

fn swipe_units(column: u16, row: u16) -> (f64, f64) {
    (
        f64::from(column) * SWIPE_UNITS_PER_COLUMN,
        f64::from(row) * SWIPE_UNITS_PER_ROW,
    )
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    };
    use ratatui::layout::Rect;

    use crate::config::DEFAULT_SWIPE_THRESHOLD;
    use crate::input::{Direction, GameInput};
    use crate::ui::buttons::layout_buttons;

    use super::{HostEvent, InputConfig, InputHandler, key_to_input};

    fn handler(mouse: bool) -> InputHandler {
        InputHandler::new(InputConfig {
            mouse,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn arrow_keys_and_wasd_map_to_directions() {
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);

        assert_eq!(
            key_to_input(up),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            key_to_input(a),
            Some(GameInput::Direction(Direction::Left))
        );
    }

    #[test]
    fn command_keys_map_to_commands() {
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(key_to_input(space), Some(GameInput::TogglePause));
        assert_eq!(key_to_input(enter), Some(GameInput::Start));
        assert_eq!(key_to_input(esc), Some(GameInput::CloseModal));
        assert_eq!(key_to_input(x), Some(GameInput::Stop));
        assert_eq!(key_to_input(ctrl_c), Some(GameInput::Quit));
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(key_to_input(release), None);
    }

    #[test]
    fn button_click_produces_its_input() {
        let buttons = layout_buttons(Rect::new(0, 10, 80, 1));
        let mut handler = handler(true);

        let click = mouse(MouseEventKind::Down(MouseButton::Left), 18, 10);

        assert_eq!(
            handler.translate(click, &buttons),
            Some(HostEvent::Input(GameInput::Start))
        );
    }

    #[test]
    fn drag_resolves_to_swipe() {
        let mut handler = handler(true);

        handler.translate(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), &[]);
        // One column is 10 units: not past the 20 unit threshold yet.
        assert_eq!(
            handler.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 5), &[]),
            None
        );
        assert_eq!(
            handler.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 13, 5), &[]),
            Some(HostEvent::Input(GameInput::Direction(Direction::Right)))
        );
    }

    #[test]
    fn drag_after_release_is_ignored() {
        let mut handler = handler(true);

        handler.translate(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), &[]);
        handler.translate(mouse(MouseEventKind::Up(MouseButton::Left), 10, 5), &[]);

        assert_eq!(
            handler.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 9), &[]),
            None
        );
    }

    #[test]
    fn mouse_is_ignored_when_disabled() {
        let buttons = layout_buttons(Rect::new(0, 10, 80, 1));
        let mut handler = handler(false);

        let click = mouse(MouseEventKind::Down(MouseButton::Left), 18, 10);

        assert_eq!(handler.translate(click, &buttons), None);
    }

    #[test]
    fn resize_is_forwarded() {
        let mut handler = handler(true);

        assert_eq!(
            handler.translate(Event::Resize(100, 40), &[]),
            Some(HostEvent::Resize {
                columns: 100,
                rows: 40
            })
        );
    }
}
