use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::input::{Direction, GameInput};
use crate::session::SessionState;

const WIDE_BUTTON_WIDTH: u16 = 10;
const ARROW_BUTTON_WIDTH: u16 = 5;
const BUTTON_GAP: u16 = 1;

/// Clickable on-screen controls, left to right.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Button {
    Action,
    Pause,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    pub const ALL: [Self; 6] = [
        Self::Action,
        Self::Pause,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
    ];

    fn width(self) -> u16 {
        match self {
            Self::Action | Self::Pause => WIDE_BUTTON_WIDTH,
            Self::Up | Self::Down | Self::Left | Self::Right => ARROW_BUTTON_WIDTH,
        }
    }

    /// Input event produced by clicking the button.
    #[must_use]
    pub fn input(self) -> GameInput {
        match self {
            Self::Action => GameInput::Start,
            Self::Pause => GameInput::TogglePause,
            Self::Up => GameInput::Direction(Direction::Up),
            Self::Down => GameInput::Direction(Direction::Down),
            Self::Left => GameInput::Direction(Direction::Left),
            Self::Right => GameInput::Direction(Direction::Right),
        }
    }

    fn caption(self, state: SessionState) -> &'static str {
        match self {
            Self::Action => state.action_label(),
            Self::Pause => state.pause_label(),
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Left => "◀",
            Self::Right => "▶",
        }
    }

    fn is_enabled(self, state: SessionState) -> bool {
        match self {
            Self::Action => true,
            Self::Pause | Self::Up | Self::Down | Self::Left | Self::Right => state.is_live(),
        }
    }
}

/// Screen rectangle occupied by one button.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ButtonHit {
    pub button: Button,
    pub area: Rect,
}

/// Lays the buttons out centered in `row`; buttons that do not fit are dropped.
#[must_use]
pub fn layout_buttons(row: Rect) -> Vec<ButtonHit> {
    let total_width: u16 = Button::ALL.iter().map(|button| button.width()).sum::<u16>()
        + BUTTON_GAP * (Button::ALL.len() as u16 - 1);

    let mut x = row.x + row.width.saturating_sub(total_width) / 2;
    let mut hits = Vec::with_capacity(Button::ALL.len());
    for button in Button::ALL {
        let width = button.width();
        if x + width > row.right() {
            break;
        }

        hits.push(ButtonHit {
            button,
            area: Rect::new(x, row.y, width, row.height.min(1)),
        });
        x += width + BUTTON_GAP;
    }

    hits
}

/// Returns the button under the terminal cell `(column, row)`.
#[must_use]
pub fn hit_test(hits: &[ButtonHit], column: u16, row: u16) -> Option<Button> {
    hits.iter()
        .find(|hit| {
            column >= hit.area.x
                && column < hit.area.right()
                && row >= hit.area.y
                && row < hit.area.bottom()
        })
        .map(|hit| hit.button)
}

/// Draws every laid-out button with a caption derived from `state`.
pub fn render_buttons(
    frame: &mut Frame<'_>,
    hits: &[ButtonHit],
    state: SessionState,
    theme: &Theme,
) {
    for hit in hits {
        let style = if hit.button.is_enabled(state) {
            Style::new()
                .fg(theme.button_fg)
                .bg(theme.button_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.button_disabled).bg(theme.play_bg)
        };

        frame.render_widget(
            Paragraph::new(hit.button.caption(state))
                .alignment(Alignment::Center)
                .style(style),
            hit.area,
        );
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::input::{Direction, GameInput};
    use crate::session::SessionState;

    use super::{Button, hit_test, layout_buttons};

    #[test]
    fn buttons_are_centered_and_ordered() {
        let hits = layout_buttons(Rect::new(0, 5, 80, 1));

        // 2 * 10 + 4 * 5 + 5 gaps = 45 columns, leaving 35 to split.
        assert_eq!(hits.len(), 6);
        assert_eq!(hits[0].area, Rect::new(17, 5, 10, 1));
        assert_eq!(hits[1].area.x, 28);
        assert_eq!(hits[5].button, Button::Right);
        assert_eq!(hits[5].area.right(), 62);
    }

    #[test]
    fn narrow_row_drops_trailing_buttons() {
        let hits = layout_buttons(Rect::new(0, 0, 24, 1));

        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn hit_test_maps_cells_to_buttons() {
        let hits = layout_buttons(Rect::new(0, 5, 80, 1));

        assert_eq!(hit_test(&hits, 17, 5), Some(Button::Action));
        assert_eq!(hit_test(&hits, 27, 5), None);
        assert_eq!(hit_test(&hits, 30, 5), Some(Button::Pause));
        assert_eq!(hit_test(&hits, 30, 4), None);
    }

    #[test]
    fn buttons_map_to_inputs() {
        assert_eq!(Button::Action.input(), GameInput::Start);
        assert_eq!(Button::Pause.input(), GameInput::TogglePause);
        assert_eq!(
            Button::Left.input(),
            GameInput::Direction(Direction::Left)
        );
    }

    #[test]
    fn captions_follow_session_state() {
        assert_eq!(Button::Action.caption(SessionState::Idle), "Start");
        assert_eq!(Button::Action.caption(SessionState::Running), "Reset");
        assert_eq!(Button::Pause.caption(SessionState::Paused), "Resume");
        assert!(!Button::Pause.is_enabled(SessionState::GameOver));
    }
}
