use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{TILE_COLUMNS, Theme};
use crate::grid::{GridSize, Position};
use crate::session::{SessionState, Snapshot};
use crate::ui::buttons::{ButtonHit, layout_buttons, render_buttons};
use crate::ui::hud::{HudInfo, render_hint, render_status};
use crate::ui::layout::FrameLayout;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

const GLYPH_TILE: &str = "██";
const GLYPH_EMPTY: &str = "· ";

/// Presentation-only state layered over a snapshot.
#[derive(Debug, Clone)]
pub struct ViewState<'a> {
    pub theme: &'a Theme,
    /// Horizontal play-area displacement for the game-over shake.
    pub shake_offset: i16,
    pub modal_open: bool,
    pub hud: HudInfo<'a>,
}

/// Renders the full frame and returns where the on-screen buttons landed.
pub fn render(
    frame: &mut Frame<'_>,
    snapshot: &Snapshot<'_>,
    view: &ViewState<'_>,
) -> Vec<ButtonHit> {
    let theme = view.theme;
    let area = frame.area();
    frame.render_widget(Block::new().style(Style::new().bg(theme.play_bg)), area);

    let layout = FrameLayout::new(area, snapshot.grid);
    let play_area = shifted(layout.play, view.shake_offset, area);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_field(frame, inner, snapshot, theme);

    match snapshot.state {
        SessionState::Idle => render_start_menu(frame, layout.field, theme),
        SessionState::Paused => render_pause_menu(frame, layout.field, theme),
        SessionState::GameOver if view.modal_open => render_game_over_menu(
            frame,
            layout.field,
            snapshot.score,
            snapshot.death_reason,
            theme,
        ),
        _ => {}
    }

    render_status(frame, layout.status, &view.hud);
    let hits = layout_buttons(layout.controls);
    render_buttons(frame, &hits, snapshot.state, theme);
    render_hint(frame, layout.hint, &view.hud);

    hits
}

fn render_field(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let buffer = frame.buffer_mut();

    for cell in snapshot.grid.cells() {
        if let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, cell) {
            buffer.set_string(x, y, GLYPH_EMPTY, Style::new().fg(theme.grid_dot));
        }
    }

    if let Some(food) = snapshot.food {
        if let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, food) {
            buffer.set_string(x, y, GLYPH_TILE, Style::new().fg(theme.food));
        }
    }

    let Some(snake) = snapshot.snake else {
        return;
    };

    let head = snake.head();
    // Tail first so the head is painted last.
    let segments: Vec<Position> = snake.segments().copied().collect();
    for segment in segments.into_iter().rev() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, segment) else {
            continue;
        };

        let style = if segment == head {
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.snake_body)
        };
        buffer.set_string(x, y, GLYPH_TILE, style);
    }
}

fn shifted(play: Rect, offset: i16, area: Rect) -> Rect {
    let max_x = i32::from(area.right().saturating_sub(play.width));
    let x = (i32::from(play.x) + i32::from(offset))
        .clamp(i32::from(area.x), max_x.max(i32::from(area.x)));

    Rect {
        x: u16::try_from(x).unwrap_or(play.x),
        ..play
    }
}

/// Maps a grid cell to the top-left terminal cell of its tile.
///
/// Tiles that do not fit entirely inside `inner` are skipped.
fn logical_to_terminal(
    inner: Rect,
    bounds: GridSize,
    position: Position,
) -> Option<(u16, u16)> {
    if !bounds.contains(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(TILE_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.checked_add(x_offset)?;
    let y = inner.y.checked_add(y_offset)?;
    if x + TILE_COLUMNS > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    use crate::config::THEME;
    use crate::grid::{GridSize, Position};
    use crate::session::{SessionState, Snapshot};
    use crate::snake::Snake;
    use crate::ui::buttons::Button;
    use crate::ui::hud::HudInfo;

    use super::{ViewState, logical_to_terminal, render, shifted};

    fn view(state: SessionState, modal_open: bool) -> ViewState<'static> {
        ViewState {
            theme: &THEME,
            shake_offset: 0,
            modal_open,
            hud: HudInfo {
                score: 3,
                score_flash: false,
                state,
                clock: "[TIME: 12:00:00]".to_owned(),
                mouse: true,
                theme: &THEME,
            },
        }
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn tiles_are_two_columns_wide() {
        let inner = Rect::new(1, 1, 20, 10);
        let grid = GridSize::new(10, 10).expect("valid grid");

        assert_eq!(
            logical_to_terminal(inner, grid, Position::new(0, 0)),
            Some((1, 1))
        );
        assert_eq!(
            logical_to_terminal(inner, grid, Position::new(3, 2)),
            Some((7, 3))
        );
        assert_eq!(logical_to_terminal(inner, grid, Position::new(10, 0)), None);
    }

    #[test]
    fn clipped_tiles_are_skipped() {
        let inner = Rect::new(0, 0, 5, 3);
        let grid = GridSize::new(10, 10).expect("valid grid");

        assert_eq!(
            logical_to_terminal(inner, grid, Position::new(1, 1)),
            Some((2, 1))
        );
        assert_eq!(logical_to_terminal(inner, grid, Position::new(2, 1)), None);
        assert_eq!(logical_to_terminal(inner, grid, Position::new(0, 3)), None);
    }

    #[test]
    fn shake_stays_inside_screen() {
        let area = Rect::new(0, 0, 40, 20);
        let play = Rect::new(0, 0, 30, 10);

        assert_eq!(shifted(play, -1, area).x, 0);
        assert_eq!(shifted(play, 2, area).x, 2);
        assert_eq!(shifted(play, 20, area).x, 10);
    }

    #[test]
    fn running_frame_draws_snake_food_and_buttons() {
        let grid = GridSize::new(10, 10).expect("valid grid");
        let snake = Snake::from_segments(vec![Position::new(5, 5), Position::new(4, 5)]);
        let snapshot = Snapshot {
            state: SessionState::Running,
            grid,
            snake: Some(&snake),
            food: Some(Position::new(1, 1)),
            score: 3,
            paused: false,
            death_reason: None,
        };
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).expect("test terminal");

        let mut hits = Vec::new();
        terminal
            .draw(|frame| hits = render(frame, &snapshot, &view(SessionState::Running, false)))
            .expect("draw succeeds");

        // The bordered field is 22x12 at (9, 2), so tiles start at (10, 3).
        let buffer = terminal.backend().buffer();
        let (head_x, head_y): (u16, u16) = (10 + 5 * 2, 3 + 5);
        let (food_x, food_y): (u16, u16) = (10 + 2, 3 + 1);
        assert_eq!(buffer[(head_x, head_y)].symbol(), "█");
        assert_eq!(buffer[(food_x, food_y)].symbol(), "█");
        assert!(buffer_text(buffer).contains("Score: 3"));
        assert!(buffer_text(buffer).contains("Reset"));
        assert_eq!(hits.first().map(|hit| hit.button), Some(Button::Action));
    }

    #[test]
    fn game_over_modal_shows_final_score() {
        let grid = GridSize::new(10, 10).expect("valid grid");
        let snake = Snake::new(Position::new(0, 0));
        let snapshot = Snapshot {
            state: SessionState::GameOver,
            grid,
            snake: Some(&snake),
            food: Some(Position::new(1, 1)),
            score: 3,
            paused: false,
            death_reason: None,
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).expect("test terminal");

        terminal
            .draw(|frame| {
                let _ = render(frame, &snapshot, &view(SessionState::GameOver, true));
            })
            .expect("draw succeeds");
        assert!(buffer_text(terminal.backend().buffer()).contains("Final score: 3"));

        terminal
            .draw(|frame| {
                let _ = render(frame, &snapshot, &view(SessionState::GameOver, false));
            })
            .expect("draw succeeds");
        assert!(!buffer_text(terminal.backend().buffer()).contains("Final score"));
    }
}
