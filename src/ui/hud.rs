use std::time::{Duration, Instant};

use chrono::Timelike;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::session::SessionState;

const SCORE_FLASH_DURATION: Duration = Duration::from_secs(1);
const HINT_TEXT: &str = "Arrows/WASD/drag move  Space pause  Enter start  X title  Q quit";
const HINT_TEXT_NO_MOUSE: &str = "Arrows/WASD move  Space pause  Enter start  X title  Q quit";

/// Last-change timestamp for the score readout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreFlash {
    changed_at: Option<Instant>,
}

impl ScoreFlash {
    pub fn mark(&mut self, now: Instant) {
        self.changed_at = Some(now);
    }

    /// True while the score should still be highlighted.
    #[must_use]
    pub fn is_active(&self, now: Instant) -> bool {
        self.changed_at
            .is_some_and(|at| now.saturating_duration_since(at) < SCORE_FLASH_DURATION)
    }
}

/// Values displayed by the HUD rows.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    pub score: u32,
    pub score_flash: bool,
    pub state: SessionState,
    pub clock: String,
    pub mouse: bool,
    pub theme: &'a Theme,
}

/// Formats a wall-clock time the way the status row shows it.
#[must_use]
pub fn format_clock<T: Timelike>(time: &T) -> String {
    format!(
        "[TIME: {:02}:{:02}:{:02}]",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// Draws the score, state, and clock row.
pub fn render_status(frame: &mut Frame<'_>, area: Rect, info: &HudInfo<'_>) {
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(16)]).areas(area);

    let score_style = if info.score_flash {
        Style::new()
            .fg(info.theme.hud_accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::new().fg(info.theme.hud_text)
    };

    let line = Line::from(vec![
        Span::styled(" Score: ", Style::new().fg(info.theme.hud_muted)),
        Span::styled(info.score.to_string(), score_style),
        Span::styled(
            format!("  {}", state_text(info.state)),
            Style::new().fg(info.theme.hud_muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), left);

    frame.render_widget(
        Paragraph::new(info.clock.as_str())
            .alignment(Alignment::Right)
            .style(Style::new().fg(info.theme.hud_muted)),
        right,
    );
}

/// Draws the key reference row.
pub fn render_hint(frame: &mut Frame<'_>, area: Rect, info: &HudInfo<'_>) {
    let text = if info.mouse {
        HINT_TEXT
    } else {
        HINT_TEXT_NO_MOUSE
    };

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::new().fg(info.theme.hud_muted)),
        area,
    );
}

fn state_text(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "READY",
        SessionState::Running => "PLAYING",
        SessionState::Paused => "PAUSED",
        SessionState::GameOver => "GAME OVER",
    }
}
