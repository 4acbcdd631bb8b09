use std::io::{self, Write};
use std::time::Instant;

use log::{info, warn};

use crate::config::{SHAKE_FRAMES, THEME};
use crate::renderer::{self, ViewState};
use crate::session::{Presenter, SessionState, Snapshot};
use crate::terminal_runtime::TerminalSession;
use crate::ui::buttons::ButtonHit;
use crate::ui::hud::{HudInfo, ScoreFlash, format_clock};

/// Game-over effects that outlive the tick that triggered them.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Effects {
    shake_frames_left: u8,
    modal_open: bool,
}

impl Effects {
    pub fn trigger_game_over(&mut self) {
        self.shake_frames_left = SHAKE_FRAMES;
        self.modal_open = true;
    }

    /// Consumes one animation frame and returns the play-area offset for it.
    pub fn next_shake_offset(&mut self) -> i16 {
        if self.shake_frames_left == 0 {
            return 0;
        }

        self.shake_frames_left -= 1;
        if self.shake_frames_left % 2 == 0 { 1 } else { -1 }
    }

    #[must_use]
    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    /// Drops any leftover game-over shake and modal.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Presenter that paints into the alternate screen.
///
/// Drawing happens inside [`Presenter`] callbacks, which cannot return
/// errors; the first failure is kept for the main loop to collect.
pub struct TerminalPresenter {
    terminal: TerminalSession,
    effects: Effects,
    score_flash: ScoreFlash,
    sound: bool,
    mouse: bool,
    buttons: Vec<ButtonHit>,
    draw_error: Option<io::Error>,
}

impl TerminalPresenter {
    #[must_use]
    pub fn new(terminal: TerminalSession, sound: bool, mouse: bool) -> Self {
        Self {
            terminal,
            effects: Effects::default(),
            score_flash: ScoreFlash::default(),
            sound,
            mouse,
            buttons: Vec::new(),
            draw_error: None,
        }
    }

    /// Repaints outside of session callbacks (clock, animation, resize).
    pub fn redraw(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.draw(snapshot);
        match self.draw_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Returns the first draw failure recorded since the last call.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.draw_error.take()
    }

    /// Buttons as laid out by the most recent frame.
    #[must_use]
    pub fn buttons(&self) -> &[ButtonHit] {
        &self.buttons
    }

    /// Hides the game-over modal; returns whether it was open.
    pub fn close_modal(&mut self, state: SessionState) -> bool {
        if state != SessionState::GameOver || !self.effects.modal_open() {
            return false;
        }
        self.effects.close_modal();
        true
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    fn draw(&mut self, snapshot: &Snapshot<'_>) {
        let now = Instant::now();
        let clock = format_clock(&chrono::Local::now());
        let view = ViewState {
            theme: &THEME,
            shake_offset: self.effects.next_shake_offset(),
            modal_open: self.effects.modal_open(),
            hud: HudInfo {
                score: snapshot.score,
                score_flash: self.score_flash.is_active(now),
                state: snapshot.state,
                clock,
                mouse: self.mouse,
                theme: &THEME,
            },
        };

        let mut hits = Vec::new();
        let result = self
            .terminal
            .terminal_mut()
            .draw(|frame| hits = renderer::render(frame, snapshot, &view));

        match result {
            Ok(_) => self.buttons = hits,
            Err(error) => {
                warn!("frame draw failed: {error}");
                if self.draw_error.is_none() {
                    self.draw_error = Some(error);
                }
            }
        }
    }

    fn play_game_over_cue(&self) {
        if !self.sound {
            return;
        }

        let mut stdout = io::stdout();
        if let Err(error) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            warn!("game over cue failed: {error}");
        }
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        self.draw(snapshot);
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.effects.trigger_game_over();
        self.play_game_over_cue();
        info!("final score {final_score}");
    }

    fn on_score_change(&mut self, score: u32) {
        if score > 0 {
            self.score_flash.mark(Instant::now());
        }
    }

    fn on_session_start(&mut self) {
        self.effects.reset();
        self.score_flash = ScoreFlash::default();
    }
}
