use std::time::{Duration, Instant};

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::{self, Board, DeathReason, TickResult};
use crate::grid::{GridSize, Position};
use crate::input::Direction;
use crate::snake::Snake;
use crate::timer::TickTimer;

/// Lifecycle state of one play session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    GameOver,
}

impl SessionState {
    /// Label for the start/reset control.
    #[must_use]
    pub fn action_label(self) -> &'static str {
        match self {
            Self::Idle | Self::GameOver => "Start",
            Self::Running | Self::Paused => "Reset",
        }
    }

    /// Label for the pause control.
    #[must_use]
    pub fn pause_label(self) -> &'static str {
        if self == Self::Paused { "Resume" } else { "Pause" }
    }

    /// Whether a live board exists that pause and steering apply to.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

/// Read-only view handed to the presenter.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state: SessionState,
    pub grid: GridSize,
    /// `None` until the first session starts.
    pub snake: Option<&'a Snake>,
    pub food: Option<Position>,
    pub score: u32,
    pub paused: bool,
    pub death_reason: Option<DeathReason>,
}

/// Side effects the session asks of whatever is displaying it.
pub trait Presenter {
    /// Paints one frame.
    fn render(&mut self, snapshot: &Snapshot<'_>);

    /// Called exactly once each time a session ends.
    fn on_game_over(&mut self, final_score: u32);

    /// Called whenever the score changes, including the reset to zero.
    fn on_score_change(&mut self, score: u32);

    /// Called when a fresh board replaces whatever was shown before.
    fn on_session_start(&mut self) {}
}

/// Owns the board and decides when it may change.
///
/// Out-of-turn commands are ignored rather than reported, since they arrive
/// straight from key presses and clicks.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    board: Option<Board>,
    next_bounds: GridSize,
    timer: TickTimer,
    rng: StdRng,
    death_reason: Option<DeathReason>,
}

impl Session {
    #[must_use]
    pub fn new(bounds: GridSize, tick_period: Duration, rng: StdRng) -> Self {
        Self {
            state: SessionState::Idle,
            board: None,
            next_bounds: bounds,
            timer: TickTimer::new(tick_period),
            rng,
            death_reason: None,
        }
    }

    /// Creates a session whose food placement is reproducible.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, tick_period: Duration, seed: u64) -> Self {
        Self::new(bounds, tick_period, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Mutable board access for scripted scenarios.
    pub fn board_mut(&mut self) -> Option<&mut Board> {
        self.board.as_mut()
    }

    /// Grid of the current board, or the one the next start will use.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.board
            .as_ref()
            .map_or(self.next_bounds, Board::bounds)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.board.as_ref().map_or(0, |board| board.score)
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    #[must_use]
    pub fn action_label(&self) -> &'static str {
        self.state.action_label()
    }

    #[must_use]
    pub fn pause_label(&self) -> &'static str {
        self.state.pause_label()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            grid: self.bounds(),
            snake: self.board.as_ref().map(|board| &board.snake),
            food: self.board.as_ref().map(|board| board.food),
            score: self.score(),
            paused: self.state == SessionState::Paused,
            death_reason: self.death_reason,
        }
    }

    /// Starts a fresh board from any state; doubles as Reset.
    pub fn start<P: Presenter + ?Sized>(&mut self, now: Instant, presenter: &mut P) {
        let bounds = self.next_bounds;
        self.board = Some(Board::new(&mut self.rng, bounds));
        self.state = SessionState::Running;
        self.death_reason = None;
        self.timer.start(now);

        info!(
            "session started on {}x{} grid",
            bounds.width(),
            bounds.height()
        );
        presenter.on_session_start();
        presenter.on_score_change(0);
    }

    pub fn pause<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        if self.state != SessionState::Running {
            debug!("pause ignored in {:?}", self.state);
            return;
        }

        self.state = SessionState::Paused;
        presenter.render(&self.snapshot());
    }

    pub fn resume(&mut self) {
        if self.state != SessionState::Paused {
            debug!("resume ignored in {:?}", self.state);
            return;
        }

        self.state = SessionState::Running;
    }

    /// Pauses when running, resumes when paused.
    pub fn toggle_pause<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        match self.state {
            SessionState::Running => self.pause(presenter),
            SessionState::Paused => self.resume(),
            other => debug!("pause toggle ignored in {other:?}"),
        }
    }

    /// Abandons any board and returns to the title state.
    pub fn stop(&mut self) {
        self.timer.stop();
        self.board = None;
        self.death_reason = None;
        self.state = SessionState::Idle;
    }

    /// Forwards a direction request while a board is live.
    ///
    /// Requests made while paused are kept for when play resumes.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !self.state.is_live() {
            return false;
        }

        self.board
            .as_mut()
            .is_some_and(|board| board.controls.request_direction(direction))
    }

    /// Records new viewport-derived dimensions.
    ///
    /// A live or finished board keeps its size; the new grid is used from
    /// the next start.
    pub fn resize(&mut self, bounds: GridSize) {
        if bounds == self.next_bounds {
            return;
        }

        self.next_bounds = bounds;
        if self.board.is_some() {
            debug!(
                "resize to {}x{} deferred until next start",
                bounds.width(),
                bounds.height()
            );
        }
    }

    /// Runs a tick if the timer is due.
    pub fn poll_tick<P: Presenter + ?Sized>(
        &mut self,
        now: Instant,
        presenter: &mut P,
    ) -> Option<TickResult> {
        if self.timer.poll(now) {
            Some(self.tick(presenter))
        } else {
            None
        }
    }

    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    /// Advances the simulation by one step.
    ///
    /// Paused and idle sessions return `Continue` without touching the
    /// board; a finished session keeps reporting its game over.
    pub fn tick<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> TickResult {
        match self.state {
            SessionState::Idle | SessionState::Paused => return TickResult::Continue,
            SessionState::GameOver => {
                return self
                    .death_reason
                    .map_or(TickResult::Continue, TickResult::GameOver);
            }
            SessionState::Running => {}
        }

        let Some(board) = self.board.as_mut() else {
            return TickResult::Continue;
        };

        let result = engine::tick(board, &mut self.rng);
        match result {
            TickResult::Continue => presenter.render(&self.snapshot()),
            TickResult::Ate => {
                presenter.on_score_change(board.score);
                presenter.render(&self.snapshot());
            }
            TickResult::GameOver(reason) => {
                let final_score = board.score;
                if reason == DeathReason::BoardFull {
                    presenter.on_score_change(final_score);
                }

                self.state = SessionState::GameOver;
                self.death_reason = Some(reason);
                self.timer.stop();

                info!("game over ({reason:?}) with score {final_score}");
                presenter.on_game_over(final_score);
            }
        }

        result
    }
}
