use crate::config::DEFAULT_SWIPE_THRESHOLD;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(dx, dy)` grid offset; y grows downwards.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events produced by every input source.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    TogglePause,
    /// Start a new session, or reset the current one.
    Start,
    /// Dismiss the game-over modal without starting a new session.
    CloseModal,
    /// Abandon the current board and return to the title screen.
    Stop,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Single-slot direction buffer between input sources and the engine.
///
/// Requests are validated against the direction used on the last completed
/// tick, never against the pending one, so two quick presses cannot queue a
/// reversal. Only the latest valid request survives until the next commit.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct InputController {
    committed: Direction,
    pending: Direction,
}

impl InputController {
    #[must_use]
    pub fn new(initial: Direction) -> Self {
        Self {
            committed: initial,
            pending: initial,
        }
    }

    /// Stores `direction` as pending unless it reverses the committed one.
    ///
    /// Returns whether the request was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.committed, direction) {
            return false;
        }
        self.pending = direction;
        true
    }

    /// Promotes the pending direction for the tick about to run.
    pub fn commit(&mut self) -> Direction {
        self.committed = self.pending;
        self.committed
    }

    #[must_use]
    pub fn committed(&self) -> Direction {
        self.committed
    }

    #[must_use]
    pub fn pending(&self) -> Direction {
        self.pending
    }
}

/// Resolves continuous pointer movement into discrete swipes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    origin: Option<(f64, f64)>,
    threshold: f64,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeTracker {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            origin: None,
            threshold,
        }
    }

    /// Starts a gesture at `(x, y)`.
    pub fn begin(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
    }

    /// Feeds a pointer move and returns a direction once the displacement
    /// along the dominant axis exceeds the threshold.
    ///
    /// A resolved swipe re-anchors the gesture at `(x, y)` so one long drag
    /// can steer several times.
    pub fn update(&mut self, x: f64, y: f64) -> Option<Direction> {
        let (start_x, start_y) = self.origin?;
        let dx = x - start_x;
        let dy = y - start_y;

        let direction = if dx.abs() > dy.abs() {
            if dx.abs() <= self.threshold {
                return None;
            }
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else {
            if dy.abs() <= self.threshold {
                return None;
            }
            if dy > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            }
        };

        self.origin = Some((x, y));
        Some(direction)
    }

    /// Ends the current gesture.
    pub fn end(&mut self) {
        self.origin = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }
}
