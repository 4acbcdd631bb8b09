use rand::Rng;

use crate::grid::{GridSize, Position, is_occupied_by_snake};
use crate::snake::Snake;

/// Picks a free cell uniformly at random.
///
/// Free cells are enumerated up front so placement always terminates.
/// Returns `None` when the snake covers the whole grid.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    let candidates: Vec<Position> = bounds
        .cells()
        .filter(|cell| !is_occupied_by_snake(*cell, snake))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
