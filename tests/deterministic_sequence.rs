use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use snake_arcade::engine::{Board, DeathReason, TickResult, tick};
use snake_arcade::grid::{GridSize, Position};
use snake_arcade::input::Direction;
use snake_arcade::snake::Snake;

fn grid(width: u16, height: u16) -> GridSize {
    GridSize::new(width, height).expect("valid grid")
}

fn assert_snake_is_valid(board: &Board) {
    let unique: HashSet<_> = board.snake.segments().collect();
    assert!(!board.snake.is_empty());
    assert_eq!(unique.len(), board.snake.len(), "snake has duplicate cells");
}

#[test]
fn three_ticks_right_from_center() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut board = Board::from_parts(
        grid(20, 20),
        Snake::new(Position::new(10, 10)),
        Position::new(0, 0),
        Direction::Right,
    );

    for _ in 0..3 {
        assert_eq!(tick(&mut board, &mut rng), TickResult::Continue);
    }

    assert_eq!(board.snake.head(), Position::new(13, 10));
    assert_eq!(board.snake.len(), 1);
}

#[test]
fn leaving_left_edge_is_game_over() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut board = Board::from_parts(
        grid(20, 20),
        Snake::new(Position::new(0, 10)),
        Position::new(5, 5),
        Direction::Left,
    );

    assert_eq!(
        tick(&mut board, &mut rng),
        TickResult::GameOver(DeathReason::WallCollision)
    );
}

#[test]
fn reversal_is_rejected_before_next_tick() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut board = Board::from_parts(
        grid(20, 20),
        Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(5, 7),
        ]),
        Position::new(0, 0),
        Direction::Up,
    );

    assert!(!board.controls.request_direction(Direction::Down));
    tick(&mut board, &mut rng);

    assert_eq!(board.snake.head(), Position::new(5, 4));
}

#[test]
fn eating_grows_scores_and_moves_food() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut board = Board::from_parts(
        grid(20, 20),
        Snake::new(Position::new(10, 10)),
        Position::new(11, 10),
        Direction::Right,
    );

    assert_eq!(tick(&mut board, &mut rng), TickResult::Ate);

    assert_eq!(board.score, 1);
    assert_eq!(board.snake.len(), 2);
    assert!(!board.snake.occupies(board.food));
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut board = Board::from_parts(
        grid(6, 4),
        Snake::new(Position::new(1, 1)),
        Position::new(2, 1),
        Direction::Right,
    );

    assert_eq!(tick(&mut board, &mut rng), TickResult::Ate);
    assert_eq!(board.snake.head(), Position::new(2, 1));

    board.controls.request_direction(Direction::Up);
    assert_ne!(
        tick(&mut board, &mut rng),
        TickResult::GameOver(DeathReason::WallCollision)
    );
    assert_eq!(board.snake.head(), Position::new(2, 0));

    assert_eq!(
        tick(&mut board, &mut rng),
        TickResult::GameOver(DeathReason::WallCollision)
    );
    assert_eq!(board.snake.head(), Position::new(2, 0));
}

#[test]
fn long_random_walk_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut steer = StdRng::seed_from_u64(99);
    let directions = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    for _ in 0..20 {
        let mut board = Board::new(&mut rng, grid(8, 8));

        for _ in 0..500 {
            let choice = rand::Rng::gen_range(&mut steer, 0..directions.len());
            board.controls.request_direction(directions[choice]);

            let length = board.snake.len();
            let score = board.score;
            let result = tick(&mut board, &mut rng);
            assert_snake_is_valid(&board);

            match result {
                TickResult::Continue => {
                    assert_eq!(board.snake.len(), length);
                    assert_eq!(board.score, score);
                }
                TickResult::Ate => {
                    assert_eq!(board.snake.len(), length + 1);
                    assert_eq!(board.score, score + 1);
                    assert!(!board.snake.occupies(board.food));
                }
                TickResult::GameOver(_) => break,
            }
        }
    }
}
