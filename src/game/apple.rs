use super::{
    board::{Board, Segment},
    state::Snake,
};
use rand::{Rng, seq::IteratorRandom};

/// Rejection samples drawn before falling back to scanning for free cells
pub const MAX_REJECTION_SAMPLES: usize = 64;

/// A uniformly random cell on the board
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R, board: &Board) -> Segment {
    let column = rng.gen_range(0..board.columns());
    let row = rng.gen_range(0..board.rows());
    board.cell(column, row)
}

/// Pick a random cell not covered by the snake
///
/// Whole coordinate pairs are resampled while they land on the snake. When
/// the snake covers most of the board that gets slow, so after
/// [`MAX_REJECTION_SAMPLES`] misses the pick is made from the remaining free
/// cells directly. Both paths are uniform over free cells. Returns `None`
/// only when the snake covers every cell.
pub fn place_apple<R: Rng + ?Sized>(rng: &mut R, board: &Board, snake: &Snake) -> Option<Segment> {
    for _ in 0..MAX_REJECTION_SAMPLES {
        let pos = random_cell(rng, board);
        if !snake.occupies(pos) {
            return Some(pos);
        }
    }

    board.cells().filter(|&pos| !snake.occupies(pos)).choose(rng)
}
