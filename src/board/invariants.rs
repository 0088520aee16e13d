//! First-class invariants over board state.
//!
//! Invariants are logical properties that must hold for every board the
//! engine produces. They are testable independently and serve as
//! documentation of engine guarantees.

use crate::sgf::types::Color;

use super::state::BoardState;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks whether the invariant holds.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// The grid matches the declared board dimensions.
pub struct GridShape;

impl Invariant<BoardState> for GridShape {
    fn holds(state: &BoardState) -> bool {
        state.grid.len() == state.height() as usize
            && state
                .grid
                .iter()
                .all(|row| row.len() == state.width() as usize)
    }

    fn description() -> &'static str {
        "grid rows and columns match the declared board size"
    }
}

/// A cleared dirty flag guarantees the absence of the matching state, so
/// full-grid passes can be skipped.
pub struct FlagCoherence;

impl Invariant<BoardState> for FlagCoherence {
    fn holds(state: &BoardState) -> bool {
        let cells = || state.grid.iter().flatten();
        (state.has_marks() || cells().all(|c| c.mark.is_none()))
            && (state.has_dimmed() || cells().all(|c| !c.dimmed))
            && (state.has_invisible() || cells().all(|c| c.visible))
    }

    fn description() -> &'static str {
        "a cleared has-marks/has-dimmed/has-invisible flag means no cell holds that state"
    }
}

/// Conservation across one move: the stones a move removes from the grid
/// are exactly the stones it credits as captures.
///
/// Holds for the `(before, after)` board pair of a single `apply_move`
/// application, whichever policy was in force: one stone is placed, and
/// every other change to the stone count shows up in a capture counter.
pub struct CaptureConservation;

impl Invariant<(BoardState, BoardState)> for CaptureConservation {
    fn holds(state: &(BoardState, BoardState)) -> bool {
        let (before, after) = state;
        let stones = |b: &BoardState| -> i64 {
            b.grid.iter().flatten().filter(|c| c.stone.is_some()).count() as i64
        };
        let credited = |b: &BoardState| -> i64 {
            (b.captures(Color::Black) + b.captures(Color::White)) as i64
        };
        stones(before) + 1 - stones(after) == credited(after) - credited(before)
    }

    fn description() -> &'static str {
        "stones removed by a move equal the captures credited for it"
    }
}
