//! Move legality: placement, capture, and the suicide rule.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::sgf::types::{Color, Coord};

use super::state::BoardState;

/// Policy knobs for a move attempt.
///
/// Interactive play uses [`MoveParams::STANDARD`]. Replaying recorded
/// games uses [`MoveParams::PERMISSIVE`], which plays whatever the file
/// says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveParams {
    /// Permit a move that leaves its own group without liberties; the
    /// group is then removed and credited to the opponent.
    pub allow_suicide: bool,
    /// Permit a move onto an occupied point, replacing the stone.
    pub allow_overwrite: bool,
}

impl MoveParams {
    /// Suicide and overwrite both forbidden.
    pub const STANDARD: MoveParams = MoveParams {
        allow_suicide: false,
        allow_overwrite: false,
    };

    /// Suicide and overwrite both permitted.
    pub const PERMISSIVE: MoveParams = MoveParams {
        allow_suicide: true,
        allow_overwrite: true,
    };
}

impl Default for MoveParams {
    fn default() -> Self {
        MoveParams::STANDARD
    }
}

/// Why a move attempt was rejected. The board is never changed on
/// rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The target point already holds a stone of the given color.
    #[display("the point is occupied by a {:?} stone", _0)]
    Overwrite(#[error(not(source))] Color),
    /// The move would leave its own group without liberties.
    #[display("the move would be suicide")]
    Suicide,
    /// The target point is outside the board.
    #[display("the point is outside the board")]
    OutOfBounds,
}

/// Attempts a move, returning the resulting board.
///
/// The stone is placed, adjacent opposing groups without liberties are
/// removed and credited to the mover, and the mover's own group is then
/// checked against the suicide policy.
#[instrument(skip(board))]
pub fn apply_move(
    board: &BoardState,
    color: Color,
    at: Coord,
    params: MoveParams,
) -> Result<BoardState, MoveError> {
    if !board.in_bounds(at) {
        return Err(MoveError::OutOfBounds);
    }
    if let Some(existing) = board.stone_at(at) {
        if !params.allow_overwrite {
            return Err(MoveError::Overwrite(existing));
        }
    }

    let mut next = board.clone();
    if let Some(cell) = next.at_mut(at) {
        cell.stone = Some(color);
    }

    let mut captured = 0u32;
    for n in at.neighbors(next.width(), next.height()) {
        if next.stone_at(n) != Some(color.other()) {
            continue;
        }
        let group = group_of(&next, n);
        if liberties_of(&next, &group) == 0 {
            captured += group.len() as u32;
            for c in group {
                if let Some(cell) = next.at_mut(c) {
                    cell.stone = None;
                }
            }
        }
    }

    let own = group_of(&next, at);
    if liberties_of(&next, &own) == 0 {
        // A capture frees at least one liberty of the played stone, so
        // captures and self-capture cannot coincide.
        debug_assert!(captured == 0);
        if !params.allow_suicide {
            return Err(MoveError::Suicide);
        }
        let lost = own.len() as u32;
        for c in own {
            if let Some(cell) = next.at_mut(c) {
                cell.stone = None;
            }
        }
        next.add_captures(color.other(), lost);
    }

    if captured > 0 {
        next.add_captures(color, captured);
    }
    Ok(next)
}

/// Whether a move is legal under standard parameters.
pub fn is_valid_move(board: &BoardState, color: Color, at: Coord) -> bool {
    apply_move(board, color, at, MoveParams::STANDARD).is_ok()
}

/// The connected group holding the seed, expanding over points with the
/// same stone value (an empty seed yields a region of empty points).
pub(crate) fn group_of(board: &BoardState, seed: Coord) -> Vec<Coord> {
    let target = board.stone_at(seed);
    let (w, h) = (board.width(), board.height());
    let mut visited = vec![false; w as usize * h as usize];
    let mut stack = vec![seed];
    let mut group = Vec::new();
    while let Some(c) = stack.pop() {
        let idx = c.y() as usize * w as usize + c.x() as usize;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        group.push(c);
        for n in c.neighbors(w, h) {
            if board.stone_at(n) == target {
                stack.push(n);
            }
        }
    }
    group
}

/// Distinct empty points adjacent to any stone of the group.
pub(crate) fn liberties_of(board: &BoardState, group: &[Coord]) -> usize {
    let mut liberties = std::collections::HashSet::new();
    for &c in group {
        for n in c.neighbors(board.width(), board.height()) {
            if board.stone_at(n).is_none() {
                liberties.insert(n);
            }
        }
    }
    liberties.len()
}
