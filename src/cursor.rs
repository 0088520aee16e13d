//! A zipper over the game tree that carries the board at its position.
//!
//! Navigation moves the current node in and out of breadcrumb frames, so
//! a subtree edited anywhere is reconciled into its ancestors as the
//! cursor walks back up. Each frame keeps the ancestor's board, making
//! upward navigation free and downward navigation one property fold.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::board::moves::{apply_move, MoveError, MoveParams};
use crate::board::state::BoardState;
use crate::sgf::property::Property;
use crate::sgf::tree::Node;
use crate::sgf::types::{Color, Move};

/// A breadcrumb: the ancestor node (with a placeholder where the cursor
/// went down), its board, and whether its subtree had diverged.
#[derive(Debug, Clone)]
struct Frame {
    node: Node,
    child_index: usize,
    board: BoardState,
    modified: bool,
}

/// A position in a game tree with its derived [`BoardState`].
///
/// The cursor owns the tree. Edits apply to the current node and are
/// folded back into ancestors lazily during upward navigation, so a
/// retained copy of the original tree is never disturbed.
#[derive(Debug, Clone)]
pub struct Cursor {
    frames: Vec<Frame>,
    node: Node,
    modified: bool,
    board: BoardState,
}

/// A navigation request that cannot be satisfied. The cursor does not
/// move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum CursorError {
    /// The cursor is at the root.
    #[display("already at the root")]
    AtRoot,
    /// The current node has no child at the index.
    #[display("no child at index {}", _0)]
    NoSuchChild(#[error(not(source))] usize),
    /// The current node has no sibling in that direction.
    #[display("no sibling in that direction")]
    NoSuchSibling,
}

impl Cursor {
    /// Creates a cursor at the root of a tree.
    pub fn new(root: Node) -> Cursor {
        let board = BoardState::from_root(&root);
        Cursor {
            frames: Vec::new(),
            node: root,
            modified: false,
            board,
        }
    }

    /// The node under the cursor.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// The board at the cursor's position.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Whether the cursor is at the root.
    pub fn is_root(&self) -> bool {
        self.frames.is_empty()
    }

    /// Distance from the root.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// This node's index among its parent's children, or `None` at the
    /// root.
    pub fn child_index(&self) -> Option<usize> {
        self.frames.last().map(|f| f.child_index)
    }

    /// Number of children of the current node.
    pub fn child_count(&self) -> usize {
        self.node.children.len()
    }

    /// Moves to the child at `index`. The child's board is the current
    /// board reset for a new node with the child's properties applied.
    #[instrument(skip(self))]
    pub fn descend(&mut self, index: usize) -> Result<(), CursorError> {
        if index >= self.node.children.len() {
            return Err(CursorError::NoSuchChild(index));
        }
        let mut parent = std::mem::take(&mut self.node);
        let child = std::mem::take(&mut parent.children[index]);
        let mut board = self.board.child_base();
        board.apply_properties(&child.properties);
        self.frames.push(Frame {
            node: parent,
            child_index: index,
            board: std::mem::replace(&mut self.board, board),
            modified: self.modified,
        });
        self.node = child;
        self.modified = false;
        Ok(())
    }

    /// Moves to the parent, folding the current node back into it. A
    /// modified subtree marks the parent as modified in turn.
    pub fn ascend(&mut self) -> Result<(), CursorError> {
        let mut frame = self.frames.pop().ok_or(CursorError::AtRoot)?;
        frame.node.children[frame.child_index] = std::mem::take(&mut self.node);
        self.modified = self.modified || frame.modified;
        self.node = frame.node;
        self.board = frame.board;
        Ok(())
    }

    /// Walks to the root, reconciling every edit along the way.
    pub fn to_root(&mut self) {
        while self.ascend().is_ok() {}
    }

    /// Consumes the cursor and returns the reconciled tree.
    pub fn into_root(mut self) -> Node {
        self.to_root();
        self.node
    }

    /// Moves to the next sibling.
    pub fn next_sibling(&mut self) -> Result<(), CursorError> {
        let index = self.child_index().ok_or(CursorError::AtRoot)?;
        self.ascend()?;
        if self.descend(index + 1).is_ok() {
            return Ok(());
        }
        self.descend(index)?;
        Err(CursorError::NoSuchSibling)
    }

    /// Moves to the previous sibling.
    pub fn prev_sibling(&mut self) -> Result<(), CursorError> {
        let index = self.child_index().ok_or(CursorError::AtRoot)?;
        if index == 0 {
            return Err(CursorError::NoSuchSibling);
        }
        self.ascend()?;
        self.descend(index - 1)
    }

    /// The first child whose recorded move matches `target` for the
    /// player to move, if any.
    pub fn child_playing_at(&self, target: Move) -> Option<usize> {
        let turn = self.board.player_turn();
        self.node
            .children
            .iter()
            .position(|child| child.move_property() == Some((turn, target)))
    }

    /// Cursors for every child of the current node.
    pub fn children(&self) -> Vec<Cursor> {
        (0..self.child_count())
            .filter_map(|index| {
                let mut child = self.clone();
                child.descend(index).ok().map(|_| child)
            })
            .collect()
    }

    /// Replaces the current node with `f(node)` and recomputes the board
    /// from the parent (or as a root).
    #[instrument(skip(self, f))]
    pub fn modify_node(&mut self, f: impl FnOnce(&mut Node)) {
        f(&mut self.node);
        self.recompute_board();
        if !self.frames.is_empty() {
            self.modified = true;
        }
    }

    fn recompute_board(&mut self) {
        self.board = match self.frames.last() {
            None => BoardState::from_root(&self.node),
            Some(frame) => {
                let mut board = frame.board.child_base();
                board.apply_properties(&self.node.properties);
                board
            }
        };
    }

    /// Plays a move for the player to move: navigates to an existing
    /// child that plays `target`, or validates the move under standard
    /// parameters, appends a new child carrying it, and navigates there.
    #[instrument(skip(self))]
    pub fn play(&mut self, target: Move) -> Result<(), MoveError> {
        if let Some(index) = self.child_playing_at(target) {
            // The index came from the child list; descending cannot fail.
            let _ = self.descend(index);
            return Ok(());
        }
        let turn = self.board.player_turn();
        if let Move::Play(at) = target {
            apply_move(&self.board, turn, at, MoveParams::STANDARD)?;
        }
        let mut child = Node::empty();
        child.add_property(match turn {
            Color::Black => Property::B(target),
            Color::White => Property::W(target),
        });
        let index = self.node.add_child(child);
        if !self.frames.is_empty() {
            self.modified = true;
        }
        let _ = self.descend(index);
        Ok(())
    }
}

impl Node {
    /// Consumes the node and positions a cursor at it as a root.
    pub fn into_cursor(self) -> Cursor {
        Cursor::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgf::parser::parse_collection;

    fn cursor_for(input: &str) -> Cursor {
        let mut trees = parse_collection(input).unwrap().into_trees();
        Cursor::new(trees.remove(0))
    }

    #[test]
    fn test_root_cursor_matches_root_board() {
        let c = cursor_for("(;SZ[9]AB[dd])");
        assert!(c.is_root());
        assert_eq!(c.board().width(), 9);
        assert!(c.board().stone_at(crate::sgf::types::Coord::new(3, 3).unwrap()).is_some());
    }

    #[test]
    fn test_down_up_restores_node() {
        let mut c = cursor_for("(;SZ[9];B[aa];W[bb])");
        let root = c.node().clone();
        c.descend(0).unwrap();
        c.descend(0).unwrap();
        c.to_root();
        assert_eq!(c.node(), &root);
    }

    #[test]
    fn test_sibling_navigation() {
        let mut c = cursor_for("(;SZ[9];B[aa](;W[bb])(;W[cc]))");
        c.descend(0).unwrap();
        c.descend(0).unwrap();
        assert_eq!(c.child_index(), Some(0));
        c.next_sibling().unwrap();
        assert_eq!(c.child_index(), Some(1));
        assert_eq!(c.next_sibling(), Err(CursorError::NoSuchSibling));
        assert_eq!(c.child_index(), Some(1));
        c.prev_sibling().unwrap();
        assert_eq!(c.child_index(), Some(0));
        assert_eq!(c.prev_sibling(), Err(CursorError::NoSuchSibling));
    }

    #[test]
    fn test_descend_out_of_range() {
        let mut c = cursor_for("(;SZ[9])");
        assert_eq!(c.descend(0), Err(CursorError::NoSuchChild(0)));
        assert_eq!(c.ascend(), Err(CursorError::AtRoot));
    }
}
