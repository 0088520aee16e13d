//! Goatee core - SGF game records for Go
//!
//! This library models Go (Weiqi/Baduk) game records in the SGF file
//! format and derives playable positions from them.
//!
//! # Architecture
//!
//! - **Codec**: a strict SGF parser and renderer over a closed, typed
//!   property set; unknown tags round-trip verbatim
//! - **Tree**: game trees of property-carrying nodes, grouped into a
//!   [`Collection`]
//! - **Board engine**: folds node properties into a [`BoardState`],
//!   including captures and the suicide rule
//! - **Cursor**: a zipper over the tree that navigates, edits, and keeps
//!   the board at its position current
//!
//! # Example
//!
//! ```
//! use goatee::{parse_collection, Cursor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let collection = parse_collection("(;FF[4]GM[1]SZ[9];B[dd];W[ee])")?;
//! let mut trees = collection.into_trees();
//! let mut cursor = Cursor::new(trees.remove(0));
//! cursor.descend(0)?;
//! cursor.descend(0)?;
//! assert_eq!(cursor.board().move_number(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod cursor;
mod sgf;

// Crate-level exports - Value domains
pub use sgf::types::{
    Arrow, BoardSize, Color, Coord, CoordList, CoordSpan, Double, GameResult, Label, Line,
    MarkKind, Move, Ruleset, SimpleText, Text, VariationMode, VariationSource, WinReason,
    MAX_BOARD_SIZE,
};

// Crate-level exports - Properties and trees
pub use sgf::property::{Property, PropertyCategory};
pub use sgf::tree::{Collection, Node};

// Crate-level exports - Codec
pub use sgf::error::{ParseError, RenderError};
pub use sgf::parser::{parse_collection, parse_collection_bytes};
pub use sgf::render::render_collection;

// Crate-level exports - Board engine
pub use board::invariants::{CaptureConservation, FlagCoherence, GridShape, Invariant};
pub use board::moves::{apply_move, is_valid_move, MoveError, MoveParams};
pub use board::state::{BoardState, CoordState, GameInfo, RootInfo};

// Crate-level exports - Cursor
pub use cursor::{Cursor, CursorError};
