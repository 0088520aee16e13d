//! Core value domains for SGF game records.

use serde::{Deserialize, Serialize};

/// Largest board axis SGF can address (coordinates `a`..`z`, `A`..`Z`).
pub const MAX_BOARD_SIZE: u8 = 52;

/// A stone color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Black stones; Black moves first.
    Black,
    /// White stones.
    White,
}

impl Color {
    /// Returns the opposing color.
    pub fn other(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// A board intersection, 0-based from the top-left corner.
///
/// Both axes are limited to `0..52`, the addressable range of the SGF
/// letter-pair encoding. Out-of-range pairs are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Coord {
    /// Creates a coordinate, or `None` if either axis is 52 or larger.
    pub fn new(x: u8, y: u8) -> Option<Coord> {
        if x < MAX_BOARD_SIZE && y < MAX_BOARD_SIZE {
            Some(Coord { x, y })
        } else {
            None
        }
    }

    /// Column, 0-based from the left edge.
    pub fn x(self) -> u8 {
        self.x
    }

    /// Row, 0-based from the top edge.
    pub fn y(self) -> u8 {
        self.y
    }

    /// The up-to-4 orthogonal neighbors within a `width` x `height` board.
    pub fn neighbors(self, width: u8, height: u8) -> Vec<Coord> {
        let mut out = Vec::with_capacity(4);
        if self.x > 0 {
            out.push(Coord { x: self.x - 1, y: self.y });
        }
        if self.x + 1 < width {
            out.push(Coord { x: self.x + 1, y: self.y });
        }
        if self.y > 0 {
            out.push(Coord { x: self.x, y: self.y - 1 });
        }
        if self.y + 1 < height {
            out.push(Coord { x: self.x, y: self.y + 1 });
        }
        out
    }
}

/// One entry of a point list: a single coordinate or a compressed
/// rectangle given by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordSpan {
    /// One coordinate.
    Single(Coord),
    /// Every coordinate in the inclusive rectangle between the corners.
    Rect(Coord, Coord),
}

impl CoordSpan {
    /// Builds a rectangle span, normalizing the corners so the first is
    /// the per-axis minimum. Corners covering a single point collapse to
    /// [`CoordSpan::Single`].
    pub fn rect(a: Coord, b: Coord) -> CoordSpan {
        let min = Coord { x: a.x.min(b.x), y: a.y.min(b.y) };
        let max = Coord { x: a.x.max(b.x), y: a.y.max(b.y) };
        if min == max {
            CoordSpan::Single(min)
        } else {
            CoordSpan::Rect(min, max)
        }
    }

    /// Coordinates covered by this span, in row-major order.
    pub fn coords(&self) -> Vec<Coord> {
        match *self {
            CoordSpan::Single(c) => vec![c],
            CoordSpan::Rect(min, max) => {
                let mut out = Vec::new();
                for y in min.y..=max.y {
                    for x in min.x..=max.x {
                        out.push(Coord { x, y });
                    }
                }
                out
            }
        }
    }
}

/// An ordered list of board points, possibly compressed into rectangles.
///
/// The empty list is meaningful for elist-valued properties (AE, DD, TB,
/// TW, VW), where `[]` addresses the whole board or clears inherited
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct CoordList {
    spans: Vec<CoordSpan>,
}

impl CoordList {
    /// Creates a list from spans.
    pub fn new(spans: Vec<CoordSpan>) -> CoordList {
        CoordList { spans }
    }

    /// Creates a list of singleton spans.
    pub fn from_coords(coords: impl IntoIterator<Item = Coord>) -> CoordList {
        CoordList {
            spans: coords.into_iter().map(CoordSpan::Single).collect(),
        }
    }

    /// The stored spans, as parsed or constructed.
    pub fn spans(&self) -> &[CoordSpan] {
        &self.spans
    }

    /// True when the list holds no points.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// All covered coordinates: row-major within each span, duplicates
    /// dropped, first-occurrence order preserved.
    pub fn expand(&self) -> Vec<Coord> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for span in &self.spans {
            for c in span.coords() {
                if seen.insert(c) {
                    out.push(c);
                }
            }
        }
        out
    }
}

impl FromIterator<Coord> for CoordList {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        CoordList::from_coords(iter)
    }
}

/// A move: either a pass or a stone placed at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// No stone is placed; the turn still advances.
    Pass,
    /// A stone is placed at the coordinate.
    Play(Coord),
}

/// SGF text: preserves newlines, collapses other whitespace runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Text(String);

impl Text {
    /// Creates a text value, normalizing it into the representable
    /// domain: `\r\n`/`\r` become `\n`, runs of non-newline whitespace
    /// become one space.
    pub fn new(s: impl Into<String>) -> Text {
        Text(crate::sgf::text::normalize_text(&s.into()))
    }

    /// The decoded content.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Text {
        Text::new(s)
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// SGF simple text: all whitespace, newlines included, collapses to
/// single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SimpleText(String);

impl SimpleText {
    /// Creates a simple-text value, collapsing every whitespace run to a
    /// single space.
    pub fn new(s: impl Into<String>) -> SimpleText {
        SimpleText(crate::sgf::text::normalize_simple_text(&s.into()))
    }

    /// The decoded content.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SimpleText {
    fn from(s: &str) -> SimpleText {
        SimpleText::new(s)
    }
}

impl std::fmt::Display for SimpleText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An emphasis value; SGF encodes these as `1` and `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Double {
    /// Ordinary degree (`1`).
    Normal,
    /// Emphasized degree (`2`).
    Emphasized,
}

/// How a finished game was decided, from the winner's side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WinReason {
    /// Win by the given score margin.
    Score(f64),
    /// Opponent resigned.
    Resignation,
    /// Opponent ran out of time.
    Time,
    /// Opponent forfeited.
    Forfeit,
    /// The record does not say how.
    Unspecified,
}

/// The outcome of a game, as recorded in the RE property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameResult {
    /// One side won.
    Win(Color, WinReason),
    /// The game was drawn.
    Draw,
    /// No result / the game was annulled.
    Void,
    /// Unknown result (`?`).
    Unknown,
}

/// The rules the game was played under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ruleset {
    /// American Go Association rules.
    Aga,
    /// Ing (Goe) rules.
    Goe,
    /// Japanese rules.
    Japanese,
    /// New Zealand rules.
    NewZealand,
    /// Any other ruleset, kept verbatim.
    Other(String),
}

/// Which sibling set a viewer should present as variations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariationSource {
    /// Variations are the children of the current node.
    Children,
    /// Variations are the siblings of the current node.
    Siblings,
}

/// Variation display policy carried by the ST root property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariationMode {
    /// Where variations are taken from.
    pub source: VariationSource,
    /// Whether boards should show variation markup.
    pub show_markup: bool,
}

impl VariationMode {
    /// Decodes the SGF integer form (0..=3).
    pub fn from_code(code: u8) -> Option<VariationMode> {
        if code > 3 {
            return None;
        }
        Some(VariationMode {
            source: if code & 1 == 0 {
                VariationSource::Children
            } else {
                VariationSource::Siblings
            },
            show_markup: code & 2 == 0,
        })
    }

    /// Encodes back to the SGF integer form.
    pub fn code(self) -> u8 {
        let mut code = match self.source {
            VariationSource::Children => 0,
            VariationSource::Siblings => 1,
        };
        if !self.show_markup {
            code |= 2;
        }
        code
    }
}

impl Default for VariationMode {
    fn default() -> Self {
        VariationMode {
            source: VariationSource::Children,
            show_markup: true,
        }
    }
}

/// The kinds of point marks SGF can draw on a board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum MarkKind {
    /// CR: a circle.
    Circle,
    /// SQ: a square.
    Square,
    /// TR: a triangle.
    Triangle,
    /// MA: an X mark.
    X,
    /// SL: the point is selected.
    Selected,
}

/// An arrow drawn from one point to another (AR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arrow {
    /// Tail of the arrow.
    pub from: Coord,
    /// Head of the arrow.
    pub to: Coord,
}

/// A directionless line between two points (LN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    /// One endpoint.
    pub a: Coord,
    /// The other endpoint.
    pub b: Coord,
}

/// A text label attached to a point (LB).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// The labelled point.
    pub coord: Coord,
    /// The label text.
    pub text: SimpleText,
}

/// Board dimensions from the SZ property. Axes range over `1..=52`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    width: u8,
    height: u8,
}

impl BoardSize {
    /// Creates a size, or `None` when an axis is 0 or exceeds 52.
    pub fn new(width: u8, height: u8) -> Option<BoardSize> {
        if (1..=MAX_BOARD_SIZE).contains(&width) && (1..=MAX_BOARD_SIZE).contains(&height) {
            Some(BoardSize { width, height })
        } else {
            None
        }
    }

    /// Creates a square size.
    pub fn square(n: u8) -> Option<BoardSize> {
        BoardSize::new(n, n)
    }

    /// Board width.
    pub fn width(self) -> u8 {
        self.width
    }

    /// Board height.
    pub fn height(self) -> u8 {
        self.height
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        BoardSize { width: 19, height: 19 }
    }
}
