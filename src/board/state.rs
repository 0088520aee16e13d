//! The derived board position: one grid cell per intersection plus the
//! game-level facts gathered along the path from the root.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sgf::types::{
    Arrow, BoardSize, Color, Coord, GameResult, Label, Line, MarkKind, Ruleset, SimpleText,
    Text, VariationMode,
};

/// Everything the board knows about one intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordState {
    /// Whether this is a star point (hoshi).
    pub star: bool,
    /// The stone here, if any.
    pub stone: Option<Color>,
    /// The mark drawn here, if any.
    pub mark: Option<MarkKind>,
    /// Whether the point is visible (VW).
    pub visible: bool,
    /// Whether the point is dimmed (DD).
    pub dimmed: bool,
}

impl Default for CoordState {
    fn default() -> Self {
        CoordState {
            star: false,
            stone: None,
            mark: None,
            visible: true,
            dimmed: false,
        }
    }
}

/// Root-level display facts: board size and variation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RootInfo {
    /// Board dimensions.
    pub size: BoardSize,
    /// Variation display policy (ST).
    pub variation_mode: VariationMode,
}

/// Game-level metadata, populated from game-info properties seen along
/// the path from the root. Every field is optional except the embedded
/// root info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameInfo {
    /// Root-level facts.
    pub root: RootInfo,
    /// Annotator (AN).
    pub annotator: Option<SimpleText>,
    /// Black's rank (BR).
    pub black_rank: Option<SimpleText>,
    /// Black's team (BT).
    pub black_team: Option<SimpleText>,
    /// Copyright notice (CP).
    pub copyright: Option<SimpleText>,
    /// Date(s) the game was played (DT).
    pub date: Option<SimpleText>,
    /// Event name (EV).
    pub event: Option<SimpleText>,
    /// Background of the game (GC).
    pub game_comment: Option<Text>,
    /// Game name (GN).
    pub game_name: Option<SimpleText>,
    /// Opening played (ON).
    pub opening: Option<SimpleText>,
    /// Overtime method (OT).
    pub overtime: Option<SimpleText>,
    /// Black player name (PB).
    pub black_player: Option<SimpleText>,
    /// Place the game was played (PC).
    pub place: Option<SimpleText>,
    /// White player name (PW).
    pub white_player: Option<SimpleText>,
    /// Result (RE).
    pub result: Option<GameResult>,
    /// Round information (RO).
    pub round: Option<SimpleText>,
    /// Ruleset (RU).
    pub ruleset: Option<Ruleset>,
    /// Source of the record (SO).
    pub source: Option<SimpleText>,
    /// Time limit in seconds (TM).
    pub time_limit: Option<f64>,
    /// Who entered the record (US).
    pub entered_by: Option<SimpleText>,
    /// White's rank (WR).
    pub white_rank: Option<SimpleText>,
    /// Handicap stone count (HA).
    pub handicap: Option<i32>,
    /// Komi (KM).
    pub komi: Option<f64>,
}

/// A playable position derived from a path of nodes.
///
/// The grid is indexed `[y][x]`. The three `has_*` flags short-circuit
/// full-grid passes: when a flag is clear, no cell holds that state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub(crate) grid: Vec<Vec<CoordState>>,
    pub(crate) arrows: Vec<Arrow>,
    pub(crate) lines: Vec<Line>,
    pub(crate) labels: Vec<Label>,
    pub(crate) move_number: i32,
    pub(crate) player_turn: Color,
    pub(crate) black_captures: u32,
    pub(crate) white_captures: u32,
    pub(crate) game_info: GameInfo,
    pub(crate) has_invisible: bool,
    pub(crate) has_dimmed: bool,
    pub(crate) has_marks: bool,
}

/// Corner/side star offset for one axis, or `None` when the axis is too
/// short to carry stars at all.
fn star_offset(len: u8) -> Option<u8> {
    let off = if len >= 13 { 3 } else { 2 };
    (len >= 2 * off + 1).then_some(off)
}

impl BoardState {
    /// An empty board of the given size with star points marked.
    pub fn new(size: BoardSize) -> BoardState {
        let (w, h) = (size.width(), size.height());
        let mut board = BoardState {
            grid: vec![vec![CoordState::default(); w as usize]; h as usize],
            arrows: Vec::new(),
            lines: Vec::new(),
            labels: Vec::new(),
            move_number: 0,
            player_turn: Color::Black,
            black_captures: 0,
            white_captures: 0,
            game_info: GameInfo {
                root: RootInfo { size, variation_mode: VariationMode::default() },
                ..GameInfo::default()
            },
            has_invisible: false,
            has_dimmed: false,
            has_marks: false,
        };
        board.mark_stars();
        board
    }

    /// Standard hoshi layout, generalized per axis: the corner offset is
    /// 3 from the edge for an axis of 13 or more, else 2; a center star
    /// when both axes are odd and at least 9; four side stars when both
    /// axes are at least 13.
    fn mark_stars(&mut self) {
        let (w, h) = (self.width(), self.height());
        let mut star = |x: u8, y: u8| {
            self.grid[y as usize][x as usize].star = true;
        };
        if let (Some(ox), Some(oy)) = (star_offset(w), star_offset(h)) {
            for x in [ox, w - 1 - ox] {
                for y in [oy, h - 1 - oy] {
                    star(x, y);
                }
            }
            if w >= 13 && h >= 13 {
                star(w / 2, oy);
                star(w / 2, h - 1 - oy);
                star(ox, h / 2);
                star(w - 1 - ox, h / 2);
            }
        }
        if w % 2 == 1 && h % 2 == 1 && w >= 9 && h >= 9 {
            star(w / 2, h / 2);
        }
    }

    /// Board width.
    pub fn width(&self) -> u8 {
        self.game_info.root.size.width()
    }

    /// Board height.
    pub fn height(&self) -> u8 {
        self.game_info.root.size.height()
    }

    /// Whether the coordinate lies on this board.
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x() < self.width() && c.y() < self.height()
    }

    /// The full state of an intersection, or `None` off the board.
    pub fn at(&self, c: Coord) -> Option<&CoordState> {
        self.grid
            .get(c.y() as usize)
            .and_then(|row| row.get(c.x() as usize))
    }

    pub(crate) fn at_mut(&mut self, c: Coord) -> Option<&mut CoordState> {
        self.grid
            .get_mut(c.y() as usize)
            .and_then(|row| row.get_mut(c.x() as usize))
    }

    /// The stone at a coordinate; `None` when empty or off the board.
    pub fn stone_at(&self, c: Coord) -> Option<Color> {
        self.at(c).and_then(|cell| cell.stone)
    }

    /// Whether the coordinate is a star point.
    pub fn is_star(&self, c: Coord) -> bool {
        self.at(c).map(|cell| cell.star).unwrap_or(false)
    }

    /// Arrows attached to the current node.
    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    /// Lines attached to the current node.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Labels attached to the current node.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The current move number.
    pub fn move_number(&self) -> i32 {
        self.move_number
    }

    /// The player whose turn it is.
    pub fn player_turn(&self) -> Color {
        self.player_turn
    }

    /// Stones the given color has captured so far.
    pub fn captures(&self, by: Color) -> u32 {
        match by {
            Color::Black => self.black_captures,
            Color::White => self.white_captures,
        }
    }

    pub(crate) fn add_captures(&mut self, by: Color, n: u32) {
        match by {
            Color::Black => self.black_captures += n,
            Color::White => self.white_captures += n,
        }
    }

    /// Game-level metadata gathered along the path.
    pub fn game_info(&self) -> &GameInfo {
        &self.game_info
    }

    /// True when any point may be invisible.
    pub fn has_invisible(&self) -> bool {
        self.has_invisible
    }

    /// True when any point may be dimmed.
    pub fn has_dimmed(&self) -> bool {
        self.has_dimmed
    }

    /// True when any point may carry a mark.
    pub fn has_marks(&self) -> bool {
        self.has_marks
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            for cell in row {
                let ch = match cell.stone {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None if cell.star => '+',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(x: u8, y: u8) -> Coord {
        Coord::new(x, y).unwrap()
    }

    fn board(n: u8) -> BoardState {
        BoardState::new(BoardSize::square(n).unwrap())
    }

    #[test]
    fn test_nine_by_nine_stars() {
        let b = board(9);
        for (x, y) in [(2, 2), (6, 2), (2, 6), (6, 6), (4, 4)] {
            assert!(b.is_star(coord(x, y)), "expected star at ({x}, {y})");
        }
        assert!(!b.is_star(coord(4, 2)));
        assert_eq!(b.grid.iter().flatten().filter(|c| c.star).count(), 5);
    }

    fn star_coords(b: &BoardState) -> Vec<(u8, u8)> {
        let mut stars = Vec::new();
        for y in 0..b.height() {
            for x in 0..b.width() {
                if b.is_star(coord(x, y)) {
                    stars.push((x, y));
                }
            }
        }
        stars
    }

    #[test]
    fn test_thirteen_stars_enumerated() {
        // Offset 3 on both axes: 4 corner stars, 4 side stars at the
        // edge midpoints, and the center.
        let b = board(13);
        assert_eq!(
            star_coords(&b),
            vec![
                (3, 3),
                (6, 3),
                (9, 3),
                (3, 6),
                (6, 6),
                (9, 6),
                (3, 9),
                (6, 9),
                (9, 9),
            ]
        );
    }

    #[test]
    fn test_nineteen_stars_enumerated() {
        let b = board(19);
        assert_eq!(
            star_coords(&b),
            vec![
                (3, 3),
                (9, 3),
                (15, 3),
                (3, 9),
                (9, 9),
                (15, 9),
                (3, 15),
                (9, 15),
                (15, 15),
            ]
        );
    }

    #[test]
    fn test_tiny_board_has_no_stars() {
        let b = board(3);
        assert_eq!(b.grid.iter().flatten().filter(|c| c.star).count(), 0);
    }

    #[test]
    fn test_rectangular_board() {
        let b = BoardState::new(BoardSize::new(9, 13).unwrap());
        assert_eq!(b.width(), 9);
        assert_eq!(b.height(), 13);
        // Offsets differ per axis: 2 on the width, 3 on the height.
        assert!(b.is_star(coord(2, 3)));
        assert!(b.is_star(coord(6, 9)));
        // Both axes odd and at least 9, so the center star is present;
        // the width is below 13, so there are no side stars.
        assert!(b.is_star(coord(4, 6)));
        assert!(!b.is_star(coord(4, 3)));
    }

    #[test]
    fn test_fresh_board_defaults() {
        let b = board(9);
        assert_eq!(b.move_number(), 0);
        assert_eq!(b.player_turn(), Color::Black);
        assert_eq!(b.captures(Color::Black), 0);
        assert!(!b.has_marks() && !b.has_dimmed() && !b.has_invisible());
        assert_eq!(b.stone_at(coord(4, 4)), None);
    }
}
