//! Interpreting node properties into board state.

use tracing::instrument;

use crate::sgf::property::Property;
use crate::sgf::tree::Node;
use crate::sgf::types::{Color, Coord, CoordList, MarkKind, Move};

use super::moves::{apply_move, MoveParams};
use super::state::BoardState;

impl BoardState {
    /// Builds the board for a root node: board size from SZ (19x19 when
    /// absent), star points, then every root property folded in.
    #[instrument(skip(node))]
    pub fn from_root(node: &Node) -> BoardState {
        let size = node
            .properties
            .iter()
            .find_map(|p| match p {
                Property::SZ(s) => Some(*s),
                _ => None,
            })
            .unwrap_or_default();
        let mut board = BoardState::new(size);
        board.apply_properties(&node.properties);
        board
    }

    /// Resets per-node state before a child's properties are applied:
    /// marks, arrows, lines, and labels belong to a single node, while
    /// stones, dimming, and visibility persist.
    pub(crate) fn prepare_for_child(&mut self) {
        if self.has_marks {
            for cell in self.grid.iter_mut().flatten() {
                cell.mark = None;
            }
            self.has_marks = false;
        }
        self.arrows.clear();
        self.lines.clear();
        self.labels.clear();
    }

    /// Applies a node's properties in order.
    pub fn apply_properties(&mut self, properties: &[Property]) {
        for p in properties {
            self.apply_property(p);
        }
    }

    /// Applies one property to the position.
    ///
    /// Recorded B/W moves always take effect: an illegal recorded move
    /// leaves the stones untouched but still advances the move number
    /// and the turn, so viewing historical files never fails.
    pub fn apply_property(&mut self, p: &Property) {
        use Property::*;
        match p {
            B(m) => self.apply_move_record(Color::Black, *m),
            W(m) => self.apply_move_record(Color::White, *m),
            MN(n) => self.move_number = *n,
            PL(c) => self.player_turn = *c,

            AB(l) => self.set_stones(l, Some(Color::Black)),
            AW(l) => self.set_stones(l, Some(Color::White)),
            AE(l) => self.set_stones(l, None),

            CR(l) => self.set_marks(l, MarkKind::Circle),
            MA(l) => self.set_marks(l, MarkKind::X),
            SL(l) => self.set_marks(l, MarkKind::Selected),
            SQ(l) => self.set_marks(l, MarkKind::Square),
            TR(l) => self.set_marks(l, MarkKind::Triangle),

            AR(v) => self.arrows.extend(v.iter().copied()),
            LN(v) => self.lines.extend(v.iter().copied()),
            LB(v) => self.labels.extend(v.iter().cloned()),

            DD(l) => self.apply_dimming(l),
            VW(l) => self.apply_visibility(l),

            ST(m) => self.game_info.root.variation_mode = *m,

            AN(t) => self.game_info.annotator = Some(t.clone()),
            BR(t) => self.game_info.black_rank = Some(t.clone()),
            BT(t) => self.game_info.black_team = Some(t.clone()),
            CP(t) => self.game_info.copyright = Some(t.clone()),
            DT(t) => self.game_info.date = Some(t.clone()),
            EV(t) => self.game_info.event = Some(t.clone()),
            GC(t) => self.game_info.game_comment = Some(t.clone()),
            GN(t) => self.game_info.game_name = Some(t.clone()),
            ON(t) => self.game_info.opening = Some(t.clone()),
            OT(t) => self.game_info.overtime = Some(t.clone()),
            PB(t) => self.game_info.black_player = Some(t.clone()),
            PC(t) => self.game_info.place = Some(t.clone()),
            PW(t) => self.game_info.white_player = Some(t.clone()),
            RE(r) => self.game_info.result = Some(*r),
            RO(t) => self.game_info.round = Some(t.clone()),
            RU(r) => self.game_info.ruleset = Some(r.clone()),
            SO(t) => self.game_info.source = Some(t.clone()),
            TM(v) => self.game_info.time_limit = Some(*v),
            US(t) => self.game_info.entered_by = Some(t.clone()),
            WR(t) => self.game_info.white_rank = Some(t.clone()),
            HA(n) => self.game_info.handicap = Some(*n),
            KM(v) => self.game_info.komi = Some(*v),

            // Annotations, timing, ko markers, territory, and root
            // metadata don't change the position.
            KO | C(_) | DM(_) | GB(_) | GW(_) | HO(_) | N(_) | UC(_) | V(_) | BM(_)
            | DO | IT | TE(_) | AP(_, _) | CA(_) | FF(_) | GM(_) | SZ(_) | BL(_)
            | OB(_) | OW(_) | WL(_) | TB(_) | TW(_) | Unknown(_, _) => {}
        }
    }

    fn apply_move_record(&mut self, color: Color, m: Move) {
        self.move_number += 1;
        self.player_turn = color.other();
        let at = match m {
            Move::Pass => return,
            Move::Play(c) => c,
        };
        // FF[3] compatibility: tt is a pass on boards within 19x19.
        if at.x() == 19 && at.y() == 19 && self.width() <= 19 && self.height() <= 19 {
            return;
        }
        if let Ok(next) = apply_move(self, color, at, MoveParams::PERMISSIVE) {
            *self = next;
        }
    }

    fn set_stones(&mut self, l: &CoordList, stone: Option<Color>) {
        for c in l.expand() {
            if let Some(cell) = self.at_mut(c) {
                cell.stone = stone;
            }
        }
    }

    fn set_marks(&mut self, l: &CoordList, kind: MarkKind) {
        for c in l.expand() {
            if let Some(cell) = self.at_mut(c) {
                cell.mark = Some(kind);
            }
        }
        if !l.is_empty() {
            self.has_marks = true;
        }
    }

    /// DD is inherited with most-recent-wins semantics: every DD clears
    /// all dimming first, then a non-empty list dims its points.
    fn apply_dimming(&mut self, l: &CoordList) {
        if self.has_dimmed {
            for cell in self.grid.iter_mut().flatten() {
                cell.dimmed = false;
            }
        }
        if l.is_empty() {
            self.has_dimmed = false;
            return;
        }
        for c in l.expand() {
            if let Some(cell) = self.at_mut(c) {
                cell.dimmed = true;
            }
        }
        self.has_dimmed = true;
    }

    /// VW is inherited with most-recent-wins semantics: the empty list
    /// makes the whole board visible, a non-empty list restricts
    /// visibility to exactly its points.
    fn apply_visibility(&mut self, l: &CoordList) {
        if l.is_empty() {
            if self.has_invisible {
                for cell in self.grid.iter_mut().flatten() {
                    cell.visible = true;
                }
            }
            self.has_invisible = false;
            return;
        }
        for cell in self.grid.iter_mut().flatten() {
            cell.visible = false;
        }
        for c in l.expand() {
            if let Some(cell) = self.at_mut(c) {
                cell.visible = true;
            }
        }
        self.has_invisible = true;
    }

    /// The board a child node sees before its own properties apply.
    pub fn child_base(&self) -> BoardState {
        let mut next = self.clone();
        next.prepare_for_child();
        next
    }
}
