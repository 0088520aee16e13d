//! Tests for the board engine: positions derived from game records.

use goatee::{
    apply_move, is_valid_move, parse_collection, BoardState, Color, Coord, Cursor, MoveError,
    MoveParams, Node, Property,
};

fn coord(x: u8, y: u8) -> Coord {
    Coord::new(x, y).unwrap()
}

fn root_node(input: &str) -> Node {
    parse_collection(input).unwrap().into_trees().remove(0)
}

/// Walks the main line to its end and returns the cursor there.
fn end_of_main_line(input: &str) -> Cursor {
    let mut cursor = Cursor::new(root_node(input));
    while cursor.descend(0).is_ok() {}
    cursor
}

#[test]
fn test_minimal_root_board() {
    let board = BoardState::from_root(&root_node("(;FF[4]GM[1]SZ[9])"));
    assert_eq!(board.width(), 9);
    assert_eq!(board.height(), 9);
    assert_eq!(board.move_number(), 0);
    assert_eq!(board.player_turn(), Color::Black);
}

#[test]
fn test_pass_and_play() {
    let cursor = end_of_main_line("(;SZ[19];B[];W[dd])");
    let board = cursor.board();
    assert_eq!(board.move_number(), 2);
    assert_eq!(board.stone_at(coord(3, 3)), Some(Color::White));
    assert_eq!(board.player_turn(), Color::Black);
    assert_eq!(board.captures(Color::Black), 0);
    assert_eq!(board.captures(Color::White), 0);
}

#[test]
fn test_recorded_capture() {
    // White aa starts with liberties ab and ba; Black takes both.
    let cursor = end_of_main_line("(;SZ[9];B[ba];W[aa];B[ab])");
    let board = cursor.board();
    assert_eq!(board.stone_at(coord(0, 0)), None);
    assert_eq!(board.captures(Color::Black), 1);
    assert_eq!(board.captures(Color::White), 0);
    assert_eq!(board.move_number(), 3);
}

#[test]
fn test_suicide_rejected_but_recorded_move_applies() {
    // Black stones at ba and ab wall off the corner point aa.
    let root = root_node("(;SZ[9]AB[ba][ab])");
    let board = BoardState::from_root(&root);
    assert!(!is_valid_move(&board, Color::White, coord(0, 0)));
    assert_eq!(
        apply_move(&board, Color::White, coord(0, 0), MoveParams::STANDARD),
        Err(MoveError::Suicide)
    );

    // The same move read from a record is played anyway: the stone dies
    // at once and Black is credited with the capture.
    let mut replayed = board.clone();
    replayed.apply_property(&Property::W(goatee::Move::Play(coord(0, 0))));
    assert_eq!(replayed.stone_at(coord(0, 0)), None);
    assert_eq!(replayed.captures(Color::Black), 1);
    assert_eq!(replayed.move_number(), 1);
}

#[test]
fn test_setup_add_then_clear_round_trip() {
    let mut board = BoardState::from_root(&root_node("(;SZ[9])"));
    let reference = board.clone();
    let list = goatee::CoordList::from_coords([coord(5, 5)]);
    board.apply_property(&Property::AB(list.clone()));
    assert_eq!(board.stone_at(coord(5, 5)), Some(Color::Black));
    board.apply_property(&Property::AE(list));
    assert_eq!(board, reference);
}

#[test]
fn test_valid_move_implies_apply_move_succeeds() {
    let board = BoardState::from_root(&root_node("(;SZ[9]AB[ba][ab]AW[bb])"));
    for y in 0..9u8 {
        for x in 0..9u8 {
            for color in [Color::Black, Color::White] {
                let at = coord(x, y);
                if is_valid_move(&board, color, at) {
                    assert!(
                        apply_move(&board, color, at, MoveParams::STANDARD).is_ok(),
                        "valid move failed to apply at ({x}, {y})"
                    );
                }
            }
        }
    }
}

#[test]
fn test_ko_marker_and_annotations_ignored_for_state() {
    let cursor = end_of_main_line(
        "(;SZ[9];B[ba]C[first]GB[1];W[aa]KO[]BM[2];B[ab]TE[1]BL[55.5]OB[3])",
    );
    let board = cursor.board();
    assert_eq!(board.stone_at(coord(0, 0)), None);
    assert_eq!(board.captures(Color::Black), 1);
}

#[test]
fn test_handicap_game_setup() {
    let board = BoardState::from_root(&root_node(
        "(;FF[4]GM[1]SZ[19]HA[2]KM[0.5]AB[pd][dp]PL[W])",
    ));
    assert_eq!(board.stone_at(coord(15, 3)), Some(Color::Black));
    assert_eq!(board.stone_at(coord(3, 15)), Some(Color::Black));
    assert_eq!(board.player_turn(), Color::White);
    assert_eq!(board.move_number(), 0);
    assert_eq!(board.game_info().handicap, Some(2));
    assert_eq!(board.game_info().komi, Some(0.5));
}

#[test]
fn test_marks_are_per_node() {
    let mut cursor = Cursor::new(root_node("(;SZ[9]TR[aa]LB[bb:A];B[cc]CR[dd])"));
    assert_eq!(cursor.board().at(coord(0, 0)).unwrap().mark, Some(goatee::MarkKind::Triangle));
    assert_eq!(cursor.board().labels().len(), 1);
    cursor.descend(0).unwrap();
    let board = cursor.board();
    assert_eq!(board.at(coord(0, 0)).unwrap().mark, None);
    assert_eq!(board.at(coord(3, 3)).unwrap().mark, Some(goatee::MarkKind::Circle));
    assert!(board.labels().is_empty());
}

#[test]
fn test_dimming_inherits_until_reset() {
    let mut cursor = Cursor::new(root_node("(;SZ[9]DD[aa];B[cc];W[dd]DD[])"));
    cursor.descend(0).unwrap();
    assert!(cursor.board().at(coord(0, 0)).unwrap().dimmed);
    cursor.descend(0).unwrap();
    assert!(!cursor.board().has_dimmed());
    assert!(!cursor.board().at(coord(0, 0)).unwrap().dimmed);
}

#[test]
fn test_board_display_diagram() {
    let board = BoardState::from_root(&root_node("(;SZ[5]AB[aa]AW[ba])"));
    let diagram = board.to_string();
    let first_line = diagram.lines().next().unwrap();
    assert_eq!(first_line.trim_end(), "X O . . .");
}

#[test]
fn test_game_info_accumulates_along_path() {
    let mut cursor = Cursor::new(root_node("(;SZ[9]PB[Honinbo];B[aa];W[bb]RE[W+2.5])"));
    assert!(cursor.board().game_info().result.is_none());
    cursor.descend(0).unwrap();
    cursor.descend(0).unwrap();
    let info = cursor.board().game_info();
    assert_eq!(info.black_player.as_ref().unwrap().as_str(), "Honinbo");
    assert!(info.result.is_some());
}
