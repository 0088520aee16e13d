//! Tests for the tree cursor: navigation, editing, and reconciliation.

use goatee::{
    parse_collection, BoardState, Color, Coord, Cursor, CursorError, MoveError, Move, Node,
    Property, Text,
};

fn coord(x: u8, y: u8) -> Coord {
    Coord::new(x, y).unwrap()
}

fn root_node(input: &str) -> Node {
    parse_collection(input).unwrap().into_trees().remove(0)
}

#[test]
fn test_root_cursor_board_matches_root_board_state() {
    let root = root_node("(;SZ[13]AB[dd]PL[W])");
    let expected = BoardState::from_root(&root);
    let cursor = Cursor::new(root);
    assert_eq!(cursor.board(), &expected);
    assert!(cursor.is_root());
    assert_eq!(cursor.depth(), 0);
    assert_eq!(cursor.child_index(), None);
}

#[test]
fn test_navigation_down_and_up_preserves_tree() {
    let root = root_node("(;SZ[9];B[aa](;W[bb];B[cc])(;W[dd]))");
    let original = root.clone();
    let mut cursor = Cursor::new(root);
    cursor.descend(0).unwrap();
    cursor.descend(1).unwrap();
    assert_eq!(cursor.depth(), 2);
    cursor.to_root();
    assert_eq!(cursor.node(), &original);
}

#[test]
fn test_boards_recompute_on_descend() {
    let mut cursor = Cursor::new(root_node("(;SZ[9];B[aa];W[bb];B[cc])"));
    let mut expected_moves = 0;
    loop {
        assert_eq!(cursor.board().move_number(), expected_moves);
        if cursor.descend(0).is_err() {
            break;
        }
        expected_moves += 1;
    }
    assert_eq!(expected_moves, 3);
    // Walking back up restores the cached ancestor boards.
    cursor.ascend().unwrap();
    assert_eq!(cursor.board().move_number(), 2);
    cursor.to_root();
    assert_eq!(cursor.board().move_number(), 0);
}

#[test]
fn test_modify_then_root_rebuilds_spine() {
    let root = root_node("(;SZ[9];B[aa];W[bb];B[cc])");
    let original = root.clone();
    let mut cursor = Cursor::new(root);
    cursor.descend(0).unwrap();
    cursor.descend(0).unwrap();
    cursor.descend(0).unwrap();
    cursor.modify_node(|node| {
        node.add_property(Property::C(Text::new("turning point")));
    });
    let new_root = cursor.into_root();

    // The original tree is untouched; the new one differs only at the
    // modified grandchild.
    assert!(!original.children[0].children[0].children[0].has_property("C"));
    let modified = &new_root.children[0].children[0].children[0];
    assert!(modified.has_property("C"));
    assert_eq!(new_root.properties, original.properties);
    assert_eq!(
        new_root.children[0].properties,
        original.children[0].properties
    );
}

#[test]
fn test_modify_node_recomputes_board() {
    let mut cursor = Cursor::new(root_node("(;SZ[9];B[aa])"));
    cursor.descend(0).unwrap();
    assert_eq!(cursor.board().stone_at(coord(5, 5)), None);
    cursor.modify_node(|node| {
        node.add_property(Property::AW(goatee::CoordList::from_coords([coord(5, 5)])));
    });
    assert_eq!(cursor.board().stone_at(coord(5, 5)), Some(Color::White));
    assert_eq!(cursor.board().stone_at(coord(0, 0)), Some(Color::Black));
}

#[test]
fn test_sibling_edits_are_preserved() {
    // Modify one variation, then visit its sibling and come back up: the
    // edit must survive reconciliation.
    let mut cursor = Cursor::new(root_node("(;SZ[9];B[aa](;W[bb])(;W[cc]))"));
    cursor.descend(0).unwrap();
    cursor.descend(0).unwrap();
    cursor.modify_node(|node| node.add_property(Property::N("main".into())));
    cursor.next_sibling().unwrap();
    let root = cursor.into_root();
    assert!(root.children[0].children[0].has_property("N"));
    assert!(!root.children[0].children[1].has_property("N"));
}

#[test]
fn test_child_playing_at_honors_turn() {
    let mut cursor = Cursor::new(root_node("(;SZ[9];B[aa](;W[bb])(;W[cc])(;W[]))"));
    cursor.descend(0).unwrap();
    // White to move: the children play bb, cc, and a pass.
    assert_eq!(cursor.child_playing_at(Move::Play(coord(2, 2))), Some(1));
    assert_eq!(cursor.child_playing_at(Move::Pass), Some(2));
    assert_eq!(cursor.child_playing_at(Move::Play(coord(8, 8))), None);
    // A black move never matches while White is to move.
    assert_eq!(cursor.child_playing_at(Move::Play(coord(0, 0))), None);
}

#[test]
fn test_play_navigates_to_existing_child() {
    let mut cursor = Cursor::new(root_node("(;SZ[9];B[aa];W[bb])"));
    cursor.descend(0).unwrap();
    cursor.play(Move::Play(coord(1, 1))).unwrap();
    assert_eq!(cursor.depth(), 2);
    assert_eq!(cursor.child_count(), 0);
    // No new variation was created.
    let root = cursor.into_root();
    assert_eq!(root.children[0].children.len(), 1);
}

#[test]
fn test_play_creates_new_child() {
    let mut cursor = Cursor::new(root_node("(;SZ[9];B[aa])"));
    cursor.descend(0).unwrap();
    cursor.play(Move::Play(coord(4, 4))).unwrap();
    assert_eq!(cursor.depth(), 2);
    assert_eq!(
        cursor.node().move_property(),
        Some((Color::White, Move::Play(coord(4, 4))))
    );
    assert_eq!(cursor.board().move_number(), 2);
    let root = cursor.into_root();
    assert_eq!(root.children[0].children.len(), 1);
}

#[test]
fn test_play_rejects_illegal_move() {
    let mut cursor = Cursor::new(root_node("(;SZ[9];B[aa])"));
    cursor.descend(0).unwrap();
    let err = cursor.play(Move::Play(coord(0, 0))).unwrap_err();
    assert_eq!(err, MoveError::Overwrite(Color::Black));
    // The cursor did not move and no child appeared.
    assert_eq!(cursor.depth(), 1);
    assert_eq!(cursor.child_count(), 0);
}

#[test]
fn test_play_pass_is_always_legal() {
    let mut cursor = Cursor::new(root_node("(;SZ[9])"));
    cursor.play(Move::Pass).unwrap();
    assert_eq!(cursor.board().move_number(), 1);
    assert_eq!(cursor.board().player_turn(), Color::White);
    assert_eq!(
        cursor.node().move_property(),
        Some((Color::Black, Move::Pass))
    );
}

#[test]
fn test_children_share_parent_state() {
    let mut cursor = Cursor::new(root_node("(;SZ[9]TR[aa];B[bb](;W[cc])(;W[dd]))"));
    cursor.descend(0).unwrap();
    let children = cursor.children();
    assert_eq!(children.len(), 2);
    // Marks from the parent are reset in every child board.
    for child in &children {
        assert!(!child.board().has_marks());
        assert_eq!(child.board().move_number(), 2);
    }
    assert_eq!(children[0].board().stone_at(coord(2, 2)), Some(Color::White));
    assert_eq!(children[1].board().stone_at(coord(3, 3)), Some(Color::White));
}

#[test]
fn test_cursor_errors() {
    let mut cursor = Cursor::new(root_node("(;SZ[9];B[aa])"));
    assert_eq!(cursor.ascend(), Err(CursorError::AtRoot));
    assert_eq!(cursor.next_sibling(), Err(CursorError::AtRoot));
    assert_eq!(cursor.descend(5), Err(CursorError::NoSuchChild(5)));
    cursor.descend(0).unwrap();
    assert_eq!(cursor.next_sibling(), Err(CursorError::NoSuchSibling));
    assert_eq!(cursor.child_index(), Some(0));
}

#[test]
fn test_independent_cursors_do_not_interfere() {
    let root = root_node("(;SZ[9];B[aa])");
    let mut a = Cursor::new(root.clone());
    let b = Cursor::new(root);
    a.descend(0).unwrap();
    a.modify_node(|node| node.add_property(Property::N("edited".into())));
    assert!(b.node().children[0].properties.len() == 1);
    assert_eq!(b.board().move_number(), 0);
}

#[test]
fn test_root_construction_helpers() {
    let mut cursor = Node::root(goatee::BoardSize::square(9).unwrap()).into_cursor();
    assert_eq!(cursor.board().width(), 9);
    cursor.play(Move::Play(coord(2, 2))).unwrap();
    let root = cursor.into_root();
    let rendered = goatee::Collection::single(root).render().unwrap();
    assert_eq!(rendered, "(;FF[4]GM[1]SZ[9];B[cc])");
}
