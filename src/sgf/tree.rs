//! The game tree: nodes, their properties, and the top-level collection.

use serde::{Deserialize, Serialize};

use super::error::{ParseError, RenderError};
use super::property::{Property, PropertyCategory};
use super::types::{BoardSize, Color, Move};

/// One position record: an ordered property list and ordered children.
///
/// Children are variations; the first child is the main line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Node {
    /// Properties attached to this node, in order.
    pub properties: Vec<Property>,
    /// Child nodes, in order.
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a node with no properties and no children.
    pub fn empty() -> Node {
        Node::default()
    }

    /// Creates a root node for a new Go game of the given size, carrying
    /// FF[4], GM[1], and SZ.
    pub fn root(size: BoardSize) -> Node {
        Node {
            properties: vec![Property::FF(4), Property::GM(1), Property::SZ(size)],
            children: Vec::new(),
        }
    }

    /// Appends a property.
    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Appends a child and returns its index.
    pub fn add_child(&mut self, child: Node) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// The first property with the given identifier, if any.
    pub fn find_property(&self, ident: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.ident() == ident)
    }

    /// Whether a property with the given identifier is present.
    pub fn has_property(&self, ident: &str) -> bool {
        self.find_property(ident).is_some()
    }

    /// The node's move, if it carries a B or W property.
    pub fn move_property(&self) -> Option<(Color, Move)> {
        self.properties.iter().find_map(|p| match p {
            Property::B(m) => Some((Color::Black, *m)),
            Property::W(m) => Some((Color::White, *m)),
            _ => None,
        })
    }

    /// True when any property here is a game-info property.
    pub fn is_game_info_node(&self) -> bool {
        self.properties
            .iter()
            .any(|p| p.category() == PropertyCategory::GameInfo)
    }
}

/// An ordered sequence of game trees with a single textual form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    trees: Vec<Node>,
}

impl Collection {
    /// Creates a collection from root nodes.
    pub fn new(trees: Vec<Node>) -> Collection {
        Collection { trees }
    }

    /// Creates a collection holding one game tree.
    pub fn single(root: Node) -> Collection {
        Collection { trees: vec![root] }
    }

    /// The game trees, in file order.
    pub fn trees(&self) -> &[Node] {
        &self.trees
    }

    /// Consumes the collection, yielding its game trees.
    pub fn into_trees(self) -> Vec<Node> {
        self.trees
    }

    /// Parses a collection from SGF text.
    pub fn parse(input: &str) -> Result<Collection, ParseError> {
        super::parser::parse_collection(input)
    }

    /// Renders the collection to SGF text.
    pub fn render(&self) -> Result<String, RenderError> {
        super::render::render_collection(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgf::types::Coord;

    #[test]
    fn test_root_node_shape() {
        let root = Node::root(BoardSize::square(9).unwrap());
        assert!(root.has_property("FF"));
        assert_eq!(root.find_property("GM"), Some(&Property::GM(1)));
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_move_property() {
        let mut node = Node::empty();
        assert_eq!(node.move_property(), None);
        node.add_property(Property::W(Move::Play(Coord::new(2, 2).unwrap())));
        assert_eq!(
            node.move_property(),
            Some((Color::White, Move::Play(Coord::new(2, 2).unwrap())))
        );
    }

    #[test]
    fn test_game_info_node_detection() {
        let mut node = Node::empty();
        node.add_property(Property::C("just a comment".into()));
        assert!(!node.is_game_info_node());
        node.add_property(Property::KM(6.5));
        assert!(node.is_game_info_node());
    }
}
