//! The SGF grammar.
//!
//! Parsing runs in two phases. The nom grammar first cuts the input into
//! raw trees, nodes, and properties whose payloads are still escaped
//! slices of the source. The binding phase then looks each identifier up
//! in the property table and runs the matching value parser, so every
//! error can point back at a byte offset in the original input.
//!
//! ```text
//! Collection = WS GameTree+ WS
//! GameTree   = '(' WS Sequence GameTree* WS ')'
//! Sequence   = Node+
//! Node       = ';' WS Property*
//! Property   = Ident PropValue+
//! PropValue  = '[' EscapedText ']'
//! ```

use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::all_consuming,
    error::{context, ContextError, ErrorKind, ParseError as _, VerboseError, VerboseErrorKind},
    multi::{many0, many1},
    sequence::preceded,
    Err as NomErr, IResult, Offset,
};
use tracing::instrument;

use super::error::ParseError;
use super::property::Property;
use super::tree::{Collection, Node};

type Input<'a> = &'a str;
type PResult<'a, T> = IResult<Input<'a>, T, VerboseError<Input<'a>>>;

#[derive(Debug)]
struct RawTree<'a> {
    nodes: Vec<RawNode<'a>>,
    subtrees: Vec<RawTree<'a>>,
}

#[derive(Debug)]
struct RawNode<'a> {
    props: Vec<RawProp<'a>>,
}

#[derive(Debug)]
struct RawProp<'a> {
    ident: Input<'a>,
    values: Vec<Input<'a>>,
}

fn ws(i: Input) -> PResult<Input> {
    take_while(char::is_whitespace)(i)
}

fn prop_ident(i: Input) -> PResult<Input> {
    take_while1(|c: char| c.is_ascii_uppercase())(i)
}

/// One bracketed payload. Returns the raw inner slice with escapes
/// intact; `\` hides the following byte from the closing-bracket scan.
fn prop_value(i: Input) -> PResult<Input> {
    let (rest, _) = char('[')(i)?;
    let bytes = rest.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b']' => return Ok((&rest[idx + 1..], &rest[..idx])),
            _ => idx += 1,
        }
    }
    Err(NomErr::Failure(VerboseError::add_context(
        i,
        "unclosed property value",
        VerboseError::from_error_kind(i, ErrorKind::TakeUntil),
    )))
}

fn raw_property(i: Input) -> PResult<RawProp<'_>> {
    let (i, ident) = preceded(ws, prop_ident)(i)?;
    let (i, values) = context("property", many1(preceded(ws, prop_value)))(i)?;
    Ok((i, RawProp { ident, values }))
}

fn raw_node(i: Input) -> PResult<RawNode<'_>> {
    let (i, _) = preceded(ws, char(';'))(i)?;
    let (i, props) = context("node", many0(raw_property))(i)?;
    Ok((i, RawNode { props }))
}

fn raw_tree<'a>(i: Input<'a>) -> PResult<'a, RawTree<'a>> {
    context("game tree", |i: Input<'a>| {
        let (i, _) = preceded(ws, char('('))(i)?;
        let (i, nodes) = many1(raw_node)(i)?;
        let (i, subtrees) = many0(raw_tree)(i)?;
        let (i, _) = preceded(ws, char(')'))(i)?;
        Ok((i, RawTree { nodes, subtrees }))
    })(i)
}

fn raw_collection(i: Input) -> PResult<Vec<RawTree<'_>>> {
    let (i, trees) = context("collection", many1(raw_tree))(i)?;
    let (i, _) = ws(i)?;
    Ok((i, trees))
}

/// Parses an SGF collection from text.
///
/// Unknown identifiers are accepted and preserved; a malformed payload of
/// a known property fails the whole collection.
#[instrument(skip(input), fields(len = input.len()))]
pub fn parse_collection(input: &str) -> Result<Collection, ParseError> {
    let (_, raw) =
        all_consuming(raw_collection)(input).map_err(|e| convert_error(input, e))?;
    let trees = raw
        .iter()
        .map(|t| bind_sequence(input, &t.nodes, &t.subtrees))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Collection::new(trees))
}

/// Parses an SGF collection from bytes. The input must be valid UTF-8.
pub fn parse_collection_bytes(input: &[u8]) -> Result<Collection, ParseError> {
    let text = std::str::from_utf8(input)
        .map_err(|e| ParseError::new(e.valid_up_to(), "input is not valid UTF-8"))?;
    parse_collection(text)
}

/// Rebuilds a tree from a raw sequence: the first node owns the rest of
/// the sequence as a single-child chain, and the final node of the chain
/// owns the subtrees as variations.
fn bind_sequence<'a>(
    src: &'a str,
    nodes: &[RawNode<'a>],
    subtrees: &[RawTree<'a>],
) -> Result<Node, ParseError> {
    let (first, rest) = match nodes.split_first() {
        Some(split) => split,
        None => return Err(ParseError::new(0, "empty sequence in game tree")),
    };
    let mut node = bind_node(src, first)?;
    if rest.is_empty() {
        node.children = subtrees
            .iter()
            .map(|t| bind_sequence(src, &t.nodes, &t.subtrees))
            .collect::<Result<Vec<_>, _>>()?;
    } else {
        node.children = vec![bind_sequence(src, rest, subtrees)?];
    }
    Ok(node)
}

fn bind_node<'a>(src: &'a str, raw: &RawNode<'a>) -> Result<Node, ParseError> {
    let mut node = Node::default();
    for p in &raw.props {
        let prop = Property::from_ident_values(p.ident, &p.values).map_err(|message| {
            ParseError::new(src.offset(&p.ident), message)
                .pushed(&format!("property {}", p.ident))
                .pushed("node")
        })?;
        node.properties.push(prop);
    }
    Ok(node)
}

fn convert_error<'a>(src: &'a str, err: NomErr<VerboseError<Input<'a>>>) -> ParseError {
    match err {
        NomErr::Incomplete(_) => ParseError::new(src.len(), "unexpected end of input"),
        NomErr::Error(e) | NomErr::Failure(e) => {
            let mut out = match e.errors.first() {
                None => ParseError::new(src.len(), "invalid SGF"),
                Some((at, kind)) => {
                    let message = match kind {
                        VerboseErrorKind::Char(c) => format!("expected {c:?}"),
                        VerboseErrorKind::Context(c) => format!("expected {c}"),
                        VerboseErrorKind::Nom(k) => format!("invalid {}", k.description()),
                    };
                    ParseError::new(src.offset(at), message)
                }
            };
            for (_, kind) in &e.errors {
                if let VerboseErrorKind::Context(c) = kind {
                    out.trail.push((*c).to_string());
                }
            }
            out
        }
    }
}
