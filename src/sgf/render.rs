//! Rendering a collection back to SGF text.
//!
//! Output is compact: no whitespace between tokens. Within a node,
//! properties are emitted root first, then game info, setup, moves, node
//! and move annotations, markup, timing, and everything else; the
//! original order is kept inside each group. Setup properties drop
//! coordinates already claimed by an earlier setup property of the same
//! node.

use std::collections::HashSet;

use tracing::instrument;

use super::error::RenderError;
use super::property::{Property, PropertyCategory};
use super::text;
use super::tree::{Collection, Node};
use super::types::{Coord, CoordList, CoordSpan, GameResult, WinReason};
use super::value;

/// Renders a collection to SGF text.
#[instrument(skip(collection))]
pub fn render_collection(collection: &Collection) -> Result<String, RenderError> {
    let mut out = String::new();
    for tree in collection.trees() {
        render_tree(tree, &mut out)?;
    }
    Ok(out)
}

fn render_tree(root: &Node, out: &mut String) -> Result<(), RenderError> {
    out.push('(');
    let mut node = root;
    loop {
        render_node(node, out)?;
        match node.children.as_slice() {
            [only] => node = only,
            _ => break,
        }
    }
    for child in &node.children {
        render_tree(child, out)?;
    }
    out.push(')');
    Ok(())
}

fn render_node(node: &Node, out: &mut String) -> Result<(), RenderError> {
    out.push(';');
    let mut props: Vec<&Property> = node.properties.iter().collect();
    props.sort_by_key(|p| render_rank(p));
    let mut seen_setup: HashSet<Coord> = HashSet::new();
    for p in props {
        render_property(p, &mut seen_setup, out)?;
    }
    Ok(())
}

fn render_rank(p: &Property) -> u8 {
    if matches!(p.ident(), "BL" | "OB" | "OW" | "WL") {
        return 7;
    }
    match p.category() {
        PropertyCategory::Root => 0,
        PropertyCategory::GameInfo => 1,
        PropertyCategory::Setup => 2,
        PropertyCategory::Move => 3,
        PropertyCategory::NodeAnnotation => 4,
        PropertyCategory::MoveAnnotation => 5,
        PropertyCategory::Markup | PropertyCategory::Inherited => 6,
        PropertyCategory::Other => 8,
    }
}

/// Filters a setup list against coordinates already emitted for this
/// node. A rectangle is kept whole unless a duplicate falls inside it, in
/// which case it is expanded to its surviving single points.
fn dedup_setup(list: &CoordList, seen: &mut HashSet<Coord>) -> Vec<CoordSpan> {
    let mut spans = Vec::new();
    for span in list.spans() {
        let coords = span.coords();
        let fresh: Vec<Coord> = coords.iter().copied().filter(|c| !seen.contains(c)).collect();
        if fresh.len() == coords.len() {
            spans.push(*span);
        } else {
            spans.extend(fresh.iter().copied().map(CoordSpan::Single));
        }
        seen.extend(coords);
    }
    spans
}

fn emit(ident: &str, values: &[String], out: &mut String) {
    out.push_str(ident);
    for v in values {
        out.push('[');
        out.push_str(v);
        out.push(']');
    }
}

fn point_list_values(list: &CoordList) -> Vec<String> {
    list.spans().iter().copied().map(value::render_span).collect()
}

fn render_property(
    p: &Property,
    seen_setup: &mut HashSet<Coord>,
    out: &mut String,
) -> Result<(), RenderError> {
    use Property::*;

    // Setup lists are deduplicated against the node's earlier setup
    // properties before anything is emitted.
    if let AB(list) | AW(list) | AE(list) = p {
        let spans = dedup_setup(list, seen_setup);
        if spans.is_empty() {
            if matches!(p, AE(_)) && list.is_empty() {
                emit(p.ident(), &[String::new()], out);
            }
            return Ok(());
        }
        let values: Vec<String> = spans.into_iter().map(value::render_span).collect();
        emit(p.ident(), &values, out);
        return Ok(());
    }

    let ident = p.ident();
    let non_finite = |v: f64| RenderError::NonFiniteReal(ident.to_string(), v);
    let values: Vec<String> = match p {
        B(m) | W(m) => vec![value::render_move(*m)],
        KO | DO | IT => vec![String::new()],
        MN(n) | FF(n) | GM(n) | HA(n) | OB(n) | OW(n) => vec![n.to_string()],
        PL(c) => vec![value::render_color(*c)],
        C(t) | GC(t) => vec![text::escape_value(t.as_str(), false)],
        N(t) | CA(t) | AN(t) | BR(t) | BT(t) | CP(t) | DT(t) | EV(t) | GN(t) | ON(t)
        | OT(t) | PB(t) | PC(t) | PW(t) | RO(t) | SO(t) | US(t) | WR(t) => {
            vec![text::escape_value(t.as_str(), false)]
        }
        DM(d) | GB(d) | GW(d) | HO(d) | UC(d) | BM(d) | TE(d) => {
            vec![value::render_double(*d)]
        }
        V(v) | TM(v) | BL(v) | WL(v) | KM(v) => {
            vec![value::render_real(*v).ok_or_else(|| non_finite(*v))?]
        }
        RE(r) => {
            let rendered = value::render_game_result(*r).ok_or_else(|| {
                let v = match r {
                    GameResult::Win(_, WinReason::Score(s)) => *s,
                    _ => f64::NAN,
                };
                non_finite(v)
            })?;
            vec![rendered]
        }
        RU(r) => vec![value::render_ruleset(r)],
        ST(m) => vec![value::render_variation_mode(*m)],
        SZ(s) => vec![value::render_size(*s)],
        AP(name, version) => vec![format!(
            "{}:{}",
            text::escape_value(name.as_str(), true),
            text::escape_value(version.as_str(), true)
        )],
        CR(l) | MA(l) | SL(l) | SQ(l) | TR(l) => {
            if l.is_empty() {
                return Ok(());
            }
            point_list_values(l)
        }
        DD(l) | VW(l) | TB(l) | TW(l) => {
            if l.is_empty() {
                vec![String::new()]
            } else {
                point_list_values(l)
            }
        }
        AR(v) => {
            if v.is_empty() {
                return Ok(());
            }
            v.iter().copied().map(value::render_arrow).collect()
        }
        LN(v) => {
            if v.is_empty() {
                return Ok(());
            }
            v.iter().copied().map(value::render_line).collect()
        }
        LB(v) => {
            if v.is_empty() {
                return Ok(());
            }
            v.iter().map(value::render_label).collect()
        }
        Unknown(name, raw) => {
            if name.is_empty()
                || name.len() > 4
                || !name.bytes().all(|b| b.is_ascii_uppercase())
            {
                return Err(RenderError::BadIdentifier(name.clone()));
            }
            if raw.is_empty() {
                vec![String::new()]
            } else {
                raw.clone()
            }
        }
        AB(_) | AW(_) | AE(_) => return Ok(()),
    };
    emit(ident, &values, out);
    Ok(())
}
