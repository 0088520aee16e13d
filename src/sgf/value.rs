//! Per-kind value parsers and renderers for property payloads.
//!
//! Each payload kind comes as a pair: a strict parser from the raw
//! bracketed text and a renderer back to it. Parsers return a message on
//! failure; the grammar layer attaches the byte offset and context.

use super::text;
use super::types::{
    Arrow, BoardSize, Color, Coord, CoordList, CoordSpan, Double, GameResult, Label, Line,
    Move, Ruleset, SimpleText, Text, VariationMode, WinReason,
};

fn letter_to_index(c: char) -> Option<u8> {
    match c {
        'a'..='z' => Some(c as u8 - b'a'),
        'A'..='Z' => Some(c as u8 - b'A' + 26),
        _ => None,
    }
}

fn index_to_letter(i: u8) -> char {
    if i < 26 {
        (b'a' + i) as char
    } else {
        (b'A' + i - 26) as char
    }
}

pub(crate) fn parse_coord(s: &str) -> Result<Coord, String> {
    let mut chars = s.chars();
    let (a, b) = match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => (a, b),
        _ => return Err(format!("expected a two-letter point, found {s:?}")),
    };
    let x = letter_to_index(a).ok_or_else(|| format!("invalid point letter {a:?}"))?;
    let y = letter_to_index(b).ok_or_else(|| format!("invalid point letter {b:?}"))?;
    Coord::new(x, y).ok_or_else(|| format!("point {s:?} out of range"))
}

pub(crate) fn render_coord(c: Coord) -> String {
    let mut s = String::with_capacity(2);
    s.push(index_to_letter(c.x()));
    s.push(index_to_letter(c.y()));
    s
}

/// The empty value is a pass, anything else a point. `tt` comes through
/// as the point (19, 19) — board size is unknown at this layer, so the
/// board engine decides whether that is an FF[3] pass when the recorded
/// move is applied.
pub(crate) fn parse_move(raw: &str) -> Result<Move, String> {
    if raw.is_empty() {
        Ok(Move::Pass)
    } else {
        parse_coord(raw).map(Move::Play)
    }
}

pub(crate) fn render_move(m: Move) -> String {
    match m {
        Move::Pass => String::new(),
        Move::Play(c) => render_coord(c),
    }
}

fn parse_span(raw: &str) -> Result<CoordSpan, String> {
    match text::split_composed(raw) {
        Some((a, b)) => Ok(CoordSpan::rect(parse_coord(a)?, parse_coord(b)?)),
        None => Ok(CoordSpan::Single(parse_coord(raw)?)),
    }
}

pub(crate) fn render_span(span: CoordSpan) -> String {
    match span {
        CoordSpan::Single(c) => render_coord(c),
        CoordSpan::Rect(a, b) => format!("{}:{}", render_coord(a), render_coord(b)),
    }
}

/// A point list: one point or rectangle per bracketed value, at least one.
pub(crate) fn parse_point_list(values: &[&str]) -> Result<CoordList, String> {
    let mut spans = Vec::with_capacity(values.len());
    for raw in values {
        if raw.is_empty() {
            return Err("empty value in point list".to_string());
        }
        spans.push(parse_span(raw)?);
    }
    Ok(CoordList::new(spans))
}

/// A point elist: like a point list, except a lone `[]` is the empty
/// list (whole board / clear inherited state).
pub(crate) fn parse_point_elist(values: &[&str]) -> Result<CoordList, String> {
    if let [""] = values {
        return Ok(CoordList::default());
    }
    parse_point_list(values)
}

pub(crate) fn parse_integral(s: &str) -> Result<i32, String> {
    s.parse::<i32>()
        .map_err(|_| format!("invalid number {s:?}"))
}

pub(crate) fn parse_real(s: &str) -> Result<f64, String> {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let well_formed = body.chars().any(|c| c.is_ascii_digit())
        && body.chars().all(|c| c.is_ascii_digit() || c == '.')
        && body.chars().filter(|&c| c == '.').count() <= 1;
    if !well_formed {
        return Err(format!("invalid real value {s:?}"));
    }
    s.parse::<f64>()
        .map_err(|_| format!("invalid real value {s:?}"))
}

/// Renders a real, or `None` when the value is not finite.
pub(crate) fn render_real(v: f64) -> Option<String> {
    v.is_finite().then(|| format!("{v}"))
}

pub(crate) fn parse_double(s: &str) -> Result<Double, String> {
    match s {
        "1" => Ok(Double::Normal),
        "2" => Ok(Double::Emphasized),
        _ => Err(format!("expected 1 or 2, found {s:?}")),
    }
}

pub(crate) fn render_double(d: Double) -> String {
    match d {
        Double::Normal => "1".to_string(),
        Double::Emphasized => "2".to_string(),
    }
}

pub(crate) fn parse_color(s: &str) -> Result<Color, String> {
    match s {
        "B" => Ok(Color::Black),
        "W" => Ok(Color::White),
        _ => Err(format!("expected B or W, found {s:?}")),
    }
}

pub(crate) fn render_color(c: Color) -> String {
    match c {
        Color::Black => "B".to_string(),
        Color::White => "W".to_string(),
    }
}

pub(crate) fn parse_text(raw: &str) -> Text {
    Text::new(text::decode_text(raw))
}

pub(crate) fn parse_simple_text(raw: &str) -> SimpleText {
    SimpleText::new(text::decode_simple_text(raw))
}

pub(crate) fn parse_game_result(raw: &str) -> Result<GameResult, String> {
    let decoded = text::decode_simple_text(raw);
    match decoded.as_str() {
        "0" | "Draw" => return Ok(GameResult::Draw),
        "Void" => return Ok(GameResult::Void),
        "?" => return Ok(GameResult::Unknown),
        _ => {}
    }
    let (winner, margin) = match decoded.split_once('+') {
        Some(("B", rest)) => (Color::Black, rest),
        Some(("W", rest)) => (Color::White, rest),
        _ => return Err(format!("invalid game result {decoded:?}")),
    };
    let reason = match margin {
        "" => WinReason::Unspecified,
        "R" | "Resign" => WinReason::Resignation,
        "T" | "Time" => WinReason::Time,
        "F" | "Forfeit" => WinReason::Forfeit,
        score => WinReason::Score(parse_real(score)?),
    };
    Ok(GameResult::Win(winner, reason))
}

/// Renders a game result, or `None` for a non-finite score margin.
pub(crate) fn render_game_result(r: GameResult) -> Option<String> {
    Some(match r {
        GameResult::Draw => "Draw".to_string(),
        GameResult::Void => "Void".to_string(),
        GameResult::Unknown => "?".to_string(),
        GameResult::Win(color, reason) => {
            let side = render_color(color);
            match reason {
                WinReason::Score(s) => format!("{side}+{}", render_real(s)?),
                WinReason::Resignation => format!("{side}+Resign"),
                WinReason::Time => format!("{side}+Time"),
                WinReason::Forfeit => format!("{side}+Forfeit"),
                WinReason::Unspecified => format!("{side}+"),
            }
        }
    })
}

pub(crate) fn parse_ruleset(raw: &str) -> Ruleset {
    let decoded = text::decode_simple_text(raw);
    match decoded.as_str() {
        "AGA" => Ruleset::Aga,
        "GOE" => Ruleset::Goe,
        "Japanese" => Ruleset::Japanese,
        "NZ" => Ruleset::NewZealand,
        _ => Ruleset::Other(decoded),
    }
}

pub(crate) fn render_ruleset(r: &Ruleset) -> String {
    match r {
        Ruleset::Aga => "AGA".to_string(),
        Ruleset::Goe => "GOE".to_string(),
        Ruleset::Japanese => "Japanese".to_string(),
        Ruleset::NewZealand => "NZ".to_string(),
        Ruleset::Other(s) => text::escape_value(s, false),
    }
}

pub(crate) fn parse_size(raw: &str) -> Result<BoardSize, String> {
    let parse_axis = |s: &str| {
        s.parse::<u8>()
            .map_err(|_| format!("invalid board size {raw:?}"))
    };
    let (w, h) = match text::split_composed(raw) {
        Some((w, h)) => (parse_axis(w)?, parse_axis(h)?),
        None => {
            let n = parse_axis(raw)?;
            (n, n)
        }
    };
    BoardSize::new(w, h).ok_or_else(|| format!("board size {raw:?} out of range"))
}

pub(crate) fn render_size(s: BoardSize) -> String {
    if s.width() == s.height() {
        format!("{}", s.width())
    } else {
        format!("{}:{}", s.width(), s.height())
    }
}

pub(crate) fn parse_variation_mode(s: &str) -> Result<VariationMode, String> {
    let code = s
        .parse::<u8>()
        .map_err(|_| format!("invalid variation mode {s:?}"))?;
    VariationMode::from_code(code).ok_or_else(|| format!("variation mode {code} out of range"))
}

pub(crate) fn render_variation_mode(m: VariationMode) -> String {
    format!("{}", m.code())
}

pub(crate) fn parse_app(raw: &str) -> Result<(SimpleText, SimpleText), String> {
    let (name, version) = text::split_composed(raw)
        .ok_or_else(|| "expected name:version".to_string())?;
    Ok((
        SimpleText::new(text::decode_simple_text(name)),
        SimpleText::new(text::decode_simple_text(version)),
    ))
}

fn parse_coord_pair(raw: &str) -> Result<(Coord, Coord), String> {
    let (a, b) = text::split_composed(raw)
        .ok_or_else(|| format!("expected point:point, found {raw:?}"))?;
    Ok((parse_coord(a)?, parse_coord(b)?))
}

pub(crate) fn parse_arrows(values: &[&str]) -> Result<Vec<Arrow>, String> {
    values
        .iter()
        .map(|raw| {
            let (from, to) = parse_coord_pair(raw)?;
            Ok(Arrow { from, to })
        })
        .collect()
}

pub(crate) fn parse_lines(values: &[&str]) -> Result<Vec<Line>, String> {
    values
        .iter()
        .map(|raw| {
            let (a, b) = parse_coord_pair(raw)?;
            Ok(Line { a, b })
        })
        .collect()
}

pub(crate) fn parse_labels(values: &[&str]) -> Result<Vec<Label>, String> {
    values
        .iter()
        .map(|raw| {
            let (coord, label) = text::split_composed(raw)
                .ok_or_else(|| format!("expected point:text, found {raw:?}"))?;
            Ok(Label {
                coord: parse_coord(coord)?,
                text: SimpleText::new(text::decode_simple_text(label)),
            })
        })
        .collect()
}

pub(crate) fn render_arrow(a: Arrow) -> String {
    format!("{}:{}", render_coord(a.from), render_coord(a.to))
}

pub(crate) fn render_line(l: Line) -> String {
    format!("{}:{}", render_coord(l.a), render_coord(l.b))
}

pub(crate) fn render_label(l: &Label) -> String {
    format!(
        "{}:{}",
        render_coord(l.coord),
        text::escape_value(l.text.as_str(), true)
    )
}
