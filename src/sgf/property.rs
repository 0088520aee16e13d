//! The closed set of SGF properties and their metadata.
//!
//! Every FF[4] tag this library understands is a variant carrying its
//! typed payload. Identifiers outside the set are preserved verbatim in
//! [`Property::Unknown`] so foreign files survive a round trip.

use serde::{Deserialize, Serialize};

use super::types::{
    Arrow, BoardSize, Color, CoordList, Double, GameResult, Label, Line, Move, Ruleset,
    SimpleText, Text, VariationMode,
};
use super::value;

/// Which aspect of a node a property describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyCategory {
    /// Moves, turn bookkeeping, and per-move clock state.
    Move,
    /// Direct board edits outside the rules of play.
    Setup,
    /// Commentary on the whole position.
    NodeAnnotation,
    /// Commentary on the move that produced the position.
    MoveAnnotation,
    /// Drawings on the board.
    Markup,
    /// File-level metadata confined to the root node.
    Root,
    /// Facts about the game as a whole.
    GameInfo,
    /// State that persists into descendant nodes until overridden.
    Inherited,
    /// Everything else, unknown tags included.
    Other,
}

/// A single typed SGF property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Property {
    // Moves and turn state.
    /// Black move.
    B(Move),
    /// White move.
    W(Move),
    /// The move executed a ko; no payload.
    KO,
    /// Override the move number.
    MN(i32),

    // Setup.
    /// Place black stones.
    AB(CoordList),
    /// Place white stones.
    AW(CoordList),
    /// Clear points.
    AE(CoordList),
    /// Set the player to move.
    PL(Color),

    // Node annotation.
    /// Comment.
    C(Text),
    /// Position is even.
    DM(Double),
    /// Good for black.
    GB(Double),
    /// Good for white.
    GW(Double),
    /// Hotspot node.
    HO(Double),
    /// Node name.
    N(SimpleText),
    /// Position is unclear.
    UC(Double),
    /// Positional value estimate.
    V(f64),

    // Move annotation.
    /// Bad move.
    BM(Double),
    /// Doubtful move; no payload.
    DO,
    /// Interesting move; no payload.
    IT,
    /// Good move (tesuji).
    TE(Double),

    // Markup.
    /// Arrows between points.
    AR(Vec<Arrow>),
    /// Circle marks.
    CR(CoordList),
    /// Dim points (inherited); the empty list clears all dimming.
    DD(CoordList),
    /// Point labels.
    LB(Vec<Label>),
    /// Lines between points.
    LN(Vec<Line>),
    /// X marks.
    MA(CoordList),
    /// Selected points.
    SL(CoordList),
    /// Square marks.
    SQ(CoordList),
    /// Triangle marks.
    TR(CoordList),
    /// Visible points (inherited); the empty list makes the whole board
    /// visible.
    VW(CoordList),

    // Root.
    /// Application name and version.
    AP(SimpleText, SimpleText),
    /// Character set of the file.
    CA(SimpleText),
    /// File format version.
    FF(i32),
    /// Game type (1 = Go).
    GM(i32),
    /// Variation display policy.
    ST(VariationMode),
    /// Board size.
    SZ(BoardSize),

    // Game info.
    /// Annotator.
    AN(SimpleText),
    /// Black rank.
    BR(SimpleText),
    /// Black team.
    BT(SimpleText),
    /// Copyright notice.
    CP(SimpleText),
    /// Date(s) of the game.
    DT(SimpleText),
    /// Event name.
    EV(SimpleText),
    /// Background of the game.
    GC(Text),
    /// Game name.
    GN(SimpleText),
    /// Opening played.
    ON(SimpleText),
    /// Overtime method.
    OT(SimpleText),
    /// Black player name.
    PB(SimpleText),
    /// Place the game was played.
    PC(SimpleText),
    /// White player name.
    PW(SimpleText),
    /// Game result.
    RE(GameResult),
    /// Round information.
    RO(SimpleText),
    /// Ruleset.
    RU(Ruleset),
    /// Source of the record.
    SO(SimpleText),
    /// Time limit in seconds.
    TM(f64),
    /// User or program that entered the record.
    US(SimpleText),
    /// White rank.
    WR(SimpleText),

    // Timing.
    /// Black time left after the move, in seconds.
    BL(f64),
    /// Black moves left in the current overtime period.
    OB(i32),
    /// White moves left in the current overtime period.
    OW(i32),
    /// White time left after the move, in seconds.
    WL(f64),

    // Go-specific.
    /// Handicap stone count.
    HA(i32),
    /// Komi.
    KM(f64),
    /// Black territory.
    TB(CoordList),
    /// White territory.
    TW(CoordList),

    /// A tag outside the known set: identifier plus its raw bracketed
    /// payloads, escapes intact.
    Unknown(String, Vec<String>),
}

impl Property {
    /// The property identifier as it appears in SGF text.
    pub fn ident(&self) -> &str {
        use Property::*;
        match self {
            B(_) => "B",
            W(_) => "W",
            KO => "KO",
            MN(_) => "MN",
            AB(_) => "AB",
            AW(_) => "AW",
            AE(_) => "AE",
            PL(_) => "PL",
            C(_) => "C",
            DM(_) => "DM",
            GB(_) => "GB",
            GW(_) => "GW",
            HO(_) => "HO",
            N(_) => "N",
            UC(_) => "UC",
            V(_) => "V",
            BM(_) => "BM",
            DO => "DO",
            IT => "IT",
            TE(_) => "TE",
            AR(_) => "AR",
            CR(_) => "CR",
            DD(_) => "DD",
            LB(_) => "LB",
            LN(_) => "LN",
            MA(_) => "MA",
            SL(_) => "SL",
            SQ(_) => "SQ",
            TR(_) => "TR",
            VW(_) => "VW",
            AP(_, _) => "AP",
            CA(_) => "CA",
            FF(_) => "FF",
            GM(_) => "GM",
            ST(_) => "ST",
            SZ(_) => "SZ",
            AN(_) => "AN",
            BR(_) => "BR",
            BT(_) => "BT",
            CP(_) => "CP",
            DT(_) => "DT",
            EV(_) => "EV",
            GC(_) => "GC",
            GN(_) => "GN",
            ON(_) => "ON",
            OT(_) => "OT",
            PB(_) => "PB",
            PC(_) => "PC",
            PW(_) => "PW",
            RE(_) => "RE",
            RO(_) => "RO",
            RU(_) => "RU",
            SO(_) => "SO",
            TM(_) => "TM",
            US(_) => "US",
            WR(_) => "WR",
            BL(_) => "BL",
            OB(_) => "OB",
            OW(_) => "OW",
            WL(_) => "WL",
            HA(_) => "HA",
            KM(_) => "KM",
            TB(_) => "TB",
            TW(_) => "TW",
            Unknown(name, _) => name,
        }
    }

    /// The property's category.
    pub fn category(&self) -> PropertyCategory {
        use Property::*;
        use PropertyCategory as Cat;
        match self {
            // BL/OB/OW/WL are move-type properties in FF[4].
            B(_) | W(_) | KO | MN(_) | BL(_) | OB(_) | OW(_) | WL(_) => Cat::Move,
            AB(_) | AW(_) | AE(_) | PL(_) => Cat::Setup,
            C(_) | DM(_) | GB(_) | GW(_) | HO(_) | N(_) | UC(_) | V(_) => Cat::NodeAnnotation,
            BM(_) | DO | IT | TE(_) => Cat::MoveAnnotation,
            AR(_) | CR(_) | LB(_) | LN(_) | MA(_) | SL(_) | SQ(_) | TR(_) => Cat::Markup,
            AP(_, _) | CA(_) | FF(_) | GM(_) | ST(_) | SZ(_) => Cat::Root,
            AN(_) | BR(_) | BT(_) | CP(_) | DT(_) | EV(_) | GC(_) | GN(_) | ON(_)
            | OT(_) | PB(_) | PC(_) | PW(_) | RE(_) | RO(_) | RU(_) | SO(_) | TM(_)
            | US(_) | WR(_) | HA(_) | KM(_) => Cat::GameInfo,
            DD(_) | VW(_) => Cat::Inherited,
            TB(_) | TW(_) | Unknown(_, _) => Cat::Other,
        }
    }

    /// Whether the property's effect persists into descendant nodes.
    pub fn is_inherited(&self) -> bool {
        matches!(self, Property::DD(_) | Property::VW(_))
    }

    /// Binds an identifier and its raw bracketed payloads to a typed
    /// property, using the per-kind value parsers.
    pub(crate) fn from_ident_values(ident: &str, values: &[&str]) -> Result<Property, String> {
        use Property::*;
        let one = || single_value(ident, values);
        Ok(match ident {
            "B" => B(value::parse_move(one()?)?),
            "W" => W(value::parse_move(one()?)?),
            "KO" => {
                empty_value(ident, one()?)?;
                KO
            }
            "MN" => MN(value::parse_integral(one()?)?),
            "AB" => AB(value::parse_point_list(values)?),
            "AW" => AW(value::parse_point_list(values)?),
            "AE" => AE(value::parse_point_elist(values)?),
            "PL" => PL(value::parse_color(one()?)?),
            "C" => C(value::parse_text(one()?)),
            "DM" => DM(value::parse_double(one()?)?),
            "GB" => GB(value::parse_double(one()?)?),
            "GW" => GW(value::parse_double(one()?)?),
            "HO" => HO(value::parse_double(one()?)?),
            "N" => N(value::parse_simple_text(one()?)),
            "UC" => UC(value::parse_double(one()?)?),
            "V" => V(value::parse_real(one()?)?),
            "BM" => BM(value::parse_double(one()?)?),
            "DO" => {
                empty_value(ident, one()?)?;
                DO
            }
            "IT" => {
                empty_value(ident, one()?)?;
                IT
            }
            "TE" => TE(value::parse_double(one()?)?),
            "AR" => AR(value::parse_arrows(values)?),
            "CR" => CR(value::parse_point_list(values)?),
            "DD" => DD(value::parse_point_elist(values)?),
            "LB" => LB(value::parse_labels(values)?),
            "LN" => LN(value::parse_lines(values)?),
            "MA" => MA(value::parse_point_list(values)?),
            "SL" => SL(value::parse_point_list(values)?),
            "SQ" => SQ(value::parse_point_list(values)?),
            "TR" => TR(value::parse_point_list(values)?),
            "VW" => VW(value::parse_point_elist(values)?),
            "AP" => {
                let (name, version) = value::parse_app(one()?)?;
                AP(name, version)
            }
            "CA" => CA(value::parse_simple_text(one()?)),
            "FF" => FF(value::parse_integral(one()?)?),
            "GM" => GM(value::parse_integral(one()?)?),
            "ST" => ST(value::parse_variation_mode(one()?)?),
            "SZ" => SZ(value::parse_size(one()?)?),
            "AN" => AN(value::parse_simple_text(one()?)),
            "BR" => BR(value::parse_simple_text(one()?)),
            "BT" => BT(value::parse_simple_text(one()?)),
            "CP" => CP(value::parse_simple_text(one()?)),
            "DT" => DT(value::parse_simple_text(one()?)),
            "EV" => EV(value::parse_simple_text(one()?)),
            "GC" => GC(value::parse_text(one()?)),
            "GN" => GN(value::parse_simple_text(one()?)),
            "ON" => ON(value::parse_simple_text(one()?)),
            "OT" => OT(value::parse_simple_text(one()?)),
            "PB" => PB(value::parse_simple_text(one()?)),
            "PC" => PC(value::parse_simple_text(one()?)),
            "PW" => PW(value::parse_simple_text(one()?)),
            "RE" => RE(value::parse_game_result(one()?)?),
            "RO" => RO(value::parse_simple_text(one()?)),
            "RU" => RU(value::parse_ruleset(one()?)),
            "SO" => SO(value::parse_simple_text(one()?)),
            "TM" => TM(value::parse_real(one()?)?),
            "US" => US(value::parse_simple_text(one()?)),
            "WR" => WR(value::parse_simple_text(one()?)),
            "BL" => BL(value::parse_real(one()?)?),
            "OB" => OB(value::parse_integral(one()?)?),
            "OW" => OW(value::parse_integral(one()?)?),
            "WL" => WL(value::parse_real(one()?)?),
            "HA" => HA(value::parse_integral(one()?)?),
            "KM" => KM(value::parse_real(one()?)?),
            "TB" => TB(value::parse_point_elist(values)?),
            "TW" => TW(value::parse_point_elist(values)?),
            other => {
                if other.is_empty()
                    || other.len() > 4
                    || !other.bytes().all(|b| b.is_ascii_uppercase())
                {
                    return Err(format!("invalid property identifier {other:?}"));
                }
                Unknown(
                    other.to_string(),
                    values.iter().map(|v| v.to_string()).collect(),
                )
            }
        })
    }
}

fn single_value<'a>(ident: &str, values: &[&'a str]) -> Result<&'a str, String> {
    match values {
        [only] => Ok(only),
        _ => Err(format!(
            "property {ident} takes exactly one value, found {}",
            values.len()
        )),
    }
}

fn empty_value(ident: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        Ok(())
    } else {
        Err(format!("property {ident} takes an empty value"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgf::types::Coord;

    #[test]
    fn test_bind_known_tags() {
        let b = Property::from_ident_values("B", &["dd"]).unwrap();
        assert_eq!(b, Property::B(Move::Play(Coord::new(3, 3).unwrap())));
        assert_eq!(b.category(), PropertyCategory::Move);

        let pass = Property::from_ident_values("W", &[""]).unwrap();
        assert_eq!(pass, Property::W(Move::Pass));
    }

    #[test]
    fn test_single_value_enforced() {
        assert!(Property::from_ident_values("SZ", &["9", "13"]).is_err());
        assert!(Property::from_ident_values("KO", &["x"]).is_err());
    }

    #[test]
    fn test_unknown_preserved() {
        let p = Property::from_ident_values("ZZ", &[r"raw\]stuff", "two"]).unwrap();
        assert_eq!(
            p,
            Property::Unknown(
                "ZZ".to_string(),
                vec![r"raw\]stuff".to_string(), "two".to_string()]
            )
        );
        assert_eq!(p.ident(), "ZZ");
        assert_eq!(p.category(), PropertyCategory::Other);
    }

    #[test]
    fn test_overlong_ident_rejected() {
        assert!(Property::from_ident_values("TOOBIG", &["x"]).is_err());
    }

    #[test]
    fn test_inherited_flags() {
        let dd = Property::from_ident_values("DD", &[""]).unwrap();
        assert!(dd.is_inherited());
        assert_eq!(dd.category(), PropertyCategory::Inherited);
        let tr = Property::from_ident_values("TR", &["aa"]).unwrap();
        assert!(!tr.is_inherited());
    }
}
