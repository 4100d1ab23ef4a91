//! Shared value types: player colors, moves, piece type names and the tag
//! bitsets carried by pieces and board cells.

use std::fmt;
use std::ops::BitOr;

use crate::game_state::coord::Coord;

pub const WHITE: &str = "white";
pub const BLACK: &str = "black";

pub const PAWN: &str = "Pawn";
pub const KNIGHT: &str = "Knight";
pub const BISHOP: &str = "Bishop";
pub const ROOK: &str = "Rook";
pub const QUEEN: &str = "Queen";
pub const KING: &str = "King";

/// Type-name comparison used everywhere in the engine. Names are matched
/// case-insensitively so content-authored names like "knight" resolve.
#[inline]
pub fn same_type(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Player identifier. An open, lowercase string rather than a fixed enum so
/// more than two factions can own pieces; turn order alternates white/black.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(String);

impl Color {
    pub fn new(name: &str) -> Self {
        Color(name.to_ascii_lowercase())
    }

    pub fn white() -> Self {
        Color(WHITE.to_owned())
    }

    pub fn black() -> Self {
        Color(BLACK.to_owned())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_white(&self) -> bool {
        self.0 == WHITE
    }

    /// White maps to black; every other owner maps to white.
    pub fn opposite(&self) -> Color {
        if self.is_white() {
            Color::black()
        } else {
            Color::white()
        }
    }

    /// Rank direction pawns of this owner advance in.
    #[inline]
    pub fn forward(&self) -> i32 {
        if self.is_white() {
            1
        } else {
            -1
        }
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color::new(name)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A from/to cell pair, optionally tagged with the type the piece acted as.
///
/// The `as_type` tag is set by the mimic rule. Special-move side effects
/// recognise castling and en passant from the geometry of from/to, with the
/// tag only deciding which piece type is considered to have moved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    from: Coord,
    to: Coord,
    as_type: Option<String>,
}

impl Move {
    #[inline]
    pub fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            as_type: None,
        }
    }

    pub fn with_as_type(mut self, type_name: impl Into<String>) -> Self {
        self.as_type = Some(type_name.into());
        self
    }

    #[inline]
    pub fn from(&self) -> Coord {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Coord {
        self.to
    }

    #[inline]
    pub fn as_type(&self) -> Option<&str> {
        self.as_type.as_deref()
    }

    #[inline]
    pub fn delta(&self) -> Coord {
        self.to - self.from
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)?;
        if let Some(as_type) = &self.as_type {
            write!(f, " as {as_type}")?;
        }
        Ok(())
    }
}

macro_rules! tag_bitset {
    ($name:ident) => {
        impl $name {
            pub const NONE: $name = $name(0);

            #[inline]
            pub const fn from_bits(bits: u32) -> Self {
                $name(bits)
            }

            #[inline]
            pub const fn bits(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn contains(self, other: $name) -> bool {
                self.0 & other.0 == other.0
            }

            #[inline]
            pub const fn with(self, other: $name) -> Self {
                $name(self.0 | other.0)
            }

            #[inline]
            pub const fn without(self, other: $name) -> Self {
                $name(self.0 & !other.0)
            }

            #[inline]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl BitOr for $name {
            type Output = $name;

            #[inline]
            fn bitor(self, rhs: $name) -> $name {
                self.with(rhs)
            }
        }
    };
}

/// Capability/identity flags of a piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceTags(u32);

tag_bitset!(PieceTags);

impl PieceTags {
    /// Losing every royal piece loses the game.
    pub const ROYAL: PieceTags = PieceTags(1 << 0);
    /// Placed during play rather than in the starting layout.
    pub const SUMMONED: PieceTags = PieceTags(1 << 1);
    /// Produced by merging two piece types.
    pub const FUSED: PieceTags = PieceTags(1 << 2);
    /// Copies the effective type of the last move.
    pub const MIMIC: PieceTags = PieceTags(1 << 3);
}

/// Decorative or mechanical markers on board cells. Move generation ignores them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellTags(u32);

tag_bitset!(CellTags);

impl CellTags {
    pub const HIGHLIGHT: CellTags = CellTags(1 << 0);
    pub const PROMOTION_ZONE: CellTags = CellTags(1 << 1);
    pub const HAZARD: CellTags = CellTags(1 << 2);
}
