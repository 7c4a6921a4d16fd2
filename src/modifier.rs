use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::InvalidByte;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseModifierError;
impl Display for ParseModifierError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected one of `clear`, `trench`, `portal`, `reverse`, `shove`, or their glyphs `⁰`, `¹`, `²`, `³`, `⁴`"
        )?;
        Ok(())
    }
}
impl Error for ParseModifierError {}

/// A tile modifier, which is also what a card places.
///
/// `Clear` and `ShovePawn` are actions rather than lasting tile states but they
/// still have a packed code so cards and notation can refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Modifier {
    Trench,
    Portal,
    ReversePawn,
    ShovePawn,
    Clear,
}
impl Modifier {
    pub const ALL: [Self; 5] = [
        Modifier::Clear,
        Modifier::Portal,
        Modifier::Trench,
        Modifier::ReversePawn,
        Modifier::ShovePawn,
    ];

    /// Four-bit code stored in bits 5 to 8 of a packed square.
    pub fn tile_code(self) -> u8 {
        match self {
            Modifier::Trench => 0b0001,
            Modifier::Portal => 0b0010,
            Modifier::ShovePawn => 0b0101,
            Modifier::Clear => 0b0110,
            Modifier::ReversePawn => 0b0111,
        }
    }
    pub fn from_tile_code(code: u8) -> Result<Self, InvalidByte> {
        let modifier = match code {
            0b0001 => Modifier::Trench,
            0b0010 => Modifier::Portal,
            0b0101 => Modifier::ShovePawn,
            0b0110 => Modifier::Clear,
            0b0111 => Modifier::ReversePawn,
            _ => return Err(InvalidByte),
        };
        Ok(modifier)
    }
    /// Four-bit code stored in a hand.
    pub fn card_code(self) -> u8 {
        match self {
            Modifier::Clear => 1,
            Modifier::Trench => 2,
            Modifier::Portal => 3,
            Modifier::ReversePawn => 4,
            Modifier::ShovePawn => 5,
        }
    }
    pub fn from_card_code(code: u8) -> Result<Self, InvalidByte> {
        let modifier = match code {
            1 => Modifier::Clear,
            2 => Modifier::Trench,
            3 => Modifier::Portal,
            4 => Modifier::ReversePawn,
            5 => Modifier::ShovePawn,
            _ => return Err(InvalidByte),
        };
        Ok(modifier)
    }
    /// Code used by `ADD_MODIFIER_*` notation.
    pub fn notation_code(self) -> i8 {
        match self {
            Modifier::Clear => -1,
            Modifier::Trench => 0,
            Modifier::Portal => 1,
            Modifier::ReversePawn => 2,
            Modifier::ShovePawn => 3,
        }
    }
    pub fn from_notation_code(code: i8) -> Option<Self> {
        let modifier = match code {
            -1 => Modifier::Clear,
            0 => Modifier::Trench,
            1 => Modifier::Portal,
            2 => Modifier::ReversePawn,
            3 => Modifier::ShovePawn,
            _ => return None,
        };
        Some(modifier)
    }
    pub fn glyph(self) -> char {
        match self {
            Modifier::Clear => '⁰',
            Modifier::Trench => '¹',
            Modifier::Portal => '²',
            Modifier::ReversePawn => '³',
            Modifier::ShovePawn => '⁴',
        }
    }
    pub fn from_glyph(glyph: char) -> Option<Self> {
        let modifier = match glyph {
            '⁰' => Modifier::Clear,
            '¹' => Modifier::Trench,
            '²' => Modifier::Portal,
            '³' => Modifier::ReversePawn,
            '⁴' => Modifier::ShovePawn,
            _ => return None,
        };
        Some(modifier)
    }
}
impl Display for Modifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Trench => write!(f, "trench")?,
            Modifier::Portal => write!(f, "portal")?,
            Modifier::ReversePawn => write!(f, "reverse")?,
            Modifier::ShovePawn => write!(f, "shove")?,
            Modifier::Clear => write!(f, "clear")?,
        }
        Ok(())
    }
}
impl FromStr for Modifier {
    type Err = ParseModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let modifier = match s {
            "trench" => Modifier::Trench,
            "portal" => Modifier::Portal,
            "reverse" => Modifier::ReversePawn,
            "shove" => Modifier::ShovePawn,
            "clear" => Modifier::Clear,
            s => {
                let mut chars = s.chars();
                match (chars.next().and_then(Modifier::from_glyph), chars.next()) {
                    (Some(modifier), None) => modifier,
                    _ => return Err(ParseModifierError),
                }
            }
        };
        Ok(modifier)
    }
}
impl From<Modifier> for char {
    fn from(value: Modifier) -> Self {
        value.glyph()
    }
}
impl TryFrom<char> for Modifier {
    type Error = ParseModifierError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Modifier::from_glyph(value).ok_or(ParseModifierError)
    }
}
#[cfg(test)]
mod test {
    use rustc_hash::FxHashSet;

    use crate::modifier::Modifier;

    #[test]
    fn card_codes_are_a_bijection() {
        let codes: FxHashSet<_> = Modifier::ALL.iter().map(|m| m.card_code()).collect();
        assert_eq!(codes.len(), Modifier::ALL.len());
        for modifier in Modifier::ALL {
            assert_eq!(Modifier::from_card_code(modifier.card_code()), Ok(modifier));
        }
        assert!(Modifier::from_card_code(0).is_err());
        assert!(Modifier::from_card_code(6).is_err());
    }
    #[test]
    fn tile_codes_are_a_bijection() {
        for modifier in Modifier::ALL {
            assert_eq!(Modifier::from_tile_code(modifier.tile_code()), Ok(modifier));
        }
        for code in [0, 3, 4, 8, 15] {
            assert!(Modifier::from_tile_code(code).is_err());
        }
    }
    #[test]
    fn glyphs_are_a_bijection() {
        let glyphs: FxHashSet<_> = Modifier::ALL.iter().map(|m| m.glyph()).collect();
        assert_eq!(glyphs.len(), Modifier::ALL.len());
        for modifier in Modifier::ALL {
            assert_eq!(Modifier::from_glyph(modifier.glyph()), Some(modifier));
            assert_eq!(modifier.glyph().to_string().parse(), Ok(modifier));
            assert_eq!(modifier.to_string().parse(), Ok(modifier));
        }
    }
    #[test]
    fn notation_codes_are_a_bijection() {
        for modifier in Modifier::ALL {
            assert_eq!(
                Modifier::from_notation_code(modifier.notation_code()),
                Some(modifier)
            );
        }
        assert_eq!(Modifier::from_notation_code(4), None);
        assert_eq!(Modifier::from_notation_code(-2), None);
    }
}
