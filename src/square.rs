use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{
    color::Color,
    modifier::Modifier,
    piece::{ColoredPieceKind, PieceKind},
};

const EN_PASSANT: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidSquare(pub u32);
impl Display for InvalidSquare {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not a valid packed square", self.0)?;
        Ok(())
    }
}
impl Error for InvalidSquare {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    Piece(ColoredPieceKind),
    /// Square skipped by a pawn's two-square advance, tagged with the pawn's color.
    EnPassant(Color),
}

// Packed layout: bits 0 to 2 piece kind (7 for the en passant marker), bits 3
// to 4 color, bits 5 to 8 modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Square {
    pub occupant: Option<Occupant>,
    pub modifier: Option<Modifier>,
}
impl Square {
    pub const EMPTY: Self = Square {
        occupant: None,
        modifier: None,
    };

    pub fn with_piece(piece: ColoredPieceKind) -> Self {
        Square {
            occupant: Some(Occupant::Piece(piece)),
            modifier: None,
        }
    }
    pub fn piece(self) -> Option<ColoredPieceKind> {
        match self.occupant {
            Some(Occupant::Piece(piece)) => Some(piece),
            _ => None,
        }
    }
    /// No piece stands here; an en passant marker does not count.
    pub fn is_vacant(self) -> bool {
        self.piece().is_none()
    }
    pub fn en_passant(self) -> Option<Color> {
        match self.occupant {
            Some(Occupant::EnPassant(color)) => Some(color),
            _ => None,
        }
    }
    pub fn has(self, modifier: Modifier) -> bool {
        self.modifier == Some(modifier)
    }
    /// A pawn standing on a trench, immune to captures along rays.
    pub fn is_entrenched(self) -> bool {
        self.has(Modifier::Trench) && self.piece().is_some_and(|p| p.piece() == PieceKind::Pawn)
    }
    pub fn letter(self) -> Option<char> {
        match self.occupant? {
            Occupant::Piece(piece) => Some(piece.letter()),
            Occupant::EnPassant(Color::White) => Some('E'),
            Occupant::EnPassant(Color::Black) => Some('e'),
        }
    }
    pub fn glyph(self) -> Option<char> {
        self.modifier.map(Modifier::glyph)
    }
}
impl From<Square> for u32 {
    fn from(value: Square) -> Self {
        let occupant = match value.occupant {
            None => 0,
            Some(Occupant::Piece(piece)) => u8::from(piece),
            Some(Occupant::EnPassant(color)) => (u8::from(color) << 3) | EN_PASSANT,
        };
        let modifier = value.modifier.map_or(0, Modifier::tile_code);
        u32::from(occupant) | (u32::from(modifier) << 5)
    }
}
impl TryFrom<u32> for Square {
    type Error = InvalidSquare;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value >> 9 != 0 {
            return Err(InvalidSquare(value));
        }
        let piece = (value & 0b_111) as u8;
        let color = ((value >> 3) & 0b_11) as u8;
        let modifier = ((value >> 5) & 0b_1111) as u8;
        let occupant = match (piece, color) {
            (0, 0) => None,
            (0, _) => return Err(InvalidSquare(value)),
            (EN_PASSANT, color) => Some(Occupant::EnPassant(
                Color::try_from(color).map_err(|_| InvalidSquare(value))?,
            )),
            (_, _) => Some(Occupant::Piece(
                ColoredPieceKind::try_from((color << 3) | piece).map_err(|_| InvalidSquare(value))?,
            )),
        };
        let modifier = match modifier {
            0 => None,
            code => Some(Modifier::from_tile_code(code).map_err(|_| InvalidSquare(value))?),
        };
        Ok(Square { occupant, modifier })
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        modifier::Modifier,
        piece::{ColoredPieceKind, PieceKind},
        square::{Occupant, Square},
    };

    #[test]
    fn packs_like_the_wire_format() {
        let entrenched = Square {
            occupant: Some(Occupant::Piece(ColoredPieceKind::new(
                Color::White,
                PieceKind::Pawn,
            ))),
            modifier: Some(Modifier::Trench),
        };
        assert_eq!(u32::from(entrenched), 9 | 32);
        assert_eq!(Square::try_from(41), Ok(entrenched));

        let marker = Square {
            occupant: Some(Occupant::EnPassant(Color::Black)),
            modifier: Some(Modifier::Portal),
        };
        assert_eq!(u32::from(marker), 23 | 64);
        assert_eq!(u32::from(Square::EMPTY), 0);
    }
    #[test]
    fn inconsistent_piece_and_color_are_rejected() {
        // color without a piece
        assert!(Square::try_from(8).is_err());
        // piece without a color
        assert!(Square::try_from(3).is_err());
        // unknown modifier code
        assert!(Square::try_from(3 << 5).is_err());
        // bits beyond the modifier field
        assert!(Square::try_from(1 << 9).is_err());
    }
    #[test]
    fn modifier_persists_without_a_piece() {
        let portal = Square::try_from(64).unwrap();
        assert!(portal.is_vacant());
        assert!(portal.has(Modifier::Portal));
    }
}
