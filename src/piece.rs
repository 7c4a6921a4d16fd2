use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    num::NonZero,
};

use crate::{color::Color, error::InvalidByte};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    // packed codes; 7 is reserved for the en passant marker
    Pawn = 1,
    Rook,
    Bishop,
    Knight,
    Queen,
    King,
}
impl PieceKind {
    pub const PROMOTION_CHOICES: [Self; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        self.lowercase().to_ascii_uppercase()
    }
    pub fn lowercase(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
    pub fn from_char(c: char) -> Result<Self, InvalidPieceChar> {
        let piece = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(InvalidPieceChar(c)),
        };
        Ok(piece)
    }
    pub fn is_promotion_choice(self) -> bool {
        !matches!(self, PieceKind::Pawn | PieceKind::King)
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}
impl TryFrom<u8> for PieceKind {
    type Error = InvalidByte;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let piece = match value {
            1 => PieceKind::Pawn,
            2 => PieceKind::Rook,
            3 => PieceKind::Bishop,
            4 => PieceKind::Knight,
            5 => PieceKind::Queen,
            6 => PieceKind::King,
            _ => return Err(InvalidByte),
        };
        Ok(piece)
    }
}
impl From<PieceKind> for u8 {
    fn from(value: PieceKind) -> Self {
        match value {
            PieceKind::Pawn => 1,
            PieceKind::Rook => 2,
            PieceKind::Bishop => 3,
            PieceKind::Knight => 4,
            PieceKind::Queen => 5,
            PieceKind::King => 6,
        }
    }
}

// Bit structure: 000CCPPP
// C - Color, `01` for white and `10` for black
// P - Piece kind
// identical to the low five bits of a packed square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColoredPieceKind(NonZero<u8>);
impl ColoredPieceKind {
    pub fn new(color: Color, piece: PieceKind) -> Self {
        let color: u8 = color.into();
        let piece: u8 = piece.into();
        let data = (color << 3) | piece;
        ColoredPieceKind(NonZero::new(data).unwrap())
    }
    pub fn color(self) -> Color {
        ((self.0.get() >> 3) & 0b_11).try_into().unwrap()
    }
    pub fn piece(self) -> PieceKind {
        (self.0.get() & 0b_111).try_into().unwrap()
    }
    pub fn is(self, color: Color, piece: PieceKind) -> bool {
        self == ColoredPieceKind::new(color, piece)
    }
    /// Letter used by the board map, uppercase for white.
    pub fn letter(self) -> char {
        match self.color() {
            Color::White => self.piece().uppercase(),
            Color::Black => self.piece().lowercase(),
        }
    }
    pub fn from_letter(c: char) -> Result<Self, InvalidPieceChar> {
        let piece = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(ColoredPieceKind::new(color, piece))
    }
    pub fn figurine(self) -> char {
        match (self.color(), self.piece()) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}
impl Display for ColoredPieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color(), self.piece())?;
        Ok(())
    }
}
impl From<ColoredPieceKind> for u8 {
    fn from(value: ColoredPieceKind) -> Self {
        value.0.get()
    }
}
impl TryFrom<u8> for ColoredPieceKind {
    type Error = InvalidByte;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let color = Color::try_from((value >> 3) & 0b_11)?;
        let piece = PieceKind::try_from(value & 0b_111)?;
        if value >> 5 != 0 {
            return Err(InvalidByte);
        }
        Ok(ColoredPieceKind::new(color, piece))
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidPieceChar(pub char);
impl Display for InvalidPieceChar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found `{}`, expected one of `p`, `r`, `b`, `n`, `q`, `k`, or uppercase forms of these letters",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidPieceChar {}

#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        piece::{ColoredPieceKind, PieceKind},
    };

    #[test]
    fn packed_codes_match_square_layout() {
        let white_pawn = ColoredPieceKind::new(Color::White, PieceKind::Pawn);
        let black_king = ColoredPieceKind::new(Color::Black, PieceKind::King);
        assert_eq!(u8::from(white_pawn), 9);
        assert_eq!(u8::from(black_king), 22);
        assert_eq!(ColoredPieceKind::try_from(22), Ok(black_king));
        assert!(ColoredPieceKind::try_from(7).is_err());
        assert!(ColoredPieceKind::try_from(0b11_001).is_err());
    }
    #[test]
    fn letters_are_cased_by_color() {
        let piece = ColoredPieceKind::from_letter('N').unwrap();
        assert_eq!(
            piece,
            ColoredPieceKind::new(Color::White, PieceKind::Knight)
        );
        assert_eq!(piece.letter(), 'N');
        assert_eq!(ColoredPieceKind::from_letter('q').unwrap().letter(), 'q');
        assert!(ColoredPieceKind::from_letter('x').is_err());
    }
}
