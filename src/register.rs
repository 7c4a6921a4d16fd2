use std::fmt::{self, Display, Formatter};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    QueenSide,
    KingSide,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::QueenSide, CastlingSide::KingSide];

    pub fn rook_origin(self) -> u8 {
        match self {
            CastlingSide::QueenSide => 0,
            CastlingSide::KingSide => 7,
        }
    }
    pub fn king_destination(self) -> u8 {
        match self {
            CastlingSide::QueenSide => 2,
            CastlingSide::KingSide => 6,
        }
    }
    pub fn rook_destination(self) -> u8 {
        match self {
            CastlingSide::QueenSide => 3,
            CastlingSide::KingSide => 5,
        }
    }
    pub fn from_rook_origin(x: u8) -> Option<Self> {
        match x {
            0 => Some(CastlingSide::QueenSide),
            7 => Some(CastlingSide::KingSide),
            _ => None,
        }
    }
}
pub const KING_ORIGIN: u8 = 4;

const TURN: u8 = 0b_1;
const BLACK_QUEEN_SIDE: u8 = 0b_10;
const BLACK_KING_SIDE: u8 = 0b_100;
const WHITE_QUEEN_SIDE: u8 = 0b_1000;
const WHITE_KING_SIDE: u8 = 0b_1_0000;
const WHITE_ILLEGAL_ALLOWANCE: u8 = 0b_10_0000;
const BLACK_ILLEGAL_ALLOWANCE: u8 = 0b_100_0000;

/// Turn, castling rights, and illegal allowances packed into one byte.
///
/// Bit 0 is the turn (set for black), bits 1 to 4 are black queen side, black
/// king side, white queen side, and white king side castling rights, bits 5 and
/// 6 are the white and black illegal allowances. Bit 7 is reserved and carried
/// through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(u8);

impl Register {
    pub const DEFAULT: Self = Register(126);

    fn castling_bit(color: Color, side: CastlingSide) -> u8 {
        match (color, side) {
            (Color::White, CastlingSide::QueenSide) => WHITE_QUEEN_SIDE,
            (Color::White, CastlingSide::KingSide) => WHITE_KING_SIDE,
            (Color::Black, CastlingSide::QueenSide) => BLACK_QUEEN_SIDE,
            (Color::Black, CastlingSide::KingSide) => BLACK_KING_SIDE,
        }
    }
    fn allowance_bit(color: Color) -> u8 {
        match color {
            Color::White => WHITE_ILLEGAL_ALLOWANCE,
            Color::Black => BLACK_ILLEGAL_ALLOWANCE,
        }
    }
    pub fn turn(self) -> Color {
        if self.0 & TURN == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
    pub fn set_turn(&mut self, color: Color) {
        match color {
            Color::White => self.0 &= !TURN,
            Color::Black => self.0 |= TURN,
        }
    }
    pub fn switch_turn(&mut self) {
        self.0 ^= TURN;
    }
    pub fn castling(self, color: Color, side: CastlingSide) -> bool {
        self.0 & Register::castling_bit(color, side) != 0
    }
    /// Rights can only ever be removed.
    pub fn remove_castling(&mut self, color: Color, side: CastlingSide) {
        self.0 &= !Register::castling_bit(color, side);
    }
    pub fn clear_castling(&mut self, color: Color) {
        for side in CastlingSide::ALL {
            self.remove_castling(color, side);
        }
    }
    pub fn illegal_allowance(self, color: Color) -> bool {
        self.0 & Register::allowance_bit(color) != 0
    }
    pub fn consume_illegal_allowance(&mut self, color: Color) {
        self.0 &= !Register::allowance_bit(color);
    }
}
impl Default for Register {
    fn default() -> Self {
        Register::DEFAULT
    }
}
impl From<Register> for u8 {
    fn from(value: Register) -> Self {
        value.0
    }
}
impl From<u8> for Register {
    fn from(value: u8) -> Self {
        Register(value)
    }
}
impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for color in Color::ALL {
            for side in [CastlingSide::KingSide, CastlingSide::QueenSide] {
                if self.castling(color, side) {
                    let c = match (color, side) {
                        (Color::White, CastlingSide::KingSide) => 'K',
                        (Color::White, CastlingSide::QueenSide) => 'Q',
                        (Color::Black, CastlingSide::KingSide) => 'k',
                        (Color::Black, CastlingSide::QueenSide) => 'q',
                    };
                    written = true;
                    write!(f, "{c}")?;
                }
            }
        }
        if !written {
            write!(f, "-")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        register::{CastlingSide, Register},
    };

    #[test]
    fn default_register_is_white_with_everything_available() {
        let register = Register::DEFAULT;
        assert_eq!(register.turn(), Color::White);
        for color in Color::ALL {
            assert!(register.illegal_allowance(color));
            for side in CastlingSide::ALL {
                assert!(register.castling(color, side));
            }
        }
        assert_eq!(register.to_string(), "KQkq");
    }
    #[test]
    fn bits_match_raw_layout() {
        let mut register = Register::DEFAULT;
        register.switch_turn();
        assert_eq!(u8::from(register), 127);
        register.remove_castling(Color::White, CastlingSide::KingSide);
        assert_eq!(u8::from(register), 127 - 16);
        register.clear_castling(Color::Black);
        assert_eq!(u8::from(register), 127 - 16 - 6);
        register.consume_illegal_allowance(Color::Black);
        assert_eq!(u8::from(register), 127 - 16 - 6 - 64);
        assert_eq!(register.to_string(), "Q");
    }
}
