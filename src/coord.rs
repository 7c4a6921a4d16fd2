use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    num::NonZero,
    ops::{Mul, Neg},
    str::FromStr,
};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseCoordError {
    InvalidX(char),
    InvalidY(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseCoordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordError::InvalidX(x) => write!(
                f,
                "found `{x}`, characters from `a` to `h` were expected instead"
            )?,
            ParseCoordError::InvalidY(y) => write!(
                f,
                "found `{y}`, characters from `1` to `8` were expected instead"
            )?,
            ParseCoordError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseCoordError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseCoordError {}

// Bit structure: 10XXXYYY
// first two bits is always `10` for `NonZero` size optimizations
// Y counts from white's side, rank 1 is 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord(NonZero<u8>);

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < 8);
        debug_assert!(y < 8);
        let byte = 0b1000_0000 | (x << 3) | y;
        Coord(NonZero::new(byte).unwrap())
    }
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        assert!(bytes.len() == 2, "square names have two characters");
        assert!(matches!(bytes[0], b'a'..=b'h'), "file must be `a` to `h`");
        assert!(matches!(bytes[1], b'1'..=b'8'), "rank must be `1` to `8`");
        Coord::new(bytes[0] - b'a', bytes[1] - b'1')
    }
    pub fn from_chars(x: char, y: char) -> Result<Self, ParseCoordError> {
        let x = match x {
            'a'..='h' => x as u8 - b'a',
            _ => return Err(ParseCoordError::InvalidX(x)),
        };
        let y = match y {
            '1'..='8' => y as u8 - b'1',
            _ => return Err(ParseCoordError::InvalidY(y)),
        };
        Ok(Coord::new(x, y))
    }
    pub fn new_checked(x: u8, y: u8) -> Option<Self> {
        if x >= 8 || y >= 8 {
            None
        } else {
            Some(Self::new(x, y))
        }
    }
    /// Square index where a1 is 0, h1 is 7, and a8 is 56.
    pub fn from_index(index: usize) -> Option<Self> {
        let index = u8::try_from(index).ok()?;
        Coord::new_checked(index % 8, index / 8)
    }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (0..64).map(|index| Coord::new(index % 8, index / 8))
    }
    pub const fn x(self) -> u8 {
        (self.0.get() >> 3) & 0b_111
    }
    pub const fn y(self) -> u8 {
        self.0.get() & 0b_111
    }
    pub fn index(self) -> usize {
        usize::from(self.y()) * 8 + usize::from(self.x())
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Self::new_checked(
            self.x().checked_add_signed(movement.x)?,
            self.y().checked_add_signed(movement.y)?,
        )
    }
    pub fn line(self, direction: Vector) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        (1..).map_while(move |distance| self.move_by(direction * distance))
    }
    pub fn with_x(self, x: u8) -> Self {
        Coord::new(x, self.y())
    }
    pub fn color(self) -> Color {
        match (self.x() + self.y()) % 2 {
            0 => Color::Black,
            1 => Color::White,
            _ => unreachable!(),
        }
    }
}
pub fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}
pub fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}
pub fn pawn_promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}
impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let x = (self.x() + b'a') as char;
        let y = (self.y() + b'1') as char;
        write!(f, "{x}{y}")?;
        Ok(())
    }
}
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(x) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(0));
        };
        let Some(y) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseCoordError::Unexpected(c));
        }
        Coord::from_chars(x, y)
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i8,
    pub y: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { x: 0, y: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { x: -1, y: -2 },
        Vector { x: 1, y: -2 },
        Vector { x: -1, y: 2 },
        Vector { x: 1, y: 2 },
        Vector { x: -2, y: -1 },
        Vector { x: 2, y: -1 },
        Vector { x: -2, y: 1 },
        Vector { x: 2, y: 1 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { x: -1, y: -1 },
        Vector { x: 0, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 0 },
        Vector { x: 1, y: 0 },
        Vector { x: -1, y: 1 },
        Vector { x: 0, y: 1 },
        Vector { x: 1, y: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { x: -1, y: 0 },
        Vector { x: 1, y: 0 },
        Vector { x: 0, y: -1 },
        Vector { x: 0, y: 1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { x: -1, y: -1 },
        Vector { x: 1, y: -1 },
        Vector { x: -1, y: 1 },
        Vector { x: 1, y: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub fn forward(direction: i8) -> Self {
        Vector { x: 0, y: direction }
    }
    pub fn pawn_single_move(color: Color) -> Self {
        Vector::forward(pawn_direction(color))
    }
    pub fn diagonals(direction: i8) -> [Self; 2] {
        [-1, 1].map(|x| Vector { x, y: direction })
    }
}
pub fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}
impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Vector {
            x: -self.x,
            y: -self.y,
        }
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{
        coord,
        coord::{Coord, Vector},
    };

    #[test]
    fn index_follows_file_then_rank() {
        assert_eq!(coord!("a1").index(), 0);
        assert_eq!(coord!("h1").index(), 7);
        assert_eq!(coord!("a8").index(), 56);
        assert_eq!(coord!("e4").index(), 28);
    }
    #[test]
    fn names_round_trip_through_indices() {
        for (index, position) in Coord::all().enumerate() {
            assert_eq!(position.index(), index);
            assert_eq!(Coord::from_index(index), Some(position));
            assert_eq!(position.to_string().parse(), Ok(position));
        }
        assert_eq!(Coord::from_index(64), None);
    }
    #[test]
    fn line_stops_at_the_edge() {
        let line: Vec<_> = coord!("f6").line(Vector { x: 1, y: 1 }).collect();
        assert_eq!(line, [coord!("g7"), coord!("h8")]);
    }
    #[test]
    fn no_wrap_around_between_files() {
        assert_eq!(coord!("h4").move_by(Vector { x: 1, y: 0 }), None);
        assert_eq!(coord!("a4").move_by(Vector { x: -1, y: 1 }), None);
    }
}
