use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{coord::Coord, hand::InvalidHand, square::InvalidSquare};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidByte;

impl Display for InvalidByte {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid byte")?;
        Ok(())
    }
}
impl Error for InvalidByte {}

/// Failure to import a flat snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidSnapshot {
    Length(usize),
    Square(Coord, InvalidSquare),
    Register(u32),
    Hand(InvalidHand),
    Counter(u32),
    MultipleKings,
}
impl Display for InvalidSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSnapshot::Length(len) => {
                write!(f, "found {len} values, 65 or 69 were expected")?;
            }
            InvalidSnapshot::Square(position, err) => write!(f, "{position}: {err}")?,
            InvalidSnapshot::Register(value) => {
                write!(f, "{value} does not fit in the game register")?;
            }
            InvalidSnapshot::Hand(err) => write!(f, "{err}")?,
            InvalidSnapshot::Counter(value) => {
                write!(f, "{value} is not a valid card draw counter")?;
            }
            InvalidSnapshot::MultipleKings => write!(f, "found more than 1 king of a color")?,
        }
        Ok(())
    }
}
impl Error for InvalidSnapshot {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InvalidSnapshot::Square(_, err) => Some(err),
            InvalidSnapshot::Hand(err) => Some(err),
            _ => None,
        }
    }
}
impl From<InvalidHand> for InvalidSnapshot {
    fn from(value: InvalidHand) -> Self {
        InvalidSnapshot::Hand(value)
    }
}
