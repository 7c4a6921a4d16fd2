use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    color::Color,
    coord::{Coord, ParseCoordError},
    modifier::Modifier,
    piece::{InvalidPieceChar, PieceKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseNotationError {
    Empty,
    MissingDestination,
    MissingTarget,
    MissingModifier,
    InvalidCoord(ParseCoordError),
    InvalidPiece(InvalidPieceChar),
    InvalidModifierCode,
    TrailingInput,
}
impl From<ParseCoordError> for ParseNotationError {
    fn from(value: ParseCoordError) -> Self {
        ParseNotationError::InvalidCoord(value)
    }
}
impl From<InvalidPieceChar> for ParseNotationError {
    fn from(value: InvalidPieceChar) -> Self {
        ParseNotationError::InvalidPiece(value)
    }
}
impl Display for ParseNotationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseNotationError::Empty => write!(f, "no notation provided")?,
            ParseNotationError::MissingDestination => write!(f, "destination square missing")?,
            ParseNotationError::MissingTarget => write!(f, "target square missing")?,
            ParseNotationError::MissingModifier => write!(f, "modifier code missing")?,
            ParseNotationError::InvalidCoord(err) => write!(f, "{err}")?,
            ParseNotationError::InvalidPiece(err) => write!(f, "{err}")?,
            ParseNotationError::InvalidModifierCode => {
                write!(f, "modifier codes range from `-1` to `3`")?;
            }
            ParseNotationError::TrailingInput => write!(f, "unexpected trailing input")?,
        }
        Ok(())
    }
}
impl Error for ParseNotationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseNotationError::InvalidCoord(err) => Some(err),
            ParseNotationError::InvalidPiece(err) => Some(err),
            _ => None,
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Coord,
    pub destination: Coord,
    pub promotion: Option<PieceKind>,
}
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, " {}", promotion.lowercase())?;
        }
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub color: Color,
    pub target: Coord,
    pub modifier: Modifier,
}
impl Display for Placement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ADD_MODIFIER_{} {} {}",
            self.color.uppercase_name(),
            self.target,
            self.modifier.notation_code()
        )?;
        Ok(())
    }
}
/// Anything a player can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    Move(Move),
    Place(Placement),
    Resign(Color),
}
impl Display for Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Move(movement) => write!(f, "{movement}")?,
            Notation::Place(placement) => write!(f, "{placement}")?,
            Notation::Resign(color) => {
                write!(f, "RESIGN_{}", color.lowercase().to_ascii_uppercase())?;
            }
        }
        Ok(())
    }
}
impl FromStr for Notation {
    type Err = ParseNotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let first = tokens.next().ok_or(ParseNotationError::Empty)?;
        let notation = match first {
            "RESIGN_W" => Notation::Resign(Color::White),
            "RESIGN_B" => Notation::Resign(Color::Black),
            "ADD_MODIFIER_WHITE" | "ADD_MODIFIER_BLACK" => {
                let color = if first == "ADD_MODIFIER_WHITE" {
                    Color::White
                } else {
                    Color::Black
                };
                let target = tokens
                    .next()
                    .ok_or(ParseNotationError::MissingTarget)?
                    .parse()?;
                let modifier = tokens
                    .next()
                    .ok_or(ParseNotationError::MissingModifier)?
                    .parse()
                    .ok()
                    .and_then(Modifier::from_notation_code)
                    .ok_or(ParseNotationError::InvalidModifierCode)?;
                Notation::Place(Placement {
                    color,
                    target,
                    modifier,
                })
            }
            origin => {
                let origin = origin.parse()?;
                let destination = tokens
                    .next()
                    .ok_or(ParseNotationError::MissingDestination)?
                    .parse()?;
                let promotion = match tokens.next() {
                    None => None,
                    Some(token) => {
                        let mut chars = token.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) => Some(PieceKind::from_char(c)?),
                            _ => return Err(ParseNotationError::TrailingInput),
                        }
                    }
                };
                Notation::Move(Move {
                    origin,
                    destination,
                    promotion,
                })
            }
        };
        if tokens.next().is_some() {
            return Err(ParseNotationError::TrailingInput);
        }
        Ok(notation)
    }
}
