use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    color::{Color, ParseColorError},
    coord::{Coord, ParseCoordError},
    piece::{ColoredPieceKind, InvalidPieceChar},
    register::CastlingSide,
    square::{Occupant, Square},
    state::State,
};

/// Forsyth-Edwards notation of a position. Modifiers and cards have no FEN
/// form; parsed positions get full hands and fresh counters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fen(pub State);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseFenError {
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    NotEnoughRows,
    InvalidPiece(InvalidPieceChar),
    InvalidColor(ParseColorError),
    InvalidCastling(char),
    InvalidEnPassant(ParseCoordError),
    UnexpectedEol,
}
impl From<InvalidPieceChar> for ParseFenError {
    fn from(value: InvalidPieceChar) -> Self {
        ParseFenError::InvalidPiece(value)
    }
}
impl From<ParseColorError> for ParseFenError {
    fn from(value: ParseColorError) -> Self {
        ParseFenError::InvalidColor(value)
    }
}
impl From<ParseCoordError> for ParseFenError {
    fn from(value: ParseCoordError) -> Self {
        ParseFenError::InvalidEnPassant(value)
    }
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::NotEnoughSquaresOnRow => write!(f, "a row has less than 8 squares")?,
            ParseFenError::ExceedingSquaresOnRow => write!(f, "a row has more than 8 squares")?,
            ParseFenError::NotEnoughRows => write!(f, "the board has less than 8 rows")?,
            ParseFenError::InvalidPiece(err) => write!(f, "{err}")?,
            ParseFenError::InvalidColor(err) => write!(f, "{err}")?,
            ParseFenError::InvalidCastling(c) => {
                write!(f, "found `{c}`, expected one of `K`, `Q`, `k`, `q`, or `-`")?;
            }
            ParseFenError::InvalidEnPassant(err) => write!(f, "{err}")?,
            ParseFenError::UnexpectedEol => write!(f, "unexpected end of input")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::InvalidPiece(err) => Some(err),
            ParseFenError::InvalidColor(err) => Some(err),
            ParseFenError::InvalidEnPassant(err) => Some(err),
            _ => None,
        }
    }
}
impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let placement = fields.next().ok_or(ParseFenError::UnexpectedEol)?;
        let mut state = State::empty();

        let mut rows = 0;
        for (row, y) in placement.split('/').zip((0..8).rev()) {
            rows += 1;
            let mut x: u8 = 0;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    x += u8::try_from(skip).map_err(|_| ParseFenError::ExceedingSquaresOnRow)?;
                } else {
                    let position =
                        Coord::new_checked(x, y).ok_or(ParseFenError::ExceedingSquaresOnRow)?;
                    state.board[position] = Square::with_piece(ColoredPieceKind::from_letter(c)?);
                    x += 1;
                }
                if x > 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
            }
            if x < 8 {
                return Err(ParseFenError::NotEnoughSquaresOnRow);
            }
        }
        if rows != 8 {
            return Err(ParseFenError::NotEnoughRows);
        }
        let turn: Color = fields.next().ok_or(ParseFenError::UnexpectedEol)?.parse()?;
        state.register.set_turn(turn);

        let mut granted = Vec::new();
        for c in fields.next().unwrap_or("-").chars() {
            let right = match c {
                'K' => (Color::White, CastlingSide::KingSide),
                'Q' => (Color::White, CastlingSide::QueenSide),
                'k' => (Color::Black, CastlingSide::KingSide),
                'q' => (Color::Black, CastlingSide::QueenSide),
                '-' => continue,
                c => return Err(ParseFenError::InvalidCastling(c)),
            };
            granted.push(right);
        }
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if !granted.contains(&(color, side)) {
                    state.register.remove_castling(color, side);
                }
            }
        }

        match fields.next() {
            None | Some("-") => (),
            Some(position) => {
                let position: Coord = position.parse()?;
                state.board[position].occupant = Some(Occupant::EnPassant(!turn));
            }
        }
        Ok(Fen(state))
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let board = &self.0.board;
        for y in (0..8).rev() {
            let mut empty = 0;
            for x in 0..8 {
                match board[Coord::new(x, y)].piece() {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.letter())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if y > 0 {
                write!(f, "/")?;
            }
        }
        write!(f, " {}", self.0.turn().lowercase())?;
        write!(f, " {}", self.0.register)?;
        let en_passant = board
            .squares()
            .find_map(|(position, square)| square.en_passant().map(|_| position));
        if let Some(position) = en_passant {
            write!(f, " {position}")?;
        } else {
            write!(f, " -")?;
        }
        write!(f, " 0 1")?;
        Ok(())
    }
}
