use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::{
    coord::Coord,
    fen::Fen,
    notation::Move,
    piece::PieceKind,
    register::{CastlingSide, KING_ORIGIN},
    rules,
    state::State,
};

/// Games longer than this are restarted.
const MAX_PLIES: u32 = 300;

impl From<chess::Piece> for PieceKind {
    fn from(value: chess::Piece) -> Self {
        match value {
            chess::Piece::Pawn => PieceKind::Pawn,
            chess::Piece::Knight => PieceKind::Knight,
            chess::Piece::Bishop => PieceKind::Bishop,
            chess::Piece::Rook => PieceKind::Rook,
            chess::Piece::Queen => PieceKind::Queen,
            chess::Piece::King => PieceKind::King,
        }
    }
}
impl From<chess::Square> for Coord {
    fn from(value: chess::Square) -> Self {
        Coord::new(
            value.get_file().to_index().try_into().unwrap(),
            value.get_rank().to_index().try_into().unwrap(),
        )
    }
}
impl From<chess::ChessMove> for Move {
    fn from(value: chess::ChessMove) -> Self {
        Move {
            origin: value.get_source().into(),
            destination: value.get_dest().into(),
            promotion: value.get_promotion().map(Into::into),
        }
    }
}
/// A disagreement with the `chess` crate on a modifier-free position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mismatch {
    /// Accepted here but illegal in standard chess.
    Extra { fen: String, movement: Move },
    /// Legal in standard chess but rejected here.
    Missing { fen: String, movement: Move },
    Unparsable(String),
}
impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Extra { fen, movement } => {
                write!(f, "found {movement} but it's not a legal move in {fen}")?;
            }
            Mismatch::Missing { fen, movement } => write!(f, "{movement} not found in {fen}")?,
            Mismatch::Unparsable(fen) => write!(f, "the reference rejected {fen}")?,
        }
        Ok(())
    }
}
impl Error for Mismatch {}

/// Queen-side castling past a piece on the b-file. Only the king's path has
/// to be empty here, standard chess also wants the rook's.
fn castles_past_b_file(state: &State, movement: Move) -> bool {
    let board = &state.board;
    board[movement.origin]
        .piece()
        .is_some_and(|piece| piece.piece() == PieceKind::King)
        && movement.origin.x() == KING_ORIGIN
        && movement.destination
            == movement
                .origin
                .with_x(CastlingSide::QueenSide.king_destination())
        && !board[movement.origin.with_x(1)].is_vacant()
}

/// Plays random modifier-free games and compares the legal moves of every
/// position against the `chess` crate. Returns the number of positions
/// compared.
pub fn cross_check(rng: &mut impl Rng, positions: u64) -> Result<u64, Mismatch> {
    let mut state = State::starting_position();
    let mut plies = 0;
    let mut compared = 0;
    while compared < positions {
        let mut successors: Vec<_> = rules::successors(&state).collect();
        let moves: FxHashSet<_> = successors
            .iter()
            .map(|(movement, _)| *movement)
            .filter(|movement| !castles_past_b_file(&state, *movement))
            .collect();

        let fen = Fen(state.clone()).to_string();
        let reference: chess::Board = fen
            .parse()
            .map_err(|_| Mismatch::Unparsable(fen.clone()))?;
        let reference_moves: FxHashSet<Move> = chess::MoveGen::new_legal(&reference)
            .map(Into::into)
            .collect();
        if let Some(movement) = moves.difference(&reference_moves).next() {
            return Err(Mismatch::Extra {
                fen,
                movement: *movement,
            });
        }
        if let Some(movement) = reference_moves.difference(&moves).next() {
            return Err(Mismatch::Missing {
                fen,
                movement: *movement,
            });
        }
        compared += 1;

        if successors.is_empty() || plies >= MAX_PLIES {
            state = State::starting_position();
            plies = 0;
        } else {
            let index = rng.random_range(0..successors.len());
            state = successors.swap_remove(index).1;
            plies += 1;
        }
    }
    Ok(compared)
}
#[cfg(test)]
mod test {
    use rand::{SeedableRng, rngs::SmallRng};

    use crate::{
        coord,
        coord::Coord,
        fen::Fen,
        fuzz::{castles_past_b_file, cross_check},
        notation::Move,
    };

    #[test]
    fn square_mapping() {
        assert_eq!(Coord::from(chess::Square::A1), coord!("a1"));
        assert_eq!(Coord::from(chess::Square::H1), coord!("h1"));
        assert_eq!(Coord::from(chess::Square::E8), coord!("e8"));
    }
    #[test]
    fn castling_past_the_b_file_is_a_known_difference() {
        let state = "4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1".parse::<Fen>().unwrap().0;
        let castle = Move {
            origin: coord!("e1"),
            destination: coord!("c1"),
            promotion: None,
        };
        assert!(castles_past_b_file(&state, castle));
        let step = Move {
            destination: coord!("d1"),
            ..castle
        };
        assert!(!castles_past_b_file(&state, step));

        let empty_b_file = "4k3/8/8/8/8/8/8/R3K3 w Q - 0 1".parse::<Fen>().unwrap().0;
        assert!(!castles_past_b_file(&empty_b_file, castle));
    }
    #[test]
    fn short_cross_check() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(cross_check(&mut rng, 200), Ok(200));
    }
}
