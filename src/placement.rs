use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{
    coord::{Vector, pawn_promotion_rank},
    modifier::Modifier,
    notation::Placement,
    piece::PieceKind,
    square::{Occupant, Square},
    state::State,
};

/// Why a modifier cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidPlacement {
    WrongTurn,
    MissingCard(Modifier),
    NothingToClear,
    AlreadyModified,
    NotOwnPawn,
    NotPawn,
    Occupied,
    ShoveOffBoard,
    ShoveBlocked,
    ShoveOntoPromotionRank,
}
impl Display for InvalidPlacement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPlacement::WrongTurn => write!(f, "it is not this side's turn")?,
            InvalidPlacement::MissingCard(card) => write!(f, "no {card} card in hand")?,
            InvalidPlacement::NothingToClear => write!(f, "the square has no modifier to clear")?,
            InvalidPlacement::AlreadyModified => write!(f, "the square already has a modifier")?,
            InvalidPlacement::NotOwnPawn => write!(f, "a trench needs one of your own pawns")?,
            InvalidPlacement::NotPawn => write!(f, "the square holds no pawn")?,
            InvalidPlacement::Occupied => write!(f, "a portal needs an empty square")?,
            InvalidPlacement::ShoveOffBoard => write!(f, "the pawn would leave the board")?,
            InvalidPlacement::ShoveBlocked => {
                write!(f, "the square in front of the pawn is taken")?;
            }
            InvalidPlacement::ShoveOntoPromotionRank => {
                write!(f, "pawns cannot be shoved onto their promotion rank")?;
            }
        }
        Ok(())
    }
}
impl Error for InvalidPlacement {}

/// Applies a placement and spends its card. The turn is left unchanged.
pub fn place(state: &State, placement: Placement) -> Result<State, InvalidPlacement> {
    let Placement {
        color,
        target,
        modifier,
    } = placement;
    if color != state.turn() {
        return Err(InvalidPlacement::WrongTurn);
    }
    if !state.hand(color).contains(modifier) {
        return Err(InvalidPlacement::MissingCard(modifier));
    }
    let mut next = state.clone();
    let board = &mut next.board;
    let square = board[target];
    if modifier == Modifier::Clear {
        if square.modifier.is_none() {
            return Err(InvalidPlacement::NothingToClear);
        }
    } else if modifier != Modifier::ShovePawn && square.modifier.is_some() {
        return Err(InvalidPlacement::AlreadyModified);
    }
    let pawn = square
        .piece()
        .filter(|piece| piece.piece() == PieceKind::Pawn);
    match modifier {
        Modifier::Clear => board[target].modifier = None,
        Modifier::Trench => {
            if !pawn.is_some_and(|pawn| pawn.color() == color) {
                return Err(InvalidPlacement::NotOwnPawn);
            }
            board[target].modifier = Some(Modifier::Trench);
        }
        Modifier::ReversePawn => {
            if pawn.is_none() {
                return Err(InvalidPlacement::NotPawn);
            }
            board[target].modifier = Some(Modifier::ReversePawn);
        }
        Modifier::Portal => {
            if !square.is_vacant() {
                return Err(InvalidPlacement::Occupied);
            }
            board[target].modifier = Some(Modifier::Portal);
        }
        Modifier::ShovePawn => {
            let pawn = pawn.ok_or(InvalidPlacement::NotPawn)?;
            let owner = pawn.color();
            let destination = target
                .move_by(Vector::pawn_single_move(owner))
                .ok_or(InvalidPlacement::ShoveOffBoard)?;
            if destination.y() == pawn_promotion_rank(owner) {
                return Err(InvalidPlacement::ShoveOntoPromotionRank);
            }
            if !board[destination].is_vacant() {
                return Err(InvalidPlacement::ShoveBlocked);
            }
            let travelling = match square.modifier {
                Some(modifier @ (Modifier::Trench | Modifier::ReversePawn)) => Some(modifier),
                _ => None,
            };
            board[target] = Square {
                occupant: None,
                modifier: if travelling.is_some() {
                    None
                } else {
                    square.modifier
                },
            };
            board[destination].occupant = Some(Occupant::Piece(pawn));
            if travelling.is_some() {
                board[destination].modifier = travelling;
            }
        }
    }
    next.hand_mut(color).remove(modifier);
    next.board.clear_en_passant();
    Ok(next)
}
