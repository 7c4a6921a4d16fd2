use crate::{
    board::Board,
    color::Color,
    coord::{Coord, Vector, home_rank},
    danger::is_attacked,
    piece::{ColoredPieceKind, PieceKind},
    portal,
    ray::{self, Reach},
    register::{CastlingSide, KING_ORIGIN},
    state::State,
};

/// Movement of the piece on `origin` without portals or castling.
pub fn base_reach(board: &Board, origin: Coord) -> Reach {
    let Some(piece) = board[origin].piece() else {
        return Reach::default();
    };
    let color = piece.color();
    match piece.piece() {
        PieceKind::Pawn => ray::pawn(board, origin, color),
        PieceKind::Knight => ray::knight(board, origin, color),
        PieceKind::Bishop => ray::rays(board, origin, &Vector::BISHOP_DIRECTIONS, 8, color),
        PieceKind::Rook => ray::rays(board, origin, &Vector::ROOK_DIRECTIONS, 8, color),
        PieceKind::Queen => ray::rays(board, origin, &Vector::QUEEN_DIRECTIONS, 8, color),
        PieceKind::King => ray::rays(board, origin, &Vector::KING_MOVES, 1, color),
    }
}
/// Squares the piece on `origin` may move to, before checking whether the
/// mover's king ends up attacked.
pub fn movable_squares(state: &State, origin: Coord) -> Reach {
    let board = &state.board;
    let Some(piece) = board[origin].piece() else {
        return Reach::default();
    };
    let mut reach = base_reach(board, origin);
    portal::link(board, origin, piece.color(), &mut reach);
    if piece.piece() == PieceKind::King {
        for side in castling_sides(state, origin) {
            reach.squares.insert(origin.with_x(side.king_destination()));
        }
    }
    reach
}
/// Castling moves available to the king on `origin`.
pub fn castling_sides(state: &State, origin: Coord) -> impl Iterator<Item = CastlingSide> + '_ {
    let board = &state.board;
    let color = board[origin].piece().map(ColoredPieceKind::color);
    CastlingSide::ALL.into_iter().filter(move |side| {
        let Some(color) = color else {
            return false;
        };
        can_castle(state, origin, color, *side)
    })
}
fn can_castle(state: &State, origin: Coord, color: Color, side: CastlingSide) -> bool {
    let board = &state.board;
    if !state.register.castling(color, side)
        || origin != Coord::new(KING_ORIGIN, home_rank(color))
        || board[origin].piece() != Some(ColoredPieceKind::new(color, PieceKind::King))
    {
        return false;
    }
    let rook = origin.with_x(side.rook_origin());
    if board[rook].piece() != Some(ColoredPieceKind::new(color, PieceKind::Rook)) {
        return false;
    }
    // only the squares the king walks over need to be empty, so b1 and b8 may
    // stay occupied
    let (low, high) = (
        u8::min(KING_ORIGIN, side.king_destination()),
        u8::max(KING_ORIGIN, side.king_destination()),
    );
    if (low..=high).any(|x| x != KING_ORIGIN && !board[origin.with_x(x)].is_vacant()) {
        return false;
    }
    !(low..=high).any(|x| is_attacked(board, origin.with_x(x), !color))
}
