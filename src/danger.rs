use crate::{
    board::Board,
    color::Color,
    coord::{Coord, Vector},
    modifier::Modifier,
    movegen::base_reach,
    piece::PieceKind,
    ray::pawn_forward,
};

/// Whether a piece of `by` could capture on `target`.
///
/// Rays are cast backwards from `target`. When `target` carries a portal, pieces
/// that can enter another portal count as well, one hop deep.
pub fn is_attacked(board: &Board, target: Coord, by: Color) -> bool {
    is_attacked_directly(board, target, by)
        || (board[target].has(Modifier::Portal) && is_attacked_through_portal(board, target, by))
}
/// Whether the king of `color` is attacked. A side without a king is never in
/// check.
pub fn in_check(board: &Board, color: Color) -> bool {
    board
        .king(color)
        .is_some_and(|king| is_attacked(board, king, !color))
}
fn holds(board: &Board, position: Coord, by: Color, kinds: &[PieceKind]) -> bool {
    board[position]
        .piece()
        .is_some_and(|piece| piece.color() == by && kinds.contains(&piece.piece()))
}
fn first_piece(board: &Board, origin: Coord, direction: Vector) -> Option<Coord> {
    origin
        .line(direction)
        .find(|position| !board[*position].is_vacant())
}
fn is_attacked_directly(board: &Board, target: Coord, by: Color) -> bool {
    let knights = Vector::KNIGHT_MOVES
        .into_iter()
        .filter_map(|movement| target.move_by(movement))
        .any(|position| holds(board, position, by, &[PieceKind::Knight]));
    if knights {
        return true;
    }
    // only knights jump into a trench
    if board[target].is_entrenched() {
        return false;
    }
    let sliders = Vector::ROOK_DIRECTIONS
        .into_iter()
        .filter_map(|direction| first_piece(board, target, direction))
        .any(|position| holds(board, position, by, &[PieceKind::Rook, PieceKind::Queen]))
        || Vector::BISHOP_DIRECTIONS
            .into_iter()
            .filter_map(|direction| first_piece(board, target, direction))
            .any(|position| holds(board, position, by, &[PieceKind::Bishop, PieceKind::Queen]));
    if sliders {
        return true;
    }
    let king = Vector::KING_MOVES
        .into_iter()
        .filter_map(|movement| target.move_by(movement))
        .any(|position| holds(board, position, by, &[PieceKind::King]));
    if king {
        return true;
    }
    Vector::BISHOP_DIRECTIONS
        .into_iter()
        .filter_map(|movement| Some((movement, target.move_by(movement)?)))
        .any(|(movement, position)| {
            holds(board, position, by, &[PieceKind::Pawn])
                && pawn_forward(board, position, by) == -movement.y
        })
}
fn is_attacked_through_portal(board: &Board, target: Coord, by: Color) -> bool {
    let exits: Vec<_> = board
        .with_modifier(Modifier::Portal)
        .filter(|exit| *exit != target)
        .collect();
    if exits.is_empty() {
        return false;
    }
    board
        .pieces_of(by)
        .filter(|(position, _)| *position != target)
        .any(|(position, _)| {
            board[position].has(Modifier::Portal)
                || base_reach(board, position)
                    .quiet()
                    .iter()
                    .any(|square| exits.contains(&square))
        })
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord,
        coord::Coord,
        danger::{in_check, is_attacked},
        modifier::Modifier,
        piece::{ColoredPieceKind, PieceKind},
        square::Square,
    };

    fn put(board: &mut Board, position: Coord, color: Color, piece: PieceKind) {
        board[position] = Square::with_piece(ColoredPieceKind::new(color, piece));
    }

    #[test]
    fn slider_attack_is_blocked() {
        let mut board = Board::empty();
        put(&mut board, coord!("e1"), Color::White, PieceKind::King);
        put(&mut board, coord!("e8"), Color::Black, PieceKind::Rook);
        assert!(in_check(&board, Color::White));
        put(&mut board, coord!("e4"), Color::Black, PieceKind::Knight);
        assert!(!in_check(&board, Color::White));
    }
    #[test]
    fn pawns_attack_forward_diagonals_only() {
        let mut board = Board::empty();
        put(&mut board, coord!("d5"), Color::Black, PieceKind::Pawn);
        assert!(is_attacked(&board, coord!("e4"), Color::Black));
        assert!(is_attacked(&board, coord!("c4"), Color::Black));
        assert!(!is_attacked(&board, coord!("e6"), Color::Black));
        assert!(!is_attacked(&board, coord!("d4"), Color::Black));
    }
    #[test]
    fn reversed_pawn_attacks_backwards() {
        let mut board = Board::empty();
        put(&mut board, coord!("d5"), Color::Black, PieceKind::Pawn);
        board[coord!("d5")].modifier = Some(Modifier::ReversePawn);
        assert!(is_attacked(&board, coord!("e6"), Color::Black));
        assert!(!is_attacked(&board, coord!("e4"), Color::Black));
    }
    #[test]
    fn missing_king_is_never_in_check() {
        let mut board = Board::empty();
        put(&mut board, coord!("e8"), Color::Black, PieceKind::Queen);
        assert!(!in_check(&board, Color::White));
    }
    #[test]
    fn king_on_portal_is_attacked_through_other_portals() {
        let mut board = Board::empty();
        put(&mut board, coord!("a1"), Color::White, PieceKind::King);
        put(&mut board, coord!("h3"), Color::Black, PieceKind::Rook);
        assert!(!in_check(&board, Color::White));
        board[coord!("a1")].modifier = Some(Modifier::Portal);
        board[coord!("f3")].modifier = Some(Modifier::Portal);
        assert!(in_check(&board, Color::White));
    }
    #[test]
    fn piece_standing_on_a_portal_attacks_every_portal() {
        let mut board = Board::empty();
        put(&mut board, coord!("a1"), Color::White, PieceKind::King);
        put(&mut board, coord!("h8"), Color::Black, PieceKind::Knight);
        board[coord!("a1")].modifier = Some(Modifier::Portal);
        board[coord!("h8")].modifier = Some(Modifier::Portal);
        assert!(in_check(&board, Color::White));
    }
}
