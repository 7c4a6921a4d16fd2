use crate::{board::Board, color::Color, coord::Coord, modifier::Modifier, ray::Reach};

/// Whether a mover starting on `origin` with this reach can enter a portal.
pub fn enters_portal(board: &Board, origin: Coord, reach: Reach) -> bool {
    board[origin].has(Modifier::Portal)
        || reach
            .quiet()
            .iter()
            .any(|position| board[position].has(Modifier::Portal))
}
/// Adds every portal exit to `reach` when the mover can enter a portal.
///
/// Exits holding the mover's own pieces are skipped and exits holding opposing
/// pieces become captures. Exits are not followed any further.
pub fn link(board: &Board, origin: Coord, color: Color, reach: &mut Reach) {
    if !enters_portal(board, origin, *reach) {
        return;
    }
    for exit in board.with_modifier(Modifier::Portal) {
        if exit == origin {
            continue;
        }
        match board[exit].piece() {
            Some(piece) if piece.color() == color => (),
            Some(_) => {
                reach.squares.insert(exit);
                reach.captures.insert(exit);
            }
            None => reach.squares.insert(exit),
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord,
        coord::Vector,
        modifier::Modifier,
        piece::{ColoredPieceKind, PieceKind},
        portal::link,
        ray::ray,
        square::Square,
    };

    #[test]
    fn reaching_a_portal_opens_every_other_portal() {
        let mut board = Board::empty();
        for position in [coord!("a4"), coord!("h8"), coord!("e5")] {
            board[position].modifier = Some(Modifier::Portal);
        }
        board[coord!("e5")].occupant = Some(crate::square::Occupant::Piece(
            ColoredPieceKind::new(Color::Black, PieceKind::Bishop),
        ));
        let mut reach = ray(&board, coord!("a1"), Vector { x: 0, y: 1 }, 8, Color::White);
        link(&board, coord!("a1"), Color::White, &mut reach);
        assert!(reach.contains(coord!("h8")));
        assert!(reach.contains(coord!("e5")));
        assert!(reach.captures.contains(coord!("e5")));
    }
    #[test]
    fn own_pieces_block_their_portal() {
        let mut board = Board::empty();
        board[coord!("c3")].modifier = Some(Modifier::Portal);
        board[coord!("f6")] =
            Square::with_piece(ColoredPieceKind::new(Color::White, PieceKind::Pawn));
        board[coord!("f6")].modifier = Some(Modifier::Portal);
        let mut reach = ray(&board, coord!("a1"), Vector { x: 1, y: 1 }, 8, Color::White);
        link(&board, coord!("a1"), Color::White, &mut reach);
        assert!(!reach.contains(coord!("f6")));
    }
    #[test]
    fn a_lone_portal_adds_nothing() {
        let mut board = Board::empty();
        board[coord!("d4")].modifier = Some(Modifier::Portal);
        let mut reach = ray(&board, coord!("d1"), Vector { x: 0, y: 1 }, 8, Color::White);
        let before = reach;
        link(&board, coord!("d1"), Color::White, &mut reach);
        assert_eq!(reach, before);
    }
    #[test]
    fn standing_on_a_portal_is_enough() {
        let mut board = Board::empty();
        board[coord!("b2")].modifier = Some(Modifier::Portal);
        board[coord!("g7")].modifier = Some(Modifier::Portal);
        let mut reach = ray(&board, coord!("b2"), Vector { x: 1, y: 0 }, 1, Color::White);
        link(&board, coord!("b2"), Color::White, &mut reach);
        assert!(reach.contains(coord!("g7")));
        assert!(!reach.contains(coord!("b2")));
    }
}
