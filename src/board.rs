use std::ops::{Index, IndexMut};

use crate::{
    color::Color,
    coord::{Coord, home_rank, pawn_home_rank},
    modifier::Modifier,
    piece::{ColoredPieceKind, PieceKind},
    square::Square,
};

/// The 64 squares of a position, indexed by [`Coord`]. This is also the
/// signature used for repetition counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([Square; 64]);

impl Board {
    pub fn empty() -> Self {
        Board([Square::EMPTY; 64])
    }
    pub fn starting_position() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (x, piece) in (0..).zip(PieceKind::STARTING_CONFIGURATION) {
                board[Coord::new(x, home_rank(color))] =
                    Square::with_piece(ColoredPieceKind::new(color, piece));
                board[Coord::new(x, pawn_home_rank(color))] =
                    Square::with_piece(ColoredPieceKind::new(color, PieceKind::Pawn));
            }
        }
        board
    }
    pub fn squares(&self) -> impl Iterator<Item = (Coord, Square)> + '_ {
        Coord::all().zip(self.0.iter().copied())
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, ColoredPieceKind)> + '_ {
        self.squares()
            .filter_map(|(position, square)| Some((position, square.piece()?)))
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, ColoredPieceKind)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }
    pub fn king(&self, color: Color) -> Option<Coord> {
        let king = ColoredPieceKind::new(color, PieceKind::King);
        self.pieces()
            .find_map(|(position, piece)| (piece == king).then_some(position))
    }
    pub fn with_modifier(&self, modifier: Modifier) -> impl Iterator<Item = Coord> + '_ {
        self.squares()
            .filter_map(move |(position, square)| square.has(modifier).then_some(position))
    }
    pub fn clear_en_passant(&mut self) {
        for square in &mut self.0 {
            if square.en_passant().is_some() {
                square.occupant = None;
            }
        }
    }
    pub fn has_modifiers(&self) -> bool {
        self.0.iter().any(|square| square.modifier.is_some())
    }
}
impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}
impl Index<Coord> for Board {
    type Output = Square;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.0[index.index()]
    }
}
impl IndexMut<Coord> for Board {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}
impl From<[Square; 64]> for Board {
    fn from(value: [Square; 64]) -> Self {
        Board(value)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord,
        piece::{ColoredPieceKind, PieceKind},
    };

    #[test]
    fn starting_position_layout() {
        let board = Board::starting_position();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.king(Color::White), Some(coord!("e1")));
        assert_eq!(board.king(Color::Black), Some(coord!("e8")));
        assert_eq!(
            board[coord!("d8")].piece(),
            Some(ColoredPieceKind::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(
            board[coord!("b1")].piece(),
            Some(ColoredPieceKind::new(Color::White, PieceKind::Knight))
        );
        assert!(!board.has_modifiers());
    }
}
