use crate::{
    board::Board,
    color::Color,
    coord::{Coord, Vector, pawn_direction, pawn_home_rank},
    modifier::Modifier,
    square_set::SquareSet,
};

/// Squares a piece may land on, plus the subset holding an opposing piece.
///
/// An opposing pawn on a trench can appear in `captures` without appearing in
/// `squares`: the piece sees it but cannot take it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Reach {
    pub squares: SquareSet,
    pub captures: SquareSet,
}
impl Reach {
    /// Landing squares that hold no piece.
    pub fn quiet(self) -> SquareSet {
        self.squares & !self.captures
    }
    pub fn contains(self, position: Coord) -> bool {
        self.squares.contains(position)
    }
    fn merge(&mut self, other: Reach) {
        self.squares |= other.squares;
        self.captures |= other.captures;
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Stop {
    Continue,
    Stop,
}
/// Records what `color` may do on `target`. Trenches shield pawns unless the
/// mover jumps.
fn land(board: &Board, target: Coord, color: Color, jumps: bool, reach: &mut Reach) -> Stop {
    let square = board[target];
    match square.piece() {
        None => {
            reach.squares.insert(target);
            Stop::Continue
        }
        Some(piece) if piece.color() == color => Stop::Stop,
        Some(_) => {
            reach.captures.insert(target);
            if jumps || !square.is_entrenched() {
                reach.squares.insert(target);
            }
            Stop::Stop
        }
    }
}
pub fn ray(board: &Board, origin: Coord, direction: Vector, depth: u8, color: Color) -> Reach {
    let mut reach = Reach::default();
    for target in origin.line(direction).take(depth.into()) {
        if land(board, target, color, false, &mut reach) == Stop::Stop {
            break;
        }
    }
    reach
}
pub fn rays(board: &Board, origin: Coord, directions: &[Vector], depth: u8, color: Color) -> Reach {
    let mut reach = Reach::default();
    for direction in directions {
        reach.merge(ray(board, origin, *direction, depth, color));
    }
    reach
}
pub fn knight(board: &Board, origin: Coord, color: Color) -> Reach {
    let mut reach = Reach::default();
    for target in Vector::KNIGHT_MOVES
        .into_iter()
        .filter_map(|movement| origin.move_by(movement))
    {
        land(board, target, color, true, &mut reach);
    }
    reach
}
/// Forward direction of a pawn standing on `origin`, flipped by a reverse tile.
pub fn pawn_forward(board: &Board, origin: Coord, color: Color) -> i8 {
    if board[origin].has(Modifier::ReversePawn) {
        -pawn_direction(color)
    } else {
        pawn_direction(color)
    }
}
/// Rank a pawn moving in `direction` may advance two squares from.
pub fn double_step_rank(direction: i8) -> u8 {
    if direction > 0 {
        pawn_home_rank(Color::White)
    } else {
        pawn_home_rank(Color::Black)
    }
}
pub fn pawn(board: &Board, origin: Coord, color: Color) -> Reach {
    let mut reach = Reach::default();
    let direction = pawn_forward(board, origin, color);

    let steps = if origin.y() == double_step_rank(direction) {
        2
    } else {
        1
    };
    for target in origin.line(Vector::forward(direction)).take(steps) {
        if board[target].is_vacant() {
            reach.squares.insert(target);
        } else {
            break;
        }
    }
    for target in Vector::diagonals(direction)
        .into_iter()
        .filter_map(|movement| origin.move_by(movement))
    {
        let square = board[target];
        match square.piece() {
            Some(piece) if piece.color() != color => {
                reach.captures.insert(target);
                if !square.is_entrenched() {
                    reach.squares.insert(target);
                }
            }
            Some(_) => (),
            None => {
                if square.en_passant() == Some(!color) {
                    reach.squares.insert(target);
                }
            }
        }
    }
    reach
}
