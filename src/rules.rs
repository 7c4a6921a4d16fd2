use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{
    board::Board,
    coord::{Vector, home_rank, pawn_home_rank, pawn_promotion_rank},
    danger::in_check,
    end_state::MoveResult,
    modifier::Modifier,
    movegen::{castling_sides, movable_squares},
    notation::{Move, Placement},
    piece::{ColoredPieceKind, PieceKind},
    placement::{self, InvalidPlacement},
    register::CastlingSide,
    square::Occupant,
    state::State,
};

/// An action that ends the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Move),
    Place(Placement),
}
impl From<Move> for Action {
    fn from(value: Move) -> Self {
        Action::Move(value)
    }
}
impl From<Placement> for Action {
    fn from(value: Placement) -> Self {
        Action::Place(value)
    }
}
impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(movement) => write!(f, "{movement}")?,
            Action::Place(placement) => write!(f, "{placement}")?,
        }
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidAction {
    SameSquare,
    NoPiece,
    WrongColor,
    Unreachable,
    MissingPromotion,
    InvalidPromotion(PieceKind),
    Placement(InvalidPlacement),
}
impl From<InvalidPlacement> for InvalidAction {
    fn from(value: InvalidPlacement) -> Self {
        InvalidAction::Placement(value)
    }
}
impl Display for InvalidAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidAction::SameSquare => write!(f, "origin and destination are the same")?,
            InvalidAction::NoPiece => write!(f, "no piece found on the origin")?,
            InvalidAction::WrongColor => write!(f, "the piece belongs to the opponent")?,
            InvalidAction::Unreachable => write!(f, "the piece cannot reach the destination")?,
            InvalidAction::MissingPromotion => write!(f, "a promotion piece is required")?,
            InvalidAction::InvalidPromotion(piece) => write!(f, "cannot promote to {piece}")?,
            InvalidAction::Placement(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for InvalidAction {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InvalidAction::Placement(err) => Some(err),
            _ => None,
        }
    }
}
/// Why an action was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    Invalid(InvalidAction),
    /// The action would leave the mover's own king attacked. `allowance` tells
    /// whether the mover still had its illegal allowance.
    Illegal { allowance: bool },
}
impl From<InvalidAction> for Rejection {
    fn from(value: InvalidAction) -> Self {
        Rejection::Invalid(value)
    }
}
impl From<InvalidPlacement> for Rejection {
    fn from(value: InvalidPlacement) -> Self {
        Rejection::Invalid(value.into())
    }
}
impl Rejection {
    pub fn result(self) -> MoveResult {
        match self {
            Rejection::Invalid(_) => MoveResult::Invalid,
            Rejection::Illegal { .. } => MoveResult::Illegal,
        }
    }
}
impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Invalid(err) => write!(f, "{err}")?,
            Rejection::Illegal { .. } => write!(f, "the king would be left in check")?,
        }
        Ok(())
    }
}
impl Error for Rejection {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Rejection::Invalid(err) => Some(err),
            Rejection::Illegal { .. } => None,
        }
    }
}
/// An accepted action with its resolved result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    pub state: State,
    pub result: MoveResult,
}
/// Applies `action` and switches the turn, rejecting it when the mover's king
/// ends up attacked.
pub fn advance(state: &State, action: &Action) -> Result<State, Rejection> {
    let mover = state.turn();
    let mut next = match action {
        Action::Move(movement) => apply_move(state, *movement)?,
        Action::Place(placement) => placement::place(state, *placement)?,
    };
    next.register.switch_turn();
    if in_check(&next.board, mover) {
        return Err(Rejection::Illegal {
            allowance: state.register.illegal_allowance(mover),
        });
    }
    Ok(next)
}
/// Applies `action` and resolves how the game continues.
///
/// `occurrences` reports how many times a board has already been reached in
/// the game; a third occurrence is a draw.
pub fn play(
    state: &State,
    action: &Action,
    occurrences: impl FnOnce(&Board) -> u8,
) -> Result<Transition, Rejection> {
    let mover = state.turn();
    let mut next = advance(state, action)?;
    let result = if !has_legal_move(&next) {
        if in_check(&next.board, next.turn()) {
            MoveResult::Checkmate
        } else {
            MoveResult::Stalemate
        }
    } else if occurrences(&next.board) >= 2 {
        MoveResult::RepeatDraw
    } else {
        let counter = next.counter_mut(mover);
        *counter = counter.saturating_sub(1);
        MoveResult::Move
    };
    Ok(Transition {
        state: next,
        result,
    })
}
/// Piece moves the side to move may attempt, with every promotion choice on
/// the far rank. Legality is not checked.
fn candidates(state: &State) -> impl Iterator<Item = Move> + '_ {
    let color = state.turn();
    state
        .board
        .pieces_of(color)
        .flat_map(move |(origin, piece)| {
            movable_squares(state, origin)
                .squares
                .iter()
                .flat_map(move |destination| {
                    let promotes = piece.piece() == PieceKind::Pawn
                        && destination.y() == pawn_promotion_rank(color);
                    let promotions: &[PieceKind] = if promotes {
                        &PieceKind::PROMOTION_CHOICES
                    } else {
                        &[]
                    };
                    promotions
                        .iter()
                        .copied()
                        .map(Some)
                        .chain((!promotes).then_some(None))
                        .map(move |promotion| Move {
                            origin,
                            destination,
                            promotion,
                        })
                })
        })
}
/// Legal piece moves together with the states they lead to.
pub fn successors(state: &State) -> impl Iterator<Item = (Move, State)> + '_ {
    candidates(state).filter_map(move |movement| {
        advance(state, &Action::Move(movement))
            .ok()
            .map(|next| (movement, next))
    })
}
pub fn legal_moves(state: &State) -> Vec<Move> {
    successors(state).map(|(movement, _)| movement).collect()
}
pub fn has_legal_move(state: &State) -> bool {
    candidates(state).any(|movement| advance(state, &Action::Move(movement)).is_ok())
}
/// Counts the leaves of the legal piece move tree.
pub fn perft(state: &State, depth: u32) -> u64 {
    match depth {
        0 => 1,
        1 => successors(state).count() as u64,
        depth => successors(state)
            .map(|(_, next)| perft(&next, depth - 1))
            .sum(),
    }
}
fn apply_move(state: &State, movement: Move) -> Result<State, InvalidAction> {
    let Move {
        origin,
        destination,
        promotion,
    } = movement;
    if origin == destination {
        return Err(InvalidAction::SameSquare);
    }
    let piece = state.board[origin].piece().ok_or(InvalidAction::NoPiece)?;
    let color = piece.color();
    if color != state.turn() {
        return Err(InvalidAction::WrongColor);
    }
    if !movable_squares(state, origin).contains(destination) {
        return Err(InvalidAction::Unreachable);
    }
    let is_pawn = piece.piece() == PieceKind::Pawn;
    let landing = match promotion {
        _ if !is_pawn || destination.y() != pawn_promotion_rank(color) => {
            if let Some(promotion) = promotion {
                return Err(InvalidAction::InvalidPromotion(promotion));
            }
            piece
        }
        None => return Err(InvalidAction::MissingPromotion),
        Some(promotion) if promotion.is_promotion_choice() => {
            ColoredPieceKind::new(color, promotion)
        }
        Some(promotion) => return Err(InvalidAction::InvalidPromotion(promotion)),
    };
    let castling = if piece.piece() == PieceKind::King {
        castling_sides(state, origin)
            .find(|side| origin.with_x(side.king_destination()) == destination)
    } else {
        None
    };
    let mut next = state.clone();
    let board = &mut next.board;
    let from = board[origin];
    let to = board[destination];

    if is_pawn {
        if let Some(marker) = to.en_passant().filter(|marker| *marker != color) {
            if let Some(passed) = destination.move_by(Vector::pawn_single_move(marker)) {
                if board[passed]
                    .piece()
                    .is_some_and(|victim| victim.is(marker, PieceKind::Pawn))
                {
                    board[passed].occupant = None;
                }
            }
        }
    }
    let carried = match from.modifier {
        Some(Modifier::ReversePawn) if is_pawn => {
            board[origin].modifier = None;
            Some(Modifier::ReversePawn)
        }
        Some(Modifier::Trench) if is_pawn => {
            board[origin].modifier = None;
            None
        }
        _ => None,
    };
    board[origin].occupant = None;
    board[destination].occupant = Some(Occupant::Piece(landing));
    board[destination].modifier = match (carried, to.modifier) {
        (Some(modifier), _) => Some(modifier),
        (None, Some(Modifier::Trench | Modifier::ReversePawn)) => None,
        (None, modifier) => modifier,
    };
    if let Some(side) = castling {
        let rook_origin = origin.with_x(side.rook_origin());
        let rook_destination = origin.with_x(side.rook_destination());
        board[rook_destination].occupant = board[rook_origin].occupant.take();
    }

    match piece.piece() {
        PieceKind::King => next.register.clear_castling(color),
        PieceKind::Rook if origin.y() == home_rank(color) => {
            if let Some(side) = CastlingSide::from_rook_origin(origin.x()) {
                next.register.remove_castling(color, side);
            }
        }
        _ => (),
    }
    if let Some(victim) = to.piece() {
        if victim.piece() == PieceKind::Rook && destination.y() == home_rank(victim.color()) {
            if let Some(side) = CastlingSide::from_rook_origin(destination.x()) {
                next.register.remove_castling(victim.color(), side);
            }
        }
    }

    let board = &mut next.board;
    board.clear_en_passant();
    let single = Vector::pawn_single_move(color);
    if is_pawn
        && carried.is_none()
        && origin.y() == pawn_home_rank(color)
        && origin.move_by(single * 2) == Some(destination)
    {
        if let Some(skipped) = origin.move_by(single) {
            if board[skipped].is_vacant() {
                board[skipped].occupant = Some(Occupant::EnPassant(color));
            }
        }
    }
    Ok(next)
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord,
        coord::Coord,
        end_state::MoveResult,
        fen::Fen,
        modifier::Modifier,
        notation::Move,
        piece::{ColoredPieceKind, PieceKind},
        register::CastlingSide,
        rules::{Action, InvalidAction, Rejection, advance, legal_moves, perft, play},
        state::State,
    };

    fn state(fen: &str) -> State {
        fen.parse::<Fen>().unwrap().0
    }
    fn movement(origin: Coord, destination: Coord) -> Action {
        Action::Move(Move {
            origin,
            destination,
            promotion: None,
        })
    }
    fn promotion(origin: Coord, destination: Coord, piece: PieceKind) -> Action {
        Action::Move(Move {
            origin,
            destination,
            promotion: Some(piece),
        })
    }
    fn never_seen(_: &Board) -> u8 {
        0
    }

    #[test]
    fn starting_position_move_counts() {
        let state = State::starting_position();
        assert_eq!(legal_moves(&state).len(), 20);
        assert_eq!(perft(&state, 2), 400);
    }
    #[test]
    fn rejection_reasons() {
        let state = State::starting_position();
        let reason = |action| advance(&state, &action).unwrap_err();
        assert_eq!(
            reason(movement(coord!("e2"), coord!("e2"))),
            Rejection::Invalid(InvalidAction::SameSquare)
        );
        assert_eq!(
            reason(movement(coord!("e4"), coord!("e5"))),
            Rejection::Invalid(InvalidAction::NoPiece)
        );
        assert_eq!(
            reason(movement(coord!("e7"), coord!("e5"))),
            Rejection::Invalid(InvalidAction::WrongColor)
        );
        assert_eq!(
            reason(movement(coord!("e2"), coord!("e5"))),
            Rejection::Invalid(InvalidAction::Unreachable)
        );
    }
    #[test]
    fn move_switches_turn_and_decrements_counter() {
        let state = State::starting_position();
        let transition = play(&state, &movement(coord!("e2"), coord!("e4")), never_seen).unwrap();
        assert_eq!(transition.result, MoveResult::Move);
        assert_eq!(transition.state.turn(), Color::Black);
        assert_eq!(transition.state.white_counter, state.white_counter - 1);
        assert_eq!(transition.state.black_counter, state.black_counter);
        assert_eq!(
            transition.state.board[coord!("e3")].en_passant(),
            Some(Color::White)
        );
    }
    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let state = state("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let next = advance(&state, &movement(coord!("e5"), coord!("d6"))).unwrap();
        assert!(next.board[coord!("d5")].is_vacant());
        assert_eq!(
            next.board[coord!("d6")].piece(),
            Some(ColoredPieceKind::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(next.board[coord!("d6")].en_passant(), None);
    }
    #[test]
    fn en_passant_marker_expires_after_one_action() {
        let state = state("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
        let state = advance(&state, &movement(coord!("d7"), coord!("d5"))).unwrap();
        assert_eq!(state.board[coord!("d6")].en_passant(), Some(Color::Black));
        let later = advance(&state, &movement(coord!("e1"), coord!("e2"))).unwrap();
        assert_eq!(later.board[coord!("d6")].en_passant(), None);
        let later = advance(&later, &movement(coord!("e8"), coord!("e7"))).unwrap();
        assert_eq!(
            advance(&later, &movement(coord!("e5"), coord!("d6"))),
            Err(Rejection::Invalid(InvalidAction::Unreachable))
        );
    }
    #[test]
    fn promotion_requires_a_piece() {
        let state = state("8/P3k3/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            advance(&state, &movement(coord!("a7"), coord!("a8"))),
            Err(Rejection::Invalid(InvalidAction::MissingPromotion))
        );
        assert_eq!(
            advance(
                &state,
                &promotion(coord!("a7"), coord!("a8"), PieceKind::King),
            ),
            Err(Rejection::Invalid(InvalidAction::InvalidPromotion(
                PieceKind::King
            )))
        );
        let next = advance(
            &state,
            &promotion(coord!("a7"), coord!("a8"), PieceKind::Knight),
        )
        .unwrap();
        assert_eq!(
            next.board[coord!("a8")].piece(),
            Some(ColoredPieceKind::new(Color::White, PieceKind::Knight))
        );
        assert_eq!(
            legal_moves(&state)
                .iter()
                .filter(|m| m.origin == coord!("a7"))
                .count(),
            4
        );
    }
    #[test]
    fn castling_moves_the_rook_and_clears_rights() {
        let state = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let next = advance(&state, &movement(coord!("e1"), coord!("g1"))).unwrap();
        assert_eq!(
            next.board[coord!("f1")].piece(),
            Some(ColoredPieceKind::new(Color::White, PieceKind::Rook))
        );
        assert!(next.board[coord!("h1")].is_vacant());
        let register = next.register;
        assert!(!register.castling(Color::White, CastlingSide::QueenSide));
        assert!(register.castling(Color::Black, CastlingSide::KingSide));

        let next = advance(&state, &movement(coord!("e1"), coord!("c1"))).unwrap();
        assert_eq!(
            next.board[coord!("d1")].piece(),
            Some(ColoredPieceKind::new(Color::White, PieceKind::Rook))
        );
    }
    #[test]
    fn rook_moves_and_captures_clear_rights() {
        let state = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let next = advance(&state, &movement(coord!("h1"), coord!("h8"))).unwrap();
        let register = next.register;
        assert!(!register.castling(Color::White, CastlingSide::KingSide));
        assert!(register.castling(Color::White, CastlingSide::QueenSide));
        assert!(!register.castling(Color::Black, CastlingSide::KingSide));
        assert!(register.castling(Color::Black, CastlingSide::QueenSide));
    }
    #[test]
    fn leaving_the_king_attacked_is_illegal() {
        let state = state("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
        assert_eq!(
            advance(&state, &movement(coord!("e2"), coord!("d3"))),
            Err(Rejection::Illegal { allowance: true })
        );
        let mut spent = state.clone();
        spent.register.consume_illegal_allowance(Color::White);
        assert_eq!(
            advance(&spent, &movement(coord!("e2"), coord!("d3"))),
            Err(Rejection::Illegal { allowance: false })
        );
    }
    #[test]
    fn checkmate_and_stalemate() {
        let mate = state("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let transition = play(&mate, &movement(coord!("a1"), coord!("a8")), never_seen).unwrap();
        assert_eq!(transition.result, MoveResult::Checkmate);

        let stale = state("7k/8/5K2/8/8/8/8/6Q1 w - - 0 1");
        let transition = play(&stale, &movement(coord!("g1"), coord!("g6")), never_seen).unwrap();
        assert_eq!(transition.result, MoveResult::Stalemate);
    }
    #[test]
    fn third_occurrence_is_a_draw() {
        let state = State::starting_position();
        let action = movement(coord!("g1"), coord!("f3"));
        let twice = play(&state, &action, |_| 2).unwrap();
        assert_eq!(twice.result, MoveResult::RepeatDraw);
        assert_eq!(twice.state.white_counter, state.white_counter);
        let once = play(&state, &action, |_| 1).unwrap();
        assert_eq!(once.result, MoveResult::Move);
    }
    #[test]
    fn trench_pawn_cannot_be_taken_by_a_rook() {
        let mut state = state("4k3/8/8/3p4/8/8/8/3RK3 w - - 0 1");
        state.board[coord!("d5")].modifier = Some(Modifier::Trench);
        assert_eq!(
            advance(&state, &movement(coord!("d1"), coord!("d5"))),
            Err(Rejection::Invalid(InvalidAction::Unreachable))
        );
        assert!(advance(&state, &movement(coord!("d1"), coord!("d4"))).is_ok());
    }
    #[test]
    fn pawn_leaving_a_trench_consumes_it() {
        let mut state = State::starting_position();
        state.board[coord!("e2")].modifier = Some(Modifier::Trench);
        let next = advance(&state, &movement(coord!("e2"), coord!("e4"))).unwrap();
        assert_eq!(next.board[coord!("e2")].modifier, None);
        assert_eq!(next.board[coord!("e4")].modifier, None);
    }
    #[test]
    fn reversed_pawn_carries_its_modifier() {
        let mut state = state("4k3/8/8/3P4/8/8/8/4K3 w - - 0 1");
        state.board[coord!("d5")].modifier = Some(Modifier::ReversePawn);
        let next = advance(&state, &movement(coord!("d5"), coord!("d4"))).unwrap();
        assert_eq!(next.board[coord!("d5")].modifier, None);
        assert!(next.board[coord!("d4")].has(Modifier::ReversePawn));
    }
    #[test]
    fn pieces_keep_portals_under_them() {
        let mut state = state("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        state.board[coord!("a4")].modifier = Some(Modifier::Portal);
        let next = advance(&state, &movement(coord!("a1"), coord!("a4"))).unwrap();
        assert!(next.board[coord!("a4")].has(Modifier::Portal));
    }
}
