use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    color::Color,
    coord::Coord,
    error::InvalidSnapshot,
    hand::{CARD_DRAW_COUNTER_INITIAL_VALUE, Hand},
    piece::PieceKind,
    register::Register,
    square::Square,
};

pub const RAW_LEN: usize = 69;
/// Older snapshots carry only the squares and the register.
pub const LEGACY_RAW_LEN: usize = 65;

const REGISTER_INDEX: usize = 64;
const WHITE_HAND_INDEX: usize = 65;
const BLACK_HAND_INDEX: usize = 66;
const WHITE_COUNTER_INDEX: usize = 67;
const BLACK_COUNTER_INDEX: usize = 68;

/// A full game snapshot. Serializes as its flat raw form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<u32>", try_from = "Vec<u32>")]
pub struct State {
    pub board: Board,
    pub register: Register,
    pub white_hand: Hand,
    pub black_hand: Hand,
    pub white_counter: u8,
    pub black_counter: u8,
}
impl State {
    pub fn starting_position() -> Self {
        State::with_board(Board::starting_position())
    }
    pub fn empty() -> Self {
        State::with_board(Board::empty())
    }
    fn with_board(board: Board) -> Self {
        State {
            board,
            register: Register::DEFAULT,
            white_hand: Hand::full(),
            black_hand: Hand::full(),
            white_counter: CARD_DRAW_COUNTER_INITIAL_VALUE,
            black_counter: CARD_DRAW_COUNTER_INITIAL_VALUE,
        }
    }
    pub fn turn(&self) -> Color {
        self.register.turn()
    }
    pub fn hand(&self, color: Color) -> Hand {
        match color {
            Color::White => self.white_hand,
            Color::Black => self.black_hand,
        }
    }
    pub fn hand_mut(&mut self, color: Color) -> &mut Hand {
        match color {
            Color::White => &mut self.white_hand,
            Color::Black => &mut self.black_hand,
        }
    }
    pub fn counter(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white_counter,
            Color::Black => self.black_counter,
        }
    }
    pub fn counter_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white_counter,
            Color::Black => &mut self.black_counter,
        }
    }
    pub fn to_raw(&self) -> [u32; RAW_LEN] {
        let mut raw = [0; RAW_LEN];
        for (value, (_, square)) in raw.iter_mut().zip(self.board.squares()) {
            *value = square.into();
        }
        raw[REGISTER_INDEX] = u8::from(self.register).into();
        raw[WHITE_HAND_INDEX] = self.white_hand.into();
        raw[BLACK_HAND_INDEX] = self.black_hand.into();
        raw[WHITE_COUNTER_INDEX] = self.white_counter.into();
        raw[BLACK_COUNTER_INDEX] = self.black_counter.into();
        raw
    }
    pub fn from_raw(raw: &[u32]) -> Result<Self, InvalidSnapshot> {
        if raw.len() != RAW_LEN && raw.len() != LEGACY_RAW_LEN {
            return Err(InvalidSnapshot::Length(raw.len()));
        }
        let mut squares = [Square::EMPTY; 64];
        for ((square, value), position) in squares.iter_mut().zip(raw).zip(Coord::all()) {
            *square =
                Square::try_from(*value).map_err(|err| InvalidSnapshot::Square(position, err))?;
        }
        let board = Board::from(squares);
        for color in Color::ALL {
            let kings = board
                .pieces_of(color)
                .filter(|(_, piece)| piece.piece() == PieceKind::King)
                .count();
            if kings > 1 {
                return Err(InvalidSnapshot::MultipleKings);
            }
        }
        let register = u8::try_from(raw[REGISTER_INDEX])
            .map_err(|_| InvalidSnapshot::Register(raw[REGISTER_INDEX]))?
            .into();
        let (white_hand, black_hand, white_counter, black_counter) = if raw.len() == RAW_LEN {
            let counter = |index: usize| {
                u8::try_from(raw[index]).map_err(|_| InvalidSnapshot::Counter(raw[index]))
            };
            (
                Hand::try_from(raw[WHITE_HAND_INDEX])?,
                Hand::try_from(raw[BLACK_HAND_INDEX])?,
                counter(WHITE_COUNTER_INDEX)?,
                counter(BLACK_COUNTER_INDEX)?,
            )
        } else {
            (
                Hand::EMPTY,
                Hand::EMPTY,
                CARD_DRAW_COUNTER_INITIAL_VALUE,
                CARD_DRAW_COUNTER_INITIAL_VALUE,
            )
        };
        Ok(State {
            board,
            register,
            white_hand,
            black_hand,
            white_counter,
            black_counter,
        })
    }
}
impl Default for State {
    fn default() -> Self {
        State::starting_position()
    }
}
impl From<State> for Vec<u32> {
    fn from(value: State) -> Self {
        value.to_raw().to_vec()
    }
}
impl TryFrom<Vec<u32>> for State {
    type Error = InvalidSnapshot;

    fn try_from(value: Vec<u32>) -> Result<Self, Self::Error> {
        State::from_raw(&value)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        coord,
        error::InvalidSnapshot,
        hand::Hand,
        modifier::Modifier,
        state::{RAW_LEN, State},
    };

    #[test]
    fn starting_position_raw_values() {
        let raw = State::starting_position().to_raw();
        assert_eq!(raw[..8], [10, 12, 11, 13, 14, 11, 12, 10]);
        assert_eq!(raw[8..16], [9; 8]);
        assert_eq!(raw[48..56], [17; 8]);
        assert_eq!(raw[56..64], [18, 20, 19, 21, 22, 19, 20, 18]);
        assert_eq!(raw[64], 126);
        assert_eq!(raw[67..], [4, 4]);
    }
    #[test]
    fn raw_round_trip_keeps_modifiers_and_cards() {
        let mut state = State::starting_position();
        state.board[coord!("d4")].modifier = Some(Modifier::Portal);
        state.black_hand = [Modifier::ShovePawn].into_iter().collect();
        state.white_counter = 0;
        let raw = state.to_raw();
        assert_eq!(raw.len(), RAW_LEN);
        assert_eq!(State::from_raw(&raw), Ok(state));
    }
    #[test]
    fn legacy_snapshot_gets_empty_hands() {
        let raw = State::starting_position().to_raw();
        let state = State::from_raw(&raw[..65]).unwrap();
        assert_eq!(state.white_hand, Hand::EMPTY);
        assert_eq!(state.black_counter, 4);
    }
    #[test]
    fn malformed_snapshots_are_rejected() {
        let raw = State::starting_position().to_raw();
        assert_eq!(
            State::from_raw(&raw[..60]),
            Err(InvalidSnapshot::Length(60))
        );
        let mut two_kings = raw;
        two_kings[20] = 14;
        assert_eq!(
            State::from_raw(&two_kings),
            Err(InvalidSnapshot::MultipleKings)
        );
        let mut bad_square = raw;
        bad_square[30] = 8;
        assert!(matches!(
            State::from_raw(&bad_square),
            Err(InvalidSnapshot::Square(_, _))
        ));
    }
    #[test]
    fn serializes_as_flat_numbers() {
        let state = State::starting_position();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.starts_with("[10,12,11,13,14,11,12,10,9,"));
        let back: State = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
