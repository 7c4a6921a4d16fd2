use std::{
    collections::BTreeMap,
    error::Error,
    fmt::{self, Display, Formatter},
};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    coord::Coord,
    end_state::{EndState, MoveResult},
    hand::{CARD_DRAW_COUNTER_INITIAL_VALUE, CARDS_OFFERED_PER_DRAW, Hand, MAX_CARDS_IN_HAND},
    history::History,
    modifier::Modifier,
    movegen::movable_squares,
    notation::{Move, Notation},
    ray::Reach,
    rules::{self, Action, Rejection},
    square::Square,
    state::State,
};

/// Setup exchanged between two players before a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialState {
    pub is_white: bool,
    pub white_cards: Hand,
    pub black_cards: Hand,
    pub white_card_draw_counter: u8,
    pub black_card_draw_counter: u8,
}
impl InitialState {
    /// Random side, hands left for the engine to deal.
    pub fn random(rng: &mut impl Rng) -> Self {
        InitialState {
            is_white: rng.random(),
            ..InitialState::default()
        }
    }
}
impl Default for InitialState {
    fn default() -> Self {
        InitialState {
            is_white: true,
            white_cards: Hand::EMPTY,
            black_cards: Hand::EMPTY,
            white_card_draw_counter: CARD_DRAW_COUNTER_INITIAL_VALUE,
            black_card_draw_counter: CARD_DRAW_COUNTER_INITIAL_VALUE,
        }
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum LogEntry {
    InitialState(State),
    Move(String),
    CardSelection(Vec<Modifier>),
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub last_move_state: MoveResult,
    pub current_turn: Color,
}
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsView {
    pub white_cards: Vec<Modifier>,
    pub black_cards: Vec<Modifier>,
    pub white_card_draw_counter: u8,
    pub black_card_draw_counter: u8,
}
/// Everything a front end needs to draw the game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionsView {
    /// Square name to piece letter and modifier glyph, blank squares omitted.
    pub board: BTreeMap<String, [Option<char>; 2]>,
    pub summary: Summary,
    pub cards: CardsView,
    pub history: Vec<LogEntry>,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardSelectionError {
    GameOver,
    DraftClosed,
    TooManyCards(usize),
}
impl Display for CardSelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CardSelectionError::GameOver => write!(f, "the game is over")?,
            CardSelectionError::DraftClosed => write!(f, "no cards can be drawn this turn")?,
            CardSelectionError::TooManyCards(count) => {
                write!(
                    f,
                    "{count} cards selected, at most {MAX_CARDS_IN_HAND} allowed"
                )?;
            }
        }
        Ok(())
    }
}
impl Error for CardSelectionError {}

/// A game in progress: the live snapshot, its history, and the move log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    history: History,
    log: Vec<LogEntry>,
    last_result: MoveResult,
    end_state: Option<EndState>,
    resigned: Option<Color>,
}
impl Engine {
    pub fn new() -> Self {
        Engine::with_state(State::starting_position())
    }
    pub fn with_state(state: State) -> Self {
        Engine {
            log: vec![LogEntry::InitialState(state.clone())],
            history: History::new(state),
            last_result: MoveResult::Move,
            end_state: None,
            resigned: None,
        }
    }
    /// Restarts from a full snapshot, for replays and resumed games.
    pub fn initialize_with_state(&mut self, state: State) {
        *self = Engine::with_state(state);
    }
    /// Restarts from the starting layout with the exchanged setup. Empty hands
    /// on both sides are dealt one of every card. Returns the setup in use.
    pub fn initialize_game(&mut self, initial: InitialState) -> InitialState {
        let mut initial = initial;
        if initial.white_cards.is_empty() && initial.black_cards.is_empty() {
            initial.white_cards = Hand::full();
            initial.black_cards = Hand::full();
        }
        let state = State {
            white_hand: initial.white_cards,
            black_hand: initial.black_cards,
            white_counter: initial.white_card_draw_counter,
            black_counter: initial.black_card_draw_counter,
            ..State::starting_position()
        };
        self.initialize_with_state(state);
        initial
    }
    pub fn state(&self) -> &State {
        self.history.current()
    }
    pub fn history(&self) -> &History {
        &self.history
    }
    pub fn current_turn(&self) -> Color {
        self.state().turn()
    }
    pub fn last_result(&self) -> MoveResult {
        self.last_result
    }
    pub fn end_state(&self) -> Option<EndState> {
        self.end_state
    }
    pub fn move_log(&self) -> &[LogEntry] {
        &self.log
    }
    /// Parses and plays a notation. Malformed notation is `INVALID`.
    pub fn play(&mut self, notation: &str) -> MoveResult {
        match notation.parse() {
            Ok(notation) => self.play_notation(notation),
            Err(_) => {
                self.last_result = MoveResult::Invalid;
                MoveResult::Invalid
            }
        }
    }
    pub fn play_notation(&mut self, notation: Notation) -> MoveResult {
        let result = self.resolve(notation);
        self.last_result = result;
        result
    }
    fn resolve(&mut self, notation: Notation) -> MoveResult {
        if self.end_state.is_some() {
            return MoveResult::Invalid;
        }
        let action = match notation {
            Notation::Resign(color) => {
                self.resigned = Some(color);
                self.end_state = Some(EndState::Win(!color));
                self.log.push(LogEntry::Move(notation.to_string()));
                return MoveResult::Checkmate;
            }
            Notation::Move(movement) => Action::Move(movement),
            Notation::Place(placement) => Action::Place(placement),
        };
        let state = self.state();
        let mover = state.turn();
        let history = &self.history;
        match rules::play(state, &action, |board| history.occurrences(board)) {
            Ok(transition) => {
                self.end_state = match transition.result {
                    MoveResult::Checkmate => Some(EndState::Win(mover)),
                    MoveResult::Stalemate | MoveResult::RepeatDraw => Some(EndState::Draw),
                    _ => None,
                };
                self.history.commit(transition.state);
                self.log.push(LogEntry::Move(notation.to_string()));
                transition.result
            }
            Err(Rejection::Illegal { allowance: true }) => {
                let mut state = self.state().clone();
                state.register.consume_illegal_allowance(mover);
                self.history.amend(state);
                MoveResult::Illegal
            }
            Err(rejection) => rejection.result(),
        }
    }
    /// Destinations of the piece on `position`, before king safety.
    pub fn movable_squares(&self, position: Coord) -> Reach {
        movable_squares(self.state(), position)
    }
    pub fn legal_moves(&self) -> Vec<Move> {
        rules::legal_moves(self.state())
    }
    pub fn perft(&self, depth: u32) -> u64 {
        rules::perft(self.state(), depth)
    }
    /// Takes back the last applied action, or the resignation.
    pub fn undo_move(&mut self) -> bool {
        if self.resigned.take().is_some() {
            self.log.pop();
        } else if self.history.undo() {
            while let Some(LogEntry::CardSelection(_)) = self.log.last() {
                self.log.pop();
            }
            if let Some(LogEntry::Move(_)) = self.log.last() {
                self.log.pop();
            }
        } else {
            return false;
        }
        self.end_state = None;
        self.last_result = MoveResult::Move;
        true
    }
    /// Cards to choose from when the side to move may draw: its hand plus
    /// freshly drawn ones.
    pub fn card_offer(&self, rng: &mut impl Rng) -> Option<Vec<Modifier>> {
        let state = self.state();
        let color = state.turn();
        if self.end_state.is_some() || state.counter(color) != 0 {
            return None;
        }
        let mut offer: Vec<_> = state.hand(color).iter().collect();
        offer.extend(Hand::random(rng, CARDS_OFFERED_PER_DRAW).iter());
        Some(offer)
    }
    /// Replaces the hand of the side to move with `cards`. Does not add a
    /// snapshot, so drafting never counts toward repetition.
    pub fn apply_card_selection(&mut self, cards: &[Modifier]) -> Result<(), CardSelectionError> {
        if self.end_state.is_some() {
            return Err(CardSelectionError::GameOver);
        }
        if cards.len() > MAX_CARDS_IN_HAND {
            return Err(CardSelectionError::TooManyCards(cards.len()));
        }
        let mut state = self.state().clone();
        let color = state.turn();
        if state.counter(color) != 0 {
            return Err(CardSelectionError::DraftClosed);
        }
        *state.hand_mut(color) = cards.iter().copied().collect();
        *state.counter_mut(color) = CARD_DRAW_COUNTER_INITIAL_VALUE;
        self.history.amend(state);
        self.log.push(LogEntry::CardSelection(cards.to_vec()));
        Ok(())
    }
    /// Overwrites a square of the live snapshot. Meant for debugging.
    pub fn edit_square(&mut self, position: Coord, square: Square) {
        let mut state = self.state().clone();
        state.board[position] = square;
        self.history.amend(state);
    }
    pub fn positions(&self) -> PositionsView {
        let state = self.state();
        let board = state
            .board
            .squares()
            .filter(|(_, square)| *square != Square::EMPTY)
            .map(|(position, square)| {
                (
                    position.to_string(),
                    [square.letter(), square.modifier.map(Modifier::glyph)],
                )
            })
            .collect();
        PositionsView {
            board,
            summary: Summary {
                last_move_state: self.last_result,
                current_turn: state.turn(),
            },
            cards: CardsView {
                white_cards: state.white_hand.iter().collect(),
                black_cards: state.black_hand.iter().collect(),
                white_card_draw_counter: state.white_counter,
                black_card_draw_counter: state.black_counter,
            },
            history: self.log.clone(),
        }
    }
}
impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
