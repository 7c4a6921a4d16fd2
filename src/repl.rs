use rand::{SeedableRng, rngs::SmallRng};
use trenchess::{
    color::Color,
    coord::{Coord, ParseCoordError},
    end_state::MoveResult,
    engine::{Engine, InitialState},
    error::InvalidSnapshot,
    fen::{Fen, ParseFenError},
    fuzz::cross_check,
    modifier::{Modifier, ParseModifierError},
    notation::{Notation, ParseNotationError, Placement},
    piece::{ColoredPieceKind, InvalidPieceChar},
    rules::{self, Action},
    square::Square,
    state::State,
};

use crate::board_display::BoardDisplay;
use std::{
    error::Error,
    fmt::{self, Display, Formatter, Write as _},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    num::ParseIntError,
    str::FromStr,
};

fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(<char>::is_whitespace))
        .map(<str>::trim_start)
}
fn parse_cards(src: &str) -> Result<Vec<Modifier>, ParseModifierError> {
    let mut cards = Vec::new();
    for token in src.split_whitespace() {
        if let Ok(card) = token.parse() {
            cards.push(card);
        } else {
            for glyph in token.chars() {
                cards.push(glyph.try_into()?);
            }
        }
    }
    Ok(cards)
}
fn parse_square(src: &str) -> Result<Square, ParseInputError> {
    let mut tokens = src.split_whitespace();
    let mut square = Square::EMPTY;
    match tokens.next() {
        Some("-") => (),
        Some(token) => {
            let mut chars = token.chars();
            let (Some(letter), None) = (chars.next(), chars.next()) else {
                return Err(ParseInputError::MissingPiece);
            };
            square = Square::with_piece(ColoredPieceKind::from_letter(letter)?);
        }
        None => return Err(ParseInputError::MissingPiece),
    }
    if let Some(token) = tokens.next() {
        square.modifier = Some(token.parse()?);
    }
    Ok(square)
}
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Help,
    Flip,
    Restart,
    Empty,
    Quit,
    Undo,
    Resign,
    Offer,
    Draft(Vec<Modifier>),
    Add(Coord, Modifier),
    Set(Coord, Square),
    ExportState,
    Load(State),
    Import(Fen),
    ExportFen,
    Json,
    Perft(u32),
    Fuzz(u64),
    Coord(Coord),
    Play(Notation),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Restart => write!(f, "restart")?,
            Input::Empty => write!(f, "empty")?,
            Input::Quit => write!(f, "quit")?,
            Input::Undo => write!(f, "undo")?,
            Input::Resign => write!(f, "resign")?,
            Input::Offer => write!(f, "offer")?,
            Input::Draft(cards) => {
                write!(f, "draft")?;
                for card in cards {
                    write!(f, " {card}")?;
                }
            }
            Input::Add(position, modifier) => write!(f, "add {position} {modifier}")?,
            Input::Set(position, square) => {
                write!(f, "set {position} ")?;
                match square.piece() {
                    Some(piece) => write!(f, "{}", piece.letter())?,
                    None => write!(f, "-")?,
                }
                if let Some(modifier) = square.modifier {
                    write!(f, " {modifier}")?;
                }
            }
            Input::ExportState => write!(f, "state")?,
            Input::Load(state) => {
                write!(f, "load ")?;
                for (i, value) in state.to_raw().into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{value}")?;
                }
            }
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::Json => write!(f, "json")?,
            Input::Perft(depth) => write!(f, "perft {depth}")?,
            Input::Fuzz(positions) => write!(f, "fuzz {positions}")?,
            Input::Coord(position) => write!(f, "{position}")?,
            Input::Play(notation) => write!(f, "{notation}")?,
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "empty" => Ok(Input::Empty),
            "quit" => Ok(Input::Quit),
            "undo" => Ok(Input::Undo),
            "resign" => Ok(Input::Resign),
            "offer" => Ok(Input::Offer),
            "state" => Ok(Input::ExportState),
            "fen" => Ok(Input::ExportFen),
            "json" => Ok(Input::Json),
            s => {
                if let Some(s) = strip_prefix_token(s, "draft") {
                    Ok(Input::Draft(parse_cards(s)?))
                } else if let Some(s) = strip_prefix_token(s, "add") {
                    let (position, modifier) = s
                        .split_once(char::is_whitespace)
                        .ok_or(ParseInputError::MissingModifier)?;
                    Ok(Input::Add(position.parse()?, modifier.trim().parse()?))
                } else if let Some(s) = strip_prefix_token(s, "set") {
                    let (position, square) = s
                        .split_once(char::is_whitespace)
                        .ok_or(ParseInputError::MissingPiece)?;
                    Ok(Input::Set(position.parse()?, parse_square(square)?))
                } else if let Some(s) = strip_prefix_token(s, "load") {
                    let raw = s
                        .split(',')
                        .map(|value| value.trim().parse())
                        .collect::<Result<Vec<u32>, _>>()?;
                    Ok(Input::Load(State::from_raw(&raw)?))
                } else if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "perft") {
                    Ok(Input::Perft(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "fuzz") {
                    Ok(Input::Fuzz(s.parse()?))
                } else if let Ok(position) = s.parse() {
                    Ok(Input::Coord(position))
                } else {
                    Ok(Input::Play(s.parse()?))
                }
            }
        }
    }
}
fn status(engine: &Engine) -> String {
    let state = engine.state();
    let mut info = String::new();
    match engine.end_state() {
        Some(end_state) => writeln!(&mut info, "{end_state}").unwrap(),
        None => writeln!(&mut info, "{} plays", state.turn()).unwrap(),
    }
    writeln!(&mut info, "last result: {}", engine.last_result()).unwrap();
    for color in Color::ALL {
        writeln!(
            &mut info,
            "{color} cards: {} (draw in {})",
            state.hand(color),
            state.counter(color),
        )
        .unwrap();
    }
    info
}
#[allow(
    clippy::too_many_lines,
    reason = "further decomposition could potentially hurt readability"
)]
pub fn repl() -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();

    let mut engine = Engine::new();
    let mut highlighted = Vec::new();
    let mut view = Color::White;
    let mut first_time = true;
    loop {
        let mut info = status(&engine);
        if first_time {
            writeln!(&mut info, "type `help` for instructions").unwrap();
            first_time = false;
        }
        writeln!(
            output,
            "{}",
            BoardDisplay {
                board: &engine.state().board,
                view,
                highlighted: &highlighted,
                info: &info,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let text = text?;
            let input = match text.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available command, enter `help`")?;
                    continue;
                }
            };
            let notation = match input {
                Input::Help => {
                    writeln!(output, "flip              - flip the board")?;
                    writeln!(output, "restart           - start a new game")?;
                    writeln!(output, "empty             - clear the board")?;
                    writeln!(output, "quit              - quit the game")?;
                    writeln!(output, "e2                - view legal moves")?;
                    writeln!(output, "e2 e4             - play the move")?;
                    writeln!(output, "e7 e8 q           - move and promote")?;
                    writeln!(output, "add e4 portal     - place a modifier card")?;
                    writeln!(
                        output,
                        "set e4 P trench   - overwrite a square (`-` empties it)"
                    )?;
                    writeln!(output, "resign            - resign the game")?;
                    writeln!(output, "undo              - take back the last action")?;
                    writeln!(output, "offer             - show the cards on offer")?;
                    writeln!(output, "draft trench ...  - keep these cards")?;
                    writeln!(output, "state             - export the raw snapshot")?;
                    writeln!(output, "load <values>     - import a raw snapshot")?;
                    writeln!(output, "import <fen>      - import a position")?;
                    writeln!(output, "fen               - export the position as fen")?;
                    writeln!(output, "json              - export the positions view")?;
                    writeln!(output, "perft <depth>     - count legal move paths")?;
                    writeln!(
                        output,
                        "fuzz <positions>  - compare against the chess crate"
                    )?;
                    continue;
                }
                Input::Flip => {
                    view = !view;
                    break;
                }
                Input::Restart => {
                    let mut rng = rand::rng();
                    let initial = engine.initialize_game(InitialState::random(&mut rng));
                    view = if initial.is_white {
                        Color::White
                    } else {
                        Color::Black
                    };
                    highlighted.clear();
                    break;
                }
                Input::Empty => {
                    engine.initialize_with_state(State::empty());
                    highlighted.clear();
                    break;
                }
                Input::Quit => return Ok(()),
                Input::Undo => {
                    if !engine.undo_move() {
                        writeln!(error, "Error: nothing to undo")?;
                        continue;
                    }
                    highlighted.clear();
                    break;
                }
                Input::Resign => Notation::Resign(engine.current_turn()),
                Input::Offer => {
                    match engine.card_offer(&mut rand::rng()) {
                        Some(offer) => {
                            let offer: Vec<_> = offer.iter().map(ToString::to_string).collect();
                            writeln!(output, "{}", offer.join(" "))?;
                        }
                        None => writeln!(error, "Error: no cards can be drawn this turn")?,
                    }
                    continue;
                }
                Input::Draft(cards) => {
                    if let Err(err) = engine.apply_card_selection(&cards) {
                        writeln!(error, "Error: {err}")?;
                        continue;
                    }
                    break;
                }
                Input::Add(target, modifier) => Notation::Place(Placement {
                    color: engine.current_turn(),
                    target,
                    modifier,
                }),
                Input::Set(position, square) => {
                    engine.edit_square(position, square);
                    highlighted.clear();
                    break;
                }
                Input::ExportState => {
                    let raw: Vec<_> = engine
                        .state()
                        .to_raw()
                        .iter()
                        .map(ToString::to_string)
                        .collect();
                    writeln!(output, "{}", raw.join(","))?;
                    continue;
                }
                Input::Load(state) => {
                    engine.initialize_with_state(state);
                    highlighted.clear();
                    break;
                }
                Input::Import(fen) => {
                    engine.initialize_with_state(fen.0);
                    highlighted.clear();
                    break;
                }
                Input::ExportFen => {
                    writeln!(output, "{}", Fen(engine.state().clone()))?;
                    continue;
                }
                Input::Json => {
                    match serde_json::to_string(&engine.positions()) {
                        Ok(json) => writeln!(output, "{json}")?,
                        Err(err) => writeln!(error, "Error: {err}")?,
                    }
                    continue;
                }
                Input::Perft(depth) => {
                    writeln!(output, "{}", engine.perft(depth))?;
                    continue;
                }
                Input::Fuzz(positions) => {
                    let mut rng = SmallRng::from_os_rng();
                    match cross_check(&mut rng, positions) {
                        Ok(compared) => writeln!(output, "{compared} positions agree")?,
                        Err(err) => writeln!(error, "Error: {err}")?,
                    }
                    continue;
                }
                Input::Coord(position) => {
                    let Some(piece) = engine.state().board[position].piece() else {
                        writeln!(error, "Error: No piece found on {position}")?;
                        continue;
                    };
                    if piece.color() != engine.current_turn() {
                        writeln!(error, "Error: It is {}'s turn", engine.current_turn())?;
                        continue;
                    }
                    highlighted.clear();
                    highlighted.extend(
                        engine
                            .legal_moves()
                            .into_iter()
                            .filter(|movement| movement.origin == position)
                            .map(|movement| movement.destination),
                    );
                    break;
                }
                Input::Play(notation) => notation,
            };
            let before = engine.state().clone();
            let result = engine.play_notation(notation);
            writeln!(output, "{result}")?;
            if result == MoveResult::Invalid || result == MoveResult::Illegal {
                let action = match notation {
                    Notation::Move(movement) => Some(Action::Move(movement)),
                    Notation::Place(placement) => Some(Action::Place(placement)),
                    Notation::Resign(_) => None,
                };
                match action.map(|action| rules::advance(&before, &action)) {
                    Some(Err(reason)) => writeln!(error, "Error: {reason}")?,
                    _ => writeln!(error, "Error: the game is over")?,
                }
                continue;
            }
            highlighted.clear();
            if let Notation::Move(movement) = notation {
                highlighted.push(movement.origin);
                highlighted.push(movement.destination);
            }
            break;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseInputError {
    Fen(ParseFenError),
    Notation(ParseNotationError),
    Coord(ParseCoordError),
    Modifier(ParseModifierError),
    Piece(InvalidPieceChar),
    Snapshot(InvalidSnapshot),
    Int(ParseIntError),
    MissingModifier,
    MissingPiece,
}
impl From<ParseFenError> for ParseInputError {
    fn from(value: ParseFenError) -> Self {
        ParseInputError::Fen(value)
    }
}
impl From<ParseNotationError> for ParseInputError {
    fn from(value: ParseNotationError) -> Self {
        ParseInputError::Notation(value)
    }
}
impl From<ParseCoordError> for ParseInputError {
    fn from(value: ParseCoordError) -> Self {
        ParseInputError::Coord(value)
    }
}
impl From<ParseModifierError> for ParseInputError {
    fn from(value: ParseModifierError) -> Self {
        ParseInputError::Modifier(value)
    }
}
impl From<InvalidPieceChar> for ParseInputError {
    fn from(value: InvalidPieceChar) -> Self {
        ParseInputError::Piece(value)
    }
}
impl From<InvalidSnapshot> for ParseInputError {
    fn from(value: InvalidSnapshot) -> Self {
        ParseInputError::Snapshot(value)
    }
}
impl From<ParseIntError> for ParseInputError {
    fn from(value: ParseIntError) -> Self {
        ParseInputError::Int(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Fen(err) => write!(f, "{err}")?,
            ParseInputError::Notation(err) => write!(f, "{err}")?,
            ParseInputError::Coord(err) => write!(f, "{err}")?,
            ParseInputError::Modifier(err) => write!(f, "{err}")?,
            ParseInputError::Piece(err) => write!(f, "{err}")?,
            ParseInputError::Snapshot(err) => write!(f, "{err}")?,
            ParseInputError::Int(err) => write!(f, "{err}")?,
            ParseInputError::MissingModifier => write!(f, "modifier missing")?,
            ParseInputError::MissingPiece => write!(f, "expected a piece letter or `-`")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Fen(err) => Some(err),
            ParseInputError::Notation(err) => Some(err),
            ParseInputError::Coord(err) => Some(err),
            ParseInputError::Modifier(err) => Some(err),
            ParseInputError::Piece(err) => Some(err),
            ParseInputError::Snapshot(err) => Some(err),
            ParseInputError::Int(err) => Some(err),
            ParseInputError::MissingModifier | ParseInputError::MissingPiece => None,
        }
    }
}
