use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndState {
    Win(Color),
    Draw,
}
impl Display for EndState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndState::Win(color) => write!(f, "{color} wins")?,
            EndState::Draw => write!(f, "draw")?,
        }
        Ok(())
    }
}
/// Outcome of submitting an action, ordered from rejected to fully applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MoveResult {
    Invalid,
    Illegal,
    Stalemate,
    Checkmate,
    RepeatDraw,
    Move,
}
impl MoveResult {
    /// Whether the action changed the game.
    pub fn is_applied(self) -> bool {
        self > MoveResult::Illegal
    }
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            MoveResult::Stalemate | MoveResult::Checkmate | MoveResult::RepeatDraw
        )
    }
}
impl Display for MoveResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveResult::Invalid => write!(f, "INVALID")?,
            MoveResult::Illegal => write!(f, "ILLEGAL")?,
            MoveResult::Stalemate => write!(f, "STALEMATE")?,
            MoveResult::Checkmate => write!(f, "CHECKMATE")?,
            MoveResult::RepeatDraw => write!(f, "REPEATDRAW")?,
            MoveResult::Move => write!(f, "MOVE")?,
        }
        Ok(())
    }
}
