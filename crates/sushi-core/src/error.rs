use crate::model::player::Seat;
use thiserror::Error;

/// Fatal conditions raised while building or running a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("games need between 2 and 5 participants but {found} were given")]
    InvalidParticipantCount { found: usize },
    #[error("unknown card kind '{token}'")]
    UnknownCardKind { token: String },
    #[error("deck holds {available} undealt cards but the round needs {needed}")]
    DeckExhausted { needed: usize, available: usize },
    #[error("all turns of this round have already been played")]
    RoundComplete,
    #[error("round is still in progress after {turn} of {hand_size} turns")]
    RoundInProgress { turn: usize, hand_size: usize },
    #[error("all rounds of this game have already been played")]
    GameComplete,
    #[error("game is still in progress after {rounds_played} rounds")]
    GameInProgress { rounds_played: usize },
    #[error("policy contract violated at {seat}: {message}")]
    Implementation { seat: Seat, message: String },
}

impl GameError {
    pub(crate) fn implementation(seat: Seat, message: impl Into<String>) -> Self {
        GameError::Implementation {
            seat,
            message: message.into(),
        }
    }
}
