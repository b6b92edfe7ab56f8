use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::action::ActionKind;
use crate::role::Role;

/// A rule violation. The caller is expected to re-prompt; the game is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Illegal {
    #[error("player is not active")]
    Inactive,

    #[error("player is out of turn")]
    OutOfTurn,

    #[error("player has 10 coins, must coup")]
    MustCoup,

    #[error("player is sanctioned")]
    Sanctioned,

    #[error("not enough coins: needs {needed}, holds {held}")]
    InsufficientFunds { needed: u8, held: u8 },

    #[error("target needs at least {needed} coins, holds {held}")]
    TargetTooPoor { needed: u8, held: u8 },

    #[error("player cannot arrest this turn")]
    ArrestDisabled,

    #[error("target was the last one arrested")]
    RepeatArrest,

    #[error("target player is not active")]
    TargetInactive,

    #[error("target player is still in the game")]
    TargetActive,

    #[error("player cannot target themselves")]
    SelfTarget,

    #[error("{role} has no such ability")]
    WrongRole { role: Role },

    #[error("can only block {expected:?}")]
    WrongCounter { expected: ActionKind },

    #[error("bonus turn was already spent")]
    BonusSpent,

    #[error("no player in seat {0}")]
    UnknownPlayer(usize),

    #[error("no winner yet or multiple players still active")]
    NoWinner,
}

/// Broken setup or engine invariant, as opposed to a player breaking a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("no players")]
    EmptyRoster,

    #[error("no active player to pass the turn to")]
    NoActivePlayer,

    #[error("none of the {seats} seats can take an action")]
    Deadlock { seats: usize },

    #[error("duplicate player name {0:?}")]
    DuplicateName(String),

    #[error("{count} players, expected {min} to {max}")]
    SeatCount { count: usize, min: usize, max: usize },

    #[error("{names} names but {roles} roles")]
    RoleCount { names: usize, roles: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move: {0}")]
    Illegal(#[from] Illegal),

    #[error("setup error: {0}")]
    Setup(#[from] SetupError),
}

impl GameError {
    pub fn is_illegal(&self) -> bool {
        matches!(self, GameError::Illegal(_))
    }
}
