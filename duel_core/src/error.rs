//! Battle errors
//!
//! Every error is returned to the caller; none of them leave partial state
//! behind.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why an operation was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("invalid action: {0:?}")]
    InvalidAction(String),

    #[error("{0} is not a participant in this battle")]
    NotAParticipant(String),

    #[error("{0} cannot battle themselves")]
    SelfBattle(String),

    #[error("a battle between this pair is already in progress ({0})")]
    AlreadyInProgress(String),

    #[error("{0} is already in another battle")]
    AlreadyInOtherBattle(String),

    #[error("battle already finished")]
    BattleFinished,

    #[error("{0} is not in a battle")]
    NotInBattle(String),

    #[error("unknown character: {0}")]
    UnknownCharacter(String),
}

/// Coarse category of a [`BattleError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    StateConflict,
    NotFound,
}

impl BattleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BattleError::InvalidAction(_)
            | BattleError::NotAParticipant(_)
            | BattleError::SelfBattle(_) => ErrorKind::Validation,
            BattleError::AlreadyInProgress(_)
            | BattleError::AlreadyInOtherBattle(_)
            | BattleError::BattleFinished
            | BattleError::NotInBattle(_) => ErrorKind::StateConflict,
            BattleError::UnknownCharacter(_) => ErrorKind::NotFound,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::StateConflict => "state conflict",
            ErrorKind::NotFound => "not found",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            BattleError::InvalidAction("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(BattleError::BattleFinished.kind(), ErrorKind::StateConflict);
        assert_eq!(
            BattleError::NotInBattle("x".into()).kind(),
            ErrorKind::StateConflict
        );
        assert_eq!(
            BattleError::UnknownCharacter("x".into()).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(BattleError::BattleFinished.to_string(), "battle already finished");
        assert_eq!(
            BattleError::NotAParticipant("zed".into()).to_string(),
            "zed is not a participant in this battle"
        );
    }
}
