//! Reply - Flat result handed back to whoever relays messages to users

use crate::battle::BattleUpdate;
use crate::error::{BattleError, ErrorKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub ok: bool,
    pub message: String,
    pub finished: bool,
    pub winner_id: Option<String>,
    /// Category of the failure when `ok` is false
    pub error: Option<ErrorKind>,
}

impl Reply {
    pub fn unknown_command() -> Self {
        Reply {
            ok: false,
            message: "Unknown command.".to_string(),
            finished: false,
            winner_id: None,
            error: Some(ErrorKind::Validation),
        }
    }
}

impl From<&BattleUpdate> for Reply {
    fn from(update: &BattleUpdate) -> Self {
        Reply {
            ok: true,
            message: update.message(),
            finished: update.is_finished(),
            winner_id: update.winner().map(str::to_string),
            error: None,
        }
    }
}

impl From<&BattleError> for Reply {
    fn from(err: &BattleError) -> Self {
        Reply {
            ok: false,
            message: err.to_string(),
            finished: false,
            winner_id: None,
            error: Some(err.kind()),
        }
    }
}

impl From<Result<BattleUpdate, BattleError>> for Reply {
    fn from(result: Result<BattleUpdate, BattleError>) -> Self {
        match &result {
            Ok(update) => update.into(),
            Err(err) => err.into(),
        }
    }
}
