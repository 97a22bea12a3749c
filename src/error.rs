use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid rank: {0}")]
    InvalidRank(String),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Duplicate card: {0}")]
    DuplicateCard(String),

    #[error("Hand must be exactly {need} cards, got {got}")]
    InvalidHandSize { need: usize, got: usize },

    #[error("Cannot deal {requested} cards, only {available} remaining")]
    InsufficientCards { requested: usize, available: usize },

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid action: the raise cap of {0} raises per street has been reached")]
    RaiseCapExceeded(u8),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// Errors the player can fix by entering a different action.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SimError::InvalidAction(_) | SimError::InvalidAmount(_) | SimError::RaiseCapExceeded(_)
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_errors_are_recoverable() {
        assert!(SimError::InvalidAction("check".to_string()).is_recoverable());
        assert!(SimError::RaiseCapExceeded(4).is_recoverable());
        assert!(!SimError::InsufficientCards { requested: 9, available: 3 }.is_recoverable());
    }

    #[test]
    fn test_raise_cap_reads_as_invalid_action() {
        let msg = SimError::RaiseCapExceeded(4).to_string();
        assert!(msg.starts_with("Invalid action"));
        assert!(msg.contains('4'));
    }
}
