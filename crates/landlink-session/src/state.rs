//! Session state machine.

use landlink_chain::TxId;

use crate::error::LinkError;

/// Progress stages of a linking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkStage {
    Connecting,
    FetchingMetadata,
    FetchingContentKey,
    Signing,
    Confirming,
    Pinning,
    Succeeded,
    Failed,
}

impl LinkStage {
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Published session state, consumed by the view layer.
///
/// Created at session start, mutated only by the controller, discarded
/// when the session ends.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkState {
    Connecting,
    FetchingMetadata,
    FetchingContentKey,
    Signing,
    Confirming { tx_id: TxId },
    Pinning,
    /// Terminal success; `pin_ok` is false when pinning soft-failed
    Succeeded { pin_ok: bool },
    /// Absorbing failure state
    Failed { error: LinkError },
}

impl LinkState {
    #[must_use]
    pub fn stage(&self) -> LinkStage {
        match self {
            Self::Connecting => LinkStage::Connecting,
            Self::FetchingMetadata => LinkStage::FetchingMetadata,
            Self::FetchingContentKey => LinkStage::FetchingContentKey,
            Self::Signing => LinkStage::Signing,
            Self::Confirming { .. } => LinkStage::Confirming,
            Self::Pinning => LinkStage::Pinning,
            Self::Succeeded { .. } => LinkStage::Succeeded,
            Self::Failed { .. } => LinkStage::Failed,
        }
    }
}

/// Illegal transition attempt.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("illegal state transition: {from:?} -> {to:?}")]
    IllegalTransition { from: LinkStage, to: LinkStage },
}

/// Validates a state transition.
pub fn validate_transition(from: LinkStage, to: LinkStage) -> Result<(), StateError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(StateError::IllegalTransition { from, to })
    }
}

/// Stages reachable from `from`.
///
/// `Failed` is reachable from every non-terminal stage; `Succeeded` only
/// from `Pinning` (a failed pin still succeeds, the chain write being
/// the source of truth).
pub fn allowed_transitions(from: LinkStage) -> Vec<LinkStage> {
    use LinkStage::*;
    match from {
        Connecting => vec![FetchingMetadata, Failed],
        FetchingMetadata => vec![FetchingContentKey, Failed],
        FetchingContentKey => vec![Signing, Failed],
        Signing => vec![Confirming, Failed],
        Confirming => vec![Pinning, Failed],
        Pinning => vec![Succeeded, Failed],
        Succeeded => vec![],
        Failed => vec![],
    }
}

fn allowed(from: LinkStage, to: LinkStage) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use LinkStage::*;

    const ALL: [LinkStage; 8] = [
        Connecting,
        FetchingMetadata,
        FetchingContentKey,
        Signing,
        Confirming,
        Pinning,
        Succeeded,
        Failed,
    ];

    #[test]
    fn pipeline_order_is_linear() {
        assert!(validate_transition(Connecting, FetchingMetadata).is_ok());
        assert!(validate_transition(FetchingMetadata, FetchingContentKey).is_ok());
        assert!(validate_transition(FetchingContentKey, Signing).is_ok());
        assert!(validate_transition(Signing, Confirming).is_ok());
        assert!(validate_transition(Confirming, Pinning).is_ok());
        assert!(validate_transition(Pinning, Succeeded).is_ok());
    }

    #[test]
    fn failed_is_reachable_from_every_non_terminal_stage() {
        for stage in ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert!(validate_transition(stage, Failed).is_ok(), "{stage:?}");
        }
    }

    #[test]
    fn terminal_stages_are_absorbing() {
        for terminal in [Succeeded, Failed] {
            for to in ALL {
                assert!(validate_transition(terminal, to).is_err());
            }
        }
    }

    #[test]
    fn no_skipping_forward() {
        assert!(validate_transition(Connecting, Signing).is_err());
        assert!(validate_transition(FetchingMetadata, Confirming).is_err());
        assert!(validate_transition(Signing, Pinning).is_err());
        assert!(validate_transition(Confirming, Succeeded).is_err());
    }

    #[test]
    fn no_moving_backwards() {
        assert!(validate_transition(Pinning, Confirming).is_err());
        assert!(validate_transition(Signing, Connecting).is_err());
    }

    #[test]
    fn state_reports_its_stage() {
        assert_eq!(LinkState::Connecting.stage(), Connecting);
        assert_eq!(
            LinkState::Succeeded { pin_ok: false }.stage(),
            Succeeded
        );
        assert_eq!(
            LinkState::Failed {
                error: crate::LinkError::TransactionFailed
            }
            .stage(),
            Failed
        );
    }
}
