//! Progress view: a pure subscriber of session state.
//!
//! The session surface is a single-page progress display. Nothing here
//! feeds back into the controller; [`render`] maps a state to its
//! display line and [`run`] tails a subscription until the session
//! reaches a terminal state.

use tokio::sync::watch;

use crate::state::LinkState;

/// Display line for a state.
#[must_use]
pub fn render(state: &LinkState) -> String {
    match state {
        LinkState::Connecting
        | LinkState::FetchingMetadata
        | LinkState::FetchingContentKey
        | LinkState::Signing => "loading".to_string(),
        LinkState::Confirming { tx_id } => format!("transaction pending: {tx_id}"),
        LinkState::Pinning => "transaction confirmed, pinning pending".to_string(),
        LinkState::Succeeded { pin_ok: true } => "pinning success".to_string(),
        LinkState::Succeeded { pin_ok: false } => {
            "transaction confirmed, pinning failed".to_string()
        }
        LinkState::Failed { error } => format!("error: {error}"),
    }
}

/// Trace each observed state until a terminal one.
///
/// A `watch` subscription coalesces missed intermediate states, which is
/// exactly the progress-display contract: always show the latest.
pub async fn run(mut rx: watch::Receiver<LinkState>) {
    loop {
        let state = rx.borrow_and_update().clone();
        tracing::info!(progress = %render(&state));
        if state.stage().is_terminal() {
            break;
        }
        if rx.changed().await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinkError;
    use landlink_chain::TxId;

    #[test]
    fn early_stages_render_as_loading() {
        assert_eq!(render(&LinkState::Connecting), "loading");
        assert_eq!(render(&LinkState::Signing), "loading");
    }

    #[test]
    fn confirmation_renders_the_transaction() {
        let state = LinkState::Confirming {
            tx_id: TxId::new("0xabc"),
        };
        assert_eq!(render(&state), "transaction pending: 0xabc");
    }

    #[test]
    fn terminal_states_render_their_verdict() {
        assert_eq!(render(&LinkState::Succeeded { pin_ok: true }), "pinning success");
        assert_eq!(
            render(&LinkState::Succeeded { pin_ok: false }),
            "transaction confirmed, pinning failed"
        );
        assert_eq!(
            render(&LinkState::Failed {
                error: LinkError::UserRejected
            }),
            "error: connection request rejected by user"
        );
    }

    #[tokio::test]
    async fn subscriber_stops_at_terminal_state() {
        let (tx, rx) = tokio::sync::watch::channel(LinkState::Connecting);
        let viewer = tokio::spawn(run(rx));

        tx.send_replace(LinkState::Pinning);
        tx.send_replace(LinkState::Succeeded { pin_ok: true });

        viewer.await.unwrap();
    }

    #[tokio::test]
    async fn subscriber_stops_when_sender_is_dropped() {
        let (tx, rx) = tokio::sync::watch::channel(LinkState::Connecting);
        let viewer = tokio::spawn(run(rx));
        drop(tx);
        viewer.await.unwrap();
    }
}
