//! AKE state.
//!
//! ```text
//! initiator:  None ──DH-Commit──> AwaitingDhKey ──Reveal-Sig──> AwaitingSignature
//! responder:  None ──DH-Key─────> AwaitingRevealSignature
//! ```
//!
//! Transitions are decided by the handshake driver. The context stores the
//! current value and clears it to [`AuthState::None`] on reset.

/// Position in the authenticated key exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No AKE in progress
    #[default]
    None,
    /// DH-Commit sent, waiting for DH-Key
    AwaitingDhKey,
    /// DH-Key sent, waiting for Reveal-Signature
    AwaitingRevealSignature,
    /// Reveal-Signature sent, waiting for Signature
    AwaitingSignature,
}

impl AuthState {
    /// True while a handshake is underway.
    #[must_use]
    pub fn in_progress(self) -> bool {
        self != Self::None
    }
}
