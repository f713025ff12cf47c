use crate::core::{SessionKey, SessionSnapshot};

/// Where a fetch stands in the handshake, judged by which tokens are known.
///
/// ```text
/// NoSession -> SessionNoConsentChecked -+-> ConsentPending -+-> SessionReady -+-> CrumbPending -> Ready
///                                       +-------------------+                 +-----------------^
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    /// No `sessionId` yet; a challenge request is needed.
    NoSession,
    /// The challenge was issued; its response has not been scraped.
    SessionNoConsentChecked,
    /// The challenge was redirected to a consent wall.
    ConsentPending,
    /// `sessionId` known and consent resolved; crumb not yet checked.
    SessionReady,
    /// No `crumb` yet; a crumb request is needed.
    CrumbPending,
    /// The data request may be issued.
    Ready,
}

/// What happened in the step just taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeEvent {
    ChallengeIssued,
    ChallengeScraped { consent_required: bool },
    ConsentIssued,
    CrumbChecked { present: bool },
    CrumbIssued,
}

impl HandshakeState {
    /// Entry state for a fetch.
    pub const fn initial(has_session_id: bool) -> Self {
        if has_session_id {
            HandshakeState::SessionReady
        } else {
            HandshakeState::NoSession
        }
    }

    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self::initial(snapshot.has(SessionKey::SessionId))
    }

    /// Pure transition function. An event that does not apply to the current
    /// state leaves it unchanged.
    pub const fn next(self, event: HandshakeEvent) -> Self {
        use HandshakeEvent as E;
        use HandshakeState as S;
        match (self, event) {
            (S::NoSession, E::ChallengeIssued) => S::SessionNoConsentChecked,
            (S::SessionNoConsentChecked, E::ChallengeScraped { consent_required: true }) => {
                S::ConsentPending
            }
            (S::SessionNoConsentChecked, E::ChallengeScraped { consent_required: false }) => {
                S::SessionReady
            }
            (S::ConsentPending, E::ConsentIssued) => S::SessionReady,
            (S::SessionReady, E::CrumbChecked { present: true }) => S::Ready,
            (S::SessionReady, E::CrumbChecked { present: false }) => S::CrumbPending,
            // An empty crumb still ends the handshake; the data request carries it as is.
            (S::CrumbPending, E::CrumbIssued) => S::Ready,
            (state, _) => state,
        }
    }

    pub const fn is_ready(self) -> bool {
        matches!(self, HandshakeState::Ready)
    }
}
