use yfinance_session::{HandshakeEvent as E, HandshakeState as S, SessionSnapshot};

#[test]
fn entry_state_depends_on_session_id() {
    assert_eq!(S::initial(false), S::NoSession);
    assert_eq!(S::initial(true), S::SessionReady);

    let empty_id = SessionSnapshot {
        session_id: Some(String::new()),
        ..SessionSnapshot::default()
    };
    assert_eq!(S::from_snapshot(&empty_id), S::NoSession);
}

#[test]
fn consent_wall_path() {
    let s = S::NoSession
        .next(E::ChallengeIssued)
        .next(E::ChallengeScraped { consent_required: true });
    assert_eq!(s, S::ConsentPending);
    let s = s.next(E::ConsentIssued);
    assert_eq!(s, S::SessionReady);
    let s = s.next(E::CrumbChecked { present: false });
    assert_eq!(s, S::CrumbPending);
    assert!(s.next(E::CrumbIssued).is_ready());
}

#[test]
fn no_consent_and_known_crumb_goes_straight_to_ready() {
    let s = S::NoSession
        .next(E::ChallengeIssued)
        .next(E::ChallengeScraped { consent_required: false });
    assert_eq!(s, S::SessionReady);
    assert_eq!(s.next(E::CrumbChecked { present: true }), S::Ready);
}

#[test]
fn inapplicable_events_leave_state_unchanged() {
    assert_eq!(S::NoSession.next(E::CrumbIssued), S::NoSession);
    assert_eq!(S::SessionReady.next(E::ConsentIssued), S::SessionReady);
    assert_eq!(S::Ready.next(E::ChallengeIssued), S::Ready);
}
