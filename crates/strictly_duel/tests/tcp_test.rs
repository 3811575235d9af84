//! Sessions over real loopback sockets.

mod support;

use std::time::Duration;
use strictly_duel::{
    DuelConfig, DuelError, DuelSession, Endpoint, GuestListener, Role, SessionEvent, dial, play,
    run_guest, run_host,
};
use support::ScriptedFrontend;

fn loopback(port: u16) -> Endpoint {
    Endpoint::new("127.0.0.1".to_string(), port)
}

/// A port that nothing is listening on.
fn closed_port() -> u16 {
    let spare = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    spare.local_addr().unwrap().port()
}

#[tokio::test]
async fn test_game_over_loopback() {
    let listener = GuestListener::bind(&loopback(0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let guest = async {
        let connection = listener.accept_one().await.unwrap();
        let mut ui = ScriptedFrontend::new().names(["bob"]).moves([4, 5]);
        play(DuelSession::new(Role::Guest, connection), None, &mut ui).await
    };
    let host = async {
        let connection = dial(&loopback(port), Duration::from_secs(5)).await.unwrap();
        let mut ui = ScriptedFrontend::new()
            .names(["alice"])
            .moves([1, 2, 3])
            .rematches([false]);
        play(DuelSession::new(Role::Host, connection), None, &mut ui).await
    };

    let (g, h) = tokio::join!(guest, host);
    let (g, h) = (g.unwrap(), h.unwrap());
    assert_eq!(*h.statistics().wins(), 1);
    assert_eq!(*g.statistics().losses(), 1);
}

#[tokio::test]
async fn test_run_host_against_listening_guest() {
    let listener = GuestListener::bind(&loopback(0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let config = DuelConfig::default()
        .with_port(port)
        .with_username("alice");

    let mut host_ui = ScriptedFrontend::new().moves([1, 3, 4, 8, 9]).rematches([false]);
    let guest = async {
        let connection = listener.accept_one().await.unwrap();
        let mut ui = ScriptedFrontend::new().names(["bob"]).moves([2, 5, 6, 7]);
        play(DuelSession::new(Role::Guest, connection), None, &mut ui).await
    };

    let (h, g) = tokio::join!(run_host(&config, &mut host_ui), guest);
    assert_eq!(*h.unwrap().statistics().ties(), 1);
    assert_eq!(*g.unwrap().statistics().ties(), 1);
    assert!(host_ui.events.contains(&SessionEvent::Connected));
    assert!(host_ui.retry_errors.is_empty());
}

#[tokio::test]
async fn test_refused_connection_offers_retry() {
    let config = DuelConfig::default().with_port(closed_port());
    let mut ui = ScriptedFrontend::new().retries([true, false]);

    let result = run_host(&config, &mut ui).await;

    assert!(matches!(result, Err(DuelError::Cancelled)));
    assert_eq!(ui.retry_errors.len(), 2);
    let attempts = ui
        .events
        .iter()
        .filter(|e| matches!(e, SessionEvent::Connecting { role: Role::Host, .. }))
        .count();
    assert_eq!(attempts, 2);
    assert!(!ui.saw_fatal());
}

#[tokio::test]
async fn test_guest_bind_failure_is_fatal() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port();
    let config = DuelConfig::default().with_port(port);
    let mut ui = ScriptedFrontend::new();

    let result = run_guest(&config, &mut ui).await;

    assert!(matches!(result, Err(DuelError::BindOrListen { .. })));
    assert!(ui.saw_fatal());
    drop(taken);
}

#[tokio::test]
async fn test_guest_can_quit_while_listening() {
    let config = DuelConfig::default().with_port(closed_port());
    let mut ui = ScriptedFrontend::new().interrupting();

    let result = run_guest(&config, &mut ui).await;

    assert!(matches!(result, Err(DuelError::Cancelled)));
    assert!(
        ui.events
            .iter()
            .any(|e| matches!(e, SessionEvent::Listening { .. }))
    );
}
