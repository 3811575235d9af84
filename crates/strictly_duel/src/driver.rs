//! Runs a whole session against a [`Frontend`].
//!
//! [`run_host`] and [`run_guest`] establish the connection; [`play`] takes
//! it from there until the host declines a rematch, the user quits, or
//! something fatal happens.

use crate::config::DuelConfig;
use crate::error::DuelError;
use crate::frontend::{Frontend, SessionEvent};
use crate::role::Role;
use crate::session::{DuelSession, SessionReport};
use crate::state::{Progress, SessionState};
use crate::transport::{GuestListener, dial};
use crate::username::Username;
use std::future::Future;
use strictly_board::Outcome;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{error, info, instrument, warn};

/// Dials the guest, retrying while the user agrees, then plays.
#[instrument(skip_all, fields(endpoint = %config.endpoint()))]
pub async fn run_host<F: Frontend>(
    config: &DuelConfig,
    frontend: &mut F,
) -> Result<SessionReport, DuelError> {
    let endpoint = config.endpoint();
    let connection = loop {
        info!(state = %SessionState::Connecting, "Dialing guest");
        frontend.handle_event(SessionEvent::Connecting {
            role: Role::Host,
            endpoint: endpoint.clone(),
        })?;
        match interruptible(frontend, dial(&endpoint, config.connect_timeout())).await {
            Ok(connection) => break connection,
            Err(e) if e.is_retryable() => {
                warn!(error = %e, "Dial failed");
                if !frontend.ask_retry(&e).await? {
                    info!("User declined to retry");
                    return Err(DuelError::Cancelled);
                }
            }
            Err(e) => return Err(fail(frontend, e)),
        }
    };
    frontend.handle_event(SessionEvent::Connected)?;

    let session = DuelSession::new(
        Role::Host,
        connection.with_peer_timeout(config.peer_timeout()),
    );
    play(session, config.username().as_deref(), frontend).await
}

/// Listens for the host, accepts one connection, then plays.
#[instrument(skip_all, fields(endpoint = %config.endpoint()))]
pub async fn run_guest<F: Frontend>(
    config: &DuelConfig,
    frontend: &mut F,
) -> Result<SessionReport, DuelError> {
    let endpoint = config.endpoint();
    info!(state = %SessionState::Connecting, "Waiting for host");
    frontend.handle_event(SessionEvent::Connecting {
        role: Role::Guest,
        endpoint: endpoint.clone(),
    })?;

    let listener = match GuestListener::bind(&endpoint).await {
        Ok(listener) => listener,
        Err(e) => return Err(fail(frontend, e)),
    };
    if let Ok(address) = listener.local_addr() {
        frontend.handle_event(SessionEvent::Listening {
            address: address.to_string(),
        })?;
    }

    let connection = match interruptible(frontend, listener.accept_one()).await {
        Ok(connection) => connection,
        Err(e) => return Err(fail(frontend, e)),
    };
    frontend.handle_event(SessionEvent::Connected)?;

    let session = DuelSession::new(
        Role::Guest,
        connection.with_peer_timeout(config.peer_timeout()),
    );
    play(session, config.username().as_deref(), frontend).await
}

/// Keeps a failed session's error on screen until the user dismisses it.
///
/// Does nothing for a successful or user-cancelled session. A frontend that
/// cannot wait for the dismissal is logged and otherwise ignored, so the
/// original result is never masked.
#[instrument(skip_all)]
pub async fn hold_failure<F: Frontend>(
    frontend: &mut F,
    result: &Result<SessionReport, DuelError>,
) {
    if let Err(e) = result
        && !matches!(e, DuelError::Cancelled)
        && let Err(ack) = frontend.acknowledge_end().await
    {
        warn!(error = %ack, failure = %e, "Frontend could not hold the failure screen");
    }
}

/// Plays games over an established session until it ends.
///
/// `preset_name` is tried before prompting; if it is invalid the user is
/// prompted with the reason. Fatal errors are shown to the frontend before
/// being returned.
#[instrument(skip_all, fields(role = %session.role()))]
pub async fn play<S, F>(
    mut session: DuelSession<S>,
    preset_name: Option<&str>,
    frontend: &mut F,
) -> Result<SessionReport, DuelError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
    F: Frontend,
{
    match play_games(&mut session, preset_name, frontend).await {
        Ok(()) => {
            let report = session.report();
            info!(stats = ?report.statistics(), "Session complete");
            frontend.handle_event(SessionEvent::SessionEnded(report.clone()))?;
            frontend.acknowledge_end().await?;
            Ok(report)
        }
        Err(e) => Err(fail(frontend, e)),
    }
}

async fn play_games<S, F>(
    session: &mut DuelSession<S>,
    preset_name: Option<&str>,
    frontend: &mut F,
) -> Result<(), DuelError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
    F: Frontend,
{
    let local = choose_username(preset_name, frontend).await?;
    let peer = interruptible(frontend, session.identify(local.clone())).await?;
    frontend.handle_event(SessionEvent::Identified { local, peer })?;

    loop {
        frontend.handle_event(SessionEvent::GameStarted {
            game: *session.statistics().games_played(),
        })?;
        let outcome = play_game(session, frontend).await?;
        frontend.handle_event(SessionEvent::GameOver {
            board: session.board().clone(),
            outcome,
        })?;

        session.begin_rematch_decision()?;
        let again = if session.role().decides_rematch() {
            let again = frontend.ask_rematch().await?;
            session.send_rematch(again).await?;
            again
        } else {
            frontend.handle_event(SessionEvent::AwaitingRematch)?;
            interruptible(frontend, session.await_rematch()).await?
        };
        if !again {
            return Ok(());
        }
    }
}

async fn play_game<S, F>(
    session: &mut DuelSession<S>,
    frontend: &mut F,
) -> Result<Outcome, DuelError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
    F: Frontend,
{
    loop {
        let active = match session.state() {
            SessionState::InTurn(active) => active,
            other => {
                return Err(DuelError::OutOfTurn {
                    action: "play a move",
                    state: other.to_string(),
                });
            }
        };
        frontend.handle_event(SessionEvent::BoardChanged {
            board: session.board().clone(),
            to_move: active,
        })?;

        let progress = if active == session.role() {
            let open = session.board().open_moves();
            let mv = frontend.ask_move(session.board(), &open).await?;
            match session.play_local_move(mv).await {
                Err(DuelError::Board(e)) => {
                    warn!(error = %e, "Local move rejected, asking again");
                    continue;
                }
                other => other?,
            }
        } else {
            frontend.handle_event(SessionEvent::AwaitingPeerMove)?;
            interruptible(frontend, session.await_peer_move()).await?
        };

        if let Progress::Resolved(outcome) = progress {
            return Ok(outcome);
        }
    }
}

async fn choose_username<F: Frontend>(
    preset: Option<&str>,
    frontend: &mut F,
) -> Result<Username, DuelError> {
    let mut rejection = None;
    if let Some(raw) = preset {
        match Username::parse(raw) {
            Ok(name) => return Ok(name),
            Err(e) => {
                warn!(error = %e, "Configured username rejected");
                rejection = Some(e);
            }
        }
    }
    loop {
        let raw = frontend.ask_username(rejection.as_ref()).await?;
        match Username::parse(&raw) {
            Ok(name) => return Ok(name),
            Err(e) => {
                warn!(error = %e, "Username rejected");
                rejection = Some(e);
            }
        }
    }
}

/// Races `work` against the user quitting.
async fn interruptible<F, T>(
    frontend: &mut F,
    work: impl Future<Output = Result<T, DuelError>>,
) -> Result<T, DuelError>
where
    F: Frontend,
{
    tokio::select! {
        result = work => result,
        _ = frontend.interrupted() => {
            info!("Interrupted by user");
            Err(DuelError::Cancelled)
        }
    }
}

/// Reports a fatal error to the frontend and hands it back.
fn fail<F: Frontend>(frontend: &mut F, err: DuelError) -> DuelError {
    if !matches!(err, DuelError::Cancelled) {
        error!(error = %err, "Session failed");
        if let Err(e) = frontend.handle_event(SessionEvent::Fatal(err.to_string())) {
            warn!(error = %e, "Frontend could not show the failure");
        }
    }
    err
}
