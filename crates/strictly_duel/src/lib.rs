//! Two-player tic-tac-toe over a direct TCP connection.
//!
//! One process runs as [`Role::Host`] and dials, the other as
//! [`Role::Guest`] and listens. Both drive the same [`DuelSession`] state
//! machine, exchanging usernames, moves, and rematch decisions as plain
//! text lines (see [`wire`]). Presentation sits behind the [`Frontend`]
//! trait; [`TuiFrontend`] is the terminal implementation.
//!
//! # Example
//!
//! ```no_run
//! use strictly_duel::{DuelConfig, TuiFrontend, run_guest};
//!
//! # async fn demo() -> Result<(), strictly_duel::DuelError> {
//! let config = DuelConfig::default().with_port(5000u16);
//! let mut frontend = TuiFrontend::start()?;
//! let report = run_guest(&config, &mut frontend).await?;
//! println!("{} games played", report.statistics().games_played());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod driver;
mod error;
mod frontend;
mod role;
mod session;
mod state;
mod transport;
mod username;

pub mod tui;
pub mod wire;

pub use config::{ConfigError, DEFAULT_CONFIG_FILE, DuelConfig};
pub use driver::{hold_failure, play, run_guest, run_host};
pub use error::DuelError;
pub use frontend::{Frontend, SessionEvent};
pub use role::Role;
pub use session::{DuelSession, SessionReport};
pub use state::{Progress, SessionState};
pub use transport::{Connection, Endpoint, GuestListener, dial};
pub use tui::TuiFrontend;
pub use username::{Username, UsernameError};
pub use wire::WireError;
