//! Per-connection session core.
//!
//! ## Architecture
//!
//! - [`Connection`]: Actor owning one player's session and its two pumps
//! - [`Handle`]: Channels the room bus uses to talk to a connection
//! - [`Dispatcher`]: Rewrites outgoing frames according to session state
//! - [`Gating`]: Withdraws options the player cannot fund
//! - [`RoundId`]: Canonical round identity derived from room data
//!
//! ## Collaborators
//!
//! - [`Reader`] / [`Writer`]: Client transport halves
//! - [`Precheck`]: Hook that may consume inbound frames before the bus sees them
//! - [`Validator`]: Optional duplicate-login check
mod actor;
mod bets;
mod dispatcher;
mod gating;
mod line;
mod logins;
mod pipe;
mod precheck;
mod round;
mod state;
mod transport;
mod validator;

pub use actor::*;
pub use bets::*;
pub use dispatcher::*;
pub use gating::*;
pub use line::*;
pub use logins::*;
pub use pipe::*;
pub use precheck::*;
pub use round::*;
pub use state::*;
pub use transport::*;
pub use validator::*;
