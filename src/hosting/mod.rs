//! actix-web hosting for the session core.
//!
//! [`Server`] upgrades `/ws` requests into WebSockets, wraps each one in a
//! [`Socket`] transport, and hands the resulting connection to the [`Lobby`].
mod lobby;
mod server;
mod socket;

pub use lobby::*;
pub use server::*;
pub use socket::*;
