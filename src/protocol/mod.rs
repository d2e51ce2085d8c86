//! Wire protocol shared by the client transport and the room bus.
//!
//! A [`Frame`] is an envelope `{command, status, data}` whose payload shape is
//! determined by its [`Command`]. Payloads are decoded into concrete types at
//! the boundary; anything unrecognized travels as [`Payload::Raw`].
mod ack;
mod action;
mod card;
mod command;
mod frame;
mod login;
mod member;
mod movement;
mod outcome;
mod payload;
mod seat;
mod status;
mod summary;
mod table;

pub use ack::*;
pub use action::*;
pub use card::*;
pub use command::*;
pub use frame::*;
pub use login::*;
pub use member::*;
pub use movement::*;
pub use outcome::*;
pub use payload::*;
pub use seat::*;
pub use status::*;
pub use summary::*;
pub use table::*;
