//! Settlement of finished rounds against the bets placed on a connection.
//!
//! The [`Reconciler`] matches each outcome pile the room reports to the
//! session's outstanding bet lines and asks the [`Ledger`] to pay them out.
//! Payouts are line-independent: one failing line never blocks another.
mod credentials;
mod ledger;
mod memory;
mod order;
mod payout;
mod reconciler;

pub use credentials::*;
pub use ledger::*;
pub use memory::*;
pub use order::*;
pub use payout::*;
pub use reconciler::*;
