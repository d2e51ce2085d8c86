//! Session core for a live multiplayer blackjack backend.
//!
//! Each WebSocket connection is owned by a [`session::Connection`] actor that
//! bridges the client transport and the room bus, rewrites outgoing frames
//! according to the player's economic state, and settles finished rounds
//! against the bets placed on this connection.
//!
//! ## Modules
//!
//! - [`protocol`]: Wire envelope, commands, and command-specific payloads
//! - [`session`]: Connection actor, command dispatcher, and per-session state
//! - [`settlement`]: Bet reconciliation and the ledger collaborator boundary
//! - [`hosting`]: actix-web server and WebSocket transport (requires `server`)
pub mod protocol;
pub mod session;
pub mod settlement;

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod hosting;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Monetary amounts: balances, stakes, and payouts.
pub type Amount = f64;
/// Seat number at a blackjack table.
pub type Seat = usize;
/// Numeric table identifier assigned by the room bus.
pub type TableId = u32;
/// Game identifier issued by the platform for this product.
pub type GameId = u32;

// ============================================================================
// SESSION PARAMETERS
// ============================================================================
/// Capacity of the queue carrying frames from the room bus to one client.
pub const QUEUE_CAPACITY: usize = 8;
/// Capacity of the hand-off from one client to the room bus.
/// Buffers at most one frame: the reader runs one frame ahead of the bus
/// and then waits for it.
pub const HANDOFF_CAPACITY: usize = 1;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates the log directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log(dir: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("{}/{}.log", dir, chrono::Utc::now().timestamp()))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Register Ctrl+C handler for immediate termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}
