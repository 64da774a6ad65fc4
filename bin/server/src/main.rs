//! Process binary for the poker table engine core.
//!
//! Wires up logging, CLI flags, and the table registry (spec §4.5),
//! then blocks until Ctrl+C. The transport layer that would accept
//! `join`/`action`/`leave` messages over a duplex channel per seat is an
//! external collaborator (spec §1) and is not part of this crate; this
//! binary's job ends at standing up a registry ready to receive
//! `TableConfig`s from whatever process embeds one, mirroring how the
//! teacher's `bin/backend` is a thin shell around `rbp_server::run()`.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use poker_engine::NullHistoryRepository;
use poker_registry::TableRegistry;

/// Poker table engine core — process host for the Table Registry.
#[derive(Parser, Debug)]
#[command(name = "poker-server", version, about)]
struct Cli {
    /// Address the (externally supplied) transport layer would bind to.
    /// Accepted here only so operators can script deployments uniformly;
    /// this binary does not itself open a socket.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// How often each table's event loop ticks its phase machine, in
    /// milliseconds. Accepted here only so operators can script deployments
    /// uniformly; this binary wires up the registry with
    /// `TableRegistry::new`, which does not currently take a tick interval
    /// — every table runs the engine crate's own fixed tick period.
    #[arg(long, default_value_t = 200)]
    tick_interval_ms: u64,

    /// How long a `Waiting`, empty table survives before the reaper stops
    /// it, in seconds.
    #[arg(long, default_value_t = 300)]
    empty_table_ttl_secs: u64,

    /// How often the reaper sweeps the registry, in seconds.
    #[arg(long, default_value_t = 30)]
    reap_interval_secs: u64,

    /// Maximum number of concurrently live tables this process will host.
    #[arg(long, default_value_t = 10_000)]
    max_tables: usize,

    /// Minimum log level emitted to the terminal (off/error/warn/info/debug/trace).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_level: LevelFilter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    poker_core::init_logging(log_level);
    log::info!(
        "poker-server starting: bind={} max_tables={} (tick_interval_ms={} accepted but not yet wired to the engine)",
        cli.bind,
        cli.max_tables,
        cli.tick_interval_ms
    );

    // No concrete `HistoryRepository` ships with this crate (spec §1:
    // persistence is reached through narrow repository ports owned by a
    // caller); the null repository keeps the process runnable standalone.
    let registry = TableRegistry::new(cli.max_tables, Arc::new(NullHistoryRepository));
    let _reaper = poker_registry::spawn_reaper(
        registry.clone(),
        Duration::from_secs(cli.reap_interval_secs),
        Duration::from_secs(cli.empty_table_ttl_secs),
    );

    tokio::signal::ctrl_c().await?;
    log::info!("shutdown signal received, stopping all tables");
    registry.stop_all().await;
    Ok(())
}
