//! APRS digipeater decision tool.
//!
//! Loads a station config and its `<digipeater>` blocks, then reads
//! monitor-format frames (one per line) and prints the digipeat verdict of
//! every digipeater fed by the receiving interface.
//!
//! # Architecture Overview
//!
//! ```text
//!   station.toml ──▶ config ──▶ lifecycle::startup ──▶ Registry (frozen)
//!   digi.conf    ──▶ blocks ──▶ topology::builder  ──┘      │
//!                                                           ▼
//!   frames (stdin/file) ──▶ Frame::parse ──▶ Dispatcher ──▶ verdicts
//!                                              │
//!                                              └──▶ TransmitQueue
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use digipeater::lifecycle::{load_station, load_station_config};
use digipeater::observability::logging;
use digipeater::routing::{Dispatcher, Frame, TransmitQueue, Verdict};
use digipeater::topology::{InterfaceId, Registry};

#[derive(Parser)]
#[command(name = "digipeater")]
#[command(about = "Evaluate APRS frames against configured digipeaters", long_about = None)]
struct Cli {
    /// Station configuration (TOML).
    #[arg(short, long, default_value = "station.toml")]
    config: PathBuf,

    /// Digipeater block file; overrides `[station] digipeaters`.
    #[arg(short, long)]
    digipeaters: Option<PathBuf>,

    /// Frames to evaluate, one per line. Reads stdin when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Callsign of the receiving interface. Defaults to every interface that
    /// feeds a digipeater.
    #[arg(long)]
    interface: Option<String>,

    /// Print verdicts as JSON lines.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_station_config(&cli.config)?;
    logging::init(&config.logging);

    tracing::info!(
        config = %cli.config.display(),
        mycall = %config.station.mycall,
        "digipeater v0.1.0 starting"
    );

    let station = load_station(&cli.config, config, cli.digipeaters.as_deref())?;
    let registry = &station.registry;

    for rejected in &station.report.rejected {
        eprintln!("{rejected}");
        for fault in &rejected.faults {
            eprintln!("  {fault}");
        }
    }

    let interfaces = receiving_interfaces(registry, cli.interface.as_deref())?;
    if interfaces.is_empty() {
        tracing::warn!("No interface feeds a digipeater; every frame will be ignored");
    }

    match &cli.input {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            process_frames(file, registry, &interfaces, cli.json).await?;
        }
        None => process_frames(tokio::io::stdin(), registry, &interfaces, cli.json).await?,
    }

    tracing::info!("Input exhausted");
    Ok(())
}

fn receiving_interfaces(
    registry: &Registry,
    callsign: Option<&str>,
) -> Result<Vec<InterfaceId>, Box<dyn std::error::Error>> {
    match callsign {
        Some(callsign) => registry
            .find_interface(callsign)
            .map(|id| vec![id])
            .ok_or_else(|| format!("unknown interface: '{callsign}'").into()),
        None => Ok(registry
            .interfaces()
            .iter()
            .filter(|aif| !aif.feeds().is_empty())
            .map(|aif| aif.id())
            .collect()),
    }
}

async fn process_frames<R>(
    reader: R,
    registry: &Registry,
    interfaces: &[InterfaceId],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: AsyncRead + Unpin,
{
    let dispatcher = Dispatcher::new(registry);
    let mut queue = TransmitQueue::new();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let frame = match Frame::parse(line) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(frame = line, error = %e, "Unparseable frame");
                continue;
            }
        };

        for &interface in interfaces {
            for verdict in dispatcher.receive(interface, &frame, &mut queue) {
                print_verdict(registry, interface, &frame, &verdict, json)?;
            }
        }

        for (digi, frame) in queue.drain() {
            tracing::debug!(digipeater = digi.index(), frame = frame.text(), "Queued for transmit");
        }
    }

    Ok(())
}

fn print_verdict(
    registry: &Registry,
    interface: InterfaceId,
    frame: &Frame,
    verdict: &Verdict,
    json: bool,
) -> Result<(), serde_json::Error> {
    let callsign = registry.interface(interface).map_or("?", |aif| aif.callsign());

    if json {
        let line = serde_json::json!({
            "interface": callsign,
            "frame": frame.text(),
            "verdict": verdict,
        });
        println!("{}", serde_json::to_string(&line)?);
    } else {
        println!(
            "{} digi#{} via {}: req={} done={} traces={}{} {}",
            if verdict.accepted { "DIGIPEAT" } else { "DROP    " },
            verdict.digipeater.index(),
            callsign,
            verdict.hops.requested,
            verdict.hops.completed,
            verdict.hops.traces,
            if verdict.faults.is_empty() { "" } else { " FAULT" },
            frame.text(),
        );
    }
    Ok(())
}
