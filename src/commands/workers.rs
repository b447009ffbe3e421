use anyhow::Result;
use std::fmt::Write as _;

use myparser::client::WorkerClient;
use myparser::models::{FleetStats, WorkerInfo};

use super::{format_bytes, heading, OutputFormat};

pub async fn workers(client: &WorkerClient, output: OutputFormat) -> Result<()> {
    let fleet = client.workers().await?;
    tracing::info!(count = fleet.len(), "Fetched worker list");

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fleet)?),
        OutputFormat::Text => print!("{}", render(&fleet)),
    }

    Ok(())
}

fn timestamp(ts: i64, at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn render(fleet: &[WorkerInfo]) -> String {
    let mut out = String::new();
    let stats = FleetStats::from_workers(fleet);

    heading(&mut out, &format!("Fleet ({} workers)", stats.workers));

    if fleet.is_empty() {
        let _ = writeln!(out, "No workers registered");
        return out;
    }

    for worker in fleet {
        let _ = writeln!(
            out,
            "#{:<4} {:<21} {:<7} threads={:<3} mem={}/{} queries={} proxies={}",
            worker.id,
            worker.address(),
            if worker.working { "working" } else { "idle" },
            worker.threads,
            format_bytes(worker.memory.free),
            format_bytes(worker.memory.total),
            worker.acquired.queries,
            worker.acquired.proxies,
        );
        let _ = writeln!(
            out,
            "      connected {}, updated {}",
            timestamp(worker.connected_at, worker.connected_at_utc()),
            timestamp(worker.updated_at, worker.updated_at_utc()),
        );
    }

    let _ = writeln!(out, "\nTotals");
    let _ = writeln!(out, "------");
    let _ = writeln!(out, "Working: {} / idle: {}", stats.working, stats.idle());
    let _ = writeln!(out, "Threads: {}", stats.threads);
    let _ = writeln!(
        out,
        "Memory: {} free of {}",
        format_bytes(stats.memory.free),
        format_bytes(stats.memory.total)
    );

    out
}
