use anyhow::Result;
use std::fmt::Write as _;

use myparser::client::WorkerClient;
use myparser::models::MeInfo;

use super::{format_bytes, heading, OutputFormat};

pub async fn me(client: &WorkerClient, output: OutputFormat) -> Result<()> {
    let info = client.me().await?;
    tracing::info!(worker_id = info.worker_id, working = info.working, "Fetched worker status");

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        OutputFormat::Text => print!("{}", render(client.host(), &info)),
    }

    Ok(())
}

fn render(host: &str, info: &MeInfo) -> String {
    let mut out = String::new();

    heading(&mut out, &format!("Worker #{} ({host})", info.worker_id));
    let _ = writeln!(out, "State: {}", if info.working { "working" } else { "idle" });
    let _ = writeln!(out, "Threads: {}", info.threads);
    let _ = writeln!(
        out,
        "Memory: {} free of {} ({:.1}% used)",
        format_bytes(info.memory.free),
        format_bytes(info.memory.total),
        info.memory.usage_ratio() * 100.0
    );

    let _ = writeln!(out, "\nFarm Summary");
    let _ = writeln!(out, "------------");
    let _ = writeln!(out, "Domains: {}", info.summary.domains);
    let _ = writeln!(out, "Proxies: {}", info.summary.proxies);
    let _ = writeln!(out, "Workers: {}", info.summary.workers);
    let _ = writeln!(out, "Tasks: {}", info.summary.tasks);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use myparser::models::{MemoryInfo, Summary};

    #[test]
    fn test_render() {
        let info = MeInfo {
            worker_id: 7,
            threads: 16,
            working: false,
            memory: MemoryInfo {
                free: 1024,
                total: 4096,
            },
            summary: Summary {
                domains: 12,
                proxies: 300,
                workers: 3,
                tasks: 42,
            },
        };

        let text = render("farm:8080", &info);

        assert!(text.starts_with("Worker #7 (farm:8080)\n"));
        assert!(text.contains("State: idle"));
        assert!(text.contains("Threads: 16"));
        assert!(text.contains("Memory: 1.0 KiB free of 4.0 KiB (75.0% used)"));
        assert!(text.contains("Proxies: 300"));
        assert!(text.contains("Tasks: 42"));
    }
}
