//! Periodic resident-memory report

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::client::BotClient;
use crate::application::errors::BotError;
use crate::plugins::trait_def::BackgroundTask;

pub struct MemoryReport;

/// Resident set size in bytes, from a `/proc/<pid>/status` document
pub fn parse_vm_rss(status: &str) -> Option<u64> {
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let kib: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kib * 1024)
}

fn resident_bytes() -> Option<u64> {
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|s| parse_vm_rss(&s))
}

#[async_trait]
impl BackgroundTask for MemoryReport {
    async fn execute(&self, client: &Arc<BotClient>) -> Result<(), BotError> {
        match resident_bytes() {
            Some(bytes) => client.logger.custom(
                "MEMORY",
                &format!("Resident memory: {:.1} MiB", bytes as f64 / (1024.0 * 1024.0)),
            ),
            None => client.logger.custom("MEMORY", "Resident memory unavailable on this platform"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vm_rss() {
        let status = "Name:\tradio-bot\nVmPeak:\t  200000 kB\nVmRSS:\t   20480 kB\nThreads:\t8\n";
        assert_eq!(parse_vm_rss(status), Some(20 * 1024 * 1024));
        assert_eq!(parse_vm_rss("Name:\tradio-bot\n"), None);
    }
}
