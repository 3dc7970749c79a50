//! Resident memory sampling for the current process.

use super::MemoryProbe;

/// Reads the resident set size of the current process.
///
/// Linux reads `VmRSS` from `/proc/self/status`; other platforms ask `ps`.
/// A failed read reports `0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessMemoryProbe;

impl ProcessMemoryProbe {
    pub fn new() -> Self {
        Self
    }
}

impl MemoryProbe for ProcessMemoryProbe {
    fn resident_mb(&self) -> f64 {
        match read_rss_kb() {
            Some(kb) => kb as f64 / 1024.0,
            None => {
                tracing::warn!("Failed to read process resident memory, reporting 0 MB");
                0.0
            }
        }
    }
}

#[cfg(target_os = "linux")]
fn read_rss_kb() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    parse_vm_rss(&status)
}

#[cfg(not(target_os = "linux"))]
fn read_rss_kb() -> Option<u64> {
    let output = std::process::Command::new("ps")
        .args(["-o", "rss=", "-p", &std::process::id().to_string()])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8_lossy(&output.stdout).trim().parse().ok()
}

/// Extract the `VmRSS` value (kB) from a `/proc/<pid>/status` document.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_vm_rss(status: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("VmRSS:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kb| kb.parse().ok())
}
