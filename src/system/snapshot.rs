use std::fmt;
use std::net::IpAddr;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::format::format_bytes;

/// A byte count as read from the host. Rendered through `format_bytes`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ByteSize(pub u64);

impl ByteSize {
    pub fn from_mib(mib: u64) -> Self {
        ByteSize(mib.saturating_mul(1024 * 1024))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_bytes(self.0))
    }
}

/// `part / whole` as a percentage clamped to [0, 100]; 0 when `whole` is 0.
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 100.0).clamp(0.0, 100.0)
}

/// Per-section collection state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    Collected(T),
    /// The collector failed entirely; carries the reason.
    Unavailable(String),
    /// Disabled by configuration; never collected.
    Skipped,
}

impl<T> Outcome<T> {
    pub fn collected(&self) -> Option<&T> {
        match self {
            Outcome::Collected(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OsInfo {
    pub system: String,
    pub release: String,
    pub version: String,
    pub host_name: String,
    pub machine: String,
    pub processor: String,
    pub boot_time: Option<NaiveDateTime>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CoreLoad {
    pub index: usize,
    pub percent: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FrequencyBounds {
    pub min_mhz: Option<f64>,
    pub max_mhz: Option<f64>,
    pub current_mhz: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CpuInfo {
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    pub frequency: FrequencyBounds,
    pub per_core: Vec<CoreLoad>,
    pub total_percent: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemoryInfo {
    pub total: ByteSize,
    pub used: ByteSize,
    pub available: ByteSize,
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SwapInfo {
    pub total: ByteSize,
    pub free: ByteSize,
    pub used: ByteSize,
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PartitionUsage {
    pub total: ByteSize,
    pub used: ByteSize,
    pub free: ByteSize,
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiskPartition {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    /// `None` when the usage query for this mount failed.
    pub usage: Option<PartitionUsage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct IoCounters {
    pub read_bytes: ByteSize,
    pub write_bytes: ByteSize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiskInfo {
    pub partitions: Vec<DiskPartition>,
    pub io: Option<IoCounters>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GpuDevice {
    pub id: u32,
    pub name: String,
    /// Fraction in [0, 1].
    pub load: Option<f64>,
    pub memory_free: ByteSize,
    pub memory_used: ByteSize,
    pub memory_total: ByteSize,
    pub temperature_c: Option<f64>,
    pub uuid: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IpEntry {
    pub addr: IpAddr,
    pub prefix: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InterfaceInfo {
    pub name: String,
    pub mac_address: Option<String>,
    pub addresses: Vec<IpEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkInfo {
    pub interfaces: Vec<InterfaceInfo>,
    pub bytes_sent: ByteSize,
    pub bytes_received: ByteSize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SystemSnapshot {
    pub os: Outcome<OsInfo>,
    pub cpu: Outcome<CpuInfo>,
    pub memory: Outcome<MemoryInfo>,
    pub swap: Outcome<SwapInfo>,
    pub disk: Outcome<DiskInfo>,
    pub gpus: Outcome<Vec<GpuDevice>>,
    pub network: Outcome<NetworkInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_handles_zero_total() {
        assert_eq!(percent_of(10, 0), 0.0);
        assert_eq!(percent_of(1, 4), 25.0);
        assert_eq!(percent_of(8, 4), 100.0);
    }

    #[test]
    fn byte_size_display_uses_binary_units() {
        assert_eq!(ByteSize(8_589_934_592).to_string(), "8.00GB");
        assert_eq!(ByteSize::from_mib(2).as_u64(), 2_097_152);
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let collected: Outcome<u32> = Outcome::Collected(7);
        let json = serde_json::to_value(&collected).unwrap();
        assert_eq!(json["status"], "collected");
        assert_eq!(json["data"], 7);

        let skipped: Outcome<u32> = Outcome::Skipped;
        assert_eq!(serde_json::to_value(&skipped).unwrap()["status"], "skipped");
    }
}
