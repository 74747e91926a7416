use std::io;
use std::path::Path;

/// Cumulative bytes read/written since boot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IoStats {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// Capacity figures for one mounted filesystem, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PartitionSpace {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

/// Kernel name, release and build string, as `uname -s`, `-r` and `-v`
/// print them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KernelIdentity {
    pub sysname: String,
    pub release: String,
    pub version: String,
}

/// Host facts `sysinfo` does not expose. `None` means the platform has no
/// native way to answer and callers fall back to what `sysinfo` reports.
pub trait PlatformExtensions {
    fn kernel_identity() -> Option<KernelIdentity>;
    /// (min, max) clock frequency in MHz.
    fn cpu_frequency_bounds() -> Option<(f64, f64)>;
    fn disk_io_totals() -> Option<IoStats>;
    fn partition_usage(mount: &Path) -> Option<io::Result<PartitionSpace>>;
}

#[cfg(unix)]
mod unix;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod other;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
use other as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn kernel_identity() -> Option<KernelIdentity> {
    platform_impl::Platform::kernel_identity()
}

pub fn cpu_frequency_bounds() -> Option<(f64, f64)> {
    platform_impl::Platform::cpu_frequency_bounds()
}

pub fn disk_io_totals() -> Option<IoStats> {
    platform_impl::Platform::disk_io_totals()
}

pub fn partition_usage(mount: &Path) -> Option<io::Result<PartitionSpace>> {
    platform_impl::Platform::partition_usage(mount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrappers_do_not_panic_on_this_host() {
        let _ = kernel_identity();
        let _ = cpu_frequency_bounds();
        let _ = disk_io_totals();
        let _ = partition_usage(Path::new("/"));
    }

    #[test]
    fn frequency_bounds_are_ordered_when_present() {
        if let Some((min, max)) = cpu_frequency_bounds() {
            assert!(min <= max, "min {min} > max {max}");
        }
    }
}
