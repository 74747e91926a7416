use std::io;
use std::path::Path;

use super::{IoStats, KernelIdentity, PartitionSpace, PlatformExtensions, unix};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn kernel_identity() -> Option<KernelIdentity> {
        unix::uname().ok()
    }

    fn cpu_frequency_bounds() -> Option<(f64, f64)> {
        // Apple Silicon does not publish scaling bounds
        None
    }

    fn disk_io_totals() -> Option<IoStats> {
        // IOKit block storage counters are not wired up; sysinfo's per-disk
        // usage counters are summed instead.
        None
    }

    fn partition_usage(mount: &Path) -> Option<io::Result<PartitionSpace>> {
        Some(unix::statvfs_space(mount))
    }
}
