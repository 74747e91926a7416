use std::io;
use std::path::Path;

use super::{IoStats, KernelIdentity, PartitionSpace, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn kernel_identity() -> Option<KernelIdentity> {
        None
    }

    fn cpu_frequency_bounds() -> Option<(f64, f64)> {
        None
    }

    fn disk_io_totals() -> Option<IoStats> {
        None
    }

    fn partition_usage(_mount: &Path) -> Option<io::Result<PartitionSpace>> {
        // sysinfo already reads GetDiskFreeSpaceExW for every volume
        None
    }
}
