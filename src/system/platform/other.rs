use std::io;
use std::path::Path;

use super::{IoStats, KernelIdentity, PartitionSpace, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    #[cfg(unix)]
    fn kernel_identity() -> Option<KernelIdentity> {
        super::unix::uname().ok()
    }

    #[cfg(not(unix))]
    fn kernel_identity() -> Option<KernelIdentity> {
        None
    }

    fn cpu_frequency_bounds() -> Option<(f64, f64)> {
        None
    }

    fn disk_io_totals() -> Option<IoStats> {
        None
    }

    #[cfg(unix)]
    fn partition_usage(mount: &Path) -> Option<io::Result<PartitionSpace>> {
        Some(super::unix::statvfs_space(mount))
    }

    #[cfg(not(unix))]
    fn partition_usage(_mount: &Path) -> Option<io::Result<PartitionSpace>> {
        None
    }
}
