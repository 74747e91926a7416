use std::io;
use std::path::Path;

use super::{IoStats, KernelIdentity, PartitionSpace, PlatformExtensions, unix};

const SECTOR_SIZE: u64 = 512;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn kernel_identity() -> Option<KernelIdentity> {
        unix::uname().ok()
    }

    fn cpu_frequency_bounds() -> Option<(f64, f64)> {
        // Values are in kHz
        let base = Path::new("/sys/devices/system/cpu/cpu0/cpufreq");
        let min = read_khz(&base.join("scaling_min_freq"))?;
        let max = read_khz(&base.join("scaling_max_freq"))?;
        Some((min / 1000.0, max / 1000.0))
    }

    fn disk_io_totals() -> Option<IoStats> {
        let contents = std::fs::read_to_string("/proc/diskstats").ok()?;
        parse_diskstats(&contents, is_whole_device)
    }

    fn partition_usage(mount: &Path) -> Option<io::Result<PartitionSpace>> {
        Some(unix::statvfs_space(mount))
    }
}

fn read_khz(path: &Path) -> Option<f64> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}

/// Whole devices have a /sys/block entry; partitions only appear under
/// their parent. Slashes in device names become '!' in sysfs.
fn is_whole_device(name: &str) -> bool {
    Path::new("/sys/block")
        .join(name.replace('/', "!"))
        .exists()
}

/// Sum sectors read/written over the devices accepted by `include`.
/// Line layout: major minor name reads merged sectors_read ms writes merged
/// sectors_written ...
fn parse_diskstats(contents: &str, include: impl Fn(&str) -> bool) -> Option<IoStats> {
    let mut totals = IoStats::default();
    let mut seen = false;
    for line in contents.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 10 || !include(fields[2]) {
            continue;
        }
        let (Ok(sectors_read), Ok(sectors_written)) =
            (fields[5].parse::<u64>(), fields[9].parse::<u64>())
        else {
            continue;
        };
        totals.read_bytes = totals
            .read_bytes
            .saturating_add(sectors_read.saturating_mul(SECTOR_SIZE));
        totals.write_bytes = totals
            .write_bytes
            .saturating_add(sectors_written.saturating_mul(SECTOR_SIZE));
        seen = true;
    }
    seen.then_some(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISKSTATS: &str = "\
   8       0 sda 1000 10 2048 500 400 5 1024 300 0 700 800 0 0 0 0
   8       1 sda1 900 10 2000 450 390 5 1000 290 0 690 740 0 0 0 0
 259       0 nvme0n1 50 0 100 20 25 0 40 10 0 30 30
   7       0 loop0 bogus line
";

    #[test]
    fn sums_only_whole_devices() {
        let stats = parse_diskstats(DISKSTATS, |name| name == "sda" || name == "nvme0n1").unwrap();
        assert_eq!(stats.read_bytes, (2048 + 100) * 512);
        assert_eq!(stats.write_bytes, (1024 + 40) * 512);
    }

    #[test]
    fn no_matching_device_is_none() {
        assert_eq!(parse_diskstats(DISKSTATS, |_| false), None);
        assert_eq!(parse_diskstats("", |_| true), None);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let stats = parse_diskstats(DISKSTATS, |name| name == "loop0" || name == "sda").unwrap();
        assert_eq!(stats.read_bytes, 2048 * 512);
    }
}
