use tracing::debug;

use super::collector::{CollectionError, Collector};
use super::snapshot::{ByteSize, DiskInfo, DiskPartition, IoCounters, PartitionUsage, percent_of};
use super::source::{HostSource, RawPartition};

pub struct DiskCollector<'a> {
    host: &'a mut dyn HostSource,
}

impl<'a> DiskCollector<'a> {
    pub fn new(host: &'a mut dyn HostSource) -> Self {
        DiskCollector { host }
    }
}

impl Collector for DiskCollector<'_> {
    type Output = DiskInfo;

    fn name(&self) -> &'static str {
        "disk"
    }

    fn collect(&mut self) -> Result<DiskInfo, CollectionError> {
        let partitions: Vec<DiskPartition> = self
            .host
            .partitions()?
            .into_iter()
            .map(partition_from_raw)
            .collect();

        let io = match self.host.disk_io() {
            Ok(stats) => Some(IoCounters {
                read_bytes: ByteSize(stats.read_bytes),
                write_bytes: ByteSize(stats.write_bytes),
            }),
            Err(err) => {
                debug!(error = %err, "disk io counters unavailable");
                None
            }
        };

        Ok(DiskInfo { partitions, io })
    }
}

fn partition_from_raw(raw: RawPartition) -> DiskPartition {
    let usage = match raw.usage {
        Ok(space) => Some(PartitionUsage {
            total: ByteSize(space.total),
            used: ByteSize(space.used),
            free: ByteSize(space.free),
            // Relative to what non-root users can reach, like df.
            percent: percent_of(space.used, space.used.saturating_add(space.free)),
        }),
        Err(err) => {
            debug!(mountpoint = %raw.mountpoint, error = %err, "skipping partition usage");
            None
        }
    };
    DiskPartition {
        device: raw.device,
        mountpoint: raw.mountpoint,
        fstype: raw.fstype,
        usage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::fake::FakeHost;
    use crate::system::platform::PartitionSpace;

    #[test]
    fn denied_partition_keeps_structural_fields() {
        let mut host = FakeHost::default();
        let info = DiskCollector::new(&mut host).collect().unwrap();
        assert_eq!(info.partitions.len(), 2);

        let denied = &info.partitions[1];
        assert_eq!(denied.device, "/dev/sdb1");
        assert_eq!(denied.mountpoint, "/mnt/secret");
        assert_eq!(denied.fstype, "ext4");
        assert!(denied.usage.is_none());
    }

    #[test]
    fn enumeration_continues_past_failures() {
        let mut host = FakeHost::default();
        host.partitions.insert(
            0,
            RawPartition {
                device: "/dev/sr0".to_string(),
                mountpoint: "/media/cdrom".to_string(),
                fstype: "iso9660".to_string(),
                usage: Err(CollectionError::unavailable("partition usage", "not ready")),
            },
        );
        let info = DiskCollector::new(&mut host).collect().unwrap();
        let mounts: Vec<&str> = info.partitions.iter().map(|p| p.mountpoint.as_str()).collect();
        assert_eq!(mounts, vec!["/media/cdrom", "/", "/mnt/secret"]);
        assert!(info.partitions[1].usage.is_some());
    }

    #[test]
    fn usage_percent_is_bounded() {
        let mut host = FakeHost::default();
        host.partitions[0].usage = Ok(PartitionSpace {
            total: 100,
            used: 95,
            free: 0,
        });
        let info = DiskCollector::new(&mut host).collect().unwrap();
        let usage = info.partitions[0].usage.as_ref().unwrap();
        assert_eq!(usage.percent, 100.0);

        let root = DiskCollector::new(&mut FakeHost::default()).collect().unwrap();
        assert_eq!(root.partitions[0].usage.as_ref().unwrap().percent, 40.0);
    }

    #[test]
    fn missing_io_counters_do_not_fail_the_section() {
        let mut host = FakeHost::default();
        host.unavailable.push("disk io");
        let info = DiskCollector::new(&mut host).collect().unwrap();
        assert!(info.io.is_none());
        assert_eq!(info.partitions.len(), 2);
    }
}
