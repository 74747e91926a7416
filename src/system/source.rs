use std::net::IpAddr;
use std::thread;
use std::time::Duration;

use sysinfo::{Disks, Networks, System};
use tracing::debug;

use super::collector::CollectionError;
use super::platform::{self, IoStats, PartitionSpace};

/// Length of the blocking CPU usage measurement.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawOsIdentity {
    pub system: Option<String>,
    pub release: Option<String>,
    pub version: Option<String>,
    pub host_name: Option<String>,
    pub machine: String,
    pub processor: Option<String>,
    /// Seconds since the Unix epoch; 0 when unknown.
    pub boot_epoch_secs: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawCpu {
    pub physical_cores: Option<usize>,
    /// One entry per logical core, in enumeration order.
    pub per_core_usage: Vec<f32>,
    pub per_core_mhz: Vec<u64>,
    pub global_usage: f32,
    pub min_mhz: Option<f64>,
    pub max_mhz: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawMemory {
    pub total: u64,
    pub used: u64,
    pub available: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawSwap {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RawPartition {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub usage: Result<PartitionSpace, CollectionError>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawInterface {
    pub name: String,
    pub mac_address: Option<String>,
    pub addresses: Vec<(IpAddr, u8)>,
    pub total_received: u64,
    pub total_transmitted: u64,
}

/// Raw host readings. Implemented over `sysinfo` for real hosts and by
/// `fake::FakeHost` in tests.
pub trait HostSource {
    fn os_identity(&mut self) -> Result<RawOsIdentity, CollectionError>;

    /// Blocks for the sampling window before reading usage.
    fn sample_cpu(&mut self) -> Result<RawCpu, CollectionError>;

    fn memory(&mut self) -> Result<RawMemory, CollectionError>;

    fn swap(&mut self) -> Result<RawSwap, CollectionError>;

    fn partitions(&mut self) -> Result<Vec<RawPartition>, CollectionError>;

    fn disk_io(&mut self) -> Result<IoStats, CollectionError>;

    fn interfaces(&mut self) -> Result<Vec<RawInterface>, CollectionError>;
}

pub struct SysinfoHost {
    sys: System,
    sample_window: Duration,
}

impl Default for SysinfoHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoHost {
    pub fn new() -> Self {
        SysinfoHost {
            sys: System::new(),
            sample_window: CPU_SAMPLE_WINDOW,
        }
    }
}

impl HostSource for SysinfoHost {
    fn os_identity(&mut self) -> Result<RawOsIdentity, CollectionError> {
        let processor = self.cpu_brand();
        // sysinfo's name() is the distribution, not the kernel, so only
        // hosts without uname fall back to it.
        let (system, release, version) = match platform::kernel_identity() {
            Some(kernel) => (
                Some(kernel.sysname),
                Some(kernel.release),
                Some(kernel.version),
            ),
            None => (
                System::name(),
                System::kernel_version(),
                System::os_version(),
            ),
        };
        Ok(RawOsIdentity {
            system,
            release,
            version,
            host_name: System::host_name(),
            machine: std::env::consts::ARCH.to_string(),
            processor,
            boot_epoch_secs: System::boot_time(),
        })
    }

    fn sample_cpu(&mut self) -> Result<RawCpu, CollectionError> {
        // Usage is a delta between two refreshes.
        self.sys.refresh_cpu_all();
        thread::sleep(self.sample_window);
        self.sys.refresh_cpu_all();

        let cpus = self.sys.cpus();
        if cpus.is_empty() {
            return Err(CollectionError::unavailable("cpu", "no processors reported"));
        }

        let (min_mhz, max_mhz) = match platform::cpu_frequency_bounds() {
            Some((min, max)) => (Some(min), Some(max)),
            None => (None, None),
        };

        Ok(RawCpu {
            physical_cores: System::physical_core_count(),
            per_core_usage: cpus.iter().map(|cpu| cpu.cpu_usage()).collect(),
            per_core_mhz: cpus.iter().map(|cpu| cpu.frequency()).collect(),
            global_usage: self.sys.global_cpu_usage(),
            min_mhz,
            max_mhz,
        })
    }

    fn memory(&mut self) -> Result<RawMemory, CollectionError> {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(CollectionError::unavailable("memory", "total memory reported as 0"));
        }
        Ok(RawMemory {
            total,
            used: self.sys.used_memory(),
            available: self.sys.available_memory(),
        })
    }

    fn swap(&mut self) -> Result<RawSwap, CollectionError> {
        self.sys.refresh_memory();
        // No swap configured is a valid all-zero reading.
        Ok(RawSwap {
            total: self.sys.total_swap(),
            used: self.sys.used_swap(),
            free: self.sys.free_swap(),
        })
    }

    fn partitions(&mut self) -> Result<Vec<RawPartition>, CollectionError> {
        let disks = Disks::new_with_refreshed_list();
        let partitions = disks
            .list()
            .iter()
            .map(|disk| {
                let mountpoint = disk.mount_point().display().to_string();
                let usage = match platform::partition_usage(disk.mount_point()) {
                    Some(Ok(space)) => Ok(space),
                    Some(Err(err)) => {
                        Err(CollectionError::from_io(&err, "partition usage", &mountpoint))
                    }
                    None => {
                        let total = disk.total_space();
                        let free = disk.available_space();
                        Ok(PartitionSpace {
                            total,
                            used: total.saturating_sub(free),
                            free,
                        })
                    }
                };
                RawPartition {
                    device: disk.name().to_string_lossy().into_owned(),
                    mountpoint,
                    fstype: disk.file_system().to_string_lossy().into_owned(),
                    usage,
                }
            })
            .collect::<Vec<_>>();
        debug!(count = partitions.len(), "enumerated partitions");
        Ok(partitions)
    }

    fn disk_io(&mut self) -> Result<IoStats, CollectionError> {
        if let Some(stats) = platform::disk_io_totals() {
            return Ok(stats);
        }

        let disks = Disks::new_with_refreshed_list();
        if disks.list().is_empty() {
            return Err(CollectionError::unavailable("disk io", "no disks reported"));
        }
        Ok(disks
            .list()
            .iter()
            .map(|disk| disk.usage())
            .fold(IoStats::default(), |acc, usage| IoStats {
                read_bytes: acc.read_bytes.saturating_add(usage.total_read_bytes),
                write_bytes: acc.write_bytes.saturating_add(usage.total_written_bytes),
            }))
    }

    fn interfaces(&mut self) -> Result<Vec<RawInterface>, CollectionError> {
        let networks = Networks::new_with_refreshed_list();
        let mut interfaces: Vec<RawInterface> = networks
            .list()
            .iter()
            .map(|(name, data)| {
                let mac = data.mac_address().to_string();
                RawInterface {
                    name: name.clone(),
                    mac_address: (mac != "00:00:00:00:00:00").then_some(mac),
                    addresses: data
                        .ip_networks()
                        .iter()
                        .map(|net| (net.addr, net.prefix))
                        .collect(),
                    total_received: data.total_received(),
                    total_transmitted: data.total_transmitted(),
                }
            })
            .collect();
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(interfaces)
    }
}

impl SysinfoHost {
    fn cpu_brand(&mut self) -> Option<String> {
        if self.sys.cpus().is_empty() {
            self.sys.refresh_cpu_all();
        }
        self.sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
    }
}
