//! Deterministic host and GPU sources for tests and benchmarks.

use std::net::{IpAddr, Ipv4Addr};

use super::collector::CollectionError;
use super::gpu::{GpuSource, RawGpu};
use super::platform::{IoStats, PartitionSpace};
use super::source::{
    HostSource, RawCpu, RawInterface, RawMemory, RawOsIdentity, RawPartition, RawSwap,
};

const GIB: u64 = 1024 * 1024 * 1024;
const MIB: u64 = 1024 * 1024;

/// Serves fixed readings. Names listed in `unavailable` ("os", "cpu",
/// "memory", "swap", "disk", "disk io", "network") fail with
/// `SourceUnavailable`. Every query is recorded in `calls`.
#[derive(Clone, Debug)]
pub struct FakeHost {
    pub os: RawOsIdentity,
    pub cpu: RawCpu,
    pub memory: RawMemory,
    pub swap: RawSwap,
    pub partitions: Vec<RawPartition>,
    pub disk_io: IoStats,
    pub interfaces: Vec<RawInterface>,
    pub unavailable: Vec<&'static str>,
    pub calls: Vec<&'static str>,
}

impl Default for FakeHost {
    fn default() -> Self {
        FakeHost {
            os: RawOsIdentity {
                system: Some("Linux".to_string()),
                release: Some("6.8.0-test".to_string()),
                version: Some("#1 SMP PREEMPT_DYNAMIC".to_string()),
                host_name: Some("testbox".to_string()),
                machine: "x86_64".to_string(),
                processor: Some("Fake CPU @ 3.00GHz".to_string()),
                boot_epoch_secs: 1_709_622_489,
            },
            cpu: RawCpu {
                physical_cores: Some(2),
                per_core_usage: vec![12.5, 50.0, 0.0, 100.0],
                per_core_mhz: vec![2400, 2400, 2400, 2400],
                global_usage: 40.6,
                min_mhz: Some(800.0),
                max_mhz: Some(4000.0),
            },
            memory: RawMemory {
                total: 8 * GIB,
                used: 6 * GIB,
                available: 2 * GIB,
            },
            swap: RawSwap {
                total: 2 * GIB,
                used: 512 * MIB,
                free: 1536 * MIB,
            },
            partitions: vec![
                RawPartition {
                    device: "/dev/sda1".to_string(),
                    mountpoint: "/".to_string(),
                    fstype: "ext4".to_string(),
                    usage: Ok(PartitionSpace {
                        total: 100 * GIB,
                        used: 40 * GIB,
                        free: 60 * GIB,
                    }),
                },
                RawPartition {
                    device: "/dev/sdb1".to_string(),
                    mountpoint: "/mnt/secret".to_string(),
                    fstype: "ext4".to_string(),
                    usage: Err(CollectionError::PermissionDenied {
                        path: "/mnt/secret".to_string(),
                    }),
                },
            ],
            disk_io: IoStats {
                read_bytes: GIB,
                write_bytes: 512 * MIB,
            },
            interfaces: vec![RawInterface {
                name: "eth0".to_string(),
                mac_address: Some("aa:bb:cc:dd:ee:ff".to_string()),
                addresses: vec![(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 10)), 24)],
                total_received: 3 * MIB,
                total_transmitted: MIB,
            }],
            unavailable: Vec::new(),
            calls: Vec::new(),
        }
    }
}

impl FakeHost {
    fn serve<T>(&mut self, name: &'static str, value: T) -> Result<T, CollectionError> {
        self.calls.push(name);
        if self.unavailable.contains(&name) {
            return Err(CollectionError::unavailable(name, "fake source offline"));
        }
        Ok(value)
    }
}

impl HostSource for FakeHost {
    fn os_identity(&mut self) -> Result<RawOsIdentity, CollectionError> {
        let os = self.os.clone();
        self.serve("os", os)
    }

    fn sample_cpu(&mut self) -> Result<RawCpu, CollectionError> {
        let cpu = self.cpu.clone();
        self.serve("cpu", cpu)
    }

    fn memory(&mut self) -> Result<RawMemory, CollectionError> {
        let memory = self.memory;
        self.serve("memory", memory)
    }

    fn swap(&mut self) -> Result<RawSwap, CollectionError> {
        let swap = self.swap;
        self.serve("swap", swap)
    }

    fn partitions(&mut self) -> Result<Vec<RawPartition>, CollectionError> {
        let partitions = self.partitions.clone();
        self.serve("disk", partitions)
    }

    fn disk_io(&mut self) -> Result<IoStats, CollectionError> {
        let io = self.disk_io;
        self.serve("disk io", io)
    }

    fn interfaces(&mut self) -> Result<Vec<RawInterface>, CollectionError> {
        let interfaces = self.interfaces.clone();
        self.serve("network", interfaces)
    }
}

/// Serves a fixed device list, or fails like a host without a driver.
#[derive(Clone, Debug, Default)]
pub struct FakeGpu {
    pub devices: Vec<RawGpu>,
    pub driver_missing: bool,
}

impl FakeGpu {
    pub fn with_one_device() -> Self {
        FakeGpu {
            devices: vec![RawGpu {
                index: 0,
                uuid: "GPU-1234abcd".to_string(),
                name: "NVIDIA GeForce RTX 3070".to_string(),
                utilization_percent: Some(35.0),
                memory_total_mib: Some(8192),
                memory_used_mib: Some(1024),
                memory_free_mib: Some(7168),
                temperature_c: Some(45.0),
            }],
            driver_missing: false,
        }
    }

    pub fn without_driver() -> Self {
        FakeGpu {
            devices: Vec::new(),
            driver_missing: true,
        }
    }
}

impl GpuSource for FakeGpu {
    fn devices(&mut self) -> Result<Vec<RawGpu>, CollectionError> {
        if self.driver_missing {
            return Err(CollectionError::unavailable("gpu driver", "nvidia-smi not found"));
        }
        Ok(self.devices.clone())
    }
}
