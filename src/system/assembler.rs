use serde::Deserialize;
use tracing::{debug, debug_span, warn};

use super::collector::Collector;
use super::cpu::CpuCollector;
use super::disk::DiskCollector;
use super::gpu::{GpuCollector, GpuSource};
use super::memory::{MemoryCollector, SwapCollector};
use super::network::NetworkCollector;
use super::os::OsCollector;
use super::snapshot::{Outcome, SystemSnapshot};
use super::source::HostSource;

/// Which sections to collect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Sections {
    pub os: bool,
    pub cpu: bool,
    pub memory: bool,
    pub swap: bool,
    pub disk: bool,
    pub gpu: bool,
    pub network: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Sections {
            os: true,
            cpu: true,
            memory: true,
            swap: true,
            disk: true,
            gpu: true,
            network: false,
        }
    }
}

/// Runs every enabled collector once, in report order, and keeps going when
/// one of them fails.
pub struct SnapshotAssembler<'a> {
    host: &'a mut dyn HostSource,
    gpu: &'a mut dyn GpuSource,
    sections: Sections,
}

impl<'a> SnapshotAssembler<'a> {
    pub fn new(
        host: &'a mut dyn HostSource,
        gpu: &'a mut dyn GpuSource,
        sections: Sections,
    ) -> Self {
        SnapshotAssembler {
            host,
            gpu,
            sections,
        }
    }

    pub fn assemble(&mut self) -> SystemSnapshot {
        let sections = self.sections;
        let os = run(sections.os, OsCollector::new(&mut *self.host));
        let cpu = run(sections.cpu, CpuCollector::new(&mut *self.host));
        let memory = run(sections.memory, MemoryCollector::new(&mut *self.host));
        let swap = run(sections.swap, SwapCollector::new(&mut *self.host));
        let disk = run(sections.disk, DiskCollector::new(&mut *self.host));
        let gpus = run(sections.gpu, GpuCollector::new(&mut *self.gpu));
        let network = run(sections.network, NetworkCollector::new(&mut *self.host));

        SystemSnapshot {
            os,
            cpu,
            memory,
            swap,
            disk,
            gpus,
            network,
        }
    }
}

fn run<C: Collector>(enabled: bool, mut collector: C) -> Outcome<C::Output> {
    let name = collector.name();
    if !enabled {
        debug!(section = name, "section disabled");
        return Outcome::Skipped;
    }

    let _span = debug_span!("collector.collect", section = name).entered();
    match collector.collect() {
        Ok(output) => Outcome::Collected(output),
        Err(err) => {
            warn!(section = name, error = %err, "collector failed, section left empty");
            Outcome::Unavailable(err.to_string())
        }
    }
}
