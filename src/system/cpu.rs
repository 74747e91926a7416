use tracing::debug;

use super::collector::{CollectionError, Collector};
use super::snapshot::{CoreLoad, CpuInfo, FrequencyBounds};
use super::source::HostSource;

pub struct CpuCollector<'a> {
    host: &'a mut dyn HostSource,
}

impl<'a> CpuCollector<'a> {
    pub fn new(host: &'a mut dyn HostSource) -> Self {
        CpuCollector { host }
    }
}

impl Collector for CpuCollector<'_> {
    type Output = CpuInfo;

    fn name(&self) -> &'static str {
        "cpu"
    }

    fn collect(&mut self) -> Result<CpuInfo, CollectionError> {
        let raw = self.host.sample_cpu()?;

        let per_core: Vec<CoreLoad> = raw
            .per_core_usage
            .iter()
            .enumerate()
            .map(|(index, &usage)| CoreLoad {
                index,
                percent: clamp_percent(usage),
            })
            .collect();

        let current_mhz = if raw.per_core_mhz.is_empty() {
            0.0
        } else {
            raw.per_core_mhz.iter().map(|&mhz| mhz as f64).sum::<f64>()
                / raw.per_core_mhz.len() as f64
        };

        debug!(cores = per_core.len(), current_mhz, "sampled cpu");

        Ok(CpuInfo {
            physical_cores: raw.physical_cores,
            logical_cores: per_core.len(),
            frequency: FrequencyBounds {
                min_mhz: raw.min_mhz,
                max_mhz: raw.max_mhz,
                current_mhz,
            },
            per_core,
            total_percent: clamp_percent(raw.global_usage),
        })
    }
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
