use super::collector::{CollectionError, Collector};
use super::snapshot::{ByteSize, MemoryInfo, SwapInfo, percent_of};
use super::source::HostSource;

pub struct MemoryCollector<'a> {
    host: &'a mut dyn HostSource,
}

impl<'a> MemoryCollector<'a> {
    pub fn new(host: &'a mut dyn HostSource) -> Self {
        MemoryCollector { host }
    }
}

impl Collector for MemoryCollector<'_> {
    type Output = MemoryInfo;

    fn name(&self) -> &'static str {
        "memory"
    }

    fn collect(&mut self) -> Result<MemoryInfo, CollectionError> {
        let raw = self.host.memory()?;
        // Reclaimable cache counts as available, not used.
        let percent = percent_of(raw.total.saturating_sub(raw.available), raw.total);
        Ok(MemoryInfo {
            total: ByteSize(raw.total),
            used: ByteSize(raw.used),
            available: ByteSize(raw.available),
            percent,
        })
    }
}

pub struct SwapCollector<'a> {
    host: &'a mut dyn HostSource,
}

impl<'a> SwapCollector<'a> {
    pub fn new(host: &'a mut dyn HostSource) -> Self {
        SwapCollector { host }
    }
}

impl Collector for SwapCollector<'_> {
    type Output = SwapInfo;

    fn name(&self) -> &'static str {
        "swap"
    }

    fn collect(&mut self) -> Result<SwapInfo, CollectionError> {
        let raw = self.host.swap()?;
        Ok(SwapInfo {
            total: ByteSize(raw.total),
            free: ByteSize(raw.free),
            used: ByteSize(raw.used),
            percent: percent_of(raw.used, raw.total),
        })
    }
}
