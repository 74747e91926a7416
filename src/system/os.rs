use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use tracing::debug;

use super::collector::{CollectionError, Collector};
use super::snapshot::OsInfo;
use super::source::HostSource;

pub struct OsCollector<'a> {
    host: &'a mut dyn HostSource,
}

impl<'a> OsCollector<'a> {
    pub fn new(host: &'a mut dyn HostSource) -> Self {
        OsCollector { host }
    }
}

impl Collector for OsCollector<'_> {
    type Output = OsInfo;

    fn name(&self) -> &'static str {
        "os"
    }

    fn collect(&mut self) -> Result<OsInfo, CollectionError> {
        let raw = self.host.os_identity()?;
        let boot_time = calendar_from_epoch(raw.boot_epoch_secs, &Local);
        debug!(boot_epoch = raw.boot_epoch_secs, "read os identity");

        Ok(OsInfo {
            system: raw.system.unwrap_or_default(),
            release: raw.release.unwrap_or_default(),
            version: raw.version.unwrap_or_default(),
            host_name: raw.host_name.unwrap_or_default(),
            machine: raw.machine,
            processor: raw.processor.unwrap_or_default(),
            boot_time,
        })
    }
}

/// Wall-clock time in `tz` for an epoch reading. 0 means the host did not
/// report one.
pub fn calendar_from_epoch<Tz: TimeZone>(epoch_secs: u64, tz: &Tz) -> Option<NaiveDateTime> {
    if epoch_secs == 0 {
        return None;
    }
    let secs = i64::try_from(epoch_secs).ok()?;
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(tz).naive_local())
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, FixedOffset, Timelike, Utc};

    use super::*;
    use crate::system::fake::FakeHost;

    #[test]
    fn epoch_converts_to_calendar_fields() {
        // 2024-03-05 07:08:09 UTC
        let t = calendar_from_epoch(1_709_622_489, &Utc).unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2024, 3, 5));
        assert_eq!((t.hour(), t.minute(), t.second()), (7, 8, 9));
    }

    #[test]
    fn epoch_respects_timezone_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let t = calendar_from_epoch(1_709_622_489, &tz).unwrap();
        assert_eq!(t.hour(), 9);
    }

    #[test]
    fn zero_epoch_is_unknown() {
        assert_eq!(calendar_from_epoch(0, &Utc), None);
    }

    #[test]
    fn missing_strings_become_empty() {
        let mut host = FakeHost::default();
        host.os.system = None;
        host.os.processor = None;
        let info = OsCollector::new(&mut host).collect().unwrap();
        assert_eq!(info.system, "");
        assert_eq!(info.processor, "");
        assert_eq!(info.machine, "x86_64");
        assert!(info.boot_time.is_some());
    }
}
