use super::collector::{CollectionError, Collector};
use super::snapshot::{ByteSize, InterfaceInfo, IpEntry, NetworkInfo};
use super::source::HostSource;

pub struct NetworkCollector<'a> {
    host: &'a mut dyn HostSource,
}

impl<'a> NetworkCollector<'a> {
    pub fn new(host: &'a mut dyn HostSource) -> Self {
        NetworkCollector { host }
    }
}

impl Collector for NetworkCollector<'_> {
    type Output = NetworkInfo;

    fn name(&self) -> &'static str {
        "network"
    }

    fn collect(&mut self) -> Result<NetworkInfo, CollectionError> {
        let raw = self.host.interfaces()?;

        let bytes_sent = raw
            .iter()
            .fold(0u64, |acc, iface| acc.saturating_add(iface.total_transmitted));
        let bytes_received = raw
            .iter()
            .fold(0u64, |acc, iface| acc.saturating_add(iface.total_received));

        let interfaces = raw
            .into_iter()
            .map(|iface| InterfaceInfo {
                name: iface.name,
                mac_address: iface.mac_address,
                addresses: iface
                    .addresses
                    .into_iter()
                    .map(|(addr, prefix)| IpEntry { addr, prefix })
                    .collect(),
            })
            .collect();

        Ok(NetworkInfo {
            interfaces,
            bytes_sent: ByteSize(bytes_sent),
            bytes_received: ByteSize(bytes_received),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::fake::FakeHost;
    use crate::system::source::RawInterface;

    #[test]
    fn totals_span_all_interfaces() {
        let mut host = FakeHost::default();
        host.interfaces.push(RawInterface {
            name: "lo".to_string(),
            mac_address: None,
            addresses: vec![("127.0.0.1".parse().unwrap(), 8)],
            total_received: 1024,
            total_transmitted: 1024,
        });
        let info = NetworkCollector::new(&mut host).collect().unwrap();
        assert_eq!(info.interfaces.len(), 2);
        assert_eq!(info.bytes_sent, ByteSize(1_048_576 + 1024));
        assert_eq!(info.bytes_received, ByteSize(3_145_728 + 1024));
        assert_eq!(info.interfaces[1].addresses[0].prefix, 8);
    }
}
