// src/core/target/range.rs
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use ipnetwork::Ipv4Network;

use super::classify::IpExpression;
use crate::error::{AutomaterError, AutomaterResult};

/// Inclusive range of IPv4 addresses, ordered by their 32-bit value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Every address of a CIDR block, network through broadcast
    pub fn from_cidr(addr: Ipv4Addr, prefix: u8) -> AutomaterResult<Self> {
        let network = Ipv4Network::new(addr, prefix)
            .map_err(|e| AutomaterError::invalid_range(&format!("{}/{}", addr, prefix), e.to_string()))?;

        Ok(Self::new(network.network(), network.broadcast()))
    }

    /// Number of addresses in the range
    pub fn len(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if end < start {
            0
        } else {
            u64::from(end - start) + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lazily walk the range in ascending order
    pub fn iter(&self) -> Ipv4RangeIter {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        Ipv4RangeIter { inner: start..=end }
    }
}

impl IntoIterator for Ipv4Range {
    type Item = Ipv4Addr;
    type IntoIter = Ipv4RangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Streaming iterator over an [`Ipv4Range`]; holds two integers regardless
/// of the size of the block.
#[derive(Debug, Clone)]
pub struct Ipv4RangeIter {
    inner: RangeInclusive<u32>,
}

impl Iterator for Ipv4RangeIter {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Ipv4Addr::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Ipv4RangeIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Ipv4Addr::from)
    }
}

/// Resolve a parsed IP expression into the range it denotes.
pub fn resolve(expression: IpExpression, original: &str) -> AutomaterResult<Ipv4Range> {
    match expression {
        IpExpression::Single(addr) => Ok(Ipv4Range::new(addr, addr)),
        IpExpression::Cidr(addr, prefix) => Ipv4Range::from_cidr(addr, prefix),
        IpExpression::Range(start, end) => {
            if u32::from(end) < u32::from(start) {
                return Err(AutomaterError::invalid_range(
                    original,
                    format!("end address {} is lower than start address {}", end, start),
                ));
            }
            Ok(Ipv4Range::new(start, end))
        }
        IpExpression::LastOctet(start, last) => {
            let last = u8::try_from(last).map_err(|_| {
                AutomaterError::invalid_range(original, format!("last octet {} is outside 0-255", last))
            })?;

            let [a, b, c, first] = start.octets();
            if last < first {
                return Err(AutomaterError::invalid_range(
                    original,
                    format!("last octet {} is lower than start octet {}", last, first),
                ));
            }
            Ok(Ipv4Range::new(start, Ipv4Addr::new(a, b, c, last)))
        }
    }
}

/// Expand a refanged IP expression into its individual addresses.
///
/// The returned iterator is lazy. Strings that are not IP syntax are
/// rejected with `InvalidInput`; callers are expected to check
/// [`is_ip_or_ip_list`](super::classify::is_ip_or_ip_list) first.
pub fn expand(target: &str) -> AutomaterResult<impl Iterator<Item = String>> {
    let expression = IpExpression::parse(target)
        .ok_or_else(|| AutomaterError::InvalidInput(format!("not an IP expression: {}", target)))?;

    let range = resolve(expression, target)?;
    Ok(range.into_iter().map(|addr| addr.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_all(target: &str) -> Vec<String> {
        expand(target).unwrap().collect()
    }

    #[test]
    fn test_expand_single() {
        assert_eq!(expand_all("10.0.0.1"), vec!["10.0.0.1"]);
    }

    #[test]
    fn test_expand_cidr() {
        assert_eq!(
            expand_all("10.0.0.0/30"),
            vec!["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3"]
        );
        // host bits are masked off
        assert_eq!(
            expand_all("10.0.0.5/30"),
            vec!["10.0.0.4", "10.0.0.5", "10.0.0.6", "10.0.0.7"]
        );
        assert_eq!(expand_all("10.0.0.9/32"), vec!["10.0.0.9"]);
    }

    #[test]
    fn test_expand_full_range() {
        assert_eq!(expand_all("10.0.0.1-10.0.0.1"), vec!["10.0.0.1"]);
        assert_eq!(
            expand_all("10.0.0.254-10.0.1.1"),
            vec!["10.0.0.254", "10.0.0.255", "10.0.1.0", "10.0.1.1"]
        );
    }

    #[test]
    fn test_expand_reversed_range_fails() {
        let err = expand("10.0.0.5-10.0.0.3").err().unwrap();
        assert!(matches!(err, AutomaterError::InvalidRange { .. }));
    }

    #[test]
    fn test_expand_last_octet_range() {
        assert_eq!(
            expand_all("192.168.1.253-255"),
            vec!["192.168.1.253", "192.168.1.254", "192.168.1.255"]
        );
        assert_eq!(expand_all("192.168.1.7-7"), vec!["192.168.1.7"]);

        assert!(matches!(
            expand("192.168.1.10-256").err().unwrap(),
            AutomaterError::InvalidRange { .. }
        ));
        assert!(matches!(
            expand("192.168.1.10-1000").err().unwrap(),
            AutomaterError::InvalidRange { .. }
        ));
        assert!(matches!(
            expand("192.168.1.10-9").err().unwrap(),
            AutomaterError::InvalidRange { .. }
        ));
    }

    #[test]
    fn test_expand_rejects_non_ip() {
        assert!(matches!(
            expand("example.com").err().unwrap(),
            AutomaterError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_full_address_space_without_overflow() {
        let range = Ipv4Range::from_cidr(Ipv4Addr::new(0, 0, 0, 0), 0).unwrap();
        assert_eq!(range.len(), 1u64 << 32);

        let mut iter = range.iter();
        assert_eq!(iter.next(), Some(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(iter.next_back(), Some(Ipv4Addr::new(255, 255, 255, 255)));

        let top = Ipv4Range::new(Ipv4Addr::new(255, 255, 255, 254), Ipv4Addr::new(255, 255, 255, 255));
        assert_eq!(top.iter().count(), 2);
    }

    #[test]
    fn test_large_block_is_lazy() {
        let first: Vec<String> = expand("10.0.0.0/8").unwrap().take(3).collect();
        assert_eq!(first, vec!["10.0.0.0", "10.0.0.1", "10.0.0.2"]);
    }
}
