// src/core/target/classify.rs
use std::fmt;
use std::net::Ipv4Addr;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Deserialize};

/// Hex digests of MD5, SHA-1, SHA-256 and SHA-512
static HASH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9a-fA-F]{32}|[0-9a-fA-F]{40}|[0-9a-fA-F]{64}|[0-9a-fA-F]{128})$")
        .expect("hash pattern is valid")
});

/// Syntactic shape of an IPv4 target expression.
///
/// Only the syntax is checked here. Whether a range is ordered or a
/// last-octet bound fits in a byte is decided by the expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpExpression {
    /// `a.b.c.d`
    Single(Ipv4Addr),
    /// `a.b.c.d/n`
    Cidr(Ipv4Addr, u8),
    /// `a.b.c.d-e.f.g.h`
    Range(Ipv4Addr, Ipv4Addr),
    /// `a.b.c.d-e`, varying only the last octet. `e` saturates at
    /// `u32::MAX` so an oversized bound still reaches the expander.
    LastOctet(Ipv4Addr, u32),
}

impl IpExpression {
    /// Parse an already refanged string. Never panics; `None` means the
    /// string is not IP syntax and should be treated as an opaque target.
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(addr) = s.parse::<Ipv4Addr>() {
            return Some(IpExpression::Single(addr));
        }

        if let Some((ip_str, prefix_str)) = s.split_once('/') {
            let addr = ip_str.parse::<Ipv4Addr>().ok()?;
            if !is_digits(prefix_str, 2) {
                return None;
            }
            let prefix = prefix_str.parse::<u8>().ok()?;
            if prefix > 32 {
                return None;
            }
            return Some(IpExpression::Cidr(addr, prefix));
        }

        if let Some((start_str, end_str)) = s.split_once('-') {
            let start = start_str.parse::<Ipv4Addr>().ok()?;

            if let Ok(end) = end_str.parse::<Ipv4Addr>() {
                return Some(IpExpression::Range(start, end));
            }

            if is_digits(end_str, usize::MAX) {
                let last = end_str.parse::<u32>().unwrap_or(u32::MAX);
                return Some(IpExpression::LastOctet(start, last));
            }
        }

        None
    }
}

fn is_digits(s: &str, max_len: usize) -> bool {
    !s.is_empty() && s.len() <= max_len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Whether a refanged target denotes an IP, a CIDR block or a dash range.
pub fn is_ip_or_ip_list(s: &str) -> bool {
    IpExpression::parse(s).is_some()
}

/// Kind of indicator, used to match targets against a source's entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Ip,
    #[serde(alias = "md5")]
    Hash,
    #[serde(alias = "url", alias = "domain")]
    Hostname,
}

impl TargetKind {
    /// Detect the kind of an atomic target
    pub fn detect(target: &str) -> Self {
        if target.parse::<Ipv4Addr>().is_ok() {
            TargetKind::Ip
        } else if HASH_PATTERN.is_match(target) {
            TargetKind::Hash
        } else {
            TargetKind::Hostname
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Ip => "ip",
            TargetKind::Hash => "hash",
            TargetKind::Hostname => "hostname",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_forms_classify_true() {
        assert!(is_ip_or_ip_list("10.0.0.1"));
        assert!(is_ip_or_ip_list("10.0.0.0/30"));
        assert!(is_ip_or_ip_list("10.0.0.0/0"));
        assert!(is_ip_or_ip_list("10.0.0.1-10.0.0.20"));
        assert!(is_ip_or_ip_list("192.168.1.1-50"));
        // out-of-order and oversized bounds are the expander's problem
        assert!(is_ip_or_ip_list("10.0.0.5-10.0.0.3"));
        assert!(is_ip_or_ip_list("10.0.0.1-300"));
        assert!(is_ip_or_ip_list("10.0.0.1-1000"));
        assert!(is_ip_or_ip_list("10.0.0.1-99999999999"));
    }

    #[test]
    fn test_non_ip_forms_classify_false() {
        assert!(!is_ip_or_ip_list("http://example.com"));
        assert!(!is_ip_or_ip_list("https://10.0.0.1/index.html"));
        assert!(!is_ip_or_ip_list("d41d8cd98f00b204e9800998ecf8427e"));
        assert!(!is_ip_or_ip_list("da39a3ee5e6b4b0d3255bfef95601890afd80709"));
        assert!(!is_ip_or_ip_list("not-an-ip.example.com"));
        assert!(!is_ip_or_ip_list(""));
    }

    #[test]
    fn test_malformed_ip_syntax_classifies_false() {
        assert!(!is_ip_or_ip_list("1.2.3"));
        assert!(!is_ip_or_ip_list("1.2.3.4.5"));
        assert!(!is_ip_or_ip_list("256.1.1.1"));
        assert!(!is_ip_or_ip_list("10.0.0.0/33"));
        assert!(!is_ip_or_ip_list("10.0.0.0/"));
        assert!(!is_ip_or_ip_list("10.0.0.0/2a"));
        assert!(!is_ip_or_ip_list("10.0.0.1-"));
        assert!(!is_ip_or_ip_list("10.0.0.1-1.2"));
        assert!(!is_ip_or_ip_list("-10.0.0.1"));
        assert!(!is_ip_or_ip_list("1.1.1.1-2.2.2.2-3.3.3.3"));
    }

    #[test]
    fn test_parse_shapes() {
        assert_eq!(
            IpExpression::parse("192.168.1.10-20"),
            Some(IpExpression::LastOctet(Ipv4Addr::new(192, 168, 1, 10), 20))
        );
        assert_eq!(
            IpExpression::parse("10.1.2.3/8"),
            Some(IpExpression::Cidr(Ipv4Addr::new(10, 1, 2, 3), 8))
        );
        assert_eq!(
            IpExpression::parse("10.0.0.1-99999999999"),
            Some(IpExpression::LastOctet(Ipv4Addr::new(10, 0, 0, 1), u32::MAX))
        );
    }

    #[test]
    fn test_target_kind_detection() {
        assert_eq!(TargetKind::detect("8.8.8.8"), TargetKind::Ip);
        assert_eq!(TargetKind::detect("d41d8cd98f00b204e9800998ecf8427e"), TargetKind::Hash);
        assert_eq!(
            TargetKind::detect("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
            TargetKind::Hash
        );
        assert_eq!(TargetKind::detect("example.com"), TargetKind::Hostname);
        assert_eq!(TargetKind::detect("http://example.com/a"), TargetKind::Hostname);
        // 31 hex chars is not a digest
        assert_eq!(TargetKind::detect("d41d8cd98f00b204e9800998ecf8427"), TargetKind::Hostname);
    }

    #[test]
    fn test_target_kind_serde_aliases() {
        let kind: TargetKind = serde_json::from_str("\"md5\"").unwrap();
        assert_eq!(kind, TargetKind::Hash);
        let kind: TargetKind = serde_json::from_str("\"ip\"").unwrap();
        assert_eq!(kind, TargetKind::Ip);
    }
}
