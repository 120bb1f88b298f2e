//! Legacy Compatibility Types
//!
//! Endpoint declarations and the compatibility modes that produce them.

use serde::Serialize;

/// DNS record type of a legacy endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    #[allow(clippy::upper_case_acronyms)]
    CNAME,
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordType::A => write!(f, "A"),
            RecordType::CNAME => write!(f, "CNAME"),
        }
    }
}

/// A desired DNS record, not yet reconciled against any provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Name the record is published under
    pub dns_name: String,
    /// A for ingress IPs, CNAME for ingress hostnames
    pub record_type: RecordType,
    /// IP address or upstream load balancer hostname
    pub target: String,
}

impl Endpoint {
    pub fn new(dns_name: &str, record_type: RecordType, target: &str) -> Self {
        Self {
            dns_name: dns_name.to_string(),
            record_type,
            target: target.to_string(),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.dns_name, self.record_type, self.target)
    }
}

/// Legacy annotation convention to read from a Service.
///
/// Built from the raw flag value; anything other than `mate` or `molecule`
/// maps to [`CompatibilityMode::Unrecognized`] and produces no endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompatibilityMode {
    /// Zalando Mate: `zalando.org/dnsname` annotation
    Mate,
    /// Molecule Software: `dns=route53` label plus `domainName` annotation
    Molecule,
    #[default]
    Unrecognized,
}

impl CompatibilityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityMode::Mate => "mate",
            CompatibilityMode::Molecule => "molecule",
            CompatibilityMode::Unrecognized => "unrecognized",
        }
    }
}

impl From<&str> for CompatibilityMode {
    fn from(value: &str) -> Self {
        match value {
            "mate" => CompatibilityMode::Mate,
            "molecule" => CompatibilityMode::Molecule,
            _ => CompatibilityMode::Unrecognized,
        }
    }
}

impl From<&String> for CompatibilityMode {
    fn from(value: &String) -> Self {
        CompatibilityMode::from(value.as_str())
    }
}

impl std::fmt::Display for CompatibilityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
