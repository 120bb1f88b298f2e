//! Legacy DNS Compatibility
//!
//! Derives DNS endpoints from Kubernetes Services that still carry the
//! annotations of the Mate and Molecule DNS controllers.

pub mod compat;
pub mod manifest;

pub use compat::{
    legacy_endpoints_from_service, legacy_endpoints_from_services, CompatibilityMode, Endpoint,
    RecordType,
};
pub use manifest::ManifestError;
