//! Molecule compatibility
//!
//! Molecule only managed Services labelled `dns=route53`. The `domainName`
//! annotation lists one or more hostnames separated by commas.

use k8s_openapi::api::core::v1::Service;
use tracing::debug;

use super::{annotation, ingress_points, label, push_ingress_endpoints, service_name, Endpoint};

/// Annotation holding the comma-separated hostnames
pub const ANNOTATION_KEY: &str = "domainName";

/// Label a Service must carry to be considered at all
pub const OPT_IN_LABEL_KEY: &str = "dns";

/// Required value of [`OPT_IN_LABEL_KEY`]
pub const OPT_IN_LABEL_VALUE: &str = "route53";

/// Endpoints for a Molecule-annotated Service.
///
/// Returns `None` unless the Service opted in and carries the annotation.
/// Endpoints are ordered by hostname first, then by ingress entry.
pub fn endpoints_from_service(service: &Service) -> Option<Vec<Endpoint>> {
    // Check that the Service opted in
    if label(service, OPT_IN_LABEL_KEY) != Some(OPT_IN_LABEL_VALUE) {
        debug!(service = %service_name(service), "Service did not opt in to Molecule DNS");
        return None;
    }

    let Some(raw) = annotation(service, ANNOTATION_KEY) else {
        debug!(service = %service_name(service), "No Molecule annotation found");
        return None;
    };

    let ingress = ingress_points(service);
    let mut endpoints = Vec::new();

    // Hostnames outer, ingress entries inner
    for hostname in parse_hostnames(raw) {
        push_ingress_endpoints(&mut endpoints, &hostname, ingress);
    }

    Some(endpoints)
}

/// Split a `domainName` value into hostnames.
///
/// Spaces are removed before splitting on commas. Empty segments are kept,
/// so `"a.com,"` yields `["a.com", ""]`.
pub fn parse_hostnames(raw: &str) -> Vec<String> {
    raw.replace(' ', "").split(',').map(str::to_string).collect()
}
