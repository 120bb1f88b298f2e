//! Mate compatibility
//!
//! Mate published a Service under the single hostname found in its
//! `zalando.org/dnsname` annotation.

use k8s_openapi::api::core::v1::Service;
use tracing::debug;

use super::{annotation, ingress_points, push_ingress_endpoints, service_name, Endpoint};

/// Annotation holding the desired hostname
pub const ANNOTATION_KEY: &str = "zalando.org/dnsname";

/// Endpoints for a Mate-annotated Service.
///
/// Returns `None` when the annotation is missing. A Service whose load
/// balancer has no ingress yet returns an empty list.
pub fn endpoints_from_service(service: &Service) -> Option<Vec<Endpoint>> {
    // Get the desired hostname from the annotation
    let Some(hostname) = annotation(service, ANNOTATION_KEY) else {
        debug!(service = %service_name(service), "No Mate annotation found");
        return None;
    };

    // One endpoint per external entrypoint
    let mut endpoints = Vec::new();
    push_ingress_endpoints(&mut endpoints, hostname, ingress_points(service));

    Some(endpoints)
}
