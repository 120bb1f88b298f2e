//! Legacy Annotation Compatibility
//!
//! Reads DNS intent from Services annotated for the controllers that
//! preceded the current annotation scheme:
//!
//! - **Mate** (Zalando): `zalando.org/dnsname` holds a single hostname.
//! - **Molecule** (Molecule Software): services opt in with the label
//!   `dns=route53` and list hostnames in the `domainName` annotation.
//!
//! Every hostname is published once per load balancer ingress entry, as an
//! A record for an ingress IP and a CNAME for an ingress hostname.

pub mod mate;
pub mod molecule;
mod types;

pub use types::{CompatibilityMode, Endpoint, RecordType};

use k8s_openapi::api::core::v1::{LoadBalancerIngress, Service};
use tracing::debug;

/// Derive endpoints from a Service using the given legacy convention.
///
/// Never fails. A Service the convention does not apply to, and any
/// unrecognized mode, yield an empty list.
pub fn legacy_endpoints_from_service(
    service: &Service,
    mode: impl Into<CompatibilityMode>,
) -> Vec<Endpoint> {
    let endpoints = match mode.into() {
        CompatibilityMode::Mate => mate::endpoints_from_service(service),
        CompatibilityMode::Molecule => molecule::endpoints_from_service(service),
        CompatibilityMode::Unrecognized => {
            debug!(
                service = %service_name(service),
                "Unrecognized compatibility mode, skipping"
            );
            None
        }
    };

    endpoints.unwrap_or_default()
}

/// Derive endpoints from every Service in order, concatenating the results.
pub fn legacy_endpoints_from_services(
    services: &[Service],
    mode: impl Into<CompatibilityMode>,
) -> Vec<Endpoint> {
    let mode = mode.into();

    services
        .iter()
        .flat_map(|service| legacy_endpoints_from_service(service, mode))
        .collect()
}

/// Append one endpoint per populated ingress field, in ingress order.
fn push_ingress_endpoints(
    endpoints: &mut Vec<Endpoint>,
    dns_name: &str,
    ingress: &[LoadBalancerIngress],
) {
    for lb in ingress {
        // An entry with both fields set yields A then CNAME
        if let Some(ip) = lb.ip.as_deref().filter(|ip| !ip.is_empty()) {
            endpoints.push(Endpoint::new(dns_name, RecordType::A, ip));
        }
        if let Some(hostname) = lb.hostname.as_deref().filter(|h| !h.is_empty()) {
            endpoints.push(Endpoint::new(dns_name, RecordType::CNAME, hostname));
        }
    }
}

fn annotation<'a>(service: &'a Service, key: &str) -> Option<&'a str> {
    service
        .metadata
        .annotations
        .as_ref()
        .and_then(|a| a.get(key))
        .map(String::as_str)
}

fn label<'a>(service: &'a Service, key: &str) -> Option<&'a str> {
    service
        .metadata
        .labels
        .as_ref()
        .and_then(|l| l.get(key))
        .map(String::as_str)
}

fn ingress_points(service: &Service) -> &[LoadBalancerIngress] {
    service
        .status
        .as_ref()
        .and_then(|s| s.load_balancer.as_ref())
        .and_then(|lb| lb.ingress.as_deref())
        .unwrap_or_default()
}

fn service_name(service: &Service) -> &str {
    service.metadata.name.as_deref().unwrap_or("unknown")
}


#[cfg(test)]
mod tests {
    use super::testing::{ip, lb_hostname, service};
    use super::*;

    #[test]
    fn test_dispatch_mate() {
        let svc = service(
            &[(mate::ANNOTATION_KEY, "app.example.com")],
            &[],
            vec![ip("1.2.3.4")],
        );

        let endpoints = legacy_endpoints_from_service(&svc, "mate");

        assert_eq!(
            endpoints,
            vec![Endpoint::new("app.example.com", RecordType::A, "1.2.3.4")]
        );
    }

    #[test]
    fn test_dispatch_molecule() {
        let svc = service(
            &[(molecule::ANNOTATION_KEY, "app1.example.com, app2.example.com")],
            &[(molecule::OPT_IN_LABEL_KEY, molecule::OPT_IN_LABEL_VALUE)],
            vec![ip("5.6.7.8")],
        );

        let endpoints = legacy_endpoints_from_service(&svc, CompatibilityMode::Molecule);

        assert_eq!(
            endpoints,
            vec![
                Endpoint::new("app1.example.com", RecordType::A, "5.6.7.8"),
                Endpoint::new("app2.example.com", RecordType::A, "5.6.7.8"),
            ]
        );
    }

    #[test]
    fn test_dispatch_unknown_mode_is_empty() {
        let svc = service(
            &[
                (mate::ANNOTATION_KEY, "app.example.com"),
                (molecule::ANNOTATION_KEY, "app.example.com"),
            ],
            &[(molecule::OPT_IN_LABEL_KEY, molecule::OPT_IN_LABEL_VALUE)],
            vec![ip("1.2.3.4"), lb_hostname("lb.aws.com")],
        );

        assert!(legacy_endpoints_from_service(&svc, "unknown-scheme").is_empty());
        assert!(legacy_endpoints_from_service(&svc, "").is_empty());
        assert!(legacy_endpoints_from_service(&svc, "MATE").is_empty());
    }

    #[test]
    fn test_dispatch_does_not_apply_other_convention() {
        let mate_only = service(
            &[(mate::ANNOTATION_KEY, "app.example.com")],
            &[],
            vec![ip("1.2.3.4")],
        );

        assert!(legacy_endpoints_from_service(&mate_only, "molecule").is_empty());
    }

    #[test]
    fn test_dispatch_absent_result_flattens_to_empty() {
        let svc = service(&[], &[], vec![ip("1.2.3.4")]);

        assert!(legacy_endpoints_from_service(&svc, "mate").is_empty());
        assert!(legacy_endpoints_from_service(&svc, "molecule").is_empty());
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let svc = service(
            &[(mate::ANNOTATION_KEY, "app.example.com")],
            &[],
            vec![lb_hostname("lb.aws.com"), ip("1.2.3.4")],
        );
        let before = svc.clone();

        let first = legacy_endpoints_from_service(&svc, "mate");
        let second = legacy_endpoints_from_service(&svc, "mate");

        assert_eq!(first, second);
        assert_eq!(svc, before);
    }

    #[test]
    fn test_services_are_concatenated_in_order() {
        let services = vec![
            service(
                &[(mate::ANNOTATION_KEY, "a.example.com")],
                &[],
                vec![ip("1.1.1.1")],
            ),
            service(&[], &[], vec![ip("9.9.9.9")]),
            service(
                &[(mate::ANNOTATION_KEY, "b.example.com")],
                &[],
                vec![lb_hostname("lb.aws.com")],
            ),
        ];

        let endpoints = legacy_endpoints_from_services(&services, "mate");

        assert_eq!(
            endpoints,
            vec![
                Endpoint::new("a.example.com", RecordType::A, "1.1.1.1"),
                Endpoint::new("b.example.com", RecordType::CNAME, "lb.aws.com"),
            ]
        );
    }

    #[test]
    fn test_service_without_status_has_no_ingress() {
        let mut svc = service(&[(mate::ANNOTATION_KEY, "app.example.com")], &[], vec![]);
        svc.status = None;

        assert!(ingress_points(&svc).is_empty());
        assert!(legacy_endpoints_from_service(&svc, "mate").is_empty());
    }
}
