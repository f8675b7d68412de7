//! Bracket REST API resource paths.
//!
//! Individual resources live under `<root>/<id>`, with sub-collections such
//! as `<root>/<id>/rules` below that.

/// Operating systems.
pub const OPERATING_SYSTEM: &str = "/v1/api/config/operatingsystem";
/// Image definitions.
pub const IMAGE_DEFINITION: &str = "/v1/api/config/imagedefinition";
/// Cloud provider images.
pub const CSP_IMAGE: &str = "/v1/api/config/cspimage";
/// Machine types.
pub const MACHINE_TYPE: &str = "/v1/api/config/machinetype";
/// Billing groups.
pub const BILLING_GROUP: &str = "/v1/api/config/billinggroup";
/// Networks.
pub const NETWORK: &str = "/v1/api/config/network";
/// Zones.
pub const ZONE: &str = "/v1/api/config/zone";
/// Security groups.
pub const SECURITY_GROUP: &str = "/v1/api/config/securitygroup";
/// Security group rules.
pub const SECURITY_GROUP_RULE: &str = "/v1/api/config/securitygrouprule";
/// Computing cells.
pub const COMPUTING_CELL: &str = "/v1/api/config/computingcell";
/// Volumes.
pub const VOLUME: &str = "/v1/api/config/brktvolume";
/// Cloud-init configurations.
pub const CLOUD_INIT: &str = "/v1/api/config/cloudinit";
/// Instances.
pub const INSTANCE: &str = "/v2/api/config/instance";
/// Instances, v1 API (still used for the volume listing).
pub const V1_INSTANCE: &str = "/v1/api/config/instance";
/// Workloads.
pub const WORKLOAD: &str = "/v2/api/config/workload";
/// Load balancers.
pub const LOAD_BALANCER: &str = "/v1/api/config/loadbalancer";
/// Load balancer listeners.
pub const LOAD_BALANCER_LISTENER: &str = "/v1/api/config/loadbalancer/listener";

/// Path of a single resource below `root`.
///
/// ```rust
/// use brkt_api_client::rest::endpoints::{self, resource};
///
/// assert_eq!(resource(endpoints::VOLUME, "abc"), "/v1/api/config/brktvolume/abc");
/// ```
pub fn resource(root: &str, id: &str) -> String {
    format!("{root}/{id}")
}

/// Path of a sub-collection or action of a single resource.
///
/// ```rust
/// use brkt_api_client::rest::endpoints::{self, subresource};
///
/// assert_eq!(
///     subresource(endpoints::SECURITY_GROUP, "sg1", "rules"),
///     "/v1/api/config/securitygroup/sg1/rules"
/// );
/// ```
pub fn subresource(root: &str, id: &str, name: &str) -> String {
    format!("{root}/{id}/{name}")
}
