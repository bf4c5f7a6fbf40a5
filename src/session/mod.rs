//! Interactive streaming workflows: provisioning runs and dashboard tunnels.

pub mod dashboard;
pub mod provision;

pub use dashboard::{looks_like_url, DashboardSession, DASHBOARD_CATEGORY};
pub use provision::{run_provision, run_provision_with_options, PROVISION_CATEGORY};
