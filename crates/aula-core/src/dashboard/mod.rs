//! Administrative reporting: role-dependent aggregate counts.

pub mod router;
pub mod service;

pub use router::{dashboard_router, DashboardApi};
pub use service::{AdminStats, DashboardService, DashboardStats, ParentStats};
