//! Activity catalog: events and recurring activities a school offers,
//! with capacity, pricing, and visibility metadata.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Activity, ActivityFilter, ActivityStatus, CreateActivityRequest, UpdateActivityRequest,
    Visibility,
};
pub use repository::ActivityRepository;
pub use router::{activity_router, ActivitiesApi};
pub use service::ActivityService;
