//! Enrollment ledger: one-enrollment-per-(student, activity), capacity
//! limits, and the price-derived initial status.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{EnrollRequest, Enrollment, EnrollmentStatus};
pub use repository::EnrollmentRepository;
pub use router::{enrollment_router, EnrollmentsApi};
pub use service::EnrollmentService;
