//! Roster: student records owned by parents and scoped to a school.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{CreateStudentRequest, StudentRecord};
pub use repository::StudentRepository;
pub use router::{student_router, StudentsApi};
pub use service::StudentService;
