//! Payment ledger: one payment per enrollment, method-dependent
//! settlement, and the administrative confirmation path for offline
//! methods.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{CreatePaymentRequest, Payment, PaymentStatus};
pub use repository::PaymentRepository;
pub use router::{payment_router, PaymentsApi};
pub use service::PaymentService;
