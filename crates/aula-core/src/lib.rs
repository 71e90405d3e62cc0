//! Multi-tenant school activities platform.
//!
//! Each feature module follows the same layout: `domain` holds the record
//! types and request payloads, `repository` the storage traits, `service`
//! the business rules, and `router` the HTTP surface. Storage backends are
//! injected at construction so the services can be exercised in isolation.

pub mod accounts;
pub mod activities;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod enrollments;
pub mod error;
pub mod notifications;
pub mod payments;
pub mod students;
pub mod telemetry;
pub mod tenants;
