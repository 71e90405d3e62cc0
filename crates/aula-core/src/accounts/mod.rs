//! Identity store: registration, login, and the sanitized account surface.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Account, AccountView, LoginRequest, LoginResponse, RegisterRequest};
pub use repository::AccountRepository;
pub use router::{account_router, AccountsApi};
pub use service::AccountService;
