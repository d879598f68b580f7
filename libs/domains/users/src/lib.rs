//! Users Domain
//!
//! Create, read, update, delete and list user profiles: a name plus a date
//! of birth, with the age derived on every read.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints under /users
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, pagination, age, not-found mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Raw rows (trait + in-memory and PostgreSQL)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserRepository, SystemClock, UserService};
//!
//! let service = UserService::new(InMemoryUserRepository::new(), SystemClock);
//! let router = handlers::router(service);
//! ```

pub mod clock;
pub mod dates;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{ListParams, UserRequest, UserResponse, UserRow, UserWithAge};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
