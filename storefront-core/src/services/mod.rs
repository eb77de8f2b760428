//! Service layer - storefront logic
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on one feature area.

pub mod auth;
pub mod cache;
mod catalog;
pub mod list;
pub mod session;
pub mod token;

pub use auth::{AuthService, MockAuthenticator};
pub use cache::{CacheKey, ResponseCache};
pub use catalog::CatalogService;
pub use list::{ListKind, ListStore};
pub use session::SessionStore;
pub use token::TokenPayload;
