//! Core domain entities
//!
//! Plain data structures shared by every service. No I/O happens here.

mod product;
mod user;
pub mod result;

pub use product::{Product, Rating};
pub use user::User;
