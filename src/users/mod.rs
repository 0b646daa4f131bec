//! Users module: identity lookup, listing, and demo seeding.

pub mod models;
pub mod store;

pub use models::{User, UserBalance};
pub use store::UserStore;
