pub mod auth;
pub mod models;

pub use auth::{Claims, LabelHasher, TokenAuthority};
pub use models::{User, UserAccount, UserRole};
