pub mod models;
mod schema;
mod store;
mod trait_def;

pub use models::*;
pub use store::SqliteLabelStore;
pub use trait_def::{LabelStore, Page, PageRequest};
