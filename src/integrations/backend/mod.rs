pub mod client;
pub mod identity;
pub mod query;

pub use client::{BackendClient, SignUpOutcome};
pub use identity::IdentityProvider;
pub use query::RowQuery;
