//! Services layer - Business logic
//!
//! Services own the in-memory state and enforce its rules:
//! - Credential store (read-only teacher logins)
//! - Session registry (bearer tokens)
//! - Activity catalog (rosters)

pub mod activity;
pub mod credentials;
pub mod session;

pub use activity::{default_activities, ActivityCatalog, CatalogError};
pub use credentials::{CredentialError, CredentialStore};
pub use session::{AuthError, LoginInput, SessionRegistry};
