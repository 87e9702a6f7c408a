//! Data models
//!
//! This module contains the data structures used throughout the service:
//! - Activities and the catalog listing
//! - Teacher credentials and role
//! - Teacher sessions

mod activity;
mod session;
mod teacher;

pub use activity::{Activity, ActivityListing};
pub use session::TeacherSession;
pub use teacher::{TeacherCredential, TeacherRole, TeachersFile};
