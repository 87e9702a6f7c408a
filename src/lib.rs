//! Mergington - extracurricular activity management API
//!
//! This library provides the stores and HTTP surface of the service:
//! activity listing, teacher authentication and student signup.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
