//! Session routes - Sign-in gate for the dashboard
//!
//! The session is a process-wide logged-in flag, checked by the index
//! page and flipped by the login and logout endpoints.
//!
//! Structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints
//! - page.rs: Sign-in page rendering

pub mod api;
pub mod page;

pub use api::{api_login, api_logout, api_session};
pub use page::{page_login, submit_login, submit_logout};
