//! Route modules for the API server
//!
//! All routes are organized into modules for better maintainability:
//! - accounts: Account list, creation, closed-flag toggle
//! - transactions: Transaction table, selection, create/edit/delete
//! - session: Sign-in gate
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints
//! - page.rs: HTMX page rendering

pub mod accounts;
pub mod session;
pub mod transactions;
