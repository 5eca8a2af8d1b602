//! Account routes - Account list, creation, and closed-flag control
//!
//! Features:
//! - Ranked account list: open accounts with recent activity first
//! - Account creation with name validation
//! - Close/reopen toggle backed by the persistent flag registry
//!
//! Structure:
//! - api.rs: JSON API endpoints
//! - page.rs: HTMX panel rendering

pub mod api;
pub mod page;

pub use api::{api_account_create, api_account_set_closed, api_accounts, CreateAccountPayload};
pub use page::{
    htmx_account_create_form, htmx_account_store, htmx_account_toggle, htmx_accounts_panel,
    render_accounts_panel,
};
