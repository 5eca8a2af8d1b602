//! HTTP API server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::accounts: Account list, creation, closed-flag toggle
//! - routes::transactions: Transaction table, create/edit/delete forms
//! - routes::session: Sign-in gate for the dashboard

pub mod error;
pub mod routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use ledgerpro_config::Config;
use ledgerpro_core::Ledger;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<RwLock<Ledger>>,
    pub config: Config,
    pub session: Arc<RwLock<bool>>,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    // Import route handlers
    use routes::accounts::{
        api_account_create, api_account_set_closed, api_accounts, htmx_account_create_form,
        htmx_account_store, htmx_account_toggle, htmx_accounts_panel,
    };
    use routes::session::{
        api_login, api_logout, api_session, page_login, submit_login, submit_logout,
    };
    use routes::transactions::{
        api_select_account, api_transaction_create, api_transaction_delete,
        api_transaction_update, api_transactions, htmx_select_account,
        htmx_transaction_create_form, htmx_transaction_delete, htmx_transaction_edit_form,
        htmx_transaction_store, htmx_transaction_update, htmx_transactions_panel,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/session", get(api_session))
        .route("/api/login", post(api_login))
        .route("/api/logout", post(api_logout))
        .route("/api/accounts", get(api_accounts))
        .route("/api/accounts", post(api_account_create))
        .route("/api/accounts/:id/closed", post(api_account_set_closed))
        .route("/api/transactions/:id", get(api_transactions))
        .route("/api/transactions", post(api_transaction_create))
        .route("/api/transactions/:id", put(api_transaction_update))
        .route("/api/transactions/:id", delete(api_transaction_delete))
        .route("/api/select", post(api_select_account))
        // HTMX page routes
        .route("/", get(index_page))
        .route("/dashboard", get(page_dashboard))
        .route("/login", get(page_login))
        .route("/login", post(submit_login))
        .route("/logout", post(submit_logout))
        // HTMX partial routes (dashboard panels)
        .route("/dashboard/accounts", get(htmx_accounts_panel))
        .route("/dashboard/accounts", post(htmx_account_store))
        .route("/dashboard/accounts/new", get(htmx_account_create_form))
        .route("/dashboard/accounts/:id/closed", post(htmx_account_toggle))
        .route("/dashboard/select", post(htmx_select_account))
        .route("/dashboard/transactions", get(htmx_transactions_panel))
        .route("/dashboard/transactions", post(htmx_transaction_store))
        .route("/dashboard/transactions/new", get(htmx_transaction_create_form))
        .route("/dashboard/transactions/:id/edit", get(htmx_transaction_edit_form))
        .route("/dashboard/transactions/:id", put(htmx_transaction_update))
        .route("/dashboard/transactions/:id", delete(htmx_transaction_delete))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - LedgerPro</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Top bar with brand and sign-out control
pub fn topbar() -> String {
    String::from(
        r#"<div class='flex items-center justify-between mb-6'>
        <div class='flex items-center gap-3'>
            <div class='w-10 h-10 rounded-lg bg-indigo-600 text-white flex items-center justify-center font-bold'>LP</div>
            <div>
                <div class='text-xl font-bold'>LedgerPro</div>
                <div class='text-sm text-gray-500'>Simple ledger &bull; Clean balances</div>
            </div>
        </div>
        <form action='/logout' method='post'>
            <button type='submit' class='px-3 py-1.5 text-sm border rounded-lg hover:bg-gray-100'>Sign out</button>
        </form>
    </div>"#,
    )
}

/// Success fragment for HTMX form results
pub(crate) fn success_html(message: &str) -> String {
    format!(
        r#"<div class='bg-green-50 border border-green-200 rounded-lg p-4'><div class='flex items-center gap-2'><span class='text-green-600'>&#10003;</span><span class='font-medium text-green-800'>{}</span></div></div>"#,
        message
    )
}

/// Error fragment for HTMX form results
pub(crate) fn error_html(title: &str, message: &str) -> String {
    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-lg p-4'><div class='flex items-center gap-2'><span class='text-red-600'>&#10007;</span><span class='font-medium text-red-800'>{}</span></div><p class='text-sm text-red-600 mt-1'>{}</p></div>"#,
        title,
        ledgerpro_utils::sanitize_html(message)
    )
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(
            title,
            &format!(r#"<div class='max-w-5xl mx-auto px-4 py-6'>{}</div>"#, inner_content),
        )
    }
}

/// Index page - The dashboard shell; panels load themselves over HTMX
async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Response {
    use axum::response::IntoResponse;

    if !*state.session.read().await {
        return axum::response::Redirect::to("/login").into_response();
    }

    let inner_content = format!(
        r#"{}
        <div id='accounts-panel' hx-get='/dashboard/accounts' hx-trigger='load, accounts-changed from:body'>
            <div class='text-gray-500'>Loading...</div>
        </div>
        <div id='transactions-panel' hx-get='/dashboard/transactions' hx-trigger='load, transactions-changed from:body'>
            <div class='text-gray-500'>Loading transactions&hellip;</div>
        </div>"#,
        topbar()
    );

    axum::response::Html(page_response(&headers, "Dashboard", &inner_content)).into_response()
}

/// Dashboard page (alias for index)
async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Response {
    index_page(state, headers).await
}

/// Start the HTTP server
///
/// This is the main entry point for the LedgerPro server.
/// It creates the router, binds to the address, and starts listening for requests.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `ledger` - The shared ledger state
pub async fn start_server(config: Config, ledger: Arc<RwLock<Ledger>>) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        ledger,
        config,
        session: Arc::new(RwLock::new(false)),
    };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap();
    eprintln!("[INFO] Starting LedgerPro server on http://{}", addr);
    eprintln!("[INFO] Available routes:");
    eprintln!("[INFO]   - / (Dashboard)");
    eprintln!("[INFO]   - /login (Sign in)");
    eprintln!("[INFO]   - /api/* (JSON API endpoints)");

    match axum::serve(listener, router).await {
        Ok(_) => eprintln!("[INFO] Server stopped gracefully"),
        Err(e) => eprintln!("[ERROR] Server error: {}", e),
    }
}
