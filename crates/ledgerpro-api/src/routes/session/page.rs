//! Sign-in page rendering
//!
//! Endpoints:
//! - page_login: Sign-in form
//! - submit_login: Start the session, go to the dashboard
//! - submit_logout: Clear the session, back to the sign-in page

use crate::{base_html, AppState};
use axum::response::{Html, IntoResponse, Redirect};

/// Sign-in page
pub async fn page_login(state: axum::extract::State<AppState>) -> axum::response::Response {
    if *state.session.read().await {
        return Redirect::to("/").into_response();
    }

    let content = r#"<div class='min-h-screen flex items-center justify-center'>
        <div class='bg-white rounded-xl shadow-sm p-8 w-full max-w-sm'>
            <div class='flex items-center gap-3 mb-6'>
                <div class='w-10 h-10 rounded-lg bg-indigo-600 text-white flex items-center justify-center font-bold'>LP</div>
                <div>
                    <div class='text-xl font-bold'>LedgerPro</div>
                    <div class='text-sm text-gray-500'>Simple ledger &bull; Clean balances</div>
                </div>
            </div>
            <form action='/login' method='post' class='space-y-4'>
                <label class='block'>
                    <div class='text-sm font-medium text-gray-700 mb-1'>Username</div>
                    <input type='text' name='username' class='w-full px-3 py-2.5 border rounded-lg' placeholder='Username'>
                </label>
                <label class='block'>
                    <div class='text-sm font-medium text-gray-700 mb-1'>Password</div>
                    <input type='password' name='password' class='w-full px-3 py-2.5 border rounded-lg' placeholder='Password'>
                </label>
                <button type='submit' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Sign in</button>
            </form>
        </div>
    </div>"#;

    Html(base_html("Sign in", content)).into_response()
}

/// Accept the sign-in form and start the session
///
/// The form is a demo gate: any submission starts the session.
pub async fn submit_login(state: axum::extract::State<AppState>) -> Redirect {
    *state.session.write().await = true;
    Redirect::to("/")
}

/// End the session
pub async fn submit_logout(state: axum::extract::State<AppState>) -> Redirect {
    *state.session.write().await = false;
    Redirect::to("/login")
}
