//! Session API endpoints - JSON responses
//!
//! Endpoints:
//! - api_session: Current logged-in state
//! - api_login: Mark the session signed in
//! - api_logout: Clear the session

use crate::AppState;

/// Current session state (JSON API)
pub async fn api_session(state: axum::extract::State<AppState>) -> String {
    let logged_in = *state.session.read().await;
    format!(r#"{{"loggedIn": {}}}"#, logged_in)
}

/// Sign the session in (JSON API)
pub async fn api_login(state: axum::extract::State<AppState>) -> String {
    *state.session.write().await = true;
    log::info!("session signed in");
    r#"{"loggedIn": true}"#.to_string()
}

/// Sign the session out (JSON API)
pub async fn api_logout(state: axum::extract::State<AppState>) -> String {
    *state.session.write().await = false;
    log::info!("session signed out");
    r#"{"loggedIn": false}"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerpro_config::Config;
    use ledgerpro_core::Ledger;
    use ledgerpro_store::{MemoryFlagStore, MemoryStore};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn test_state() -> AppState {
        let ledger = Ledger::new(
            Arc::new(MemoryStore::default()),
            Arc::new(MemoryFlagStore::default()),
        );
        AppState {
            ledger: Arc::new(RwLock::new(ledger)),
            config: Config::default(),
            session: Arc::new(RwLock::new(false)),
        }
    }

    #[tokio::test]
    async fn test_login_then_logout_flips_the_flag() {
        let state = test_state();

        let body = api_login(axum::extract::State(state.clone())).await;
        assert_eq!(body, r#"{"loggedIn": true}"#);
        assert!(*state.session.read().await);

        let body = api_logout(axum::extract::State(state.clone())).await;
        assert_eq!(body, r#"{"loggedIn": false}"#);

        let body = api_session(axum::extract::State(state)).await;
        assert_eq!(body, r#"{"loggedIn": false}"#);
    }
}
