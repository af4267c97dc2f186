//! Shared fixtures for the gateway integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, unreachable_pub)]

use gtw_admin_core::{
    AdminApi, AuthGateway, MemoryStore, Navigator, SessionContext, SessionOracle, TokenStore,
};
use gtw_admin_types::{CredentialBundle, Role, Route, UserRecord};
use reqwest::Client;
use std::sync::Arc;
use wiremock::MockServer;

pub const ACCESS_TOKEN: &str = "access-T";

/// Everything a test needs, wired over one in-memory store
pub struct Harness {
    pub server: MockServer,
    pub memory: Arc<MemoryStore>,
    pub tokens: TokenStore,
    pub navigator: Navigator,
    pub session: SessionContext,
    pub gateway: AuthGateway,
    pub api: AdminApi,
}

impl Harness {
    /// Anonymous harness, current route `route`
    pub async fn new(route: Route) -> Self {
        let server = MockServer::start().await;
        let memory = Arc::new(MemoryStore::new());
        let tokens = TokenStore::new(memory.clone());
        let navigator = Navigator::new(route);
        let session = SessionContext::new(SessionOracle::new(tokens.clone()));
        let gateway = AuthGateway::with_client(
            Client::new(),
            &format!("{}/api", server.uri()),
            tokens.clone(),
            navigator.clone(),
        )
        .expect("mock server uri is a valid base url");
        let api = AdminApi::new(&gateway);

        Self {
            server,
            memory,
            tokens,
            navigator,
            session,
            gateway,
            api,
        }
    }

    /// Harness with a persisted admin bundle and a resolved session
    pub async fn signed_in(route: Route) -> Self {
        let harness = Self::new(route).await;
        harness.tokens.save(&admin_bundle()).unwrap();
        assert!(harness.session.init().is_authenticated());
        harness
    }
}

pub fn user(role: Role) -> UserRecord {
    UserRecord {
        id: "64f0".to_string(),
        name: "Ada".to_string(),
        email: "ada@gtw.dev".to_string(),
        role,
    }
}

pub fn admin_bundle() -> CredentialBundle {
    CredentialBundle {
        access_token: ACCESS_TOKEN.to_string(),
        refresh_token: "refresh-R".to_string(),
        user: user(Role::Admin),
    }
}
