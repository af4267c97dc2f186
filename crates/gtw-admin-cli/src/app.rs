//! Wiring of the console and the route boundary

use gtw_admin_core::{
    AdminApi, AdminConfig, AuthGateway, FileStore, GuardOutcome, Navigation, Navigator,
    SessionContext, SessionOracle, TokenStore, guard,
};
use gtw_admin_types::Route;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by a command
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Failure from the console core
    #[error(transparent)]
    Core(#[from] gtw_admin_core::Error),

    /// Rejected filter or draft
    #[error(transparent)]
    Types(#[from] gtw_admin_types::TypesError),

    /// Protected view requested without a session
    #[error("Not signed in. Run `gtw-admin login` first.")]
    SignInRequired,

    /// Sign-in failed; the message is meant for the admin
    #[error("{0}")]
    Login(String),

    /// No record with the given id
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// What was looked up
        kind: &'static str,
        /// Requested id
        id: String,
    },

    /// Local input that could not be used
    #[error("{0}")]
    Input(String),
}

pub(crate) type CliResult<T> = Result<T, CliError>;

/// Everything a command needs, built once per invocation
#[derive(Debug)]
pub(crate) struct App {
    pub(crate) config: AdminConfig,
    pub(crate) session: SessionContext,
    pub(crate) navigator: Navigator,
    pub(crate) tokens: TokenStore,
    pub(crate) api: AdminApi,
}

impl App {
    pub(crate) fn new(config: AdminConfig) -> CliResult<Self> {
        let store = FileStore::open(config.session.resolved_store_path());
        debug!(path = %store.path().display(), "Using session store");

        let tokens = TokenStore::new(Arc::new(store));
        let navigator = Navigator::default();
        let session = SessionContext::new(SessionOracle::new(tokens.clone()));
        let gateway = AuthGateway::new(&config.api, tokens.clone(), navigator.clone())?;
        let api = AdminApi::new(&gateway);

        Ok(Self {
            config,
            session,
            navigator,
            tokens,
            api,
        })
    }

    /// Resolve the session and run the guard for `route`
    pub(crate) fn enter(&self, route: Route) -> CliResult<()> {
        let view = self.session.init();
        match guard(&view, route) {
            GuardOutcome::Render(route) => {
                self.navigator.navigate(route);
                Ok(())
            }
            GuardOutcome::Redirect(target) => {
                self.navigator.navigate(target);
                Err(CliError::SignInRequired)
            }
            // init() always resolves, so this only happens if that changes
            GuardOutcome::Placeholder => Err(CliError::Input("Session is still loading".to_string())),
        }
    }

    /// Print `error` and apply its effect on the session
    pub(crate) fn report(&self, error: &CliError) {
        if let CliError::Core(core) = error
            && self.navigator.react(core, &self.session) == Navigation::Redirect(Route::Login)
        {
            eprintln!("Your session has expired. Please sign in again with `gtw-admin login`.");
            return;
        }
        eprintln!("Error: {error}");
    }
}
