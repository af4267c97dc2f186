//! Session and authorization gate
//!
//! Stored credentials ([`TokenStore`]) are interpreted by the
//! [`SessionOracle`], whose answer seeds the process-wide
//! [`SessionContext`]. The [`guard`] decides from the context whether a route
//! may be shown.

mod context;
mod guard;
mod oracle;
mod token_store;

pub use context::{Resolution, SessionContext, SessionState, SessionView};
pub use guard::{GuardOutcome, guard};
pub use oracle::SessionOracle;
pub use token_store::TokenStore;

use crate::api::AuthApi;
use crate::{Error, Result};
use gtw_admin_types::AdminUser;
use tracing::warn;

/// Full sign-in: call the login endpoint, persist the credentials, then
/// admit the user into `context`
///
/// # Errors
///
/// Returns [`Error::Validation`] for empty fields or a response without
/// credentials, [`Error::Api`] for rejected credentials, and
/// [`Error::NotAuthorized`] when the account is not an admin. In that last
/// case the credentials written a moment earlier are removed again.
pub async fn sign_in(
    auth: &AuthApi,
    context: &SessionContext,
    username: &str,
    password: &str,
) -> Result<AdminUser> {
    let response = auth.admin_login(username, password).await?;
    let message = response.message.clone();
    let bundle = response.into_bundle().ok_or_else(|| {
        Error::validation(
            "credentials",
            message.unwrap_or_else(|| "Login failed. Please try again.".to_string()),
        )
    })?;

    let tokens = auth.gateway().tokens();
    tokens.save(&bundle)?;

    context.login(bundle.user).inspect_err(|e| {
        if matches!(e, Error::NotAuthorized) {
            warn!("Signed-in account is not an admin, discarding credentials");
            tokens.clear_logged();
        }
    })
}
