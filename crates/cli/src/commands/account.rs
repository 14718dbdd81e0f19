//! Login and logout.

use secrecy::SecretString;
use shopeasy_storefront::{AppState, FileStorage, Result};

use crate::render;

pub fn login(app: &mut AppState<FileStorage>, email: &str, password: String) -> Result<()> {
    let password = SecretString::from(password);
    let session = app.auth_mut().login(email, &password)?;
    render::session(session);
    Ok(())
}

pub fn logout(app: &mut AppState<FileStorage>) {
    app.auth_mut().logout();
    render::message("Logged out");
}
