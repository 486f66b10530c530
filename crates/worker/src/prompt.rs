use anyhow::Context;
use autotrade_core::auth::Credentials;
use autotrade_core::config::Settings;
use std::io::IsTerminal;

/// Takes EMAIL/PASSWORD from settings, prompting for whichever is missing.
///
/// Without a terminal there is nobody to ask, so a missing value is an error.
pub fn resolve_credentials(settings: &Settings) -> anyhow::Result<Credentials> {
    let interactive = std::io::stdin().is_terminal();

    let email = match (&settings.email, interactive) {
        (Some(email), _) => email.clone(),
        (None, true) => dialoguer::Input::<String>::new()
            .with_prompt("email")
            .interact_text()
            .context("failed to read email")?,
        (None, false) => settings.require_email()?.to_string(),
    };

    let password = match (&settings.password, interactive) {
        (Some(password), _) => password.clone(),
        (None, true) => dialoguer::Password::new()
            .with_prompt("password")
            .interact()
            .context("failed to read password")?,
        (None, false) => settings.require_password()?.to_string(),
    };

    Ok(Credentials::new(email, password))
}
