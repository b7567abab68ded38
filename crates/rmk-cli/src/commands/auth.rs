//! `rmk auth` — store, inspect, and clear reviewer credentials.
//!
//! The identity-provider handshake happens elsewhere; these commands only
//! manage the resulting credential.

use rmk_config::RowmarkConfig;
use rmk_core::ReviewerIdentity;
use rmk_remote::identity;

use crate::cli::AuthAction;

pub fn handle(action: &AuthAction, config: &RowmarkConfig) -> anyhow::Result<()> {
    match action {
        AuthAction::Status => {
            if config.auth.is_configured() {
                println!("signed in as {} (from config/env)", config.auth.email);
            } else if let Some(stored) = identity::load() {
                println!("signed in as {} (from credentials file)", stored.email);
            } else {
                println!("not authenticated — run `rmk auth set --email ... --token ...`");
            }
        }
        AuthAction::Set { email, token } => {
            identity::store(&ReviewerIdentity {
                email: email.clone(),
                credential: token.clone(),
            })?;
            println!("credentials stored for {email}");
        }
        AuthAction::Clear => {
            identity::clear()?;
            println!("credentials cleared");
        }
    }
    Ok(())
}
