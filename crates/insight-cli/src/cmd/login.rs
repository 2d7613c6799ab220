use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use insight_core::app::AppState;
use insight_core::config::Config;
use insight_core::identity::{LoginForm, UserIdentity};
use insight_core::storage::FileStore;
use insight_core::submission::{HttpSubmitter, Submitter};
use insight_core::InsightError;
use std::path::Path;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// login
// ---------------------------------------------------------------------------

pub fn run(
    root: &Path,
    name: String,
    email: String,
    consent: bool,
    endpoint: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    // Config only feeds the best-effort submission; a bad file disables it.
    let config = Config::load(root).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable config; login details will not be sent");
        Config::default()
    });
    let mut store = FileStore::new(root);
    let mut app = AppState::startup(&store).context("failed to load app state")?;

    let timeout = config.submission.timeout();
    let submitter = endpoint
        .or(config.submission.endpoint)
        .and_then(|url| match HttpSubmitter::new(url, timeout) {
            Ok(s) => Some(Arc::new(s) as Arc<dyn Submitter>),
            Err(e) => {
                tracing::warn!(error = %e, "login submission disabled");
                None
            }
        });

    let form = LoginForm {
        name,
        email,
        consent,
    };
    // Validation errors carry the message shown to the user.
    let handle = app.login(&form, &mut store, submitter, Utc::now())?;
    let user = app.require_user()?;

    if json {
        print_json(user)?;
    } else {
        println!("Olá, {}! Acesso liberado.", user.first_name());
    }

    if let Some(handle) = handle {
        handle.wait(timeout);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// whoami
// ---------------------------------------------------------------------------

pub fn whoami(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = FileStore::new(root);
    let user = UserIdentity::load(&store)
        .context("failed to load user")?
        .ok_or(InsightError::NotLoggedIn)?;

    if json {
        print_json(&user)?;
        return Ok(());
    }

    println!("{} <{}>", user.name, user.email);
    println!("logged in: {}", user.login_date.to_rfc3339());
    Ok(())
}
