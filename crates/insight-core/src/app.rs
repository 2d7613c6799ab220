//! Application state and the transitions between views.
//!
//! All session state lives in [`AppState`]; durable storage is only touched
//! through the [`KeyValueStore`] passed into each transition.

use crate::catalog::ToolKind;
use crate::error::{InsightError, Result};
use crate::identity::{LoginForm, UserIdentity};
use crate::result::{self, CompletedResult};
use crate::session::AssessmentSession;
use crate::storage::KeyValueStore;
use crate::submission::{self, LoginPayload, SubmissionHandle, Submitter};
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Home,
    Tool(ToolKind),
}

#[derive(Debug, Clone)]
pub struct AppState {
    user: Option<UserIdentity>,
    results: Vec<CompletedResult>,
    view: View,
    session: Option<AssessmentSession>,
}

impl AppState {
    /// Restore the logged-in user and stored results. Unreadable results
    /// start the app with an empty history.
    pub fn startup(store: &dyn KeyValueStore) -> Result<Self> {
        let user = UserIdentity::load(store)?;
        let results = result::load_all_or_empty(store);
        let view = if user.is_some() {
            View::Home
        } else {
            View::Login
        };
        Ok(Self {
            user,
            results,
            view,
            session: None,
        })
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> Result<&UserIdentity> {
        self.user.as_ref().ok_or(InsightError::NotLoggedIn)
    }

    pub fn results(&self) -> &[CompletedResult] {
        &self.results
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn session(&self) -> Option<&AssessmentSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut AssessmentSession> {
        self.session.as_mut()
    }

    pub fn tool_count(&self) -> usize {
        ToolKind::all().len()
    }

    pub fn completed_count(&self) -> usize {
        self.results.len()
    }

    /// Validate `form`, persist the identity and move to the home view.
    /// The identity is created once: logging in again is refused.
    ///
    /// When a `submitter` is given the login details are sent in the
    /// background; the returned handle can be waited on but its outcome
    /// never affects the login. Invalid forms change nothing and submit
    /// nothing.
    pub fn login(
        &mut self,
        form: &LoginForm,
        store: &mut dyn KeyValueStore,
        submitter: Option<Arc<dyn Submitter>>,
        now: DateTime<Utc>,
    ) -> Result<Option<SubmissionHandle>> {
        if let Some(user) = &self.user {
            return Err(InsightError::AlreadyLoggedIn(user.name.clone()));
        }
        let login = form.validate()?;

        let handle = submitter.map(|s| submission::spawn(s, LoginPayload::new(&login, now)));
        if handle.is_none() {
            tracing::debug!("no submission endpoint configured");
        }

        let user = UserIdentity::new(login, now);
        user.save(store)?;
        tracing::info!("logged in");
        self.user = Some(user);
        self.view = View::Home;
        Ok(handle)
    }

    /// Open a tool. Placeholder tools get the tool view without a session.
    pub fn open_tool(&mut self, tool: ToolKind) -> Result<()> {
        self.require_user()?;
        self.session = AssessmentSession::start(tool).ok();
        self.view = View::Tool(tool);
        Ok(())
    }

    pub fn go_home(&mut self) -> Result<()> {
        self.require_user()?;
        self.session = None;
        self.view = View::Home;
        Ok(())
    }

    /// Submit the open assessment and return the archived record.
    pub fn submit_assessment(
        &mut self,
        store: &mut dyn KeyValueStore,
        now: DateTime<Utc>,
    ) -> Result<&CompletedResult> {
        let user = self.user.as_ref().ok_or(InsightError::NotLoggedIn)?;
        let session = match (self.view, self.session.as_mut()) {
            (View::Tool(_), Some(session)) => session,
            (View::Tool(tool), None) => {
                return Err(InsightError::ToolNotImplemented(tool.to_string()))
            }
            _ => return Err(InsightError::NoToolOpen),
        };
        self.results = session.submit(user, store, now)?;
        self.results
            .last()
            .ok_or_else(|| InsightError::ResultNotFound(0))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
