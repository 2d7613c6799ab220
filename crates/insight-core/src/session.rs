//! One run through a tool: rate, submit, read the report, maybe redo.

use crate::catalog::ToolKind;
use crate::dimension::Dimension;
use crate::error::{InsightError, Result};
use crate::identity::UserIdentity;
use crate::report::{self, Report};
use crate::response::ResponseState;
use crate::result::{self, CompletedResult};
use crate::score::{self, ScoreSummary};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};

/// Score and report `response` with the strategy belonging to `tool`.
pub fn evaluate(tool: ToolKind, response: &ResponseState) -> Result<(ScoreSummary, Report)> {
    match tool {
        ToolKind::RodaVida => {
            let dimensions = crate::dimension::LIFE_BALANCE;
            let summary = score::compute_summary(response, dimensions)?;
            let report = report::render(tool, &summary, response, dimensions)?;
            Ok((summary, report))
        }
        ToolKind::Personalidade
        | ToolKind::ForcasFraquezas
        | ToolKind::InteligenciaEmocional
        | ToolKind::Valores
        | ToolKind::Aprendizagem
        | ToolKind::Proposito
        | ToolKind::GestaoTempo => Err(InsightError::ToolNotImplemented(tool.to_string())),
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum SessionState {
    Editing {
        response: ResponseState,
    },
    Submitted {
        record: Box<CompletedResult>,
        report: Report,
    },
}

// ---------------------------------------------------------------------------
// AssessmentSession
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AssessmentSession {
    tool: ToolKind,
    dimensions: &'static [Dimension],
    state: SessionState,
}

impl AssessmentSession {
    /// Open `tool` in the editing state with every rating at its default.
    pub fn start(tool: ToolKind) -> Result<Self> {
        let dimensions = tool.require_dimensions()?;
        Ok(Self {
            tool,
            dimensions,
            state: SessionState::Editing {
                response: ResponseState::initialize(dimensions),
            },
        })
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn dimensions(&self) -> &'static [Dimension] {
        self.dimensions
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, SessionState::Submitted { .. })
    }

    /// The ratings being edited, or the ones that were submitted.
    pub fn response(&self) -> &ResponseState {
        match &self.state {
            SessionState::Editing { response } => response,
            SessionState::Submitted { record, .. } => &record.response_state,
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match &self.state {
            SessionState::Editing { .. } => None,
            SessionState::Submitted { report, .. } => Some(report),
        }
    }

    pub fn set_rating(&mut self, key: &str, value: i64) -> Result<()> {
        match &mut self.state {
            SessionState::Editing { response } => response.set_rating(key, value),
            SessionState::Submitted { .. } => Err(InsightError::AlreadySubmitted),
        }
    }

    /// Score the current ratings, archive the result for `user` and switch
    /// to the read-only submitted state. Returns every stored result,
    /// including the new one.
    pub fn submit(
        &mut self,
        user: &UserIdentity,
        store: &mut dyn KeyValueStore,
        now: DateTime<Utc>,
    ) -> Result<Vec<CompletedResult>> {
        let SessionState::Editing { response } = &self.state else {
            return Err(InsightError::AlreadySubmitted);
        };
        let (summary, report) = evaluate(self.tool, response)?;
        let record = CompletedResult {
            tool_id: self.tool,
            tool_name: self.tool.name().to_string(),
            response_state: response.clone(),
            score_summary: summary,
            completed_at: now,
            user_name: user.name.clone(),
            user_email: user.email.clone(),
        };
        let all = result::append(store, &record)?;
        tracing::info!(tool = %self.tool, average = %report.average, "assessment submitted");
        self.state = SessionState::Submitted {
            record: Box::new(record),
            report,
        };
        Ok(all)
    }

    /// Start over with fresh ratings. Stored results are kept.
    pub fn redo(&mut self) {
        self.state = SessionState::Editing {
            response: ResponseState::initialize(self.dimensions),
        };
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
