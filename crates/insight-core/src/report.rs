use crate::catalog::ToolKind;
use crate::dimension::Dimension;
use crate::error::{InsightError, Result};
use crate::response::{ResponseState, MAX_RATING};
use crate::score::{DimensionScore, ScoreSummary, STRONG_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Averages below this trigger the general-attention recommendation.
pub const ATTENTION_AVERAGE: f64 = 6.0;
/// A weakest area rated below this is called out as urgent.
pub const URGENT_RATING: u8 = 5;
/// Strong areas needed before suggesting to leverage them.
pub const LEVERAGE_MIN_STRONG: usize = 3;

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    GeneralAttention,
    UrgentAttention { label: String },
    LeverageStrengths,
    ReviewMonthly,
}

impl Recommendation {
    pub fn text(&self) -> String {
        match self {
            Recommendation::GeneralAttention => "Sua pontuação geral indica que há várias áreas \
                necessitando atenção. Priorize as áreas com menor pontuação."
                .to_string(),
            Recommendation::UrgentAttention { label } => format!(
                "{label} necessita atenção urgente. Defina 2-3 ações específicas para \
                 melhorar nesta área."
            ),
            Recommendation::LeverageStrengths => "Você tem várias áreas bem desenvolvidas! Use \
                essas forças para apoiar o crescimento nas áreas mais fracas."
                .to_string(),
            Recommendation::ReviewMonthly => "Revise esta avaliação mensalmente para acompanhar \
                seu progresso e fazer ajustes necessários."
                .to_string(),
        }
    }
}

/// Evaluate the recommendation rules in their fixed order.
pub fn recommendations(summary: &ScoreSummary) -> Vec<Recommendation> {
    let mut out = Vec::new();
    if summary.average < ATTENTION_AVERAGE {
        out.push(Recommendation::GeneralAttention);
    }
    if summary.weakest.rating < URGENT_RATING {
        out.push(Recommendation::UrgentAttention {
            label: summary.weakest.label.clone(),
        });
    }
    if summary.count_at_or_above(STRONG_THRESHOLD) >= LEVERAGE_MIN_STRONG {
        out.push(Recommendation::LeverageStrengths);
    }
    out.push(Recommendation::ReviewMonthly);
    out
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    /// One line per dimension, in catalog order.
    pub lines: Vec<DimensionScore>,
    pub average: String,
    pub strongest: DimensionScore,
    pub weakest: DimensionScore,
    pub recommendations: Vec<Recommendation>,
}

pub fn render(
    tool: ToolKind,
    summary: &ScoreSummary,
    response: &ResponseState,
    dimensions: &[Dimension],
) -> Result<Report> {
    let lines = dimensions
        .iter()
        .map(|d| {
            response
                .get(d.key)
                .map(|rating| DimensionScore {
                    key: d.key.to_string(),
                    label: d.label.to_string(),
                    rating,
                })
                .ok_or_else(|| InsightError::IncompleteResponse(d.key.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Report {
        title: tool.export_title(),
        lines,
        average: summary.average_display(),
        strongest: summary.strongest.clone(),
        weakest: summary.weakest.clone(),
        recommendations: recommendations(summary),
    })
}

/// Plain-text export: the title, a blank line, then `"<label>: <rating>/10"`
/// per dimension.
pub fn to_downloadable_text(report: &Report) -> String {
    let mut out = format!("{}\n\n", report.title);
    let body: Vec<String> = report
        .lines
        .iter()
        .map(|l| format!("{}: {}/{MAX_RATING}", l.label, l.rating))
        .collect();
    out.push_str(&body.join("\n"));
    out
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(f, "Pontuação por Área")?;
        let width = self.lines.iter().map(|l| l.label.chars().count()).max().unwrap_or(0);
        for l in &self.lines {
            let pad = width - l.label.chars().count();
            writeln!(f, "  {}{}  {:>2}/{MAX_RATING}", l.label, " ".repeat(pad), l.rating)?;
        }
        writeln!(f)?;
        writeln!(f, "Pontuação Média Geral: {}/{MAX_RATING}", self.average)?;
        writeln!(
            f,
            "Área Mais Forte: {} ({}/{MAX_RATING})",
            self.strongest.label, self.strongest.rating
        )?;
        writeln!(
            f,
            "Área para Desenvolvimento: {} ({}/{MAX_RATING})",
            self.weakest.label, self.weakest.rating
        )?;
        writeln!(f)?;
        writeln!(f, "Recomendações Personalizadas")?;
        for r in &self.recommendations {
            writeln!(f, "  • {}", r.text())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
