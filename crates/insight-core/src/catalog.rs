use crate::dimension::{self, Dimension};
use crate::error::InsightError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ToolKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    RodaVida,
    Personalidade,
    ForcasFraquezas,
    InteligenciaEmocional,
    Valores,
    Aprendizagem,
    Proposito,
    GestaoTempo,
}

impl ToolKind {
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::RodaVida,
            ToolKind::Personalidade,
            ToolKind::ForcasFraquezas,
            ToolKind::InteligenciaEmocional,
            ToolKind::Valores,
            ToolKind::Aprendizagem,
            ToolKind::Proposito,
            ToolKind::GestaoTempo,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::RodaVida => "roda-vida",
            ToolKind::Personalidade => "personalidade",
            ToolKind::ForcasFraquezas => "forcas-fraquezas",
            ToolKind::InteligenciaEmocional => "inteligencia-emocional",
            ToolKind::Valores => "valores",
            ToolKind::Aprendizagem => "aprendizagem",
            ToolKind::Proposito => "proposito",
            ToolKind::GestaoTempo => "gestao-tempo",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::RodaVida => "Roda da Vida",
            ToolKind::Personalidade => "Análise de Personalidade",
            ToolKind::ForcasFraquezas => "Forças e Fraquezas",
            ToolKind::InteligenciaEmocional => "Inteligência Emocional",
            ToolKind::Valores => "Valores Pessoais",
            ToolKind::Aprendizagem => "Estilo de Aprendizagem",
            ToolKind::Proposito => "Propósito de Vida",
            ToolKind::GestaoTempo => "Gestão de Tempo",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::RodaVida => "Avalie o equilíbrio entre diferentes áreas da sua vida",
            ToolKind::Personalidade => "Descubra seu perfil comportamental DISC",
            ToolKind::ForcasFraquezas => {
                "Identifique suas competências e áreas de desenvolvimento"
            }
            ToolKind::InteligenciaEmocional => "Avalie suas habilidades emocionais",
            ToolKind::Valores => "Identifique seus valores fundamentais",
            ToolKind::Aprendizagem => "Descubra como você aprende melhor",
            ToolKind::Proposito => "Reflexões guiadas sobre seu propósito",
            ToolKind::GestaoTempo => "Analise suas prioridades e uso do tempo",
        }
    }

    /// Dimensions rated by this tool, or `None` for tools that are still
    /// placeholders.
    pub fn dimensions(self) -> Option<&'static [Dimension]> {
        match self {
            ToolKind::RodaVida => Some(dimension::LIFE_BALANCE),
            ToolKind::Personalidade
            | ToolKind::ForcasFraquezas
            | ToolKind::InteligenciaEmocional
            | ToolKind::Valores
            | ToolKind::Aprendizagem
            | ToolKind::Proposito
            | ToolKind::GestaoTempo => None,
        }
    }

    pub fn is_implemented(self) -> bool {
        self.dimensions().is_some()
    }

    /// Like [`ToolKind::dimensions`] but fails for placeholder tools.
    pub fn require_dimensions(self) -> Result<&'static [Dimension], InsightError> {
        self.dimensions()
            .ok_or_else(|| InsightError::ToolNotImplemented(self.as_str().to_string()))
    }

    /// Title line of the plain-text export.
    pub fn export_title(self) -> String {
        format!("INSIGHT+ - {}", self.name().to_uppercase())
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolKind {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InsightError::UnknownTool(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_eight_tools() {
        assert_eq!(ToolKind::all().len(), 8);
        assert_eq!(ToolKind::all()[0], ToolKind::RodaVida);
    }

    #[test]
    fn only_roda_vida_is_implemented() {
        let implemented: Vec<ToolKind> = ToolKind::all()
            .iter()
            .copied()
            .filter(|t| t.is_implemented())
            .collect();
        assert_eq!(implemented, vec![ToolKind::RodaVida]);
    }

    #[test]
    fn from_str_roundtrip() {
        for &t in ToolKind::all() {
            let parsed: ToolKind = t.as_str().parse().unwrap();
            assert_eq!(parsed, t);
        }
    }

    #[test]
    fn from_str_unknown() {
        let err = "horoscopo".parse::<ToolKind>().unwrap_err();
        assert!(matches!(err, InsightError::UnknownTool(ref s) if s == "horoscopo"));
    }

    #[test]
    fn placeholder_requires_dimensions_fails() {
        let err = ToolKind::Valores.require_dimensions().unwrap_err();
        assert!(matches!(err, InsightError::ToolNotImplemented(_)));
    }

    #[test]
    fn serde_uses_tool_id() {
        let json = serde_json::to_string(&ToolKind::GestaoTempo).unwrap();
        assert_eq!(json, "\"gestao-tempo\"");
    }

    #[test]
    fn export_title_for_roda_vida() {
        assert_eq!(ToolKind::RodaVida.export_title(), "INSIGHT+ - RODA DA VIDA");
    }
}
