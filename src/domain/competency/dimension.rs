//! The five fixed competency dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Identifier of one of the five competency axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetencyId {
    /// Technical fluency.
    Tech,
    /// Probabilistic thinking.
    Prob,
    /// Data strategy.
    Data,
    /// Ethics and safety.
    Ethics,
    /// AI economics.
    Econ,
}

impl CompetencyId {
    /// Number of dimensions.
    pub const COUNT: usize = 5;

    /// Canonical order used for storage and display.
    pub const ALL: [CompetencyId; Self::COUNT] = [
        CompetencyId::Tech,
        CompetencyId::Prob,
        CompetencyId::Data,
        CompetencyId::Ethics,
        CompetencyId::Econ,
    ];

    /// Order used to break ties when picking a focus area.
    pub const FOCUS_PRIORITY: [CompetencyId; Self::COUNT] = [
        CompetencyId::Tech,
        CompetencyId::Econ,
        CompetencyId::Prob,
        CompetencyId::Data,
        CompetencyId::Ethics,
    ];

    /// Position in [`CompetencyId::ALL`].
    pub fn index(&self) -> usize {
        match self {
            CompetencyId::Tech => 0,
            CompetencyId::Prob => 1,
            CompetencyId::Data => 2,
            CompetencyId::Ethics => 3,
            CompetencyId::Econ => 4,
        }
    }

    /// Wire identifier ("tech", "prob", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            CompetencyId::Tech => "tech",
            CompetencyId::Prob => "prob",
            CompetencyId::Data => "data",
            CompetencyId::Ethics => "ethics",
            CompetencyId::Econ => "econ",
        }
    }

    /// Roadmap focus area recommended when this dimension is weakest.
    pub fn focus_area(&self) -> &'static str {
        match self {
            CompetencyId::Tech => "Technical Fluency (Week 1-3)",
            CompetencyId::Econ => "AI Economics (Week 5)",
            CompetencyId::Prob => "Probabilistic Thinking (Week 3 & 6)",
            CompetencyId::Data => "Data Strategy (Week 3 & 6)",
            CompetencyId::Ethics => "Ethics & Safety (Week 8)",
        }
    }
}

impl fmt::Display for CompetencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompetencyId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tech" => Ok(CompetencyId::Tech),
            "prob" => Ok(CompetencyId::Prob),
            "data" => Ok(CompetencyId::Data),
            "ethics" => Ok(CompetencyId::Ethics),
            "econ" => Ok(CompetencyId::Econ),
            other => Err(ValidationError::unknown_id("competency", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_canonical_order() {
        for (i, id) in CompetencyId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn parses_wire_identifiers() {
        for id in CompetencyId::ALL {
            assert_eq!(id.as_str().parse::<CompetencyId>().unwrap(), id);
        }
        assert!("tools".parse::<CompetencyId>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CompetencyId::Ethics).unwrap(), "\"ethics\"");
    }

    #[test]
    fn focus_priority_covers_every_dimension() {
        let mut sorted = CompetencyId::FOCUS_PRIORITY.to_vec();
        sorted.sort();
        assert_eq!(sorted, CompetencyId::ALL.to_vec());
    }
}
