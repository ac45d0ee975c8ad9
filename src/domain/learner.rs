//! Learner profile - the personalisation record captured at onboarding.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Self-reported comfort with technical material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnicalComfort {
    Low,
    #[default]
    Medium,
    High,
}

impl TechnicalComfort {
    /// Short hint shown next to the choice on the onboarding form.
    pub fn hint(&self) -> &'static str {
        match self {
            TechnicalComfort::Low => "I prefer simple, non-jargon explanations.",
            TechnicalComfort::Medium => "I can understand basic architecture diagrams.",
            TechnicalComfort::High => "I can read code and technical papers.",
        }
    }
}

impl fmt::Display for TechnicalComfort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TechnicalComfort::Low => "low",
            TechnicalComfort::Medium => "medium",
            TechnicalComfort::High => "high",
        };
        f.write_str(s)
    }
}

/// Identity and personalisation attributes of the single local learner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    pub name: String,
    pub role: String,
    pub industry: String,
    #[serde(default)]
    pub years_experience: String,
    #[serde(default)]
    pub technical_comfort: TechnicalComfort,
    #[serde(default)]
    pub goal: String,
}

impl LearnerProfile {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        industry: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            industry: industry.into(),
            ..Self::default()
        }
    }

    pub fn with_years_experience(mut self, years: impl Into<String>) -> Self {
        self.years_experience = years.into();
        self
    }

    pub fn with_technical_comfort(mut self, comfort: TechnicalComfort) -> Self {
        self.technical_comfort = comfort;
        self
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    /// Checks the required fields (name, role, industry) are not blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("role", &self.role),
            ("industry", &self.industry),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::empty_field(field));
            }
        }
        Ok(())
    }
}
