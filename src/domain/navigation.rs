//! Named views and the assessment deep link.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::catalog::{ContentCatalog, SkillNode};
use crate::domain::foundation::ValidationError;

const SKILL_PARAM: &str = "skill";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Dashboard,
    Roadmap,
    Assessment,
    Toolbox,
    Mentor,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Roadmap,
        View::Assessment,
        View::Toolbox,
        View::Mentor,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            View::Dashboard => "/",
            View::Roadmap => "/roadmap",
            View::Assessment => "/assessment",
            View::Toolbox => "/toolbox",
            View::Mentor => "/mentor",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A parsed in-app location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub view: View,
    /// Skill selected via `?skill=`; only meaningful for the assessment view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
}

impl Route {
    pub fn view(view: View) -> Self {
        Self { view, skill: None }
    }

    /// Deep link into the assessment's skill detail.
    pub fn skill_detail(skill_id: impl Into<String>) -> Self {
        Self {
            view: View::Assessment,
            skill: Some(skill_id.into()),
        }
    }

    /// Whether the assessment should open in skills mode.
    pub fn opens_skills(&self) -> bool {
        self.view == View::Assessment && self.skill.is_some()
    }

    /// Resolves the selected skill; unknown ids select nothing.
    pub fn selected_skill<'a>(&self, catalog: &'a ContentCatalog) -> Option<&'a SkillNode> {
        self.skill.as_deref().and_then(|id| catalog.find_skill(id))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.skill {
            Some(skill) if self.view == View::Assessment => {
                write!(f, "{}?{}={}", self.view.path(), SKILL_PARAM, skill)
            }
            _ => f.write_str(self.view.path()),
        }
    }
}

impl FromStr for Route {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, query) = match s.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (s, None),
        };
        let normalized = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        let view = View::ALL
            .iter()
            .copied()
            .find(|v| v.path() == normalized)
            .ok_or_else(|| ValidationError::unknown_id("view", path))?;

        let skill = match (view, query) {
            (View::Assessment, Some(query)) => query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == SKILL_PARAM)
                .map(|(_, value)| value.to_string())
                .filter(|value| !value.is_empty()),
            _ => None,
        };
        Ok(Self { view, skill })
    }
}
