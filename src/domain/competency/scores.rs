//! Competency scores - a total map from every dimension to a level.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::CompetencyId;
use crate::domain::foundation::ValidationError;

/// Level every dimension starts at.
pub const DEFAULT_LEVEL: u32 = 1;

/// Mapping from each of the five competency dimensions to an integer level.
///
/// Backed by a fixed array so the map is total by construction: there is no
/// way to remove a dimension, only to overwrite its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompetencyScores {
    levels: [u32; CompetencyId::COUNT],
}

impl CompetencyScores {
    /// All dimensions at the default level.
    pub fn new() -> Self {
        Self {
            levels: [DEFAULT_LEVEL; CompetencyId::COUNT],
        }
    }

    /// Current level for a dimension.
    pub fn get(&self, id: CompetencyId) -> u32 {
        self.levels[id.index()]
    }

    /// Overwrites one dimension.
    ///
    /// Levels must be positive. Values above 5 are kept as given; clamping is
    /// the caller's responsibility.
    pub fn set(&mut self, id: CompetencyId, level: u32) -> Result<(), ValidationError> {
        if level == 0 {
            return Err(ValidationError::out_of_range(
                id.as_str(),
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        self.levels[id.index()] = level;
        Ok(())
    }

    /// Iterates `(dimension, level)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CompetencyId, u32)> + '_ {
        CompetencyId::ALL.iter().map(move |id| (*id, self.get(*id)))
    }

    /// Arithmetic mean across all five dimensions.
    pub fn mean(&self) -> f64 {
        let total: u64 = self.levels.iter().map(|l| u64::from(*l)).sum();
        total as f64 / CompetencyId::COUNT as f64
    }
}

impl Default for CompetencyScores {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for CompetencyScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CompetencyId::COUNT))?;
        for (id, level) in self.iter() {
            map.serialize_entry(&id, &level)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CompetencyScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = CompetencyScores;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of competency ids to positive levels")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                // Absent dimensions keep the default so the result stays total.
                let mut scores = CompetencyScores::new();
                while let Some((id, level)) = access.next_entry::<CompetencyId, u32>()? {
                    scores.set(id, level).map_err(serde::de::Error::custom)?;
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}
