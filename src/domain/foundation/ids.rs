//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a mentor chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random MessageId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a MessageId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MessageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A week of the twelve-week roadmap (1 through 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekNumber(u8);

impl WeekNumber {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 12;

    /// Creates a WeekNumber, rejecting values outside 1..=12.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::FIRST..=Self::LAST).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::out_of_range(
                "week",
                Self::FIRST as i64,
                Self::LAST as i64,
                value as i64,
            ))
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// All roadmap weeks in order.
    pub fn all() -> impl Iterator<Item = WeekNumber> {
        (Self::FIRST..=Self::LAST).map(WeekNumber)
    }
}

impl TryFrom<u8> for WeekNumber {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WeekNumber> for u8 {
    fn from(week: WeekNumber) -> Self {
        week.0
    }
}

impl fmt::Display for WeekNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_ids_are_unique() {
        assert_ne!(MessageId::new(), MessageId::new());
    }

    #[test]
    fn message_id_round_trips_through_string() {
        let id = MessageId::new();
        let parsed: MessageId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn week_number_accepts_roadmap_range() {
        assert_eq!(WeekNumber::new(1).unwrap().value(), 1);
        assert_eq!(WeekNumber::new(12).unwrap().value(), 12);
    }

    #[test]
    fn week_number_rejects_out_of_range() {
        assert!(WeekNumber::new(0).is_err());
        assert!(WeekNumber::new(13).is_err());
    }

    #[test]
    fn week_number_deserialization_validates() {
        let ok: WeekNumber = serde_json::from_str("5").unwrap();
        assert_eq!(ok.value(), 5);
        assert!(serde_json::from_str::<WeekNumber>("0").is_err());
    }

    #[test]
    fn all_weeks_has_twelve_entries() {
        assert_eq!(WeekNumber::all().count(), 12);
    }
}
