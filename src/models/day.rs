//! Day-of-week model.
//!
//! Days are the outer axis of the weekly grid. The catalog decides which
//! days are schedulable and in what order; this type only names them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Day {
    /// The five teaching weekdays, Monday through Friday.
    pub const WEEKDAYS: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Full English name (e.g., "Monday").
    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a day name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown day: {0}")]
pub struct UnknownDay(pub String);

impl FromStr for Day {
    type Err = UnknownDay;

    /// Accepts short and long forms, case-insensitive ("mon", "Monday").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mon" | "monday" => Ok(Day::Monday),
            "tue" | "tuesday" => Ok(Day::Tuesday),
            "wed" | "wednesday" => Ok(Day::Wednesday),
            "thu" | "thursday" => Ok(Day::Thursday),
            "fri" | "friday" => Ok(Day::Friday),
            "sat" | "saturday" => Ok(Day::Saturday),
            "sun" | "sunday" => Ok(Day::Sunday),
            _ => Err(UnknownDay(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_forms() {
        assert_eq!("mon".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("Friday".parse::<Day>().unwrap(), Day::Friday);
        assert_eq!(" THU ".parse::<Day>().unwrap(), Day::Thursday);
        assert_eq!("funday".parse::<Day>(), Err(UnknownDay("funday".into())));
    }

    #[test]
    fn test_day_display() {
        assert_eq!(Day::Wednesday.to_string(), "Wednesday");
        assert_eq!(Day::WEEKDAYS.len(), 5);
    }

    #[test]
    fn test_day_serde_lowercase() {
        let json = serde_json::to_string(&Day::Tuesday).unwrap();
        assert_eq!(json, "\"tuesday\"");
        let back: Day = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Day::Tuesday);
    }
}
