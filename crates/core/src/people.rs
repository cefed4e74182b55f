//! People column entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a people entry is a single user or a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeopleKind {
    /// A single user
    Person,
    /// A team of users
    Team,
}

impl PeopleKind {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PeopleKind::Person => "person",
            PeopleKind::Team => "team",
        }
    }
}

impl fmt::Display for PeopleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeopleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "person" => Ok(PeopleKind::Person),
            "team" => Ok(PeopleKind::Team),
            other => Err(format!("unknown people kind: {}", other)),
        }
    }
}

/// A person or team assigned to a people column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonOrTeam {
    /// User or team identifier
    pub id: String,

    /// Entry kind
    pub kind: PeopleKind,
}

impl PersonOrTeam {
    /// Create an entry.
    pub fn new(id: impl Into<String>, kind: PeopleKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Create a person entry.
    pub fn person(id: impl Into<String>) -> Self {
        Self::new(id, PeopleKind::Person)
    }

    /// Create a team entry.
    pub fn team(id: impl Into<String>) -> Self {
        Self::new(id, PeopleKind::Team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        assert_eq!("person".parse::<PeopleKind>(), Ok(PeopleKind::Person));
        assert_eq!("team".parse::<PeopleKind>(), Ok(PeopleKind::Team));
        assert!("robot".parse::<PeopleKind>().is_err());
        assert_eq!(PeopleKind::Team.to_string(), "team");
    }

    #[test]
    fn test_person_and_team_constructors() {
        assert_eq!(PersonOrTeam::person("1").kind, PeopleKind::Person);
        assert_eq!(PersonOrTeam::team("2").kind, PeopleKind::Team);
        assert_ne!(PersonOrTeam::person("1"), PersonOrTeam::team("1"));
    }
}
