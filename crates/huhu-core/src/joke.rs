use crate::error::CoreError;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage-assigned identifier of a [`Joke`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JokeId(i64);

impl JokeId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for JokeId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for JokeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JokeId {
    type Err = CoreError;

    /// Parses a base-10 integer, as found in a request path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|e| CoreError::InvalidJokeId(format!("'{s}': {e}")))
    }
}

/// A stored joke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: JokeId,
    /// The joke body. Never empty once persisted.
    #[serde(rename = "joke")]
    pub text: String,
    /// Set once, when the record is created.
    pub created_at: Timestamp,
    /// Refreshed on every successful update; never earlier than `created_at`.
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_joke_id() {
        assert_eq!("42".parse::<JokeId>().unwrap(), JokeId::new(42));
        assert_eq!("-3".parse::<JokeId>().unwrap().get(), -3);
    }

    #[test]
    fn parse_rejects_non_integer() {
        for input in ["abc", "", "1.5", "12a", " 7"] {
            let err = input.parse::<JokeId>().unwrap_err();
            assert!(matches!(err, CoreError::InvalidJokeId(_)), "{input}");
        }
    }

    #[test]
    fn serializes_with_wire_names() {
        let ts: Timestamp = "2024-05-01T12:00:00Z".parse().unwrap();
        let joke = Joke {
            id: JokeId::new(7),
            text: "knock knock".to_string(),
            created_at: ts,
            updated_at: ts,
        };

        let value = serde_json::to_value(&joke).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["joke"], "knock knock");
        assert_eq!(value["created_at"], "2024-05-01T12:00:00Z");
        assert_eq!(value["updated_at"], "2024-05-01T12:00:00Z");
        assert!(value.get("text").is_none());
    }
}
