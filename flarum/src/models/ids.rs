//! Type-safe ID wrappers.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flarum sends ids as strings in documents but accepts numbers in requests.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create a new ID.
            pub fn new(id: u64) -> Self {
                $name(id)
            }

            /// Get the numeric value.
            pub fn get(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                $name(n)
            }
        }

        impl From<u32> for $name {
            fn from(n: u32) -> Self {
                $name(u64::from(n))
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                match RawId::deserialize(deserializer)? {
                    RawId::Number(n) => Ok($name(n)),
                    RawId::Text(s) => s.parse().map_err(serde::de::Error::custom),
                }
            }
        }
    };
}

define_id!(DiscussionId, "A discussion identifier.");
define_id!(UserId, "A user identifier.");
define_id!(TagId, "A tag identifier.");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_creation() {
        let id = DiscussionId::new(12345);
        assert_eq!(id.get(), 12345);
        assert_eq!(format!("{}", id), "12345");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("42".parse::<UserId>().unwrap(), UserId(42));
        assert_eq!(" 7 ".parse::<TagId>().unwrap(), TagId(7));
        assert!("abc".parse::<UserId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_number() {
        assert_eq!(serde_json::to_value(TagId(3)).unwrap(), json!(3));
    }

    #[test]
    fn test_id_accepts_string_or_number() {
        let a: UserId = serde_json::from_value(json!("15")).unwrap();
        let b: UserId = serde_json::from_value(json!(15)).unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_value::<UserId>(json!("x")).is_err());
    }
}
