use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const UNKNOWN: &str = "N/A";

/// A catalog score, or the "unknown" sentinel.
///
/// Persisted as a JSON number, or as the string `"N/A"` when unknown.
/// Anything other than a number reads back as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Score {
    Rated(f64),
    #[default]
    Unknown,
}

impl Score {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Rated(v) => Some(v),
            Self::Unknown => None,
        }
    }
}

impl From<Option<f64>> for Score {
    fn from(score: Option<f64>) -> Self {
        match score {
            Some(v) if v.is_finite() => Self::Rated(v),
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rated(v) => write!(f, "{v}"),
            Self::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Rated(v) => serializer.serialize_f64(*v),
            Self::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Other(IgnoredAny),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Number(v)) => Score::from(Some(v)),
            Some(Raw::Other(_)) | None => Score::Unknown,
        })
    }
}
