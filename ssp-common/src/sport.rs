//! Sports supported by the upstream endpoints

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sport identifier, used both as an API path segment and as the
/// innermost directory of a partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Basketball,
    Football,
}

impl Sport {
    pub const ALL: [Sport; 2] = [Sport::Basketball, Sport::Football];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Basketball => "basketball",
            Sport::Football => "football",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::ALL
            .into_iter()
            .find(|sport| sport.as_str() == s)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "you need to specify a valid sport (basketball, football), got {:?}",
                    s
                ))
            })
    }
}
