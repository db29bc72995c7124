//! Sentiment - Caller disposition derived from the call outcome

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller sentiment, derived deterministically from the call status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Satisfied,
    #[default]
    Neutral,
    Upset,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Satisfied => "satisfied",
            Sentiment::Neutral => "neutral",
            Sentiment::Upset => "upset",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "satisfied" => Ok(Sentiment::Satisfied),
            "neutral" => Ok(Sentiment::Neutral),
            "upset" => Ok(Sentiment::Upset),
            _ => Err(format!("Unknown sentiment: {}", s)),
        }
    }
}
