//! Country - Two-letter market code

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Market a call record belongs to, derived from the phone prefix
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash, ToSchema)]
pub enum Country {
    #[default]
    #[serde(rename = "ES")]
    Es,
    #[serde(rename = "PT")]
    Pt,
}

impl Country {
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Es => "ES",
            Country::Pt => "PT",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Country {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ES" => Ok(Country::Es),
            "PT" => Ok(Country::Pt),
            _ => Err(format!("Unknown country: {}", s)),
        }
    }
}
