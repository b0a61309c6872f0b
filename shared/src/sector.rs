use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the five economic sectors a nation's population is split across.
///
/// Declaration order matters: it is the tie-break order for auto-balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    Agriculture,
    Industry,
    Energy,
    Research,
    Military,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sector: {0}")]
pub struct UnknownSector(pub String);

impl Sector {
    pub const ALL: [Sector; 5] = [
        Self::Agriculture,
        Self::Industry,
        Self::Energy,
        Self::Research,
        Self::Military,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Agriculture => "agriculture",
            Self::Industry => "industry",
            Self::Energy => "energy",
            Self::Research => "research",
            Self::Military => "military",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = UnknownSector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|sector| sector.as_str() == normalized)
            .ok_or_else(|| UnknownSector(s.to_owned()))
    }
}
