use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::allocation::AllocationVector;

/// Named one-click distributions offered next to the sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Balanced,
    Economic,
    Military,
    Technological,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preset: {0}")]
pub struct UnknownPreset(pub String);

impl Preset {
    pub const ALL: [Preset; 4] = [
        Self::Balanced,
        Self::Economic,
        Self::Military,
        Self::Technological,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Economic => "economic",
            Self::Military => "military",
            Self::Technological => "technological",
        }
    }

    pub fn allocation(self) -> AllocationVector {
        match self {
            Self::Balanced => AllocationVector::new(20.0, 20.0, 20.0, 20.0, 20.0),
            Self::Economic => AllocationVector::new(30.0, 40.0, 20.0, 5.0, 5.0),
            Self::Military => AllocationVector::new(20.0, 15.0, 15.0, 10.0, 40.0),
            Self::Technological => AllocationVector::new(15.0, 15.0, 20.0, 40.0, 10.0),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == normalized)
            .ok_or_else(|| UnknownPreset(s.to_owned()))
    }
}
