use serde::{Deserialize, Serialize};

use crate::allocation::AllocationVector;

/// Units per tick produced by 1% of population in a resource sector.
pub const RESOURCE_UNITS_PER_PERCENT: f64 = 10.0;
/// Technology per tick produced by 1% of population in research.
pub const TECHNOLOGY_UNITS_PER_PERCENT: f64 = 2.0;

/// Client-side preview of per-tick output for a distribution. Not authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductionEstimate {
    pub food: f64,
    pub raw_materials: f64,
    pub energy: f64,
    pub technology: f64,
}

impl ProductionEstimate {
    pub fn from_allocation(allocation: &AllocationVector) -> Self {
        Self {
            food: allocation.agriculture * RESOURCE_UNITS_PER_PERCENT,
            raw_materials: allocation.industry * RESOURCE_UNITS_PER_PERCENT,
            energy: allocation.energy * RESOURCE_UNITS_PER_PERCENT,
            technology: allocation.research * TECHNOLOGY_UNITS_PER_PERCENT,
        }
    }
}
