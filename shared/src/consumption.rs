use serde::{Deserialize, Serialize};

/// Current per-tick resource draw of a nation, as rendered by the server.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsumptionSnapshot {
    #[serde(default)]
    pub food: f64,
    #[serde(default)]
    pub raw_materials: f64,
    #[serde(default)]
    pub energy: f64,
}

impl ConsumptionSnapshot {
    /// Negative or non-finite figures are treated as unknown (0).
    pub fn new(food: f64, raw_materials: f64, energy: f64) -> Self {
        Self {
            food: non_negative(food),
            raw_materials: non_negative(raw_materials),
            energy: non_negative(energy),
        }
    }

    pub fn nation_default() -> Self {
        Self::new(50.0, 50.0, 50.0)
    }

    /// Re-apply the constructor rules to a value that came in over the wire.
    pub fn sanitized(self) -> Self {
        Self::new(self.food, self.raw_materials, self.energy)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
