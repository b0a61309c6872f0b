use serde::{Deserialize, Serialize};

use crate::sector::Sector;

pub const MIN_PERCENT: f64 = 0.0;
pub const MAX_PERCENT: f64 = 100.0;
pub const TARGET_TOTAL: f64 = 100.0;
/// Tolerance used by the client-side submit gate and auto-balance.
pub const BALANCE_TOLERANCE: f64 = 0.1;

/// Percent of a nation's population assigned to each sector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AllocationVector {
    #[serde(default)]
    pub agriculture: f64,
    #[serde(default)]
    pub industry: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub research: f64,
    #[serde(default)]
    pub military: f64,
}

impl AllocationVector {
    pub const fn new(
        agriculture: f64,
        industry: f64,
        energy: f64,
        research: f64,
        military: f64,
    ) -> Self {
        Self {
            agriculture,
            industry,
            energy,
            research,
            military,
        }
    }

    /// Distribution a nation starts with before the player submits anything.
    pub const fn nation_default() -> Self {
        Self::new(30.0, 30.0, 15.0, 10.0, 15.0)
    }

    pub fn get(&self, sector: Sector) -> f64 {
        match sector {
            Sector::Agriculture => self.agriculture,
            Sector::Industry => self.industry,
            Sector::Energy => self.energy,
            Sector::Research => self.research,
            Sector::Military => self.military,
        }
    }

    /// Stores `value` after clamping it into `[0, 100]`.
    pub fn set(&mut self, sector: Sector, value: f64) {
        let slot = match sector {
            Sector::Agriculture => &mut self.agriculture,
            Sector::Industry => &mut self.industry,
            Sector::Energy => &mut self.energy,
            Sector::Research => &mut self.research,
            Sector::Military => &mut self.military,
        };
        *slot = clamp_percent(value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sector, f64)> + '_ {
        Sector::ALL.into_iter().map(|sector| (sector, self.get(sector)))
    }

    pub fn total(&self) -> f64 {
        self.agriculture + self.industry + self.energy + self.research + self.military
    }

    pub fn is_balanced(&self) -> bool {
        (self.total() - TARGET_TOTAL).abs() < BALANCE_TOLERANCE
    }

    /// Largest field, ties resolved toward the earliest declared sector.
    pub fn largest_sector(&self) -> Sector {
        let mut best = Sector::Agriculture;
        for sector in Sector::ALL {
            if self.get(sector) > self.get(best) {
                best = sector;
            }
        }
        best
    }
}

/// Clamp into `[0, 100]`; NaN and infinities count as missing input (0).
pub fn clamp_percent(value: f64) -> f64 {
    if !value.is_finite() {
        return MIN_PERCENT;
    }
    value.clamp(MIN_PERCENT, MAX_PERCENT)
}

/// Parse direct-entry text the way the numeric inputs do: unparseable is 0.
pub fn parse_percent(text: &str) -> f64 {
    text.trim().parse::<f64>().map(clamp_percent).unwrap_or(MIN_PERCENT)
}

/// One-decimal label used by the numeric inputs and value badges.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::{AllocationVector, clamp_percent, format_percent, parse_percent};
    use crate::sector::Sector;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    #[test]
    fn clamp_percent_bounds_any_real_input() {
        for raw in [-1e12, -0.5, 0.0, 42.25, 100.0, 100.01, 1e300] {
            let v = clamp_percent(raw);
            assert!((0.0..=100.0).contains(&v), "{raw} -> {v}");
        }
        assert_close(clamp_percent(f64::NAN), 0.0);
        assert_close(clamp_percent(f64::INFINITY), 0.0);
    }

    #[test]
    fn parse_percent_treats_garbage_as_zero() {
        assert_close(parse_percent("abc"), 0.0);
        assert_close(parse_percent(""), 0.0);
        assert_close(parse_percent(" 37.5 "), 37.5);
        assert_close(parse_percent("250"), 100.0);
    }

    #[test]
    fn largest_sector_breaks_ties_by_declaration_order() {
        let v = AllocationVector::new(10.0, 30.0, 30.0, 20.0, 10.0);
        assert_eq!(v.largest_sector(), Sector::Industry);

        let flat = AllocationVector::new(20.0, 20.0, 20.0, 20.0, 20.0);
        assert_eq!(flat.largest_sector(), Sector::Agriculture);
    }

    #[test]
    fn nation_default_is_balanced() {
        let v = AllocationVector::nation_default();
        assert_close(v.total(), 100.0);
        assert!(v.is_balanced());
    }

    #[test]
    fn format_percent_uses_one_decimal() {
        assert_eq!(format_percent(12.0), "12.0");
        assert_eq!(format_percent(33.333), "33.3");
    }

    #[test]
    fn serializes_with_sector_keys() {
        let v = AllocationVector::new(30.0, 40.0, 20.0, 5.0, 5.0);
        let json = serde_json::to_value(v).expect("serialize allocation");
        assert_eq!(json["industry"], 40.0);
        assert_eq!(json["military"], 5.0);
    }

    #[test]
    fn missing_sectors_deserialize_as_zero() {
        let v: AllocationVector =
            serde_json::from_str(r#"{"agriculture": 100}"#).expect("parse allocation");
        assert_eq!(v, AllocationVector::new(100.0, 0.0, 0.0, 0.0, 0.0));
    }
}
