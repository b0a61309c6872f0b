use serde::{Deserialize, Serialize};

use crate::allocation::{AllocationVector, TARGET_TOTAL, format_percent, parse_percent};
use crate::consumption::ConsumptionSnapshot;
use crate::optimize;
use crate::preset::{Preset, UnknownPreset};
use crate::production::ProductionEstimate;
use crate::sector::Sector;

/// Increment/decrement button size.
pub const STEP_PERCENT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Increase,
    Decrease,
}

/// Everything the population form displays for a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationView {
    pub allocation: AllocationVector,
    pub total: f64,
    pub balanced: bool,
    /// One-decimal labels in sector declaration order.
    pub labels: [String; 5],
    pub production: ProductionEstimate,
}

/// Derive the display state for `allocation`. Pure.
pub fn recompute(allocation: &AllocationVector) -> AllocationView {
    AllocationView {
        allocation: *allocation,
        total: allocation.total(),
        balanced: allocation.is_balanced(),
        labels: Sector::ALL.map(|sector| format_percent(allocation.get(sector))),
        production: ProductionEstimate::from_allocation(allocation),
    }
}

/// Result of pressing submit on the population form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmitOutcome {
    Accepted(AllocationVector),
    /// The player declined the auto-balance prompt.
    Declined { total: f64 },
    /// Auto-balance ran but the chosen field had no headroom left.
    StillUnbalanced { total: f64 },
}

/// Working copy of one nation's population split, owned by the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopulationAllocator {
    allocation: AllocationVector,
    last_modified: Option<Sector>,
}

impl PopulationAllocator {
    pub fn new(allocation: AllocationVector) -> Self {
        let mut clamped = AllocationVector::default();
        for (sector, value) in allocation.iter() {
            clamped.set(sector, value);
        }
        Self {
            allocation: clamped,
            last_modified: None,
        }
    }

    pub fn allocation(&self) -> &AllocationVector {
        &self.allocation
    }

    pub fn last_modified(&self) -> Option<Sector> {
        self.last_modified
    }

    pub fn total(&self) -> f64 {
        self.allocation.total()
    }

    pub fn view(&self) -> AllocationView {
        recompute(&self.allocation)
    }

    pub fn set_field(&mut self, sector: Sector, value: f64) -> AllocationView {
        self.allocation.set(sector, value);
        self.last_modified = Some(sector);
        self.view()
    }

    /// Direct numeric entry; text that does not parse counts as 0.
    pub fn set_field_raw(&mut self, sector: Sector, text: &str) -> AllocationView {
        self.set_field(sector, parse_percent(text))
    }

    pub fn step(&mut self, sector: Sector, direction: StepDirection) -> AllocationView {
        let delta = match direction {
            StepDirection::Increase => STEP_PERCENT,
            StepDirection::Decrease => -STEP_PERCENT,
        };
        self.set_field(sector, self.allocation.get(sector) + delta)
    }

    /// Push the total toward 100 by moving a single field.
    ///
    /// The field is the last one the player touched, or else the largest. When
    /// that field runs into 0 or 100 the total stays off; the return value is
    /// whether the vector ended up balanced.
    pub fn auto_balance(&mut self) -> bool {
        if self.allocation.is_balanced() {
            return true;
        }
        let difference = TARGET_TOTAL - self.allocation.total();

        let target = self
            .last_modified
            .unwrap_or_else(|| self.allocation.largest_sector());
        let current = self.allocation.get(target);
        self.allocation.set(target, current + difference);
        self.allocation.is_balanced()
    }

    /// Replace the split with a suggestion derived from current consumption.
    pub fn optimize(&mut self, consumption: &ConsumptionSnapshot) -> AllocationView {
        self.allocation = optimize::suggest(consumption);
        self.view()
    }

    pub fn apply_preset(&mut self, preset: Preset) -> AllocationView {
        self.allocation = preset.allocation();
        self.view()
    }

    pub fn apply_preset_named(&mut self, name: &str) -> Result<AllocationView, UnknownPreset> {
        let preset = name.parse::<Preset>()?;
        Ok(self.apply_preset(preset))
    }

    /// Client-side submit gate.
    ///
    /// `confirm` is shown the current total and decides whether to auto-balance.
    /// There is no retry: one balance attempt, then accept or block.
    pub fn submit<F>(&mut self, confirm: F) -> SubmitOutcome
    where
        F: FnOnce(f64) -> bool,
    {
        if self.allocation.is_balanced() {
            return SubmitOutcome::Accepted(self.allocation);
        }

        let total = self.allocation.total();
        if !confirm(total) {
            return SubmitOutcome::Declined { total };
        }

        if self.auto_balance() {
            SubmitOutcome::Accepted(self.allocation)
        } else {
            SubmitOutcome::StillUnbalanced {
                total: self.allocation.total(),
            }
        }
    }
}
