//! Needs-based population suggestion.
//!
//! This is a user-facing heuristic, not a constraint solver. The output covers
//! current consumption with a 20% margin under the fixed production model and
//! is only forced to total 100 when the raw needs overflow.

use crate::allocation::AllocationVector;
use crate::consumption::ConsumptionSnapshot;
use crate::production::RESOURCE_UNITS_PER_PERCENT;

/// Headroom over current consumption.
pub const SAFETY_MARGIN: f64 = 1.2;
/// Every sector gets at least this share, even with zero consumption.
pub const SECTOR_FLOOR: i64 = 15;
/// Reconciliation never takes research or agriculture below this.
pub const RECONCILE_FLOOR: i64 = 5;

const TOTAL: i64 = 100;
/// Any need at or above this already forces scaling; larger needs are capped
/// so the integer sum cannot overflow.
const NEED_CAP: i64 = TOTAL * 100;

/// Integer shares in sector declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shares {
    agriculture: i64,
    industry: i64,
    energy: i64,
    research: i64,
    military: i64,
}

impl Shares {
    fn sum(&self) -> i64 {
        self.agriculture + self.industry + self.energy + self.research + self.military
    }

    fn scaled(self, scale: f64) -> Self {
        let apply = |v: i64| (v as f64 * scale).round() as i64;
        Self {
            agriculture: apply(self.agriculture),
            industry: apply(self.industry),
            energy: apply(self.energy),
            research: apply(self.research),
            military: apply(self.military),
        }
    }

    fn into_allocation(self) -> AllocationVector {
        AllocationVector::new(
            self.agriculture as f64,
            self.industry as f64,
            self.energy as f64,
            self.research as f64,
            self.military as f64,
        )
    }
}

/// Percent of population needed to produce `consumption` with the safety margin.
pub fn sector_need(consumption: f64) -> i64 {
    let raw = (consumption * SAFETY_MARGIN / RESOURCE_UNITS_PER_PERCENT).ceil();
    if raw.is_finite() {
        (raw.min(NEED_CAP as f64) as i64).max(SECTOR_FLOOR)
    } else {
        SECTOR_FLOOR
    }
}

/// Suggest a distribution for the given consumption figures.
pub fn suggest(consumption: &ConsumptionSnapshot) -> AllocationVector {
    let needs = Shares {
        agriculture: sector_need(consumption.food),
        industry: sector_need(consumption.raw_materials),
        energy: sector_need(consumption.energy),
        research: SECTOR_FLOOR,
        military: SECTOR_FLOOR,
    };

    let sum = needs.sum();
    if sum <= TOTAL {
        return needs.into_allocation();
    }

    let mut shares = needs.scaled(TOTAL as f64 / sum as f64);
    reconcile(&mut shares);
    shares.into_allocation()
}

/// Absorb the rounding residual so the shares total exactly 100.
///
/// A shortfall goes to research. An excess is taken from research down to
/// [`RECONCILE_FLOOR`], then agriculture down to the same floor, then military.
fn reconcile(shares: &mut Shares) {
    let residual = TOTAL - shares.sum();
    if residual >= 0 {
        shares.research += residual;
        return;
    }

    let mut excess = -residual;
    for slot in [&mut shares.research, &mut shares.agriculture] {
        let available = (*slot - RECONCILE_FLOOR).max(0);
        let taken = available.min(excess);
        *slot -= taken;
        excess -= taken;
        if excess == 0 {
            return;
        }
    }
    shares.military = (shares.military - excess).max(0);
}
