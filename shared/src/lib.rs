pub mod allocation;
pub mod allocator;
pub mod consumption;
pub mod optimize;
pub mod preset;
pub mod production;
pub mod sector;
pub mod validation;

pub use allocation::{AllocationVector, BALANCE_TOLERANCE};
pub use allocator::{
    AllocationView, PopulationAllocator, StepDirection, SubmitOutcome, recompute,
};
pub use consumption::ConsumptionSnapshot;
pub use preset::{Preset, UnknownPreset};
pub use production::ProductionEstimate;
pub use sector::{Sector, UnknownSector};
pub use validation::{AllocationRejected, validate_submission};
