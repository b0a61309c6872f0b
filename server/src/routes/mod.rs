pub mod api;
pub mod population;
