mod crop;
mod estimate;
mod plan;
mod region;
mod season;
mod soil;

pub use crop::{
    base_yield, find_variety, resolve_base_yield, varieties_of, BaseYieldSource, CropVariety,
    DEFAULT_BASE_YIELD,
};
pub use estimate::{Impact, YieldEstimate, YieldFactor, YieldRequest};
pub use plan::{BatchResult, FieldPlan};
pub use region::{region_factor, region_multiplier, RegionFactor, NEUTRAL_REGION_MULTIPLIER};
pub use season::Season;
pub use soil::{default_soil_profile, profiled_regions, SoilSample, SoilType, DEFAULT_SOIL_REGION};
