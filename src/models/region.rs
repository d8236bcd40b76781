use serde::Serialize;

/// Regional yield multiplier reflecting climate and irrigation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionFactor {
    pub region: &'static str,
    pub yield_multiplier: f64,
}

/// Multiplier applied to regions missing from the table.
pub const NEUTRAL_REGION_MULTIPLIER: f64 = 1.0;

const REGION_FACTORS: &[RegionFactor] = &[
    RegionFactor {
        region: "Punjab",
        yield_multiplier: 1.15,
    },
    RegionFactor {
        region: "Maharashtra",
        yield_multiplier: 0.92,
    },
    RegionFactor {
        region: "Karnataka",
        yield_multiplier: 0.97,
    },
    RegionFactor {
        region: "Uttar Pradesh",
        yield_multiplier: 1.05,
    },
];

/// Look up the region factor, if the region is in the table.
pub fn region_factor(region: &str) -> Option<&'static RegionFactor> {
    let key = region.trim();
    REGION_FACTORS
        .iter()
        .find(|f| f.region.eq_ignore_ascii_case(key))
}

/// Yield multiplier for a region; unknown regions are neutral.
pub fn region_multiplier(region: &str) -> f64 {
    region_factor(region)
        .map(|f| f.yield_multiplier)
        .unwrap_or(NEUTRAL_REGION_MULTIPLIER)
}
