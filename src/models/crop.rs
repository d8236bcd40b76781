use serde::Serialize;

/// Base yield used when neither the variety nor the crop is known (quintals/ha).
pub const DEFAULT_BASE_YIELD: f64 = 25.0;

/// A released crop variety with its base yield potential.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropVariety {
    pub crop_name: &'static str,
    pub variety_id: &'static str,
    /// Yield potential under average management, quintals per hectare
    pub base_yield_quintals_per_hectare: f64,
}

const fn variety(crop_name: &'static str, variety_id: &'static str, base: f64) -> CropVariety {
    CropVariety {
        crop_name,
        variety_id,
        base_yield_quintals_per_hectare: base,
    }
}

const VARIETIES: &[CropVariety] = &[
    variety("rice", "IR36", 55.0),
    variety("rice", "Swarna", 52.0),
    variety("rice", "Pusa Basmati 1121", 45.0),
    variety("wheat", "HD2967", 50.0),
    variety("wheat", "PBW343", 48.0),
    variety("wheat", "Lok-1", 42.0),
    variety("cotton", "RCH-2 Bt", 22.0),
    variety("sugarcane", "Co 86032", 850.0),
    variety("maize", "DHM 117", 60.0),
    variety("soybean", "JS 335", 25.0),
    variety("mustard", "Pusa Bold", 18.0),
    variety("groundnut", "GG 20", 22.0),
    variety("chickpea", "Pusa 256", 20.0),
    variety("bajra", "HHB 67", 24.0),
];

/// Crop-level averages used when the variety is not listed.
const CROP_BASE_YIELDS: &[(&str, f64)] = &[
    ("rice", 45.0),
    ("wheat", 40.0),
    ("cotton", 20.0),
    ("sugarcane", 700.0),
    ("maize", 50.0),
    ("soybean", 22.0),
    ("mustard", 15.0),
    ("groundnut", 20.0),
    ("chickpea", 18.0),
    ("bajra", 22.0),
];

/// Which table tier produced a base yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BaseYieldSource {
    Variety,
    Crop,
    Default,
}

/// Look up a variety by its identifier, ignoring case.
pub fn find_variety(variety_id: &str) -> Option<&'static CropVariety> {
    let key = variety_id.trim();
    VARIETIES
        .iter()
        .find(|v| v.variety_id.eq_ignore_ascii_case(key))
}

/// All varieties listed for a crop.
pub fn varieties_of(crop: &str) -> Vec<&'static CropVariety> {
    let key = crop.trim();
    VARIETIES
        .iter()
        .filter(|v| v.crop_name.eq_ignore_ascii_case(key))
        .collect()
}

/// Resolve the base yield: variety, then crop, then [`DEFAULT_BASE_YIELD`].
///
/// Always produces a value.
pub fn resolve_base_yield(crop: &str, variety_id: &str) -> (f64, BaseYieldSource) {
    if let Some(v) = find_variety(variety_id) {
        return (v.base_yield_quintals_per_hectare, BaseYieldSource::Variety);
    }
    let key = crop.trim();
    if let Some((_, base)) = CROP_BASE_YIELDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
    {
        return (*base, BaseYieldSource::Crop);
    }
    (DEFAULT_BASE_YIELD, BaseYieldSource::Default)
}

/// Base yield in quintals per hectare.
pub fn base_yield(crop: &str, variety_id: &str) -> f64 {
    resolve_base_yield(crop, variety_id).0
}
