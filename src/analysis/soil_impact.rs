//! Multiplicative soil impact factor.
//!
//! Every threshold lives here once; the yield factor descriptions and the
//! crop recommender both call these functions so labels can never drift
//! from the numbers.

use crate::models::{region_multiplier, SoilType};

fn soil_type_factor(soil: SoilType) -> f64 {
    match soil {
        SoilType::Black => 1.18,
        SoilType::Red => 0.95,
        SoilType::Alluvial => 1.2,
        SoilType::Usar | SoilType::Calcareous => 0.75,
        SoilType::Laterite => 0.8,
        SoilType::Loam => 1.0,
    }
}

pub const PH_OPTIMAL_MIN: f64 = 6.0;
pub const PH_OPTIMAL_MAX: f64 = 7.5;
/// Exclusive bounds of the nitrogen bonus band, kg/ha.
pub const NITROGEN_BONUS_MIN: f64 = 300.0;
pub const NITROGEN_BONUS_MAX: f64 = 400.0;
pub const PHOSPHORUS_BONUS_ABOVE: f64 = 15.0;
pub const POTASSIUM_BONUS_ABOVE: f64 = 210.0;

/// Multiplier for a free-text soil description, resolved through
/// [`SoilType::from_description`]. Unknown soils are neutral.
pub fn soil_type_multiplier(soil_type: &str) -> f64 {
    SoilType::from_description(soil_type)
        .map(soil_type_factor)
        .unwrap_or(1.0)
}

pub fn ph_in_optimal_range(ph: f64) -> bool {
    (PH_OPTIMAL_MIN..=PH_OPTIMAL_MAX).contains(&ph)
}

pub fn nitrogen_in_bonus_band(nitrogen: f64) -> bool {
    nitrogen > NITROGEN_BONUS_MIN && nitrogen < NITROGEN_BONUS_MAX
}

pub fn ph_multiplier(ph: f64) -> f64 {
    if ph_in_optimal_range(ph) {
        1.05
    } else {
        0.95
    }
}

pub fn nitrogen_multiplier(nitrogen: f64) -> f64 {
    if nitrogen_in_bonus_band(nitrogen) {
        1.05
    } else {
        0.97
    }
}

pub fn phosphorus_multiplier(phosphorus: f64) -> f64 {
    if phosphorus > PHOSPHORUS_BONUS_ABOVE {
        1.03
    } else {
        0.98
    }
}

pub fn potassium_multiplier(potassium: f64) -> f64 {
    if potassium > POTASSIUM_BONUS_ABOVE {
        1.03
    } else {
        0.97
    }
}

/// Combined soil and region factor applied to base yield, typically 0.6-1.3.
pub fn compute_soil_impact(
    soil_type: &str,
    region: &str,
    ph: f64,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
) -> f64 {
    let factor = 1.0
        * soil_type_multiplier(soil_type)
        * ph_multiplier(ph)
        * nitrogen_multiplier(nitrogen)
        * phosphorus_multiplier(phosphorus)
        * potassium_multiplier(potassium)
        * region_multiplier(region);
    tracing::trace!(soil_type, region, factor, "soil impact");
    factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_soil_type_keywords() {
        assert_approx_eq!(soil_type_multiplier("black"), 1.18, 1e-12);
        assert_approx_eq!(soil_type_multiplier("red"), 0.95, 1e-12);
        assert_approx_eq!(soil_type_multiplier("alluvial"), 1.2, 1e-12);
        assert_approx_eq!(soil_type_multiplier("usar"), 0.75, 1e-12);
        assert_approx_eq!(soil_type_multiplier("calcareous"), 0.75, 1e-12);
        assert_approx_eq!(soil_type_multiplier("laterite"), 0.8, 1e-12);
        assert_approx_eq!(soil_type_multiplier("loam"), 1.0, 1e-12);
    }

    #[test]
    fn test_soil_type_substring_case_insensitive() {
        assert_approx_eq!(soil_type_multiplier("Deep Black Cotton Soil"), 1.18, 1e-12);
        assert_approx_eq!(soil_type_multiplier("ALLUVIAL (Indo-Gangetic)"), 1.2, 1e-12);
    }

    #[test]
    fn test_soil_type_first_match_wins() {
        // "red laterite" hits "red" before "laterite"
        assert_approx_eq!(soil_type_multiplier("red laterite"), 0.95, 1e-12);
        // "black" is checked before "alluvial"
        assert_approx_eq!(soil_type_multiplier("black alluvial"), 1.18, 1e-12);
        // alluvial outranks calcareous
        assert_approx_eq!(soil_type_multiplier("calcareous alluvial"), 1.2, 1e-12);
        // calcareous outranks laterite
        assert_approx_eq!(soil_type_multiplier("calcareous laterite"), 0.75, 1e-12);
    }

    #[test]
    fn test_multiplier_agrees_with_detected_type() {
        for description in ["black alluvial", "red laterite", "usar calcareous", "calcareous laterite"] {
            let detected = SoilType::from_description(description).unwrap();
            assert_approx_eq!(
                soil_type_multiplier(description),
                soil_type_multiplier(detected.as_str()),
                1e-12
            );
        }
    }

    #[test]
    fn test_unknown_soil_is_neutral() {
        assert_eq!(soil_type_multiplier("volcanic ash"), 1.0);
        assert_eq!(soil_type_multiplier(""), 1.0);
    }

    #[test]
    fn test_ph_bounds_inclusive() {
        assert_eq!(ph_multiplier(6.0), 1.05);
        assert_eq!(ph_multiplier(7.5), 1.05);
        assert_eq!(ph_multiplier(5.99), 0.95);
        assert_eq!(ph_multiplier(7.51), 0.95);
    }

    #[test]
    fn test_nitrogen_bounds_exclusive() {
        assert_eq!(nitrogen_multiplier(300.0), 0.97);
        assert_eq!(nitrogen_multiplier(300.5), 1.05);
        assert_eq!(nitrogen_multiplier(399.0), 1.05);
        assert_eq!(nitrogen_multiplier(400.0), 0.97);
    }

    #[test]
    fn test_phosphorus_and_potassium_thresholds() {
        assert_eq!(phosphorus_multiplier(15.0), 0.98);
        assert_eq!(phosphorus_multiplier(16.0), 1.03);
        assert_eq!(potassium_multiplier(210.0), 0.97);
        assert_eq!(potassium_multiplier(211.0), 1.03);
    }

    #[test]
    fn test_reference_scenario() {
        let impact = compute_soil_impact("alluvial", "Punjab", 6.5, 340.0, 18.0, 210.0);
        assert_approx_eq!(impact, 1.2 * 1.05 * 1.05 * 1.03 * 0.97 * 1.15, 1e-12);
    }

    #[test]
    fn test_ph_and_nitrogen_bonus_ratio() {
        let bonus = compute_soil_impact("loam", "Nowhere", 6.8, 350.0, 20.0, 250.0);
        let plain = compute_soil_impact("loam", "Nowhere", 8.2, 450.0, 20.0, 250.0);
        assert_approx_eq!(bonus / plain, (1.05 / 0.95) * (1.05 / 0.97), 1e-12);
    }

    #[test]
    fn test_all_neutral_inputs() {
        // unknown soil + unknown region leaves only the chemistry multipliers
        let impact = compute_soil_impact("?", "?", 7.0, 350.0, 20.0, 250.0);
        assert_approx_eq!(impact, 1.05 * 1.05 * 1.03 * 1.03, 1e-12);
    }
}
