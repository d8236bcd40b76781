use crate::error::AdvisorError;
use crate::models::{
    region_multiplier, resolve_base_yield, Impact, YieldEstimate, YieldFactor, YieldRequest,
};

use super::soil_impact::{
    compute_soil_impact, nitrogen_in_bonus_band, ph_in_optimal_range, soil_type_multiplier,
    NITROGEN_BONUS_MAX, NITROGEN_BONUS_MIN, PH_OPTIMAL_MAX, PH_OPTIMAL_MIN,
};
use super::variability::Variability;

/// Width of the reported yield range on either side of the expectation.
pub const YIELD_RANGE_FRACTION: f64 = 0.08;

pub const HIGH_CONFIDENCE: u8 = 94;
pub const BASE_CONFIDENCE: u8 = 81;

/// Confidence in an estimate: high when both pH and nitrogen sit in their bonus bands.
///
/// Deliberately binary; a continuous score could replace this without
/// touching callers.
pub fn confidence_percent(ph: f64, nitrogen: f64) -> u8 {
    if ph_in_optimal_range(ph) && nitrogen_in_bonus_band(nitrogen) {
        HIGH_CONFIDENCE
    } else {
        BASE_CONFIDENCE
    }
}

/// Predict the yield of `request.crop` over the whole field.
///
/// `expected = base_yield × soil_impact × area × variability`, with the range
/// at ±8% of the expectation. The variability source is injected so that
/// callers control whether repeated calls agree.
///
/// # Errors
///
/// [`AdvisorError::InvalidArea`] when the area is not a positive finite number.
pub fn predict_yield<V: Variability + ?Sized>(
    request: &YieldRequest,
    variability: &mut V,
) -> Result<YieldEstimate, AdvisorError> {
    let area = request.area_hectares;
    if !area.is_finite() || area <= 0.0 {
        return Err(AdvisorError::InvalidArea(area));
    }

    let (base, source) = resolve_base_yield(&request.crop, &request.variety);
    let soil_impact = compute_soil_impact(
        &request.soil_type,
        &request.region,
        request.ph,
        request.nitrogen,
        request.phosphorus,
        request.potassium,
    );
    let random_factor = variability.factor();

    let expected_yield = base * soil_impact * area * random_factor;
    tracing::debug!(
        crop = %request.crop,
        variety = %request.variety,
        base,
        ?source,
        soil_impact,
        random_factor,
        expected_yield,
        "yield predicted"
    );

    Ok(YieldEstimate {
        expected_yield,
        yield_range_min: expected_yield * (1.0 - YIELD_RANGE_FRACTION),
        yield_range_max: expected_yield * (1.0 + YIELD_RANGE_FRACTION),
        confidence_percent: confidence_percent(request.ph, request.nitrogen),
        factors: describe_factors(request),
    })
}

/// Human-readable contributions, in display order: soil type, pH, nitrogen, region.
pub fn describe_factors(request: &YieldRequest) -> Vec<YieldFactor> {
    vec![
        soil_type_factor(&request.soil_type),
        ph_factor(request.ph),
        nitrogen_factor(request.nitrogen),
        region_factor_description(&request.region),
    ]
}

fn impact_of_multiplier(multiplier: f64) -> Impact {
    if multiplier > 1.0 {
        Impact::Positive
    } else if multiplier < 1.0 {
        Impact::Negative
    } else {
        Impact::Neutral
    }
}

fn soil_type_factor(soil_type: &str) -> YieldFactor {
    let impact = impact_of_multiplier(soil_type_multiplier(soil_type));
    let recommendation = match impact {
        Impact::Positive => format!("{soil_type} soil is well suited; maintain organic matter"),
        Impact::Negative => {
            format!("{soil_type} soil limits yield; add compost and consider soil amendments")
        }
        _ => "Standard soil management practices apply".to_string(),
    };
    YieldFactor {
        name: "Soil Type".to_string(),
        impact,
        recommendation,
    }
}

fn ph_factor(ph: f64) -> YieldFactor {
    let (impact, recommendation) = if ph_in_optimal_range(ph) {
        (
            Impact::Positive,
            format!("pH {ph:.1} is within the optimal {PH_OPTIMAL_MIN}-{PH_OPTIMAL_MAX} range"),
        )
    } else if ph < PH_OPTIMAL_MIN {
        (
            Impact::AdjustmentNeeded,
            format!("pH {ph:.1} is acidic; apply agricultural lime to raise it"),
        )
    } else {
        (
            Impact::AdjustmentNeeded,
            format!("pH {ph:.1} is alkaline; apply gypsum or sulphur to lower it"),
        )
    };
    YieldFactor {
        name: "Soil pH".to_string(),
        impact,
        recommendation,
    }
}

fn nitrogen_factor(nitrogen: f64) -> YieldFactor {
    let (impact, recommendation) = if nitrogen_in_bonus_band(nitrogen) {
        (
            Impact::Positive,
            "Nitrogen level is optimal; continue the current fertilizer schedule".to_string(),
        )
    } else if nitrogen <= NITROGEN_BONUS_MIN {
        (
            Impact::AdjustmentNeeded,
            format!("Nitrogen is low; apply urea or organic manure to exceed {NITROGEN_BONUS_MIN} kg/ha"),
        )
    } else {
        (
            Impact::Medium,
            format!("Nitrogen is above {NITROGEN_BONUS_MAX} kg/ha; reduce nitrogen application"),
        )
    };
    YieldFactor {
        name: "Nitrogen Level".to_string(),
        impact,
        recommendation,
    }
}

fn region_factor_description(region: &str) -> YieldFactor {
    let impact = impact_of_multiplier(region_multiplier(region));
    let recommendation = match impact {
        Impact::Positive => format!("Climate in {region} favours this crop"),
        Impact::Negative => {
            format!("Climate in {region} reduces yield; consider drought-tolerant varieties")
        }
        _ => "Follow local agricultural extension advice for your region".to_string(),
    };
    YieldFactor {
        name: "Regional Climate".to_string(),
        impact,
        recommendation,
    }
}
