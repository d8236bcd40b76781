use serde::{Deserialize, Serialize};

use crate::models::{base_yield, region_multiplier, Season, SoilType};

use super::challenges::get_crop_challenges;
use super::soil_impact::soil_type_multiplier;

/// Default number of entries placed in the primary tier.
pub const DEFAULT_PRIMARY_COUNT: usize = 3;

const SOIL_MATCH_SCORE: f64 = 40.0;
const SOIL_UNKNOWN_SCORE: f64 = 20.0;
const SOIL_MISMATCH_SCORE: f64 = 10.0;
const SEASON_MATCH_SCORE: f64 = 35.0;
const REGION_MATCH_SCORE: f64 = 15.0;
/// Points per unit of soil-type multiplier above or below neutral.
const SOIL_QUALITY_WEIGHT: f64 = 50.0;

/// A crop + variety considered by the recommender.
struct Candidate {
    crop: &'static str,
    variety: &'static str,
    regions: &'static [&'static str],
    soils: &'static [SoilType],
    seasons: &'static [Season],
    growing_period: &'static str,
    water_requirement: &'static str,
    fertilizers: &'static str,
}

const CATALOG: &[Candidate] = &[
    Candidate {
        crop: "rice",
        variety: "IR36",
        regions: &["Punjab", "Uttar Pradesh", "West Bengal"],
        soils: &[SoilType::Alluvial, SoilType::Loam],
        seasons: &[Season::Kharif],
        growing_period: "110-120 days",
        water_requirement: "High (1200-1500 mm)",
        fertilizers: "NPK 120:60:40 kg/ha",
    },
    Candidate {
        crop: "rice",
        variety: "Swarna",
        regions: &["West Bengal", "Uttar Pradesh", "Karnataka"],
        soils: &[SoilType::Alluvial, SoilType::Laterite, SoilType::Loam],
        seasons: &[Season::Kharif],
        growing_period: "140-145 days",
        water_requirement: "High (1200-1500 mm)",
        fertilizers: "NPK 100:50:50 kg/ha",
    },
    Candidate {
        crop: "rice",
        variety: "Pusa Basmati 1121",
        regions: &["Punjab", "Uttar Pradesh"],
        soils: &[SoilType::Alluvial],
        seasons: &[Season::Kharif],
        growing_period: "140-150 days",
        water_requirement: "High (1100-1300 mm)",
        fertilizers: "NPK 90:40:40 kg/ha",
    },
    Candidate {
        crop: "wheat",
        variety: "HD2967",
        regions: &["Punjab", "Uttar Pradesh"],
        soils: &[SoilType::Alluvial, SoilType::Loam],
        seasons: &[Season::Rabi],
        growing_period: "140-145 days",
        water_requirement: "Medium (450-650 mm)",
        fertilizers: "NPK 150:60:40 kg/ha",
    },
    Candidate {
        crop: "wheat",
        variety: "Lok-1",
        regions: &["Maharashtra", "Karnataka"],
        soils: &[SoilType::Black, SoilType::Loam],
        seasons: &[Season::Rabi],
        growing_period: "105-110 days",
        water_requirement: "Medium (400-500 mm)",
        fertilizers: "NPK 100:50:50 kg/ha",
    },
    Candidate {
        crop: "cotton",
        variety: "RCH-2 Bt",
        regions: &["Maharashtra", "Punjab", "Karnataka"],
        soils: &[SoilType::Black, SoilType::Alluvial],
        seasons: &[Season::Kharif],
        growing_period: "160-180 days",
        water_requirement: "Medium (700-1000 mm)",
        fertilizers: "NPK 120:60:60 kg/ha",
    },
    Candidate {
        crop: "sugarcane",
        variety: "Co 86032",
        regions: &["Maharashtra", "Karnataka", "Uttar Pradesh"],
        soils: &[SoilType::Black, SoilType::Alluvial, SoilType::Loam],
        seasons: &[Season::Zaid, Season::Kharif],
        growing_period: "300-365 days",
        water_requirement: "Very high (1500-2500 mm)",
        fertilizers: "NPK 250:115:115 kg/ha",
    },
    Candidate {
        crop: "maize",
        variety: "DHM 117",
        regions: &["Karnataka", "Maharashtra", "Uttar Pradesh"],
        soils: &[SoilType::Red, SoilType::Alluvial, SoilType::Loam],
        seasons: &[Season::Kharif, Season::Rabi],
        growing_period: "90-110 days",
        water_requirement: "Medium (500-800 mm)",
        fertilizers: "NPK 150:75:40 kg/ha",
    },
    Candidate {
        crop: "soybean",
        variety: "JS 335",
        regions: &["Maharashtra"],
        soils: &[SoilType::Black],
        seasons: &[Season::Kharif],
        growing_period: "95-100 days",
        water_requirement: "Medium (450-700 mm)",
        fertilizers: "NPK 30:60:30 kg/ha",
    },
    Candidate {
        crop: "mustard",
        variety: "Pusa Bold",
        regions: &["Uttar Pradesh", "Punjab"],
        soils: &[SoilType::Alluvial, SoilType::Loam, SoilType::Calcareous],
        seasons: &[Season::Rabi],
        growing_period: "125-130 days",
        water_requirement: "Low (250-400 mm)",
        fertilizers: "NPK 80:40:40 kg/ha",
    },
    Candidate {
        crop: "groundnut",
        variety: "GG 20",
        regions: &["Karnataka", "Maharashtra"],
        soils: &[SoilType::Red, SoilType::Loam, SoilType::Laterite],
        seasons: &[Season::Kharif, Season::Zaid],
        growing_period: "100-120 days",
        water_requirement: "Medium (500-700 mm)",
        fertilizers: "NPK 20:40:40 kg/ha + gypsum",
    },
    Candidate {
        crop: "chickpea",
        variety: "Pusa 256",
        regions: &["Maharashtra", "Uttar Pradesh", "Karnataka"],
        soils: &[SoilType::Black, SoilType::Loam],
        seasons: &[Season::Rabi],
        growing_period: "130-140 days",
        water_requirement: "Low (250-350 mm)",
        fertilizers: "NPK 20:50:20 kg/ha",
    },
    Candidate {
        crop: "bajra",
        variety: "HHB 67",
        regions: &["Maharashtra", "Karnataka"],
        soils: &[SoilType::Calcareous, SoilType::Red, SoilType::Usar],
        seasons: &[Season::Kharif, Season::Zaid],
        growing_period: "62-65 days",
        water_requirement: "Low (250-350 mm)",
        fertilizers: "NPK 60:30:0 kg/ha",
    },
];

/// One ranked crop suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendation {
    pub crop: String,
    pub variety: String,
    /// 0-100
    pub suitability_percent: u8,
    /// Expected quintals per hectare before field chemistry is known
    pub yield_estimate: f64,
    pub growing_period: String,
    pub water_requirement: String,
    pub fertilizers: String,
    pub challenges: Vec<String>,
}

/// Ranked suggestions split into a primary tier and alternatives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRecommendations {
    pub primary: Vec<CropRecommendation>,
    pub alternatives: Vec<CropRecommendation>,
}

impl CropRecommendations {
    pub fn len(&self) -> usize {
        self.primary.len() + self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.alternatives.is_empty()
    }

    /// Primary then alternatives, in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &CropRecommendation> {
        self.primary.iter().chain(self.alternatives.iter())
    }
}

fn suitability(
    candidate: &Candidate,
    soil: Option<SoilType>,
    soil_type: &str,
    season: Season,
    region_listed: bool,
) -> u8 {
    let soil_score = match soil {
        Some(s) if candidate.soils.contains(&s) => SOIL_MATCH_SCORE,
        Some(_) => SOIL_MISMATCH_SCORE,
        None => SOIL_UNKNOWN_SCORE,
    };
    let season_score = if candidate.seasons.contains(&season) {
        SEASON_MATCH_SCORE
    } else {
        0.0
    };
    let region_score = if region_listed { REGION_MATCH_SCORE } else { 0.0 };
    let quality = (soil_type_multiplier(soil_type) - 1.0) * SOIL_QUALITY_WEIGHT;

    (soil_score + season_score + region_score + quality)
        .round()
        .clamp(0.0, 100.0) as u8
}

fn lists_region(candidate: &Candidate, region: &str) -> bool {
    candidate
        .regions
        .iter()
        .any(|r| r.eq_ignore_ascii_case(region))
}

/// Score the catalog for a region, soil and season and split it into tiers.
///
/// Candidates grown in `region` are ranked; when none are, the whole catalog
/// is ranked without the regional bonus. Ordering is by suitability
/// descending, then crop and variety name. `primary_count` is at least one.
pub fn recommend_crops(
    region: &str,
    soil_type: &str,
    season: Season,
    primary_count: usize,
) -> CropRecommendations {
    let region = region.trim();
    let soil = SoilType::from_description(soil_type);

    let local: Vec<&Candidate> = CATALOG.iter().filter(|c| lists_region(c, region)).collect();
    let (pool, region_listed) = if local.is_empty() {
        tracing::debug!(region, "no catalog entries for region, ranking national catalog");
        (CATALOG.iter().collect::<Vec<_>>(), false)
    } else {
        (local, true)
    };

    let region_mult = region_multiplier(region);
    let soil_mult = soil_type_multiplier(soil_type);

    let mut ranked: Vec<CropRecommendation> = pool
        .into_iter()
        .map(|c| CropRecommendation {
            crop: c.crop.to_string(),
            variety: c.variety.to_string(),
            suitability_percent: suitability(c, soil, soil_type, season, region_listed),
            yield_estimate: base_yield(c.crop, c.variety) * soil_mult * region_mult,
            growing_period: c.growing_period.to_string(),
            water_requirement: c.water_requirement.to_string(),
            fertilizers: c.fertilizers.to_string(),
            challenges: get_crop_challenges(c.crop, region, season),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.suitability_percent
            .cmp(&a.suitability_percent)
            .then_with(|| a.crop.cmp(&b.crop))
            .then_with(|| a.variety.cmp(&b.variety))
    });

    let split = primary_count.max(1).min(ranked.len());
    let alternatives = ranked.split_off(split);
    CropRecommendations {
        primary: ranked,
        alternatives,
    }
}
