//! Known seasonal risks per crop and region.
//!
//! Lookup order: crop → region → season, then the crop's default list, then
//! [`GENERIC_CHALLENGES`]. The result is never empty.

use crate::models::Season;

type SeasonList = &'static [(Season, &'static [&'static str])];

struct CropChallenges {
    crop: &'static str,
    regions: &'static [(&'static str, SeasonList)],
    default: &'static [&'static str],
}

/// Returned when a crop has no entry at all.
pub const GENERIC_CHALLENGES: &[&str] = &[
    "Monitor local weather forecasts for extreme events",
    "Scout fields weekly for pests and diseases",
    "Consult the nearest Krishi Vigyan Kendra for crop-specific advice",
];

const CHALLENGE_TABLE: &[CropChallenges] = &[
    CropChallenges {
        crop: "rice",
        regions: &[
            (
                "Punjab",
                &[
                    (
                        Season::Kharif,
                        &[
                            "Potential bacterial leaf blight due to high humidity",
                            "Monitor for stem borers",
                        ],
                    ),
                    (
                        Season::Rabi,
                        &["Cold stress at nursery stage", "Falling groundwater for late transplanting"],
                    ),
                ],
            ),
            (
                "West Bengal",
                &[
                    (
                        Season::Kharif,
                        &["Submergence risk from heavy monsoon rain", "Brown plant hopper outbreaks"],
                    ),
                    (Season::Zaid, &["High temperature during flowering reduces grain set"]),
                ],
            ),
            (
                "Uttar Pradesh",
                &[(Season::Kharif, &["Blast disease in humid spells", "Zinc deficiency (khaira)"])],
            ),
        ],
        default: &["Water management is critical", "Watch for blast and sheath blight"],
    },
    CropChallenges {
        crop: "wheat",
        regions: &[
            (
                "Punjab",
                &[(
                    Season::Rabi,
                    &["Yellow rust in cool humid weather", "Terminal heat stress in March"],
                )],
            ),
            (
                "Uttar Pradesh",
                &[(Season::Rabi, &["Late sowing after paddy lowers yield", "Termite damage in light soils"])],
            ),
            (
                "Maharashtra",
                &[(Season::Rabi, &["Limited irrigation water", "Aphid infestation"])],
            ),
        ],
        default: &["Ensure timely sowing", "Monitor for rust diseases"],
    },
    CropChallenges {
        crop: "cotton",
        regions: &[
            (
                "Maharashtra",
                &[(
                    Season::Kharif,
                    &["Pink bollworm infestation", "Erratic monsoon causing moisture stress"],
                )],
            ),
            (
                "Punjab",
                &[(Season::Kharif, &["Whitefly and leaf curl virus", "Pink bollworm in late season"])],
            ),
        ],
        default: &["Monitor for bollworms", "Avoid waterlogging"],
    },
    CropChallenges {
        crop: "sugarcane",
        regions: &[
            (
                "Uttar Pradesh",
                &[
                    (Season::Zaid, &["Early shoot borer", "High irrigation demand in summer"]),
                    (Season::Kharif, &["Red rot in waterlogged fields"]),
                ],
            ),
            (
                "Maharashtra",
                &[(Season::Zaid, &["Water scarcity", "Woolly aphid"])],
            ),
            (
                "Karnataka",
                &[(Season::Kharif, &["Top borer damage", "Drought spells between monsoon rains"])],
            ),
        ],
        default: &["High water requirement", "Watch for red rot and borers"],
    },
    CropChallenges {
        crop: "maize",
        regions: &[(
            "Karnataka",
            &[(Season::Kharif, &["Fall armyworm outbreaks", "Turcicum leaf blight"])],
        )],
        default: &["Fall armyworm is a major threat", "Ensure good drainage"],
    },
    CropChallenges {
        crop: "soybean",
        regions: &[(
            "Maharashtra",
            &[(Season::Kharif, &["Girdle beetle and stem fly", "Yellow mosaic virus"])],
        )],
        default: &["Avoid waterlogging at germination", "Monitor for defoliators"],
    },
    CropChallenges {
        crop: "mustard",
        regions: &[(
            "Uttar Pradesh",
            &[(Season::Rabi, &["Aphid outbreaks in January", "Frost damage at flowering"])],
        )],
        default: &["Monitor for aphids", "Protect against frost"],
    },
    CropChallenges {
        crop: "groundnut",
        regions: &[(
            "Karnataka",
            &[(Season::Kharif, &["Leaf spot (tikka) disease", "Dry spells at pegging stage"])],
        )],
        default: &["Ensure calcium availability at pegging", "Watch for leaf miner"],
    },
    CropChallenges {
        crop: "chickpea",
        regions: &[(
            "Maharashtra",
            &[(Season::Rabi, &["Pod borer (Helicoverpa)", "Wilt in heavy soils"])],
        )],
        default: &["Monitor for pod borer", "Avoid excess irrigation"],
    },
];

/// Known challenges for a crop in a region and season.
///
/// Crop and region names are matched case-insensitively. Never empty.
pub fn get_crop_challenges(crop: &str, region: &str, season: Season) -> Vec<String> {
    let crop_key = crop.trim();
    let region_key = region.trim();

    let Some(entry) = CHALLENGE_TABLE
        .iter()
        .find(|c| c.crop.eq_ignore_ascii_case(crop_key))
    else {
        tracing::debug!(crop, "no challenge entry for crop, using generic list");
        return to_owned(GENERIC_CHALLENGES);
    };

    let specific = entry
        .regions
        .iter()
        .find(|(r, _)| r.eq_ignore_ascii_case(region_key))
        .and_then(|(_, seasons)| seasons.iter().find(|(s, _)| *s == season))
        .map(|(_, list)| *list);

    match specific {
        Some(list) if !list.is_empty() => to_owned(list),
        _ => to_owned(entry.default),
    }
}

/// Crops with a challenge entry.
pub fn crops_with_challenges() -> Vec<&'static str> {
    CHALLENGE_TABLE.iter().map(|c| c.crop).collect()
}

fn to_owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
