use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::analysis::{Advisor, YieldAssessment};
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;

/// Maximum number of stored assessments before the oldest is evicted.
const MAX_ASSESSMENTS: usize = 500;
/// Time-to-live for stored assessments (2 hours).
const ASSESSMENT_TTL_SECS: u64 = 2 * 60 * 60;

type AssessmentMap = HashMap<Uuid, (Instant, YieldAssessment)>;

pub struct AppState {
    pub config: AdvisorConfig,
    assessments: Mutex<AssessmentMap>,
    ttl: Duration,
}

impl AppState {
    pub fn new(config: AdvisorConfig) -> Self {
        Self::with_ttl(config, Duration::from_secs(ASSESSMENT_TTL_SECS))
    }

    pub fn with_ttl(config: AdvisorConfig, ttl: Duration) -> Self {
        Self {
            config,
            assessments: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// A fresh advisor for one request.
    pub fn advisor(&self) -> Result<Advisor, AdvisorError> {
        Advisor::from_config(&self.config)
    }

    pub fn get_assessment(&self, id: &Uuid) -> Option<YieldAssessment> {
        let mut map = self.assessments.lock().expect("assessments mutex poisoned");
        evict_expired(&mut map, self.ttl);
        map.get(id).map(|(_, a)| a.clone())
    }

    pub fn insert_assessment(&self, id: Uuid, assessment: YieldAssessment) {
        let mut map = self.assessments.lock().expect("assessments mutex poisoned");
        evict_expired(&mut map, self.ttl);
        if map.len() >= MAX_ASSESSMENTS {
            evict_oldest(&mut map);
        }
        map.insert(id, (Instant::now(), assessment));
    }

    pub fn num_assessments(&self) -> usize {
        self.assessments.lock().expect("assessments mutex poisoned").len()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AdvisorConfig::default())
    }
}

fn evict_expired(map: &mut AssessmentMap, ttl: Duration) {
    let now = Instant::now();
    map.retain(|_, (created, _)| now.duration_since(*created) < ttl);
}

fn evict_oldest(map: &mut AssessmentMap) {
    if let Some(oldest_id) = map.iter().min_by_key(|(_, (t, _))| *t).map(|(id, _)| *id) {
        map.remove(&oldest_id);
    }
}
