pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

#[cfg(feature = "web")]
pub mod web;

pub use analysis::{Advisor, YieldAssessment};
pub use config::AdvisorConfig;
pub use error::AdvisorError;
pub use io::{PlanReader, ResultWriter};
pub use models::{FieldPlan, Season, SoilSample, SoilType, YieldEstimate, YieldRequest};
