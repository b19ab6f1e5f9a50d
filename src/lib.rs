pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use config::ServiceConfig;
pub use crate::core::{
    clock::{ManualClock, SystemClock},
    random::{SeededRandom, ThreadRandom},
    service::RecommendationService,
};
pub use domain::model::{RecommendationQuery, RecommendationRecord};
pub use utils::error::{ProviderFailure, Result, UnimatchError};
