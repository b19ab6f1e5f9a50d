pub mod clock;
pub mod random;
pub mod rate_limiter;
pub mod response;
pub mod service;
pub mod synthesis;

pub use crate::domain::model::{RecommendationQuery, RecommendationRecord};
pub use crate::domain::ports::{Clock, RandomSource, RecommendationProvider};
pub use crate::utils::error::Result;
