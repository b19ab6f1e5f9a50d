use crate::utils::error::{Result, UnimatchError};
use serde::{Deserialize, Serialize};

/// Number of records every acquisition returns.
pub const RECOMMENDATION_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationQuery {
    pub subject: String,
    /// Empty means no preference.
    pub country: String,
}

impl RecommendationQuery {
    pub fn new(subject: &str, country: &str) -> Result<Self> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(UnimatchError::ValidationError {
                message: "Please select your main faculty area".to_string(),
            });
        }

        Ok(Self {
            subject: subject.to_string(),
            country: country.trim().to_string(),
        })
    }

    pub fn has_country(&self) -> bool {
        !self.country.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRecord {
    pub id: u32,
    pub institution_name: String,
    pub program_name: String,
    pub country: String,
    pub rank: u32,
    pub description: String,
    pub acceptance_rate: String,
    pub tuition: String,
    pub website_url: String,
}
