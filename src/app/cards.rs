use crate::domain::catalog::{subject_label, COUNTRY_OPTIONS, SUBJECT_OPTIONS};
use crate::domain::model::{RecommendationQuery, RecommendationRecord};
use crate::utils::error::{Result, UnimatchError};
use serde::Serialize;
use std::fmt::Write;

/// Caller-side check on what the service handed back.
pub fn ensure_recommendations(records: &[RecommendationRecord]) -> Result<()> {
    if records.is_empty() {
        return Err(UnimatchError::NoRecommendations);
    }
    Ok(())
}

pub fn render_cards(query: &RecommendationQuery, records: &[RecommendationRecord]) -> String {
    let subject = subject_label(&query.subject).unwrap_or(query.subject.as_str());
    let mut out = String::new();

    let _ = writeln!(out, "Your Top Recommendations: {}", subject);
    if query.has_country() {
        let _ = writeln!(out, "Dream country: {}", query.country);
    }

    for record in records {
        let _ = writeln!(out);
        let _ = writeln!(out, "#{}  {}", record.rank, record.institution_name);
        let _ = writeln!(out, "    {} | {}", record.program_name, record.country);
        let _ = writeln!(out, "    {}", record.description);
        let _ = writeln!(
            out,
            "    Acceptance rate: {}   Tuition: {}",
            record.acceptance_rate, record.tuition
        );
        let _ = writeln!(out, "    {}", record.website_url);
    }

    out
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    query: &'a RecommendationQuery,
    recommendations: &'a [RecommendationRecord],
}

pub fn render_json(query: &RecommendationQuery, records: &[RecommendationRecord]) -> Result<String> {
    let report = JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        query,
        recommendations: records,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render_options() -> String {
    let mut out = String::from("Subjects:\n");
    for option in SUBJECT_OPTIONS.iter() {
        let _ = writeln!(out, "  {:<18} {}", option.value, option.label);
    }
    out.push_str("Countries:\n");
    for option in COUNTRY_OPTIONS.iter() {
        let _ = writeln!(out, "  {:<18} {}", option.value, option.label);
    }
    out
}
