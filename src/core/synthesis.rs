//! Local recommendation synthesis.
//!
//! Produces five records from fixed naming templates. Only the acceptance
//! rate and tuition are drawn from the injected [`RandomSource`]; everything
//! else is a function of the subject and country.

use crate::domain::catalog::{country_adjective, resolve_country, DEFAULT_COUNTRIES};
use crate::domain::model::{RecommendationRecord, RECOMMENDATION_COUNT};
use crate::domain::ports::RandomSource;
use std::ops::RangeInclusive;

/// Subject used when a caller hands the service a blank one.
pub const DEFAULT_SUBJECT: &str = "general-studies";

#[derive(Debug, Clone)]
pub struct SlotProfile {
    pub acceptance_percent: RangeInclusive<u32>,
    pub tuition_usd: RangeInclusive<u32>,
}

/// Ranges per rank slot. Lower slots admit more students and cost less.
pub static SLOT_PROFILES: [SlotProfile; RECOMMENDATION_COUNT] = [
    SlotProfile { acceptance_percent: 5..=15, tuition_usd: 45_000..=60_000 },
    SlotProfile { acceptance_percent: 8..=22, tuition_usd: 38_000..=55_000 },
    SlotProfile { acceptance_percent: 10..=30, tuition_usd: 30_000..=48_000 },
    SlotProfile { acceptance_percent: 15..=40, tuition_usd: 20_000..=40_000 },
    SlotProfile { acceptance_percent: 20..=50, tuition_usd: 12_000..=34_000 },
];

/// `computer-science` -> `Computer Science`.
pub fn title_case_subject(subject: &str) -> String {
    subject
        .split('-')
        .filter(|word| !word.trim().is_empty())
        .map(|word| {
            let word = word.trim();
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `35000` -> `$35,000`.
pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

pub fn format_percent(value: u32) -> String {
    format!("{}%", value)
}

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

fn institution_name(slot: usize, subject: &str, adjective: &str) -> String {
    match slot {
        0 => format!("University of {} {}", adjective, subject),
        1 => format!("{} Institute of Technology", subject),
        2 => format!("Global {} University", subject),
        3 => format!("National University of {} Studies", subject),
        _ => format!("Metropolitan {} College", subject),
    }
}

fn program_name(slot: usize, subject: &str) -> String {
    match slot {
        0 => format!("Bachelor of Science in {}", subject),
        1 => format!("{} (Applied Technology Track)", subject),
        2 => format!("International Bachelor of {}", subject),
        3 => format!("Bachelor of Arts in {}", subject),
        _ => format!("{} Professional Diploma", subject),
    }
}

fn description(slot: usize, subject: &str) -> String {
    match slot {
        0 => format!(
            "A world-renowned research university whose {} faculty leads major international projects and industry partnerships.",
            subject
        ),
        1 => format!(
            "Known for cutting-edge {} laboratories and hands-on, project-based learning from the first semester.",
            subject
        ),
        2 => format!(
            "An internationally diverse campus offering flexible {} programs with exchange semesters on three continents.",
            subject
        ),
        3 => format!(
            "A public institution with a long tradition of rigorous {} scholarship and generous research funding.",
            subject
        ),
        _ => format!(
            "An urban college that places {} students in internships across a thriving city economy.",
            subject
        ),
    }
}

pub struct MockSynthesizer {
    random: Box<dyn RandomSource>,
}

impl MockSynthesizer {
    pub fn new(random: Box<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn synthesize(&self, subject: &str, country: &str) -> Vec<RecommendationRecord> {
        let subject_phrase = title_case_subject(subject);
        let country = resolve_country(country);
        let countries: Vec<&str> = if country.is_empty() {
            DEFAULT_COUNTRIES.to_vec()
        } else {
            vec![country.as_str()]
        };

        tracing::debug!(
            subject = %subject_phrase,
            country = %country,
            "Synthesizing local recommendations"
        );

        SLOT_PROFILES
            .iter()
            .enumerate()
            .map(|(index, profile)| {
                let record_country = countries[index % countries.len()];
                let adjective = country_adjective(record_country);
                let name = institution_name(index, &subject_phrase, &adjective);

                let acceptance = self.random.next_in_range(profile.acceptance_percent.clone());
                let tuition = self.random.next_in_range(profile.tuition_usd.clone()) / 100 * 100;

                RecommendationRecord {
                    id: index as u32 + 1,
                    website_url: format!("https://www.{}.edu", slugify(&name)),
                    institution_name: name,
                    program_name: program_name(index, &subject_phrase),
                    country: record_country.to_string(),
                    rank: index as u32 + 1,
                    description: description(index, &subject_phrase),
                    acceptance_rate: format_percent(acceptance),
                    tuition: format_usd(tuition),
                }
            })
            .collect()
    }
}
