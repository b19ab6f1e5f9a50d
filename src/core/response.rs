use crate::core::synthesis::{format_percent, format_usd};
use crate::domain::model::{RecommendationRecord, RECOMMENDATION_COUNT};
use crate::utils::error::ProviderFailure;
use crate::utils::validation::validate_url;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Highest yearly tuition, in dollars, accepted from a numeric field.
const MAX_TUITION_USD: f64 = 1_000_000.0;

static PERCENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}(?:\.\d+)?)\s*%$").expect("static regex"));

static CURRENCY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z]{2,3}\s?)?[$€£¥]\s?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?$")
        .expect("static regex")
});

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").expect("static regex")
});

/// Returns the body of the first ```` ``` ```` fenced block, wherever it
/// sits in the text, or the trimmed text when there is none.
pub fn strip_code_fences(text: &str) -> &str {
    if let Some(body) = FENCED_BLOCK.captures(text).and_then(|caps| caps.get(1)) {
        return body.as_str().trim();
    }

    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        // Unterminated fence: drop the opening line only.
        Some(rest) => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()).trim(),
        None => trimmed,
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn rank_field(obj: &Map<String, Value>) -> Option<u64> {
    match obj.get("rank")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn acceptance_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("acceptanceRate")? {
        Value::String(s) => {
            let s = s.trim();
            let caps = PERCENT_PATTERN.captures(s)?;
            let value: f64 = caps[1].parse().ok()?;
            (value <= 100.0).then(|| s.replace(' ', ""))
        }
        Value::Number(n) => match n.as_u64() {
            Some(whole) => u32::try_from(whole)
                .ok()
                .filter(|percent| *percent <= 100)
                .map(format_percent),
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && (0.0..=100.0).contains(f))
                .map(|f| format!("{}%", f)),
        },
        _ => None,
    }
}

fn tuition_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("tuition")? {
        Value::String(s) => {
            let s = s.trim();
            CURRENCY_PATTERN.is_match(s).then(|| s.to_string())
        }
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite() && (0.0..=MAX_TUITION_USD).contains(f))
            .map(|f| format_usd(f.round() as u32)),
        _ => None,
    }
}

fn convert(index: usize, value: &Value) -> Result<(Option<u64>, RecommendationRecord), String> {
    let obj = value
        .as_object()
        .ok_or_else(|| format!("element {} is not an object", index))?;

    let required = |key: &str| {
        text_field(obj, key).ok_or_else(|| format!("element {} has no usable {}", index, key))
    };

    let website_url = required("websiteUrl")?;
    if validate_url("websiteUrl", &website_url).is_err() {
        return Err(format!("element {} has an invalid websiteUrl", index));
    }

    let record = RecommendationRecord {
        id: 0,
        institution_name: required("institutionName")?,
        program_name: required("programName")?,
        country: required("country")?,
        rank: 0,
        description: required("description")?,
        acceptance_rate: acceptance_field(obj)
            .ok_or_else(|| format!("element {} has no usable acceptanceRate", index))?,
        tuition: tuition_field(obj)
            .ok_or_else(|| format!("element {} has no usable tuition", index))?,
        website_url,
    };

    Ok((rank_field(obj), record))
}

/// Turns the provider's message text into exactly five ranked records.
///
/// Unusable elements are dropped; the survivors are ordered by their
/// declared rank (undeclared last), cut to five and renumbered `1..=5`.
pub fn parse_recommendations(
    content: &str,
) -> std::result::Result<Vec<RecommendationRecord>, ProviderFailure> {
    let body = strip_code_fences(content);
    let value: Value =
        serde_json::from_str(body).map_err(|e| ProviderFailure::MalformedJson(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(_) => {
            return Err(ProviderFailure::InvalidShape(
                "expected a JSON array, got an object".to_string(),
            ))
        }
        other => {
            return Err(ProviderFailure::InvalidShape(format!(
                "expected a JSON array, got {}",
                other
            )))
        }
    };

    if items.is_empty() {
        return Err(ProviderFailure::EmptyResponse);
    }

    let mut ranked = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match convert(index, item) {
            Ok(entry) => ranked.push(entry),
            Err(problem) => tracing::debug!("Dropping provider record: {}", problem),
        }
    }

    if ranked.len() < RECOMMENDATION_COUNT {
        return Err(ProviderFailure::InvalidShape(format!(
            "expected {} usable records, got {}",
            RECOMMENDATION_COUNT,
            ranked.len()
        )));
    }

    ranked.sort_by_key(|(rank, _)| rank.unwrap_or(u64::MAX));

    Ok(ranked
        .into_iter()
        .take(RECOMMENDATION_COUNT)
        .enumerate()
        .map(|(position, (_, mut record))| {
            record.id = position as u32 + 1;
            record.rank = position as u32 + 1;
            record
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(rank: u64) -> Value {
        json!({
            "id": rank,
            "institutionName": format!("University {}", rank),
            "programName": "BSc Law",
            "country": "Canada",
            "rank": rank,
            "description": "A fine place to study.",
            "acceptanceRate": "12%",
            "tuition": "$30,000",
            "websiteUrl": format!("https://u{}.example.edu", rank)
        })
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("```\n[1]\n```\n"), "[1]");
        assert_eq!(strip_code_fences("  [1]  "), "[1]");
        assert_eq!(strip_code_fences("```json\n[1]"), "[1]");
    }

    #[test]
    fn test_fenced_block_after_prose_is_extracted() {
        let items: Vec<Value> = (1..=5).map(sample).collect();
        let content = format!(
            "Here are five universities you might like:\n\n```json\n{}\n```\n\nGood luck!",
            Value::Array(items)
        );

        assert!(strip_code_fences(&content).starts_with('['));
        let records = parse_recommendations(&content).unwrap();
        assert_eq!(records.len(), RECOMMENDATION_COUNT);
        assert_eq!(records[0].institution_name, "University 1");
    }

    #[test]
    fn test_out_of_range_acceptance_rates_are_dropped() {
        let mut items: Vec<Value> = (1..=5).map(sample).collect();
        items[0]["acceptanceRate"] = json!(4294967301u64);
        items[1]["acceptanceRate"] = json!(-12.5);
        items[2]["acceptanceRate"] = json!("250%");

        assert!(matches!(
            parse_recommendations(&Value::Array(items).to_string()),
            Err(ProviderFailure::InvalidShape(_))
        ));

        let mut items: Vec<Value> = (1..=7).map(sample).collect();
        items[0]["acceptanceRate"] = json!(101);
        items[1]["acceptanceRate"] = json!("100%");
        items[2]["acceptanceRate"] = json!(0.5);

        let records = parse_recommendations(&Value::Array(items).to_string()).unwrap();
        assert_eq!(records[0].institution_name, "University 2");
        assert_eq!(records[0].acceptance_rate, "100%");
        assert_eq!(records[1].acceptance_rate, "0.5%");
    }

    #[test]
    fn test_tuition_must_look_like_money() {
        let mut items: Vec<Value> = (1..=5).map(sample).collect();
        items[0]["tuition"] = json!("Free for EU students");
        items[1]["tuition"] = json!(-5000);
        items[2]["tuition"] = json!(1e12);

        assert!(matches!(
            parse_recommendations(&Value::Array(items).to_string()),
            Err(ProviderFailure::InvalidShape(_))
        ));

        let mut items: Vec<Value> = (1..=5).map(sample).collect();
        items[0]["tuition"] = json!("€20,000");
        items[1]["tuition"] = json!("US$35000");
        items[2]["tuition"] = json!(0);

        let records = parse_recommendations(&Value::Array(items).to_string()).unwrap();
        assert_eq!(records[0].tuition, "€20,000");
        assert_eq!(records[1].tuition, "US$35000");
        assert_eq!(records[2].tuition, "$0");
    }

    #[test]
    fn test_parses_fenced_array_and_reranks() {
        let items: Vec<Value> = vec![5, 3, 1, 4, 2].into_iter().map(sample).collect();
        let content = format!("```json\n{}\n```", Value::Array(items));

        let records = parse_recommendations(&content).unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.institution_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["University 1", "University 2", "University 3", "University 4", "University 5"]
        );
        let ranks: Vec<u32> = records.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_truncates_to_five() {
        let items: Vec<Value> = (1..=7).map(sample).collect();
        let records = parse_recommendations(&Value::Array(items).to_string()).unwrap();
        assert_eq!(records.len(), RECOMMENDATION_COUNT);
        assert_eq!(records[4].institution_name, "University 5");
    }

    #[test]
    fn test_numeric_rate_and_tuition_are_formatted() {
        let mut items: Vec<Value> = (1..=5).map(sample).collect();
        items[0]["acceptanceRate"] = json!(7);
        items[0]["tuition"] = json!(42000);

        let records = parse_recommendations(&Value::Array(items).to_string()).unwrap();
        assert_eq!(records[0].acceptance_rate, "7%");
        assert_eq!(records[0].tuition, "$42,000");
    }

    #[test]
    fn test_failure_classification() {
        assert!(matches!(
            parse_recommendations("not json"),
            Err(ProviderFailure::MalformedJson(_))
        ));
        assert_eq!(parse_recommendations("[]"), Err(ProviderFailure::EmptyResponse));
        assert!(matches!(
            parse_recommendations(r#"{"universities": []}"#),
            Err(ProviderFailure::InvalidShape(_))
        ));
    }

    #[test]
    fn test_too_few_usable_records_is_invalid() {
        let mut items: Vec<Value> = (1..=5).map(sample).collect();
        items[2]["websiteUrl"] = json!("not a url");

        assert!(matches!(
            parse_recommendations(&Value::Array(items).to_string()),
            Err(ProviderFailure::InvalidShape(_))
        ));
    }
}
