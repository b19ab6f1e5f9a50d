use std::time::Duration;
use unimatch::domain::catalog::{COUNTRY_OPTIONS, SUBJECT_OPTIONS};
use unimatch::{ManualClock, RecommendationService, ServiceConfig, ThreadRandom};

fn offline_service(clock: &ManualClock) -> RecommendationService<ManualClock> {
    RecommendationService::with_config(&ServiceConfig::default(), clock.clone(), Box::new(ThreadRandom))
        .unwrap()
}

#[tokio::test]
async fn test_every_catalog_combination_yields_five_ranked_records() {
    let clock = ManualClock::new();
    let service = offline_service(&clock);

    let mut countries: Vec<&str> = COUNTRY_OPTIONS.iter().map(|c| c.value).collect();
    countries.push("");
    countries.push("Atlantis");

    for subject in SUBJECT_OPTIONS.iter() {
        for country in &countries {
            let records = service.acquire_recommendations(subject.value, country).await;

            let ranks: Vec<u32> = records.iter().map(|r| r.rank).collect();
            assert_eq!(ranks, vec![1, 2, 3, 4, 5], "{} / {}", subject.value, country);
            assert!(records.iter().all(|r| r.id == r.rank));
            assert!(records.iter().all(|r| !r.country.is_empty()));
        }
    }

    // Offline acquisitions never touch the rate limiter.
    assert!(service.rate_limiter().last_dispatch().is_none());
    assert!(clock
        .sleeps()
        .iter()
        .all(|d| *d == Duration::from_millis(1500)));
}

#[tokio::test]
async fn test_country_adjective_resolution() {
    let clock = ManualClock::new();
    let service = offline_service(&clock);

    let german = service.acquire_recommendations("engineering", "Germany").await;
    assert!(german[0].institution_name.contains("German"));
    assert_eq!(german[0].institution_name, "University of German Engineering");

    let unknown = service.acquire_recommendations("engineering", "Middle-earth").await;
    assert_eq!(unknown[0].institution_name, "University of Middle-earth Engineering");
}

#[tokio::test]
async fn test_computer_science_without_country_uses_templates_in_order() {
    let clock = ManualClock::new();
    let service = offline_service(&clock);

    let records = service.acquire_recommendations("computer-science", "").await;

    assert!(records[0].institution_name.contains("University of"));
    assert!(records[1].institution_name.contains("Institute of Technology"));
    assert!(records[2].institution_name.contains("Global"));
    assert!(records[3].institution_name.contains("National University of"));
    assert!(records[4].institution_name.contains("Metropolitan"));

    let acceptance_bounds = [(5, 15), (8, 22), (10, 30), (15, 40), (20, 50)];
    let tuition_bounds = [
        (45_000, 60_000),
        (38_000, 55_000),
        (30_000, 48_000),
        (20_000, 40_000),
        (12_000, 34_000),
    ];
    for (i, record) in records.iter().enumerate() {
        let acceptance: u32 = record.acceptance_rate.trim_end_matches('%').parse().unwrap();
        let tuition: u32 = record
            .tuition
            .trim_start_matches('$')
            .replace(',', "")
            .parse()
            .unwrap();
        assert!(acceptance >= acceptance_bounds[i].0 && acceptance <= acceptance_bounds[i].1);
        assert!(tuition >= tuition_bounds[i].0 && tuition <= tuition_bounds[i].1);
    }
}
