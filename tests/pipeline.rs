//! End-to-end dataset loading: fetch, ingest, fallback and memoization.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use emissions_atlas::app::pipeline::{DatasetLoader, EmissionsStore};
use emissions_atlas::data::DatasetSource;
use emissions_atlas::domain::{Provenance, SampleConfig, Selection};
use emissions_atlas::error::FetchError;

const CSV: &str = "iso_code,country,year,co2,population,gdp,co2_per_capita\n\
TST,Testland,2005,100.5,5000000,250000000000,20.1\n\
TST,Testland,2022,120,5200000,300000000000,\n\
TST,Testland,1989,95,4900000,200000000000,19.4\n\
OWID_WRL,World,2005,29000,6500000000,60000000000000,4.5\n\
,High-income countries,2005,13000,1200000000,45000000000000,11\n\
TST,Testland,2006,0,5000000,250000000000,0\n\
TST,Testland,2007,101,5000000,n/a,20.2\n\
ZZZ,\"Korea, Zed\",2010,50,10000000,100000000000,5\n";

struct StubSource {
    response: Result<String, u16>,
    calls: Arc<AtomicUsize>,
}

impl StubSource {
    fn ok(text: &str) -> (Arc<Self>, Arc<AtomicUsize>) {
        Self::build(Ok(text.to_string()))
    }

    fn failing(status: u16) -> (Arc<Self>, Arc<AtomicUsize>) {
        Self::build(Err(status))
    }

    fn build(response: Result<String, u16>) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Arc::new(Self {
            response,
            calls: Arc::clone(&calls),
        });
        (source, calls)
    }
}

#[async_trait]
impl DatasetSource for StubSource {
    fn describe(&self) -> String {
        "stub://co2".to_string()
    }

    async fn fetch_text(&self) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(FetchError::Transport {
                status: *status,
                url: self.describe(),
            }),
        }
    }
}

fn seeded() -> SampleConfig {
    SampleConfig { seed: Some(11) }
}

#[tokio::test]
async fn real_source_is_normalized_and_filtered() {
    let (source, calls) = StubSource::ok(CSV);
    let dataset = DatasetLoader::new(source, seeded()).load().await;

    assert_eq!(dataset.provenance, Provenance::Real);
    assert_eq!(dataset.source, "stub://co2");
    assert!(dataset.fallback_reason.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let summary: Vec<(&str, i32)> = dataset
        .records
        .iter()
        .map(|r| (r.country.as_str(), r.year))
        .collect();
    assert_eq!(
        summary,
        vec![("Testland", 2005), ("Testland", 2022), ("Korea, Zed", 2010)]
    );

    let first = &dataset.records[0];
    assert_eq!(first.co2_emissions, 100.5);
    assert_eq!(first.population, 5.0);
    assert_eq!(first.gdp_per_capita, 50_000.0);
    assert_eq!(first.co2_per_capita, 20.1);

    // Empty co2_per_capita defaults to zero instead of rejecting the row.
    assert_eq!(dataset.records[1].co2_per_capita, 0.0);

    let report = dataset.report.as_ref().unwrap();
    assert_eq!(report.rows_read, 8);
    assert_eq!(report.rows_used, 3);
    let counts = report.rejection_counts();
    assert_eq!(counts.get("year_out_of_range"), Some(&1));
    assert_eq!(counts.get("aggregate_region"), Some(&2));
    assert_eq!(counts.get("non_positive"), Some(&1));
    assert_eq!(counts.get("non_numeric"), Some(&1));
}

#[tokio::test]
async fn failed_fetch_falls_back_to_synthetic_data() {
    let (source, calls) = StubSource::failing(503);
    let dataset = DatasetLoader::new(source, seeded()).load().await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(dataset.provenance, Provenance::Synthetic);
    assert!(dataset.is_synthetic());
    assert!(dataset.report.is_none());
    assert!(!dataset.records.is_empty());
    assert!(dataset.fallback_reason.as_deref().unwrap().contains("503"));

    for r in &dataset.records {
        assert!((1990..=2022).contains(&r.year));
        assert!(r.co2_emissions > 0.0 && r.population > 0.0 && r.gdp_per_capita > 0.0);
    }
}

#[tokio::test]
async fn empty_document_falls_back_to_synthetic_data() {
    let (source, _) = StubSource::ok("");
    let dataset = DatasetLoader::new(source, seeded()).load().await;
    assert_eq!(dataset.provenance, Provenance::Synthetic);
    assert!(dataset.fallback_reason.unwrap().contains("empty"));
}

#[tokio::test]
async fn offline_loader_never_fetches() {
    let dataset = DatasetLoader::offline(seeded()).load().await;
    assert_eq!(dataset.provenance, Provenance::Synthetic);
    assert_eq!(dataset.fallback_reason.as_deref(), Some("offline mode"));
    assert_eq!(dataset.years().len(), 33);
}

#[tokio::test]
async fn store_memoizes_until_invalidated() {
    let (source, calls) = StubSource::ok(CSV);
    let store = EmissionsStore::new(DatasetLoader::new(source, seeded()));

    assert!(store.cached().await.is_none());

    let first = store.dataset().await;
    let second = store.dataset().await;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1, "second call is a cache hit");

    store.invalidate().await;
    let third = store.dataset().await;
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(first.records, third.records);
}

#[tokio::test]
async fn synthetic_fallback_is_cached_too() {
    let (source, calls) = StubSource::failing(500);
    let store = EmissionsStore::new(DatasetLoader::new(source, SampleConfig::default()));

    let first = store.dataset().await;
    let second = store.dataset().await;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn selection_over_loaded_dataset() {
    let (source, _) = StubSource::ok(CSV);
    let store = EmissionsStore::new(DatasetLoader::new(source, seeded()));
    let dataset = store.dataset().await;

    let picked = dataset.select(&Selection {
        year: Some(2005),
        countries: vec!["Testland".to_string()],
    });
    assert_eq!(picked.len(), 1);
    assert_eq!(dataset.countries(), vec!["Korea, Zed".to_string(), "Testland".to_string()]);
}
