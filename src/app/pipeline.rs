//! Shared dataset-load logic used by the CLI and by library consumers.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> row parse -> normalize -> validate -> cache
//!
//! Loading never fails. A fetch or document error becomes a synthetic dataset
//! tagged with `Provenance::Synthetic`, so views stay populated and can still
//! tell the difference.

use std::sync::Arc;

use tracing::{info, warn};

use crate::data::{DatasetCache, DatasetSource, HttpSource, generate_sample};
use crate::domain::{EmissionRecord, LoadConfig, Provenance, SampleConfig, Selection};
use crate::error::LoadError;
use crate::io::ingest::{IngestReport, IngestedData, ingest_csv};

/// A dataset ready for views, with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub records: Vec<EmissionRecord>,
    pub provenance: Provenance,
    /// URL (or "synthetic generator") the records were produced by.
    pub source: String,
    /// Row accounting for real data; `None` for synthetic data.
    pub report: Option<IngestReport>,
    /// Why the real source was not used, for synthetic data.
    pub fallback_reason: Option<String>,
}

impl LoadedDataset {
    pub fn is_synthetic(&self) -> bool {
        self.provenance == Provenance::Synthetic
    }

    pub fn select(&self, selection: &Selection) -> Vec<&EmissionRecord> {
        selection.apply(&self.records)
    }

    pub fn years(&self) -> Vec<i32> {
        crate::domain::years(&self.records)
    }

    pub fn countries(&self) -> Vec<String> {
        crate::domain::countries(&self.records)
    }

    pub fn top_emitters(&self, year: i32, n: usize) -> Vec<&EmissionRecord> {
        crate::domain::top_emitters(&self.records, year, n)
    }

    fn synthetic(sample: &SampleConfig, reason: String) -> Self {
        Self {
            records: generate_sample(sample),
            provenance: Provenance::Synthetic,
            source: "synthetic generator".to_string(),
            report: None,
            fallback_reason: Some(reason),
        }
    }
}

/// Runs one dataset load from a source, falling back to synthetic data.
pub struct DatasetLoader {
    /// `None` means offline: serve synthetic data without any network access.
    source: Option<Arc<dyn DatasetSource>>,
    sample: SampleConfig,
}

impl DatasetLoader {
    pub fn new(source: Arc<dyn DatasetSource>, sample: SampleConfig) -> Self {
        Self {
            source: Some(source),
            sample,
        }
    }

    pub fn offline(sample: SampleConfig) -> Self {
        Self { source: None, sample }
    }

    pub fn from_config(config: &LoadConfig) -> Self {
        if config.offline {
            Self::offline(config.sample.clone())
        } else {
            Self::new(Arc::new(HttpSource::new(config.url.clone())), config.sample.clone())
        }
    }

    /// Fetch and ingest, or fall back. Never fails.
    pub async fn load(&self) -> LoadedDataset {
        let Some(source) = &self.source else {
            info!("offline mode, serving synthetic dataset");
            return LoadedDataset::synthetic(&self.sample, "offline mode".to_string());
        };

        let origin = source.describe();
        match fetch_and_ingest(source.as_ref()).await {
            Ok(IngestedData { records, report }) => {
                info!(
                    source = %origin,
                    rows_read = report.rows_read,
                    rows_used = report.rows_used,
                    rows_rejected = report.rows_rejected(),
                    "dataset loaded"
                );
                if !report.missing_columns.is_empty() {
                    warn!(missing = ?report.missing_columns, "dataset header lacks required columns");
                }
                if records.is_empty() {
                    warn!(source = %origin, "no rows passed validation");
                }
                LoadedDataset {
                    records,
                    provenance: Provenance::Real,
                    source: origin,
                    report: Some(report),
                    fallback_reason: None,
                }
            }
            Err(err) => {
                warn!(source = %origin, error = %err, "dataset load failed, falling back to synthetic data");
                LoadedDataset::synthetic(&self.sample, err.to_string())
            }
        }
    }
}

async fn fetch_and_ingest(source: &dyn DatasetSource) -> Result<IngestedData, LoadError> {
    let text = source.fetch_text().await?;
    Ok(ingest_csv(&text)?)
}

/// Owns the loader and the memo cell: the one place views get data from.
pub struct EmissionsStore {
    loader: DatasetLoader,
    cache: DatasetCache<LoadedDataset>,
}

impl EmissionsStore {
    pub fn new(loader: DatasetLoader) -> Self {
        Self {
            loader,
            cache: DatasetCache::new(),
        }
    }

    pub fn from_config(config: &LoadConfig) -> Self {
        Self::new(DatasetLoader::from_config(config))
    }

    /// The dataset, loading it on first access.
    pub async fn dataset(&self) -> Arc<LoadedDataset> {
        self.cache.get_or_load(|| self.loader.load()).await
    }

    /// The dataset if it has already been loaded.
    pub async fn cached(&self) -> Option<Arc<LoadedDataset>> {
        self.cache.peek().await
    }

    /// Forget the cached dataset; the next `dataset()` call reloads.
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }
}
