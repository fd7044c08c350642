//! Exporting a selection of a loaded dataset to disk.

use emissions_atlas::app::pipeline::DatasetLoader;
use emissions_atlas::domain::{EmissionRecord, ExportFormat, SampleConfig, Selection};
use emissions_atlas::io::export_to_path;

#[tokio::test]
async fn synthetic_selection_round_trips_through_json_file() {
    let dataset = DatasetLoader::offline(SampleConfig { seed: Some(5) }).load().await;
    let selection = Selection {
        year: Some(2010),
        countries: vec!["France".to_string(), "India".to_string()],
    };
    let picked = dataset.select(&selection);
    assert_eq!(picked.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("co2_data_2010.json");
    export_to_path(&path, &picked, ExportFormat::Json).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: Vec<EmissionRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.len(), picked.len());
    for (got, want) in parsed.iter().zip(picked) {
        assert_eq!((got.country.as_str(), got.year), (want.country.as_str(), want.year));
        assert!((got.co2_emissions / want.co2_emissions - 1.0).abs() < 1e-12);
        assert!((got.gdp_per_capita / want.gdp_per_capita - 1.0).abs() < 1e-12);
    }
}

#[tokio::test]
async fn csv_file_has_one_line_per_record_plus_header() {
    let dataset = DatasetLoader::offline(SampleConfig { seed: Some(5) }).load().await;
    let picked = dataset.select(&Selection {
        year: None,
        countries: vec!["Japan".to_string()],
    });

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("japan.csv");
    export_to_path(&path, &picked, ExportFormat::Csv).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), picked.len() + 1);
    assert!(text.starts_with("country,year,co2Emissions,population,gdpPerCapita,co2PerCapita\n"));
    assert!(text.lines().skip(1).all(|l| l.starts_with("Japan,")));
}

#[test]
fn missing_directory_is_reported_as_app_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.csv");
    let err = export_to_path(&path, &[], ExportFormat::Csv).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
