//! Synthetic emissions dataset used when the remote source is unavailable.
//!
//! Each country follows a linear path from a randomly drawn fraction of its
//! 2020 level in 1990 up to that level, with multiplicative log-normal noise
//! per year. Output has the same shape as real data so views do not care
//! where it came from.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

use crate::domain::{EmissionRecord, SampleConfig, YEAR_MAX, YEAR_MIN};

/// Approximate 2020 levels used to anchor one synthetic country.
#[derive(Debug, Clone, Copy)]
pub struct CountryBaseline {
    pub country: &'static str,
    /// CO₂ emissions, Mt.
    pub co2_mt: f64,
    /// Population, millions.
    pub population_m: f64,
    /// GDP per person, USD.
    pub gdp_per_capita: f64,
}

const fn baseline(country: &'static str, co2_mt: f64, population_m: f64, gdp_per_capita: f64) -> CountryBaseline {
    CountryBaseline {
        country,
        co2_mt,
        population_m,
        gdp_per_capita,
    }
}

pub const BASELINES: [CountryBaseline; 28] = [
    baseline("China", 10_668.0, 1_424.0, 10_500.0),
    baseline("United States", 4_715.0, 335.0, 63_500.0),
    baseline("India", 2_445.0, 1_396.0, 1_910.0),
    baseline("Russia", 1_577.0, 145.6, 10_100.0),
    baseline("Japan", 1_042.0, 125.2, 40_000.0),
    baseline("Iran", 745.0, 87.3, 3_000.0),
    baseline("Germany", 644.0, 83.2, 46_200.0),
    baseline("South Korea", 598.0, 51.8, 31_600.0),
    baseline("Saudi Arabia", 626.0, 35.0, 20_100.0),
    baseline("Indonesia", 590.0, 271.9, 3_870.0),
    baseline("Canada", 536.0, 38.0, 43_300.0),
    baseline("Brazil", 440.0, 213.2, 6_800.0),
    baseline("Mexico", 383.0, 126.0, 8_600.0),
    baseline("South Africa", 452.0, 59.3, 5_700.0),
    baseline("Australia", 392.0, 25.7, 51_700.0),
    baseline("Turkey", 411.0, 84.1, 8_600.0),
    baseline("United Kingdom", 330.0, 67.1, 40_300.0),
    baseline("Italy", 279.0, 59.5, 31_900.0),
    baseline("France", 279.0, 64.5, 39_000.0),
    baseline("Poland", 299.0, 38.0, 15_700.0),
    baseline("Vietnam", 292.0, 97.3, 2_800.0),
    baseline("Thailand", 270.0, 71.5, 7_000.0),
    baseline("Spain", 212.0, 47.4, 27_000.0),
    baseline("Egypt", 245.0, 107.5, 3_550.0),
    baseline("Argentina", 165.0, 45.4, 8_500.0),
    baseline("Nigeria", 120.0, 208.3, 2_100.0),
    baseline("Pakistan", 223.0, 227.2, 1_300.0),
    baseline("Kazakhstan", 250.0, 18.8, 9_100.0),
];

/// Year the baselines describe.
const BASELINE_YEAR: i32 = 2020;

// Per-year log-noise scale for each series.
const CO2_NOISE: f64 = 0.04;
const POPULATION_NOISE: f64 = 0.01;
const GDP_NOISE: f64 = 0.05;

/// Generate a full synthetic dataset: every baseline country × every year.
pub fn generate_sample(config: &SampleConfig) -> Vec<EmissionRecord> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let n_years = (YEAR_MAX - YEAR_MIN + 1) as usize;
    let mut records = Vec::with_capacity(BASELINES.len() * n_years);

    for base in &BASELINES {
        // Level in 1990 relative to the 2020 baseline.
        let co2_start = rng.gen_range(0.35..1.25);
        let population_start = rng.gen_range(0.65..0.95);
        let gdp_start = rng.gen_range(0.25..0.75);

        for year in YEAR_MIN..=YEAR_MAX {
            let co2 = base.co2_mt * trajectory(co2_start, year) * noise(&mut rng, CO2_NOISE);
            let population = base.population_m * trajectory(population_start, year) * noise(&mut rng, POPULATION_NOISE);
            let gdp_per_capita = base.gdp_per_capita * trajectory(gdp_start, year) * noise(&mut rng, GDP_NOISE);

            records.push(EmissionRecord {
                country: base.country.to_string(),
                year,
                co2_emissions: co2,
                population,
                gdp_per_capita,
                // Mt per million people is tonnes per person.
                co2_per_capita: co2 / population,
            });
        }
    }

    records
}

/// Linear ratio to the baseline: `start` in 1990, 1.0 in the baseline year.
fn trajectory(start: f64, year: i32) -> f64 {
    let u = (year - YEAR_MIN) as f64 / (BASELINE_YEAR - YEAR_MIN) as f64;
    start + u * (1.0 - start)
}

/// Mean-one multiplicative noise that never changes the sign.
fn noise(rng: &mut StdRng, sigma: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    (sigma * z - 0.5 * sigma * sigma).exp()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::io::validate::is_aggregate;

    #[test]
    fn covers_every_country_and_year() {
        let records = generate_sample(&SampleConfig { seed: Some(7) });
        assert_eq!(records.len(), BASELINES.len() * 33);

        let countries: HashSet<&str> = records.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries.len(), BASELINES.len());

        assert!(records.iter().all(|r| (YEAR_MIN..=YEAR_MAX).contains(&r.year)));
        assert!(records.iter().any(|r| r.year == YEAR_MIN));
        assert!(records.iter().any(|r| r.year == YEAR_MAX));
    }

    #[test]
    fn satisfies_record_invariants() {
        for r in generate_sample(&SampleConfig::default()) {
            assert!(r.co2_emissions > 0.0 && r.co2_emissions.is_finite(), "{r:?}");
            assert!(r.population > 0.0 && r.population.is_finite(), "{r:?}");
            assert!(r.gdp_per_capita > 0.0 && r.gdp_per_capita.is_finite(), "{r:?}");
            assert!(r.co2_per_capita > 0.0, "{r:?}");
            assert!(!is_aggregate(&r.country));
        }
    }

    #[test]
    fn seed_makes_output_reproducible() {
        let a = generate_sample(&SampleConfig { seed: Some(42) });
        let b = generate_sample(&SampleConfig { seed: Some(42) });
        let c = generate_sample(&SampleConfig { seed: Some(43) });
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn baseline_year_stays_near_anchor() {
        let records = generate_sample(&SampleConfig { seed: Some(1) });
        let china = records
            .iter()
            .find(|r| r.country == "China" && r.year == BASELINE_YEAR)
            .unwrap();
        // Five sigma of population noise.
        assert!((china.population / 1_424.0 - 1.0).abs() < 0.06);
    }

    #[test]
    fn trajectory_hits_endpoints() {
        assert!((trajectory(0.5, YEAR_MIN) - 0.5).abs() < 1e-12);
        assert!((trajectory(0.5, BASELINE_YEAR) - 1.0).abs() < 1e-12);
    }
}
