// Standard library
use std::cmp::Ordering;

// 3rd party crates
use tracing::debug;

// Project imports
use crate::location::LocationEstimate;
use crate::providers::ProviderResult;

// Current module imports
use super::constants::{
    CONSENSUS_PROVIDER_PREFIX, EARTH_RADIUS_KM, MAX_CONSENSUS_CONFIDENCE, MIN_CONSENSUS_ACCURACY,
    MIN_INPUTS_FOR_OUTLIERS, SPREAD_PENALTY,
};
use super::errors::ConsensusError;

/// Merges provider results into one estimate.
///
/// The result does not depend on the order of `results`: address fields
/// come from the most confident input, ties going to the provider name
/// that sorts first.
pub fn merge(results: &[ProviderResult]) -> Result<LocationEstimate, ConsensusError> {
    if results.is_empty() {
        return Err(ConsensusError::EmptyInput);
    }

    let weights: Vec<f64> = results
        .iter()
        .map(|r| (r.weight * r.estimate.confidence).max(0.0))
        .collect();
    let total_weight: f64 = weights.iter().sum();

    let (lat, lon) = if total_weight > 0.0 {
        let lat = results
            .iter()
            .zip(&weights)
            .map(|(r, w)| r.estimate.lat * w)
            .sum::<f64>()
            / total_weight;
        let lon = results
            .iter()
            .zip(&weights)
            .map(|(r, w)| r.estimate.lon * w)
            .sum::<f64>()
            / total_weight;
        (lat, lon)
    } else {
        (
            median(results.iter().map(|r| r.estimate.lat).collect()),
            median(results.iter().map(|r| r.estimate.lon).collect()),
        )
    };

    let mean_confidence =
        results.iter().map(|r| r.estimate.confidence).sum::<f64>() / results.len() as f64;

    let spread = results
        .iter()
        .map(|r| (r.estimate.lat - lat).abs() + (r.estimate.lon - lon).abs())
        .fold(0.0, f64::max);
    let accuracy = (1.0 - spread * SPREAD_PENALTY).clamp(MIN_CONSENSUS_ACCURACY, 1.0);

    let mut merged = LocationEstimate {
        lat,
        lon,
        accuracy,
        confidence: mean_confidence.min(MAX_CONSENSUS_CONFIDENCE),
        provider: format!("{}{}", CONSENSUS_PROVIDER_PREFIX, results.len()),
        ..Default::default()
    };

    if let Some(best) = most_confident(results) {
        merged.copy_details_from(&best.estimate);
    }

    debug!(
        inputs = results.len(),
        lat = merged.lat,
        lon = merged.lon,
        accuracy = merged.accuracy,
        "Merged provider results"
    );

    Ok(merged)
}

/// Drops results further than `radius_km` from the median point.
///
/// Needs at least three inputs; if every input would be dropped the
/// original set is returned unchanged.
pub fn reject_outliers(results: Vec<ProviderResult>, radius_km: f64) -> Vec<ProviderResult> {
    if results.len() < MIN_INPUTS_FOR_OUTLIERS {
        return results;
    }

    let center_lat = median(results.iter().map(|r| r.estimate.lat).collect());
    let center_lon = median(results.iter().map(|r| r.estimate.lon).collect());

    let (kept, dropped): (Vec<_>, Vec<_>) = results.iter().cloned().partition(|r| {
        haversine_km(center_lat, center_lon, r.estimate.lat, r.estimate.lon) <= radius_km
    });

    if kept.is_empty() {
        return results;
    }
    for outlier in &dropped {
        debug!(
            provider = %outlier.estimate.provider,
            lat = outlier.estimate.lat,
            lon = outlier.estimate.lon,
            "Discarding outlier"
        );
    }
    kept
}

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

fn most_confident(results: &[ProviderResult]) -> Option<&ProviderResult> {
    results.iter().min_by(|a, b| {
        b.estimate
            .confidence
            .partial_cmp(&a.estimate.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.estimate.provider.cmp(&b.estimate.provider))
    })
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    match values.len() {
        0 => 0.0,
        n if n % 2 == 0 => (values[mid - 1] + values[mid]) / 2.0,
        _ => values[mid],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(provider: &str, lat: f64, lon: f64, confidence: f64, weight: f64) -> ProviderResult {
        ProviderResult {
            estimate: LocationEstimate {
                lat,
                lon,
                accuracy: 0.6,
                confidence,
                provider: provider.to_string(),
                ..Default::default()
            },
            weight,
        }
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(merge(&[]), Err(ConsensusError::EmptyInput));
    }

    #[test]
    fn identical_inputs_agree_perfectly() {
        let inputs: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|name| result(name, 48.8566, 2.3522, 0.7, 0.2))
            .collect();

        let merged = merge(&inputs).unwrap();
        assert!((merged.lat - 48.8566).abs() < 1e-9);
        assert!((merged.lon - 2.3522).abs() < 1e-9);
        assert!((merged.accuracy - 1.0).abs() < 1e-9);
        assert_eq!(merged.provider, "consensus-3");
    }

    #[test]
    fn single_input_passes_through() {
        let mut only = result("maxmind", 40.0, -74.0, 0.8, 0.35);
        only.estimate.city = "New York".to_string();
        only.estimate.timezone = "America/New_York".to_string();

        let merged = merge(&[only]).unwrap();
        assert!((merged.lat - 40.0).abs() < 1e-9);
        assert!((merged.lon + 74.0).abs() < 1e-9);
        assert_eq!(merged.city, "New York");
        assert_eq!(merged.timezone, "America/New_York");
        assert_eq!(merged.confidence, 0.8);
        assert_eq!(merged.provider, "consensus-1");
    }

    #[test]
    fn merged_point_stays_within_inputs() {
        let inputs = vec![
            result("a", 48.80, 2.30, 0.8, 0.35),
            result("b", 48.90, 2.40, 0.6, 0.07),
            result("c", 48.85, 2.20, 0.65, 0.12),
        ];
        let merged = merge(&inputs).unwrap();
        assert!((48.80..=48.90).contains(&merged.lat));
        assert!((2.20..=2.40).contains(&merged.lon));
    }

    #[test]
    fn accuracy_drops_as_inputs_disagree() {
        let mut previous = f64::INFINITY;
        for offset in [0.0, 0.01, 0.05, 0.1, 0.5] {
            let inputs = vec![
                result("a", 10.0, 10.0, 0.7, 0.2),
                result("b", 10.0 + offset, 10.0 - offset, 0.7, 0.2),
            ];
            let accuracy = merge(&inputs).unwrap().accuracy;
            assert!(accuracy <= previous);
            assert!(accuracy >= MIN_CONSENSUS_ACCURACY);
            previous = accuracy;
        }
    }

    #[test]
    fn zero_weights_fall_back_to_median() {
        let inputs = vec![
            result("a", 1.0, 10.0, 0.5, 0.0),
            result("b", 3.0, 30.0, 0.5, 0.0),
            result("c", 2.0, 50.0, 0.5, 0.0),
            result("d", 9.0, 20.0, 0.5, 0.0),
        ];
        let merged = merge(&inputs).unwrap();
        assert_eq!(merged.lat, 2.5);
        assert_eq!(merged.lon, 25.0);
    }

    #[test]
    fn details_come_from_most_confident_regardless_of_order() {
        let mut low = result("ipapi", 48.85, 2.35, 0.6, 0.07);
        low.estimate.city = "Low".to_string();
        let mut high = result("maxmind", 48.86, 2.34, 0.8, 0.35);
        high.estimate.city = "High".to_string();
        let mut tied = result("ipgeolocation", 48.87, 2.36, 0.8, 0.25);
        tied.estimate.city = "Tied".to_string();

        let forward = merge(&[low.clone(), high.clone(), tied.clone()]).unwrap();
        let backward = merge(&[tied, high, low]).unwrap();

        assert_eq!(forward.city, "Tied");
        assert_eq!(backward.city, "Tied");
        assert!((forward.lat - backward.lat).abs() < 1e-9);
        assert!((forward.lon - backward.lon).abs() < 1e-9);
        assert_eq!(forward.accuracy_radius, backward.accuracy_radius);
    }

    #[test]
    fn confidence_is_capped() {
        let inputs = vec![result("a", 0.0, 0.0, 1.0, 0.5), result("b", 0.0, 0.0, 1.0, 0.5)];
        assert_eq!(merge(&inputs).unwrap().confidence, MAX_CONSENSUS_CONFIDENCE);
    }

    #[test]
    fn haversine_paris_to_london() {
        let km = haversine_km(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((km - 343.5).abs() < 2.0);
    }

    #[test]
    fn outliers_dropped_beyond_radius() {
        let inputs = vec![
            result("a", 48.85, 2.35, 0.7, 0.2),
            result("b", 48.86, 2.34, 0.7, 0.2),
            result("c", 40.71, -74.00, 0.7, 0.2),
        ];
        let kept = reject_outliers(inputs, 200.0);
        let names: Vec<_> = kept.iter().map(|r| r.estimate.provider.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn outlier_rejection_never_empties_the_set() {
        // The median of an even count sits between inputs, away from all of them.
        let inputs = vec![
            result("a", 0.0, 0.0, 0.7, 0.2),
            result("b", 10.0, 10.0, 0.7, 0.2),
            result("c", 20.0, 20.0, 0.7, 0.2),
            result("d", 30.0, 30.0, 0.7, 0.2),
        ];
        assert_eq!(reject_outliers(inputs.clone(), 1.0).len(), 4);
        assert_eq!(reject_outliers(inputs[..2].to_vec(), 1.0).len(), 2);
    }
}
