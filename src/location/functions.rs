// Current module imports
use super::constants::{
    ADDRESS_SEPARATOR, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
    UNKNOWN_LOCATION,
};
use super::types::LocationEstimate;

/// Returns true when both values are finite and inside the WGS84 ranges.
pub fn validate_coordinates(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (MIN_LATITUDE..=MAX_LATITUDE).contains(&lat)
        && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lon)
}

/// Builds a one-line postal address from the structured fields.
///
/// Order: house number and road, neighborhood (or suburb), city (or postal
/// town), state (or district), country. Falls back to the stored formatted
/// address, then to `"Unknown Location"`.
pub fn format_address(location: &LocationEstimate) -> String {
    let mut parts: Vec<String> = Vec::new();

    match (location.house_number.is_empty(), location.road.is_empty()) {
        (false, false) => parts.push(format!("{} {}", location.house_number, location.road)),
        (true, false) => parts.push(location.road.clone()),
        _ => {}
    }

    if let Some(area) = first_non_empty(&[&location.neighborhood, &location.suburb]) {
        parts.push(area.to_string());
    }
    if let Some(city) = first_non_empty(&[&location.city, &location.postal_town]) {
        parts.push(city.to_string());
    }
    if let Some(region) = first_non_empty(&[&location.state, &location.district]) {
        parts.push(region.to_string());
    }
    if !location.country.is_empty() {
        parts.push(location.country.clone());
    }

    if !parts.is_empty() {
        return parts.join(ADDRESS_SEPARATOR);
    }

    if !location.formatted_address.trim().is_empty() {
        return location.formatted_address.clone();
    }

    UNKNOWN_LOCATION.to_string()
}

fn first_non_empty<'a>(candidates: &[&'a String]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|value| !value.is_empty())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_and_country_only() {
        let location = LocationEstimate {
            city: "Paris".to_string(),
            country: "France".to_string(),
            ..Default::default()
        };
        assert_eq!(format_address(&location), "Paris, France");
    }

    #[test]
    fn empty_estimate_is_unknown() {
        let location = LocationEstimate::default();
        assert_eq!(format_address(&location), "Unknown Location");
    }

    #[test]
    fn full_street_address() {
        let location = LocationEstimate {
            house_number: "10".to_string(),
            road: "Downing Street".to_string(),
            neighborhood: "Whitehall".to_string(),
            city: "London".to_string(),
            state: "England".to_string(),
            country: "United Kingdom".to_string(),
            ..Default::default()
        };
        assert_eq!(
            format_address(&location),
            "10 Downing Street, Whitehall, London, England, United Kingdom"
        );
    }

    #[test]
    fn house_number_without_road_is_dropped() {
        let location = LocationEstimate {
            house_number: "42".to_string(),
            city: "Oslo".to_string(),
            ..Default::default()
        };
        assert_eq!(format_address(&location), "Oslo");
    }

    #[test]
    fn neighborhood_wins_over_suburb() {
        let location = LocationEstimate {
            suburb: "Le Marais".to_string(),
            neighborhood: "Saint-Gervais".to_string(),
            city: "Paris".to_string(),
            ..Default::default()
        };
        assert_eq!(format_address(&location), "Saint-Gervais, Paris");

        let location = LocationEstimate {
            suburb: "Le Marais".to_string(),
            city: "Paris".to_string(),
            ..Default::default()
        };
        assert_eq!(format_address(&location), "Le Marais, Paris");
    }

    #[test]
    fn secondary_fields_fill_gaps() {
        let location = LocationEstimate {
            postal_town: "Bath".to_string(),
            district: "Somerset".to_string(),
            ..Default::default()
        };
        assert_eq!(format_address(&location), "Bath, Somerset");
    }

    #[test]
    fn formatted_address_used_when_no_parts() {
        let location = LocationEstimate {
            formatted_address: "Somewhere over the rainbow".to_string(),
            ..Default::default()
        };
        assert_eq!(format_address(&location), "Somewhere over the rainbow");
    }

    #[test]
    fn coordinate_bounds() {
        assert!(validate_coordinates(90.0, 180.0));
        assert!(validate_coordinates(-90.0, -180.0));
        assert!(validate_coordinates(0.0, 0.0));
        assert!(!validate_coordinates(90.0001, 0.0));
        assert!(!validate_coordinates(0.0, -180.5));
        assert!(!validate_coordinates(f64::NAN, 0.0));
        assert!(!validate_coordinates(0.0, f64::INFINITY));
    }
}
