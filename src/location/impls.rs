// Standard library
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// Current module imports
use super::errors::FieldMapError;
use super::types::{LocationEstimate, SourceType};

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Ip => "ip",
            SourceType::Gps => "gps",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = FieldMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ip" => Ok(SourceType::Ip),
            "gps" => Ok(SourceType::Gps),
            other => Err(FieldMapError::InvalidValue {
                field: "source_type",
                value: other.to_string(),
            }),
        }
    }
}

impl LocationEstimate {
    /// Bare caller-supplied coordinate, before any geocoding.
    pub fn from_coordinates(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            accuracy: 0.90,
            confidence: 0.90,
            provider: "gps".to_string(),
            source_type: SourceType::Gps,
            ..Default::default()
        }
    }

    /// Whether any structured address field is filled in.
    pub fn has_address(&self) -> bool {
        [
            &self.house_number,
            &self.road,
            &self.neighborhood,
            &self.suburb,
            &self.city,
            &self.postal_town,
            &self.district,
            &self.state,
            &self.country,
        ]
        .iter()
        .any(|field| !field.is_empty())
    }

    /// Copies every textual field (and the radius) from `other`, leaving
    /// coordinates, scores, provider and source untouched.
    pub fn copy_details_from(&mut self, other: &LocationEstimate) {
        self.city = other.city.clone();
        self.state = other.state.clone();
        self.country = other.country.clone();
        self.country_code = other.country_code.clone();
        self.suburb = other.suburb.clone();
        self.neighborhood = other.neighborhood.clone();
        self.road = other.road.clone();
        self.house_number = other.house_number.clone();
        self.postal_code = other.postal_code.clone();
        self.formatted_address = other.formatted_address.clone();
        self.postal_town = other.postal_town.clone();
        self.district = other.district.clone();
        self.timezone = other.timezone.clone();
        self.accuracy_radius = other.accuracy_radius;
    }

    /// Flattens the estimate into `(field, value)` pairs for hash storage.
    pub fn to_field_map(&self) -> Vec<(&'static str, String)> {
        vec![
            ("lat", self.lat.to_string()),
            ("lon", self.lon.to_string()),
            ("accuracy", self.accuracy.to_string()),
            ("confidence", self.confidence.to_string()),
            ("provider", self.provider.clone()),
            ("source_type", self.source_type.to_string()),
            ("city", self.city.clone()),
            ("state", self.state.clone()),
            ("country", self.country.clone()),
            ("country_code", self.country_code.clone()),
            ("suburb", self.suburb.clone()),
            ("neighborhood", self.neighborhood.clone()),
            ("road", self.road.clone()),
            ("house_number", self.house_number.clone()),
            ("postal_code", self.postal_code.clone()),
            ("formatted_address", self.formatted_address.clone()),
            ("postal_town", self.postal_town.clone()),
            ("district", self.district.clone()),
            ("timezone", self.timezone.clone()),
            ("accuracy_radius", self.accuracy_radius.to_string()),
        ]
    }

    /// Rebuilds an estimate from a flat field map.
    ///
    /// Coordinates and scores are required; text fields default to empty.
    pub fn from_field_map(fields: &HashMap<String, String>) -> Result<Self, FieldMapError> {
        let text = |name: &str| fields.get(name).cloned().unwrap_or_default();

        Ok(Self {
            lat: required_f64(fields, "lat")?,
            lon: required_f64(fields, "lon")?,
            accuracy: required_f64(fields, "accuracy")?,
            confidence: required_f64(fields, "confidence")?,
            provider: text("provider"),
            source_type: match fields.get("source_type") {
                Some(value) => value.parse()?,
                None => SourceType::default(),
            },
            city: text("city"),
            state: text("state"),
            country: text("country"),
            country_code: text("country_code"),
            suburb: text("suburb"),
            neighborhood: text("neighborhood"),
            road: text("road"),
            house_number: text("house_number"),
            postal_code: text("postal_code"),
            formatted_address: text("formatted_address"),
            postal_town: text("postal_town"),
            district: text("district"),
            timezone: text("timezone"),
            accuracy_radius: match fields.get("accuracy_radius") {
                Some(_) => required_f64(fields, "accuracy_radius")?,
                None => 0.0,
            },
        })
    }
}

fn required_f64(fields: &HashMap<String, String>, name: &'static str) -> Result<f64, FieldMapError> {
    let raw = fields.get(name).ok_or(FieldMapError::MissingField(name))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| FieldMapError::InvalidValue {
            field: name,
            value: raw.clone(),
        })
}
