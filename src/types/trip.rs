use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationError};

pub const DEFAULT_START_LOCATION: &str = "Amsterdam Centraal";
pub const DEFAULT_NUMBER_OF_TRAVELERS: u32 = 4;
pub const DEFAULT_MAX_TRAVEL_TIME_PER_DAY: u32 = 6;
pub const DEFAULT_TRANSPORT_TYPE: &str = "Interrail-Global Pass";

const DISPLAY_DATE_FORMAT: &str = "%-d %B %Y";

/// Raw trip parameters as submitted by a client.
///
/// Every field is optional here so that a missing value surfaces as a
/// [`ValidationError`] naming the field instead of an opaque decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequestPayload {
    #[serde(default, alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(default, alias = "end_date")]
    pub end_date: Option<String>,
    #[serde(default, alias = "preferred_locations")]
    pub preferred_locations: Option<Vec<String>>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default, alias = "start_location")]
    pub start_location: Option<String>,
    #[serde(default, alias = "number_of_travelers")]
    pub number_of_travelers: Option<i64>,
    #[serde(default, alias = "max_travel_time_per_day")]
    pub max_travel_time_per_day: Option<i64>,
    #[serde(default, alias = "transport_type")]
    pub transport_type: Option<String>,
}

/// Validated, immutable trip parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    start_date: NaiveDate,
    end_date: NaiveDate,
    preferred_locations: Vec<String>,
    interests: Vec<String>,
    start_location: String,
    number_of_travelers: u32,
    max_travel_time_per_day: u32,
    transport_type: String,
}

impl TripRequest {
    /// Typed constructor; optional fields take their defaults until overridden.
    pub fn builder(
        start_date: NaiveDate,
        end_date: NaiveDate,
        preferred_locations: Vec<String>,
        interests: Vec<String>,
    ) -> TripRequestBuilder {
        TripRequestBuilder {
            start_date,
            end_date,
            preferred_locations,
            interests,
            start_location: DEFAULT_START_LOCATION.to_string(),
            number_of_travelers: DEFAULT_NUMBER_OF_TRAVELERS,
            max_travel_time_per_day: DEFAULT_MAX_TRAVEL_TIME_PER_DAY,
            transport_type: DEFAULT_TRANSPORT_TYPE.to_string(),
        }
    }

    /// Decode raw JSON bytes and validate them.
    ///
    /// Type mismatches are reported with the JSON path of the offending value.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ValidationError> {
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        let payload: TripRequestPayload = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|err| {
                let path = err.path().to_string();
                let field = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                ValidationError::single(field, err.into_inner().to_string())
            })?;

        Self::from_payload(payload)
    }

    /// Validate every field of `payload`, collecting all problems before failing.
    pub fn from_payload(payload: TripRequestPayload) -> Result<Self, ValidationError> {
        let mut errors = Vec::new();

        let start_date = required_date("startDate", payload.start_date, &mut errors);
        let end_date = required_date("endDate", payload.end_date, &mut errors);
        let preferred_locations = required_list(
            "preferredLocations",
            payload.preferred_locations,
            &mut errors,
        );
        let interests = required_list("interests", payload.interests, &mut errors);
        let start_location = optional_text(
            "startLocation",
            payload.start_location,
            DEFAULT_START_LOCATION,
            &mut errors,
        );
        let number_of_travelers = positive(
            "numberOfTravelers",
            payload.number_of_travelers,
            DEFAULT_NUMBER_OF_TRAVELERS,
            &mut errors,
        );
        let max_travel_time_per_day = positive(
            "maxTravelTimePerDay",
            payload.max_travel_time_per_day,
            DEFAULT_MAX_TRAVEL_TIME_PER_DAY,
            &mut errors,
        );
        let transport_type = optional_text(
            "transportType",
            payload.transport_type,
            DEFAULT_TRANSPORT_TYPE,
            &mut errors,
        );

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                errors.push(FieldError::new(
                    "endDate",
                    format!("must not be before startDate ({start})"),
                ));
            }
        }

        match (start_date, end_date, preferred_locations, interests) {
            (Some(start_date), Some(end_date), Some(preferred_locations), Some(interests))
                if errors.is_empty() =>
            {
                Ok(Self {
                    start_date,
                    end_date,
                    preferred_locations,
                    interests,
                    start_location,
                    number_of_travelers,
                    max_travel_time_per_day,
                    transport_type,
                })
            }
            _ => Err(ValidationError::new(errors)),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn preferred_locations(&self) -> &[String] {
        &self.preferred_locations
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn start_location(&self) -> &str {
        &self.start_location
    }

    pub fn number_of_travelers(&self) -> u32 {
        self.number_of_travelers
    }

    pub fn max_travel_time_per_day(&self) -> u32 {
        self.max_travel_time_per_day
    }

    pub fn transport_type(&self) -> &str {
        &self.transport_type
    }

    /// Soft per-leg target: one hour under the hard limit.
    pub fn preferred_travel_time(&self) -> u32 {
        self.max_travel_time_per_day.saturating_sub(1)
    }

    /// e.g. "10 May 2025"
    pub fn formatted_start_date(&self) -> String {
        self.start_date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    pub fn formatted_end_date(&self) -> String {
        self.end_date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    pub fn preferred_locations_string(&self) -> String {
        self.preferred_locations.join(", ")
    }

    pub fn interests_string(&self) -> String {
        self.interests.join(", ")
    }
}

/// Builder returned by [`TripRequest::builder`].
#[derive(Debug, Clone)]
pub struct TripRequestBuilder {
    start_date: NaiveDate,
    end_date: NaiveDate,
    preferred_locations: Vec<String>,
    interests: Vec<String>,
    start_location: String,
    number_of_travelers: u32,
    max_travel_time_per_day: u32,
    transport_type: String,
}

impl TripRequestBuilder {
    pub fn with_start_location(mut self, start_location: impl Into<String>) -> Self {
        self.start_location = start_location.into();
        self
    }

    pub fn with_number_of_travelers(mut self, number_of_travelers: u32) -> Self {
        self.number_of_travelers = number_of_travelers;
        self
    }

    pub fn with_max_travel_time_per_day(mut self, hours: u32) -> Self {
        self.max_travel_time_per_day = hours;
        self
    }

    pub fn with_transport_type(mut self, transport_type: impl Into<String>) -> Self {
        self.transport_type = transport_type.into();
        self
    }

    /// Run the same checks as [`TripRequest::from_payload`].
    pub fn build(self) -> Result<TripRequest, ValidationError> {
        TripRequest::from_payload(TripRequestPayload {
            start_date: Some(self.start_date.to_string()),
            end_date: Some(self.end_date.to_string()),
            preferred_locations: Some(self.preferred_locations),
            interests: Some(self.interests),
            start_location: Some(self.start_location),
            number_of_travelers: Some(i64::from(self.number_of_travelers)),
            max_travel_time_per_day: Some(i64::from(self.max_travel_time_per_day)),
            transport_type: Some(self.transport_type),
        })
    }
}

/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is used.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn required_date(
    field: &str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    let Some(raw) = value.filter(|raw| !raw.trim().is_empty()) else {
        errors.push(FieldError::new(field, "is required"));
        return None;
    };

    let parsed = parse_date(&raw);
    if parsed.is_none() {
        errors.push(FieldError::new(
            field,
            format!("{raw:?} is not a valid date (expected YYYY-MM-DD)"),
        ));
    }
    parsed
}

fn required_list(
    field: &str,
    value: Option<Vec<String>>,
    errors: &mut Vec<FieldError>,
) -> Option<Vec<String>> {
    let Some(items) = value else {
        errors.push(FieldError::new(field, "is required"));
        return None;
    };

    if items.is_empty() {
        errors.push(FieldError::new(field, "must contain at least one entry"));
        return None;
    }

    let mut valid = true;
    let mut cleaned = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            errors.push(FieldError::new(format!("{field}[{idx}]"), "must not be blank"));
            valid = false;
        } else {
            cleaned.push(trimmed.to_string());
        }
    }

    valid.then_some(cleaned)
}

fn optional_text(
    field: &str,
    value: Option<String>,
    default: &str,
    errors: &mut Vec<FieldError>,
) -> String {
    match value {
        None => default.to_string(),
        Some(text) if text.trim().is_empty() => {
            errors.push(FieldError::new(field, "must not be blank"));
            default.to_string()
        }
        Some(text) => text.trim().to_string(),
    }
}

fn positive(field: &str, value: Option<i64>, default: u32, errors: &mut Vec<FieldError>) -> u32 {
    match value {
        None => default,
        Some(number) => match u32::try_from(number) {
            Ok(number) if number > 0 => number,
            _ => {
                errors.push(FieldError::new(
                    field,
                    format!("must be a positive integer (got {number})"),
                ));
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builder_applies_defaults() {
        let request = TripRequest::builder(
            date("2025-05-10"),
            date("2025-05-20"),
            strings(&["Paris"]),
            strings(&["culture"]),
        )
        .build()
        .unwrap();

        assert_eq!(request.start_location(), "Amsterdam Centraal");
        assert_eq!(request.number_of_travelers(), 4);
        assert_eq!(request.max_travel_time_per_day(), 6);
        assert_eq!(request.transport_type(), "Interrail-Global Pass");
        assert_eq!(request.preferred_travel_time(), 5);
    }

    #[test]
    fn test_derived_accessors() {
        let request = TripRequest::builder(
            date("2025-05-10"),
            date("2025-05-20"),
            strings(&["Paris", "Zurich", "Milan"]),
            strings(&["culture", "local food"]),
        )
        .build()
        .unwrap();

        assert_eq!(request.formatted_start_date(), "10 May 2025");
        assert_eq!(request.formatted_end_date(), "20 May 2025");
        assert_eq!(
            request.formatted_start_date(),
            date("2025-05-10").format("%-d %B %Y").to_string()
        );
        assert_eq!(request.preferred_locations_string(), "Paris, Zurich, Milan");
        assert_eq!(request.interests_string(), "culture, local food");
    }

    #[test]
    fn test_from_json_camel_case() {
        let body = json!({
            "startDate": "2025-05-10",
            "endDate": "2025-05-20",
            "preferredLocations": ["Paris", "Zurich"],
            "interests": ["hiking"],
            "numberOfTravelers": 2,
            "maxTravelTimePerDay": 4,
            "transportType": "Eurail Pass"
        });

        let request = TripRequest::from_json(body.to_string().as_bytes()).unwrap();
        assert_eq!(request.number_of_travelers(), 2);
        assert_eq!(request.max_travel_time_per_day(), 4);
        assert_eq!(request.transport_type(), "Eurail Pass");
        assert_eq!(request.start_location(), DEFAULT_START_LOCATION);
    }

    #[test]
    fn test_from_json_snake_case_aliases() {
        let body = json!({
            "start_date": "2025-05-10",
            "end_date": "2025-05-10",
            "preferred_locations": ["Ghent"],
            "interests": ["beer"],
            "start_location": "Brussels-Midi"
        });

        let request = TripRequest::from_json(body.to_string().as_bytes()).unwrap();
        assert_eq!(request.start_location(), "Brussels-Midi");
        assert_eq!(request.start_date(), request.end_date());
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let err = TripRequest::from_json(br#"{"interests": ["art"]}"#).unwrap_err();

        assert!(err.has_field("startDate"));
        assert!(err.has_field("endDate"));
        assert!(err.has_field("preferredLocations"));
        assert!(!err.has_field("interests"));
    }

    #[test]
    fn test_rejects_bad_values() {
        let payload = TripRequestPayload {
            start_date: Some("2025-05-20".to_string()),
            end_date: Some("2025-05-10".to_string()),
            preferred_locations: Some(strings(&["Paris", "  "])),
            interests: Some(vec![]),
            number_of_travelers: Some(0),
            max_travel_time_per_day: Some(-3),
            ..Default::default()
        };

        let err = TripRequest::from_payload(payload).unwrap_err();
        assert!(err.has_field("endDate"));
        assert!(err.has_field("preferredLocations[1]"));
        assert!(err.has_field("interests"));
        assert!(err.has_field("numberOfTravelers"));
        assert!(err.has_field("maxTravelTimePerDay"));
    }

    #[test]
    fn test_builder_rejects_zero_hours() {
        let err = TripRequest::builder(
            date("2025-05-10"),
            date("2025-05-20"),
            strings(&["Paris"]),
            strings(&["culture"]),
        )
        .with_max_travel_time_per_day(0)
        .build()
        .unwrap_err();

        assert_eq!(err.field_names(), vec!["maxTravelTimePerDay"]);
    }

    #[test]
    fn test_type_mismatch_names_path() {
        let err = TripRequest::from_json(
            br#"{"startDate": "2025-05-10", "endDate": "2025-05-12", "preferredLocations": "Paris", "interests": ["x"]}"#,
        )
        .unwrap_err();

        assert_eq!(err.field_names(), vec!["preferredLocations"]);
    }

    #[test]
    fn test_invalid_date_and_timestamp() {
        assert_eq!(parse_date("2025-05-10"), Some(date("2025-05-10")));
        assert_eq!(
            parse_date("2025-05-10T08:30:00+02:00"),
            Some(date("2025-05-10"))
        );
        assert_eq!(parse_date("10/05/2025"), None);
    }
}
