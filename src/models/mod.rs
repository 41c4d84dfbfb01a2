use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::search::SearchQuery;

/// One land parcel record as returned by the search backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub district_id: i64,
    #[serde(default)]
    pub district_name: Option<String>,
    pub mandal_id: i64,
    #[serde(default)]
    pub mandal_name: Option<String>,
    pub village_id: i64,
    #[serde(default)]
    pub village_name: Option<String>,
    pub survey_no: String,
    #[serde(default, deserialize_with = "integral_opt")]
    pub khata_id: Option<i64>,
    #[serde(default, deserialize_with = "integral_opt")]
    pub khata_label: Option<i64>,
    /// Registered owner (pattadar)
    #[serde(default, rename = "pattadar_name_en", alias = "pattadar_name")]
    pub pattadar_name: Option<String>,
    #[serde(
        default,
        rename = "father_or_husband_name_en",
        alias = "father_or_husband_name"
    )]
    pub father_or_husband_name: Option<String>,
    /// Pattadar passbook number
    #[serde(default)]
    pub ppb_number: Option<String>,
    #[serde(default)]
    pub ekyc_status: Option<String>,
    /// Total extent in acres
    #[serde(default)]
    pub total_extent_ac_gts: Option<f64>,
    #[serde(default)]
    pub land_status: Option<String>,
    #[serde(default)]
    pub land_type: Option<String>,
    #[serde(default)]
    pub market_value_inr: Option<f64>,
}

/// Integer field the backend may send as an integral float (`12.0`)
fn integral_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(n) = number.as_i64() {
        return Ok(Some(n));
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        _ => Err(D::Error::custom(format!(
            "expected an integral number, got {}",
            number
        ))),
    }
}

/// Body of a successful `/properties/search` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub count: u64,
    pub results: Vec<Property>,
}

/// Survey number known for a village
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyRecord {
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub district_name: Option<String>,
    #[serde(default)]
    pub mandal_id: Option<i64>,
    #[serde(default)]
    pub mandal_name: Option<String>,
    #[serde(default)]
    pub village_id: Option<i64>,
    #[serde(default)]
    pub village_name: Option<String>,
    #[serde(default)]
    pub survey_no: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyResponse {
    pub count: u64,
    pub results: Vec<SurveyRecord>,
}

/// Backend health as reported by `/health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub elasticsearch: bool,
    pub redis: bool,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Snapshot of a finished search, written to disk by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct SearchExport<'a> {
    pub searched_at: DateTime<Utc>,
    pub query: &'a SearchQuery,
    pub count: usize,
    pub results: &'a [Property],
}

impl<'a> SearchExport<'a> {
    pub fn new(query: &'a SearchQuery, results: &'a [Property]) -> Self {
        Self {
            searched_at: Utc::now(),
            query,
            count: results.len(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_optional_fields_absent_or_null() {
        let value = json!({
            "district_id": 12,
            "mandal_id": 34,
            "village_id": 56,
            "survey_no": "78",
            "district_name": null,
            "khata_id": null
        });

        let property: Property = serde_json::from_value(value).unwrap();

        assert_eq!(property.district_id, 12);
        assert_eq!(property.survey_no, "78");
        assert_eq!(property.district_name, None);
        assert_eq!(property.khata_id, None);
        assert_eq!(property.market_value_inr, None);
    }

    #[test]
    fn test_property_owner_names_accept_both_spellings() {
        let suffixed: Property = serde_json::from_value(json!({
            "district_id": 1,
            "mandal_id": 2,
            "village_id": 3,
            "survey_no": "4/A",
            "pattadar_name_en": "Ramesh",
            "father_or_husband_name_en": "Suresh"
        }))
        .unwrap();
        let plain: Property = serde_json::from_value(json!({
            "district_id": 1,
            "mandal_id": 2,
            "village_id": 3,
            "survey_no": "4/A",
            "pattadar_name": "Ramesh",
            "father_or_husband_name": "Suresh"
        }))
        .unwrap();

        assert_eq!(suffixed, plain);
        assert_eq!(plain.pattadar_name.as_deref(), Some("Ramesh"));
    }

    #[test]
    fn test_khata_fields_accept_integral_floats() {
        let response: SearchResponse = serde_json::from_value(json!({
            "count": 1,
            "results": [{
                "district_id": 1,
                "mandal_id": 2,
                "village_id": 3,
                "survey_no": "4",
                "khata_id": 1001,
                "khata_label": 12.0
            }]
        }))
        .unwrap();

        assert_eq!(response.results[0].khata_id, Some(1001));
        assert_eq!(response.results[0].khata_label, Some(12));
    }

    #[test]
    fn test_khata_label_null_and_fractional() {
        let base = json!({
            "district_id": 1,
            "mandal_id": 2,
            "village_id": 3,
            "survey_no": "4"
        });

        let mut with_null = base.clone();
        with_null["khata_label"] = json!(null);
        let property: Property = serde_json::from_value(with_null).unwrap();
        assert_eq!(property.khata_label, None);

        let mut fractional = base;
        fractional["khata_label"] = json!(12.5);
        assert!(serde_json::from_value::<Property>(fractional).is_err());
    }

    #[test]
    fn test_property_missing_required_field_is_rejected() {
        let result = serde_json::from_value::<Property>(json!({
            "district_id": 1,
            "mandal_id": 2,
            "survey_no": "4"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_search_response_keeps_backend_order() {
        let response: SearchResponse = serde_json::from_value(json!({
            "count": 2,
            "results": [
                {"district_id": 1, "mandal_id": 1, "village_id": 1, "survey_no": "9"},
                {"district_id": 1, "mandal_id": 1, "village_id": 1, "survey_no": "2"}
            ]
        }))
        .unwrap();

        let order: Vec<&str> = response.results.iter().map(|p| p.survey_no.as_str()).collect();
        assert_eq!(order, vec!["9", "2"]);
    }

    #[test]
    fn test_health_status() {
        let health: HealthStatus = serde_json::from_value(json!({
            "status": "degraded",
            "elasticsearch": true,
            "redis": false
        }))
        .unwrap();

        assert!(!health.is_ok());
    }
}
