use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::error::ApiError;
use super::query::RecommendationQuery;
use crate::catalog::Phone;

/// Request recommendations and decode them into phone records.
///
/// Non-2xx answers become `ApiError::Status`. The order of the returned
/// list is the server's order.
pub async fn search_phones(
    client: &reqwest::Client,
    base_url: &str,
    query: &RecommendationQuery,
) -> Result<Vec<Phone>> {
    let url = query.url(base_url)?;
    debug!(%url, "requesting recommendations");

    let response = client
        .get(url.clone())
        .header("Accept", "application/json")
        .send()
        .await
        .with_context(|| format!("Failed to reach recommendation service at {}", base_url))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read recommendation response")?;

    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16(), &body).into());
    }

    Ok(decode_phones(&body)?)
}

/// Decode a response body.
///
/// A body that is valid JSON but not an array yields no results. Elements
/// that are not objects are skipped. Inside an object, a field with the
/// wrong JSON type reads as absent and the rest of the record is kept.
pub fn decode_phones(body: &str) -> Result<Vec<Phone>, ApiError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    let Value::Array(items) = value else {
        warn!("recommendation response is not a list, treating as empty");
        return Ok(Vec::new());
    };

    let total = items.len();
    let phones: Vec<Phone> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            Value::Object(map) => decode_phone(i, map),
            other => {
                warn!(index = i, kind = json_kind(&other), "skipping non-object result");
                None
            }
        })
        .collect();

    debug!(received = total, decoded = phones.len(), "decoded recommendations");
    Ok(phones)
}

fn decode_phone(index: usize, map: Map<String, Value>) -> Option<Phone> {
    match serde_json::from_value::<Phone>(Value::Object(map)) {
        Ok(phone) => Some(phone),
        Err(e) => {
            warn!(index, error = %e, "skipping undecodable result");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    #[test]
    fn test_decode_list() {
        let body = r#"[
            {"model": "Pixel 9", "slug": "pixel-9", "price_sgd": "1299.00",
             "raw_score": 8.1, "smartbuy_score": 0.62, "score": 0.8,
             "score_breakdown": {"camera": 9.0}, "id": 3},
            {"model": "Galaxy A55", "slug": "galaxy-a55", "raw_score": 6.4}
        ]"#;
        let phones = decode_phones(body).unwrap();
        assert_eq!(phones.len(), 2);
        assert_eq!(phones[0].price(), Some(1299.0));
        assert_eq!(phones[0].extra.get("id"), Some(&serde_json::json!(3)));
        assert_eq!(phones[1].display_name(), "Galaxy A55");
    }

    #[test]
    fn test_non_array_is_empty() {
        assert!(decode_phones(r#"{"results": []}"#).unwrap().is_empty());
        assert!(decode_phones("null").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(decode_phones("<html>"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_non_objects_skipped() {
        let phones = decode_phones(r#"[1, {"model": "A"}, "x", null]"#).unwrap();
        assert_eq!(phones.len(), 1);
        assert_eq!(phones[0].model.as_deref(), Some("A"));
    }

    #[test]
    fn test_mistyped_field_reads_as_absent() {
        let body = r#"[{"model": "Odd", "ram_gb": "lots", "raw_score": "n/a", "smartbuy_score": 1.2}]"#;
        let phones = decode_phones(body).unwrap();
        assert_eq!(phones.len(), 1);
        let phone = &phones[0];
        assert_eq!(phone.model.as_deref(), Some("Odd"));
        assert_eq!(phone.ram_gb, None);
        assert_eq!(phone.raw_score_value(), None);
        assert_eq!(phone.smartbuy_value(), Some(1.2));
    }

    #[test]
    fn test_mistyped_field_keeps_other_fields() {
        let body = r#"[{"model": "X", "ram_gb": "8", "battery_mah": 5000,
                        "has_nfc": "yes", "scraped_at": 17,
                        "score_breakdown": {"camera": 9.0}, "raw_score": 7.0}]"#;
        let phones = decode_phones(body).unwrap();
        let phone = &phones[0];
        assert_eq!(phone.ram_gb, None);
        assert_eq!(phone.has_nfc, None);
        assert_eq!(phone.scraped_at, None);
        assert_eq!(phone.battery_mah, Some(5000.0));
        assert_eq!(phone.breakdown_value(Category::Camera), Some(9.0));
        assert_eq!(phone.raw_score_value(), Some(7.0));
        assert_eq!(phone.spec_summary(Category::Battery), "5000 mAh");
    }

    #[test]
    fn test_non_string_model_falls_back_to_slug() {
        let body = r#"[{"model": 42, "slug": "odd-one", "score_breakdown": [1, 2]}]"#;
        let phones = decode_phones(body).unwrap();
        assert_eq!(phones[0].model, None);
        assert_eq!(phones[0].score_breakdown, None);
        assert_eq!(phones[0].display_name(), "odd-one");
    }
}
