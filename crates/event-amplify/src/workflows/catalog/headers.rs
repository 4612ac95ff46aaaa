//! Alert headers consumed by the admin front end after every mutation.

use axum::http::header::{HeaderName, LOCATION};
use axum::http::{HeaderMap, HeaderValue};

pub const APPLICATION_NAME: &str = "eventAmplifyApp";

const ALERT_HEADER: HeaderName = HeaderName::from_static("x-eventamplifyapp-alert");
const ERROR_HEADER: HeaderName = HeaderName::from_static("x-eventamplifyapp-error");
const PARAMS_HEADER: HeaderName = HeaderName::from_static("x-eventamplifyapp-params");
const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}

fn alert(message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ALERT_HEADER, message);
    insert(&mut headers, PARAMS_HEADER, param);
    headers
}

pub fn entity_creation_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity_name}.created"), param)
}

pub fn entity_update_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity_name}.updated"), param)
}

pub fn entity_deletion_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(&format!("{APPLICATION_NAME}.{entity_name}.deleted"), param)
}

pub fn failure_alert(entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ERROR_HEADER, &format!("error.{error_key}"));
    insert(&mut headers, PARAMS_HEADER, entity_name);
    headers
}

pub fn with_location(mut headers: HeaderMap, location: &str) -> HeaderMap {
    insert(&mut headers, LOCATION, location);
    headers
}

pub fn total_count(count: usize) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(count));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_alert_names_entity_and_id() {
        let headers = entity_creation_alert("brandkey", "7");
        assert_eq!(
            headers.get("X-eventAmplifyApp-alert").and_then(|v| v.to_str().ok()),
            Some("eventAmplifyApp.brandkey.created")
        );
        assert_eq!(
            headers.get("X-eventAmplifyApp-params").and_then(|v| v.to_str().ok()),
            Some("7")
        );
    }

    #[test]
    fn failure_alert_carries_error_key() {
        let headers = failure_alert("event", "idexists");
        assert_eq!(
            headers.get(ERROR_HEADER).and_then(|v| v.to_str().ok()),
            Some("error.idexists")
        );
        assert_eq!(
            headers.get(PARAMS_HEADER).and_then(|v| v.to_str().ok()),
            Some("event")
        );
    }
}
