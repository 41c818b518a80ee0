use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const GREETING_MESSAGE: &str = "Hello World from Rust!";
pub const GREETING_LANGUAGE: &str = "Rust";
pub const GREETING_RUNTIME: &str = "provided.al2023";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// The event is ignored entirely; every invocation gets the same greeting.
pub fn handle_say_hello(_event: &Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 200,
        headers: json!({"Content-Type": "application/json"}),
        body: json!({
            "message": GREETING_MESSAGE,
            "language": GREETING_LANGUAGE,
            "runtime": GREETING_RUNTIME,
        })
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greets_with_status_200_for_any_event() {
        let events = [
            json!({}),
            Value::Null,
            json!("not an object"),
            json!({"body": "{malformed", "headers": 42}),
            json!([1, 2, 3]),
        ];

        for event in events {
            let response = handle_say_hello(&event);
            assert_eq!(response.status_code, 200);

            let body: Value = serde_json::from_str(&response.body).expect("body should be json");
            assert_eq!(body["message"], GREETING_MESSAGE);
            assert_eq!(body["language"], GREETING_LANGUAGE);
            assert_eq!(body["runtime"], GREETING_RUNTIME);
        }
    }

    #[test]
    fn serializes_status_code_in_api_gateway_shape() {
        let value = serde_json::to_value(handle_say_hello(&Value::Null)).expect("serialize");
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["headers"]["Content-Type"], "application/json");
        assert!(value["body"].is_string());
    }
}
