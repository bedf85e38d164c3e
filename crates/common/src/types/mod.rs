use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Successful response body. `T` is fixed per endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub error: bool,
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { error: false, message: message.into(), data }
    }
}

/// Failure response body; never carries a payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub error: bool,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: true, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let body = serde_json::to_value(Envelope::ok("User registered with id 7", 7)).unwrap();
        assert_eq!(body, json!({"error": false, "message": "User registered with id 7", "data": 7}));
    }

    #[test]
    fn error_envelope_has_no_data() {
        let body = serde_json::to_value(ErrorEnvelope::new("invalid credentials")).unwrap();
        assert_eq!(body, json!({"error": true, "message": "invalid credentials"}));
    }
}
