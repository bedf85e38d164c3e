use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditCategory {
    Authentication,
    Registration,
}

impl fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditCategory::Authentication => f.write_str("authentication"),
            AuditCategory::Registration => f.write_str("registration"),
        }
    }
}

/// Wire form accepted by the log service: `{"name": <category>, "data": <detail>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub name: AuditCategory,
    pub data: String,
}

impl AuditEvent {
    pub fn new(name: AuditCategory, data: impl Into<String>) -> Self {
        Self { name, data: data.into() }
    }

    pub fn authentication(email: &str) -> Self {
        Self::new(AuditCategory::Authentication, format!("{email} logged in"))
    }

    pub fn registration(id: i32, email: &str) -> Self {
        Self::new(AuditCategory::Registration, format!("{id} user registered with the email:{email}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_log_service_shape() {
        let body = serde_json::to_value(AuditEvent::authentication("a@x.com")).unwrap();
        assert_eq!(body, json!({"name": "authentication", "data": "a@x.com logged in"}));
    }

    #[test]
    fn registration_detail_names_id_and_email() {
        let event = AuditEvent::registration(42, "a@x.com");
        assert_eq!(event.name, AuditCategory::Registration);
        assert_eq!(event.data, "42 user registered with the email:a@x.com");
        assert_eq!(event.name.to_string(), "registration");
    }
}
