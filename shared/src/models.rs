use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ═══════════════════════════════════════════════════════════════════════════
// APPLICATION REGISTRY TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// Exact length of an application code
pub const CODE_LENGTH: usize = 9;
/// Minimum length for an application name
pub const NAME_MIN_LENGTH: usize = 3;
/// Maximum length for an application name
pub const NAME_MAX_LENGTH: usize = 50;
/// Minimum length for an application description
pub const DESC_MIN_LENGTH: usize = 3;
/// Maximum length for an application description
pub const DESC_MAX_LENGTH: usize = 250;

/// Represents a registered application
///
/// `id` is assigned by the store on insert and is absent before that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Application {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub code: String,
    pub name: String,
    #[sqlx(rename = "description")]
    pub desc: String,
}

/// Request body for registering an application
///
/// Every field is optional at the parse level so that a missing field is
/// reported by body validation rather than rejected by the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

impl ApplicationRequest {
    pub fn new(code: impl Into<String>, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            name: Some(name.into()),
            desc: Some(desc.into()),
        }
    }

    /// Convert a validated request into an insertable record.
    ///
    /// Returns `None` if any field is missing; callers run body validation
    /// first, so this only fails on a skipped validation step.
    pub fn into_new_application(self) -> Option<NewApplication> {
        Some(NewApplication {
            code: self.code?,
            name: self.name?,
            desc: self.desc?,
        })
    }
}

/// An application that passed validation and has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub code: String,
    pub name: String,
    pub desc: String,
}

impl NewApplication {
    /// Attach the store-generated identifier.
    pub fn with_id(self, id: Uuid) -> Application {
        Application {
            id: Some(id),
            code: self.code,
            name: self.name,
            desc: self.desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_serializes_desc_key() {
        let app = Application {
            id: None,
            code: "200005405".to_string(),
            name: "Credit Finance Edge".to_string(),
            desc: "AR for NCL".to_string(),
        };

        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "code": "200005405",
                "name": "Credit Finance Edge",
                "desc": "AR for NCL"
            })
        );
    }

    #[test]
    fn test_request_tolerates_missing_fields_and_client_id() {
        let req: ApplicationRequest =
            serde_json::from_str(r#"{"id": "ignored", "name": "Credit Finance Edge"}"#).unwrap();
        assert_eq!(req.code, None);
        assert_eq!(req.name.as_deref(), Some("Credit Finance Edge"));
        assert_eq!(req.desc, None);
    }

    #[test]
    fn test_into_new_application_requires_all_fields() {
        let partial = ApplicationRequest {
            code: Some("200005405".to_string()),
            ..Default::default()
        };
        assert!(partial.into_new_application().is_none());

        let full = ApplicationRequest::new("200005405", "Credit Finance Edge", "AR for NCL");
        let new_app = full.into_new_application().unwrap();
        let id = Uuid::new_v4();
        let stored = new_app.with_id(id);
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.code, "200005405");
    }
}
