//! User and profile models

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// Editable profile fields
///
/// Used both as the create-user embedded profile and as the body of
/// `PUT /profiles/me`. Empty strings are sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ProfileFields {
    /// Turn blank strings into `None`
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.title,
            &mut self.first_name,
            &mut self.last_name,
            &mut self.phone,
            &mut self.country,
            &mut self.city,
            &mut self.address,
        ] {
            if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }
}

/// Profile as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub fields: ProfileFields,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<NaiveDateTime>,
}

/// Role reference as embedded in a user; older payloads send a bare name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRef {
    Named { name: String },
    Name(String),
}

impl RoleRef {
    pub fn name(&self) -> &str {
        match self {
            RoleRef::Named { name } | RoleRef::Name(name) => name,
        }
    }
}

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub role: Option<RoleRef>,
    #[serde(default)]
    pub role_name: Option<String>,
    /// The "active" flag
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_login: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub modified_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.is_verified
    }

    /// Display name of the role, checking every shape the backend uses
    pub fn role_label(&self) -> &str {
        self.role
            .as_ref()
            .map(RoleRef::name)
            .or(self.role_name.as_deref())
            .unwrap_or("N/A")
    }
}

/// Create user payload (`POST /users/create`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub role_id: Option<i64>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub profile: Option<ProfileFields>,
}

/// Update user payload (`PUT /users/{id}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

/// `PUT /users/{id}/role`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub role_id: i64,
}

/// `PUT /users/{id}/verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationUpdate {
    pub is_verified: bool,
}

/// Accepts naive or offset-carrying ISO timestamps, and anything else as `None`
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        chrono::DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.naive_utc())
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f").ok())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_shapes() {
        let nested: User = serde_json::from_str(
            r#"{"id":1,"username":"alice","email":"a@x.io","role":{"name":"admin"},"is_verified":true}"#,
        )
        .unwrap();
        assert_eq!(nested.role_label(), "admin");
        assert!(nested.is_active());

        let flat: User = serde_json::from_str(
            r#"{"id":2,"username":"bob","email":"b@x.io","role_name":"editor"}"#,
        )
        .unwrap();
        assert_eq!(flat.role_label(), "editor");
        assert!(!flat.is_active());

        let bare: User =
            serde_json::from_str(r#"{"id":3,"username":"eve","email":"e@x.io","role":"viewer"}"#)
                .unwrap();
        assert_eq!(bare.role_label(), "viewer");
    }

    #[test]
    fn test_timestamps_are_lenient() {
        let user: User = serde_json::from_str(
            r#"{"id":1,"username":"a","email":"a@x.io",
                "created_at":"2024-05-01T10:00:00.123456",
                "modified_at":"2024-05-02T10:00:00+07:00",
                "last_login":"yesterday"}"#,
        )
        .unwrap();
        assert!(user.created_at.is_some());
        assert_eq!(
            user.modified_at.unwrap().format("%H").to_string(),
            "03"
        );
        assert!(user.last_login.is_none());
    }

    #[test]
    fn test_profile_normalized() {
        let fields = ProfileFields {
            title: Some("  ".into()),
            city: Some("Bangkok".into()),
            ..Default::default()
        }
        .normalized();
        assert!(fields.title.is_none());
        assert_eq!(fields.city.as_deref(), Some("Bangkok"));
    }

    #[test]
    fn test_user_create_validation() {
        let create = UserCreate {
            username: "alice".into(),
            email: "not-an-email".into(),
            password: "short".into(),
            role_id: Some(1),
            is_verified: false,
            profile: None,
        };
        let errors = create.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
