//! User profile captured at login.

use serde::{Deserialize, Deserializer, Serialize};

use marketplace_core::Email;

/// Role string the backend assigns to administrators.
const ADMIN_ROLE: &str = "admin";

/// The subset of the backend user record kept client-side for display.
///
/// Decoding is lenient: a stored record with a missing name, or a missing
/// or malformed email, still yields a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_email",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<Email>,
    /// Backend role name (`user`, `admin`, ...). Kept verbatim.
    #[serde(default)]
    pub role: String,
}

impl UserProfile {
    /// Avatar initials: first letter of the first and last word, or of the
    /// only word. Empty for a blank name.
    #[must_use]
    pub fn initials(&self) -> String {
        let mut words = self.name.split_whitespace();
        let Some(first) = words.next() else {
            return String::new();
        };
        let leading = |word: &str| word.chars().next().into_iter().flat_map(char::to_uppercase);

        match words.next_back() {
            Some(last) => leading(first).chain(leading(last)).collect(),
            None => leading(first).collect(),
        }
    }

    /// Whether the user has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case(ADMIN_ROLE)
    }
}

fn lenient_email<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Email>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| Email::parse(&value).ok()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn profile(name: &str) -> UserProfile {
        UserProfile {
            name: name.to_string(),
            email: Some(Email::parse("user@example.com").unwrap()),
            role: "user".to_string(),
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(profile("budi").initials(), "B");
        assert_eq!(profile("Siti Nur Rahma").initials(), "SR");
        assert_eq!(profile("  agus   salim ").initials(), "AS");
        assert_eq!(profile("   ").initials(), "");
    }

    #[test]
    fn test_is_admin() {
        let mut user = profile("Admin");
        assert!(!user.is_admin());
        user.role = "Admin".to_string();
        assert!(user.is_admin());
    }

    #[test]
    fn test_decodes_partial_records() {
        let user: UserProfile = serde_json::from_value(json!({"name": "Budi", "role": "user"})).unwrap();
        assert_eq!(user.email, None);

        let user: UserProfile =
            serde_json::from_value(json!({"name": "Budi", "email": "not an email"})).unwrap();
        assert_eq!(user.email, None);
        assert_eq!(user.role, "");

        let user: UserProfile = serde_json::from_value(json!({"email": "Budi@Example.COM"})).unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.email.unwrap().as_str(), "Budi@example.com");
    }

    #[test]
    fn test_missing_email_is_not_serialized() {
        let user = UserProfile {
            email: None,
            ..profile("Budi")
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"name": "Budi", "role": "user"})
        );
    }
}
