//! Teacher login against an injected credential source.

use crate::model::Session;

/// Resolves a username/password pair to a teacher identity.
pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> Option<Session>;
}

#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub display_name: String,
}

impl Credential {
    pub fn new(username: &str, password: &str, display_name: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// Fixed in-memory credential list. Not an identity system.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    entries: Vec<Credential>,
}

impl StaticCredentials {
    pub fn new(entries: Vec<Credential>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            Credential::new("teacher1", "123456", "Dr. Ahmad Hassan"),
            Credential::new("teacher2", "123456", "Prof. Sarah Khan"),
            Credential::new("admin", "admin123", "Admin User"),
        ])
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Option<Session> {
        self.entries
            .iter()
            .find(|c| c.username == username && c.password == password)
            .map(|c| Session {
                teacher_name: c.display_name.clone(),
            })
    }
}
