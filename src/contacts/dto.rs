use serde::{Deserialize, Serialize};

use crate::contacts::repo::{Contact, ContactStats};

/// Raw body of the public contact form. Fields default to empty so that
/// missing keys reach the validator and come back as 400s, not as a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ContactListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<Contact>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContactRequest {
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: &'static str,
}

pub type StatsResponse = ContactStats;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_tolerates_missing_fields() {
        let sub: ContactSubmission = serde_json::from_str("{}").unwrap();
        assert_eq!(sub.name, "");
        assert_eq!(sub.email, "");
        assert_eq!(sub.phone, None);
        assert_eq!(sub.message, "");
    }

    #[test]
    fn list_query_defaults() {
        let q: ContactListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.limit, 20);
        assert_eq!(q.offset, 0);
        assert!(q.status.is_none());
        assert!(q.search.is_none());
    }
}
