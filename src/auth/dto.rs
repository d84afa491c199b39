use serde::{Deserialize, Serialize};

/// Login body. Fields default to empty so missing keys fail the explicit
/// presence check with a 400 rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_uses_camel_case_session_id() {
        let res = LoginResponse {
            success: true,
            session_id: "abc".into(),
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains("\"sessionId\":\"abc\""));
    }

    #[test]
    fn login_request_tolerates_missing_fields() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.username, "");
        assert_eq!(req.password, "");
    }
}
