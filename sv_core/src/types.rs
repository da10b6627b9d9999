use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: String) -> Option<Self> {
        if id.is_empty() || id.len() > 100 {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProjectId {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string()).ok_or_else(|| anyhow::anyhow!("Invalid project ID"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: String) -> Option<Self> {
        if id.is_empty() || id.len() > 100 {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string()).ok_or_else(|| anyhow::anyhow!("Invalid user ID"))
    }
}

/// Per-request identity carried through every service client call.
///
/// At most one of `is_admin`, `auth_token_info` and `auth_token` is the
/// active credential source at resolution time; several may be populated at
/// once and precedence is fixed by the credential resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    pub project_id: Option<ProjectId>,
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub is_admin: bool,
    pub auth_token: Option<String>,
    /// Pre-validated token introspection payload, opaque to this crate.
    pub auth_token_info: Option<serde_json::Value>,
}

impl RequestContext {
    pub fn new(project_id: Option<ProjectId>, user_id: Option<UserId>) -> Self {
        Self {
            project_id,
            user_id,
            ..Self::default()
        }
    }

    pub fn admin() -> Self {
        Self {
            is_admin: true,
            ..Self::default()
        }
    }

    pub fn with_token(token: String) -> Self {
        Self {
            auth_token: Some(token),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_rejects_empty() {
        assert!(ProjectId::new(String::new()).is_none());
        assert!(ProjectId::new("p".repeat(101)).is_none());
        assert!(ProjectId::new("project-1".to_string()).is_some());
    }

    #[test]
    fn test_context_defaults_carry_no_credentials() {
        let ctx = RequestContext::default();
        assert!(!ctx.is_admin);
        assert!(ctx.auth_token.is_none());
        assert!(ctx.auth_token_info.is_none());
    }

    #[test]
    fn test_context_serde_round_trip() {
        let ctx = RequestContext {
            project_id: ProjectId::new("proj".to_string()),
            user_id: UserId::new("user".to_string()),
            is_admin: false,
            auth_token: Some("tok123".to_string()),
            auth_token_info: None,
        };
        let json = serde_json::to_string(&ctx).unwrap();
        let back: RequestContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }
}
