use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of `enterprise.organizations`.
#[derive(Debug, Clone, Default)]
pub struct OrganizationPage {
    pub logins: Vec<String>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// The `data` object of the enterprise organizations query.
#[derive(Debug, Deserialize)]
pub struct EnterpriseOrganizationsData {
    pub enterprise: Option<EnterpriseNode>,
}

#[derive(Debug, Deserialize)]
pub struct EnterpriseNode {
    pub organizations: OrganizationConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationConnection {
    pub nodes: Vec<OrganizationNode>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationNode {
    pub login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// An entry from `/orgs/{org}/invitations` or `/orgs/{org}/failed_invitations`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInvitation {
    pub login: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub failed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub failed_reason: Option<String>,
    pub inviter: Option<Inviter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Inviter {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentFile {
    pub sha: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Committer {
    pub name: String,
    pub email: String,
}

/// Request for `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentWrite {
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub message: String,
    pub content: Vec<u8>,
    pub committer: Committer,
    pub sha: Option<String>,
}

/// JSON body of the contents write; `content` is already base64.
#[derive(Debug, Serialize)]
pub struct ContentWriteBody<'a> {
    pub message: &'a str,
    pub content: String,
    pub committer: &'a Committer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriteOutcome {
    pub commit: CommitInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    #[serde(default)]
    pub parents: Vec<CommitParent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitParent {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub struct RateLimit {
    pub resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
pub struct RateLimitResources {
    pub core: RateLimitResource,
}

#[derive(Debug, Deserialize)]
pub struct RateLimitResource {
    pub limit: u64,
    pub remaining: u64,
    pub reset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    fn committer() -> Committer {
        Committer {
            name: "bot".into(),
            email: "bot@example.com".into(),
        }
    }

    #[test]
    fn write_body_omits_sha_when_creating() {
        let committer = committer();
        let body = ContentWriteBody {
            message: "msg",
            content: STANDARD.encode("a,b\n"),
            committer: &committer,
            sha: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("sha").is_none());
        assert_eq!(json["content"], "YSxiCg==");
        assert_eq!(json["committer"]["email"], "bot@example.com");
    }

    #[test]
    fn write_body_carries_sha_when_updating() {
        let committer = committer();
        let body = ContentWriteBody {
            message: "msg",
            content: String::new(),
            committer: &committer,
            sha: Some("abc123"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sha"], "abc123");
    }

    #[test]
    fn failed_invitation_deserializes() {
        let raw: RawInvitation = serde_json::from_str(
            r#"{
                "id": 1,
                "login": null,
                "email": "someone@example.com",
                "created_at": "2016-11-30T06:46:10-08:00",
                "failed_at": "2016-12-01T00:00:00Z",
                "failed_reason": "Invitation expired",
                "inviter": {"login": "octocat", "id": 1}
            }"#,
        )
        .unwrap();
        assert!(raw.login.is_none());
        assert_eq!(raw.inviter.unwrap().login, "octocat");
        assert_eq!(raw.created_at.to_rfc3339(), "2016-11-30T14:46:10+00:00");
        assert!(raw.failed_at.is_some());
    }

    #[test]
    fn graphql_page_deserializes() {
        let data: EnterpriseOrganizationsData = serde_json::from_str(
            r#"{"enterprise": {"organizations": {
                "nodes": [{"login": "foo"}, {"login": "bar"}],
                "pageInfo": {"hasNextPage": true, "endCursor": "Y3Vyc29y"}
            }}}"#,
        )
        .unwrap();
        let connection = data.enterprise.unwrap().organizations;
        assert_eq!(connection.nodes.len(), 2);
        assert!(connection.page_info.has_next_page);
        assert_eq!(connection.page_info.end_cursor.as_deref(), Some("Y3Vyc29y"));
    }

    #[test]
    fn unknown_enterprise_deserializes_as_none() {
        let data: EnterpriseOrganizationsData =
            serde_json::from_str(r#"{"enterprise": null}"#).unwrap();
        assert!(data.enterprise.is_none());
    }
}
