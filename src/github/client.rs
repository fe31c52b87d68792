use crate::error::{ReportError, Result};
use crate::github::models::{
    ContentFile, ContentWrite, ContentWriteBody, EnterpriseOrganizationsData, OrganizationPage,
    RateLimit, RawInvitation, WriteOutcome,
};
use crate::github::source::InvitationSource;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use octocrab::{Octocrab, Page};
use serde_json::json;
use url::Url;

const ENTERPRISE_ORGANIZATIONS_QUERY: &str = r#"query ($enterprise: String!, $cursor: String = null) {
  enterprise(slug: $enterprise) {
    organizations(first: 100, after: $cursor) {
      nodes {
        login
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}"#;

pub struct GithubClient {
    octocrab: Octocrab,
    verbose: bool,
}

impl GithubClient {
    pub fn new(token: &str, api_url: Option<&str>, verbose: bool) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(api_url) = api_url.filter(|u| !u.is_empty()) {
            builder = builder
                .base_uri(api_url)
                .map_err(|e| ReportError::Config(format!("Invalid API URL {api_url}: {e}")))?;
        }
        let octocrab = builder
            .build()
            .map_err(|e| ReportError::GitHub(e.to_string()))?;
        Ok(Self { octocrab, verbose })
    }

    pub async fn get_rate_limit(&self) -> Result<RateLimit> {
        let rate_limit: RateLimit = self.octocrab.get("/rate_limit", None::<&()>).await?;
        Ok(rate_limit)
    }

    pub async fn log_rate_limit_if_verbose(&self) {
        if !self.verbose {
            return;
        }
        match self.get_rate_limit().await {
            Ok(rl) => {
                let core = &rl.resources.core;
                tracing::info!(
                    "Rate limit: {}/{} remaining (resets at {})",
                    core.remaining,
                    core.limit,
                    chrono::DateTime::from_timestamp(core.reset, 0)
                        .map(|dt| dt.format("%H:%M:%S UTC").to_string())
                        .unwrap_or_else(|| core.reset.to_string())
                );
            }
            Err(e) => tracing::info!("Could not check rate limit: {e}"),
        }
    }

    /// Fetches the first page and follows `Link: rel="next"` to the end.
    async fn list_invitations(&self, route: &str) -> Result<Vec<RawInvitation>> {
        tracing::debug!("GET {route}");
        let first_page: Page<RawInvitation> = self
            .octocrab
            .get(route, Some(&[("per_page", "100")]))
            .await?;
        let invitations = self.octocrab.all_pages(first_page).await?;
        Ok(invitations)
    }
}

/// Builds an API path from raw segments, percent-encoding each one.
fn api_route<'a>(segments: impl IntoIterator<Item = &'a str>) -> Result<String> {
    let mut url = Url::parse("https://api.github.com/")?;
    url.path_segments_mut()
        .map_err(|_| ReportError::Config("API base URL cannot take a path".into()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.path().to_string())
}

fn contents_route(owner: &str, repo: &str, path: &str) -> Result<String> {
    api_route(
        ["repos", owner, repo, "contents"]
            .into_iter()
            .chain(path.split('/')),
    )
}

#[async_trait]
impl InvitationSource for GithubClient {
    async fn organizations_page(
        &self,
        enterprise: &str,
        cursor: Option<&str>,
    ) -> Result<OrganizationPage> {
        tracing::debug!("Fetching organizations of {enterprise} after {cursor:?}");
        let payload = json!({
            "query": ENTERPRISE_ORGANIZATIONS_QUERY,
            "variables": { "enterprise": enterprise, "cursor": cursor },
        });
        let data: EnterpriseOrganizationsData = self.octocrab.graphql(&payload).await?;
        let connection = data
            .enterprise
            .ok_or_else(|| ReportError::GraphQl(format!("enterprise {enterprise} not found")))?
            .organizations;

        Ok(OrganizationPage {
            logins: connection.nodes.into_iter().map(|n| n.login).collect(),
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor,
        })
    }

    async fn pending_invitations(&self, org: &str) -> Result<Vec<RawInvitation>> {
        let route = api_route(["orgs", org, "invitations"])?;
        self.list_invitations(&route).await
    }

    async fn failed_invitations(&self, org: &str) -> Result<Vec<RawInvitation>> {
        let route = api_route(["orgs", org, "failed_invitations"])?;
        self.list_invitations(&route).await
    }

    async fn content_sha(&self, owner: &str, repo: &str, path: &str) -> Result<Option<String>> {
        let route = contents_route(owner, repo, path)?;
        let file: ContentFile = self.octocrab.get(&route, None::<&()>).await?;
        Ok(file.sha)
    }

    async fn write_content(&self, request: &ContentWrite) -> Result<WriteOutcome> {
        let route = contents_route(&request.owner, &request.repo, &request.path)?;
        let body = ContentWriteBody {
            message: &request.message,
            content: STANDARD.encode(&request.content),
            committer: &request.committer,
            sha: request.sha.as_deref(),
        };
        let outcome: WriteOutcome = self.octocrab.put(&route, Some(&body)).await?;
        Ok(outcome)
    }
}
