use async_trait::async_trait;

use crate::error::Result;
use crate::github::models::{ContentWrite, OrganizationPage, RawInvitation, WriteOutcome};

/// What the report pipeline needs from GitHub.
#[async_trait]
pub trait InvitationSource: Send + Sync {
    /// Fetches one page (up to 100) of the enterprise's organizations.
    /// `cursor` is `None` for the first page.
    async fn organizations_page(
        &self,
        enterprise: &str,
        cursor: Option<&str>,
    ) -> Result<OrganizationPage>;

    /// All pending invitations of `org`, across every page.
    async fn pending_invitations(&self, org: &str) -> Result<Vec<RawInvitation>>;

    /// All failed invitations of `org`, across every page.
    async fn failed_invitations(&self, org: &str) -> Result<Vec<RawInvitation>>;

    /// Blob sha of the file at `path`, if the read returned one.
    async fn content_sha(&self, owner: &str, repo: &str, path: &str) -> Result<Option<String>>;

    /// Creates or updates a file in a single commit.
    async fn write_content(&self, request: &ContentWrite) -> Result<WriteOutcome>;
}
