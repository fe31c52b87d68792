//! The invitation report pipeline: enumerate organizations, collect their
//! invitations, serialize the rows as CSV and commit the file.

pub mod document;
pub mod invitations;
pub mod organizations;
pub mod publish;

#[cfg(test)]
pub(crate) mod fake;

use crate::error::Result;
use crate::github::models::Committer;
use crate::github::InvitationSource;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One pending or failed invitation, flattened for the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvitationRow {
    pub organization: String,
    pub login: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub failed_at: Option<DateTime<Utc>>,
    pub failed_reason: Option<String>,
    pub inviter: String,
}

/// Which organizations a report covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Organization(String),
    Enterprise(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitResult {
    #[serde(rename = "base_sha")]
    pub before_sha: String,
    #[serde(rename = "head_sha")]
    pub after_sha: String,
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Repository path of the CSV file.
    pub path: String,
    pub committer: Committer,
    pub owner: String,
    pub repo: String,
    pub enterprise: Option<String>,
}

impl ReportOptions {
    pub fn scope(&self) -> Scope {
        match &self.enterprise {
            Some(slug) => Scope::Enterprise(slug.clone()),
            None => Scope::Organization(self.owner.clone()),
        }
    }
}

pub struct Report<'a> {
    source: &'a dyn InvitationSource,
    options: ReportOptions,
    generated_at: DateTime<Utc>,
}

impl<'a> Report<'a> {
    /// `generated_at` is the timestamp of the commit message.
    pub fn new(
        source: &'a dyn InvitationSource,
        options: ReportOptions,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source,
            options,
            generated_at,
        }
    }

    pub async fn create(&self) -> Result<CommitResult> {
        let ReportOptions {
            path,
            committer,
            owner,
            repo,
            ..
        } = &self.options;

        let rows = collect_rows(self.source, &self.options.scope()).await?;
        tracing::info!("Collected {} invitation(s)", rows.len());

        let assembled = document::assemble(&rows, self.generated_at)?;
        let sha = publish::resolve_existing_sha(self.source, owner, repo, path).await;

        let document = publish::ReportDocument {
            path: path.clone(),
            message: assembled.message,
            content: assembled.content,
            committer: committer.clone(),
            sha,
        };
        publish::publish(self.source, owner, repo, document).await
    }
}

/// Collects pending then failed invitations for every organization in
/// `scope`, in enumeration order.
pub async fn collect_rows(
    source: &dyn InvitationSource,
    scope: &Scope,
) -> Result<Vec<InvitationRow>> {
    let orgs = match scope {
        Scope::Organization(org) => vec![org.clone()],
        Scope::Enterprise(slug) => organizations::list_organizations(source, slug).await?,
    };

    let mut rows = Vec::new();
    for org in &orgs {
        invitations::collect(source, org, &mut rows).await;
    }
    Ok(rows)
}
