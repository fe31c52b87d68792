use crate::error::Result;
use crate::github::models::{Committer, ContentWrite};
use crate::github::InvitationSource;
use crate::report::CommitResult;

/// A serialized report ready to commit.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub path: String,
    pub message: String,
    pub content: Vec<u8>,
    pub committer: Committer,
    /// Sha of the file already at `path`, if any.
    pub sha: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update { sha: String },
}

impl ReportDocument {
    pub fn mode(&self) -> WriteMode {
        match &self.sha {
            Some(sha) => WriteMode::Update { sha: sha.clone() },
            None => WriteMode::Create,
        }
    }
}

/// Looks up the sha of the report already committed at `path`.
///
/// Any failed read, a 404 included, is treated as "no report yet".
pub async fn resolve_existing_sha(
    source: &dyn InvitationSource,
    owner: &str,
    repo: &str,
    path: &str,
) -> Option<String> {
    match source.content_sha(owner, repo, path).await {
        Ok(sha) => sha,
        Err(e) => {
            tracing::info!("No existing report at {owner}/{repo}/{path}: {e}");
            None
        }
    }
}

/// Commits `document`, returning the new commit and its first parent.
pub async fn publish(
    source: &dyn InvitationSource,
    owner: &str,
    repo: &str,
    document: ReportDocument,
) -> Result<CommitResult> {
    match document.mode() {
        WriteMode::Create => tracing::info!("Creating {}", document.path),
        WriteMode::Update { sha } => tracing::info!("Updating {} (sha {sha})", document.path),
    }

    let request = ContentWrite {
        owner: owner.to_string(),
        repo: repo.to_string(),
        path: document.path,
        message: document.message,
        content: document.content,
        committer: document.committer,
        sha: document.sha,
    };
    let outcome = source.write_content(&request).await?;

    let before_sha = outcome
        .commit
        .parents
        .into_iter()
        .next()
        .map(|parent| parent.sha)
        .unwrap_or_default();

    Ok(CommitResult {
        before_sha,
        after_sha: outcome.commit.sha,
    })
}
