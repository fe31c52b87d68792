//! In-memory `InvitationSource` for pipeline tests.

use crate::error::{ReportError, Result};
use crate::github::models::{
    CommitInfo, CommitParent, ContentWrite, Inviter, OrganizationPage, RawInvitation,
    WriteOutcome,
};
use crate::github::InvitationSource;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeSource {
    pages: Vec<Vec<String>>,
    fail_enumeration_at: Option<usize>,
    pending: HashMap<String, Vec<RawInvitation>>,
    failed: HashMap<String, Vec<RawInvitation>>,
    failing_pending: HashSet<String>,
    failing_failed: HashSet<String>,
    existing_sha: Option<String>,
    shaless_content: bool,
    parents: Vec<String>,
    fail_write: bool,
    cursors: Mutex<Vec<Option<String>>>,
    writes: Mutex<Vec<ContentWrite>>,
}

pub fn pending(login: Option<&str>, email: Option<&str>) -> RawInvitation {
    RawInvitation {
        login: login.map(str::to_string),
        email: email.map(str::to_string),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        failed_at: None,
        failed_reason: None,
        inviter: Some(Inviter {
            login: "octocat".into(),
        }),
    }
}

pub fn failed(login: Option<&str>, reason: &str) -> RawInvitation {
    RawInvitation {
        login: login.map(str::to_string),
        email: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        failed_at: Some(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()),
        failed_reason: Some(reason.to_string()),
        inviter: Some(Inviter {
            login: "octocat".into(),
        }),
    }
}

fn cursor_for(page: usize) -> String {
    format!("cursor-{page}")
}

impl FakeSource {
    /// Each slice is one GraphQL page of organization logins.
    pub fn with_pages(mut self, pages: &[&[&str]]) -> Self {
        self.pages = pages
            .iter()
            .map(|p| p.iter().map(|s| s.to_string()).collect())
            .collect();
        self
    }

    pub fn failing_enumeration_at(mut self, page: usize) -> Self {
        self.fail_enumeration_at = Some(page);
        self
    }

    pub fn with_pending(mut self, org: &str, invitations: Vec<RawInvitation>) -> Self {
        self.pending.insert(org.to_string(), invitations);
        self
    }

    pub fn with_failed(mut self, org: &str, invitations: Vec<RawInvitation>) -> Self {
        self.failed.insert(org.to_string(), invitations);
        self
    }

    pub fn failing_pending(mut self, org: &str) -> Self {
        self.failing_pending.insert(org.to_string());
        self
    }

    pub fn failing_failed(mut self, org: &str) -> Self {
        self.failing_failed.insert(org.to_string());
        self
    }

    pub fn with_existing_sha(mut self, sha: &str) -> Self {
        self.existing_sha = Some(sha.to_string());
        self
    }

    /// The read succeeds but carries no sha.
    pub fn with_shaless_content(mut self) -> Self {
        self.shaless_content = true;
        self
    }

    pub fn with_parents(mut self, parents: &[&str]) -> Self {
        self.parents = parents.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn failing_write(mut self) -> Self {
        self.fail_write = true;
        self
    }

    pub fn enumerated_cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<ContentWrite> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl InvitationSource for FakeSource {
    async fn organizations_page(
        &self,
        _enterprise: &str,
        cursor: Option<&str>,
    ) -> Result<OrganizationPage> {
        self.cursors
            .lock()
            .unwrap()
            .push(cursor.map(str::to_string));

        let index = cursor
            .and_then(|c| c.strip_prefix("cursor-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);
        if self.fail_enumeration_at == Some(index) {
            return Err(ReportError::GitHub("organizations page failed".into()));
        }

        let logins = self.pages.get(index).cloned().unwrap_or_default();
        let has_next_page = index + 1 < self.pages.len();
        Ok(OrganizationPage {
            logins,
            has_next_page,
            end_cursor: has_next_page.then(|| cursor_for(index + 1)),
        })
    }

    async fn pending_invitations(&self, org: &str) -> Result<Vec<RawInvitation>> {
        if self.failing_pending.contains(org) {
            return Err(ReportError::GitHub("Not Found".into()));
        }
        Ok(self.pending.get(org).cloned().unwrap_or_default())
    }

    async fn failed_invitations(&self, org: &str) -> Result<Vec<RawInvitation>> {
        if self.failing_failed.contains(org) {
            return Err(ReportError::GitHub("Must have admin rights".into()));
        }
        Ok(self.failed.get(org).cloned().unwrap_or_default())
    }

    async fn content_sha(&self, _owner: &str, _repo: &str, path: &str) -> Result<Option<String>> {
        match &self.existing_sha {
            Some(sha) => Ok(Some(sha.clone())),
            None if self.shaless_content => Ok(None),
            None => Err(ReportError::GitHub(format!("{path}: Not Found"))),
        }
    }

    async fn write_content(&self, request: &ContentWrite) -> Result<WriteOutcome> {
        if self.fail_write {
            return Err(ReportError::GitHub(format!(
                "sha does not match {}",
                request.sha.as_deref().unwrap_or("none")
            )));
        }
        self.writes.lock().unwrap().push(request.clone());
        Ok(WriteOutcome {
            commit: CommitInfo {
                sha: "head".into(),
                parents: self
                    .parents
                    .iter()
                    .map(|sha| CommitParent { sha: sha.clone() })
                    .collect(),
            },
        })
    }
}
