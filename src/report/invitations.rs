use crate::github::models::RawInvitation;
use crate::github::InvitationSource;
use crate::report::InvitationRow;
use chrono::{DateTime, SubsecRound, Utc};

/// Appends the pending and then the failed invitations of `org` to `sink`.
///
/// A listing that cannot be fetched contributes no rows; the error is logged
/// and the other listing is still collected.
pub async fn collect(source: &dyn InvitationSource, org: &str, sink: &mut Vec<InvitationRow>) {
    match source.pending_invitations(org).await {
        Ok(invitations) => {
            tracing::debug!("{org}: {} pending invitation(s)", invitations.len());
            sink.extend(invitations.into_iter().map(|raw| pending_row(org, raw)));
        }
        Err(e) => tracing::info!("Could not get pending invitations for {org}: {e}"),
    }

    match source.failed_invitations(org).await {
        Ok(invitations) => {
            tracing::debug!("{org}: {} failed invitation(s)", invitations.len());
            sink.extend(invitations.into_iter().map(|raw| failed_row(org, raw)));
        }
        Err(e) => tracing::info!("Could not get failed invitations for {org}: {e}"),
    }
}

fn pending_row(org: &str, raw: RawInvitation) -> InvitationRow {
    InvitationRow {
        failed_at: None,
        failed_reason: None,
        ..failed_row(org, raw)
    }
}

fn failed_row(org: &str, raw: RawInvitation) -> InvitationRow {
    InvitationRow {
        organization: org.to_string(),
        login: raw.login,
        email: raw.email,
        created_at: normalize(raw.created_at),
        failed_at: raw.failed_at.map(normalize),
        failed_reason: raw.failed_reason,
        inviter: raw.inviter.map(|i| i.login).unwrap_or_default(),
    }
}

// Report timestamps carry millisecond precision.
fn normalize(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(3)
}
