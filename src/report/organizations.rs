use crate::error::{ReportError, Result};
use crate::github::InvitationSource;

/// Lists every organization owned by `enterprise`, following the GraphQL
/// cursor until the last page. Any page failure aborts the listing.
pub async fn list_organizations(
    source: &dyn InvitationSource,
    enterprise: &str,
) -> Result<Vec<String>> {
    let mut logins = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = source
            .organizations_page(enterprise, cursor.as_deref())
            .await?;
        logins.extend(page.logins);

        if !page.has_next_page {
            break;
        }
        match page.end_cursor {
            Some(next) => cursor = Some(next),
            None => {
                return Err(ReportError::GraphQl(format!(
                    "organizations of {enterprise} report another page without an end cursor"
                )))
            }
        }
    }

    tracing::debug!("{enterprise} owns {} organization(s)", logins.len());
    Ok(logins)
}
