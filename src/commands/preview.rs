use crate::commands::resolve_scope;
use crate::config::load_config;
use crate::display;
use crate::error::Result;
use crate::github::GithubClient;
use crate::report::document::HEADER;
use crate::report::{collect_rows, InvitationRow, Scope};

pub async fn run(
    org: &Option<String>,
    enterprise: &Option<String>,
    token: &Option<String>,
    api_url: &Option<String>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let config = load_config()?;
    let scope = resolve_scope(org, enterprise, &config)?;
    let token = config.token(token.as_deref())?;
    let client = GithubClient::new(token, api_url.as_deref(), verbose)?;

    let rows = collect_rows(&client, &scope).await?;

    display::output(json, rows.as_slice(), |data| {
        render_invitations(data, &scope);
    });

    client.log_rate_limit_if_verbose().await;

    Ok(())
}

fn render_invitations(rows: &[InvitationRow], scope: &Scope) {
    let target = match scope {
        Scope::Organization(org) => org.as_str(),
        Scope::Enterprise(slug) => slug.as_str(),
    };

    if rows.is_empty() {
        display::warn(&format!("No pending or failed invitations found for {target}."));
        return;
    }

    display::section_header(&format!("Invitations ({target})"));

    let labels: Vec<&str> = HEADER.iter().map(|(_, label)| *label).collect();
    let mut table = display::new_table(&labels);
    for row in rows {
        table.add_row(row.record());
    }

    println!("{table}");

    let failed = rows.iter().filter(|r| r.failed_at.is_some()).count();
    println!(
        "\n{} invitation(s): {} pending, {failed} failed.",
        rows.len(),
        rows.len() - failed
    );
}
