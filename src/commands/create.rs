use crate::config::{
    load_config, parse_repository, resolve_report_path, Config, DEFAULT_COMMITTER_EMAIL,
    DEFAULT_COMMITTER_NAME, DEFAULT_REPORT_PATH,
};
use crate::display;
use crate::error::Result;
use crate::github::models::Committer;
use crate::github::GithubClient;
use crate::report::{CommitResult, Report, ReportOptions};
use chrono::Utc;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Args)]
pub struct CreateArgs {
    /// Repository path of the CSV report [default: invitation-report.csv]
    #[arg(long)]
    pub report_path: Option<String>,

    /// Name of the commit author [default: invitation-reporter[bot]]
    #[arg(long)]
    pub committer_name: Option<String>,

    /// Email of the commit author [default: invitation@reporter]
    #[arg(long)]
    pub committer_email: Option<String>,

    /// Repository to commit the report to, as OWNER/REPO
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Report on every organization of this enterprise instead of OWNER
    #[arg(long)]
    pub enterprise: Option<String>,

    /// Directory the report path must stay inside [default: current directory]
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,
}

/// Validates everything that can be checked offline and returns the token
/// together with the report options.
pub fn resolve_options(
    args: &CreateArgs,
    config: &Config,
    workspace: &Path,
) -> Result<(String, ReportOptions)> {
    let report_path = args
        .report_path
        .as_deref()
        .or(config.report.path.as_deref())
        .unwrap_or(DEFAULT_REPORT_PATH);
    let path = resolve_report_path(workspace, report_path)?;

    let (owner, repo) = parse_repository(args.repository.as_deref().unwrap_or_default())?;
    let token = config.token(args.token.as_deref())?.to_string();

    let committer = Committer {
        name: args
            .committer_name
            .clone()
            .or_else(|| config.report.committer_name.clone())
            .unwrap_or_else(|| DEFAULT_COMMITTER_NAME.to_string()),
        email: args
            .committer_email
            .clone()
            .or_else(|| config.report.committer_email.clone())
            .unwrap_or_else(|| DEFAULT_COMMITTER_EMAIL.to_string()),
    };

    let options = ReportOptions {
        path,
        committer,
        owner,
        repo,
        enterprise: config.enterprise(args.enterprise.as_deref()),
    };
    Ok((token, options))
}

pub async fn run(args: &CreateArgs, json: bool, verbose: bool) -> Result<()> {
    let config = load_config()?;
    let workspace = match &args.workspace {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let (token, options) = resolve_options(args, &config, &workspace)?;

    let client = GithubClient::new(&token, args.api_url.as_deref(), verbose)?;
    let target = format!("{}/{}/{}", options.owner, options.repo, options.path);

    let result = Report::new(&client, options, Utc::now()).create().await?;

    display::output(json, &result, render_result);
    display::success(&format!("Committed invitation report to {target}"));

    client.log_rate_limit_if_verbose().await;

    Ok(())
}

fn render_result(result: &CommitResult) {
    println!("base_sha={}", result.before_sha);
    println!("head_sha={}", result.after_sha);
}
