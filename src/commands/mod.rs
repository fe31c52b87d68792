pub mod create;
pub mod preview;

use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::report::Scope;

/// `--enterprise` wins over `--org`; the configured enterprise is the fallback.
pub fn resolve_scope(
    org_flag: &Option<String>,
    enterprise_flag: &Option<String>,
    config: &Config,
) -> Result<Scope> {
    if let Some(slug) = config.enterprise(enterprise_flag.as_deref()) {
        if enterprise_flag.is_some() || org_flag.is_none() {
            return Ok(Scope::Enterprise(slug));
        }
    }

    match org_flag.as_deref().map(str::trim) {
        Some(org) if !org.is_empty() => Ok(Scope::Organization(org.to_string())),
        _ => Err(ReportError::Config(
            "pass --org or --enterprise to choose which organizations to report on".into(),
        )),
    }
}
