use crate::error::Result;
use crate::report::InvitationRow;
use chrono::{DateTime, SecondsFormat, Utc};

/// Row field keys and their column labels, in column order.
pub const HEADER: [(&str, &str); 7] = [
    ("organization", "Organization"),
    ("login", "Username"),
    ("email", "Email"),
    ("created_at", "Invitation creation date"),
    ("failed_at", "Invitation failed date"),
    ("failed_reason", "Invitation failed reason"),
    ("inviter", "Inviter"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledReport {
    pub content: Vec<u8>,
    pub message: String,
}

/// `2024-01-02T03:04:05.000Z`
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl InvitationRow {
    /// The row's cells in `HEADER` order; nulls become empty cells.
    pub fn record(&self) -> [String; 7] {
        [
            self.organization.clone(),
            self.login.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
            format_timestamp(&self.created_at),
            self.failed_at
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_default(),
            self.failed_reason.clone().unwrap_or_default(),
            self.inviter.clone(),
        ]
    }
}

/// Serializes the header plus `rows` as CSV and builds the commit message.
pub fn assemble(rows: &[InvitationRow], generated_at: DateTime<Utc>) -> Result<AssembledReport> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER.iter().map(|(_, label)| label))?;
    for row in rows {
        writer.write_record(row.record())?;
    }

    let content = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    Ok(AssembledReport {
        content,
        message: format!("{} invitation report", format_timestamp(&generated_at)),
    })
}
