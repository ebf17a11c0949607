//! Validation issue types.
//!
//! Each [`Issue`] renders to exactly one human-readable message line. Row
//! level problems are grouped: all [`FieldFault`]s of one record are carried
//! by a single [`Issue::InvalidRow`].

use std::fmt;
use std::path::PathBuf;

/// A single field-level rule violation inside one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFault {
    TenantIdEmpty,
    CompanyNameEmpty,
    PrUrlMalformed,
    TwitterIdMalformed,
    XFeedUrlMalformed,
    /// Empty or not `U` + 32 lowercase hex digits.
    LineUserIdInvalid,
    EnabledInvalid,
    SinkTypeInvalid,
    ConfigJsonInvalid,
}

impl FieldFault {
    /// Column the fault refers to.
    pub fn column(&self) -> &'static str {
        match self {
            Self::TenantIdEmpty => "tenant_id",
            Self::CompanyNameEmpty => "company_name",
            Self::PrUrlMalformed => "pr_url",
            Self::TwitterIdMalformed => "twitter_id",
            Self::XFeedUrlMalformed => "x_feed_url",
            Self::LineUserIdInvalid => "line_user_id",
            Self::EnabledInvalid => "enabled",
            Self::SinkTypeInvalid => "type",
            Self::ConfigJsonInvalid => "config_json",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::TenantIdEmpty => "tenant_id is empty",
            Self::CompanyNameEmpty => "company_name is empty",
            Self::PrUrlMalformed => "pr_url is not a valid URL",
            Self::TwitterIdMalformed => "twitter_id must match @[A-Za-z0-9_]+",
            Self::XFeedUrlMalformed => "x_feed_url is not a valid URL",
            Self::LineUserIdInvalid => {
                "line_user_id must be U followed by 32 lowercase hex characters"
            }
            Self::EnabledInvalid => "enabled must be one of true/false/1/0/yes/no",
            Self::SinkTypeInvalid => "type must be one of discord/line",
            Self::ConfigJsonInvalid => "config_json is not a JSON object",
        }
    }
}

impl fmt::Display for FieldFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Validation issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    // Source checks (validation stops after any of these)
    /// The source path does not exist.
    SourceNotFound { path: PathBuf },
    /// The source exists but could not be read, decoded or parsed.
    SourceUnreadable { path: PathBuf, reason: String },
    /// The source has a header but no data records.
    EmptySource { path: PathBuf },

    // Schema checks
    /// A required column is absent from the header.
    MissingColumn { column: &'static str },

    // Row checks
    /// One or more field rules failed for the record at `line`.
    InvalidRow { line: usize, faults: Vec<FieldFault> },

    // Cross-record checks
    /// The `(tenant_id, company_name)` pair already appeared on an earlier line.
    DuplicatePair {
        line: usize,
        tenant_id: String,
        company_name: String,
    },
}

impl Issue {
    /// Line number the issue points at, if it concerns a single record.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidRow { line, .. } | Self::DuplicatePair { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound { path } => write!(f, "CSV file not found: {}", path.display()),
            Self::SourceUnreadable { path, reason } => {
                write!(f, "failed to read CSV {}: {reason}", path.display())
            }
            Self::EmptySource { path } => write!(f, "CSV file is empty: {}", path.display()),
            Self::MissingColumn { column } => write!(f, "required column missing: {column}"),
            Self::InvalidRow { line, faults } => {
                write!(f, "line {line}: ")?;
                for (index, fault) in faults.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(fault.message())?;
                }
                Ok(())
            }
            Self::DuplicatePair {
                line,
                tenant_id,
                company_name,
            } => write!(
                f,
                "line {line}: duplicate tenant_id/company_name pair ('{tenant_id}', '{company_name}')"
            ),
        }
    }
}
