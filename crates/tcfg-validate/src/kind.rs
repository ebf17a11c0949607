//! Dataset kinds and their required columns.

use std::fmt;

/// Columns every targets file must declare.
pub const TARGET_REQUIRED_COLUMNS: &[&str] = &[
    "tenant_id",
    "company_name",
    "pr_url",
    "twitter_id",
    "line_user_id",
    "enabled",
];

/// Columns every sinks file must declare.
pub const SINK_REQUIRED_COLUMNS: &[&str] = &["tenant_id", "type", "enabled", "config_json"];

/// Which rule set to apply to a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatasetKind {
    /// `targets.csv`: tenant accounts and their delivery identifiers.
    #[default]
    Targets,
    /// `sinks.csv`: delivery destinations per tenant.
    Sinks,
}

impl DatasetKind {
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Targets => TARGET_REQUIRED_COLUMNS,
            Self::Sinks => SINK_REQUIRED_COLUMNS,
        }
    }

    /// Sinks may repeat a tenant, so only targets carry a uniqueness rule.
    pub fn requires_unique_pairs(&self) -> bool {
        matches!(self, Self::Targets)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Targets => "targets",
            Self::Sinks => "sinks",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
