//! Field format predicates shared by the row checks.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// `@` followed by one or more ASCII letters, digits or underscores.
static TWITTER_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@[a-zA-Z0-9_]+$").expect("Invalid twitter id regex"));

/// `U` followed by exactly 32 lowercase hex digits.
static LINE_USER_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^U[a-f0-9]{32}$").expect("Invalid LINE user id regex"));

/// Tokens accepted for boolean columns, compared case-insensitively.
pub const BOOLEAN_TOKENS: &[&str] = &["true", "false", "1", "0", "yes", "no"];

/// Sink delivery types understood by the notification worker.
pub const SINK_TYPES: &[&str] = &["discord", "line"];

/// Empty, or an absolute URL with both a scheme and a network location.
///
/// The network location must be introduced by `//` right after the scheme, so
/// `mailto:ops@example.com` and `http:example.com` are rejected.
pub fn is_valid_url(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let Ok(url) = Url::parse(value) else {
        return false;
    };
    let has_authority = value
        .trim_start()
        .get(url.scheme().len() + 1..)
        .is_some_and(|rest| rest.starts_with("//"));
    has_authority && url.host_str().is_some_and(|host| !host.is_empty())
}

/// Empty, or `@handle` made of ASCII letters, digits and underscores.
pub fn is_valid_twitter_id(value: &str) -> bool {
    value.is_empty() || TWITTER_ID_REGEX.is_match(value)
}

/// LINE user ids are required: the empty string is invalid.
pub fn is_valid_line_user_id(value: &str) -> bool {
    LINE_USER_ID_REGEX.is_match(value)
}

/// One of [`BOOLEAN_TOKENS`], ignoring case. Surrounding whitespace is not
/// tolerated.
pub fn is_boolean_token(value: &str) -> bool {
    let lower = value.to_lowercase();
    BOOLEAN_TOKENS.contains(&lower.as_str())
}

pub fn is_sink_type(value: &str) -> bool {
    SINK_TYPES.contains(&value)
}

/// Empty, or a JSON object.
pub fn is_config_json(value: &str) -> bool {
    if value.trim().is_empty() {
        return true;
    }
    matches!(
        serde_json::from_str::<serde_json::Value>(value),
        Ok(serde_json::Value::Object(_))
    )
}
