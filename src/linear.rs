//! Linear issue tracker access: team keys and issue URLs.

pub mod client;
pub mod error;

pub use client::{LinearClient, Team, LINEAR_API_URL};
pub use error::LinearError;

/// Web origin issue URLs are built on.
pub const LINEAR_WEB_URL: &str = "https://linear.app";

/// Fetches team keys, optionally restricted to `filter`.
///
/// Filtering compares case-insensitively and keeps the API's order. An
/// empty filter is the same as no filter.
pub async fn fetch_team_keys(
    client: &LinearClient,
    filter: Option<&[String]>,
) -> Result<Vec<String>, LinearError> {
    let all_keys: Vec<String> = client.teams().await?.into_iter().map(|t| t.key).collect();
    Ok(filter_team_keys(all_keys, filter))
}

fn filter_team_keys(all_keys: Vec<String>, filter: Option<&[String]>) -> Vec<String> {
    let Some(filter) = filter.filter(|f| !f.is_empty()) else {
        return all_keys;
    };

    let wanted: Vec<String> = filter.iter().map(|k| k.to_uppercase()).collect();
    all_keys
        .into_iter()
        .filter(|key| wanted.contains(&key.to_uppercase()))
        .collect()
}

/// Builds the web URL of an issue.
///
/// An empty workspace slug yields `https://linear.app//issue/<KEY>`, which
/// Linear redirects for signed-in users.
pub fn build_issue_url(workspace_slug: &str, issue_key: &str) -> String {
    format!("{LINEAR_WEB_URL}/{workspace_slug}/issue/{issue_key}")
}

/// Base URL recorded in report metadata.
pub fn linear_base_url(workspace_slug: &str) -> String {
    if workspace_slug.is_empty() {
        LINEAR_WEB_URL.to_string()
    } else {
        format!("{LINEAR_WEB_URL}/{workspace_slug}")
    }
}
