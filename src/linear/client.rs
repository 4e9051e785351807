//! Minimal GraphQL client for the Linear API.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use super::error::LinearError;

/// Linear's GraphQL endpoint.
pub const LINEAR_API_URL: &str = "https://api.linear.app/graphql";

/// Upper bound on a single API request.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Teams requested per page.
const TEAMS_PAGE_SIZE: u32 = 100;

const TEAMS_QUERY: &str = "query Teams($first: Int!, $after: String) {
  teams(first: $first, after: $after) {
    nodes { key name }
    pageInfo { hasNextPage endCursor }
  }
}";

/// GraphQL request body.
#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

/// A single GraphQL error entry.
#[derive(Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// GraphQL response envelope.
#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

/// A Linear team.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Team {
    /// Issue key prefix, e.g. `ENG`.
    pub key: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamConnection {
    nodes: Vec<Team>,
    page_info: PageInfo,
}

#[derive(Deserialize)]
struct TeamsData {
    teams: TeamConnection,
}

/// Read-only Linear API client.
pub struct LinearClient {
    /// HTTP client for API requests.
    client: Client,
    /// Personal API key, sent as the `Authorization` header.
    api_key: String,
    /// GraphQL endpoint URL.
    endpoint: String,
}

impl LinearClient {
    /// Creates a client for the public Linear API.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LinearError> {
        Self::with_endpoint(api_key, LINEAR_API_URL)
    }

    /// Creates a client for a custom GraphQL endpoint.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, LinearError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LinearError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        })
    }

    /// Runs a GraphQL query and returns its `data`.
    async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, LinearError> {
        debug!(endpoint = %self.endpoint, "Sending Linear GraphQL request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", &self.api_key)
            .header("content-type", "application/json")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| LinearError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!("Failed to read error response body: {e}");
                String::new()
            });
            return Err(LinearError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| LinearError::InvalidResponse(e.to_string()))?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(LinearError::GraphQl(messages.join("; ")));
        }

        envelope
            .data
            .ok_or_else(|| LinearError::InvalidResponse("missing data".to_string()))
    }

    /// Lists every team visible to the API key, following pagination.
    pub async fn teams(&self) -> Result<Vec<Team>, LinearError> {
        let mut teams = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let data: TeamsData = self
                .query(TEAMS_QUERY, json!({ "first": TEAMS_PAGE_SIZE, "after": after }))
                .await?;

            teams.extend(data.teams.nodes);

            match (data.teams.page_info.has_next_page, data.teams.page_info.end_cursor) {
                (true, Some(cursor)) => after = Some(cursor),
                _ => break,
            }
        }

        info!(count = teams.len(), "Fetched Linear teams");
        Ok(teams)
    }
}
