//! Minimal GitHub GraphQL client: one blocking POST per query, no retries.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use log::debug;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::error::FetchError;

pub const GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

const USER_QUERY: &str = r#"
query($login: String!){
    user(login: $login) {
        id
        createdAt
    }
}"#;

/// How many times each query function has hit the API during this run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryCounter {
    counts: BTreeMap<&'static str, u32>,
}

impl QueryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one call of `query`.
    pub fn record(&mut self, query: &'static str) {
        *self.counts.entry(query).or_insert(0) += 1;
    }

    pub fn get(&self, query: &str) -> u32 {
        self.counts.get(query).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

impl fmt::Display for QueryCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.counts.is_empty() {
            return f.write_str("no queries");
        }
        for (i, (query, count)) in self.counts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{query}: {count}")?;
        }
        Ok(())
    }
}

/// Account id and creation time of a GitHub user.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<UserInfo>,
}

/// Blocking client bound to one access token.
pub struct GithubClient {
    http: Client,
    token: String,
    endpoint: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_endpoint(token, GRAPHQL_ENDPOINT)
    }

    /// Client for a different GraphQL endpoint (e.g. GitHub Enterprise).
    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            token: token.into(),
            endpoint: endpoint.into(),
        })
    }

    /// POST one query; anything other than 200 is an error.
    fn simple_request<T>(
        &self,
        counter: &QueryCounter,
        query_name: &'static str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("POST {} ({})", self.endpoint, query_name);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            return Err(FetchError::Status {
                query: query_name,
                status: status.as_u16(),
                body,
                counts: counter.clone(),
            });
        }
        Ok(response.json()?)
    }

    /// Account id and creation timestamp for `login`.
    pub fn user_getter(&self, counter: &mut QueryCounter, login: &str) -> Result<UserInfo, FetchError> {
        counter.record("user_getter");
        let response: GraphqlResponse<UserData> =
            self.simple_request(counter, "user_getter", USER_QUERY, json!({ "login": login }))?;
        parse_user(response, login)
    }
}

fn parse_user(response: GraphqlResponse<UserData>, login: &str) -> Result<UserInfo, FetchError> {
    response
        .data
        .and_then(|d| d.user)
        .ok_or_else(|| FetchError::MissingUser(login.to_string()))
}
