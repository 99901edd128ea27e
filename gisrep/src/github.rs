//! GitHub issue search client

use crate::{Credentials, GisrepError, Issue, IssueQuery, Reporter, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;

/// GitHub REST API base URL
pub const GITHUB_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("gisrep/", env!("CARGO_PKG_VERSION"));

/// Queries the GitHub issue search endpoint
///
/// The search string is handed to the API verbatim; milestone, label, and
/// project filters are folded into search qualifiers. Authenticates with
/// basic auth when credentials are given, otherwise queries anonymously at
/// the lower unauthenticated rate limit.
pub struct GithubReporter {
    client: reqwest::Client,
    credentials: Option<Credentials>,
}

impl GithubReporter {
    /// Create a reporter authenticating with the given credentials
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::build(Some(credentials))
    }

    /// Create a reporter without credentials
    pub fn anonymous() -> Result<Self> {
        Self::build(None)
    }

    fn build(credentials: Option<Credentials>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GisrepError::Api(e.to_string()))?;

        Ok(Self {
            client,
            credentials,
        })
    }
}

#[async_trait]
impl Reporter for GithubReporter {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn search(&self, query: &IssueQuery) -> Result<Vec<Issue>> {
        let url = format!("{}/search/issues", GITHUB_API_URL);
        let q = build_search_query(query);

        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .query(&[
                ("q", q.as_str()),
                ("sort", "created"),
                ("order", "asc"),
                ("per_page", "100"),
            ]);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.secret));
        }

        let response = request
            .send()
            .await
            .map_err(|e| GisrepError::Api(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GisrepError::Api(e.to_string()))?;

        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }

        parse_search_response(&body)
    }
}

/// Fold the query filters into GitHub search qualifiers
fn build_search_query(query: &IssueQuery) -> String {
    let mut q = query.search.clone();
    if let Some(project) = &query.project {
        q.push_str(&format!(" repo:{}", project));
    }
    if let Some(milestone) = &query.milestone {
        q.push_str(&format!(" milestone:\"{}\"", milestone));
    }
    for label in &query.labels {
        q.push_str(&format!(" label:\"{}\"", label));
    }
    q.trim().to_string()
}

fn map_status_error(status: StatusCode, body: &str) -> GisrepError {
    match status {
        StatusCode::UNAUTHORIZED => GisrepError::Credential(
            "GitHub rejected the stored credentials (HTTP 401)".to_string(),
        ),
        _ => GisrepError::Api(format!(
            "GitHub returned HTTP {}: {}",
            status.as_u16(),
            snippet(body)
        )),
    }
}

fn snippet(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(200)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    body[..end].trim()
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<GithubIssue>,
}

#[derive(Debug, Deserialize)]
struct GithubIssue {
    number: u64,
    title: String,
    html_url: String,
    state: String,
    user: Option<GithubUser>,
    #[serde(default)]
    labels: Vec<GithubLabel>,
    milestone: Option<GithubMilestone>,
    created_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GithubLabel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GithubMilestone {
    title: String,
}

impl From<GithubIssue> for Issue {
    fn from(wire: GithubIssue) -> Self {
        Issue {
            number: wire.number,
            title: wire.title,
            url: wire.html_url,
            state: wire.state,
            author: wire.user.map(|user| user.login),
            labels: wire.labels.into_iter().map(|label| label.name).collect(),
            milestone: wire.milestone.map(|milestone| milestone.title),
            created_at: wire.created_at,
            closed_at: wire.closed_at,
        }
    }
}

fn parse_search_response(body: &str) -> Result<Vec<Issue>> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| GisrepError::Api(format!("unexpected GitHub response: {}", e)))?;
    Ok(response.items.into_iter().map(Issue::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_string_passes_through_verbatim() {
        let query = IssueQuery::new("repo:rust-lang/rust is:closed widget");
        assert_eq!(
            build_search_query(&query),
            "repo:rust-lang/rust is:closed widget"
        );
    }

    #[test]
    fn test_filters_become_search_qualifiers() {
        let query = IssueQuery::new("is:closed")
            .with_project("octo/widgets")
            .with_milestone("v1.0")
            .with_labels(vec!["bug".to_string(), "good first issue".to_string()]);

        assert_eq!(
            build_search_query(&query),
            r#"is:closed repo:octo/widgets milestone:"v1.0" label:"bug" label:"good first issue""#
        );
    }

    #[test]
    fn test_parse_search_response() {
        let body = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {
                    "number": 7,
                    "title": "Widget is broken",
                    "html_url": "https://github.com/octo/widgets/issues/7",
                    "state": "closed",
                    "user": { "login": "octocat" },
                    "labels": [ { "name": "bug" } ],
                    "milestone": { "title": "v1.0" },
                    "created_at": "2024-01-15T09:30:00Z",
                    "closed_at": "2024-02-01T10:00:00Z"
                },
                {
                    "number": 9,
                    "title": "Add gadgets",
                    "html_url": "https://github.com/octo/widgets/issues/9",
                    "state": "open",
                    "user": null,
                    "labels": [],
                    "milestone": null,
                    "created_at": "2024-01-20T09:30:00Z",
                    "closed_at": null
                }
            ]
        }"#;

        let issues = parse_search_response(body).unwrap();
        assert_eq!(issues.len(), 2);

        assert_eq!(issues[0].number, 7);
        assert_eq!(issues[0].title, "Widget is broken");
        assert_eq!(issues[0].author.as_deref(), Some("octocat"));
        assert_eq!(issues[0].labels, vec!["bug"]);
        assert_eq!(issues[0].milestone.as_deref(), Some("v1.0"));
        assert!(issues[0].closed_at.is_some());

        assert_eq!(issues[1].number, 9);
        assert!(issues[1].author.is_none());
        assert!(issues[1].labels.is_empty());
        assert!(issues[1].closed_at.is_none());
    }

    #[test]
    fn test_malformed_response_is_an_api_error() {
        let err = parse_search_response("not json").unwrap_err();
        assert!(matches!(err, GisrepError::Api(_)));
        assert!(err.to_string().contains("unexpected GitHub response"));
    }

    #[test]
    fn test_unauthorized_maps_to_credential_error() {
        let err = map_status_error(StatusCode::UNAUTHORIZED, "{}");
        assert!(matches!(err, GisrepError::Credential(_)));
    }

    #[test]
    fn test_other_statuses_map_to_api_error() {
        let err = map_status_error(StatusCode::UNPROCESSABLE_ENTITY, "bad query");
        assert!(matches!(err, GisrepError::Api(_)));
        assert!(err.to_string().contains("422"));
    }
}
