//! GitLab issue listing client

use crate::{GisrepError, Issue, IssueQuery, Reporter, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

/// Default GitLab instance URL
pub const GITLAB_DEFAULT_URL: &str = "https://gitlab.com";

const USER_AGENT: &str = concat!("gisrep/", env!("CARGO_PKG_VERSION"));

/// Queries the GitLab issues API
///
/// A project filter scopes the request to that project's issues; otherwise
/// all issues visible to the token are searched. The token and instance URL
/// come from command-line flags, not the config file.
#[derive(Debug)]
pub struct GitlabReporter {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl GitlabReporter {
    /// Create a reporter for a GitLab instance
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GisrepError::Config(format!("invalid GitLab URL '{}': {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GisrepError::Api(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }
}

#[async_trait]
impl Reporter for GitlabReporter {
    fn name(&self) -> &'static str {
        "gitlab"
    }

    async fn search(&self, query: &IssueQuery) -> Result<Vec<Issue>> {
        let url = self
            .base_url
            .join(&issues_path(query.project.as_deref()))
            .map_err(|e| GisrepError::Api(e.to_string()))?;

        let mut params: Vec<(&str, String)> = vec![
            ("search", query.search.clone()),
            ("scope", "all".to_string()),
            ("per_page", "100".to_string()),
        ];
        if let Some(milestone) = &query.milestone {
            params.push(("milestone", milestone.clone()));
        }
        if !query.labels.is_empty() {
            params.push(("labels", query.labels.join(",")));
        }

        let mut request = self.client.get(url).query(&params);
        if let Some(token) = &self.token {
            request = request.header("PRIVATE-TOKEN", token);
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

        parse_issues_response(&body)
    }
}

/// API path for the issue listing, scoped to a project when one is given
fn issues_path(project: Option<&str>) -> String {
    match project {
        Some(project) => format!("/api/v4/projects/{}/issues", encode_project(project)),
        None => "/api/v4/issues".to_string(),
    }
}

/// Percent-encode a `group/project` path into a single URL path segment
fn encode_project(project: &str) -> String {
    url::form_urlencoded::byte_serialize(project.as_bytes()).collect()
}

fn map_status_error(status: StatusCode, body: &str) -> GisrepError {
    match status {
        StatusCode::UNAUTHORIZED => {
            GisrepError::Credential("GitLab rejected the access token (HTTP 401)".to_string())
        }
        _ => GisrepError::Api(format!(
            "GitLab returned HTTP {}: {}",
            status.as_u16(),
            body.trim()
        )),
    }
}

#[derive(Debug, Deserialize)]
struct GitlabIssue {
    iid: u64,
    title: String,
    web_url: String,
    state: String,
    author: Option<GitlabUser>,
    #[serde(default)]
    labels: Vec<String>,
    milestone: Option<GitlabMilestone>,
    created_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct GitlabUser {
    username: String,
}

#[derive(Debug, Deserialize)]
struct GitlabMilestone {
    title: String,
}

impl From<GitlabIssue> for Issue {
    fn from(wire: GitlabIssue) -> Self {
        Issue {
            number: wire.iid,
            title: wire.title,
            url: wire.web_url,
            state: wire.state,
            author: wire.author.map(|author| author.username),
            labels: wire.labels,
            milestone: wire.milestone.map(|milestone| milestone.title),
            created_at: wire.created_at,
            closed_at: wire.closed_at,
        }
    }
}

fn parse_issues_response(body: &str) -> Result<Vec<Issue>> {
    let issues: Vec<GitlabIssue> = serde_json::from_str(body)
        .map_err(|e| GisrepError::Api(format!("unexpected GitLab response: {}", e)))?;
    Ok(issues.into_iter().map(Issue::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issues_path_unscoped() {
        assert_eq!(issues_path(None), "/api/v4/issues");
    }

    #[test]
    fn test_issues_path_encodes_project() {
        assert_eq!(
            issues_path(Some("group/widgets")),
            "/api/v4/projects/group%2Fwidgets/issues"
        );
    }

    #[test]
    fn test_invalid_base_url_is_a_config_error() {
        let err = GitlabReporter::new("not a url", None).unwrap_err();
        assert!(matches!(err, GisrepError::Config(_)));
    }

    #[test]
    fn test_parse_issues_response() {
        let body = r#"[
            {
                "iid": 12,
                "title": "Pipeline flaky",
                "web_url": "https://gitlab.com/group/widgets/-/issues/12",
                "state": "closed",
                "author": { "username": "dev" },
                "labels": ["ci", "bug"],
                "milestone": { "title": "13.0" },
                "created_at": "2024-03-01T08:00:00.000Z",
                "closed_at": "2024-03-05T08:00:00.000Z"
            }
        ]"#;

        let issues = parse_issues_response(body).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].number, 12);
        assert_eq!(issues[0].author.as_deref(), Some("dev"));
        assert_eq!(issues[0].labels, vec!["ci", "bug"]);
        assert_eq!(issues[0].milestone.as_deref(), Some("13.0"));
    }

    #[test]
    fn test_malformed_response_is_an_api_error() {
        let err = parse_issues_response("{}").unwrap_err();
        assert!(matches!(err, GisrepError::Api(_)));
    }

    #[test]
    fn test_unauthorized_maps_to_credential_error() {
        let err = map_status_error(StatusCode::UNAUTHORIZED, "{}");
        assert!(matches!(err, GisrepError::Credential(_)));
    }
}
