//! Jenkins JSON API client.

use serde_json::Value;
use tracing::info;
use url::Url;

use crate::badge::BuildRecord;
use crate::error::BadgeError;
use crate::state::SharedState;

/// `<base>/job/<job>/job/<branch>/lastBuild/api/json`. Folder jobs pass
/// their nested path (`folder/job/inner`) straight through as `job`.
pub fn build_api_url(base: &Url, job: &str, branch: &str) -> Result<Url, BadgeError> {
    let endpoint = format!("job/{}/job/{}/lastBuild/api/json", job, branch);
    let url = base
        .join(&endpoint)
        .map_err(|e| BadgeError::InvalidRequest(format!("bad job path {:?}: {}", endpoint, e)))?;
    // Credentials only ever go to paths under the configured base
    if url.origin() != base.origin() || !url.path().starts_with(base.path()) {
        return Err(BadgeError::InvalidRequest(format!(
            "job path {:?} resolves outside {}",
            endpoint, base
        )));
    }
    Ok(url)
}

/// Fetch the last build of `job`/`branch`. Anything other than a 2xx JSON
/// response is `UpstreamUnavailable`.
pub async fn fetch_last_build(
    state: &SharedState,
    job: &str,
    branch: &str,
) -> Result<BuildRecord, BadgeError> {
    let url = build_api_url(&state.config.jenkins_url, job, branch)?;

    let mut request = state.http_client.get(url.clone());
    if let Some((user, token)) = state.config.credentials() {
        request = request.basic_auth(user, token);
    }

    let resp = request.send().await.map_err(|e| {
        info!("GET failed {}: {}", url, e);
        BadgeError::UpstreamUnavailable(e.to_string())
    })?;
    info!("GET {} {}", resp.status().as_u16(), url);

    if !resp.status().is_success() {
        return Err(BadgeError::UpstreamUnavailable(format!(
            "{} returned {}",
            url,
            resp.status()
        )));
    }

    let doc: Value = resp
        .json()
        .await
        .map_err(|e| BadgeError::UpstreamUnavailable(format!("{} sent invalid JSON: {}", url, e)))?;

    Ok(BuildRecord::from_json(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let base = Url::parse("http://localhost:8080/").unwrap();
        let url = build_api_url(&base, "myapp", "main").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/job/myapp/job/main/lastBuild/api/json"
        );
    }

    #[test]
    fn test_api_url_keeps_base_path() {
        let base = Url::parse("https://ci.example.com/jenkins/").unwrap();
        let url = build_api_url(&base, "team/job/myapp", "feature%2Flogin").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ci.example.com/jenkins/job/team/job/myapp/job/feature%2Flogin/lastBuild/api/json"
        );
    }

    #[test]
    fn test_api_url_stays_under_base() {
        let base = Url::parse("https://ci.example.com/jenkins/").unwrap();
        for job in ["%2e%2e/%2e%2e/%2e%2e/%2e%2e", "../..", "x/%2E%2E/../.."] {
            assert!(
                matches!(
                    build_api_url(&base, job, "main"),
                    Err(BadgeError::InvalidRequest(_))
                ),
                "{} should be rejected",
                job
            );
        }
    }
}
