use std::time::Duration;

use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Single opaque failure for an outbound call. Callers wrap every call and
/// substitute a documented default instead of propagating this further.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("invalid url: {0}")]
    Url(String),
    #[error("response decode error: {0}")]
    Decode(String),
}

/// JSON-over-HTTP calls to a sibling service. The inbound request's
/// `Authorization` header is forwarded verbatim; there is no retry.
pub struct RemoteCallClient {
    http: Client,
    base_url: Url,
}

impl RemoteCallClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let base_url = Url::parse(base_url).map_err(|e| RemoteError::Url(e.to_string()))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        template: &str,
        vars: &[&str],
        authorization: Option<&str>,
    ) -> Result<T, RemoteError> {
        self.request::<(), T>(Method::GET, template, vars, authorization, None)
            .await
    }

    pub async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        template: &str,
        vars: &[&str],
        authorization: Option<&str>,
        body: &B,
    ) -> Result<T, RemoteError> {
        self.request(Method::POST, template, vars, authorization, Some(body))
            .await
    }

    pub async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        template: &str,
        vars: &[&str],
        authorization: Option<&str>,
        body: &B,
    ) -> Result<T, RemoteError> {
        self.request(Method::PUT, template, vars, authorization, Some(body))
            .await
    }

    async fn request<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        template: &str,
        vars: &[&str],
        authorization: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, RemoteError> {
        let path = expand_template(template, vars);
        let url = self
            .base_url
            .join(&path)
            .map_err(|e| RemoteError::Url(e.to_string()))?;

        let mut request = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        if let Some(authorization) = authorization {
            request = request.header(header::AUTHORIZATION, authorization);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

/// Substitute positional values for each `{var}` occurrence, in order.
/// Placeholders without a matching value are left as-is.
fn expand_template(template: &str, vars: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut vars = vars.iter();

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        match rest[open..].find('}') {
            Some(close) => {
                match vars.next() {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[open..open + close + 1]),
                }
                rest = &rest[open + close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_positional_placeholders() {
        assert_eq!(
            expand_template("courses/{courseId}/lecturer/{netId}", &["CSE1300", "ajansen"]),
            "courses/CSE1300/lecturer/ajansen"
        );
    }

    #[test]
    fn leaves_unmatched_placeholders_alone() {
        assert_eq!(expand_template("courses/{id}", &[]), "courses/{id}");
        assert_eq!(expand_template("courses/{id", &["x"]), "courses/{id");
    }

    #[test]
    fn plain_templates_pass_through() {
        assert_eq!(expand_template("contracts", &[]), "contracts");
    }
}
