// API client module: the credential record, the `Launchpad` handle handed
// back to callers, and the gateway that performs the two remote exchanges
// this tool needs (probing a stored credential, running the interactive
// token handshake). All HTTP goes through a small blocking reqwest client;
// the rest of the crate only sees the `AuthGateway` trait.

use anyhow::{Context, Result};
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::LpError;

/// Authorization material granting API access, persisted as JSON in the
/// per-environment auth file after a one-time handshake.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub access_token: String,
    pub access_secret: String,
}

/// Client handle bound to one endpoint and one credential. Ownership moves
/// to the caller; this crate keeps no reference after construction.
#[derive(Debug)]
pub struct Launchpad {
    http: Client,
    endpoint: String,
    credentials: Credentials,
    cache_dir: Option<PathBuf>,
}

impl Launchpad {
    pub fn new(
        credentials: Credentials,
        endpoint: &str,
        cache_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Launchpad {
            http,
            endpoint: endpoint.to_string(),
            credentials,
            cache_dir,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn cache_dir(&self) -> Option<&PathBuf> {
        self.cache_dir.as_ref()
    }

    /// URL of the project collection on the bound endpoint.
    pub fn projects_url(&self) -> String {
        format!("{}projects/", self.endpoint)
    }

    /// Perform an authenticated GET against a path relative to the
    /// endpoint and parse the JSON body.
    pub fn get(&self, path: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.endpoint, path);
        let res = self
            .http
            .get(&url)
            .headers(oauth_headers(&self.credentials)?)
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Request failed: {} - {}", status, txt);
        }
        res.json().context("Parsing response json")
    }
}

/// The two remote operations the credential loader depends on. Kept as a
/// trait so tests can substitute a stub for the real HTTP flow.
pub trait AuthGateway {
    /// Probe `endpoint` with a stored credential. `Ok(false)` means the
    /// remote rejected it; `Err` is a transport failure.
    fn check(&self, credentials: &Credentials, endpoint: &str) -> Result<bool>;

    /// Drive the interactive handshake: obtain a request token, send the
    /// user to the authorize page, then exchange for an access token.
    /// Blocks until the flow completes or the remote rejects it.
    fn acquire(&self, app_name: &str, endpoint: &str) -> Result<Credentials>;
}

/// `AuthGateway` over blocking reqwest plus a terminal confirm prompt.
pub struct HttpGateway {
    http: Client,
}

impl HttpGateway {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpGateway { http })
    }
}

impl AuthGateway for HttpGateway {
    fn check(&self, credentials: &Credentials, endpoint: &str) -> Result<bool> {
        let res = self
            .http
            .get(endpoint)
            .headers(oauth_headers(credentials)?)
            .send()
            .with_context(|| format!("Failed to reach {}", endpoint))?;
        let status = res.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(false);
        }
        if !status.is_success() {
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Endpoint probe failed: {} - {}", status, txt);
        }
        Ok(true)
    }

    fn acquire(&self, app_name: &str, endpoint: &str) -> Result<Credentials> {
        // Step 1: request token. Launchpad signs with PLAINTEXT and an
        // empty token secret at this stage.
        let url = format!("{}+request-token", endpoint);
        let res = self
            .http
            .post(&url)
            .form(&[
                ("oauth_consumer_key", app_name),
                ("oauth_signature_method", "PLAINTEXT"),
                ("oauth_signature", "&"),
            ])
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;
        if !res.status().is_success() {
            let body = res.text().unwrap_or_else(|_| "".into());
            eprintln!("{}", body);
            return Err(LpError::AuthorizationFailed {
                endpoint: endpoint.to_string(),
                body,
            }
            .into());
        }
        let body = res.text().context("Reading request-token response")?;
        let (request_token, request_secret) = parse_token_response(&body)
            .with_context(|| format!("Malformed request-token response: {}", body))?;

        // Step 2: the user authorizes the request token in a browser.
        eprintln!(
            "Open this link to authorize {}:\n  {}+authorize-token?oauth_token={}",
            app_name, endpoint, request_token
        );
        Confirm::new()
            .with_prompt("Press enter once you have authorized the token")
            .default(true)
            .interact()
            .context("Authorization prompt aborted")?;

        // Step 3: exchange for the access token.
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
        spinner.set_message("Exchanging tokens...");
        let url = format!("{}+access-token", endpoint);
        let signature = format!("&{}", request_secret);
        let res = self
            .http
            .post(&url)
            .form(&[
                ("oauth_consumer_key", app_name),
                ("oauth_token", request_token.as_str()),
                ("oauth_signature_method", "PLAINTEXT"),
                ("oauth_signature", signature.as_str()),
            ])
            .send()
            .with_context(|| format!("Failed to send request to {}", url))?;
        spinner.finish_and_clear();
        if !res.status().is_success() {
            let body = res.text().unwrap_or_else(|_| "".into());
            eprintln!("{}", body);
            return Err(LpError::AuthorizationFailed {
                endpoint: endpoint.to_string(),
                body,
            }
            .into());
        }
        let body = res.text().context("Reading access-token response")?;
        let (access_token, access_secret) = parse_token_response(&body)
            .with_context(|| format!("Malformed access-token response: {}", body))?;

        Ok(Credentials {
            consumer_key: app_name.to_string(),
            access_token,
            access_secret,
        })
    }
}

/// Build the OAuth header for an authenticated request. Launchpad accepts
/// PLAINTEXT signatures, so no signing beyond string assembly is needed.
/// Errors if the credential material cannot appear in a header value; a
/// request must never go out unauthenticated.
fn oauth_headers(credentials: &Credentials) -> Result<HeaderMap> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let val = format!(
        "OAuth realm=\"\", oauth_consumer_key=\"{}\", oauth_token=\"{}\", \
         oauth_signature_method=\"PLAINTEXT\", oauth_signature=\"%26{}\", \
         oauth_version=\"1.0\", oauth_timestamp=\"{}\", oauth_nonce=\"{}\"",
        credentials.consumer_key,
        credentials.access_token,
        credentials.access_secret,
        now.as_secs(),
        now.as_nanos(),
    );
    let value = HeaderValue::from_str(&val)
        .context("Credential material is not valid in an Authorization header")?;
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Pick `oauth_token` and `oauth_token_secret` out of a form-encoded token
/// response.
fn parse_token_response(body: &str) -> Option<(String, String)> {
    let mut token = None;
    let mut secret = None;
    for pair in body.trim().split('&') {
        match pair.split_once('=') {
            Some(("oauth_token", v)) => token = Some(v.to_string()),
            Some(("oauth_token_secret", v)) => secret = Some(v.to_string()),
            _ => {}
        }
    }
    Some((token?, secret?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token_pairs_in_any_order() {
        let body = "oauth_token_secret=s3cr3t&oauth_token=tok&lp.context=none";
        assert_eq!(
            parse_token_response(body),
            Some(("tok".into(), "s3cr3t".into()))
        );
    }

    #[test]
    fn rejects_incomplete_token_response() {
        assert_eq!(parse_token_response("oauth_token=tok"), None);
        assert_eq!(parse_token_response(""), None);
    }

    #[test]
    fn oauth_header_carries_token_and_key() {
        let creds = Credentials {
            consumer_key: "just testing".into(),
            access_token: "tok".into(),
            access_secret: "sec".into(),
        };
        let headers = oauth_headers(&creds).unwrap();
        let value = headers.get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert!(value.contains("oauth_consumer_key=\"just testing\""));
        assert!(value.contains("oauth_token=\"tok\""));
        assert!(value.contains("oauth_signature=\"%26sec\""));
    }

    #[test]
    fn unheaderable_credential_material_is_an_error() {
        let creds = Credentials {
            consumer_key: "line\nbreak".into(),
            access_token: "tok".into(),
            access_secret: "sec".into(),
        };
        assert!(oauth_headers(&creds).is_err());
    }

    #[test]
    fn handle_derives_projects_url_from_its_endpoint() {
        let creds = Credentials {
            consumer_key: "just testing".into(),
            access_token: "tok".into(),
            access_secret: "sec".into(),
        };
        let lp = Launchpad::new(creds, "https://api.launchpad.net/beta/", None).unwrap();
        assert_eq!(
            lp.projects_url(),
            "https://api.launchpad.net/beta/projects/"
        );
    }
}
