//! OAuth2 authorization-code flow with PKCE against the stand's auth server
//!
//! Redirects are followed by hand so the authorization code can be read from the
//! `Location` header that points at the frontend. That final redirect is never
//! fetched.

use super::session::ApiSession;
use crate::config::ServerEnvs;
use crate::error::{HarnessError, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

const REGISTER_ENDPOINT: &str = "/register";
const AUTHORIZE_ENDPOINT: &str = "/oauth2/authorize";
const LOGIN_ENDPOINT: &str = "/login";
const TOKEN_ENDPOINT: &str = "/oauth2/token";

const CLIENT_ID: &str = "client";
const XSRF_COOKIE: &str = "XSRF-TOKEN";
const MAX_REDIRECTS: usize = 10;

/// PKCE verifier and its S256 challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

impl Pkce {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::from_verifier(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn from_verifier(verifier: String) -> Self {
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        Self {
            verifier,
            challenge,
        }
    }
}

/// Result of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Registers users and obtains access tokens
#[derive(Debug, Clone)]
pub struct OAuthClient {
    auth_url: String,
    redirect_uri: String,
}

/// One browser-like conversation with the auth server
struct AuthFlow {
    session: ApiSession,
    jar: Arc<Jar>,
    auth_url: Url,
}

impl OAuthClient {
    pub fn new(server: &ServerEnvs) -> Self {
        Self {
            auth_url: server.auth_url.trim_end_matches('/').to_string(),
            redirect_uri: format!("{}/authorized", server.frontend_url.trim_end_matches('/')),
        }
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Register a user; an existing user is not an error
    #[instrument(name = "register user", skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<RegistrationOutcome> {
        let flow = self.flow()?;

        let page = flow
            .session
            .send(flow.session.get(REGISTER_ENDPOINT), "open registration page")
            .await?;
        ApiSession::expect_status(page, StatusCode::OK, "open registration page").await?;
        let csrf = flow.xsrf_token()?;

        let response = flow
            .session
            .send(
                flow.session.post(REGISTER_ENDPOINT).form(&[
                    ("_csrf", csrf.as_str()),
                    ("username", username),
                    ("password", password),
                    ("passwordSubmit", password),
                ]),
                "register user",
            )
            .await?;

        match response.status() {
            StatusCode::CREATED => {
                info!("Registered user {}", username);
                Ok(RegistrationOutcome::Created)
            }
            StatusCode::BAD_REQUEST => {
                info!("User {} already exists", username);
                Ok(RegistrationOutcome::AlreadyExists)
            }
            status => Err(HarnessError::UnexpectedStatus {
                operation: "register user".to_string(),
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Log in and exchange the authorization code for an access token
    #[instrument(name = "get access token", skip(self, password))]
    pub async fn get_token(&self, username: &str, password: &str) -> Result<String> {
        let flow = self.flow()?;
        let pkce = Pkce::generate();

        let authorize = flow
            .session
            .get(AUTHORIZE_ENDPOINT)
            .query(&[
                ("response_type", "code"),
                ("client_id", CLIENT_ID),
                ("scope", "openid"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("code_challenge", pkce.challenge.as_str()),
                ("code_challenge_method", "S256"),
            ]);
        let response = flow.session.send(authorize, "authorize").await?;
        let mut code = self.follow_redirects(&flow, response, "authorize").await?;

        let csrf = flow.xsrf_token()?;
        let login = flow.session.post(LOGIN_ENDPOINT).form(&[
            ("_csrf", csrf.as_str()),
            ("username", username),
            ("password", password),
        ]);
        let response = flow.session.send(login, "login").await?;
        if let Some(found) = self.follow_redirects(&flow, response, "login").await? {
            code = Some(found);
        }

        let code = code.ok_or_else(|| {
            HarnessError::Auth(format!("No authorization code issued for {}", username))
        })?;

        let exchange = flow.session.post(TOKEN_ENDPOINT).form(&[
            ("code", code.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("code_verifier", pkce.verifier.as_str()),
            ("grant_type", "authorization_code"),
            ("client_id", CLIENT_ID),
        ]);
        let response = flow.session.send(exchange, "exchange code").await?;
        let token: TokenResponse =
            ApiSession::expect_json(response, StatusCode::OK, "exchange code").await?;

        let access_token = token
            .access_token
            .ok_or_else(|| HarnessError::Auth("Token response has no access_token".to_string()))?;
        info!("Access token obtained for {}", username);
        Ok(access_token)
    }

    fn flow(&self) -> Result<AuthFlow> {
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(jar.clone())
            .redirect(Policy::none())
            .timeout(Duration::from_secs(30))
            .build()?;
        let auth_url = Url::parse(&self.auth_url)
            .map_err(|e| HarnessError::Config(format!("Invalid AUTH_URL {}: {}", self.auth_url, e)))?;

        Ok(AuthFlow {
            session: ApiSession::new(&self.auth_url, client),
            jar,
            auth_url,
        })
    }

    /// Follow redirects until a non-redirect response or the frontend redirect
    /// URI, returning the last `code` seen in a `Location`
    async fn follow_redirects(
        &self,
        flow: &AuthFlow,
        mut response: Response,
        operation: &str,
    ) -> Result<Option<String>> {
        let mut code = None;

        for _ in 0..MAX_REDIRECTS {
            if !response.status().is_redirection() {
                return Ok(code);
            }
            let Some(location) = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
            else {
                return Ok(code);
            };

            let target = response.url().join(location).map_err(|e| {
                HarnessError::Auth(format!("Bad redirect location {}: {}", location, e))
            })?;
            if let Some(found) = authorization_code(&target) {
                code = Some(found);
            }
            if target.as_str().starts_with(&self.redirect_uri) {
                debug!("Reached redirect URI {}", target);
                return Ok(code);
            }

            response = flow
                .session
                .send(flow.session.client().get(target), operation)
                .await?;
        }

        Err(HarnessError::Auth(format!(
            "More than {} redirects during {}",
            MAX_REDIRECTS, operation
        )))
    }
}

impl AuthFlow {
    fn xsrf_token(&self) -> Result<String> {
        self.jar
            .cookies(&self.auth_url)
            .and_then(|header| header.to_str().ok().and_then(|v| cookie_value(v, XSRF_COOKIE)))
            .ok_or_else(|| HarnessError::Auth(format!("{} cookie was not set", XSRF_COOKIE)))
    }
}

fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

fn authorization_code(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
}
