//! Client for the hosted identity service's admin user API.

use anyhow::{Context as _, anyhow};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::repository::IdentityPort;
use crate::domain::types::Identity;
use crate::error::AdminServiceError;

const LIST_PAGE_SIZE: usize = 500;

#[derive(Clone)]
pub struct HttpIdentityClient {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

#[derive(Deserialize)]
struct IdentityUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct IdentityUserPage {
    users: Vec<IdentityUser>,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn text(&self) -> &str {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or_default()
    }

    fn is_already_registered(&self) -> bool {
        self.error_code.as_deref() == Some("email_exists")
            || self.text().to_lowercase().contains("already registered")
            || self.text().to_lowercase().contains("already been registered")
    }
}

impl HttpIdentityClient {
    /// `base_url` is the service root, e.g. `https://project.example.co`.
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            service_key: service_key.into(),
        }
    }

    fn users_url(&self) -> String {
        format!("{}/auth/v1/admin/users", self.base_url)
    }

    fn user_url(&self, id: Uuid) -> String {
        format!("{}/{id}", self.users_url())
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn send(&self, req: RequestBuilder, op: &str) -> Result<Response, AdminServiceError> {
        self.authorized(req)
            .send()
            .await
            .with_context(|| format!("{op}: request failed"))
            .map_err(AdminServiceError::IdentityServiceError)
    }
}

/// Read a failed response into an error naming the operation and status.
async fn failure(resp: Response, op: &str) -> (StatusCode, ErrorBody, anyhow::Error) {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    let err = anyhow!("{op}: identity service returned {status}: {}", body.text());
    (status, body, err)
}

impl IdentityPort for HttpIdentityClient {
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        auto_confirm: bool,
    ) -> Result<Uuid, AdminServiceError> {
        let req = self.client.post(self.users_url()).json(&serde_json::json!({
            "email": email,
            "password": password,
            "email_confirm": auto_confirm,
        }));
        let resp = self.send(req, "create identity").await?;
        if !resp.status().is_success() {
            let (status, body, err) = failure(resp, "create identity").await;
            let conflict = match status {
                StatusCode::CONFLICT => true,
                StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => {
                    body.is_already_registered()
                }
                _ => false,
            };
            return Err(if conflict {
                AdminServiceError::IdentityConflict
            } else {
                AdminServiceError::IdentityServiceError(err)
            });
        }
        let user: IdentityUser = resp
            .json()
            .await
            .context("create identity: invalid response body")
            .map_err(AdminServiceError::IdentityServiceError)?;
        Ok(user.id)
    }

    async fn delete_identity(&self, id: Uuid) -> Result<(), AdminServiceError> {
        let resp = self
            .send(self.client.delete(self.user_url(id)), "delete identity")
            .await?;
        if resp.status().is_success() {
            return Ok(());
        }
        let (status, _, err) = failure(resp, "delete identity").await;
        Err(match status {
            StatusCode::NOT_FOUND => AdminServiceError::UserNotFound,
            _ => AdminServiceError::IdentityServiceError(err),
        })
    }

    async fn update_password(&self, id: Uuid, password: &str) -> Result<(), AdminServiceError> {
        let req = self
            .client
            .put(self.user_url(id))
            .json(&serde_json::json!({ "password": password }));
        let resp = self.send(req, "update password").await?;
        if resp.status().is_success() {
            return Ok(());
        }
        let (status, _, err) = failure(resp, "update password").await;
        Err(match status {
            StatusCode::NOT_FOUND => AdminServiceError::UserNotFound,
            _ => AdminServiceError::IdentityServiceError(err),
        })
    }

    async fn list_identities(&self) -> Result<Vec<Identity>, AdminServiceError> {
        let mut identities = Vec::new();
        for page in 1.. {
            let url = format!("{}?page={page}&per_page={LIST_PAGE_SIZE}", self.users_url());
            let req = self.client.get(url);
            let resp = self.send(req, "list identities").await?;
            if !resp.status().is_success() {
                let (_, _, err) = failure(resp, "list identities").await;
                return Err(AdminServiceError::IdentityServiceError(err));
            }
            let batch: IdentityUserPage = resp
                .json()
                .await
                .context("list identities: invalid response body")
                .map_err(AdminServiceError::IdentityServiceError)?;
            let done = batch.users.len() < LIST_PAGE_SIZE;
            identities.extend(batch.users.into_iter().map(|u| Identity {
                id: u.id,
                email: u.email,
            }));
            if done {
                break;
            }
        }
        Ok(identities)
    }
}
