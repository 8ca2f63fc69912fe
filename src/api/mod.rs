//! HTTP client for the RBAC REST API.
//!
//! One method per resource and verb. Every call is sent once: no retry, no
//! timeout, no caching. A non-2xx answer becomes `AppError::Status`.

pub mod bulk;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{
    EntityId, Permission, PermissionForm, Resource, Role, RoleForm, User, UserForm,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn item_path(resource: Resource, id: &EntityId) -> String {
        format!("{}/{}", resource.segment(), id)
    }

    // ---------- Users ----------

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_json(Resource::Users.segment()).await
    }

    pub async fn get_user(&self, id: &EntityId) -> Result<User, AppError> {
        self.get_json(&Self::item_path(Resource::Users, id)).await
    }

    pub async fn create_user(&self, form: &UserForm) -> Result<User, AppError> {
        self.send_json(Method::POST, Resource::Users.segment(), form).await
    }

    pub async fn update_user(&self, id: &EntityId, form: &UserForm) -> Result<User, AppError> {
        self.send_json(Method::PUT, &Self::item_path(Resource::Users, id), form).await
    }

    pub async fn delete_user(&self, id: &EntityId) -> Result<Value, AppError> {
        self.delete(&Self::item_path(Resource::Users, id)).await
    }

    // ---------- Roles ----------

    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        self.get_json(Resource::Roles.segment()).await
    }

    pub async fn get_role(&self, id: &EntityId) -> Result<Role, AppError> {
        self.get_json(&Self::item_path(Resource::Roles, id)).await
    }

    pub async fn create_role(&self, form: &RoleForm) -> Result<Role, AppError> {
        self.send_json(Method::POST, Resource::Roles.segment(), form).await
    }

    pub async fn update_role(&self, id: &EntityId, form: &RoleForm) -> Result<Role, AppError> {
        self.send_json(Method::PUT, &Self::item_path(Resource::Roles, id), form).await
    }

    pub async fn delete_role(&self, id: &EntityId) -> Result<Value, AppError> {
        self.delete(&Self::item_path(Resource::Roles, id)).await
    }

    // ---------- Permissions ----------

    pub async fn list_permissions(&self) -> Result<Vec<Permission>, AppError> {
        self.get_json(Resource::Permissions.segment()).await
    }

    pub async fn get_permission(&self, id: &EntityId) -> Result<Permission, AppError> {
        self.get_json(&Self::item_path(Resource::Permissions, id)).await
    }

    pub async fn create_permission(&self, form: &PermissionForm) -> Result<Permission, AppError> {
        self.send_json(Method::POST, Resource::Permissions.segment(), form).await
    }

    pub async fn update_permission(
        &self,
        id: &EntityId,
        form: &PermissionForm,
    ) -> Result<Permission, AppError> {
        self.send_json(Method::PUT, &Self::item_path(Resource::Permissions, id), form).await
    }

    pub async fn delete_permission(&self, id: &EntityId) -> Result<Value, AppError> {
        self.delete(&Self::item_path(Resource::Permissions, id)).await
    }

    // ---------- Plumbing ----------

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.execute(self.http.get(self.url(path))).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.execute(self.http.request(method, self.url(path)).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, AppError> {
        let response = ensure_success(self.http.delete(self.url(path)).send().await?).await?;
        // json-server answers `{}`; tolerate an empty body as well.
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = ensure_success(request.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Turn a non-2xx response into `AppError::Status`, keeping the body text.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Status {
        status: status.as_u16(),
        body,
    })
}
