use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ApiClient;
use crate::errors::AppError;
use crate::models::{EntityId, Resource};

#[derive(Debug, Serialize)]
struct BulkDeleteRequest {
    ids: Vec<i64>,
}

/// Envelope returned by `/bulk/{resource}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDeleteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Convert every identifier to the numeric form the bulk endpoints expect.
///
/// The whole batch is rejected on the first identifier that is not an
/// integer; nothing is dropped silently.
pub fn coerce_ids(ids: &[EntityId]) -> Result<Vec<i64>, AppError> {
    ids.iter()
        .map(|id| id.as_number().ok_or_else(|| AppError::InvalidId(id.to_string())))
        .collect()
}

fn failure_message(resource: Resource) -> String {
    format!("Failed to delete {}", resource.segment())
}

/// Map a bulk-delete answer onto success or a descriptive failure.
pub(crate) fn interpret(
    resource: Resource,
    status: u16,
    body: &[u8],
) -> Result<BulkDeleteResponse, AppError> {
    let parsed = serde_json::from_slice::<BulkDeleteResponse>(body).ok();
    if !(200..300).contains(&status) {
        let reason = parsed
            .and_then(|r| r.error)
            .unwrap_or_else(|| failure_message(resource));
        return Err(AppError::Bulk(reason));
    }
    match parsed {
        Some(envelope) if envelope.success && envelope.error.is_none() => Ok(envelope),
        Some(envelope) => Err(AppError::Bulk(
            envelope.error.unwrap_or_else(|| failure_message(resource)),
        )),
        None => Err(AppError::Bulk(failure_message(resource))),
    }
}

impl ApiClient {
    /// DELETE /bulk/users with `{ids: [number]}`.
    pub async fn bulk_delete_users(&self, ids: &[EntityId]) -> Result<BulkDeleteResponse, AppError> {
        self.bulk_delete(Resource::Users, ids).await
    }

    /// DELETE /bulk/roles with `{ids: [number]}`.
    pub async fn bulk_delete_roles(&self, ids: &[EntityId]) -> Result<BulkDeleteResponse, AppError> {
        self.bulk_delete(Resource::Roles, ids).await
    }

    async fn bulk_delete(
        &self,
        resource: Resource,
        ids: &[EntityId],
    ) -> Result<BulkDeleteResponse, AppError> {
        let ids = coerce_ids(ids)?;
        let url = self.url(&format!("bulk/{}", resource.segment()));
        let response = self
            .http()
            .delete(url)
            .json(&BulkDeleteRequest { ids })
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        interpret(resource, status, &body)
    }
}
