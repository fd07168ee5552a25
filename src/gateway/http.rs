//! HTTP gateway backend.
//!
//! Talks JSON to a resource API laid out as:
//!
//! ```text
//! GET    {base}/{resource}            → [Pet]
//! POST   {base}/{resource}            ← {name, description}  → Pet
//! PUT    {base}/{resource}/id/{id}    ← Pet
//! DELETE {base}/{resource}/id/{id}
//! ```
//!
//! Any non-success status is reported as a transport error. Status codes and
//! error bodies are not interpreted further.

use crate::domain::error::{PetdeskError, Result};
use crate::domain::{Pet, PetId};
use crate::gateway::backend::Gateway;
use futures_util::future::BoxFuture;
use serde::Serialize;

/// Body sent when creating a record. The id is assigned by the service.
#[derive(Debug, Serialize)]
struct NewPet<'a> {
    name: &'a str,
    description: &'a str,
}

/// Gateway backed by a `reqwest` client.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    resource: String,
}

impl HttpGateway {
    /// Creates a gateway for `{base_url}/{resource}`.
    ///
    /// Trailing and leading slashes are normalized so that
    /// `"http://host/api/v1/"` and `"/pet"` join cleanly.
    #[must_use]
    pub fn new(base_url: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, resource)
    }

    /// Creates a gateway around an existing client.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let resource = resource.into().trim_matches('/').to_string();
        tracing::debug!(base_url = %base_url, resource = %resource, "http gateway configured");
        Self {
            client,
            base_url,
            resource,
        }
    }

    /// URL of the collection endpoint.
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.resource)
    }

    /// URL of a single record.
    #[must_use]
    pub fn item_url(&self, id: &PetId) -> String {
        format!("{}/{}/id/{}", self.base_url, self.resource, id)
    }
}

fn transport(context: &str, url: &str, err: &reqwest::Error) -> PetdeskError {
    PetdeskError::Transport(format!("{context} {url}: {err}"))
}

impl Gateway for HttpGateway {
    fn list(&self) -> BoxFuture<'static, Result<Vec<Pet>>> {
        let client = self.client.clone();
        let url = self.collection_url();

        Box::pin(async move {
            tracing::debug!(url = %url, "GET collection");
            let response = client
                .get(&url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|e| transport("GET", &url, &e))?;

            response
                .json::<Vec<Pet>>()
                .await
                .map_err(|e| transport("decode", &url, &e))
        })
    }

    fn create(&self, candidate: &Pet) -> BoxFuture<'static, Result<Pet>> {
        let client = self.client.clone();
        let url = self.collection_url();
        let body = serde_json::to_value(NewPet {
            name: &candidate.name,
            description: &candidate.description,
        });

        Box::pin(async move {
            let body = body?;
            tracing::debug!(url = %url, "POST record");
            let response = client
                .post(&url)
                .json(&body)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|e| transport("POST", &url, &e))?;

            response
                .json::<Pet>()
                .await
                .map_err(|e| transport("decode", &url, &e))
        })
    }

    fn update(&self, pet: &Pet) -> BoxFuture<'static, Result<()>> {
        let client = self.client.clone();
        let target = pet.id.as_ref().map(|id| self.item_url(id));
        let pet = pet.clone();

        Box::pin(async move {
            let url = target.ok_or_else(|| {
                PetdeskError::Transport("cannot update a record without an id".to_string())
            })?;
            tracing::debug!(url = %url, "PUT record");
            client
                .put(&url)
                .json(&pet)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|e| transport("PUT", &url, &e))?;
            Ok(())
        })
    }

    fn delete(&self, id: &PetId) -> BoxFuture<'static, Result<()>> {
        let client = self.client.clone();
        let url = self.item_url(id);

        Box::pin(async move {
            tracing::debug!(url = %url, "DELETE record");
            client
                .delete(&url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|e| transport("DELETE", &url, &e))?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_resource_urls() {
        let gateway = HttpGateway::new("http://localhost:8080/api/v1/", "/pet");

        assert_eq!(gateway.collection_url(), "http://localhost:8080/api/v1/pet");
        assert_eq!(
            gateway.item_url(&PetId::Number(42)),
            "http://localhost:8080/api/v1/pet/id/42"
        );
        assert_eq!(
            gateway.item_url(&PetId::Text("ab".to_string())),
            "http://localhost:8080/api/v1/pet/id/ab"
        );
    }

    #[test]
    fn create_body_omits_id() {
        let pet = Pet::new("Fido", "dog").with_id(5);
        let body = serde_json::to_value(NewPet {
            name: &pet.name,
            description: &pet.description,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"name": "Fido", "description": "dog"}));
    }

    #[tokio::test]
    async fn update_without_id_fails_as_transport_error() {
        let gateway = HttpGateway::new("http://127.0.0.1:9", "pet");
        let err = gateway.update(&Pet::new("Fido", "")).await.unwrap_err();
        assert!(matches!(err, PetdeskError::Transport(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        let gateway = HttpGateway::new("http://127.0.0.1:9", "pet");
        let err = gateway.list().await.unwrap_err();
        assert!(matches!(err, PetdeskError::Transport(_)));
    }
}
