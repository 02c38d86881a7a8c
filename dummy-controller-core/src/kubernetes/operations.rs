use std::fmt::Debug;

use k8s_openapi::{
    serde::{de::DeserializeOwned, Serialize},
    NamespaceResourceScope,
};
use kube::{api::PostParams, Client, Resource};
use log::{debug, info};

use crate::helpers::pretty_type_name;

use super::GetApi;

pub const NOT_FOUND_CODE: u16 = 404;
pub const CONFLICT_CODE: u16 = 409;

pub fn is_not_found(error: &kube::Error) -> bool {
    matches!(error, kube::Error::Api(response) if response.code == NOT_FOUND_CODE)
}

pub fn is_conflict(error: &kube::Error) -> bool {
    matches!(error, kube::Error::Api(response) if response.code == CONFLICT_CODE)
}

pub async fn try_get_resource<T>(
    client: &Client,
    name: &str,
    namespace: &str,
) -> Result<Option<T>, kube::Error>
where
    T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Debug,
{
    let resource = client.namespaced_api::<T>(namespace).get_opt(name).await?;

    if resource.is_none() {
        debug!(
            "'{name}' {} resource doesn't exist in '{namespace}'",
            pretty_type_name::<T>()
        );
    }

    Ok(resource)
}

pub async fn create_resource<T>(
    client: &Client,
    namespace: &str,
    resource: &T,
    post_params: &PostParams,
) -> Result<T, kube::Error>
where
    T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Serialize
        + Clone
        + DeserializeOwned
        + Debug,
{
    info!(
        "Creating '{}' {} resource in '{namespace}'...",
        resource.meta().name.as_deref().unwrap_or_default(),
        pretty_type_name::<T>()
    );

    client
        .namespaced_api::<T>(namespace)
        .create(post_params, resource)
        .await
}

/// Replaces the whole resource, the server rejects it if `resourceVersion` is stale
pub async fn replace_resource<T>(
    client: &Client,
    name: &str,
    namespace: &str,
    resource: &T,
    post_params: &PostParams,
) -> Result<T, kube::Error>
where
    T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Serialize
        + Clone
        + DeserializeOwned
        + Debug,
{
    info!(
        "Updating '{name}' {} resource in '{namespace}'...",
        pretty_type_name::<T>()
    );

    client
        .namespaced_api::<T>(namespace)
        .replace(name, post_params, resource)
        .await
}

/// Replaces the status subresource, the server rejects it if `resourceVersion` is stale
pub async fn replace_resource_status<T>(
    client: &Client,
    name: &str,
    namespace: &str,
    resource: &T,
    post_params: &PostParams,
) -> Result<T, kube::Error>
where
    T: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Serialize
        + Clone
        + DeserializeOwned
        + Debug,
{
    debug!(
        "Updating '{name}' {} status in '{namespace}'...",
        pretty_type_name::<T>()
    );

    let data = serde_json::to_vec(resource).map_err(kube::Error::SerdeError)?;

    client
        .namespaced_api::<T>(namespace)
        .replace_status(name, post_params, data)
        .await
}
