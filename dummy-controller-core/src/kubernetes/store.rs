use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::{api::PostParams, Client};

use crate::{resources::crd::v1alpha1::dummy::Dummy, FIELD_MANAGER};

use super::operations::{
    create_resource, replace_resource, replace_resource_status, try_get_resource,
};

/// Object storage as seen by the reconciler.
///
/// Getters return `Ok(None)` for missing objects, every other failure is an error.
/// Replacing an object requires its current `resourceVersion`, a stale one results
/// in a conflict (409) error.
#[async_trait]
pub trait DummyStore: Send + Sync {
    async fn get_dummy(&self, name: &str, namespace: &str) -> Result<Option<Dummy>, kube::Error>;

    async fn replace_dummy_status(
        &self,
        name: &str,
        namespace: &str,
        dummy: &Dummy,
    ) -> Result<Dummy, kube::Error>;

    async fn get_pod(&self, name: &str, namespace: &str) -> Result<Option<Pod>, kube::Error>;

    async fn create_pod(&self, namespace: &str, pod: &Pod) -> Result<Pod, kube::Error>;

    async fn replace_pod(&self, name: &str, namespace: &str, pod: &Pod)
        -> Result<Pod, kube::Error>;
}

pub struct KubeStore {
    client: Client,
    post_params: PostParams,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            post_params: PostParams {
                dry_run: false,
                field_manager: Some(FIELD_MANAGER.to_owned()),
            },
        }
    }
}

#[async_trait]
impl DummyStore for KubeStore {
    async fn get_dummy(&self, name: &str, namespace: &str) -> Result<Option<Dummy>, kube::Error> {
        try_get_resource(&self.client, name, namespace).await
    }

    async fn replace_dummy_status(
        &self,
        name: &str,
        namespace: &str,
        dummy: &Dummy,
    ) -> Result<Dummy, kube::Error> {
        replace_resource_status(&self.client, name, namespace, dummy, &self.post_params).await
    }

    async fn get_pod(&self, name: &str, namespace: &str) -> Result<Option<Pod>, kube::Error> {
        try_get_resource(&self.client, name, namespace).await
    }

    async fn create_pod(&self, namespace: &str, pod: &Pod) -> Result<Pod, kube::Error> {
        create_resource(&self.client, namespace, pod, &self.post_params).await
    }

    async fn replace_pod(
        &self,
        name: &str,
        namespace: &str,
        pod: &Pod,
    ) -> Result<Pod, kube::Error> {
        replace_resource(&self.client, name, namespace, pod, &self.post_params).await
    }
}
