//! In-memory object store for reconciler tests.
//!
//! Mimics the parts of the API server the reconciler relies on: `resourceVersion`
//! checks on replace, 404/409 responses, status subresource semantics and the
//! `Pending` phase defaulting of new pods. Every write issued through the
//! [`DummyStore`] trait is recorded, edits made by tests are not.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use dummy_controller_core::{
    kubernetes::{
        operations::{CONFLICT_CODE, NOT_FOUND_CODE},
        store::DummyStore,
    },
    resources::{
        controller::ControllerConfig,
        crd::v1alpha1::dummy::{Dummy, DummySpec},
    },
};
use k8s_openapi::api::core::v1::{Pod, PodStatus};
use kube::{error::ErrorResponse, runtime::reflector::ObjectRef};

use super::context::ReconcilerContext;

pub const NAMESPACE: &str = "default";
pub const OWNER_NAME: &str = "test-resource";
pub const POD_NAME: &str = "dummy-object-bound-container-pod-test-resource";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    CreatePod(String),
    ReplacePod(String),
    ReplaceDummyStatus(String),
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    dummies: BTreeMap<(String, String), Dummy>,
    pods: BTreeMap<(String, String), Pod>,
    writes: Vec<Write>,
    version: u64,
    unavailable: bool,
    reject_pod_writes: bool,
    concurrent_pod_writer: bool,
}

impl MemoryState {
    fn next_version(&mut self) -> String {
        self.version += 1;
        self.version.to_string()
    }
}

fn key(name: &str, namespace: &str) -> (String, String) {
    (namespace.to_owned(), name.to_owned())
}

fn api_error(code: u16, reason: &str) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_owned(),
        message: format!("{reason} (memory store)"),
        reason: reason.to_owned(),
        code,
    })
}

pub fn owner_key() -> ObjectRef<Dummy> {
    ObjectRef::new(OWNER_NAME).within(NAMESPACE)
}

pub fn context_for(store: &Arc<MemoryStore>) -> ReconcilerContext {
    ReconcilerContext::new(store.clone(), ControllerConfig::default())
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap()
    }

    pub fn insert_dummy(&self, name: &str, namespace: &str, message: &str) -> Dummy {
        let mut state = self.lock();
        let mut dummy = Dummy::new(
            name,
            DummySpec {
                message: message.to_owned(),
            },
        );
        dummy.metadata.namespace = Some(namespace.to_owned());
        dummy.metadata.uid = Some(format!("{name}-uid"));
        dummy.metadata.resource_version = Some(state.next_version());

        state.dummies.insert(key(name, namespace), dummy.clone());

        dummy
    }

    pub fn edit_dummy(&self, name: &str, namespace: &str, edit: impl FnOnce(&mut Dummy)) {
        let mut state = self.lock();
        let version = state.next_version();
        let dummy = state.dummies.get_mut(&key(name, namespace)).unwrap();

        edit(dummy);
        dummy.metadata.resource_version = Some(version);
    }

    pub fn delete_dummy(&self, name: &str, namespace: &str) {
        self.lock().dummies.remove(&key(name, namespace));
    }

    pub fn dummy(&self, name: &str, namespace: &str) -> Option<Dummy> {
        self.lock().dummies.get(&key(name, namespace)).cloned()
    }

    pub fn insert_pod(&self, mut pod: Pod) {
        let mut state = self.lock();
        pod.metadata.resource_version = Some(state.next_version());

        let name = pod.metadata.name.clone().unwrap();
        let namespace = pod.metadata.namespace.clone().unwrap();

        state.pods.insert(key(&name, &namespace), pod);
    }

    pub fn edit_pod(&self, name: &str, namespace: &str, edit: impl FnOnce(&mut Pod)) {
        let mut state = self.lock();
        let version = state.next_version();
        let pod = state.pods.get_mut(&key(name, namespace)).unwrap();

        edit(pod);
        pod.metadata.resource_version = Some(version);
    }

    pub fn set_pod_phase(&self, name: &str, namespace: &str, phase: &str) {
        self.edit_pod(name, namespace, |pod| {
            pod.status = Some(PodStatus {
                phase: Some(phase.to_owned()),
                ..Default::default()
            })
        });
    }

    pub fn delete_pod(&self, name: &str, namespace: &str) {
        self.lock().pods.remove(&key(name, namespace));
    }

    pub fn pod(&self, name: &str, namespace: &str) -> Option<Pod> {
        self.lock().pods.get(&key(name, namespace)).cloned()
    }

    pub fn pods(&self) -> Vec<Pod> {
        self.lock().pods.values().cloned().collect()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.lock().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.lock().writes.clear();
    }

    /// Every request fails with an internal server error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Pod creation and replacement are forbidden
    pub fn set_reject_pod_writes(&self, reject: bool) {
        self.lock().reject_pod_writes = reject;
    }

    /// Every pod read is followed by someone else's write, the reader ends up
    /// holding a stale `resourceVersion`
    pub fn set_concurrent_pod_writer(&self, enabled: bool) {
        self.lock().concurrent_pod_writer = enabled;
    }

    fn check_available(state: &MemoryState) -> Result<(), kube::Error> {
        match state.unavailable {
            true => Err(api_error(500, "InternalError")),
            false => Ok(()),
        }
    }

    fn check_pod_writes(state: &MemoryState) -> Result<(), kube::Error> {
        Self::check_available(state)?;

        match state.reject_pod_writes {
            true => Err(api_error(403, "Forbidden")),
            false => Ok(()),
        }
    }
}

#[async_trait]
impl DummyStore for MemoryStore {
    async fn get_dummy(&self, name: &str, namespace: &str) -> Result<Option<Dummy>, kube::Error> {
        let state = self.lock();
        Self::check_available(&state)?;

        Ok(state.dummies.get(&key(name, namespace)).cloned())
    }

    async fn replace_dummy_status(
        &self,
        name: &str,
        namespace: &str,
        dummy: &Dummy,
    ) -> Result<Dummy, kube::Error> {
        let mut state = self.lock();
        Self::check_available(&state)?;

        let version = state.next_version();
        let stored = state
            .dummies
            .get_mut(&key(name, namespace))
            .ok_or_else(|| api_error(NOT_FOUND_CODE, "NotFound"))?;

        if stored.metadata.resource_version != dummy.metadata.resource_version {
            return Err(api_error(CONFLICT_CODE, "Conflict"));
        }

        // the status subresource ignores everything but the status
        stored.status = dummy.status.clone();
        stored.metadata.resource_version = Some(version);

        let stored = stored.clone();
        state.writes.push(Write::ReplaceDummyStatus(name.to_owned()));

        Ok(stored)
    }

    async fn get_pod(&self, name: &str, namespace: &str) -> Result<Option<Pod>, kube::Error> {
        let mut state = self.lock();
        Self::check_available(&state)?;

        let pod = state.pods.get(&key(name, namespace)).cloned();

        if state.concurrent_pod_writer {
            let version = state.next_version();
            if let Some(stored) = state.pods.get_mut(&key(name, namespace)) {
                stored.metadata.resource_version = Some(version);
            }
        }

        Ok(pod)
    }

    async fn create_pod(&self, namespace: &str, pod: &Pod) -> Result<Pod, kube::Error> {
        let mut state = self.lock();
        Self::check_pod_writes(&state)?;

        let name = pod.metadata.name.clone().unwrap_or_default();
        if state.pods.contains_key(&key(&name, namespace)) {
            return Err(api_error(CONFLICT_CODE, "AlreadyExists"));
        }

        let mut created = pod.clone();
        created.metadata.namespace = Some(namespace.to_owned());
        created.metadata.uid = Some(format!("{name}-uid"));
        created.metadata.resource_version = Some(state.next_version());
        created.status = Some(PodStatus {
            phase: Some("Pending".to_owned()),
            ..Default::default()
        });

        state.pods.insert(key(&name, namespace), created.clone());
        state.writes.push(Write::CreatePod(name));

        Ok(created)
    }

    async fn replace_pod(
        &self,
        name: &str,
        namespace: &str,
        pod: &Pod,
    ) -> Result<Pod, kube::Error> {
        let mut state = self.lock();
        Self::check_pod_writes(&state)?;

        let version = state.next_version();
        let stored = state
            .pods
            .get_mut(&key(name, namespace))
            .ok_or_else(|| api_error(NOT_FOUND_CODE, "NotFound"))?;

        if stored.metadata.resource_version != pod.metadata.resource_version {
            return Err(api_error(CONFLICT_CODE, "Conflict"));
        }

        // status is owned by the kubelet, a plain replace doesn't touch it
        let status = stored.status.take();
        *stored = pod.clone();
        stored.status = status;
        stored.metadata.resource_version = Some(version);

        let stored = stored.clone();
        state.writes.push(Write::ReplacePod(name.to_owned()));

        Ok(stored)
    }
}
