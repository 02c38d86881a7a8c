use k8s_openapi::api::core::v1::{Container, Pod, PodSpec};
use kube::{core::ObjectMeta, Resource, ResourceExt};
use log::info;

use crate::helpers::RequireMetadata;

use super::{
    controller::ControllerConfig,
    crd::v1alpha1::dummy::Dummy,
    labels::get_dependent_pod_labels,
    meta::{get_dependent_pod_name, set_controller_reference},
    ResourceGenerationError,
};

impl ControllerConfig {
    pub fn dependent_pod_name(&self, owner_name: &str) -> Result<String, ResourceGenerationError> {
        get_dependent_pod_name(&self.container_name, owner_name)
    }

    /// Builds the pod bound to `owner`: a single managed container, controlled by the owner.
    pub fn generate_dependent_pod(&self, owner: &Dummy) -> Result<Pod, ResourceGenerationError> {
        let owner_name = owner.require_name_or(ResourceGenerationError::OwnerMissingMetadata)?;
        let namespace = owner.require_namespace_or(ResourceGenerationError::MissingData(
            "owner namespace".into(),
        ))?;
        let owner_reference = owner
            .controller_owner_ref(&())
            .ok_or(ResourceGenerationError::OwnerMissingMetadata)?;

        let mut metadata = ObjectMeta {
            name: Some(self.dependent_pod_name(owner_name)?),
            namespace: Some(namespace.to_owned()),
            labels: Some(get_dependent_pod_labels(owner_name)),
            ..Default::default()
        };

        set_controller_reference(&mut metadata, owner_reference)?;

        Ok(Pod {
            metadata,
            spec: Some(PodSpec {
                containers: vec![self.generate_managed_container()],
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    /// Brings an existing pod back in line with the configuration.
    ///
    /// Only the image of the managed container is corrected, containers with other names
    /// are left as they are. The owner's controller reference is asserted again.
    pub fn converge_dependent_pod(
        &self,
        pod: &mut Pod,
        owner: &Dummy,
    ) -> Result<(), ResourceGenerationError> {
        let owner_reference = owner
            .controller_owner_ref(&())
            .ok_or(ResourceGenerationError::OwnerMissingMetadata)?;

        let pod_name = pod.name_any();
        let managed_container = pod.spec.as_mut().and_then(|spec| {
            spec.containers
                .iter_mut()
                .find(|container| container.name == self.container_name)
        });

        if let Some(container) = managed_container {
            if container.image.as_deref() != Some(self.container_image.as_str()) {
                info!(
                    "'{pod_name}' pod runs '{}' instead of '{}', restoring the image...",
                    container.image.as_deref().unwrap_or_default(),
                    self.container_image
                );
                container.image = Some(self.container_image.to_owned());
            }
        }

        set_controller_reference(pod.meta_mut(), owner_reference)
    }

    fn generate_managed_container(&self) -> Container {
        Container {
            name: self.container_name.to_owned(),
            image: Some(self.container_image.to_owned()),
            ..Default::default()
        }
    }
}
