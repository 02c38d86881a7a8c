use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::core::ObjectMeta;

use super::ResourceGenerationError;

pub const MAX_RESOURCE_NAME_LENGTH: usize = 253;

pub fn get_dependent_pod_name(
    container_name: &str,
    owner_name: &str,
) -> Result<String, ResourceGenerationError> {
    let name = format!("{container_name}-pod-{owner_name}");

    match name.len() {
        0..=MAX_RESOURCE_NAME_LENGTH => Ok(name),
        _ => Err(ResourceGenerationError::DependentNameTooLong(
            name,
            MAX_RESOURCE_NAME_LENGTH,
        )),
    }
}

/// Makes `owner` the controller of the object described by `meta`.
///
/// A reference to the same object (same api group, kind and name) is updated in place,
/// otherwise a new one is appended. Fails if another object is already the controller.
pub fn set_controller_reference(
    meta: &mut ObjectMeta,
    owner: OwnerReference,
) -> Result<(), ResourceGenerationError> {
    let references = meta.owner_references.get_or_insert_with(Vec::new);

    if let Some(controller) = references
        .iter()
        .find(|reference| reference.controller == Some(true))
    {
        if !refers_to_same_object(controller, &owner) {
            return Err(ResourceGenerationError::DependentAlreadyOwned(
                controller.kind.to_owned(),
                controller.name.to_owned(),
            ));
        }
    }

    match references
        .iter_mut()
        .find(|reference| refers_to_same_object(reference, &owner))
    {
        Some(existing) => *existing = owner,
        None => references.push(owner),
    }

    Ok(())
}

pub fn refers_to_same_object(left: &OwnerReference, right: &OwnerReference) -> bool {
    api_group(&left.api_version) == api_group(&right.api_version)
        && left.kind == right.kind
        && left.name == right.name
}

/// `group/version` -> `group`, core api (`v1`) -> empty string
pub fn api_group(api_version: &str) -> &str {
    match api_version.rsplit_once('/') {
        Some((group, _)) => group,
        None => "",
    }
}
