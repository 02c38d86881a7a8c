use dummy_controller_core::resources::{crd::v1alpha1::dummy::Dummy, meta::api_group};
use k8s_openapi::{api::core::v1::Pod, apimachinery::pkg::apis::meta::v1::OwnerReference};
use kube::{runtime::reflector::ObjectRef, Resource, ResourceExt};

/// Maps a changed pod to the dummies it references as owners.
///
/// The reconciler only ever runs for dummy keys, so a change made to a bound pod
/// (e.g. a new phase or an edited image) is reconciled through its owner.
pub fn route_pod_to_owners(pod: Pod) -> Vec<ObjectRef<Dummy>> {
    let namespace = match pod.namespace() {
        Some(namespace) => namespace,
        None => return Vec::new(),
    };

    pod.owner_references()
        .iter()
        .filter(|reference| is_dummy_reference(reference))
        .map(|reference| ObjectRef::new(&reference.name).within(&namespace))
        .collect()
}

fn is_dummy_reference(reference: &OwnerReference) -> bool {
    reference.kind == Dummy::kind(&())
        && api_group(&reference.api_version) == Dummy::group(&())
}
