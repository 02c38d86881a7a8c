use dummy_controller_core::resources::crd::v1alpha1::dummy::Dummy;

use super::{context::ReconcilerContext, error::ReconcilerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodOperation {
    Created,
    Updated,
    Unchanged,
}

/// Makes sure `pod_name` exists, runs the configured image and is controlled by `owner`.
///
/// An existing pod is only written back if something actually changed. Write conflicts
/// aren't retried here, the caller requeues the whole pass instead.
pub async fn create_or_update_pod(
    owner: &Dummy,
    pod_name: &str,
    namespace: &str,
    context: &ReconcilerContext,
) -> Result<PodOperation, ReconcilerError> {
    let existing = context
        .store
        .get_pod(pod_name, namespace)
        .await
        .map_err(ReconcilerError::KubeApiError)?;

    match existing {
        None => {
            let pod = context
                .config
                .generate_dependent_pod(owner)
                .map_err(ReconcilerError::ResourceGenerationError)?;

            context
                .store
                .create_pod(namespace, &pod)
                .await
                .map_err(ReconcilerError::KubeApiError)?;

            Ok(PodOperation::Created)
        }
        Some(mut pod) => {
            let original = pod.clone();

            context
                .config
                .converge_dependent_pod(&mut pod, owner)
                .map_err(ReconcilerError::ResourceGenerationError)?;

            if pod == original {
                return Ok(PodOperation::Unchanged);
            }

            context
                .store
                .replace_pod(pod_name, namespace, &pod)
                .await
                .map_err(ReconcilerError::KubeApiError)?;

            Ok(PodOperation::Updated)
        }
    }
}
