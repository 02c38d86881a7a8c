use dummy_controller_core::{
    helpers::RequireMetadata,
    kubernetes::operations::{is_conflict, is_not_found},
    resources::crd::v1alpha1::dummy::{DependentPhase, Dummy, DummyStatus},
};
use log::{debug, info};

use super::{context::ReconcilerContext, error::ReconcilerError, Requeue};

/// Mirrors the owner's message and the bound pod's phase into the owner's status.
///
/// Both fields are written in a single request, or not at all.
pub async fn sync_status(
    owner: &Dummy,
    pod_name: &str,
    namespace: &str,
    context: &ReconcilerContext,
) -> Result<Requeue, ReconcilerError> {
    let cooldown = Requeue::After(context.config.requeue_cooldown);
    let owner_name = owner.require_name_or(ReconcilerError::MissingObjectMetadata)?;

    let pod = match context
        .store
        .get_pod(pod_name, namespace)
        .await
        .map_err(ReconcilerError::KubeApiError)?
    {
        Some(pod) => pod,
        None => {
            debug!("'{pod_name}' pod not found in '{namespace}', it might've just been deleted");

            return Ok(Requeue::Immediately);
        }
    };

    let observed = DummyStatus {
        spec_echo: owner.spec.message.to_owned(),
        dependent_phase: DependentPhase::from_pod(&pod),
    };

    if owner.status.clone().unwrap_or_default() == observed {
        return Ok(cooldown);
    }

    let phase = observed.dependent_phase;
    let mut updated = owner.clone();
    updated.status = Some(observed);

    match context
        .store
        .replace_dummy_status(owner_name, namespace, &updated)
        .await
    {
        Ok(_) => {
            info!("'{owner_name}' dummy status updated (pod phase: '{phase}')");

            Ok(cooldown)
        }
        Err(error) if is_not_found(&error) => {
            debug!("'{owner_name}' dummy was deleted before its status could be updated");

            Ok(Requeue::Never)
        }
        Err(error) => {
            if is_conflict(&error) {
                debug!("'{owner_name}' dummy changed while its status was being updated");
            }

            Err(ReconcilerError::KubeApiError(error))
        }
    }
}
