use std::sync::Arc;

use dummy_controller_core::resources::crd::v1alpha1::dummy::Dummy;
use kube::runtime::{controller::Action, reflector::ObjectRef};
use log::{debug, error, info, warn};

use super::{
    context::ReconcilerContext, error::ReconcilerError, pod::create_or_update_pod,
    status::sync_status, Requeue,
};

pub async fn reconcile_dummy(
    object: Arc<Dummy>,
    context: Arc<ReconcilerContext>,
) -> Result<Action, ReconcilerError> {
    let key = ObjectRef::from_obj(object.as_ref());
    let requeue = reconcile(&key, &context).await?;

    let retry_delay = match requeue {
        Requeue::Immediately => context.retry_backoff.next_delay(&key),
        Requeue::After(_) | Requeue::Never => {
            context.backoff.reset(&key);
            context.retry_backoff.reset(&key);

            context.config.retry_delay
        }
    };

    Ok(requeue.into_action(retry_delay))
}

pub fn reconcile_dummy_error(
    object: Arc<Dummy>,
    error: &ReconcilerError,
    context: Arc<ReconcilerContext>,
) -> Action {
    let key = ObjectRef::from_obj(object.as_ref());
    let delay = context.backoff.next_delay(&key);

    warn!(
        "Reconciling '{}' dummy failed, retrying in {}s! {error}",
        key.name,
        delay.as_secs()
    );

    Action::requeue(delay)
}

/// A single reconciliation pass for the dummy identified by `key`.
///
/// The dummy and its pod are always read from the store, so a pass never relies
/// on what an earlier (possibly failed) pass observed.
pub async fn reconcile(
    key: &ObjectRef<Dummy>,
    context: &ReconcilerContext,
) -> Result<Requeue, ReconcilerError> {
    let name = key.name.as_str();
    let namespace = key
        .namespace
        .as_deref()
        .ok_or(ReconcilerError::MissingObjectMetadata)?;

    debug!("Reconciling '{name}' dummy in '{namespace}'...");

    let dummy = match context
        .store
        .get_dummy(name, namespace)
        .await
        .map_err(ReconcilerError::KubeApiError)?
    {
        Some(dummy) => dummy,
        None => {
            debug!("'{name}' dummy not found in '{namespace}', assuming it was deleted");

            return Ok(Requeue::Never);
        }
    };

    let pod_name = match context.config.dependent_pod_name(name) {
        Ok(pod_name) => pod_name,
        Err(error) => {
            error!("Couldn't derive a pod name for '{name}' dummy! {error}");

            return Ok(Requeue::Immediately);
        }
    };

    match create_or_update_pod(&dummy, &pod_name, namespace, context).await {
        Ok(operation) => debug!("'{pod_name}' pod: {operation:?}"),
        Err(error) => {
            error!("Couldn't ensure '{pod_name}' pod for '{name}' dummy! {error}");

            return Ok(Requeue::Immediately);
        }
    }

    info!("'{name}' dummy message: {:?}", dummy.spec.message);

    sync_status(&dummy, &pod_name, namespace, context).await
}
