use std::sync::Arc;

use dummy_controller_core::{
    kubernetes::GetApi, resources::crd::v1alpha1::dummy::Dummy,
};
use futures::StreamExt;
use k8s_openapi::api::core::v1::Pod;
use kube::{
    runtime::{watcher::Config, Controller},
    Client,
};
use log::{debug, info, warn};

use super::{
    reconciler::{
        context::ReconcilerContext,
        dummy::{reconcile_dummy, reconcile_dummy_error},
    },
    routing::route_pod_to_owners,
};

pub async fn start_dummy_controller(client: &Client, context: Arc<ReconcilerContext>) {
    info!("Creating dummy controller...");

    let namespace = context.config.namespace.as_deref();
    let watcher_config = Config::default();
    let controller = Controller::new(
        client.scoped_api::<Dummy>(namespace),
        watcher_config.clone(),
    )
    .watches(
        client.scoped_api::<Pod>(namespace),
        watcher_config,
        route_pod_to_owners,
    )
    .shutdown_on_signal()
    .run(reconcile_dummy, reconcile_dummy_error, context)
    .for_each(|dummy| async move {
        match dummy {
            Ok(o) => debug!("Reconciled dummy {:?}", o),
            Err(e) => warn!("Dummy reconciliation failed: {e}"),
        }
    });

    info!("Dummy controller created!");

    controller.await;

    info!("Dummy controller stopped!");
}
