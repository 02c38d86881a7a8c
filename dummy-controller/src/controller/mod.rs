use std::sync::Arc;

use dummy_controller_core::{kubernetes::store::KubeStore, resources::controller::ControllerConfig};
use kube::Client;
use log::info;

use self::{dummy::start_dummy_controller, reconciler::context::ReconcilerContext};

pub mod dummy;
pub mod reconciler;
pub mod routing;

pub async fn main_controller(client: Client, config: ControllerConfig) {
    info!(
        "Starting controller (container: '{}', image: '{}', namespace: {})",
        config.container_name,
        config.container_image,
        config.namespace.as_deref().unwrap_or("<all>")
    );

    let reconciler_context =
        ReconcilerContext::new(Arc::new(KubeStore::new(client.clone())), config);

    start_dummy_controller(&client, reconciler_context.into()).await
}
