use dummy_controller_core::resources::ResourceGenerationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("Object is missing metadata!")]
    MissingObjectMetadata,
    #[error("Kubernetes API request failed! Reason: {}", .0)]
    KubeApiError(kube::Error),
    #[error("Couldn't prepare the bound pod! Reason: {}", .0)]
    ResourceGenerationError(ResourceGenerationError),
}
