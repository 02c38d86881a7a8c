use std::borrow::Cow;

use thiserror::Error;

pub mod controller;
pub mod crd;
pub mod labels;
pub mod meta;
pub mod pod;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceGenerationError {
    #[error("Resource is missing required data ({})!", .0)]
    MissingData(Cow<'static, str>),
    #[error("Owner resource is missing a name or uid!")]
    OwnerMissingMetadata,
    #[error("Dependent resource name '{}' exceeds {} characters!", .0, .1)]
    DependentNameTooLong(String, usize),
    #[error("Dependent resource is already controlled by {} '{}'!", .0, .1)]
    DependentAlreadyOwned(String, String),
}
