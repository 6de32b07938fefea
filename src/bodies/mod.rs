//! Body registry: static descriptions of the sun and planets.
pub mod descriptor;
pub mod errors;
pub mod registry;

pub use descriptor::{BodyDescriptor, BodyId};
pub use errors::RegistryError;
pub use registry::BodyRegistry;
