//! Configuration errors raised while validating body descriptors.
use std::fmt;

use super::descriptor::BodyId;

/// Invalid body geometry or registry layout. Always fatal at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    DuplicateId {
        id: BodyId,
    },
    NonPositive {
        id: BodyId,
        field: &'static str,
        value: f32,
    },
    InvertedRing {
        id: BodyId,
        inner: f32,
        outer: f32,
    },
    NonFiniteRate {
        id: BodyId,
        field: &'static str,
    },
    MissingSun,
    MultipleSuns {
        ids: Vec<BodyId>,
    },
}

impl RegistryError {
    pub fn non_positive(id: &BodyId, field: &'static str, value: f32) -> Self {
        Self::NonPositive {
            id: id.clone(),
            field,
            value,
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "body id '{}' is declared more than once", id),
            Self::NonPositive { id, field, value } => {
                write!(f, "body '{}' has non-positive {}: {}", id, field, value)
            }
            Self::InvertedRing { id, inner, outer } => write!(
                f,
                "body '{}' has a ring with outer radius {} not greater than inner radius {}",
                id, outer, inner
            ),
            Self::NonFiniteRate { id, field } => {
                write!(f, "body '{}' has a non-finite {}", id, field)
            }
            Self::MissingSun => write!(f, "no body with orbit distance 0 (the sun) was declared"),
            Self::MultipleSuns { ids } => {
                let names: Vec<&str> = ids.iter().map(BodyId::as_str).collect();
                write!(
                    f,
                    "only one body may have orbit distance 0, found: {}",
                    names.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for RegistryError {}
