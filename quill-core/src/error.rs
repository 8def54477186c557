use thiserror::Error;

/// Failure kinds raised while describing entities or inferring joins.
///
/// The crate wide [`Result`](crate::Result) carries an `anyhow::Error`, these values are either the
/// error itself or attached to it as context, so they can be recovered with
/// `error.downcast_ref::<MappingError>()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The entity does not have a property with the given name.
    #[error("Entity `{entity}` does not have a property named `{property}`")]
    NotFound {
        entity: &'static str,
        property: String,
    },
    /// The storage style of the entity cannot be classified.
    #[error("Entity `{entity}` cannot be mapped: {reason}")]
    AmbiguousMapping {
        entity: &'static str,
        reason: String,
    },
    /// No declared relationship connects the two entities.
    #[error("No relationship connects `{from}` to `{to}`")]
    UnconnectedJoin {
        from: &'static str,
        to: &'static str,
    },
    /// The joined entity cannot be placed in the query.
    #[error("Cannot join `{from}` into `{to}`: {reason}")]
    MisplacedJoin {
        from: &'static str,
        to: &'static str,
        reason: &'static str,
    },
    /// An UPDATE would have nothing to set.
    #[error("Entity `{entity}` does not have any updatable column")]
    NothingToUpdate { entity: &'static str },
    /// The property storage could not be read or written.
    #[error("Could not access property `{property}` of entity `{entity}`")]
    Access {
        entity: &'static str,
        property: &'static str,
    },
}

impl MappingError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MappingError::NotFound { .. })
    }
}
