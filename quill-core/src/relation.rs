use crate::{Entity, EntityDescriptor, Result, TypeRef};
use std::fmt::{self, Debug};

/// Cardinality of a declared relationship.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    #[default]
    None,
    OneToOne,
    ManyToOne,
    OneToMany,
    ManyToMany,
}

impl RelationKind {
    pub fn is_to_one(&self) -> bool {
        matches!(self, RelationKind::OneToOne | RelationKind::ManyToOne)
    }
    pub fn is_collection(&self) -> bool {
        matches!(self, RelationKind::OneToMany | RelationKind::ManyToMany)
    }
}

/// Entity on the other side of a relationship.
#[derive(Clone, Copy)]
pub struct RelationTarget {
    pub ty: TypeRef,
    describe: fn() -> Result<&'static EntityDescriptor>,
}

impl RelationTarget {
    pub fn of<T: Entity>() -> Self {
        Self {
            ty: TypeRef::of::<T>(),
            describe: T::describe,
        }
    }
    pub fn describe(&self) -> Result<&'static EntityDescriptor> {
        (self.describe)()
    }
}

impl PartialEq for RelationTarget {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl Eq for RelationTarget {}

impl Debug for RelationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.ty.fmt(f)
    }
}

/// Relationship declared on a property.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationKind,
    /// Related entity, for collections the element type.
    pub target: Option<RelationTarget>,
    /// Property of the owning side, present when this is the inverse side.
    pub mapped_by: Option<&'static str>,
    /// The property stores the key of the related row rather than the related entity.
    pub holds_key: bool,
}

impl Relation {
    pub const NONE: Relation = Relation {
        kind: RelationKind::None,
        target: None,
        mapped_by: None,
        holds_key: false,
    };

    pub fn new<T: Entity>(kind: RelationKind) -> Self {
        Self {
            kind,
            target: Some(RelationTarget::of::<T>()),
            mapped_by: None,
            holds_key: false,
        }
    }
    pub fn one_to_one<T: Entity>() -> Self {
        Self::new::<T>(RelationKind::OneToOne)
    }
    pub fn many_to_one<T: Entity>() -> Self {
        Self::new::<T>(RelationKind::ManyToOne)
    }
    pub fn one_to_many<T: Entity>() -> Self {
        Self::new::<T>(RelationKind::OneToMany)
    }
    pub fn many_to_many<T: Entity>() -> Self {
        Self::new::<T>(RelationKind::ManyToMany)
    }
    pub fn mapped_by(mut self, property: &'static str) -> Self {
        self.mapped_by = Some(property);
        self
    }
    pub fn holds_key(mut self) -> Self {
        self.holds_key = true;
        self
    }
    pub fn is_inverse(&self) -> bool {
        self.mapped_by.is_some()
    }
    pub fn targets(&self, ty: &TypeRef) -> bool {
        self.target.is_some_and(|t| t.ty == *ty)
    }
}

/// Association table override of a many-to-many relationship.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinTableDef {
    pub name: Option<&'static str>,
    /// Column referencing the declaring side.
    pub join_column: Option<&'static str>,
    /// Column referencing the other side.
    pub inverse_join_column: Option<&'static str>,
}
