use crate::{
    ColumnInfo, EntityDescriptor, MappingError, NamingPolicy, PropertyDescriptor, RelationKind,
    Result,
};
use log::{debug, warn};
use std::borrow::Cow;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
}

/// A table joined into a query: `<kind> JOIN <table> ON <left> = <right>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinInfo {
    pub kind: JoinKind,
    /// Table brought into the query.
    pub table: Cow<'static, str>,
    pub left: ColumnInfo,
    pub right: ColumnInfo,
}

impl JoinInfo {
    pub fn new(
        kind: JoinKind,
        table: impl Into<Cow<'static, str>>,
        left: ColumnInfo,
        right: ColumnInfo,
    ) -> Self {
        Self {
            kind,
            table: table.into(),
            left,
            right,
        }
    }
}

/// One side of the join: the entity, its table and its identity column.
struct Side {
    entity: &'static EntityDescriptor,
    table: Cow<'static, str>,
    id: Cow<'static, str>,
}

impl Side {
    fn new(entity: &'static EntityDescriptor, naming: &NamingPolicy) -> Result<Self> {
        Ok(Self {
            entity,
            table: entity.table_with(naming),
            id: entity.identity().physical_column(naming)?,
        })
    }
    fn column(&self, name: impl Into<Cow<'static, str>>) -> ColumnInfo {
        ColumnInfo::new(self.table.clone(), name)
    }
    fn id_column(&self) -> ColumnInfo {
        self.column(self.id.clone())
    }
    /// Join column referencing this side.
    fn foreign_key(&self, naming: &NamingPolicy) -> Cow<'static, str> {
        naming.foreign_key(&self.table, &self.id).into()
    }
}

/// Joins bringing `source` into a query that already contains `target`.
///
/// The relationship is first looked up on `target` then on `source`, in both cases the first
/// property, in declaration order, whose related type is the other entity decides the join.
/// Many-to-many relationships produce two joins, the first one through the join table.
pub fn infer_joins(
    source: &'static EntityDescriptor,
    target: &'static EntityDescriptor,
    kind: JoinKind,
    naming: &NamingPolicy,
) -> Result<Vec<JoinInfo>> {
    let s = Side::new(source, naming)?;
    let t = Side::new(target, naming)?;
    let found = target
        .properties()
        .iter()
        .filter(|p| p.relation().targets(&source.entity))
        .find_map(|p| {
            declared_on_target(p, &s, &t, kind, naming)
                .transpose()
                .map(|r| (p, r))
        })
        .or_else(|| {
            source
                .properties()
                .iter()
                .filter(|p| p.relation().targets(&target.entity))
                .find_map(|p| {
                    declared_on_source(p, &s, &t, kind, naming)
                        .transpose()
                        .map(|r| (p, r))
                })
        });
    match found {
        Some((property, joins)) => {
            let joins = joins?;
            debug!(
                "Joining `{}` into `{}` through `{}::{}`",
                s.table,
                t.table,
                property.declared_by.short_name(),
                property.name
            );
            Ok(joins)
        }
        None => {
            warn!(
                "No relationship connects `{}` to `{}`, the join was not added",
                source.name, target.name
            );
            Err(MappingError::UnconnectedJoin {
                from: source.name,
                to: target.name,
            }
            .into())
        }
    }
}

/// Relationship declared on the target, pointing at the source.
fn declared_on_target(
    p: &'static PropertyDescriptor,
    s: &Side,
    t: &Side,
    kind: JoinKind,
    naming: &NamingPolicy,
) -> Result<Option<Vec<JoinInfo>>> {
    Ok(Some(match p.relation_kind() {
        RelationKind::OneToOne | RelationKind::ManyToOne if !p.is_inverse() => {
            vec![JoinInfo::new(
                kind,
                s.table.clone(),
                s.id_column(),
                t.column(p.physical_column(naming)?),
            )]
        }
        RelationKind::OneToMany => {
            let column = inverse_column(p, s.entity, t, naming)?;
            vec![JoinInfo::new(kind, s.table.clone(), t.id_column(), s.column(column))]
        }
        RelationKind::ManyToMany if !p.is_inverse() => {
            let def = p.meta.join_table.unwrap_or_default();
            let join_table: Cow<'static, str> = match def.name {
                Some(name) => name.into(),
                None => naming.join_table(&t.table, &s.table).into(),
            };
            let owner = def.join_column.map_or_else(|| t.foreign_key(naming), Into::into);
            let other = def
                .inverse_join_column
                .map_or_else(|| s.foreign_key(naming), Into::into);
            vec![
                JoinInfo::new(
                    kind,
                    join_table.clone(),
                    t.id_column(),
                    ColumnInfo::new(join_table.clone(), owner),
                ),
                JoinInfo::new(
                    kind,
                    s.table.clone(),
                    s.id_column(),
                    ColumnInfo::new(join_table, other),
                ),
            ]
        }
        _ => return Ok(None),
    }))
}

/// Relationship declared on the source, pointing at the target.
fn declared_on_source(
    p: &'static PropertyDescriptor,
    s: &Side,
    t: &Side,
    kind: JoinKind,
    naming: &NamingPolicy,
) -> Result<Option<Vec<JoinInfo>>> {
    Ok(Some(match p.relation_kind() {
        RelationKind::OneToOne | RelationKind::ManyToOne if !p.is_inverse() => {
            vec![JoinInfo::new(
                kind,
                s.table.clone(),
                t.id_column(),
                s.column(p.physical_column(naming)?),
            )]
        }
        RelationKind::OneToMany => {
            let column = inverse_column(p, t.entity, s, naming)?;
            vec![JoinInfo::new(kind, s.table.clone(), s.id_column(), t.column(column))]
        }
        RelationKind::ManyToMany if !p.is_inverse() => {
            let def = p.meta.join_table.unwrap_or_default();
            let join_table: Cow<'static, str> = match def.name {
                Some(name) => name.into(),
                None => naming.join_table(&s.table, &t.table).into(),
            };
            let owner = def.join_column.map_or_else(|| s.foreign_key(naming), Into::into);
            let other = def
                .inverse_join_column
                .map_or_else(|| t.foreign_key(naming), Into::into);
            vec![
                JoinInfo::new(
                    kind,
                    join_table.clone(),
                    t.id_column(),
                    ColumnInfo::new(join_table.clone(), other),
                ),
                JoinInfo::new(
                    kind,
                    s.table.clone(),
                    s.id_column(),
                    ColumnInfo::new(join_table, owner),
                ),
            ]
        }
        _ => return Ok(None),
    }))
}

/// Column on `element` referencing `owner` for a one-to-many collection `p` declared by `owner`.
///
/// An explicit join column wins, then the column of the `mapped_by` property on the element
/// side, then the column derived from the owner table.
fn inverse_column(
    p: &'static PropertyDescriptor,
    element: &'static EntityDescriptor,
    owner: &Side,
    naming: &NamingPolicy,
) -> Result<Cow<'static, str>> {
    if let Some(column) = p.meta.join_column {
        return Ok(column.into());
    }
    if let Some(mapped_by) = p.relation().mapped_by {
        return Ok(element.property(mapped_by)?.physical_column(naming)?);
    }
    Ok(owner.foreign_key(naming))
}
