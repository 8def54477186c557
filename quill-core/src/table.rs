use crate::{
    Entity, EntityDescriptor, ErrorContext, JoinInfo, JoinKind, MappingError, NamingPolicy,
    PropertyDescriptor, Result, infer_joins,
};
use log::{debug, trace};
use std::borrow::Cow;

/// Column reference, optionally aliased or wrapped in an aggregate function.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnInfo {
    /// Owning table.
    pub table: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub alias: Option<Cow<'static, str>>,
    /// Aggregate function, `COUNT`, `MAX`, ...
    pub function: Option<Cow<'static, str>>,
    /// Prefix the column with its table.
    pub qualified: bool,
}

impl ColumnInfo {
    pub fn new(table: impl Into<Cow<'static, str>>, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            alias: None,
            function: None,
            qualified: true,
        }
    }
    pub fn alias(mut self, alias: impl Into<Cow<'static, str>>) -> Self {
        self.alias = Some(alias.into());
        self
    }
    pub fn function(mut self, function: impl Into<Cow<'static, str>>) -> Self {
        self.function = Some(function.into());
        self
    }
    pub fn unqualified(mut self) -> Self {
        self.qualified = false;
        self
    }
    pub fn is_function(&self) -> bool {
        self.function.is_some()
    }
}

/// One table of a query with the selected columns and the tables joined into it.
#[derive(Debug, Clone)]
pub struct TableInfo {
    /// Described entity, `None` for synthetic tables like join tables.
    pub entity: Option<&'static EntityDescriptor>,
    pub name: Cow<'static, str>,
    /// Selected columns, empty selects every column.
    pub columns: Vec<ColumnInfo>,
    /// Joined tables, in rendering order.
    pub joins: Vec<JoinInfo>,
    pub naming: NamingPolicy,
    /// Physical column of every entity property, in declaration order.
    physical: Vec<Cow<'static, str>>,
}

impl TableInfo {
    pub fn for_entity<E: Entity>() -> Result<Self> {
        Self::for_entity_with::<E>(NamingPolicy::default())
    }

    pub fn for_entity_with<E: Entity>(naming: NamingPolicy) -> Result<Self> {
        Self::for_descriptor(E::describe()?, naming)
    }

    /// Table of `entity`, fails when the column of a relationship cannot be resolved.
    pub fn for_descriptor(
        entity: &'static EntityDescriptor,
        naming: NamingPolicy,
    ) -> Result<Self> {
        let physical = entity
            .properties()
            .iter()
            .map(|p| p.physical_column(&naming))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Cannot resolve the columns of `{}`", entity.name))?;
        Ok(Self {
            entity: Some(entity),
            name: entity.table_with(&naming),
            columns: Vec::new(),
            joins: Vec::new(),
            naming,
            physical,
        })
    }

    /// Table without an entity.
    pub fn synthetic(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            entity: None,
            name: name.into(),
            columns: Vec::new(),
            joins: Vec::new(),
            naming: NamingPolicy::default(),
            physical: Vec::new(),
        }
    }

    pub fn property(&self, name: &str) -> Result<&'static PropertyDescriptor> {
        let Some(entity) = self.entity else {
            return Err(MappingError::NotFound {
                entity: "<synthetic>",
                property: name.to_string(),
            }
            .into());
        };
        Ok(entity.property(name)?)
    }

    /// Column of the property `name`, or a column literally called `name` when the entity does not
    /// have such property.
    pub fn column(&self, name: &str) -> ColumnInfo {
        match self.physical_of(name) {
            Some(column) => ColumnInfo::new(self.name.clone(), column.clone()),
            None => {
                trace!(
                    "`{}` is not a property of `{}`, using it as a column name",
                    name, self.name
                );
                ColumnInfo::new(self.name.clone(), name.to_string())
            }
        }
    }

    fn physical_of(&self, name: &str) -> Option<&Cow<'static, str>> {
        let index = self.entity?.properties().iter().position(|p| p.name == name)?;
        self.physical.get(index)
    }

    pub fn column_as(&self, name: &str, alias: impl Into<Cow<'static, str>>) -> ColumnInfo {
        self.column(name).alias(alias)
    }

    /// Column of a property of this table's entity.
    pub fn property_column(&self, property: &PropertyDescriptor) -> Result<ColumnInfo> {
        match self.physical_of(property.name) {
            Some(column) => Ok(ColumnInfo::new(self.name.clone(), column.clone())),
            None => Err(MappingError::NotFound {
                entity: self.entity.map_or("<synthetic>", |e| e.name),
                property: property.name.to_string(),
            }
            .into()),
        }
    }

    /// Identity column, [`MappingError::NotFound`] for synthetic tables.
    pub fn id_column(&self) -> Result<ColumnInfo> {
        match self.entity {
            Some(entity) => self.property_column(entity.identity()),
            None => Err(MappingError::NotFound {
                entity: "<synthetic>",
                property: "<identity>".into(),
            }
            .into()),
        }
    }

    /// Add a column to the selection.
    pub fn add_column(&mut self, column: ColumnInfo) -> &mut Self {
        self.columns.push(column);
        self
    }

    /// Add an aggregate of the property `name` to the selection.
    pub fn add_function(
        &mut self,
        function: impl Into<Cow<'static, str>>,
        name: &str,
        alias: Option<Cow<'static, str>>,
    ) -> &mut Self {
        let mut column = self.column(name).function(function);
        column.alias = alias;
        self.columns.push(column);
        self
    }

    /// Columns written by INSERT statements, in declaration order.
    pub fn insertable_columns(&self) -> Result<Vec<ColumnInfo>> {
        match self.entity {
            Some(entity) => entity
                .insertable_properties()
                .map(|p| self.property_column(p))
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Columns written by UPDATE statements, in declaration order.
    pub fn updatable_columns(&self) -> Result<Vec<ColumnInfo>> {
        match self.entity {
            Some(entity) => entity
                .updatable_properties()
                .map(|p| self.property_column(p))
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Join `F` into this query, `T` must already be part of it and `F` must not.
    pub fn join<F: Entity, T: Entity>(mut self, kind: JoinKind) -> Result<Self> {
        let (from, to) = (F::describe()?, T::describe()?);
        let misplaced = |reason| MappingError::MisplacedJoin {
            from: from.name,
            to: to.name,
            reason,
        };
        if !self.contains(&to.table_with(&self.naming)) {
            return Err(misplaced("the target is not part of the query").into());
        }
        if self.contains(&from.table_with(&self.naming)) {
            return Err(misplaced("the table is already part of the query").into());
        }
        let joins = infer_joins(from, to, kind, &self.naming)?;
        debug!("Joined {} table(s) into `{}`", joins.len(), self.name);
        self.joins.extend(joins);
        Ok(self)
    }

    pub fn inner_join<F: Entity, T: Entity>(self) -> Result<Self> {
        self.join::<F, T>(JoinKind::Inner)
    }

    pub fn left_join<F: Entity, T: Entity>(self) -> Result<Self> {
        self.join::<F, T>(JoinKind::Left)
    }

    pub fn right_join<F: Entity, T: Entity>(self) -> Result<Self> {
        self.join::<F, T>(JoinKind::Right)
    }

    /// True when `table` is the root or one of the joined tables.
    pub fn contains(&self, table: &str) -> bool {
        self.name == table || self.joins.iter().any(|j| j.table == table)
    }

    /// Same table without columns nor joins.
    pub fn scope(&self) -> Self {
        Self {
            entity: self.entity,
            name: self.name.clone(),
            columns: Vec::new(),
            joins: Vec::new(),
            naming: self.naming,
            physical: self.physical.clone(),
        }
    }
}
