use crate::{Error, Result, short_type_name};
use std::{
    any::{Any, TypeId, type_name},
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Identity of a Rust type, comparable at runtime.
#[derive(Clone, Copy)]
pub struct TypeRef {
    pub id: TypeId,
    /// Full path, as returned by `std::any::type_name`.
    pub name: &'static str,
}

impl TypeRef {
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.name)
    }
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Storage reached by borrowing a struct field.
pub trait FieldSlot: Send + Sync {
    fn get<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any>;
    fn get_mut<'a>(&self, instance: &'a mut dyn Any) -> Option<&'a mut dyn Any>;
}

/// Storage reached through a getter and a setter.
pub trait AccessorSlot: Send + Sync {
    fn get(&self, instance: &dyn Any) -> Option<Box<dyn Any>>;
    fn set(&self, instance: &mut dyn Any, value: Box<dyn Any>) -> Result<()>;
}

struct Field<E, T> {
    get: fn(&E) -> &T,
    get_mut: fn(&mut E) -> &mut T,
}

impl<E: Any, T: Any> FieldSlot for Field<E, T> {
    fn get<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any> {
        instance
            .downcast_ref::<E>()
            .map(|entity| (self.get)(entity) as &dyn Any)
    }
    fn get_mut<'a>(&self, instance: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        instance
            .downcast_mut::<E>()
            .map(|entity| (self.get_mut)(entity) as &mut dyn Any)
    }
}

struct Pair<E, T> {
    get: fn(&E) -> T,
    set: fn(&mut E, T),
}

impl<E: Any, T: Any> AccessorSlot for Pair<E, T> {
    fn get(&self, instance: &dyn Any) -> Option<Box<dyn Any>> {
        instance
            .downcast_ref::<E>()
            .map(|entity| Box::new((self.get)(entity)) as Box<dyn Any>)
    }
    fn set(&self, instance: &mut dyn Any, value: Box<dyn Any>) -> Result<()> {
        let Some(entity) = instance.downcast_mut::<E>() else {
            return Err(Error::msg(format!(
                "The instance is not a `{}`",
                type_name::<E>()
            )));
        };
        let value = value.downcast::<T>().map_err(|_| {
            Error::msg(format!("The setter expects a `{}` value", type_name::<T>()))
        })?;
        (self.set)(entity, *value);
        Ok(())
    }
}

/// Storage of a parent entity reached through a field of the child.
struct Projected<E, P, S: ?Sized> {
    project: fn(&E) -> &P,
    project_mut: fn(&mut E) -> &mut P,
    inner: Arc<S>,
}

impl<E: Any, P: Any> FieldSlot for Projected<E, P, dyn FieldSlot> {
    fn get<'a>(&self, instance: &'a dyn Any) -> Option<&'a dyn Any> {
        let parent = (self.project)(instance.downcast_ref::<E>()?);
        self.inner.get(parent)
    }
    fn get_mut<'a>(&self, instance: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let parent = (self.project_mut)(instance.downcast_mut::<E>()?);
        self.inner.get_mut(parent)
    }
}

impl<E: Any, P: Any> AccessorSlot for Projected<E, P, dyn AccessorSlot> {
    fn get(&self, instance: &dyn Any) -> Option<Box<dyn Any>> {
        let parent = (self.project)(instance.downcast_ref::<E>()?);
        self.inner.get(parent)
    }
    fn set(&self, instance: &mut dyn Any, value: Box<dyn Any>) -> Result<()> {
        let Some(entity) = instance.downcast_mut::<E>() else {
            return Err(Error::msg(format!(
                "The instance is not a `{}`",
                type_name::<E>()
            )));
        };
        self.inner.set((self.project_mut)(entity), value)
    }
}

/// How a property is read and written.
///
/// The style is decided once per entity type by the way its identity is declared: a direct
/// field identity makes every property a direct field, an accessor identity makes every property
/// go through its getter and setter.
#[derive(Clone)]
pub enum Accessor {
    DirectField(Arc<dyn FieldSlot>),
    AccessorPair(Arc<dyn AccessorSlot>),
}

impl Accessor {
    pub fn field<E: Any, T: Any>(get: fn(&E) -> &T, get_mut: fn(&mut E) -> &mut T) -> Self {
        Accessor::DirectField(Arc::new(Field { get, get_mut }))
    }

    pub fn pair<E: Any, T: Any>(get: fn(&E) -> T, set: fn(&mut E, T)) -> Self {
        Accessor::AccessorPair(Arc::new(Pair { get, set }))
    }

    pub fn is_direct_field(&self) -> bool {
        matches!(self, Accessor::DirectField(..))
    }

    pub fn style(&self) -> &'static str {
        match self {
            Accessor::DirectField(..) => "direct field",
            Accessor::AccessorPair(..) => "accessor pair",
        }
    }

    /// Same storage, reached from a child entity `E` that embeds the parent `P`.
    pub fn project<E: Any, P: Any>(
        &self,
        project: fn(&E) -> &P,
        project_mut: fn(&mut E) -> &mut P,
    ) -> Self {
        match self {
            Accessor::DirectField(inner) => Accessor::DirectField(Arc::new(Projected {
                project,
                project_mut,
                inner: inner.clone(),
            })),
            Accessor::AccessorPair(inner) => Accessor::AccessorPair(Arc::new(Projected {
                project,
                project_mut,
                inner: inner.clone(),
            })),
        }
    }

    /// Read the current value, `T` must be the declared type of the property.
    pub fn read<T: Any + Clone>(&self, instance: &dyn Any) -> Result<T> {
        match self {
            Accessor::DirectField(slot) => {
                let value = slot
                    .get(instance)
                    .ok_or_else(|| Error::msg("The instance has an unexpected type"))?;
                value.downcast_ref::<T>().cloned().ok_or_else(|| {
                    Error::msg(format!("The field is not a `{}`", type_name::<T>()))
                })
            }
            Accessor::AccessorPair(slot) => {
                let value = slot
                    .get(instance)
                    .ok_or_else(|| Error::msg("The instance has an unexpected type"))?;
                value.downcast::<T>().map(|v| *v).map_err(|_| {
                    Error::msg(format!("The getter does not return `{}`", type_name::<T>()))
                })
            }
        }
    }

    /// Replace the current value, `T` must be the declared type of the property.
    pub fn write<T: Any>(&self, instance: &mut dyn Any, value: T) -> Result<()> {
        match self {
            Accessor::DirectField(slot) => {
                let field = slot
                    .get_mut(instance)
                    .ok_or_else(|| Error::msg("The instance has an unexpected type"))?;
                let Some(field) = field.downcast_mut::<T>() else {
                    return Err(Error::msg(format!(
                        "The field is not a `{}`",
                        type_name::<T>()
                    )));
                };
                *field = value;
                Ok(())
            }
            Accessor::AccessorPair(slot) => slot.set(instance, Box::new(value)),
        }
    }
}

impl Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Accessor::DirectField(..) => "DirectField",
            Accessor::AccessorPair(..) => "AccessorPair",
        })
    }
}
