mod access;
mod builder;
mod entity;
mod error;
mod join;
mod naming;
mod property;
mod queries;
mod relation;
mod table;
mod util;
mod writer;

pub use ::anyhow::Context as ErrorContext;
pub use access::*;
pub use builder::*;
pub use entity::*;
pub use error::*;
pub use join::*;
pub use naming::*;
pub use property::*;
pub use queries::*;
pub use relation::*;
pub use table::*;
pub use util::*;
pub use writer::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
