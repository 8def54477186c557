mod delete;
mod insert;
mod qualifier;
mod select;
mod update;
mod where_builder;

pub use delete::*;
pub use insert::*;
pub use qualifier::*;
pub use select::*;
pub use update::*;
pub use where_builder::*;
