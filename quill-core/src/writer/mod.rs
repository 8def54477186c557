mod context;
mod dialect;
mod mysql;
mod postgres;

pub use context::*;
pub use dialect::*;
pub use mysql::*;
pub use postgres::*;
