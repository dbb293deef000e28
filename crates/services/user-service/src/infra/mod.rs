//! Infrastructure layer - database connection and procedure invocation.

mod db;
mod procedure_driver;

pub use db::Database;
pub use procedure_driver::SeaOrmProcedureDriver;
