pub mod config;
pub mod list;
pub mod todo;

pub use config::*;
pub use list::*;
pub use todo::*;
