//! User settings: the `config.toml` schema, where it is looked up, and the
//! XDG directories the rest of the player stores state in.

mod load;
mod schema;

pub use load::config_home;
pub use schema::*;
