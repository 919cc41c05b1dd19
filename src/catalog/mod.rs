mod error;
mod loader;
mod parsing;

pub use error::CatalogError;
pub use loader::{Catalog, CatalogEntry, EntryRole};
pub use parsing::{elements_from_tle, parse_tle_lines};
