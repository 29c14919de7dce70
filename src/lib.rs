//! Static phone-spec directory: JSON records in, one HTML page with JSON-LD out.
//!
//! `loader` builds the ordered record set, `render` turns it into the page,
//! `site` composes the two and owns the file writes.

pub mod loader;
pub mod record;
pub mod render;
pub mod settings;
pub mod site;

pub use loader::{load, LoadError, LoadOptions, LoadReport};
pub use record::{Record, RecordSet, PLACEHOLDER};
pub use render::{render, PageMeta};
pub use settings::SiteConfig;
pub use site::{build, BuildError, BuildSummary};
