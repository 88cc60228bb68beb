//! Import name resolution
//!
//! `import "shapes"` names a source without its extension. The resolver appends `.g`, then
//! tries each configured directory in order followed by the directories listed in
//! `G_INCLUDE`; the first existing file wins.

pub mod error;
pub mod resolver;

pub use error::{ImportError, ImportResult};
pub use resolver::{ImportResolver, ResolvedImport};
