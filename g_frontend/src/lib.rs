// Internal modules
#[macro_use]
pub mod logging;
pub mod buffer;
pub mod config;
pub mod driver;
pub mod hashtable;
pub mod imports;
pub mod lexical;
pub mod symbols;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use buffer::ByteBuffer;
pub use driver::{Driver, DriverError, RunSummary};
pub use hashtable::{HashTable, HashTableError};
pub use lexical::{Scanner, ScannerError};
pub use logging::Reporter;
pub use symbols::{Symbol, SymbolError, SymbolTable};
pub use tokens::TokenKind;
