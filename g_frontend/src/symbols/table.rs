//! The decorated symbol table.
//!
//! Declarations are keyed by the table's current decoration, built up with
//! `add_name_component` / `add_type_component` while the grammar descends into a
//! declaration and cut back with `truncate_to_class` when it leaves one. Symbols are stored
//! as JSON blobs in the [`HashTable`]; lookups copy them back out, so callers always own what
//! they get.

use super::decoration::{class_prefix_len, render_human_readable, DecoratedName};
use super::error::{SymbolError, SymbolResult};
use super::symbol::Symbol;
use crate::buffer::ByteBuffer;
use crate::config::constants::decoration::{NAME_MARKER, TYPE_MARKER};
use crate::hashtable::{HashTable, HashTableError};
use crate::logging::{LogLevel, Reporter};

#[derive(Debug)]
pub struct SymbolTable {
    table: HashTable,
    decoration: ByteBuffer,
    reporter: Reporter,
}

impl SymbolTable {
    pub fn new(reporter: Reporter) -> Self {
        Self {
            table: HashTable::new(),
            decoration: ByteBuffer::new(),
            reporter,
        }
    }

    // ========================================================================
    // Decoration
    // ========================================================================

    pub fn begin_decoration(&mut self) {
        self.decoration.reset();
    }

    pub fn add_name_component(&mut self, name: &str) {
        self.decoration.append(NAME_MARKER);
        self.decoration.append_str(name);
    }

    pub fn add_type_component(&mut self, type_name: &str) {
        self.decoration.append(TYPE_MARKER);
        self.decoration.append_str(type_name);
    }

    /// Cut the decoration back to the class step
    pub fn truncate_to_class(&mut self) {
        let keep = class_prefix_len(self.decoration.contents());
        self.decoration.truncate(keep);
    }

    pub fn current_decoration(&self) -> String {
        self.decoration.text().into_owned()
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Store `symbol` under the current decoration
    pub fn declare(&mut self, mut symbol: Symbol) -> SymbolResult<()> {
        let key = self.current_decoration();
        self.check_payload(&key, &symbol)?;

        symbol.name = Some(DecoratedName::parse(&key));
        let blob = self.encode(&key, &symbol)?;

        match self.table.insert(&key, &blob) {
            Ok(()) => {
                log_debug!("Symbol declared",
                    "name" => render_human_readable(&key),
                    "kind" => symbol.kind.as_str()
                );
                Ok(())
            }
            Err(HashTableError::AlreadyExists { .. }) => {
                Err(self.fail(SymbolError::already_exists(&render_human_readable(&key))))
            }
            Err(err) => Err(self.fail(SymbolError::encoding(&render_human_readable(&key), err))),
        }
    }

    /// Copy out the symbol stored under a decorated name
    pub fn resolve(&self, name: &str) -> SymbolResult<Symbol> {
        let size = self.table.entry_size(name);
        if size == 0 {
            return Err(self.fail(SymbolError::not_found(&render_human_readable(name))));
        }

        let mut blob = vec![0u8; size];
        self.table
            .find(name, &mut blob)
            .map_err(|_| self.fail(SymbolError::not_found(&render_human_readable(name))))?;

        serde_json::from_slice(&blob)
            .map_err(|err| self.fail(SymbolError::encoding(&render_human_readable(name), err)))
    }

    /// Replace the symbol stored under a decorated name
    pub fn update(&mut self, name: &str, mut symbol: Symbol) -> SymbolResult<()> {
        if !self.table.contains(name) {
            return Err(self.fail(SymbolError::not_found(&render_human_readable(name))));
        }
        self.check_payload(name, &symbol)?;

        symbol.name = Some(DecoratedName::parse(name));
        let blob = self.encode(name, &symbol)?;
        self.table
            .replace(name, &blob)
            .map_err(|err| self.fail(SymbolError::encoding(&render_human_readable(name), err)))
    }

    /// Presence check that reports nothing
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains(name)
    }

    /// Every decorated name, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.table.keys().map(str::to_string).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Release every stored symbol; returns how many there were
    pub fn destroy(self) -> usize {
        self.table.destroy()
    }

    fn check_payload(&self, key: &str, symbol: &Symbol) -> SymbolResult<()> {
        if symbol.payload_matches() {
            return Ok(());
        }
        Err(self.fail(SymbolError::payload_mismatch(
            &render_human_readable(key),
            symbol.assign_type.as_str(),
        )))
    }

    fn encode(&self, key: &str, symbol: &Symbol) -> SymbolResult<Vec<u8>> {
        serde_json::to_vec(symbol)
            .map_err(|err| self.fail(SymbolError::encoding(&render_human_readable(key), err)))
    }

    /// Report through the sink and hand the error back
    fn fail(&self, err: SymbolError) -> SymbolError {
        self.reporter
            .report(LogLevel::Error, err.error_code(), None, &err.to_string());
        err
    }
}
