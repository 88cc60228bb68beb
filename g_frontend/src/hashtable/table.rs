//! Open-addressing hash table of string keys to byte blobs.
//!
//! Slots are probed linearly from `fnv1a(key) & (capacity - 1)`. Entries are never removed
//! individually, so probing needs no tombstones; the table grows (doubling and rehashing
//! every live entry) before an insert would push `count + 2` past `capacity * MAX_LOAD`.

use super::error::{HashTableError, HashTableResult};
use super::fnv1a;
use crate::config::compile_time::hashtable::{INITIAL_CAPACITY, MAX_LOAD};

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    value: Box<[u8]>,
}

#[derive(Debug, Clone)]
pub struct HashTable {
    slots: Vec<Option<Entry>>,
    count: usize,
    cursor: Option<usize>,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HashTable {
    pub fn new() -> Self {
        Self {
            slots: empty_slots(INITIAL_CAPACITY),
            count: 0,
            cursor: None,
        }
    }

    /// Index of the slot holding `key`, or of the empty slot where it would go
    fn find_slot(slots: &[Option<Entry>], key: &str) -> usize {
        let mask = slots.len() - 1;
        let mut index = fnv1a(key.as_bytes()) as usize & mask;
        loop {
            match &slots[index] {
                None => return index,
                Some(entry) if entry.key == key => return index,
                Some(_) => index = (index + 1) & mask,
            }
        }
    }

    fn grow_if_needed(&mut self) {
        if (self.count + 2) as f64 <= self.slots.len() as f64 * MAX_LOAD {
            return;
        }

        let capacity = self.slots.len() << 1;
        let mut slots = empty_slots(capacity);
        for entry in self.slots.drain(..).flatten() {
            let index = Self::find_slot(&slots, &entry.key);
            slots[index] = Some(entry);
        }
        self.slots = slots;
    }

    /// Store a copy of `value` under `key`. Existing keys are never overwritten.
    pub fn insert(&mut self, key: &str, value: &[u8]) -> HashTableResult<()> {
        if value.is_empty() {
            return Err(HashTableError::empty_value(key));
        }

        self.grow_if_needed();

        let index = Self::find_slot(&self.slots, key);
        if self.slots[index].is_some() {
            return Err(HashTableError::already_exists(key));
        }

        self.slots[index] = Some(Entry {
            key: key.to_string(),
            value: value.into(),
        });
        self.count += 1;
        Ok(())
    }

    /// Overwrite the value of an existing key
    pub fn replace(&mut self, key: &str, value: &[u8]) -> HashTableResult<()> {
        if value.is_empty() {
            return Err(HashTableError::empty_value(key));
        }

        let index = Self::find_slot(&self.slots, key);
        match &mut self.slots[index] {
            Some(entry) => {
                entry.value = value.into();
                Ok(())
            }
            None => Err(HashTableError::not_found(key)),
        }
    }

    /// Copy the stored value into `out`, truncating to `out.len()`. Returns the number of
    /// bytes copied.
    pub fn find(&self, key: &str, out: &mut [u8]) -> HashTableResult<usize> {
        let value = self.get(key).ok_or_else(|| HashTableError::not_found(key))?;
        let copied = value.len().min(out.len());
        out[..copied].copy_from_slice(&value[..copied]);
        Ok(copied)
    }

    /// Borrow the stored value
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.slots[Self::find_slot(&self.slots, key)]
            .as_ref()
            .map(|entry| &*entry.value)
    }

    /// Size of the stored value, or 0 when the key is absent
    pub fn entry_size(&self, key: &str) -> usize {
        self.get(key).map_or(0, <[u8]>::len)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Advance the table's single key cursor. `reset` restarts from the first slot.
    ///
    /// Keys come back in slot order. An insert between calls may rehash the table, after
    /// which the cursor position is meaningless until reset.
    pub fn iterate(&mut self, reset: bool) -> Option<&str> {
        if reset {
            self.cursor = None;
        }

        let start = self.cursor.map_or(0, |i| i + 1);
        let found = (start..self.slots.len()).find(|&i| self.slots[i].is_some());
        self.cursor = Some(found.unwrap_or(self.slots.len()));

        found.and_then(|i| self.slots[i].as_ref()).map(|e| e.key.as_str())
    }

    /// All keys in slot order, without touching the cursor
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().flatten().map(|entry| entry.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Release every key and value. Returns how many entries were dropped.
    pub fn destroy(self) -> usize {
        self.count
    }
}

fn empty_slots(capacity: usize) -> Vec<Option<Entry>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_insert_and_find() {
        let mut table = HashTable::new();
        table.insert("alpha", b"first").unwrap();
        table.insert("beta", b"second value").unwrap();

        let mut out = [0u8; 32];
        let copied = table.find("beta", &mut out).unwrap();
        assert_eq!(&out[..copied], b"second value");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_duplicate_insert_keeps_original() {
        let mut table = HashTable::new();
        table.insert("key", b"original").unwrap();

        assert_matches!(
            table.insert("key", b"other"),
            Err(HashTableError::AlreadyExists { key }) if key == "key"
        );
        assert_eq!(table.get("key"), Some(&b"original"[..]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_find_missing_key() {
        let table = HashTable::new();
        let mut out = [0u8; 4];
        assert_matches!(table.find("nope", &mut out), Err(HashTableError::NotFound { .. }));
        assert_eq!(table.entry_size("nope"), 0);
    }

    #[test]
    fn test_find_truncates_to_caller_buffer() {
        let mut table = HashTable::new();
        table.insert("k", b"abcdefgh").unwrap();

        let mut small = [0u8; 3];
        assert_eq!(table.find("k", &mut small).unwrap(), 3);
        assert_eq!(&small, b"abc");
        assert_eq!(table.entry_size("k"), 8);
    }

    #[test]
    fn test_empty_value_rejected() {
        let mut table = HashTable::new();
        assert_matches!(table.insert("k", b""), Err(HashTableError::EmptyValue { .. }));
        assert!(table.is_empty());
    }

    #[test]
    fn test_replace() {
        let mut table = HashTable::new();
        assert_matches!(table.replace("k", b"v"), Err(HashTableError::NotFound { .. }));

        table.insert("k", b"v1").unwrap();
        table.replace("k", b"value two").unwrap();
        assert_eq!(table.get("k"), Some(&b"value two"[..]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_growth_sequence() {
        let mut table = HashTable::new();
        let mut capacities = Vec::new();
        for i in 1..=24 {
            table.insert(&format!("key{}", i), &[i as u8]).unwrap();
            capacities.push(table.capacity());
        }

        assert!(capacities[..5].iter().all(|&c| c == 8));
        assert!(capacities[5..11].iter().all(|&c| c == 16));
        assert!(capacities[11..23].iter().all(|&c| c == 32));
        assert_eq!(capacities[23], 64);
    }

    #[test]
    fn test_all_keys_survive_rehash() {
        let mut table = HashTable::new();
        for i in 0..500u32 {
            table.insert(&format!("$cls{}$m", i), &i.to_le_bytes()).unwrap();
        }
        assert!(table.capacity().is_power_of_two());
        assert!((table.len() as f64) < table.capacity() as f64 * MAX_LOAD);

        for i in (0..500u32).rev() {
            let mut out = [0u8; 4];
            table.find(&format!("$cls{}$m", i), &mut out).unwrap();
            assert_eq!(u32::from_le_bytes(out), i);
        }
    }

    #[test]
    fn test_iterate_visits_every_key_once() {
        let mut table = HashTable::new();
        for name in ["a", "b", "c", "d", "e", "f", "g"] {
            table.insert(name, name.as_bytes()).unwrap();
        }

        let mut seen = Vec::new();
        let mut key = table.iterate(true).map(str::to_string);
        while let Some(k) = key {
            seen.push(k);
            key = table.iterate(false).map(str::to_string);
        }
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c", "d", "e", "f", "g"]);

        // exhausted until reset
        assert!(table.iterate(false).is_none());
        assert!(table.iterate(true).is_some());
    }

    #[test]
    fn test_iterate_empty_table() {
        let mut table = HashTable::new();
        assert!(table.iterate(true).is_none());
        assert_eq!(table.keys().count(), 0);
    }

    #[test]
    fn test_destroy_reports_entries() {
        let mut table = HashTable::new();
        table.insert("x", b"1").unwrap();
        table.insert("y", b"2").unwrap();
        assert_eq!(table.destroy(), 2);
    }
}
