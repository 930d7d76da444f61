//! Client-side history of recent quarrels
//!
//! The whole list lives under one key as a JSON array, newest first.
//! Load once, then every `record` rewrites the full list. Two writers
//! on the same store will lose each other's entries.

use serde::{Deserialize, Serialize};
use log::{debug, error};

/// Storage key for the serialized list
pub const HISTORY_KEY: &str = "quarrel-history";
/// Entries kept; older ones are dropped silently
pub const MAX_ENTRIES: usize = 10;

/// Minimal key-value storage the history is persisted in
pub trait KeyValueStore
{   fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String)
      -> Result<(), crate::error::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry
{   pub replies: Vec<String>
  , pub timestamp: i64
  , pub input: String
  , pub intensity: crate::Intensity
}

impl From<&crate::request::QuarrelResponse> for HistoryEntry
{   fn from(response: &crate::request::QuarrelResponse) -> Self
    {   HistoryEntry
        {   replies: response.replies.clone()
          , timestamp: response.timestamp
          , input: response.input.clone()
          , intensity: response.intensity
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History
{   entries: Vec<HistoryEntry>
}

impl History
{   /// Read the stored list; a missing or corrupt blob gives an empty history
    pub fn load(store: &impl KeyValueStore) -> Self
    {   let Some(raw) = store.get(HISTORY_KEY)
        else
        {   return History::default();
        };
        match serde_json::from_str::<Vec<HistoryEntry>>(&raw)
        {   Ok(mut entries) => {
              entries.truncate(MAX_ENTRIES);
              debug!("Loaded {} history entries", entries.len());
              History { entries }
            }
          , Err(e) => {
              error!("Failed to load history: {}", e);
              History::default()
            }
        }
    }

    /// Prepend `entry`, cap the list, and persist all of it
    pub fn record(
      &mut self
    , store: &mut impl KeyValueStore
    , entry: HistoryEntry
    ) -> Result<(), crate::error::Error>
    {   self.entries.insert(0, entry);
        self.entries.truncate(MAX_ENTRIES);

        let raw = serde_json::to_string(&self.entries).map_err(|e| {
          error!("Failed to serialize history: {}", e);
          crate::error::Error::ParseError(e.to_string())
        })?;
        store.set(HISTORY_KEY, raw)
    }

    /// Newest first
    pub fn entries(&self) -> &[HistoryEntry]
    {   &self.entries
    }

    pub fn len(&self) -> usize
    {   self.entries.len()
    }

    pub fn is_empty(&self) -> bool
    {   self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore
    {   values: HashMap<String, String>
      , writes: usize
    }

    impl KeyValueStore for MemoryStore
    {   fn get(&self, key: &str) -> Option<String>
        {   self.values.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: String)
          -> Result<(), crate::error::Error>
        {   self.writes += 1;
            self.values.insert(key.to_string(), value);
            Ok(())
        }
    }

    fn entry(n: i64) -> HistoryEntry
    {   HistoryEntry
        {   replies: vec![format!("reply {}", n)]
          , timestamp: n
          , input: format!("input {}", n)
          , intensity: crate::Intensity::new(5).unwrap()
        }
    }

    #[test]
    fn test_empty_store_loads_empty()
    {   assert!(History::load(&MemoryStore::default()).is_empty());
    }

    #[test]
    fn test_corrupt_blob_loads_empty()
    {   let mut store = MemoryStore::default();
        store.values.insert(HISTORY_KEY.to_string(), "{not json".to_string());
        assert!(History::load(&store).is_empty());
    }

    #[test]
    fn test_newest_first_capped_at_ten()
    {   let mut store = MemoryStore::default();
        let mut history = History::load(&store);
        for n in 0..12
        {   history.record(&mut store, entry(n)).unwrap();
        }
        assert_eq!(history.len(), MAX_ENTRIES);
        assert_eq!(history.entries()[0].timestamp, 11);
        assert_eq!(history.entries()[9].timestamp, 2);
        assert_eq!(store.writes, 12);

        let reloaded = History::load(&store);
        assert_eq!(reloaded, history);
    }

    #[test]
    fn test_entry_from_response()
    {   let response = crate::request::QuarrelResponse
        {   replies: vec!["A".to_string()]
          , timestamp: 1_700_000_000_000
          , input: "x".to_string()
          , intensity: crate::Intensity::new(3).unwrap()
          , provider: "deepseek".to_string()
        };
        let entry = HistoryEntry::from(&response);
        assert_eq!(entry.replies, response.replies);
        assert_eq!(entry.timestamp, response.timestamp);
        assert_eq!(entry.intensity.get(), 3);
    }
}
