//! `language -> bytes` maps in document order.
//!
//! Both the GitHub languages endpoint and the flat file format are JSON
//! objects. Key order is the tie-break for equal sizes downstream, so the map
//! is read entry by entry instead of into a sorted or hashed collection.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;

/// Language sizes in the order the document listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSizes(Vec<(String, u64)>);

impl LanguageSizes {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for LanguageSizes {
    type Item = (String, u64);
    type IntoIter = std::vec::IntoIter<(String, u64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

struct SizesVisitor;

impl<'de> Visitor<'de> for SizesVisitor {
    type Value = LanguageSizes;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of language name to byte count")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut sizes = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((language, bytes)) = map.next_entry::<String, u64>()? {
            sizes.push((language, bytes));
        }
        Ok(LanguageSizes(sizes))
    }
}

impl<'de> Deserialize<'de> for LanguageSizes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SizesVisitor)
    }
}
