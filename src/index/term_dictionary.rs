use std::collections::BTreeSet;
use std::fmt;
use fst::{Map, MapBuilder, Streamer};
use crate::core::error::Result;

/// Sorted distinct terms of one field in one segment, numbered from 1.
///
/// Terms are ordered by UTF-8 byte order, which is the same as Unicode code
/// point order. Each FST key maps to its 1-based ordinal.
pub struct TermDictionary {
    fst: Map<Vec<u8>>,
}

impl TermDictionary {
    pub fn build<'a, I>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        // FST requires sorted, deduplicated input
        let sorted: BTreeSet<&str> = terms.into_iter().collect();

        let mut builder = MapBuilder::memory();
        for (index, term) in sorted.into_iter().enumerate() {
            builder.insert(term.as_bytes(), index as u64 + 1)?;
        }

        Ok(TermDictionary {
            fst: builder.into_map(),
        })
    }

    pub fn len(&self) -> usize {
        self.fst.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fst.is_empty()
    }

    /// 1-based rank of `term`, or `None` when the term is absent.
    pub fn ordinal(&self, term: &str) -> Option<u32> {
        self.fst.get(term).map(|ordinal| ordinal as u32)
    }

    /// All terms in ordinal order.
    pub fn terms(&self) -> Vec<String> {
        let mut terms = Vec::with_capacity(self.len());
        let mut stream = self.fst.stream();
        while let Some((key, _)) = stream.next() {
            terms.push(String::from_utf8_lossy(key).into_owned());
        }
        terms
    }
}

impl fmt::Debug for TermDictionary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TermDictionary")
            .field("len", &self.len())
            .finish()
    }
}
