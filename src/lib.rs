pub mod core;
pub mod storage;
pub mod index;
pub mod function;
pub mod response;

pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::function::doc_values::DocValues;
pub use crate::function::value_source::{SegmentValues, SourceKind, ValueSource};
pub use crate::index::field_cache::FieldCache;
pub use crate::response::special_float::{Dialect, SpecialFloat};

/*
┌──────────────────────────────────── STORAGE LAYER ─────────────────────────────────────┐
│                                                                                         │
│  ┌──────────────────────────┐   ┌──────────────────────────┐   ┌─────────────────────┐ │
│  │ trait SegmentFields      │   │ struct SegmentReader     │   │ struct SegmentWriter│ │
│  │ • max_doc()              │<──│ • header: SegmentHeader  │   │ • header            │ │
│  │ • field_terms(field)     │   │ • read_all_documents()   │   │ • write_document()  │ │
│  └──────────────────────────┘   └──────────────────────────┘   │ • finish()          │ │
│              ^                                                  └─────────────────────┘ │
│  ┌──────────────────────────┐   ┌──────────────────────────────────────────────────┐   │
│  │ struct InMemorySegment   │   │ struct SegmentContext                            │   │
│  │ • documents: Vec<Doc>    │   │ • id: SegmentId  • generation: u64               │   │
│  └──────────────────────────┘   │ • fields: Arc<dyn SegmentFields>                 │   │
│                                  └──────────────────────────────────────────────────┘   │
└─────────────────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────────── INDEX LAYER ──────────────────────────────────────┐
│                                                                                         │
│  FieldCache ──keys──> (SegmentId, generation, field) ──slot──> Arc<OrdinalArray>        │
│      │                                                              │                   │
│      └──builds via──> OrdinalArray::build ──uses──> TermDictionary (fst::Map, 1-based)  │
│                                                                                         │
└─────────────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────── FUNCTION LAYER ─────────────────────────────────────┐
│                                                                                         │
│  parse_value_source("ord(f)") ──> ValueSource { Ord | ReverseOrd | Const }              │
│                                        │                                                │
│                                        └──values(ctx, cache)──> SegmentValues           │
│                                                                   │                     │
│                      trait DocValues: as_float/as_int/as_long/as_double/as_string       │
│                                                                                         │
└─────────────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────── RESPONSE LAYER ─────────────────────────────────────┐
│                                                                                         │
│  NamedList<Value> ──> TextResponseWriter(Dialect) ──special floats──> special_float     │
│                                                                       ::format          │
└─────────────────────────────────────────────────────────────────────────────────────────┘
*/
