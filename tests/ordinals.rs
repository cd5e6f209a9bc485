use std::collections::BTreeSet;
use std::sync::Arc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ordvalue::core::types::{DocId, Document};
use ordvalue::function::parser::parse_value_source;
use ordvalue::index::ordinals::MISSING_ORDINAL;
use ordvalue::storage::layout::StorageLayout;
use ordvalue::storage::segment::{SegmentContext, SegmentId};
use ordvalue::storage::segment_reader::SegmentReader;
use ordvalue::storage::segment_writer::SegmentWriter;
use ordvalue::{DocValues, ErrorKind, FieldCache, ValueSource};

const WORDS: &[&str] = &["kiwi", "apple", "Zebra", "éclair", "banana", "fig", "apple pie", "中文", "pear"];

fn random_segment(rng: &mut StdRng, docs: usize) -> Vec<Document> {
    (0..docs)
        .map(|_| {
            if rng.gen_bool(0.2) {
                Document::new()
            } else {
                Document::new().with_field("word", WORDS[rng.gen_range(0..WORDS.len())])
            }
        })
        .collect()
}

fn write_segment(storage: &StorageLayout, id: SegmentId, generation: u64, docs: &[Document]) -> SegmentContext {
    let mut writer = SegmentWriter::new(storage, id, generation).unwrap();
    for doc in docs {
        writer.write_document(doc).unwrap();
    }
    writer.finish().unwrap();
    let reader = SegmentReader::open(storage, id, generation).unwrap();
    SegmentContext::new(id, generation, Arc::new(reader))
}

#[test]
fn ordinal_is_rank_among_present_values() {
    let mut rng = StdRng::seed_from_u64(7);
    let cache = FieldCache::new(16);

    for round in 0..20 {
        let docs = random_segment(&mut rng, 50);
        let present: BTreeSet<String> = docs
            .iter()
            .filter_map(|d| d.get_field("word"))
            .map(|v| v.as_term().into_owned())
            .collect();
        let sorted: Vec<String> = present.into_iter().collect();

        let segment = SegmentContext::in_memory(SegmentId::new(), round, docs.clone());
        let values = ValueSource::ord("word").values(&segment, &cache).unwrap();

        for (doc, document) in docs.iter().enumerate() {
            let doc = DocId(doc as u32);
            match document.get_field("word") {
                Some(value) => {
                    let rank = sorted.iter().position(|t| *t == value.as_term()).unwrap() + 1;
                    assert_eq!(values.as_int(doc), rank as i32);
                    assert_eq!(values.as_string(doc), rank.to_string());
                }
                None => assert_eq!(values.as_int(doc), MISSING_ORDINAL as i32),
            }
        }
    }
}

#[test]
fn file_backed_segment_matches_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let storage = StorageLayout::new(dir.path().to_path_buf()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let docs = random_segment(&mut rng, 200);

    let cache = FieldCache::new(16);
    let on_disk = write_segment(&storage, SegmentId::new(), 1, &docs);
    let in_memory = SegmentContext::in_memory(SegmentId::new(), 1, docs);

    let source = parse_value_source("ord(word)").unwrap();
    let a = source.values(&on_disk, &cache).unwrap();
    let b = source.values(&in_memory, &cache).unwrap();
    for doc in 0..on_disk.max_doc() {
        assert_eq!(a.as_long(DocId(doc)), b.as_long(DocId(doc)));
    }
}

#[test]
fn unreadable_segment_fails_bind() {
    let dir = tempfile::tempdir().unwrap();
    let storage = StorageLayout::new(dir.path().to_path_buf()).unwrap();
    let id = SegmentId::new();
    let docs = vec![Document::new().with_field("word", "kiwi")];
    let segment = write_segment(&storage, id, 1, &docs);

    std::fs::remove_file(storage.segment_path(&id, 1)).unwrap();

    let cache = FieldCache::new(4);
    let err = ValueSource::ord("word").values(&segment, &cache).err().unwrap();
    assert_eq!(err.kind, ErrorKind::Io);
    assert!(err.is_io_failure());
    assert_eq!(cache.stats().build_count, 0);
}

#[test]
fn new_generation_does_not_leak_into_old_accessors() {
    let dir = tempfile::tempdir().unwrap();
    let storage = StorageLayout::new(dir.path().to_path_buf()).unwrap();
    let id = SegmentId::new();
    let cache = FieldCache::new(16);
    let source = ValueSource::ord("word");

    let gen1 = write_segment(
        &storage,
        id,
        1,
        &[Document::new().with_field("word", "pear"), Document::new().with_field("word", "kiwi")],
    );
    let old_values = source.values(&gen1, &cache).unwrap();
    assert_eq!(old_values.as_int(DocId(0)), 2);

    // "apple" sorts first and shifts every rank up by one
    let gen2 = write_segment(
        &storage,
        id,
        2,
        &[
            Document::new().with_field("word", "pear"),
            Document::new().with_field("word", "kiwi"),
            Document::new().with_field("word", "apple"),
        ],
    );
    let new_values = source.values(&gen2, &cache).unwrap();

    assert_eq!(new_values.as_int(DocId(0)), 3);
    assert_eq!(new_values.as_int(DocId(2)), 1);
    assert_eq!(old_values.as_int(DocId(0)), 2);
    assert_eq!(old_values.as_int(DocId(1)), 1);
    assert_eq!(cache.stats().size, 1);
}

#[test]
fn ord_and_rord_share_one_build() {
    let cache = FieldCache::new(4);
    let segment = SegmentContext::in_memory(
        SegmentId::new(),
        1,
        vec![
            Document::new().with_field("word", "b"),
            Document::new().with_field("word", "a"),
            Document::new(),
        ],
    );

    let ord = ValueSource::ord("word").values(&segment, &cache).unwrap();
    let rord = ValueSource::reverse_ord("word").values(&segment, &cache).unwrap();

    assert_eq!((ord.as_int(DocId(0)), rord.as_int(DocId(0))), (2, 1));
    assert_eq!((ord.as_int(DocId(1)), rord.as_int(DocId(1))), (1, 2));
    assert_eq!((ord.as_int(DocId(2)), rord.as_int(DocId(2))), (0, 3));
    assert_eq!(cache.stats().build_count, 1);
}

#[test]
fn bound_values_are_shareable_across_threads() {
    let cache = FieldCache::new(4);
    let segment = SegmentContext::in_memory(
        SegmentId::new(),
        1,
        (0..100).map(|i| Document::new().with_field("word", format!("w{:03}", i).as_str())).collect(),
    );
    let values = ValueSource::ord("word").values(&segment, &cache).unwrap();

    std::thread::scope(|s| {
        for t in 0..4u32 {
            let values = &values;
            s.spawn(move || {
                for doc in (t..100).step_by(4) {
                    assert_eq!(values.as_int(DocId(doc)), doc as i32 + 1);
                }
            });
        }
    });
}
