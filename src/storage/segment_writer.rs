use std::io::{Write, Seek, SeekFrom};
use std::fs::File;
use crc32fast::Hasher;
use crate::core::types::Document;
use crate::storage::layout::StorageLayout;
use crate::storage::segment::{SegmentHeader, SegmentId};
use crate::core::error::Result;

const FLUSH_THRESHOLD: usize = 1024 * 1024;

pub struct SegmentWriter {
    pub header: SegmentHeader,
    pub buffer: Vec<u8>,
    pub file: File,
    pub hasher: Hasher,
}

impl SegmentWriter {
    pub fn new(storage: &StorageLayout, segment_id: SegmentId, generation: u64) -> Result<Self> {
        let path = storage.segment_path(&segment_id, generation);
        let mut file = File::create(path)?;

        // Reserve the header slot, filled in by finish()
        file.write_all(&[0u8; SegmentHeader::SIZE])?;

        Ok(SegmentWriter {
            header: SegmentHeader::new(0, generation),
            buffer: Vec::with_capacity(FLUSH_THRESHOLD),
            file,
            hasher: Hasher::new(),
        })
    }

    /// Append a document; its doc id is its position in the segment.
    pub fn write_document(&mut self, doc: &Document) -> Result<u32> {
        let data = bincode::serialize(doc)?;

        let len = data.len() as u32;
        self.buffer.extend_from_slice(&len.to_le_bytes());
        self.buffer.extend_from_slice(&data);

        let doc_id = self.header.doc_count;
        self.header.doc_count += 1;

        if self.buffer.len() > FLUSH_THRESHOLD {
            self.flush()?;
        }

        Ok(doc_id)
    }

    pub fn flush(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            self.hasher.update(&self.buffer);
            self.file.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        Ok(())
    }

    // [ HEADER (version, doc_count, checksum, generation) ] <- byte 0
    // [ len | DOCUMENT 0 ]
    // [ len | DOCUMENT 1 ]
    pub fn finish(mut self) -> Result<SegmentHeader> {
        self.flush()?;

        self.file.seek(SeekFrom::Start(0))?;
        let mut header = self.header.clone();
        header.checksum = self.hasher.finalize();

        let header_data = bincode::serialize(&header)?;
        self.file.write_all(&header_data)?;

        self.file.sync_all()?;

        Ok(header)
    }
}
