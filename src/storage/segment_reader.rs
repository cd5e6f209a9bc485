use std::fs::{self, File};
use std::io::Read;
use std::path::PathBuf;
use log::warn;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Document;
use crate::storage::layout::StorageLayout;
use crate::storage::segment::{collect_terms, SegmentFields, SegmentHeader, SegmentId};

/// File-backed segment. The header is validated on open; document records
/// are read and checksummed again on every field load.
#[derive(Debug)]
pub struct SegmentReader {
    pub segment_id: SegmentId,
    pub header: SegmentHeader,
    path: PathBuf,
}

impl SegmentReader {
    pub fn open(storage: &StorageLayout, segment_id: SegmentId, generation: u64) -> Result<Self> {
        let path = storage.segment_path(&segment_id, generation);
        let mut file = File::open(&path)?;

        let mut header_buf = [0u8; SegmentHeader::SIZE];
        file.read_exact(&mut header_buf)?;
        let header: SegmentHeader = bincode::deserialize(&header_buf)?;

        if header.version != SegmentHeader::VERSION {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("Incompatible segment version {}", header.version),
            ));
        }
        if header.generation != generation {
            return Err(Error::new(
                ErrorKind::Corruption,
                format!("Segment {} claims generation {}, expected {}", segment_id, header.generation, generation),
            ));
        }

        Ok(SegmentReader {
            segment_id,
            header,
            path,
        })
    }

    /// Read and verify every document of the segment.
    pub fn read_all_documents(&self) -> Result<Vec<Document>> {
        let data = fs::read(&self.path)?;
        if data.len() < SegmentHeader::SIZE {
            return Err(Error::new(ErrorKind::Corruption, format!("Segment {} truncated", self.segment_id)));
        }
        let body = &data[SegmentHeader::SIZE..];

        let checksum = crc32fast::hash(body);
        if checksum != self.header.checksum {
            warn!(
                "checksum mismatch in segment {} (stored {:08x}, computed {:08x})",
                self.segment_id, self.header.checksum, checksum
            );
            return Err(Error::new(
                ErrorKind::Corruption,
                format!("Checksum mismatch in segment {}", self.segment_id),
            ));
        }

        let mut documents = Vec::with_capacity(self.header.doc_count as usize);
        let mut offset = 0;
        for _ in 0..self.header.doc_count {
            let len_bytes = body
                .get(offset..offset + 4)
                .ok_or_else(|| Error::new(ErrorKind::Corruption, "Truncated document length"))?;
            let len = u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]) as usize;
            offset += 4;

            let doc_bytes = body
                .get(offset..offset + len)
                .ok_or_else(|| Error::new(ErrorKind::Corruption, "Truncated document record"))?;
            documents.push(bincode::deserialize(doc_bytes)?);
            offset += len;
        }

        Ok(documents)
    }
}

impl SegmentFields for SegmentReader {
    fn max_doc(&self) -> u32 {
        self.header.doc_count
    }

    fn field_terms(&self, field: &str) -> Result<Vec<Option<String>>> {
        let documents = self.read_all_documents()?;
        Ok(collect_terms(documents.iter(), field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::segment_writer::SegmentWriter;

    fn write_segment(storage: &StorageLayout, id: SegmentId, generation: u64, names: &[&str]) {
        let mut writer = SegmentWriter::new(storage, id, generation).unwrap();
        for name in names {
            writer.write_document(&Document::new().with_field("name", *name)).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn written_segment_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageLayout::new(dir.path().to_path_buf()).unwrap();
        let id = SegmentId::new();
        write_segment(&storage, id, 3, &["pear", "apple"]);

        let reader = SegmentReader::open(&storage, id, 3).unwrap();
        assert_eq!(reader.max_doc(), 2);
        assert_eq!(
            reader.field_terms("name").unwrap(),
            vec![Some("pear".to_string()), Some("apple".to_string())]
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageLayout::new(dir.path().to_path_buf()).unwrap();

        let err = SegmentReader::open(&storage, SegmentId::new(), 1).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }

    #[test]
    fn flipped_byte_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageLayout::new(dir.path().to_path_buf()).unwrap();
        let id = SegmentId::new();
        write_segment(&storage, id, 1, &["banana"]);

        let reader = SegmentReader::open(&storage, id, 1).unwrap();
        let path = storage.segment_path(&id, 1);
        let mut data = fs::read(&path).unwrap();
        let last = data.len() - 1;
        data[last] ^= 0xff;
        fs::write(&path, data).unwrap();

        let err = reader.field_terms("name").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Corruption);
        assert!(err.is_io_failure());
    }

    #[test]
    fn generation_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageLayout::new(dir.path().to_path_buf()).unwrap();
        let id = SegmentId::new();
        write_segment(&storage, id, 2, &["fig"]);
        fs::copy(storage.segment_path(&id, 2), storage.segment_path(&id, 5)).unwrap();

        let err = SegmentReader::open(&storage, id, 5).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Corruption);
    }
}
