//! Chunk sources
//!
//! The engine never reads storage itself; it asks a [`ChunkSource`] for
//! fixed-size chunks. A source may return fewer chunks than requested at the
//! end of its input, and a trailing partial chunk is never returned.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{MerkleError, MerkleResult};

/// Supplier of fixed-size byte chunks addressed by sequence index
pub trait ChunkSource: Send + Sync {
    /// Size of every chunk, in bytes
    fn chunk_size(&self) -> usize;

    /// Read up to `count` chunks starting at chunk index `offset`
    fn read(&self, offset: u64, count: usize) -> MerkleResult<Vec<Vec<u8>>>;
}

/// Chunks read from a local file
///
/// Each `read` opens its own handle, so one source can serve concurrent
/// workers.
#[derive(Debug, Clone)]
pub struct FileChunkSource {
    path: PathBuf,
    chunk_size: usize,
    file_len: u64,
}

impl FileChunkSource {
    /// Open `path` as a sequence of `chunk_size`-byte chunks
    ///
    /// # Errors
    ///
    /// - [`MerkleError::InvalidChunkSize`] if `chunk_size` is zero
    /// - [`MerkleError::Io`] if the file metadata cannot be read
    pub fn open(path: impl AsRef<Path>, chunk_size: usize) -> MerkleResult<Self> {
        if chunk_size == 0 {
            return Err(MerkleError::InvalidChunkSize(chunk_size));
        }
        let path = path.as_ref().to_path_buf();
        let file_len = std::fs::metadata(&path)?.len();
        Ok(Self {
            path,
            chunk_size,
            file_len,
        })
    }

    /// Number of complete chunks in the file
    pub fn chunk_count(&self) -> u64 {
        self.file_len / self.chunk_size as u64
    }

    /// Read every complete chunk
    pub fn read_all(&self) -> MerkleResult<Vec<Vec<u8>>> {
        self.read(0, self.chunk_count() as usize)
    }
}

impl ChunkSource for FileChunkSource {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn read(&self, offset: u64, count: usize) -> MerkleResult<Vec<Vec<u8>>> {
        let available = self.chunk_count().saturating_sub(offset);
        let count = count.min(usize::try_from(available).unwrap_or(usize::MAX));
        if count == 0 {
            return Ok(Vec::new());
        }

        // offset < chunk_count here, so the byte position fits in the file length
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset * self.chunk_size as u64))?;
        let mut reader = BufReader::new(file);

        let mut chunks = Vec::with_capacity(count);
        for _ in 0..count {
            let mut chunk = vec![0u8; self.chunk_size];
            match reader.read_exact(&mut chunk) {
                Ok(()) => chunks.push(chunk),
                // File shrank since open(); keep what was read
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
        }

        debug!(
            path = %self.path.display(),
            offset,
            requested = count,
            read = chunks.len(),
            "read chunks"
        );
        Ok(chunks)
    }
}

/// Chunks held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryChunkSource {
    chunks: Vec<Vec<u8>>,
    chunk_size: usize,
}

impl MemoryChunkSource {
    /// Split `data` into `chunk_size`-byte chunks, dropping a partial tail
    pub fn from_bytes(data: &[u8], chunk_size: usize) -> MerkleResult<Self> {
        if chunk_size == 0 {
            return Err(MerkleError::InvalidChunkSize(chunk_size));
        }
        Ok(Self {
            chunks: data.chunks_exact(chunk_size).map(<[u8]>::to_vec).collect(),
            chunk_size,
        })
    }

    /// Wrap pre-split chunks
    pub fn from_chunks(chunks: Vec<Vec<u8>>) -> Self {
        let chunk_size = chunks.first().map_or(0, Vec::len);
        Self { chunks, chunk_size }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl ChunkSource for MemoryChunkSource {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn read(&self, offset: u64, count: usize) -> MerkleResult<Vec<Vec<u8>>> {
        let start = usize::try_from(offset)
            .unwrap_or(usize::MAX)
            .min(self.chunks.len());
        let end = start.saturating_add(count).min(self.chunks.len());
        Ok(self.chunks[start..end].to_vec())
    }
}
