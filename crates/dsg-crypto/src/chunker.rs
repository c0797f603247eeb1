use std::io::Read;

/// Default chunk size: 256 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

/// Iterator over fixed-size chunks of a byte source.
///
/// Yields `chunk_size`-byte chunks in order; the final chunk may be shorter.
/// An empty source yields no chunks. Each chunk is owned transiently by the
/// caller and not retained here — the chunker reads forward only and never
/// buffers more than one chunk.
pub struct Chunker<R> {
    reader: R,
    chunk_size: usize,
    done: bool,
}

impl<R: Read> Chunker<R> {
    /// Create a chunker over `reader`.
    ///
    /// `chunk_size` must be non-zero; callers validate it upstream (see
    /// [`ChunkedHasher::new`](crate::ChunkedHasher::new)).
    pub fn new(reader: R, chunk_size: usize) -> Self {
        debug_assert!(chunk_size > 0);
        Self {
            reader,
            chunk_size,
            done: false,
        }
    }

    /// Read until the buffer is full or the source is exhausted.
    fn fill_chunk(&mut self) -> std::io::Result<Vec<u8>> {
        let mut buf = vec![0u8; self.chunk_size];
        let mut filled = 0;
        while filled < self.chunk_size {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        buf.truncate(filled);
        Ok(buf)
    }
}

impl<R: Read> Iterator for Chunker<R> {
    type Item = std::io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.fill_chunk() {
            Ok(chunk) => {
                if chunk.len() < self.chunk_size {
                    self.done = true;
                }
                if chunk.is_empty() {
                    None
                } else {
                    Some(Ok(chunk))
                }
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn chunks_of(data: &[u8], size: usize) -> Vec<Vec<u8>> {
        Chunker::new(Cursor::new(data.to_vec()), size)
            .collect::<std::io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn empty_source_yields_no_chunks() {
        assert!(chunks_of(b"", 4).is_empty());
    }

    #[test]
    fn short_source_yields_single_chunk() {
        let chunks = chunks_of(b"abc", 8);
        assert_eq!(chunks, vec![b"abc".to_vec()]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_chunk() {
        let chunks = chunks_of(b"abcdefgh", 4);
        assert_eq!(chunks, vec![b"abcd".to_vec(), b"efgh".to_vec()]);
    }

    #[test]
    fn final_chunk_may_be_shorter() {
        let chunks = chunks_of(b"hello world", 4);
        assert_eq!(
            chunks,
            vec![b"hell".to_vec(), b"o wo".to_vec(), b"rld".to_vec()]
        );
    }

    #[test]
    fn chunk_size_one() {
        let chunks = chunks_of(b"xyz", 1);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2], b"z");
    }

    #[test]
    fn read_error_is_propagated() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk gone"))
            }
        }

        let mut chunker = Chunker::new(FailingReader, 4);
        assert!(chunker.next().unwrap().is_err());
        // A failed chunker is exhausted.
        assert!(chunker.next().is_none());
    }

    #[test]
    fn interrupted_reads_are_retried() {
        struct InterruptingReader {
            data: Vec<u8>,
            pos: usize,
            interrupted: bool,
        }
        impl Read for InterruptingReader {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(std::io::Error::from(std::io::ErrorKind::Interrupted));
                }
                let n = buf.len().min(self.data.len() - self.pos);
                buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
                self.pos += n;
                Ok(n)
            }
        }

        let reader = InterruptingReader {
            data: b"abcd".to_vec(),
            pos: 0,
            interrupted: false,
        };
        let chunks: Vec<_> = Chunker::new(reader, 4)
            .collect::<std::io::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(chunks, vec![b"abcd".to_vec()]);
    }
}
