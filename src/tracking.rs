//! Streaming JSON epoch log
//!
//! [`StreamingJsonWriter`] maintains a file that is, after every append,
//! syntactically valid JSON representing an array of records — without
//! rewriting previously-written records. Each append seeks back over the
//! closing `\n]\n` sequence, writes the next element, and re-closes the
//! array.
//!
//! The writer is generic over any `Write + Seek` stream so the cursor
//! arithmetic can be unit-tested against an in-memory buffer; the
//! file-backed constructor is [`StreamingJsonWriter::open`].

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The array-closing sequence overwritten by each append
const CLOSING_SEQ: &[u8] = b"\n]\n";

/// Per-epoch record appended to the JSON log on validation improvement
///
/// Field names match the on-disk log format: `Epoch`, `train_loss`,
/// `val_loss`, `train_time`, `val_time`. Records are never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// 1-based epoch index
    #[serde(rename = "Epoch")]
    pub epoch: usize,
    /// Average training loss, in normalized target units
    pub train_loss: f32,
    /// Average validation loss, in original label units
    pub val_loss: f32,
    /// Wall-clock seconds for the training pass
    pub train_time: f64,
    /// Wall-clock seconds for the validation pass
    pub val_time: f64,
}

/// Appends records to a JSON array held in a seekable stream
///
/// # Example
///
/// ```
/// use grafeno::tracking::StreamingJsonWriter;
/// use std::io::Cursor;
///
/// let mut writer = StreamingJsonWriter::fresh(Cursor::new(Vec::new()));
/// writer.append(&serde_json::json!({"Epoch": 1})).unwrap();
/// let buf = writer.into_inner().unwrap().into_inner();
/// let parsed: Vec<serde_json::Value> = serde_json::from_slice(&buf).unwrap();
/// assert_eq!(parsed.len(), 1);
/// ```
pub struct StreamingJsonWriter<S: Write + Seek> {
    stream: S,
    delimiter: char,
    /// Fresh stream with no record written yet; close writes an empty array
    fresh_unwritten: bool,
}

impl StreamingJsonWriter<std::fs::File> {
    /// Open a log file, resuming a prior array if the path exists
    ///
    /// Resuming assumes the existing file ends with exactly `\n]\n` from a
    /// prior run. If it does not, the overwrite arithmetic corrupts the
    /// tail; this is a documented assumption, not defended against.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = OpenOptions::new().read(true).write(true).open(path)?;
            Ok(Self::resume(file))
        } else {
            let file = OpenOptions::new().write(true).create_new(true).open(path)?;
            Ok(Self::fresh(file))
        }
    }
}

impl<S: Write + Seek> StreamingJsonWriter<S> {
    /// Wrap an empty stream; the first append opens the array with `[`
    pub fn fresh(stream: S) -> Self {
        Self {
            stream,
            delimiter: '[',
            fresh_unwritten: true,
        }
    }

    /// Wrap a stream already holding a closed JSON array; the next append
    /// continues it with `,`
    pub fn resume(stream: S) -> Self {
        Self {
            stream,
            delimiter: ',',
            fresh_unwritten: false,
        }
    }

    /// Append one record, leaving the stream as a closed JSON array
    ///
    /// The write position is `max(stream_len - len("\n]\n"), 0)`: the
    /// closing sequence of the previous append is overwritten by
    /// `<delimiter>\n    <record>\n]\n` and the stream is flushed before
    /// returning.
    pub fn append<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let data = serde_json::to_string(record)?;

        let stream_len = self.stream.seek(SeekFrom::End(0))?;
        let overwrite_at = stream_len.saturating_sub(CLOSING_SEQ.len() as u64);
        self.stream.seek(SeekFrom::Start(overwrite_at))?;

        write!(self.stream, "{}\n    {}\n]\n", self.delimiter, data)?;
        self.stream.flush()?;

        self.delimiter = ',';
        self.fresh_unwritten = false;
        Ok(())
    }

    /// Close the writer, releasing the stream
    ///
    /// A fresh writer that never appended finalizes to the empty array
    /// `[\n]\n` so the file parses as valid JSON either way.
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    /// Close the writer and hand back the underlying stream
    pub fn into_inner(mut self) -> Result<S> {
        self.finish()?;
        Ok(self.stream)
    }

    fn finish(&mut self) -> Result<()> {
        if self.fresh_unwritten {
            self.stream.write_all(b"[\n]\n")?;
            self.fresh_unwritten = false;
        }
        self.stream.flush()?;
        Ok(())
    }
}
