use crate::api::Result;
use crate::contact::ContactRecord;
use log::warn;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const HEADER: [&str; 5] = ["username", "name", "email", "linkedin", "x"];

/// CSV output written row by row. Every row is flushed as soon as it is written.
pub struct CsvSink<W: Write> {
    writer: BufWriter<W>,
    finished: bool,
}

impl CsvSink<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        CsvSink::new(File::create(path)?)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps `writer` and writes the header row.
    pub fn new(writer: W) -> Result<Self> {
        let mut sink = CsvSink {
            writer: BufWriter::new(writer),
            finished: false,
        };
        sink.write_row(HEADER.map(Some))?;
        Ok(sink)
    }

    pub fn write(&mut self, record: &ContactRecord) -> Result<()> {
        self.write_row([
            Some(record.username.as_str()),
            record.name.as_deref(),
            record.email.as_deref(),
            record.linkedin.as_deref(),
            record.x.as_deref(),
        ])
    }

    /// Flushes and closes the output. Dropping an unfinished sink only flushes on a best-effort basis.
    pub fn finish(mut self) -> Result<()> {
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    fn write_row(&mut self, fields: [Option<&str>; 5]) -> Result<()> {
        let line = fields.map(|field| escape(field.unwrap_or_default())).join(",");
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for CsvSink<W> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(err) = self.writer.flush() {
            warn!("Failed to flush output on close: {}", err);
        }
    }
}

fn escape(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
