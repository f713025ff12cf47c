use std::io::{self, BufRead, Cursor, Read};

use crate::handshake::Anomaly;

/// The unparsed CSV body of a download, plus the anomalies of the handshake
/// that preceded it.
#[derive(Debug)]
pub struct CsvStream {
    body: Cursor<String>,
    anomalies: Vec<Anomaly>,
}

impl CsvStream {
    pub(crate) fn new(body: String, anomalies: Vec<Anomaly>) -> Self {
        Self {
            body: Cursor::new(body),
            anomalies,
        }
    }

    /// Anomalies recorded during the handshake.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// The whole body, regardless of how much has been read.
    pub fn text(&self) -> &str {
        self.body.get_ref()
    }

    /// Consumes the stream, returning the whole body.
    pub fn into_text(self) -> String {
        self.body.into_inner()
    }
}

impl Read for CsvStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.body.read(buf)
    }
}

impl BufRead for CsvStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.body.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.body.consume(amt);
    }
}
