//! # Command Container
//!
//! Ordered, two-segment buffer for the command stream of one document.
//!
//! ## Segments
//!
//! | Segment | Purpose |
//! |---------|---------|
//! | Header | One-time setup and asset uploads (stored graphics) |
//! | Body | Per-shape drawing commands |
//!
//! Printers require stored assets to exist before they are referenced, so
//! the finalized output is always header entries followed by body entries.
//!
//! ## Lifecycle
//!
//! A container starts empty, accumulates entries (header and body are
//! independently append-only) and is finalized exactly once by
//! [`Container::finish`], which consumes it. A new document needs a new
//! container; re-opening a finalized one is unrepresentable.

/// Newline separating command tokens in the serialized stream.
///
/// Binary payloads are also newline-terminated so the following token
/// starts on a fresh line.
pub const NEWLINE: &str = "\n";

/// Atomic unit of a command stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Textual op-code line, serialized with a trailing newline.
    Text(String),
    /// Raw binary payload (raster data, PCX container), emitted verbatim.
    Binary(Vec<u8>),
}

impl From<String> for Entry {
    fn from(token: String) -> Self {
        Entry::Text(token)
    }
}

impl From<&str> for Entry {
    fn from(token: &str) -> Self {
        Entry::Text(token.to_string())
    }
}

impl From<Vec<u8>> for Entry {
    fn from(payload: Vec<u8>) -> Self {
        Entry::Binary(payload)
    }
}

/// Accumulated translation output for one document.
#[derive(Debug, Default)]
pub struct Container {
    header: Vec<Entry>,
    body: Vec<Entry>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a setup/asset-upload entry.
    pub fn add_header(&mut self, entry: impl Into<Entry>) {
        self.header.push(entry.into());
    }

    /// Append a drawing entry.
    pub fn add_body(&mut self, entry: impl Into<Entry>) {
        self.body.push(entry.into());
    }

    /// Append a whole sequence of entries to the header segment.
    pub fn extend_header(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.header.extend(entries);
    }

    /// Append a whole sequence of entries to the body segment.
    pub fn extend_body(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.body.extend(entries);
    }

    /// Entries in final emission order: header first, then body.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.header.iter().chain(self.body.iter())
    }

    pub fn header(&self) -> &[Entry] {
        &self.header
    }

    pub fn body(&self) -> &[Entry] {
        &self.body
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.body.is_empty()
    }

    /// Finalize: serialize header then body into one byte stream.
    ///
    /// Each entry is newline-terminated; binary payloads are written
    /// verbatim between the surrounding command lines.
    pub fn finish(self) -> Vec<u8> {
        let capacity: usize = self
            .entries()
            .map(|entry| match entry {
                Entry::Text(token) => token.len() + 1,
                Entry::Binary(payload) => payload.len() + 1,
            })
            .sum();

        let mut output = Vec::with_capacity(capacity);
        for entry in self.header.into_iter().chain(self.body) {
            match entry {
                Entry::Text(token) => output.extend_from_slice(token.as_bytes()),
                Entry::Binary(payload) => output.extend_from_slice(&payload),
            }
            output.extend_from_slice(NEWLINE.as_bytes());
        }
        output
    }
}
