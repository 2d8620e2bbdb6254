//! Blocks returned by the text-detection service.

/// Classification the analysis service assigns to a detected block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
    /// One visual line of text.
    Line,
    Word,
    /// Pages, tables, key-value sets and anything else the service reports.
    Other(String),
}

/// A single detected block, in the order the service returned it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBlock {
    pub kind: BlockKind,
    pub text: Option<String>,
}

impl TextBlock {
    pub fn new(kind: BlockKind, text: Option<String>) -> Self {
        Self { kind, text }
    }

    #[cfg(test)]
    pub fn line(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Line, Some(text.into()))
    }

    #[cfg(test)]
    pub fn word(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Word, Some(text.into()))
    }

    pub fn is_line(&self) -> bool {
        self.kind == BlockKind::Line
    }
}
