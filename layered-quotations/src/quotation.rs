use layered_mentions::MentionId;
use serde::Serialize;
use std::fmt;

/// Position of a token relative to quoted speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QuoteLabel {
    /// Opening delimiter (or paragraph-initial dash).
    Begin,
    Inside,
    Outside,
}

impl QuoteLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            QuoteLabel::Begin => "B",
            QuoteLabel::Inside => "I",
            QuoteLabel::Outside => "O",
        }
    }
}

impl fmt::Display for QuoteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// B/I/O labels for every token of a document, by global token index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuoteLabels(Vec<QuoteLabel>);

impl QuoteLabels {
    pub(crate) fn new(labels: Vec<QuoteLabel>) -> Self {
        Self(labels)
    }

    /// Label of a global token; tokens past the end are outside.
    pub fn get(&self, global: usize) -> QuoteLabel {
        self.0.get(global).copied().unwrap_or(QuoteLabel::Outside)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = QuoteLabel> + '_ {
        self.0.iter().copied()
    }
}

/// A span of direct speech.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quotation {
    /// Global index of the opening token.
    pub start: usize,
    /// Global index one past the closing token.
    pub end: usize,
    /// Sentence of the opening token.
    pub sentno: usize,
    /// Paragraph of the opening token.
    pub parno: usize,
    /// Starts a sentence and ends at (or one token before) a sentence end.
    pub sent_bounds: bool,
    pub speaker: Option<MentionId>,
    pub addressee: Option<MentionId>,
    /// Mentions whose head falls inside the span.
    pub mentions: Vec<MentionId>,
    /// Surface text including the delimiters.
    pub text: String,
}

impl Quotation {
    pub fn new(start: usize, end: usize, sentno: usize, parno: usize, sent_bounds: bool, text: String) -> Self {
        Self {
            start,
            end,
            sentno,
            parno,
            sent_bounds,
            speaker: None,
            addressee: None,
            mentions: Vec::new(),
            text,
        }
    }

    pub fn contains(&self, global: usize) -> bool {
        self.start <= global && global < self.end
    }
}

impl fmt::Display for Quotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = |m: Option<MentionId>| m.map_or_else(|| "-".to_string(), |m| m.to_string());
        write!(
            f,
            "{:?} {}..{} speaker={} addressee={}",
            self.text,
            self.start,
            self.end,
            role(self.speaker),
            role(self.addressee)
        )
    }
}
