//! Left-to-right quotation scanning.

use crate::{QuoteLabel, QuoteLabels, Quotation};
use layered_coref::lexicon::is_speech_verb;
use layered_coref::{Document, NodeRef};

/// Opening delimiter and the token that closes it.
const DELIMITERS: &[(&str, &str)] = &[
    ("\"", "\""),
    ("'", "'"),
    ("`", "'"),
    ("``", "''"),
    ("\u{201c}", "\u{201d}"),
    ("\u{2018}", "\u{2019}"),
    ("\u{201e}", "\u{201d}"),
    ("\u{ab}", "\u{bb}"),
];

fn closer(word: &str) -> Option<&'static str> {
    DELIMITERS
        .iter()
        .find(|(open, _)| *open == word)
        .map(|&(_, close)| close)
}

/// Quotations of a document with the token labels produced alongside.
#[derive(Debug, Clone, Default)]
pub struct QuoteScan {
    pub quotations: Vec<Quotation>,
    pub labels: QuoteLabels,
}

impl QuoteScan {
    /// The quotation covering a global token.
    pub fn quotation_at(&self, global: usize) -> Option<&Quotation> {
        let idx = self.quotations.partition_point(|q| q.start <= global);
        idx.checked_sub(1)
            .map(|idx| &self.quotations[idx])
            .filter(|q| q.contains(global))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    Delimited(&'static str),
    /// Dash turn without a reporting clause: runs to the paragraph end.
    Paragraph,
}

/// Finds direct speech in the token stream.
///
/// Quoted speech inside other quoted speech is not marked; an open
/// quotation is closed by the next paragraph break (or the end of the
/// document) when no closing delimiter shows up. A dash at the start of a
/// paragraph opens a dialogue turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotationScanner;

impl QuotationScanner {
    pub fn new() -> Self {
        Self
    }

    pub fn scan(&self, doc: &Document) -> QuoteScan {
        let total = doc.token_count();
        let mut words = Vec::with_capacity(total);
        let mut sentnos = Vec::with_capacity(total);
        let mut begins = Vec::with_capacity(total);
        for (sentno, sentence) in doc.sentences() {
            for token in sentence.tree.tokens() {
                words.push(token.word().unwrap_or_default().to_string());
                sentnos.push(sentno);
                begins.push(token.begin());
            }
        }

        let mut builder = Builder {
            doc,
            words: &words,
            sentnos: &sentnos,
            labels: vec![None; total],
            quotations: Vec::new(),
        };
        let mut open: Option<Open> = None;
        let mut start = 0;

        for i in 0..total {
            let parbreak = doc.starts_paragraph(i);
            if open.is_some() && parbreak {
                open = None;
                builder.push(start, i, true);
            }
            let word = words[i].as_str();

            if open.is_none() && parbreak && word == "-" {
                builder.labels[i] = Some(QuoteLabel::Begin);
                start = i;
                match dash_turn_end(doc, sentnos[i]) {
                    Some(end) if end > start => {
                        builder.push(start, end, false);
                        for label in &mut builder.labels[start + 1..end] {
                            *label = Some(QuoteLabel::Inside);
                        }
                    }
                    _ => open = Some(Open::Paragraph),
                }
            } else if let (None, Some(close)) = (open, closer(word)) {
                builder.labels[i] = Some(QuoteLabel::Begin);
                open = Some(Open::Delimited(close));
                start = i;
            } else if matches!(open, Some(Open::Delimited(close)) if close == word) {
                builder.labels[i] = Some(QuoteLabel::Inside);
                open = None;
                let end = i + 1;
                let sent_bounds = begins[start] == 0
                    && (end == total || begins[end] == 0 || end + 1 >= total || begins[end + 1] == 0);
                builder.push(start, end, sent_bounds);
            } else if builder.labels[i].is_none() {
                builder.labels[i] = Some(if open.is_some() {
                    QuoteLabel::Inside
                } else {
                    QuoteLabel::Outside
                });
            }
        }
        if open.is_some() {
            builder.push(start, total, true);
        }

        tracing::debug!(quotations = builder.quotations.len(), "scanned quotations");
        QuoteScan {
            quotations: builder.quotations,
            labels: QuoteLabels::new(
                builder
                    .labels
                    .into_iter()
                    .map(|l| l.unwrap_or(QuoteLabel::Outside))
                    .collect(),
            ),
        }
    }
}

struct Builder<'a> {
    doc: &'a Document,
    words: &'a [String],
    sentnos: &'a [usize],
    labels: Vec<Option<QuoteLabel>>,
    quotations: Vec<Quotation>,
}

impl Builder<'_> {
    fn push(&mut self, start: usize, end: usize, sent_bounds: bool) {
        let sentno = self.sentnos[start];
        let parno = self
            .doc
            .sentence(sentno)
            .map_or(0, |sentence| sentence.id.paragraph);
        let text = self.words[start..end].join(" ");
        self.quotations
            .push(Quotation::new(start, end, sentno, parno, sent_bounds, text));
    }
}

/// End of the quoted nucleus in "- Ik kom, zei hij." style turns.
///
/// The reporting clause is an `sv1` tag of a discourse unit whose head is a
/// speech verb; the quotation then ends where the `nucl` sibling ends.
fn dash_turn_end(doc: &Document, sentno: usize) -> Option<usize> {
    let tree = doc.tree(sentno)?;
    let units = || {
        tree.root().children().filter(|n| n.is("cat", "du"))
    };
    let verb = units()
        .flat_map(|du| du.children())
        .filter(|n| n.is("cat", "sv1") && n.is("rel", "tag"))
        .flat_map(|tag| tag.children())
        .find(|n| n.is("rel", "hd"))?;
    if !verb.get("root").map_or(false, is_speech_verb) {
        return None;
    }
    let nucleus: NodeRef<'_> = units()
        .flat_map(|du| du.children())
        .find(|n| n.is("rel", "nucl"))?;

    let start = doc.sentence_start(sentno);
    let end = start + nucleus.end();
    let sentence_end = doc.sentence_end(sentno);
    if end > sentence_end {
        tracing::warn!(sentno, end, sentence_end, "dash turn nucleus ends past its sentence");
        return Some(sentence_end);
    }
    Some(end)
}
