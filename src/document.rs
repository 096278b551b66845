//! Document-level abstractions.
//!
//! A [`Document`] is an ordered list of parsed sentences, each tagged with
//! its paragraph and its position inside that paragraph. Token positions are
//! addressed either per sentence ([`DocPosition`]) or by a single global
//! index that runs across the whole document; quotation detection works on
//! the latter.

use crate::{CorefResult, ParseTree};
use serde::{Deserialize, Serialize};

/// Paragraph and sentence numbers as they appear in sentence identifiers.
///
/// Sentence numbers are 1-based within their paragraph. Documents without
/// paragraph information use paragraph 0 throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SentenceId {
    pub paragraph: usize,
    pub sentence: usize,
}

impl SentenceId {
    pub fn new(paragraph: usize, sentence: usize) -> Self {
        Self {
            paragraph,
            sentence,
        }
    }

    /// The first sentence of a paragraph.
    pub fn starts_paragraph(&self) -> bool {
        self.sentence == 1
    }
}

/// Position within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocPosition {
    /// Sentence index (0-based, document order)
    pub sentence: usize,
    /// Token index within that sentence
    pub token: usize,
}

impl DocPosition {
    pub fn new(sentence: usize, token: usize) -> Self {
        Self { sentence, token }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: SentenceId,
    pub tree: ParseTree,
}

impl Sentence {
    pub fn new(id: SentenceId, tree: ParseTree) -> Self {
        Self { id, tree }
    }
}

/// An ordered sequence of parsed sentences.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "Vec<Sentence>", into = "Vec<Sentence>")]
pub struct Document {
    sentences: Vec<Sentence>,
    /// Global index of each sentence's first token, plus the total at the end.
    offsets: Vec<usize>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("sentence_count", &self.sentences.len())
            .field("token_count", &self.token_count())
            .finish()
    }
}

impl From<Vec<Sentence>> for Document {
    fn from(sentences: Vec<Sentence>) -> Self {
        Self::new(sentences)
    }
}

impl From<Document> for Vec<Sentence> {
    fn from(doc: Document) -> Self {
        doc.sentences
    }
}

impl std::ops::Index<usize> for Document {
    type Output = ParseTree;

    /// Tree of sentence `index`.
    ///
    /// # Panics
    ///
    /// When `index` is out of range; use [`Document::tree`] for indices that
    /// did not come from this document.
    fn index(&self, index: usize) -> &ParseTree {
        &self.sentences[index].tree
    }
}

impl Document {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        let mut offsets = Vec::with_capacity(sentences.len() + 1);
        let mut total = 0;
        for sentence in &sentences {
            offsets.push(total);
            total += sentence.tree.token_count();
        }
        offsets.push(total);
        Self { sentences, offsets }
    }

    /// Convenience constructor for a single paragraph of trees.
    pub fn from_trees(trees: impl IntoIterator<Item = ParseTree>) -> Self {
        Self::new(
            trees
                .into_iter()
                .enumerate()
                .map(|(n, tree)| Sentence::new(SentenceId::new(1, n + 1), tree))
                .collect(),
        )
    }

    /// Validate every tree, reporting the first malformed sentence.
    pub fn validate(&self) -> CorefResult<()> {
        self.sentences
            .iter()
            .enumerate()
            .try_for_each(|(n, sentence)| sentence.tree.validate(n))
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    pub fn sentences(&self) -> impl Iterator<Item = (usize, &Sentence)> {
        self.sentences.iter().enumerate()
    }

    /// Tree of sentence `index`, if there is one.
    pub fn tree(&self, index: usize) -> Option<&ParseTree> {
        self.sentences.get(index).map(|sentence| &sentence.tree)
    }

    pub fn token_count(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Global index of a sentence-relative position.
    pub fn global_index(&self, pos: DocPosition) -> usize {
        self.offsets[pos.sentence] + pos.token
    }

    /// Sentence-relative position of a global token index.
    pub fn position(&self, global: usize) -> Option<DocPosition> {
        if global >= self.token_count() {
            return None;
        }
        // offsets is sorted; the last offset <= global wins, skipping empty sentences
        let sentence = self.offsets.partition_point(|&start| start <= global) - 1;
        Some(DocPosition::new(sentence, global - self.offsets[sentence]))
    }

    /// Global index of the first token of a sentence.
    pub fn sentence_start(&self, sentence: usize) -> usize {
        self.offsets[sentence]
    }

    /// Global index one past the last token of a sentence.
    pub fn sentence_end(&self, sentence: usize) -> usize {
        self.offsets[sentence + 1]
    }

    /// Whether the token at `global` opens a paragraph.
    pub fn starts_paragraph(&self, global: usize) -> bool {
        self.position(global).map_or(false, |pos| {
            pos.token == 0 && self.sentences[pos.sentence].id.starts_paragraph()
        })
    }
}
