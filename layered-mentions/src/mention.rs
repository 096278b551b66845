//! The mention type: a token span referring to an entity.

use crate::detect::detect_features;
use crate::head::head_word;
use layered_coref::{CorefResult, Document, FeatureLexicon, Features, NodeId, NodeRef, Person};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Identifier of a mention; also names the cluster it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MentionId(pub usize);

impl MentionId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MentionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MentionType {
    /// Proper name: head is tagged `eigen` or is a special token.
    Name,
    /// Common noun phrase.
    Noun,
    /// Personal, demonstrative or possessive pronoun.
    Pronoun,
}

impl fmt::Display for MentionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MentionType::Name => "name",
            MentionType::Noun => "noun",
            MentionType::Pronoun => "pronoun",
        })
    }
}

/// The span and tree node a mention is built from.
#[derive(Debug, Clone)]
pub struct MentionSpan<'t> {
    pub node: NodeRef<'t>,
    pub begin: usize,
    pub end: usize,
    pub head_index: usize,
    pub tokens: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Mention {
    pub id: MentionId,
    /// Sentence index in the document.
    pub sentno: usize,
    /// First token (inclusive) within the sentence.
    pub begin: usize,
    /// Last token (exclusive) within the sentence.
    pub end: usize,
    /// Node the mention was extracted from.
    pub node: NodeId,
    /// Word node of the syntactic head.
    pub head: NodeId,
    pub head_index: usize,
    pub tokens: Vec<String>,
    /// Tokens without post-head modifiers and appositions.
    pub relaxed_tokens: Vec<String>,
    pub kind: MentionType,
    /// Modifier and content words, used by strict head matching.
    pub main_mods: Vec<String>,
    pub features: Features,
    pub cluster_id: MentionId,
    /// Mentions this one may never corefer with.
    pub prohibit: BTreeSet<MentionId>,
    pub antecedent: Option<MentionId>,
    /// Name of the sieve that linked this mention to its antecedent.
    pub sieve: Option<&'static str>,
    /// Dropped from output by an exclusion filter.
    pub filtered: bool,
}

impl Mention {
    pub fn new(
        id: MentionId,
        sentno: usize,
        span: MentionSpan<'_>,
        lexicon: &dyn FeatureLexicon,
    ) -> CorefResult<Mention> {
        let MentionSpan {
            node,
            begin,
            end,
            head_index,
            tokens,
        } = span;
        let tree = node.tree();
        let head = head_word(node, head_index);

        let removed: HashSet<usize> = node
            .descendants()
            .filter(|n| n.is_any("rel", &["app", "mod"]))
            .flat_map(|n| n.begin()..n.end())
            .filter(|&i| i > head_index)
            .collect();
        let mut relaxed_tokens: Vec<String> = tree
            .tokens()
            .into_iter()
            .filter(|t| begin <= t.begin() && t.begin() < end && !removed.contains(&t.begin()))
            .filter_map(|t| t.word().map(str::to_string))
            .collect();
        if relaxed_tokens.is_empty() {
            relaxed_tokens = tokens.clone();
        }

        let kind = if node.is("pdtype", "pron") || node.is("vwtype", "bez") {
            MentionType::Pronoun
        } else if head.is("ntype", "eigen") || head.is("pt", "spec") {
            MentionType::Name
        } else {
            MentionType::Noun
        };

        let main_mods = node
            .words()
            .into_iter()
            .filter(|w| {
                w.is("rel", "mod")
                    || (w.is_any("pt", &["adj", "n"]) && begin <= w.begin() && w.begin() < end)
            })
            .filter_map(|w| w.word().map(str::to_string))
            .collect();

        let features = detect_features(sentno, head, kind, &tokens, lexicon)?;

        Ok(Mention {
            id,
            sentno,
            begin,
            end,
            node: node.id(),
            head: head.id(),
            head_index,
            tokens,
            relaxed_tokens,
            kind,
            main_mods,
            features,
            cluster_id: id,
            prohibit: BTreeSet::new(),
            antecedent: None,
            sieve: None,
            filtered: false,
        })
    }

    pub fn is_pronoun(&self) -> bool {
        self.kind == MentionType::Pronoun
    }

    /// First- or second-person pronoun.
    pub fn is_participant(&self) -> bool {
        self.is_pronoun() && self.features.person.map_or(false, Person::is_participant)
    }

    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }

    /// The node the mention was extracted from.
    ///
    /// # Panics
    ///
    /// When `doc` is not the document the mention was extracted from.
    pub fn node_ref<'d>(&self, doc: &'d Document) -> NodeRef<'d> {
        doc[self.sentno].node(self.node)
    }

    pub fn head_ref<'d>(&self, doc: &'d Document) -> NodeRef<'d> {
        doc[self.sentno].node(self.head)
    }

    pub fn head_text<'d>(&self, doc: &'d Document) -> &'d str {
        self.head_ref(doc).word().unwrap_or_default()
    }

    /// Possessive pronouns ("zijn", "haar") relate to their antecedent differently.
    pub fn is_possessive(&self, doc: &Document) -> bool {
        self.head_ref(doc).is("vwtype", "bez")
    }

    /// Global token index of the first token.
    pub fn global_begin(&self, doc: &Document) -> usize {
        doc.sentence_start(self.sentno) + self.begin
    }

    /// Global token index of the last token.
    pub fn global_last(&self, doc: &Document) -> usize {
        doc.sentence_start(self.sentno) + self.end.saturating_sub(1)
    }

    pub fn global_head(&self, doc: &Document) -> usize {
        doc.sentence_start(self.sentno) + self.head_index
    }

    /// Same sentence and the spans touch or nest (end points inclusive).
    pub fn overlaps(&self, other: &Mention) -> bool {
        let within = |x: usize, lo: usize, hi: usize| lo <= x && x <= hi;
        self.sentno == other.sentno
            && (within(other.begin, self.begin, self.end)
                || within(other.end, self.begin, self.end)
                || within(self.begin, other.begin, other.end)
                || within(self.end, other.begin, other.end))
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {} {} s{}:{}..{}",
            self.id,
            self.text(),
            self.kind,
            self.features,
            self.sentno,
            self.begin,
            self.end
        )
    }
}
