//! Rule-based mention extraction.

use crate::head::{head_index, head_word};
use crate::{Mention, MentionId, MentionSpan};
use layered_coref::lexicon::{EDGE_PUNCTUATION, NON_REFERRING_HEADS};
use layered_coref::{
    CorefConfig, CorefResult, Document, FeatureLexicon, NodeRef, Number, ParseTree,
    PleonasticOracle,
};
use std::collections::HashSet;

/// Finds referring expressions in every sentence of a document.
///
/// Candidates are visited in a fixed order (noun phrases, multi-word names,
/// nouns, pronouns, numerals, determiners); a candidate whose head token was
/// already claimed by an earlier mention of the same sentence is skipped.
pub struct MentionExtractor<'r> {
    lexicon: &'r dyn FeatureLexicon,
    oracle: &'r dyn PleonasticOracle,
    config: CorefConfig,
}

impl<'r> MentionExtractor<'r> {
    pub fn new(lexicon: &'r dyn FeatureLexicon, oracle: &'r dyn PleonasticOracle) -> Self {
        Self {
            lexicon,
            oracle,
            config: CorefConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CorefConfig) -> Self {
        self.config = config;
        self
    }

    /// Extract mentions in document order; ids are assigned consecutively.
    pub fn extract(&self, doc: &Document) -> CorefResult<Vec<Mention>> {
        let mut mentions = Vec::new();
        for (sentno, sentence) in doc.sentences() {
            let mut covered = HashSet::new();
            for node in candidates(&sentence.tree) {
                self.consider(sentno, node, &mut covered, &mut mentions)?;
            }
        }
        tracing::debug!(mentions = mentions.len(), "extracted mentions");
        Ok(mentions)
    }

    fn consider(
        &self,
        sentno: usize,
        node: NodeRef<'_>,
        covered: &mut HashSet<usize>,
        mentions: &mut Vec<Mention>,
    ) -> CorefResult<()> {
        let tree = node.tree();
        let mut head_idx = head_index(node);
        let mut indices: Vec<usize> = node.words().iter().map(|w| w.begin()).collect();
        let (mut a, mut b) = match (indices.first(), indices.last()) {
            (Some(&first), Some(&last)) => (first, last + 1),
            _ => return Ok(()),
        };

        // punctuation attached to the top node that belongs inside the span
        for punct in tree.root().children().filter(|n| n.is("pt", "let")) {
            let i = punct.begin();
            if a < i
                && i < b
                && node.descendants().any(|n| {
                    n.begin() == i - 1
                        && (n.is("rel", "cnj") || n.is("pt", "adj") || n.is("neclass", "LOC"))
                })
            {
                indices.push(i);
            }
        }
        indices.sort_unstable();
        indices.dedup();
        if indices.len() != b - a {
            if let Some(gap) = (a..b).find(|i| indices.binary_search(i).is_err()) {
                b = gap;
            }
            head_idx = clamp_head(node, head_idx, b);
        }

        // cut off a relative clause
        let relative = node
            .children()
            .filter(|n| n.is("cat", "rel"))
            .flat_map(|n| n.children())
            .find(|n| n.is("wh", "rel"));
        if let Some(relative) = relative {
            if relative.begin() < b {
                b = relative.begin();
                head_idx = clamp_head(node, head_idx, b);
            }
        }

        // appositions become mentions of their own
        let mut node = node;
        if let (Some(first), Some(second)) = (node.child(0), node.child(1)) {
            if second.is("rel", "app") && !second.is("ntype", "eigen") && !second.is("pt", "spec") {
                node = first;
                b = b.min(first.end());
                head_idx = clamp_head(node, head_idx, b);
            }
        }

        if b <= a {
            return Ok(());
        }
        let mut tokens = tree.words(a, b);
        if tokens.first().map_or(false, |t| EDGE_PUNCTUATION.contains(&t.as_str())) {
            tokens.remove(0);
            a += 1;
        }
        if tokens.last().map_or(false, |t| EDGE_PUNCTUATION.contains(&t.as_str())) {
            tokens.pop();
            b -= 1;
        }
        if tokens.is_empty() {
            return Ok(());
        }

        let head = head_word(node, head_idx);
        if head.lemma().map_or(false, |l| NON_REFERRING_HEADS.contains(&l)) {
            return Ok(());
        }
        if node
            .lemma()
            .map_or(false, |l| self.config.is_pleonastic_candidate(l))
            && self.oracle.is_pleonastic(tree, node.id())
        {
            tracing::debug!(sentno, token = node.begin(), "skipping pleonastic pronoun");
            return Ok(());
        }
        if covered.contains(&head_idx) || is_non_referring(node, head, a) {
            return Ok(());
        }

        let span = MentionSpan {
            node,
            begin: a,
            end: b,
            head_index: head_idx,
            tokens: tokens.clone(),
        };
        mentions.push(Mention::new(MentionId(mentions.len()), sentno, span, self.lexicon)?);
        covered.insert(head_idx);

        let comma = tokens.iter().position(|t| t == ",");
        if node.is("cat", "mwu") && head.is("neclass", "LOC") && comma.is_some() {
            // "Amsterdam, Nederland": the part after the comma is a location too
            if let Some(comma) = comma.filter(|&c| c + 1 < tokens.len()) {
                let span = MentionSpan {
                    node,
                    begin: a + comma + 1,
                    end: b,
                    head_index: b - 1,
                    tokens: tokens[comma + 1..].to_vec(),
                };
                mentions.push(Mention::new(MentionId(mentions.len()), sentno, span, self.lexicon)?);
            }
        } else if node.child_count() > 1 && node.child(0).map_or(false, |c| c.is("rel", "cnj")) {
            if let Some(coordination) = mentions.last_mut() {
                coordination.features.number = Some(Number::Plural);
            }
            for conjunct in node.children().filter(|c| c.is("rel", "cnj")) {
                let conjunct_head = head_index(conjunct);
                let tokens = tree.words(conjunct.begin(), conjunct.end());
                if tokens.is_empty() || !covered.insert(conjunct_head) {
                    continue;
                }
                let span = MentionSpan {
                    node: conjunct,
                    begin: conjunct.begin(),
                    end: conjunct.end(),
                    head_index: conjunct_head,
                    tokens,
                };
                mentions.push(Mention::new(MentionId(mentions.len()), sentno, span, self.lexicon)?);
            }
        }

        Ok(())
    }
}

/// Node patterns that make a mention candidate, in the order they are tried.
#[derive(Debug, Clone, Copy)]
enum Candidate {
    NounPhrase,
    MultiWordName,
    Noun,
    Pronoun,
    Numeral,
    Determiner,
}

impl Candidate {
    const ORDER: [Candidate; 6] = [
        Candidate::NounPhrase,
        Candidate::MultiWordName,
        Candidate::Noun,
        Candidate::Pronoun,
        Candidate::Numeral,
        Candidate::Determiner,
    ];

    fn matches(self, n: &NodeRef<'_>) -> bool {
        let rel_except = |excluded: &[&str]| n.rel().map_or(false, |rel| !excluded.contains(&rel));
        match self {
            Candidate::NounPhrase => n.is("cat", "np"),
            Candidate::MultiWordName => {
                n.is("cat", "mwu") && n.children().any(|c| c.is("pt", "spec"))
            }
            Candidate::Noun => {
                n.is("pt", "n")
                    && (n.is("ntype", "eigen") || n.is_any("rel", &["su", "obj1", "body"]))
            }
            Candidate::Pronoun => n.is("pdtype", "pron") || n.is("vwtype", "bez"),
            Candidate::Numeral => n.is("pt", "num") && rel_except(&["det", "mod"]),
            Candidate::Determiner => n.is("pt", "det") && rel_except(&["det"]),
        }
    }
}

/// Candidate nodes in the order they are considered.
fn candidates(tree: &ParseTree) -> Vec<NodeRef<'_>> {
    let nodes: Vec<NodeRef<'_>> = tree.nodes().collect();
    Candidate::ORDER
        .iter()
        .flat_map(|kind| nodes.iter().copied().filter(move |n| kind.matches(n)))
        .collect()
}

/// Right-most word before `end` when the head fell outside a truncated span.
fn clamp_head(node: NodeRef<'_>, head_idx: usize, end: usize) -> usize {
    if head_idx < end {
        return head_idx;
    }
    node.words()
        .iter()
        .map(|w| w.begin())
        .filter(|&i| i < end)
        .max()
        .unwrap_or(head_idx)
}

/// Measure phrases, numerals, determiners, quantifiers, temporal expressions
/// and verbal heads do not refer to entities.
fn is_non_referring(node: NodeRef<'_>, head: NodeRef<'_>, begin: usize) -> bool {
    node.is("num", "meas")
        || node.children().any(|c| c.is("pt", "tw"))
        || (node.is("cat", "np") && node.is("rel", "det"))
        || node
            .descendants()
            .any(|n| n.begin() == begin && n.is_any("vwtype", &["onbep", "vb"]))
        || node.is_any("vwtype", &["onbep", "vb"])
        || head.is("special", "tmp")
        || node.is("special", "tmp")
        || node.children().any(|c| c.is("sc", "noun_prep"))
        || head.is("pt", "ww")
}
