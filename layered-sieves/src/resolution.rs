//! The output of a resolver run.

use crate::Clusters;
use layered_coref::{DisplayLink, Document, LinkTarget, SpanDisplay};
use layered_mentions::{Mention, MentionId};
use layered_quotations::{QuoteLabel, QuoteScan, Quotation};
use serde::Serialize;
use std::collections::BTreeSet;

/// Per-token quotation data, indexed by global token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenAnnotation {
    pub label: QuoteLabel,
    /// Final cluster of the enclosing quotation's speaker.
    pub speaker: Option<MentionId>,
    pub addressee: Option<MentionId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub mentions: Vec<Mention>,
    pub clusters: Clusters,
    pub quotations: Vec<Quotation>,
    pub annotations: Vec<TokenAnnotation>,
}

impl Resolution {
    pub(crate) fn new(mentions: Vec<Mention>, clusters: Clusters, scan: QuoteScan) -> Self {
        let QuoteScan { quotations, labels } = scan;
        let cluster_of = |m: Option<MentionId>| m.map(|m| mentions[m.index()].cluster_id);
        let annotations = labels
            .iter()
            .enumerate()
            .map(|(global, label)| {
                let quotation = quotations.iter().find(|q| q.contains(global));
                TokenAnnotation {
                    label,
                    speaker: quotation.and_then(|q| cluster_of(q.speaker)),
                    addressee: quotation.and_then(|q| cluster_of(q.addressee)),
                }
            })
            .collect();
        Self {
            mentions,
            clusters,
            quotations,
            annotations,
        }
    }

    /// Live clusters as (representative, members).
    pub fn clusters(&self) -> impl Iterator<Item = (MentionId, &BTreeSet<MentionId>)> + '_ {
        self.clusters.iter()
    }

    /// Every recorded link as (antecedent, mention, sieve).
    pub fn links(&self) -> impl Iterator<Item = (MentionId, MentionId, &'static str)> + '_ {
        self.mentions.iter().filter_map(|m| {
            let antecedent = m.antecedent?;
            Some((antecedent, m.id, m.sieve.unwrap_or("unknown")))
        })
    }

    pub fn mention(&self, id: MentionId) -> &Mention {
        &self.mentions[id.index()]
    }

    /// Mentions that survived the output exclusions.
    pub fn visible_mentions(&self) -> impl Iterator<Item = &Mention> + '_ {
        self.mentions.iter().filter(|m| !m.filtered)
    }

    /// Render one sentence with its mentions underlined.
    ///
    /// Each mention is labelled `#id kind cluster=#rep`; a mention linked to
    /// an antecedent gets an arrow named after the sieve, pointing at the
    /// antecedent span when it is in the same sentence. `None` when the
    /// document has no sentence `sentno`.
    pub fn sentence_display(&self, doc: &Document, sentno: usize) -> Option<SpanDisplay> {
        let tree = doc.tree(sentno)?;
        let mut display = SpanDisplay::new(tree.words(0, tree.token_count()));
        for mention in self.mentions.iter().filter(|m| m.sentno == sentno) {
            let label = format!("{} {} cluster={}", mention.id, mention.kind, mention.cluster_id);
            let links = match (mention.antecedent, mention.sieve) {
                (Some(antecedent), Some(sieve)) => {
                    let other = self.mention(antecedent);
                    let target = if other.sentno == sentno {
                        LinkTarget::Span((other.begin, other.end - 1))
                    } else {
                        LinkTarget::External(format!("{} (s{})", other.id, other.sentno))
                    };
                    vec![DisplayLink {
                        label: sieve.to_string(),
                        target,
                    }]
                }
                _ => Vec::new(),
            };
            display.include_linked((mention.begin, mention.end - 1), label, links);
        }
        Some(display)
    }

    /// Quote label of a global token; `O` past the end.
    pub fn label(&self, global: usize) -> QuoteLabel {
        self.annotations
            .get(global)
            .map_or(QuoteLabel::Outside, |a| a.label)
    }
}
