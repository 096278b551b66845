//! Speaker and addressee attribution.

use crate::{QuoteLabel, QuoteScan, Quotation};
use layered_coref::lexicon::is_speech_verb;
use layered_coref::{CorefConfig, Document};
use layered_mentions::{Mention, MentionId};

/// Attaches speakers and addressees to quotations and collects the
/// mentions inside each quotation.
///
/// Runs after mention extraction and before clustering, so names are
/// compared by surface tokens rather than by cluster.
#[derive(Debug, Clone)]
pub struct SpeakerAttribution {
    speaker_window: usize,
    turn_window: usize,
}

impl SpeakerAttribution {
    pub fn new(config: &CorefConfig) -> Self {
        Self {
            speaker_window: config.speaker_window,
            turn_window: config.turn_window,
        }
    }

    pub fn attribute(&self, doc: &Document, mentions: &[Mention], scan: &mut QuoteScan) {
        if scan.quotations.is_empty() {
            return;
        }
        for mention in mentions {
            if is_speaker(doc, mention, scan) {
                self.attach_reported_speaker(doc, mention, &mut scan.quotations);
            }
        }
        self.propagate_turns(mentions, &mut scan.quotations);
        attach_nearest_human(doc, mentions, &mut scan.quotations);

        for mention in mentions {
            let head = mention.global_head(doc);
            if let Some(q) = scan.quotations.iter_mut().find(|q| q.contains(head)) {
                q.mentions.push(mention.id);
            }
        }

        let unattributed = scan.quotations.iter().filter(|q| q.speaker.is_none()).count();
        tracing::debug!(
            quotations = scan.quotations.len(),
            unattributed,
            "attributed speakers"
        );
    }

    /// Link a reporting subject to the closest quotation in its sentence,
    /// preferring one that ends right before it.
    fn attach_reported_speaker(&self, doc: &Document, mention: &Mention, quotations: &mut [Quotation]) {
        let i = mention.global_begin(doc);
        let sentence_start = doc.sentence_start(mention.sentno);
        let sentence_end = doc.sentence_end(mention.sentno);

        let before = quotations.partition_point(|q| q.end <= i);
        if let Some(q) = before.checked_sub(1).map(|idx| &mut quotations[idx]) {
            if sentence_start < q.end
                && q.end <= sentence_end
                && i - q.end <= self.speaker_window
                && q.speaker.is_none()
            {
                tracing::debug!(mention = %mention, quotation = %q.text, "speaker after quotation");
                q.speaker = Some(mention.id);
                return;
            }
        }

        let after = quotations.partition_point(|q| q.start <= i);
        if let Some(q) = quotations.get_mut(after) {
            if sentence_start <= q.start
                && q.start < sentence_end
                && q.start - i <= self.speaker_window
                && q.speaker.is_none()
            {
                tracing::debug!(mention = %mention, quotation = %q.text, "speaker before quotation");
                q.speaker = Some(mention.id);
            }
        }
    }

    /// Carry speakers across consecutive quotations.
    fn propagate_turns(&self, mentions: &[Mention], quotations: &mut [Quotation]) {
        for k in 1..quotations.len() {
            let (done, rest) = quotations.split_at_mut(k);
            let prev = &mut done[k - 1];
            let q = &mut rest[0];

            match (prev.speaker, q.speaker) {
                // same speaker continues after material outside the quotes:
                // "Ik weet het niet", zei hij. "Het lijkt me geen goed idee."
                (Some(_), None)
                    if q.parno == prev.parno
                        && q.sentno <= prev.sentno + 1
                        && !prev.sent_bounds =>
                {
                    q.speaker = prev.speaker;
                    q.addressee = prev.addressee;
                }
                // turn taking across paragraphs or bare quotations
                (Some(_), None) if q.parno == prev.parno + 1 || prev.sent_bounds => {
                    q.speaker = prev.addressee;
                    q.addressee = prev.speaker;
                }
                (Some(prev_speaker), Some(speaker))
                    if q.start.saturating_sub(prev.end) < self.turn_window
                        && mentions[speaker.index()].tokens != mentions[prev_speaker.index()].tokens =>
                {
                    q.addressee = Some(prev_speaker);
                    prev.addressee = Some(speaker);
                }
                _ => continue,
            }
            if q.speaker.is_some() && q.speaker == q.addressee {
                q.addressee = None;
            }
            if prev.speaker.is_some() && prev.speaker == prev.addressee {
                prev.addressee = None;
            }
        }
    }
}

/// Subject of a reported-speech verb, outside quoted speech.
pub fn is_speaker(doc: &Document, mention: &Mention, scan: &QuoteScan) -> bool {
    let node = mention.node_ref(doc);
    if !node.is("rel", "su") || scan.labels.get(mention.global_head(doc)) == QuoteLabel::Inside {
        return false;
    }
    let parent = match node.parent() {
        Some(parent) => parent,
        None => return false,
    };
    let participle_head = parent
        .children()
        .filter(|n| n.is("cat", "ppart"))
        .flat_map(|n| n.children())
        .find(|n| n.is("rel", "hd"));
    let head = participle_head.or_else(|| parent.find_child(|n| n.is("rel", "hd")));
    head.and_then(|h| h.get("root")).map_or(false, is_speech_verb)
}

/// A bare quotation with no attributed speaker is spoken by the last human
/// mention of the previous sentence, unless an earlier quotation intervenes.
fn attach_nearest_human(doc: &Document, mentions: &[Mention], quotations: &mut [Quotation]) {
    let mut humans: Vec<(usize, MentionId)> = mentions
        .iter()
        .filter(|m| m.features.human == Some(true) && !m.is_possessive(doc))
        .map(|m| (m.global_last(doc), m.id))
        .collect();
    humans.sort_unstable();

    for k in 0..quotations.len() {
        if quotations[k].speaker.is_some() || !quotations[k].sent_bounds {
            continue;
        }
        let start = quotations[k].start;
        let prev_end = k.checked_sub(1).map(|p| quotations[p].end);
        let nearest = humans
            .partition_point(|&(last, _)| last < start)
            .checked_sub(1)
            .map(|idx| &mentions[humans[idx].1.index()]);
        if let Some(m) = nearest {
            if m.sentno + 1 == quotations[k].sentno
                && prev_end.map_or(true, |end| end <= m.global_begin(doc))
            {
                quotations[k].speaker = Some(m.id);
                tracing::debug!(mention = %m, quotation = %quotations[k], "speaker from previous sentence");
            }
        }
    }
}
