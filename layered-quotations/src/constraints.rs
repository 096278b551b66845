//! Coreference prohibitions derived from quoted speech.

use crate::Quotation;
use layered_coref::{Number, Person};
use layered_mentions::{Mention, MentionId};

const PERSON_NUMBER: [(Person, Number); 4] = [
    (Person::First, Number::Singular),
    (Person::First, Number::Plural),
    (Person::Second, Number::Singular),
    (Person::Second, Number::Plural),
];

fn has(mention: &Mention, person: Person, number: Number) -> bool {
    mention.features.person == Some(person) && mention.features.number == Some(number)
}

fn prohibit(mentions: &mut [Mention], a: MentionId, b: MentionId) {
    if a != b {
        mentions[a.index()].prohibit.insert(b);
        mentions[b.index()].prohibit.insert(a);
    }
}

/// Record which mentions may never end up in the same cluster because of
/// who is speaking. Prohibitions are stored on both mentions.
pub fn apply_quotation_constraints(quotations: &[Quotation], mentions: &mut [Mention]) {
    let mut added = 0usize;
    let mut add = |mentions: &mut [Mention], a: MentionId, b: MentionId| {
        prohibit(mentions, a, b);
        added += 1;
    };

    for (k, q) in quotations.iter().enumerate() {
        let nominals: Vec<MentionId> = q
            .mentions
            .iter()
            .copied()
            .filter(|m| !mentions[m.index()].is_pronoun())
            .collect();

        for &m in &q.mentions {
            let mention = &mentions[m.index()];
            let pronoun = mention.is_pronoun();
            let participant = mention.is_participant();
            let is_i = pronoun && has(mention, Person::First, Number::Singular);
            let is_you = pronoun && has(mention, Person::Second, Number::Singular);

            // "ik", "jij" and "wij" are never one of the names inside the same turn
            if participant {
                for &nominal in &nominals {
                    add(mentions, m, nominal);
                }
            }
            if let Some(speaker) = q.speaker.filter(|&s| s != m && !is_i) {
                add(mentions, m, speaker);
            }
            if let Some(addressee) = q.addressee.filter(|&a| a != m && !is_you) {
                add(mentions, m, addressee);
            }
        }

        let prev = k.checked_sub(1).map(|p| &quotations[p]);
        for (person, number) in PERSON_NUMBER {
            let group: Vec<MentionId> = q
                .mentions
                .iter()
                .copied()
                .filter(|m| has(&mentions[m.index()], person, number))
                .collect();

            // pronouns of another person or number within the quotation
            for &a in &group {
                for &b in &q.mentions {
                    let other = &mentions[b.index()];
                    if other.is_pronoun() && !has(other, person, number) {
                        add(mentions, a, b);
                    }
                }
            }

            // "ik" in one turn and "ik" in the reply are different people
            if let Some(prev) = prev.filter(|p| number == Number::Singular && p.speaker != q.speaker) {
                for &a in &group {
                    for &b in &prev.mentions {
                        if mentions[b.index()].features.person == Some(person) {
                            add(mentions, a, b);
                        }
                    }
                }
            }
        }
    }

    tracing::debug!(prohibitions = added, "applied quotation constraints");
}
