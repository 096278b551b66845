use crate::{CorefState, Sieve, SieveContext};
use layered_coref::{CorefResult, NodeRef, Number, Person};
use layered_mentions::{Mention, MentionId};
use layered_quotations::QuoteLabel;
use std::collections::BTreeMap;

const CLAUSE_CATS: &[&str] = &["smain", "ssub", "sv1", "inf"];

/// Resolves pronouns: participants by person and number, third person
/// against the closest compatible antecedent, and quoted "ik" and "jij"
/// against the speaker and addressee of their quotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PronounResolution;

impl Sieve for PronounResolution {
    fn name(&self) -> &'static str {
        "pronouns"
    }

    fn apply(&self, ctx: &SieveContext<'_>, mut state: CorefState) -> CorefResult<CorefState> {
        self.link_participants(ctx, &mut state)?;
        self.link_third_person(ctx, &mut state)?;
        self.link_quoted(ctx, &mut state)?;
        Ok(state)
    }
}

fn person_number(mention: &Mention) -> Option<(Person, Number)> {
    Some((mention.features.person?, mention.features.number?))
}

/// Merge each group into its first member, skipping prohibited pairs.
fn merge_groups(
    state: &mut CorefState,
    groups: BTreeMap<(Person, Number), Vec<MentionId>>,
    sieve: &'static str,
) -> CorefResult<()> {
    for members in groups.values() {
        if let Some((&first, rest)) = members.split_first() {
            for &m in rest {
                if !state.prohibited(first, m) {
                    state.merge(first, m, sieve)?;
                }
            }
        }
    }
    Ok(())
}

impl PronounResolution {
    /// Outside quotations, every "ik" is the narrator and every "jij" the
    /// reader.
    fn link_participants(&self, ctx: &SieveContext<'_>, state: &mut CorefState) -> CorefResult<()> {
        let mut groups: BTreeMap<(Person, Number), Vec<MentionId>> = BTreeMap::new();
        for mention in &state.mentions {
            if !mention.is_participant()
                || ctx.quotes.labels.get(mention.global_head(ctx.doc)) != QuoteLabel::Outside
            {
                continue;
            }
            if let Some(key) = person_number(mention) {
                groups.entry(key).or_default().push(mention.id);
            }
        }
        merge_groups(state, groups, self.name())
    }

    fn link_third_person(&self, ctx: &SieveContext<'_>, state: &mut CorefState) -> CorefResult<()> {
        let order = candidate_order(ctx, &state.mentions);
        for n in 0..state.mentions.len() {
            let id = MentionId(n);
            let mention = state.mention(id);
            if !mention.is_pronoun()
                || mention.is_participant()
                || state.cluster_size(id) > 1
            {
                continue;
            }
            if let Some(antecedent) = self.find_antecedent(ctx, state, id, &order) {
                state.merge(antecedent, id, self.name())?;
            }
        }
        Ok(())
    }

    fn find_antecedent(
        &self,
        ctx: &SieveContext<'_>,
        state: &mut CorefState,
        id: MentionId,
        order: &[MentionId],
    ) -> Option<MentionId> {
        let (sentno, window) = (state.mention(id).sentno, ctx.config.pronoun_window);
        let possessive = state.mention(id).is_possessive(ctx.doc);
        let upto = order.partition_point(|o| state.mention(*o).sentno <= sentno);

        for &candidate in order[..upto].iter().rev() {
            let (mention, other) = (state.mention(id), state.mention(candidate));
            if other.sentno + window < sentno {
                break;
            }
            if candidate == id {
                continue;
            }
            if other.sentno == sentno {
                if other.begin >= mention.begin || (!possessive && other.end >= mention.end) {
                    continue;
                }
                if !possessive && coarguments(mention.node_ref(ctx.doc), other.node_ref(ctx.doc)) {
                    state.prohibit(id, candidate);
                    continue;
                }
            }
            if mention.features.compatible(&other.features) && !state.prohibited(candidate, id) {
                return Some(candidate);
            }
        }
        None
    }

    /// Inside a quotation, same person and number means the same referent;
    /// first person singular is the speaker and second person singular the
    /// addressee.
    fn link_quoted(&self, ctx: &SieveContext<'_>, state: &mut CorefState) -> CorefResult<()> {
        for quotation in &ctx.quotes.quotations {
            let mut groups: BTreeMap<(Person, Number), Vec<MentionId>> = BTreeMap::new();
            for &m in &quotation.mentions {
                let mention = state.mention(m);
                if !mention.is_participant() {
                    continue;
                }
                if let Some(key) = person_number(mention) {
                    groups.entry(key).or_default().push(m);
                }
            }
            let bindings = [
                ((Person::First, Number::Singular), quotation.speaker),
                ((Person::Second, Number::Singular), quotation.addressee),
            ];
            for (key, target) in bindings {
                let first = groups.get(&key).and_then(|members| members.first().copied());
                if let (Some(first), Some(target)) = (first, target) {
                    if first != target && !state.prohibited(target, first) {
                        state.merge(target, first, self.name())?;
                    }
                }
            }
            merge_groups(state, groups, self.name())?;
        }
        Ok(())
    }
}

/// Mention ids sorted so that a backward scan visits, per sentence,
/// subjects first, then direct objects, then the rest right to left.
fn candidate_order(ctx: &SieveContext<'_>, mentions: &[Mention]) -> Vec<MentionId> {
    let mut order: Vec<(usize, bool, bool, usize, MentionId)> = mentions
        .iter()
        .map(|m| {
            let node = m.node_ref(ctx.doc);
            let object = node.is("rel", "obj1") && !node.parent().map_or(false, |p| p.is("cat", "pp"));
            (m.sentno, node.is("rel", "su"), object, m.begin, m.id)
        })
        .collect();
    order.sort_unstable();
    order.into_iter().map(|(.., id)| id).collect()
}

fn clause_of(node: NodeRef<'_>) -> Option<NodeRef<'_>> {
    node.ancestor_or_self(|n| n.is_any("cat", CLAUSE_CATS))
}

/// Arguments of the same clause, directly or through a coindexed trace
/// ("Jan hoopt hem te zien").
fn coarguments(pronoun: NodeRef<'_>, other: NodeRef<'_>) -> bool {
    let same_clause = match (clause_of(pronoun), clause_of(other)) {
        (Some(a), Some(b)) if a == b => true,
        (Some(a), Some(_)) => other
            .get("index")
            .map_or(false, |index| a.children().any(|c| c.is("index", index))),
        _ => false,
    };
    same_clause
        && other
            .parent()
            .map_or(false, |parent| pronoun.is_descendant_of(parent.id()))
}
