use crate::sieve::{can_seed, content_tokens, pooled_tokens};
use crate::{CorefState, Sieve, SieveContext};
use layered_coref::CorefResult;
use layered_mentions::{Mention, MentionId};

/// Which checks strict head matching combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Word inclusion and compatible modifiers.
    Both,
    /// Word inclusion only.
    WordInclusion,
    /// Compatible modifiers only.
    Modifiers,
}

/// Links a cluster to an earlier one when their head words agree and the
/// later mention adds no new content.
#[derive(Debug, Clone, Copy)]
pub struct StrictHeadMatch {
    strictness: Strictness,
}

impl StrictHeadMatch {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }
}

impl Sieve for StrictHeadMatch {
    fn name(&self) -> &'static str {
        match self.strictness {
            Strictness::Both => "strict_head_match:5",
            Strictness::WordInclusion => "strict_head_match:6",
            Strictness::Modifiers => "strict_head_match:7",
        }
    }

    fn apply(&self, ctx: &SieveContext<'_>, mut state: CorefState) -> CorefResult<CorefState> {
        for slot in 0..state.mentions.len() {
            let id = MentionId(slot);
            if !state.is_representative(id)
                || state.mention(id).is_pronoun()
                || !can_seed(ctx, &state, id)
            {
                continue;
            }
            for other_slot in 0..slot {
                let candidate = MentionId(other_slot);
                if !state.is_representative(candidate) || state.same_cluster(id, candidate) {
                    continue;
                }
                if !can_seed(ctx, &state, candidate) {
                    continue;
                }
                if self.matches(ctx, &state, id, candidate) {
                    state.merge(candidate, id, self.name())?;
                }
            }
        }
        Ok(state)
    }
}

impl StrictHeadMatch {
    /// Whether mention `id` fits the cluster represented by `candidate`.
    fn matches(&self, ctx: &SieveContext<'_>, state: &CorefState, id: MentionId, candidate: MentionId) -> bool {
        let mention = state.mention(id);
        let members: Vec<&Mention> = state
            .cluster_of(candidate)
            .iter()
            .map(|m| state.mention(*m))
            .collect();
        let head = mention.head_text(ctx.doc);
        if !members.iter().any(|other| other.head_text(ctx.doc) == head)
            || members.iter().any(|other| mention.overlaps(other))
        {
            return false;
        }

        let word_inclusion = || {
            if state.mention(candidate).is_pronoun() {
                return false;
            }
            let content = content_tokens(&mention.tokens);
            !content.is_empty() && content.is_subset(&pooled_tokens(state, candidate))
        };
        let compatible_modifiers = || {
            members.iter().any(|other| {
                !other.is_pronoun()
                    && mention
                        .main_mods
                        .iter()
                        .all(|m| other.tokens.iter().any(|t| t == m))
            })
        };

        match self.strictness {
            Strictness::Both => word_inclusion() && compatible_modifiers(),
            Strictness::WordInclusion => word_inclusion(),
            Strictness::Modifiers => compatible_modifiers(),
        }
    }
}

/// Links names of the same entity class by their heads. Unlike the other
/// sieves it may pick an antecedent that occurs after the mention.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProperHeadMatch {
    relaxed: bool,
}

impl ProperHeadMatch {
    /// Same head lemma.
    pub fn exact() -> Self {
        Self { relaxed: false }
    }

    /// Head word among the other name's tokens, and the mention's content
    /// words all used in the other cluster.
    pub fn relaxed() -> Self {
        Self { relaxed: true }
    }

    fn matches(&self, ctx: &SieveContext<'_>, state: &CorefState, mention: &Mention, other: &Mention) -> bool {
        if self.relaxed {
            let head = mention.head_text(ctx.doc);
            let content = content_tokens(&mention.tokens);
            other.tokens.iter().any(|t| t == head)
                && !content.is_empty()
                && content.is_subset(&pooled_tokens(state, other.id))
        } else {
            let lemma = mention.head_ref(ctx.doc).lemma();
            lemma.is_some() && lemma == other.head_ref(ctx.doc).lemma()
        }
    }
}

/// Entity class of a name head; locations are left to string matching.
fn name_class<'d>(ctx: &SieveContext<'d>, mention: &Mention) -> Option<&'d str> {
    mention
        .head_ref(ctx.doc)
        .get("neclass")
        .filter(|class| *class != "LOC")
}

impl Sieve for ProperHeadMatch {
    fn name(&self) -> &'static str {
        if self.relaxed {
            "proper_head_match:relaxed"
        } else {
            "proper_head_match"
        }
    }

    fn apply(&self, ctx: &SieveContext<'_>, mut state: CorefState) -> CorefResult<CorefState> {
        for slot in 0..state.mentions.len() {
            let id = MentionId(slot);
            if !state.is_representative(id) || !can_seed(ctx, &state, id) {
                continue;
            }
            let class = match name_class(ctx, state.mention(id)) {
                Some(class) => class,
                None => continue,
            };

            // every match is linked, so "Jan", "Jan Smit" and "meneer Smit" end up together
            for k in 0..state.mentions.len() {
                let (mention, other) = (state.mention(id), state.mention(MentionId(k)));
                // either side may become the antecedent, so both must be able to seed
                let linked = !state.same_cluster(id, other.id)
                    && name_class(ctx, other) == Some(class)
                    && !mention.overlaps(other)
                    && can_seed(ctx, &state, other.id)
                    && self.matches(ctx, &state, mention, other);
                if !linked {
                    continue;
                }
                let (antecedent, anaphor) = if other.sentno < mention.sentno {
                    (other.id, id)
                } else {
                    (id, other.id)
                };
                state.merge(antecedent, anaphor, self.name())?;
            }
        }
        Ok(state)
    }
}
