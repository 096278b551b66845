use crate::sieve::is_bare_plural;
use crate::{CorefState, Sieve, SieveContext};
use layered_coref::CorefResult;
use layered_mentions::MentionId;
use std::collections::HashMap;

/// Links non-pronominal clusters whose representatives read the same,
/// ignoring case.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringMatch {
    relaxed: bool,
}

impl StringMatch {
    /// Compare the full token sequences.
    pub fn exact() -> Self {
        Self { relaxed: false }
    }

    /// Compare with post-head modifiers and appositions left out.
    pub fn relaxed() -> Self {
        Self { relaxed: true }
    }
}

impl Sieve for StringMatch {
    fn name(&self) -> &'static str {
        if self.relaxed {
            "string_match:relaxed"
        } else {
            "string_match"
        }
    }

    fn apply(&self, ctx: &SieveContext<'_>, mut state: CorefState) -> CorefResult<CorefState> {
        let mut seen: HashMap<String, MentionId> = HashMap::new();
        for n in 0..state.mentions.len() {
            let id = MentionId(n);
            if !state.is_representative(id) {
                continue;
            }
            let mention = state.mention(id);
            if mention.is_pronoun()
                || (state.cluster_size(id) == 1 && is_bare_plural(ctx, mention))
            {
                continue;
            }
            let tokens = if self.relaxed {
                &mention.relaxed_tokens
            } else {
                &mention.tokens
            };
            let key = tokens.join(" ").to_lowercase();
            match seen.get(&key) {
                Some(&first) => {
                    state.merge(first, id, self.name())?;
                }
                None => {
                    seen.insert(key, id);
                }
            }
        }
        Ok(state)
    }
}
