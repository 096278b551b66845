use crate::CorefState;
use layered_coref::lexicon::is_stopword;
use layered_coref::{CorefConfig, CorefResult, Document, Number};
use layered_mentions::{Mention, MentionId};
use layered_quotations::QuoteScan;
use std::collections::HashSet;

/// Read-only inputs shared by every sieve of one run.
#[derive(Debug, Clone, Copy)]
pub struct SieveContext<'d> {
    pub doc: &'d Document,
    pub quotes: &'d QuoteScan,
    pub config: &'d CorefConfig,
}

/// One merge pass. A sieve sees the clusters left by the previous ones and
/// hands its own result to the next.
pub trait Sieve {
    fn name(&self) -> &'static str;

    fn apply(&self, ctx: &SieveContext<'_>, state: CorefState) -> CorefResult<CorefState>;
}

/// Whether a mention may start a cluster through head matching.
///
/// A mention that already shares a cluster is always allowed. On its own,
/// an indefinite noun phrase ("een man") or a bare plural ("mannen")
/// introduces a new entity and cannot be linked back.
pub(crate) fn can_seed(ctx: &SieveContext<'_>, state: &CorefState, id: MentionId) -> bool {
    if state.cluster_size(id) > 1 {
        return true;
    }
    let mention = state.mention(id);
    let node = mention.node_ref(ctx.doc);
    if node.is("cat", "np")
        && node
            .child(0)
            .map_or(false, |first| first.is("def", "indef") || first.is("vwtype", "onbep"))
    {
        return false;
    }
    !is_bare_plural(ctx, mention)
}

/// Common noun in the plural without a determiner.
pub(crate) fn is_bare_plural(ctx: &SieveContext<'_>, mention: &Mention) -> bool {
    mention.node_ref(ctx.doc).is("ntype", "soort") && mention.features.number == Some(Number::Plural)
}

/// Tokens that are not function words or titles.
pub(crate) fn content_tokens(tokens: &[String]) -> HashSet<&str> {
    tokens
        .iter()
        .map(String::as_str)
        .filter(|t| !is_stopword(t))
        .collect()
}

/// All tokens of all members of a cluster.
pub(crate) fn pooled_tokens(state: &CorefState, cluster_member: MentionId) -> HashSet<&str> {
    state
        .cluster_of(cluster_member)
        .iter()
        .flat_map(|m| state.mention(*m).tokens.iter().map(String::as_str))
        .collect()
}
