use crate::CorefState;
use layered_coref::{Document, Exclusion};
use layered_mentions::MentionType;

/// Mark mentions the caller asked to leave out of the output. Nothing is
/// removed or renumbered; excluded mentions get `filtered = true`.
pub fn apply_exclusions(doc: &Document, state: &mut CorefState, exclude: &[Exclusion]) {
    if exclude.is_empty() {
        return;
    }
    let mut filtered = 0usize;
    for n in 0..state.mentions.len() {
        let mention = &state.mentions[n];
        let size = state.clusters.size(mention.cluster_id);
        let node = mention.node_ref(doc);
        let excluded = exclude.iter().any(|exclusion| match exclusion {
            Exclusion::Singletons => size == 1,
            Exclusion::NpSingletons => size == 1 && mention.kind != MentionType::Name,
            Exclusion::RelPronouns => node.is("vwtype", "betr"),
            Exclusion::Reflexives => node.is("vwtype", "refl"),
            Exclusion::Reciprocals => node.is("vwtype", "recip"),
            Exclusion::Appositives => node.is("rel", "app"),
            Exclusion::Predicatives => node.is("rel", "predc"),
        });
        if excluded {
            state.mentions[n].filtered = true;
            filtered += 1;
        }
    }
    tracing::debug!(filtered, "applied exclusions");
}
