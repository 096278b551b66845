use crate::Clusters;
use layered_coref::{CorefError, CorefResult};
use layered_mentions::{Mention, MentionId};
use std::collections::BTreeSet;

static NO_MEMBERS: BTreeSet<MentionId> = BTreeSet::new();

/// Mentions plus the cluster partition, threaded through the sieves.
#[derive(Debug, Clone)]
pub struct CorefState {
    pub mentions: Vec<Mention>,
    pub clusters: Clusters,
}

impl CorefState {
    /// Start with every mention in its own cluster.
    pub fn new(mut mentions: Vec<Mention>) -> Self {
        for (n, mention) in mentions.iter_mut().enumerate() {
            mention.id = MentionId(n);
            mention.cluster_id = MentionId(n);
        }
        let clusters = Clusters::singletons(mentions.len());
        Self { mentions, clusters }
    }

    pub fn mention(&self, id: MentionId) -> &Mention {
        &self.mentions[id.index()]
    }

    /// Members of the cluster `id` belongs to.
    pub fn cluster_of(&self, id: MentionId) -> &BTreeSet<MentionId> {
        let cluster = self.mention(id).cluster_id;
        self.clusters.get(cluster).unwrap_or(&NO_MEMBERS)
    }

    pub fn cluster_size(&self, id: MentionId) -> usize {
        self.clusters.size(self.mention(id).cluster_id)
    }

    /// Whether `id` is the representative (lowest id) of a live cluster.
    pub fn is_representative(&self, id: MentionId) -> bool {
        self.clusters.is_live(id)
    }

    pub fn same_cluster(&self, a: MentionId, b: MentionId) -> bool {
        self.mention(a).cluster_id == self.mention(b).cluster_id
    }

    /// True when the two mentions already share a cluster or any member of
    /// one cluster prohibits a member of the other.
    pub fn prohibited(&self, a: MentionId, b: MentionId) -> bool {
        if self.same_cluster(a, b) {
            return true;
        }
        let (left, right) = (self.cluster_of(a), self.cluster_of(b));
        let blocks = |from: &BTreeSet<MentionId>, to: &BTreeSet<MentionId>| {
            from.iter()
                .any(|m| !self.mention(*m).prohibit.is_disjoint(to))
        };
        blocks(left, right) || blocks(right, left)
    }

    /// Record that two mentions may never corefer.
    pub fn prohibit(&mut self, a: MentionId, b: MentionId) {
        if a != b {
            self.mentions[a.index()].prohibit.insert(b);
            self.mentions[b.index()].prohibit.insert(a);
        }
    }

    /// Union the clusters of `a` and `b` under the lower cluster id.
    ///
    /// Returns `Ok(false)` when they already share a cluster. The mention
    /// from the higher cluster records the other as its antecedent; features
    /// are reconciled and then shared by both.
    pub fn merge(&mut self, a: MentionId, b: MentionId, sieve: &'static str) -> CorefResult<bool> {
        if a == b {
            return Err(CorefError::SelfMerge(a.index()));
        }
        if self.same_cluster(a, b) {
            return Ok(false);
        }
        let (a, b) = if self.mention(a).cluster_id > self.mention(b).cluster_id {
            (b, a)
        } else {
            (a, b)
        };

        let theirs = self.mention(b).features;
        self.mentions[a.index()].features.merge(&theirs);
        let merged = self.mention(a).features;
        self.mentions[b.index()].features.adopt(&merged);
        let prohibit = self.mention(b).prohibit.clone();
        self.mentions[a.index()].prohibit.extend(prohibit);

        let keep = self.mention(a).cluster_id;
        let gone = self.mention(b).cluster_id;
        for m in self.clusters.absorb(keep, gone) {
            self.mentions[m.index()].cluster_id = keep;
        }
        let linked = &mut self.mentions[b.index()];
        linked.antecedent = Some(a);
        linked.sieve = Some(sieve);

        tracing::debug!(
            sieve,
            antecedent = %self.mention(a),
            mention = %self.mention(b),
            "linked"
        );
        Ok(true)
    }
}
