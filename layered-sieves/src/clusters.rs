use layered_mentions::MentionId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Partition of mention ids into clusters.
///
/// Slot `n` holds the cluster whose representative is mention `n`; a slot
/// is emptied when its cluster is absorbed into one with a lower id, so
/// cluster ids held elsewhere never dangle as long as they are looked up
/// through a member mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clusters {
    slots: Vec<Option<BTreeSet<MentionId>>>,
}

impl Clusters {
    /// Every mention in a cluster of its own.
    pub fn singletons(count: usize) -> Self {
        Self {
            slots: (0..count)
                .map(|n| Some(std::iter::once(MentionId(n)).collect()))
                .collect(),
        }
    }

    pub fn get(&self, id: MentionId) -> Option<&BTreeSet<MentionId>> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn is_live(&self, id: MentionId) -> bool {
        self.get(id).is_some()
    }

    pub fn size(&self, id: MentionId) -> usize {
        self.get(id).map_or(0, BTreeSet::len)
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of slots, live or not; equals the number of mentions.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live clusters by representative id.
    pub fn iter(&self) -> impl Iterator<Item = (MentionId, &BTreeSet<MentionId>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(n, slot)| slot.as_ref().map(|members| (MentionId(n), members)))
    }

    /// Move the members of `gone` into `keep` and return the moved ids.
    pub(crate) fn absorb(&mut self, keep: MentionId, gone: MentionId) -> BTreeSet<MentionId> {
        let moved = self.slots[gone.index()].take().unwrap_or_default();
        if let Some(members) = self.slots[keep.index()].as_mut() {
            members.extend(moved.iter().copied());
        }
        moved
    }
}
