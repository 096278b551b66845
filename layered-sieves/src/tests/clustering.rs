use layered_coref::{CorefError, Document, Gender};
use layered_mentions::MentionId;

use super::fixtures::{extract, members, name_sentence};
use crate::CorefState;

/// One name mention per sentence.
fn names(who: &[&str]) -> CorefState {
    let doc = Document::from_trees(who.iter().map(|w| name_sentence(w, "lacht")));
    CorefState::new(extract(&doc))
}

#[test]
fn merge_keeps_the_lower_cluster() {
    let mut state = names(&["Jan", "Piet", "Kees"]);
    assert!(state.merge(MentionId(2), MentionId(0), "test").unwrap());

    assert_eq!(members(&state, 2), vec![0, 2]);
    assert!(state.is_representative(MentionId(0)));
    assert!(!state.is_representative(MentionId(2)));
    assert_eq!(state.mention(MentionId(2)).cluster_id, MentionId(0));
    assert_eq!(state.mention(MentionId(2)).antecedent, Some(MentionId(0)));
    assert_eq!(state.mention(MentionId(2)).sieve, Some("test"));
    assert_eq!(state.mention(MentionId(0)).antecedent, None);
    assert_eq!(state.clusters.live_count(), 2);
}

#[test]
fn merging_within_a_cluster_changes_nothing() {
    let mut state = names(&["Jan", "Piet", "Kees"]);
    state.merge(MentionId(0), MentionId(1), "first").unwrap();
    state.merge(MentionId(1), MentionId(2), "second").unwrap();
    let before = state.clusters.clone();

    assert!(!state.merge(MentionId(2), MentionId(0), "third").unwrap());
    assert_eq!(state.clusters, before);
    assert_eq!(state.mention(MentionId(2)).sieve, Some("second"));
    assert_eq!(state.mention(MentionId(0)).antecedent, None);
}

#[test]
fn merging_a_mention_with_itself_is_an_error() {
    let mut state = names(&["Jan", "Piet"]);
    let err = state.merge(MentionId(1), MentionId(1), "test").unwrap_err();

    assert!(matches!(err, CorefError::SelfMerge(1)));
    assert_eq!(state.clusters.live_count(), 2);
}

#[test]
fn prohibitions_follow_the_clusters() {
    let mut state = names(&["Jan", "Piet", "Kees", "Marie"]);
    state.prohibit(MentionId(0), MentionId(2));
    state.merge(MentionId(1), MentionId(2), "test").unwrap();

    assert!(state.prohibited(MentionId(0), MentionId(1)));
    assert!(state.prohibited(MentionId(1), MentionId(0)));
    assert!(state.prohibited(MentionId(3), MentionId(3)));
    assert!(!state.prohibited(MentionId(3), MentionId(1)));
    assert!(state.mention(MentionId(1)).prohibit.contains(&MentionId(0)));
}

#[test]
fn merged_features_are_shared() {
    let mut state = names(&["Jan", "Marie"]);
    state.mentions[0].features.gender = Some(Gender::Masculine);
    state.mentions[1].features.gender = Some(Gender::Feminine);
    state.merge(MentionId(0), MentionId(1), "test").unwrap();

    assert_eq!(state.mention(MentionId(0)).features.gender, Some(Gender::FemMasc));
    assert_eq!(state.mention(MentionId(1)).features.gender, Some(Gender::FemMasc));
}
