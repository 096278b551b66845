use layered_coref::{
    CorefConfig, CorefError, Document, Exclusion, Lexicon, NeverPleonastic, ParseTree, TreeBuilder,
};
use layered_mentions::{Mention, MentionId};
use layered_quotations::QuoteLabel;

use super::fixtures::{minister_doc, name, pronoun, pronoun_doc, verb, PUNCT};
use crate::{CorefResolver, Resolution};

fn resolve_with(doc: &Document, config: CorefConfig) -> Resolution {
    let lexicon = Lexicon::new();
    CorefResolver::new(&lexicon, &NeverPleonastic, config)
        .resolve(doc)
        .unwrap()
}

fn resolve(doc: &Document) -> Resolution {
    resolve_with(doc, CorefConfig::default())
}

fn links(resolution: &Resolution) -> Vec<(usize, usize, &'static str)> {
    resolution
        .links()
        .map(|(a, m, sieve)| (a.index(), m.index(), sieve))
        .collect()
}

/// `" Ik kom , " zei Jan .`
fn reported_speech() -> ParseTree {
    TreeBuilder::sentence(|s| {
        s.leaf("\"", PUNCT);
        s.node(&[("cat", "smain"), ("rel", "--")], |s| {
            s.leaf("Ik", &pronoun("1", "su"));
            s.leaf("kom", &verb("kom"));
        });
        s.leaf(",", PUNCT);
        s.leaf("\"", PUNCT);
        s.node(&[("cat", "smain"), ("rel", "--")], |s| {
            s.leaf("zei", &[("rel", "hd"), ("pt", "ww"), ("lemma", "zeggen"), ("root", "zeg")]);
            s.leaf("Jan", &name("su"));
        });
        s.leaf(".", PUNCT);
    })
}

#[test]
fn string_match_runs_before_everything_else() {
    let doc = minister_doc();
    let resolution = resolve(&doc);

    assert_eq!(links(&resolution), vec![(0, 2, "string_match")]);
    let clusters: Vec<Vec<usize>> = resolution
        .clusters()
        .map(|(_, members)| members.iter().map(|m| m.index()).collect())
        .collect();
    assert_eq!(clusters, vec![vec![0, 2], vec![1]]);
}

#[test]
fn quoted_first_person_is_the_speaker() {
    let doc = Document::from_trees(vec![reported_speech()]);
    let resolution = resolve(&doc);

    let texts: Vec<String> = resolution.mentions.iter().map(Mention::text).collect();
    assert_eq!(texts, vec!["Jan", "Ik"]);
    assert_eq!(links(&resolution), vec![(0, 1, "pronouns")]);
    assert_eq!(resolution.quotations[0].speaker, Some(MentionId(0)));

    let ik = &resolution.annotations[1];
    assert_eq!(ik.label, QuoteLabel::Inside);
    assert_eq!(ik.speaker, Some(MentionId(0)));
    assert_eq!(resolution.label(0), QuoteLabel::Begin);
    assert_eq!(resolution.annotations[6].speaker, None);
    assert_eq!(resolution.label(100), QuoteLabel::Outside);
}

#[test]
fn pronoun_window_limits_the_search() {
    let doc = pronoun_doc();
    assert_eq!(links(&resolve(&doc)), vec![(0, 2, "pronouns")]);

    let config = CorefConfig::from_toml_str("pronoun_window = 0").unwrap();
    assert!(links(&resolve_with(&doc, config)).is_empty());
}

#[test]
fn exclusions_mark_but_keep_mentions() {
    let doc = pronoun_doc();
    let config = CorefConfig::default().with_exclusions(vec![Exclusion::Singletons]);
    let resolution = resolve_with(&doc, config);

    let visible: Vec<String> = resolution.visible_mentions().map(Mention::text).collect();
    assert_eq!(visible, vec!["Jan", "hem"]);
    assert_eq!(resolution.mentions.len(), 3);
    assert!(resolution.mention(MentionId(1)).filtered);

    let config = CorefConfig::default().with_exclusions(vec![Exclusion::NpSingletons]);
    let resolution = resolve_with(&doc, config);
    assert_eq!(resolution.visible_mentions().count(), 3);
}

#[test]
fn pronoun_without_person_aborts_the_run() {
    // "Hij lacht ." with a broken pronoun node
    let tree = TreeBuilder::sentence(|s| {
        s.node(&[("cat", "smain"), ("rel", "--")], |s| {
            s.leaf("Hij", &[("rel", "su"), ("pt", "vnw"), ("pdtype", "pron"), ("vwtype", "pers")]);
            s.leaf("lacht", &verb("lach"));
        });
        s.leaf(".", PUNCT);
    });
    let doc = Document::from_trees(vec![tree]);
    let lexicon = Lexicon::new();
    let err = CorefResolver::new(&lexicon, &NeverPleonastic, CorefConfig::default())
        .resolve(&doc)
        .unwrap_err();

    assert!(matches!(
        err,
        CorefError::MissingAttribute {
            sentence: 0,
            attribute: "persoon",
            ..
        }
    ));
}

#[test]
fn sentence_display() {
    let doc = pronoun_doc();
    let resolution = resolve(&doc);

    assert!(resolution.sentence_display(&doc, 2).is_none());
    insta::assert_snapshot!(resolution.sentence_display(&doc, 1).unwrap(), @r###"
    Piet  ziet  hem  .
    ╰──╯#1 name cluster=#1
                ╰─╯#2 pronoun cluster=#0
                  └─pronouns─>#0 (s0)
    "###);
}
