use layered_coref::{CorefConfig, Document, Lexicon, NeverPleonastic, ParseTree, TreeBuilder};
use layered_mentions::{Mention, MentionExtractor, MentionId};
use layered_quotations::QuotationScanner;

use crate::{CorefState, Sieve, SieveContext};

pub const PUNCT: &[(&str, &str)] = &[("rel", "--"), ("pt", "let")];

pub fn name(rel: &'static str) -> [(&'static str, &'static str); 5] {
    [("rel", rel), ("pt", "n"), ("ntype", "eigen"), ("neclass", "PER"), ("num", "sg")]
}

pub fn verb(root: &str) -> [(&'static str, &str); 3] {
    [("rel", "hd"), ("pt", "ww"), ("root", root)]
}

pub fn pronoun(persoon: &'static str, rel: &'static str) -> [(&'static str, &'static str); 7] {
    [
        ("rel", rel),
        ("pt", "vnw"),
        ("pdtype", "pron"),
        ("vwtype", "pers"),
        ("persoon", persoon),
        ("getal", "ev"),
        ("genus", "masc"),
    ]
}

/// "<name> <verb> ."
pub fn name_sentence(who: &str, verb_word: &str) -> ParseTree {
    TreeBuilder::sentence(|s| {
        s.node(&[("cat", "smain"), ("rel", "--")], |s| {
            s.leaf(who, &name("su"));
            s.leaf(verb_word, &verb(verb_word));
        });
        s.leaf(".", PUNCT);
    })
}

/// "<det> [<adj>] <noun> <verb> ." with the noun phrase as subject.
pub fn noun_sentence(det: (&str, &'static str), adj: Option<&str>, noun: &str, verb_word: &str) -> ParseTree {
    TreeBuilder::sentence(|s| {
        s.node(&[("cat", "smain"), ("rel", "--")], |s| {
            s.node(&[("cat", "np"), ("rel", "su")], |s| {
                s.leaf(det.0, &[("rel", "det"), ("pt", "lid"), ("def", det.1)]);
                if let Some(adj) = adj {
                    s.leaf(adj, &[("rel", "mod"), ("pt", "adj")]);
                }
                s.leaf(noun, &[("rel", "hd"), ("pt", "n"), ("ntype", "soort"), ("num", "sg")]);
            });
            s.leaf(verb_word, &verb(verb_word));
        });
        s.leaf(".", PUNCT);
    })
}

/// "Jan zag de minister ." followed by "De minister lachte ."
pub fn minister_doc() -> Document {
    let first = TreeBuilder::sentence(|s| {
        s.node(&[("cat", "smain"), ("rel", "--")], |s| {
            s.leaf("Jan", &name("su"));
            s.leaf("zag", &verb("zie"));
            s.node(&[("cat", "np"), ("rel", "obj1")], |s| {
                s.leaf("de", &[("rel", "det"), ("pt", "lid"), ("def", "def")]);
                s.leaf("minister", &[("rel", "hd"), ("pt", "n"), ("ntype", "soort"), ("num", "sg")]);
            });
        });
        s.leaf(".", PUNCT);
    });
    let second = noun_sentence(("De", "def"), None, "minister", "lachte");
    Document::from_trees(vec![first, second])
}

/// "Jan komt ." followed by "Piet ziet hem ."
pub fn pronoun_doc() -> Document {
    let second = TreeBuilder::sentence(|s| {
        s.node(&[("cat", "smain"), ("rel", "--")], |s| {
            s.leaf("Piet", &name("su"));
            s.leaf("ziet", &verb("zie"));
            s.leaf("hem", &pronoun("3", "obj1"));
        });
        s.leaf(".", PUNCT);
    });
    Document::from_trees(vec![name_sentence("Jan", "komt"), second])
}

pub fn extract(doc: &Document) -> Vec<Mention> {
    MentionExtractor::new(&Lexicon::new(), &NeverPleonastic)
        .extract(doc)
        .unwrap()
}

/// Extract mentions and run a single sieve over them.
pub fn run_sieve(doc: &Document, sieve: &dyn Sieve) -> CorefState {
    let scan = QuotationScanner::new().scan(doc);
    let config = CorefConfig::default();
    let ctx = SieveContext {
        doc,
        quotes: &scan,
        config: &config,
    };
    sieve.apply(&ctx, CorefState::new(extract(doc))).unwrap()
}

pub fn texts(state: &CorefState) -> Vec<String> {
    state.mentions.iter().map(Mention::text).collect()
}

pub fn members(state: &CorefState, id: usize) -> Vec<usize> {
    state
        .cluster_of(MentionId(id))
        .iter()
        .map(|m| m.index())
        .collect()
}
