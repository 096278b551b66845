//! Pleonastic pronoun detection.
//!
//! Dummy uses of "het" ("het regent", "hoe gaat het?") do not refer to
//! anything and must not become mentions. The extractor asks a
//! [`PleonasticOracle`] about every node whose lemma is configured as a
//! possible dummy pronoun.

use crate::lexicon::WEATHER_VERBS;
use crate::{NodeId, NodeRef, ParseTree};

pub trait PleonasticOracle: Send + Sync {
    /// Whether `node` is a non-referring (pleonastic) pronoun.
    fn is_pleonastic(&self, tree: &ParseTree, node: NodeId) -> bool;
}

impl<F> PleonasticOracle for F
where
    F: Fn(&ParseTree, NodeId) -> bool + Send + Sync,
{
    fn is_pleonastic(&self, tree: &ParseTree, node: NodeId) -> bool {
        self(tree, node)
    }
}

/// Oracle that treats every pronoun as referential.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverPleonastic;

impl PleonasticOracle for NeverPleonastic {
    fn is_pleonastic(&self, _tree: &ParseTree, _node: NodeId) -> bool {
        false
    }
}

/// Syntactic patterns for pleonastic "het" from the Lassy annotation manual.
#[derive(Debug, Clone, Copy, Default)]
pub struct PleonasticRules;

impl PleonasticRules {
    fn subject(node: NodeRef<'_>, parent: NodeRef<'_>, head: Option<&str>) -> bool {
        // het regent. / hoe gaat het?
        if head.map_or(false, |h| h == "gaan" || WEATHER_VERBS.contains(&h)) {
            return true;
        }
        // het ontbreekt hem aan moed
        if head == Some("ontbreken")
            && parent
                .children()
                .filter(|n| n.is("rel", "pc"))
                .any(|pc| pc.children().any(|n| n.is("rel", "hd") && n.is("lemma", "aan")))
        {
            return true;
        }
        // het kan voorkomen dat ...
        if let Some(index) = node.get("index") {
            return parent
                .children()
                .flat_map(|sibling| sibling.descendants())
                .any(|n| n.is("rel", "sup") && n.is("index", index));
        }
        false
    }

    fn object(parent: NodeRef<'_>, head: Option<&str>) -> bool {
        let sibling = |rel: &str| parent.children().any(|n| n.is("rel", rel));
        let below = |word: &str| parent.descendants().any(|n| n.is("word", word));
        match head.unwrap_or("") {
            // de presidente had het warm / het erover hebben
            "hebben" => {
                sibling("predc")
                    || parent.children().any(|n| n.is("word", "erover"))
                    || (below("er") && below("over"))
            }
            // samen zullen we het wel rooien
            "rooien" => true,
            // hij zette het op een lopen
            "zetten" => parent
                .children()
                .filter(|n| n.is("rel", "svp"))
                .any(|svp| svp.children().any(|n| n.is("word", "lopen"))),
            // had het op mij gemunt
            "munten" => below("op"),
            _ => false,
        }
    }
}

impl PleonasticOracle for PleonasticRules {
    fn is_pleonastic(&self, tree: &ParseTree, id: NodeId) -> bool {
        let node = tree.node(id);
        if node.is_any("rel", &["sup", "pobj1"]) {
            return true;
        }
        if !node.is("lemma", "het") {
            return false;
        }
        let parent = match node.parent() {
            Some(parent) => parent,
            None => return false,
        };
        let head = parent
            .find_child(|n| n.is("rel", "hd"))
            .and_then(|n| n.lemma());
        match node.rel() {
            Some("su") => Self::subject(node, parent, head),
            Some("obj1") => Self::object(parent, head),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeBuilder;

    fn het_with_verb(rel: &str, verb: &str) -> (ParseTree, NodeId) {
        let mut het = None;
        let tree = TreeBuilder::sentence(|s| {
            s.node(&[("cat", "smain")], |s| {
                het = Some(s.leaf("het", &[("rel", rel), ("pt", "vnw")]));
                s.leaf(verb, &[("rel", "hd"), ("pt", "ww"), ("lemma", verb)]);
            });
        });
        (tree, het.unwrap())
    }

    #[test]
    fn weather_subject() {
        let (tree, het) = het_with_verb("su", "regenen");
        assert!(PleonasticRules.is_pleonastic(&tree, het));
        let (tree, het) = het_with_verb("su", "vallen");
        assert!(!PleonasticRules.is_pleonastic(&tree, het));
    }

    #[test]
    fn object_idioms() {
        let (tree, het) = het_with_verb("obj1", "rooien");
        assert!(PleonasticRules.is_pleonastic(&tree, het));
        let (tree, het) = het_with_verb("obj1", "lezen");
        assert!(!PleonasticRules.is_pleonastic(&tree, het));
    }

    #[test]
    fn extraposed_subject_is_pleonastic() {
        let mut het = None;
        let tree = TreeBuilder::sentence(|s| {
            s.node(&[("cat", "smain")], |s| {
                het = Some(s.leaf("het", &[("rel", "su"), ("index", "1")]));
                s.leaf("kan", &[("rel", "hd"), ("lemma", "kunnen")]);
                s.node(&[("cat", "inf"), ("rel", "vc")], |s| {
                    s.trace(&[("rel", "sup"), ("index", "1")]);
                    s.leaf("voorkomen", &[("rel", "hd")]);
                });
            });
        });
        assert!(PleonasticRules.is_pleonastic(&tree, het.unwrap()));
    }

    #[test]
    fn closures_are_oracles() {
        let (tree, het) = het_with_verb("su", "regenen");
        let always = |_: &ParseTree, _: NodeId| true;
        assert!(always.is_pleonastic(&tree, het));
        assert!(!NeverPleonastic.is_pleonastic(&tree, het));
    }
}
