use crate::{CorefState, Sieve, SieveContext};
use layered_coref::lexicon::is_stopword;
use layered_coref::{CorefResult, NodeRef};
use layered_mentions::MentionId;
use std::collections::HashMap;

/// (sentence, begin, end) of a node or mention span.
type SpanKey = (usize, usize, usize);

fn node_key(sentno: usize, node: NodeRef<'_>) -> SpanKey {
    (sentno, node.begin(), node.end())
}

/// Antecedents found in the first pass, keyed by where their anaphor sits.
#[derive(Default)]
struct Antecedents {
    appositives: HashMap<SpanKey, MentionId>,
    predicatives: HashMap<SpanKey, MentionId>,
    relatives: HashMap<SpanKey, MentionId>,
    reflexives: HashMap<SpanKey, MentionId>,
    reciprocals: HashMap<SpanKey, MentionId>,
    acronyms: HashMap<String, MentionId>,
}

/// Links mentions whose relation is fixed by syntax: appositions,
/// predicate nominals, relative, reflexive and reciprocal pronouns, and
/// acronyms of names.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreciseConstructs;

impl Sieve for PreciseConstructs {
    fn name(&self) -> &'static str {
        "precise"
    }

    fn apply(&self, ctx: &SieveContext<'_>, mut state: CorefState) -> CorefResult<CorefState> {
        let found = collect_antecedents(ctx, &state);

        for n in 0..state.mentions.len() {
            let id = MentionId(n);
            let mention = state.mention(id);
            let node = mention.node_ref(ctx.doc);
            let head = mention.head_ref(ctx.doc);
            let span = (mention.sentno, mention.begin, mention.end);

            let mut links: Vec<(MentionId, &'static str)> = Vec::new();
            if node.is("rel", "app") {
                links.extend(found.appositives.get(&span).map(|&a| (a, "precise:appositive")));
            }
            if node.is("rel", "predc") {
                let key = node_key(mention.sentno, node);
                links.extend(found.predicatives.get(&key).map(|&a| (a, "precise:predicative")));
            }
            if node.is("vwtype", "betr") {
                links.extend(found.relatives.get(&span).map(|&a| (a, "precise:relpronoun")));
            }
            if node.is("vwtype", "refl") {
                links.extend(found.reflexives.get(&span).map(|&a| (a, "precise:reflexive")));
            }
            if node.is("vwtype", "recip") {
                links.extend(found.reciprocals.get(&span).map(|&a| (a, "precise:reciprocal")));
            }
            if head.get("neclass").is_some() && mention.tokens.len() == 1 {
                let token = &mention.tokens[0];
                if token.chars().filter(|c| c.is_uppercase()).count() > 1 {
                    let acronym: String = token.chars().filter(|c| c.is_alphanumeric()).collect();
                    links.extend(found.acronyms.get(&acronym).map(|&a| (a, "precise:acronym")));
                }
            }

            for (antecedent, sieve) in links {
                if antecedent != id {
                    state.merge(antecedent, id, sieve)?;
                }
            }
        }
        Ok(state)
    }
}

fn collect_antecedents(ctx: &SieveContext<'_>, state: &CorefState) -> Antecedents {
    let mut found = Antecedents::default();
    for mention in &state.mentions {
        let node = mention.node_ref(ctx.doc);
        let head = mention.head_ref(ctx.doc);
        let sentno = mention.sentno;
        let parent = node.parent();

        // "Piet, de bakker": the apposition is the parent's second child
        if !node.is("rel", "app") {
            if let Some(app) = parent
                .filter(|p| p.child_count() > 1)
                .and_then(|p| p.child(1))
                .filter(|c| c.is("rel", "app"))
            {
                found.appositives.insert(node_key(sentno, app), mention.id);
            }
        }

        if node.is("rel", "su") {
            if let Some(predc) = parent.and_then(|p| p.find_child(|c| c.is("rel", "predc"))) {
                found.predicatives.insert(node_key(sentno, predc), mention.id);
            }
        }

        if let Some(pronoun) = node
            .children()
            .filter(|c| c.is("cat", "rel"))
            .flat_map(|c| c.children())
            .find(|c| c.is("vwtype", "betr"))
        {
            found.relatives.insert(node_key(sentno, pronoun), mention.id);
        }

        // the closest candidate antecedent of "zich"; a determiner counts
        // for the genitive ("Jans zorg voor zichzelf")
        if !node.is("vwtype", "refl") {
            let scope = if parent.map_or(false, |p| p.is("rel", "su")) {
                parent.and_then(|p| p.parent())
            } else if node.is_any("rel", &["su", "det"]) {
                parent
            } else {
                None
            };
            if let Some(reflexive) = scope.and_then(|s| s.find(|n| n.is("vwtype", "refl"))) {
                found.reflexives.insert(node_key(sentno, reflexive), mention.id);
            }
        }

        if !node.is("vwtype", "recip") && head.is("num", "pl") {
            if let Some(reciprocal) = parent.and_then(|p| p.find(|n| n.is("vwtype", "recip"))) {
                found.reciprocals.insert(node_key(sentno, reciprocal), mention.id);
            }
        }

        if head.get("neclass").is_some() && mention.tokens.len() > 1 {
            // "De Partij van de Arbeid" => "PvdA"
            let initials = |keep: &dyn Fn(usize, &str) -> bool| -> String {
                mention
                    .tokens
                    .iter()
                    .enumerate()
                    .filter(|(n, t)| keep(*n, t.as_str()))
                    .filter_map(|(_, t)| t.chars().next())
                    .collect()
            };
            found
                .acronyms
                .insert(initials(&|n, t| n > 0 || !is_stopword(t)), mention.id);
            // "De Koninklijke Nederlandse Akademie van Wetenschappen" => "KNAW"
            found
                .acronyms
                .insert(initials(&|_, t| !is_stopword(t)), mention.id);
        }
    }
    found
}
