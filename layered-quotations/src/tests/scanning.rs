use layered_coref::{Document, ParseTree, Sentence, SentenceId, TreeBuilder};

use crate::{QuotationScanner, QuoteScan};

/// A sentence without structure: every token hangs below `top`.
fn flat(text: &str) -> ParseTree {
    TreeBuilder::sentence(|s| {
        for word in text.split(' ') {
            s.leaf(word, &[("rel", "--")]);
        }
    })
}

/// One paragraph per inner list.
fn paragraphs(paragraphs: Vec<Vec<ParseTree>>) -> Document {
    let mut sentences = Vec::new();
    for (p, trees) in paragraphs.into_iter().enumerate() {
        for (s, tree) in trees.into_iter().enumerate() {
            sentences.push(Sentence::new(SentenceId::new(p + 1, s + 1), tree));
        }
    }
    Document::new(sentences)
}

fn scan(doc: &Document) -> QuoteScan {
    QuotationScanner::new().scan(doc)
}

fn labels(scan: &QuoteScan) -> String {
    scan.labels
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn quoted_speech_followed_by_reporting_clause() {
    let doc = Document::from_trees(vec![flat("\" Hallo , \" zei Jan .")]);
    let scan = scan(&doc);

    assert_eq!(labels(&scan), "B I I I O O O");
    assert_eq!(scan.quotations.len(), 1);
    let q = &scan.quotations[0];
    assert_eq!((q.start, q.end), (0, 4));
    assert_eq!(q.text, "\" Hallo , \"");
    assert!(!q.sent_bounds);
}

#[test]
fn bare_quotation_is_sentence_bounded() {
    let doc = paragraphs(vec![
        vec![flat("\" Kom binnen ! \"")],
        vec![flat("Jan lacht .")],
    ]);
    let scan = scan(&doc);

    assert_eq!(scan.quotations.len(), 1);
    assert!(scan.quotations[0].sent_bounds);
    assert_eq!(scan.quotations[0].parno, 1);
}

#[test]
fn paragraph_break_closes_an_open_quotation() {
    let doc = paragraphs(vec![
        vec![flat("\" Kom binnen ."), flat("Het is koud .")],
        vec![flat("Jan lacht .")],
    ]);
    let scan = scan(&doc);

    assert_eq!(labels(&scan), "B I I I I I I I O O O");
    let q = &scan.quotations[0];
    assert_eq!((q.start, q.end), (0, 8));
    assert!(q.sent_bounds);
    assert_eq!(q.text, "\" Kom binnen . Het is koud .");
}

#[test]
fn end_of_document_closes_an_open_quotation() {
    let doc = Document::from_trees(vec![flat("Hij riep : \" Help !")]);
    let scan = scan(&doc);

    assert_eq!(scan.quotations.len(), 1);
    assert_eq!((scan.quotations[0].start, scan.quotations[0].end), (3, 6));
}

#[test]
fn nested_quotes_are_not_marked() {
    let doc = Document::from_trees(vec![flat("\" Hij zei ' nee ' . \"")]);
    let scan = scan(&doc);

    assert_eq!(labels(&scan), "B I I I I I I I");
    assert_eq!(scan.quotations.len(), 1);
}

#[test]
fn curly_quotes_and_guillemets() {
    let doc = Document::from_trees(vec![
        flat("\u{201c} Ja \u{201d} , zei ze ."),
        flat("\u{ab} Nee \u{bb} , zei hij ."),
        flat("\u{201e} Misschien \u{201d} ."),
    ]);
    let scan = scan(&doc);

    let texts: Vec<&str> = scan.quotations.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["\u{201c} Ja \u{201d}", "\u{ab} Nee \u{bb}", "\u{201e} Misschien \u{201d}"]
    );
}

#[test]
fn dash_turn_ends_at_the_nucleus() {
    // "- Ik kom , zei ze ."
    let tree = TreeBuilder::sentence(|s| {
        s.leaf("-", &[("rel", "--"), ("pt", "let")]);
        s.node(&[("cat", "du"), ("rel", "--")], |s| {
            s.node(&[("cat", "smain"), ("rel", "nucl")], |s| {
                s.leaf("Ik", &[("rel", "su")]);
                s.leaf("kom", &[("rel", "hd"), ("root", "kom")]);
            });
            s.top_leaf(",", &[("rel", "--"), ("pt", "let")]);
            s.node(&[("cat", "sv1"), ("rel", "tag")], |s| {
                s.leaf("zei", &[("rel", "hd"), ("root", "zeg")]);
                s.leaf("ze", &[("rel", "su")]);
            });
        });
        s.leaf(".", &[("rel", "--"), ("pt", "let")]);
    });
    let doc = Document::from_trees(vec![tree]);
    let scan = scan(&doc);

    assert_eq!(labels(&scan), "B I I O O O O");
    let q = &scan.quotations[0];
    assert_eq!(q.text, "- Ik kom");
    assert!(!q.sent_bounds);
}

#[test]
fn dash_turn_without_reporting_clause_runs_to_paragraph_end() {
    let doc = paragraphs(vec![
        vec![flat("- Kom binnen .")],
        vec![flat("Jan lacht .")],
    ]);
    let scan = scan(&doc);

    assert_eq!(labels(&scan), "B I I I O O O");
    assert_eq!((scan.quotations[0].start, scan.quotations[0].end), (0, 4));
}

#[test]
fn dash_inside_a_paragraph_is_ordinary() {
    let doc = Document::from_trees(vec![flat("Jan lacht ."), flat("- Kom binnen .")]);
    let scan = scan(&doc);
    assert!(scan.quotations.is_empty());
    assert_eq!(labels(&scan), "O O O O O O O");
}

#[test]
fn quotation_lookup_by_token() {
    let doc = Document::from_trees(vec![flat("Jan zei : \" Ik kom . \"")]);
    let scan = scan(&doc);

    assert!(scan.quotation_at(2).is_none());
    assert_eq!(scan.quotation_at(3).map(|q| q.start), Some(3));
    assert_eq!(scan.quotation_at(7).map(|q| q.end), Some(8));
    assert!(scan.quotation_at(8).is_none());
}
