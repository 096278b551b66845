//! Loading parsed documents from disk.
//!
//! A document is a directory with one RON-serialized [`ParseTree`] per
//! sentence. The file name carries the sentence identifier:
//!
//! - `7.ron`: sentence 7, no paragraph information (paragraph 0)
//! - `3-2.ron`: paragraph 3, sentence 2
//! - `wiki-123.p.3.s.2.ron`: paragraph 3, sentence 2

use crate::{CorefError, CorefResult, Document, ParseTree, Sentence, SentenceId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static PLAIN_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)$").expect("valid regex"));
static DASHED_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)-(\d+)$").expect("valid regex"));
static CORPUS_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.p\.(\d+)\.s\.(\d+)$").expect("valid regex"));

/// Parse a sentence identifier from a file stem.
pub fn parse_sentence_id(stem: &str) -> Option<SentenceId> {
    let number = |s: &str| s.parse::<usize>().ok();
    if let Some(caps) = PLAIN_ID.captures(stem) {
        return Some(SentenceId::new(0, number(&caps[1])?));
    }
    if let Some(caps) = DASHED_ID.captures(stem) {
        return Some(SentenceId::new(number(&caps[1])?, number(&caps[2])?));
    }
    if let Some(caps) = CORPUS_ID.captures(stem) {
        return Some(SentenceId::new(number(&caps[1])?, number(&caps[2])?));
    }
    None
}

/// Load a single sentence tree.
pub fn load_tree(path: &Path) -> CorefResult<ParseTree> {
    let content = fs::read_to_string(path).map_err(|e| load_error(path, e.to_string()))?;
    ron::from_str(&content).map_err(|e| load_error(path, e.to_string()))
}

/// Load all `*.ron` sentence files in `dir`, ordered by sentence id.
pub fn load_document(dir: &Path) -> CorefResult<Document> {
    let mut sentences = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| load_error(dir, e.to_string()))? {
        let entry = entry.map_err(|e| load_error(dir, e.to_string()))?;
        let path = entry.path();
        if !path.extension().map_or(false, |e| e == "ron") {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let id = parse_sentence_id(stem)
            .ok_or_else(|| load_error(&path, "file name carries no sentence id".into()))?;
        sentences.push(Sentence::new(id, load_tree(&path)?));
    }

    sentences.sort_by_key(|sentence| sentence.id);
    let document = Document::new(sentences);
    document.validate()?;
    tracing::debug!(
        path = %dir.display(),
        sentences = document.sentence_count(),
        tokens = document.token_count(),
        "loaded document"
    );
    Ok(document)
}

fn load_error(path: &Path, message: String) -> CorefError {
    CorefError::Load {
        path: path.display().to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeBuilder;

    fn write_tree(dir: &Path, name: &str, words: &[&str]) {
        let tree = TreeBuilder::sentence(|s| {
            for word in words {
                s.leaf(word, &[("pt", "n")]);
            }
        });
        fs::write(dir.join(name), ron::to_string(&tree).unwrap()).unwrap();
    }

    #[test]
    fn sentence_ids() {
        assert_eq!(parse_sentence_id("12"), Some(SentenceId::new(0, 12)));
        assert_eq!(parse_sentence_id("3-2"), Some(SentenceId::new(3, 2)));
        assert_eq!(
            parse_sentence_id("WR-P-P-H-0000000001.p.4.s.1"),
            Some(SentenceId::new(4, 1))
        );
        assert_eq!(parse_sentence_id("notes"), None);
    }

    #[test]
    fn loads_in_sentence_order() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(dir.path(), "2-1.ron", &["derde"]);
        write_tree(dir.path(), "1-10.ron", &["tweede"]);
        write_tree(dir.path(), "1-2.ron", &["eerste"]);
        fs::write(dir.path().join("README.txt"), "ignored").unwrap();

        let doc = load_document(dir.path()).unwrap();
        let texts: Vec<_> = doc.sentences().map(|(_, s)| s.tree.text()).collect();
        assert_eq!(texts, vec!["eerste", "tweede", "derde"]);
        assert!(doc.starts_paragraph(2));
    }

    #[test]
    fn rejects_unnamed_sentence_files() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(dir.path(), "sentence.ron", &["x"]);
        let err = load_document(dir.path()).unwrap_err();
        assert!(matches!(err, CorefError::Load { .. }));
    }
}
