//! Read-only parse tree adapter.
//!
//! Trees follow the Alpino dependency-annotated constituency format: every
//! node carries string attributes (`rel`, `cat`, `pt`, `lemma`, ...), word
//! leaves carry a `word` attribute and cover exactly one token. The core
//! never mutates a tree after construction; all derived annotations live in
//! side tables keyed by position.

use crate::{CorefError, CorefResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Index of a node inside its [`ParseTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// A single constituent or word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// First token covered by this node.
    pub begin: usize,
    /// One past the last token covered by this node.
    pub end: usize,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub children: Vec<NodeId>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

/// Arena-backed parse tree for one sentence.
///
/// The word leaves are indexed by token offset once, when the tree is built
/// or deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TreeParts", into = "TreeParts")]
pub struct ParseTree {
    nodes: Vec<Node>,
    root: NodeId,
    tokens: Vec<NodeId>,
}

/// Serialized form of a [`ParseTree`], without the token index.
#[derive(Serialize, Deserialize)]
struct TreeParts {
    nodes: Vec<Node>,
    root: NodeId,
}

impl From<TreeParts> for ParseTree {
    fn from(parts: TreeParts) -> Self {
        ParseTree::from_nodes(parts.nodes, parts.root)
    }
}

impl From<ParseTree> for TreeParts {
    fn from(tree: ParseTree) -> Self {
        TreeParts {
            nodes: tree.nodes,
            root: tree.root,
        }
    }
}

impl ParseTree {
    pub fn from_nodes(nodes: Vec<Node>, root: NodeId) -> Self {
        let mut tokens: Vec<NodeId> = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.attrs.contains_key("word"))
            .map(|(idx, _)| NodeId(idx))
            .collect();
        tokens.sort_by_key(|id| nodes[id.0].begin);
        Self { nodes, root, tokens }
    }

    /// Check that parent and child links agree and that the root reaches
    /// every node at most once.
    pub fn validate(&self, sentence: usize) -> CorefResult<()> {
        let malformed = |message: String| CorefError::MalformedTree { sentence, message };

        if self.root.0 >= self.nodes.len() {
            return Err(malformed(format!("root {} out of range", self.root.0)));
        }
        if self.nodes[self.root.0].parent.is_some() {
            return Err(malformed("root node has a parent".into()));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            for child in &node.children {
                let child_node = self
                    .nodes
                    .get(child.0)
                    .ok_or_else(|| malformed(format!("node {} has dangling child {}", idx, child.0)))?;
                if child_node.parent != Some(NodeId(idx)) {
                    return Err(malformed(format!(
                        "node {} lists child {} whose parent disagrees",
                        idx, child.0
                    )));
                }
            }
            if node.attrs.contains_key("word") && node.end <= node.begin {
                return Err(malformed(format!("word node {} has an empty span", idx)));
            }
        }

        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.0], true) {
                return Err(malformed(format!("node {} is reachable twice", id.0)));
            }
            stack.extend(self.nodes[id.0].children.iter().copied());
        }

        Ok(())
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.node(self.root)
    }

    /// Handle for `id`. Ids are only ever produced by this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        if id.0 < self.nodes.len() {
            Some(self.node(id))
        } else {
            None
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in document order, root included.
    pub fn nodes(&self) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Word leaves in token order.
    pub fn tokens(&self) -> Vec<NodeRef<'_>> {
        self.tokens.iter().map(|&id| self.node(id)).collect()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn token_at(&self, begin: usize) -> Option<NodeRef<'_>> {
        let idx = self.token_start(begin);
        self.tokens
            .get(idx)
            .map(|&id| self.node(id))
            .filter(|node| node.begin() == begin)
    }

    /// Surface words of the tokens starting in `begin..end`.
    pub fn words(&self, begin: usize, end: usize) -> Vec<String> {
        let (from, to) = (self.token_start(begin), self.token_start(end));
        self.tokens[from..to.max(from)]
            .iter()
            .filter_map(|&id| self.nodes[id.0].attrs.get("word").cloned())
            .collect()
    }

    /// Position in the token index of the first leaf starting at or after `begin`.
    fn token_start(&self, begin: usize) -> usize {
        self.tokens
            .partition_point(|id| self.nodes[id.0].begin < begin)
    }

    pub fn text(&self) -> String {
        self.words(0, usize::MAX).join(" ")
    }
}

/// Borrowed handle to a node; all structural queries go through it.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a ParseTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a ParseTree {
        self.tree
    }

    fn data(&self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    pub fn attrs(&self) -> &'a BTreeMap<String, String> {
        &self.data().attrs
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.data().attrs.get(name).map(String::as_str)
    }

    pub fn is(&self, name: &str, value: &str) -> bool {
        self.get(name) == Some(value)
    }

    pub fn is_any(&self, name: &str, values: &[&str]) -> bool {
        self.get(name).map_or(false, |v| values.contains(&v))
    }

    pub fn word(&self) -> Option<&'a str> {
        self.get("word")
    }

    pub fn lemma(&self) -> Option<&'a str> {
        self.get("lemma")
    }

    pub fn rel(&self) -> Option<&'a str> {
        self.get("rel")
    }

    pub fn cat(&self) -> Option<&'a str> {
        self.get("cat")
    }

    pub fn pt(&self) -> Option<&'a str> {
        self.get("pt")
    }

    pub fn begin(&self) -> usize {
        self.data().begin
    }

    pub fn end(&self) -> usize {
        self.data().end
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.node(id))
    }

    pub fn child(&self, n: usize) -> Option<NodeRef<'a>> {
        self.data().children.get(n).map(|&id| self.tree.node(id))
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.data().children.is_empty()
    }

    pub fn is_word(&self) -> bool {
        self.data().attrs.contains_key("word")
    }

    /// Descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants {
            tree: self.tree,
            stack: self.data().children.iter().rev().copied().collect(),
        }
    }

    /// First descendant (document order) satisfying `pred`.
    pub fn find(&self, pred: impl FnMut(&NodeRef<'a>) -> bool) -> Option<NodeRef<'a>> {
        self.descendants().find(pred)
    }

    pub fn find_child(&self, mut pred: impl FnMut(&NodeRef<'a>) -> bool) -> Option<NodeRef<'a>> {
        self.children().find(|child| pred(child))
    }

    /// Word leaves under this node in token order; a word leaf yields itself.
    pub fn words(&self) -> Vec<NodeRef<'a>> {
        if self.is_leaf() {
            return if self.is_word() { vec![*self] } else { Vec::new() };
        }
        let mut words: Vec<_> = self.descendants().filter(|n| n.is_word()).collect();
        words.sort_by_key(|n| n.begin());
        words
    }

    /// True when `ancestor` lies strictly above this node.
    pub fn is_descendant_of(&self, ancestor: NodeId) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.id == ancestor {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Nearest node, starting at `self` and climbing, that satisfies `pred`.
    pub fn ancestor_or_self(&self, mut pred: impl FnMut(&NodeRef<'a>) -> bool) -> Option<NodeRef<'a>> {
        let mut current = Some(*self);
        while let Some(node) = current {
            if pred(&node) {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id.0)
            .field("span", &(self.begin()..self.end()))
            .field("attrs", self.attrs())
            .finish()
    }
}

/// Preorder walk over part of a tree.
pub struct Descendants<'a> {
    tree: &'a ParseTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.nodes[id.0].children.iter().rev().copied());
        Some(self.tree.node(id))
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds a [`ParseTree`] in nesting order.
///
/// Leaves receive consecutive token offsets as they are added; internal
/// nodes span their non-empty children. The builder starts with an Alpino
/// `top` node that every other node hangs below.
///
/// ```
/// use layered_coref::TreeBuilder;
///
/// let tree = TreeBuilder::sentence(|s| {
///     s.node(&[("cat", "smain")], |s| {
///         s.leaf("Jan", &[("rel", "su"), ("pt", "n"), ("ntype", "eigen")]);
///         s.leaf("slaapt", &[("rel", "hd"), ("pt", "ww")]);
///     });
///     s.leaf(".", &[("pt", "let")]);
/// });
/// assert_eq!(tree.text(), "Jan slaapt .");
/// ```
pub struct TreeBuilder {
    nodes: Vec<Node>,
    stack: Vec<NodeId>,
    next_token: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        let mut attrs = BTreeMap::new();
        attrs.insert("cat".to_string(), "top".to_string());
        attrs.insert("rel".to_string(), "top".to_string());
        TreeBuilder {
            nodes: vec![Node {
                begin: 0,
                end: 0,
                parent: None,
                children: Vec::new(),
                attrs,
            }],
            stack: vec![NodeId(0)],
            next_token: 0,
        }
    }

    /// Build a whole sentence below a fresh `top` node.
    pub fn sentence(build: impl FnOnce(&mut Self)) -> ParseTree {
        let mut builder = Self::new();
        build(&mut builder);
        builder.build()
    }

    fn push(&mut self, attrs: &[(&str, &str)]) -> NodeId {
        let parent = self.stack.last().copied();
        self.push_under(parent, attrs)
    }

    fn push_under(&mut self, parent: Option<NodeId>, attrs: &[(&str, &str)]) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            begin: self.next_token,
            end: self.next_token,
            parent,
            children: Vec::new(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Add an internal node whose children are created by `build`.
    pub fn node(&mut self, attrs: &[(&str, &str)], build: impl FnOnce(&mut Self)) -> NodeId {
        let id = self.push(attrs);
        self.stack.push(id);
        build(self);
        self.stack.pop();
        self.close_span(id);
        id
    }

    /// Add a word covering the next token.
    pub fn leaf(&mut self, word: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.push(attrs);
        self.make_word(id, word);
        id
    }

    /// Add a word covering the next token but hanging directly below the
    /// `top` node, the way Alpino attaches punctuation.
    pub fn top_leaf(&mut self, word: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.push_under(Some(NodeId(0)), attrs);
        self.make_word(id, word);
        id
    }

    fn make_word(&mut self, id: NodeId, word: &str) {
        let node = &mut self.nodes[id.0];
        node.attrs.insert("word".to_string(), word.to_string());
        node.attrs
            .entry("lemma".to_string())
            .or_insert_with(|| word.to_lowercase());
        node.end = node.begin + 1;
        self.next_token += 1;
    }

    /// Add an empty co-indexed node that covers no tokens.
    pub fn trace(&mut self, attrs: &[(&str, &str)]) -> NodeId {
        self.push(attrs)
    }

    fn close_span(&mut self, id: NodeId) {
        let spans: Vec<(usize, usize)> = self.nodes[id.0]
            .children
            .iter()
            .map(|child| (self.nodes[child.0].begin, self.nodes[child.0].end))
            .filter(|(begin, end)| end > begin)
            .collect();
        let node = &mut self.nodes[id.0];
        if let (Some(begin), Some(end)) = (
            spans.iter().map(|s| s.0).min(),
            spans.iter().map(|s| s.1).max(),
        ) {
            node.begin = begin;
            node.end = end;
        }
    }

    pub fn build(mut self) -> ParseTree {
        self.close_span(NodeId(0));
        ParseTree::from_nodes(self.nodes, NodeId(0))
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParseTree {
        TreeBuilder::sentence(|s| {
            s.node(&[("cat", "smain"), ("rel", "--")], |s| {
                s.node(&[("cat", "np"), ("rel", "su")], |s| {
                    s.leaf("de", &[("rel", "det"), ("pt", "lid")]);
                    s.leaf("minister", &[("rel", "hd"), ("pt", "n")]);
                });
                s.leaf("lacht", &[("rel", "hd"), ("pt", "ww")]);
            });
            s.leaf(".", &[("rel", "--"), ("pt", "let")]);
        })
    }

    #[test]
    fn builder_assigns_spans() {
        let tree = sample();
        assert!(tree.validate(0).is_ok());
        assert_eq!(tree.root().begin(), 0);
        assert_eq!(tree.root().end(), 4);

        let np = tree.nodes().find(|n| n.is("cat", "np")).unwrap();
        assert_eq!((np.begin(), np.end()), (0, 2));
        assert_eq!(np.parent().unwrap().cat(), Some("smain"));
        assert_eq!(tree.text(), "de minister lacht .");
    }

    #[test]
    fn document_order_and_words() {
        let tree = sample();
        let cats: Vec<_> = tree.nodes().filter_map(|n| n.cat()).collect();
        assert_eq!(cats, vec!["top", "smain", "np"]);

        let smain = tree.root().child(0).unwrap();
        let words: Vec<_> = smain.words().iter().filter_map(|w| w.word()).collect();
        assert_eq!(words, vec!["de", "minister", "lacht"]);
        assert_eq!(tree.words(1, 3), vec!["minister", "lacht"]);
        assert_eq!(tree.token_at(1).and_then(|t| t.lemma()), Some("minister"));
    }

    #[test]
    fn traces_do_not_widen_spans() {
        let tree = TreeBuilder::sentence(|s| {
            s.node(&[("cat", "ssub")], |s| {
                s.trace(&[("rel", "su"), ("index", "1")]);
                s.leaf("slapen", &[("rel", "hd"), ("pt", "ww")]);
            });
        });
        let ssub = tree.root().child(0).unwrap();
        assert_eq!((ssub.begin(), ssub.end()), (0, 1));
        let trace = ssub.child(0).unwrap();
        assert!(trace.is_leaf() && !trace.is_word());
    }

    #[test]
    fn validate_rejects_dangling_child() {
        let tree = ParseTree::from_nodes(
            vec![Node {
                begin: 0,
                end: 0,
                parent: None,
                children: vec![NodeId(3)],
                attrs: BTreeMap::new(),
            }],
            NodeId(0),
        );
        let err = tree.validate(7).unwrap_err();
        assert!(matches!(err, CorefError::MalformedTree { sentence: 7, .. }));
    }

    #[test]
    fn top_leaves_attach_to_top() {
        let tree = TreeBuilder::sentence(|s| {
            s.node(&[("cat", "np")], |s| {
                s.leaf("Piet", &[("rel", "hd")]);
                s.top_leaf(",", &[("pt", "let")]);
                s.leaf("Jan", &[("rel", "app")]);
            });
        });
        let np = tree.root().child(0).unwrap();
        assert_eq!(np.child_count(), 2);
        assert_eq!((np.begin(), np.end()), (0, 3));
        let comma = tree.token_at(1).unwrap();
        assert_eq!(comma.parent(), Some(tree.root()));
    }

    fn word_node(begin: usize, word: &str) -> Node {
        Node {
            begin,
            end: begin + 1,
            parent: Some(NodeId(0)),
            children: Vec::new(),
            attrs: [("word".to_string(), word.to_string())].into_iter().collect(),
        }
    }

    #[test]
    fn token_index_follows_offsets_not_arena_order() {
        let top = Node {
            begin: 0,
            end: 3,
            parent: None,
            children: vec![NodeId(1), NodeId(2), NodeId(3)],
            attrs: BTreeMap::new(),
        };
        let tree = ParseTree::from_nodes(
            vec![top, word_node(2, "."), word_node(0, "Jan"), word_node(1, "slaapt")],
            NodeId(0),
        );
        assert_eq!(tree.token_count(), 3);
        assert_eq!(tree.text(), "Jan slaapt .");
        assert_eq!(tree.token_at(2).and_then(|t| t.word()), Some("."));
        assert!(tree.token_at(3).is_none());
        assert_eq!(tree.words(1, 9), vec!["slaapt", "."]);
        assert!(tree.words(2, 1).is_empty());

        let restored: ParseTree = ron::from_str(&ron::to_string(&tree).unwrap()).unwrap();
        assert_eq!(restored, tree);
        assert_eq!(restored.token_at(0).and_then(|t| t.word()), Some("Jan"));
    }

    #[test]
    fn ancestry_queries() {
        let tree = sample();
        let minister = tree.token_at(1).unwrap();
        let smain = tree.root().child(0).unwrap();
        assert!(minister.is_descendant_of(smain.id()));
        assert!(!smain.is_descendant_of(minister.id()));
        let clause = minister.ancestor_or_self(|n| n.is("cat", "smain"));
        assert_eq!(clause, Some(smain));
    }
}
