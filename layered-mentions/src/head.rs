//! Syntactic head finding.

use layered_coref::NodeRef;

/// Relations that mark the head daughter of a constituent.
const HEAD_RELATIONS: &[&str] = &["hd", "whd", "rhd", "crd", "cmp"];

/// Token index of the lexical head of `node`.
///
/// Descends through the first head-marked daughter, or the last daughter
/// when none is marked, until a leaf is reached.
pub fn head_index(node: NodeRef<'_>) -> usize {
    let mut current = node;
    loop {
        let next = current
            .find_child(|child| child.is_any("rel", HEAD_RELATIONS))
            .or_else(|| current.children().last());
        match next {
            Some(child) => current = child,
            None => return current.begin(),
        }
    }
}

/// Word node at `index` under `node`; `node` itself when it is a leaf.
pub fn head_word<'t>(node: NodeRef<'t>, index: usize) -> NodeRef<'t> {
    if node.is_leaf() {
        return node;
    }
    node.find(|n| n.is_word() && n.begin() == index)
        .or_else(|| node.tree().token_at(index))
        .unwrap_or(node)
}
