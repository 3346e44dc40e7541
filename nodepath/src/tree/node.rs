//! Node storage, name rules and the borrowed node view.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::expr::{is_accessor_trigger, is_reserved, SEPARATOR};
use crate::tree::collection::NodeCollection;
use crate::tree::{FindStep, NodeId, Tree};

/// Arena slot for one node.
///
/// `path`, `full_path` and `hash` are computed on first use and cleared by
/// the tree whenever the node or one of its ancestors is renamed or moved.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: NodeCollection,
    pub(crate) value: T,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) icon: Option<String>,
    pub(crate) path: OnceLock<String>,
    pub(crate) full_path: OnceLock<String>,
    pub(crate) hash: OnceLock<u64>,
}

impl<T> Node<T> {
    pub(crate) fn new(name: String, value: T) -> Self {
        Self {
            name,
            parent: None,
            children: NodeCollection::new(),
            value,
            title: None,
            description: None,
            icon: None,
            path: OnceLock::new(),
            full_path: OnceLock::new(),
            hash: OnceLock::new(),
        }
    }

    pub(crate) fn invalidate_paths(&mut self) {
        self.path.take();
        self.full_path.take();
        self.hash.take();
    }
}

/// Case folding used for child keys, equality and hashing.
///
/// Folds one character at a time. A character whose uppercase form is more
/// than one character (`ß` becomes `SS`) is kept as is, so folding never
/// changes the character count.
pub(crate) fn fold_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        })
        .collect()
}

/// Appends `name` to `path` following the full-path rules.
pub(crate) fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else if path.len() == 1 && path.starts_with(SEPARATOR) {
        format!("{SEPARATOR}{name}")
    } else {
        format!("{path}{SEPARATOR}{name}")
    }
}

/// Checks that `name` can be used for a non-root node.
///
/// Names must be non-empty, free of `/ \ * ? ! @ # $ % ^ &` and of the
/// indexer bracket `[`, without surrounding whitespace, and not `.` or `..`.
/// Paths could never reach a name that breaks the last three rules.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] describing the first violation.
///
/// # Examples
///
/// ```
/// use nodepath::tree::validate_name;
///
/// assert!(validate_name("reports").is_ok());
/// assert!(validate_name("Q1 2024").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("a/b").is_err());
/// assert!(validate_name("..").is_err());
/// assert!(validate_name("a[0]").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason: String| Error::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name must not be empty".to_string()));
    }
    if let Some(ch) = name.chars().find(|&c| is_reserved(c)) {
        return Err(invalid(format!("contains reserved character '{ch}'")));
    }
    if let Some(ch) = name.chars().find(|&c| is_accessor_trigger(c)) {
        return Err(invalid(format!("contains accessor character '{ch}'")));
    }
    if name.trim() != name {
        return Err(invalid(
            "must not start or end with whitespace".to_string(),
        ));
    }
    if name == "." || name == ".." {
        return Err(invalid("is reserved for path navigation".to_string()));
    }
    Ok(())
}

/// A borrowed view of one node in a [`Tree`].
///
/// Two views are equal when their full paths match ignoring case, which also
/// makes views from different trees comparable.
///
/// # Examples
///
/// ```
/// use nodepath::Tree;
///
/// let mut tree = Tree::new(());
/// let docs = tree.insert(tree.root(), "docs", ()).unwrap();
/// let guide = tree.insert(docs, "guide", ()).unwrap();
///
/// let node = tree.get(guide).unwrap();
/// assert_eq!(node.name(), "guide");
/// assert_eq!(node.path(), "/docs");
/// assert_eq!(node.full_path(), "/docs/guide");
/// assert_eq!(node.parent().unwrap().name(), "docs");
/// assert_eq!(node.find("../..").unwrap().unwrap().full_path(), "/");
/// ```
pub struct NodeRef<'a, T> {
    tree: &'a Tree<T>,
    id: NodeId,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn node(&self) -> &'a Node<T> {
        self.tree.slot(self.id)
    }

    /// The id of this node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to.
    #[must_use]
    pub fn tree(&self) -> &'a Tree<T> {
        self.tree
    }

    /// The node's own name; `/` for the root.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    /// The parent's full path, or empty for a parentless node.
    #[must_use]
    pub fn path(&self) -> &'a str {
        self.tree.path_of(self.id)
    }

    /// The complete address of the node.
    #[must_use]
    pub fn full_path(&self) -> &'a str {
        self.tree.full_path_of(self.id)
    }

    /// The parent node, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.node().parent.map(|id| NodeRef::new(self.tree, id))
    }

    /// Returns true if the node has no parent.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.node().parent.is_none()
    }

    /// The node's children.
    #[must_use]
    pub fn children(&self) -> &'a NodeCollection {
        &self.node().children
    }

    /// Looks up a direct child by name, ignoring case.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<NodeRef<'a, T>> {
        self.children()
            .try_get(name)
            .map(|id| NodeRef::new(self.tree, id))
    }

    /// The node's payload.
    #[must_use]
    pub fn value(&self) -> &'a T {
        &self.node().value
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> Option<&'a str> {
        self.node().title.as_deref()
    }

    /// Display description.
    #[must_use]
    pub fn description(&self) -> Option<&'a str> {
        self.node().description.as_deref()
    }

    /// Display icon.
    #[must_use]
    pub fn icon(&self) -> Option<&'a str> {
        self.node().icon.as_deref()
    }

    /// Resolves `path` starting at this node. See [`Tree::find`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cycle`] if an absolute path meets a looping parent
    /// chain.
    pub fn find(&self, path: &str) -> Result<Option<NodeRef<'a, T>>> {
        Ok(self
            .tree
            .find(self.id, path)?
            .map(|id| NodeRef::new(self.tree, id)))
    }

    /// Resolves `path` with a per-step hook. See [`Tree::find_with`].
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find), plus [`Error::UnknownNode`] if the hook
    /// returns a foreign id.
    pub fn find_with<F>(&self, path: &str, hook: F) -> Result<Option<NodeRef<'a, T>>>
    where
        F: FnMut(FindStep<'_>) -> NodeId,
    {
        Ok(self
            .tree
            .find_with(self.id, path, hook)?
            .map(|id| NodeRef::new(self.tree, id)))
    }

    /// Walks up to the topmost ancestor. See [`Tree::find_root`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cycle`] if the parent chain loops.
    pub fn find_root(&self) -> Result<NodeRef<'a, T>> {
        Ok(NodeRef::new(self.tree, self.tree.find_root(self.id)?))
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree.hash_of(self.id) == other.tree.hash_of(other.id)
            && fold_name(self.full_path()) == fold_name(other.full_path())
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T> Hash for NodeRef<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.tree.hash_of(self.id));
    }
}

impl<T> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("full_path", &self.full_path())
            .finish()
    }
}

impl<T> fmt::Display for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "/"), "/");
        assert_eq!(join_path("", "orphan"), "orphan");
        assert_eq!(join_path("/", "a"), "/a");
        assert_eq!(join_path("/a", "b"), "/a/b");
        assert_eq!(join_path("orphan", "b"), "orphan/b");
    }

    #[test]
    fn test_validate_name_rejects_reserved() {
        for name in ["a/b", "a\\b", "a*", "?", "x!", "@", "#1", "$", "%", "^", "&&"] {
            let err = validate_name(name).unwrap_err();
            assert!(
                err.to_string().contains("reserved character"),
                "{name}: {err}"
            );
        }
    }

    #[test]
    fn test_validate_name_rules() {
        assert!(validate_name("").is_err());
        assert!(validate_name(" a").is_err());
        assert!(validate_name("a ").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("a.b").is_ok());
        assert!(validate_name("...").is_ok());
        assert!(validate_name("with space").is_ok());
        assert!(validate_name("[0]").is_err());
        assert!(validate_name("a[b").is_err());
        assert!(validate_name("a]b").is_ok());
    }

    #[test]
    fn test_fold_name_keeps_character_count() {
        assert_eq!(fold_name("straße"), "STRAßE");
        assert_eq!(fold_name("STRASSE"), "STRASSE");
        assert_eq!(fold_name("Éclair"), "ÉCLAIR");
        assert_eq!(fold_name("ŉ"), "ŉ");
    }

    #[test]
    fn test_root_paths() {
        let tree = Tree::new(());
        let root = tree.root_node();
        assert_eq!(root.name(), "/");
        assert_eq!(root.path(), "");
        assert_eq!(root.full_path(), "/");
        assert!(root.is_detached());
    }

    #[test]
    fn test_nested_paths() {
        let mut tree = Tree::new(());
        let a = tree.insert(tree.root(), "a", ()).unwrap();
        let b = tree.insert(a, "b", ()).unwrap();
        let c = tree.insert(b, "c", ()).unwrap();

        let node = tree.get(c).unwrap();
        assert_eq!(node.path(), "/a/b");
        assert_eq!(node.full_path(), "/a/b/c");
        assert_eq!(tree.get(a).unwrap().path(), "/");
    }

    #[test]
    fn test_detached_paths() {
        let mut tree = Tree::new(());
        let orphan = tree.create_node("orphan", ()).unwrap();
        let child = tree.insert(orphan, "child", ()).unwrap();

        assert_eq!(tree.get(orphan).unwrap().full_path(), "orphan");
        assert_eq!(tree.get(child).unwrap().path(), "orphan");
        assert_eq!(tree.get(child).unwrap().full_path(), "orphan/child");
    }

    #[test]
    fn test_equality_ignores_case() {
        let mut left = Tree::new(());
        let mut right = Tree::new(());
        let a = left.insert(left.root(), "Docs", ()).unwrap();
        let b = right.insert(right.root(), "docs", ()).unwrap();
        let c = right.insert(right.root(), "other", ()).unwrap();

        let a = left.get(a).unwrap();
        let b = right.get(b).unwrap();
        let c = right.get(c).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display_and_payload() {
        let mut tree = Tree::new(0u32);
        let id = tree.insert(tree.root(), "counter", 7).unwrap();
        let node = tree.get(id).unwrap();
        assert_eq!(*node.value(), 7);
        assert_eq!(node.to_string(), "/counter");
        assert_eq!(node.child("missing"), None);
    }
}
