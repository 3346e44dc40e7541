//! Name-keyed child collections.

use indexmap::IndexMap;

use crate::tree::node::{fold_name, Node};
use crate::tree::NodeId;

/// The ordered, case-insensitively keyed children of one node.
///
/// A collection never holds two children whose names differ only in case.
/// It is read through [`Tree::children`](crate::tree::Tree::children);
/// every insertion and replacement goes through the tree, which records the
/// new parent on the child in the same step.
#[derive(Debug, Clone, Default)]
pub struct NodeCollection {
    entries: IndexMap<String, NodeId>,
}

/// How [`attach`] treats an existing child with the same folded name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertPolicy {
    /// Refuse the insertion.
    Reject,
    /// Swap the existing child out, keeping its position.
    Replace,
}

/// Outcome of [`attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attached {
    /// The child was appended.
    Added,
    /// The child took the place of a previous child, now detached.
    Replaced(NodeId),
    /// A child with the same folded name exists and the policy rejected it.
    Conflict,
}

impl NodeCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks a child up by name, ignoring case.
    #[must_use]
    pub fn try_get(&self, name: &str) -> Option<NodeId> {
        self.entries.get(&fold_name(name)).copied()
    }

    /// Returns true if a child with this name exists, ignoring case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&fold_name(name))
    }

    /// Returns the child at `index` in insertion order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<NodeId> {
        self.entries.get_index(index).map(|(_, &id)| id)
    }

    /// Iterates the children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.values().copied()
    }

    /// Iterates the folded (upper-cased) lookup keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<NodeId> {
        self.entries.shift_remove(&fold_name(name))
    }

    pub(crate) fn rekey(&mut self, old_name: &str, new_name: &str) {
        let old_key = fold_name(old_name);
        if let Some((index, _, id)) = self.entries.shift_remove_full(&old_key) {
            self.entries.shift_insert(index, fold_name(new_name), id);
        }
    }
}

/// Inserts `child` into `parent`'s collection and records the parent on it.
///
/// This is the only place a node's parent is assigned. The caller has already
/// detached `child` from any previous parent and checked for cycles.
pub(crate) fn attach<T>(
    nodes: &mut [Node<T>],
    parent: NodeId,
    child: NodeId,
    policy: InsertPolicy,
) -> Attached {
    let key = fold_name(&nodes[child.index()].name);
    let entries = &mut nodes[parent.index()].children.entries;

    let outcome = match (entries.get_index_of(&key), policy) {
        (Some(_), InsertPolicy::Reject) => return Attached::Conflict,
        (Some(index), InsertPolicy::Replace) => {
            let previous = std::mem::replace(&mut entries[index], child);
            Attached::Replaced(previous)
        }
        (None, _) => {
            entries.insert(key, child);
            Attached::Added
        }
    };

    nodes[child.index()].parent = Some(parent);
    if let Attached::Replaced(previous) = outcome {
        if previous != child {
            nodes[previous.index()].parent = None;
        }
    }
    outcome
}
