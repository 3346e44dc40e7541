//! In-memory named trees.
//!
//! A [`Tree`] is an arena that owns every node. Nodes refer to each other
//! through [`NodeId`]s: a node owns its [`NodeCollection`] of child ids and
//! keeps a plain, non-owning id of its parent. The parent id is written only
//! while a child is inserted into or replaced in a collection, so a cycle
//! cannot be built through this API.
//!
//! # Concurrency
//!
//! The tree has no internal locking. Reads take `&Tree` and mutation takes
//! `&mut Tree`, so within one owner the borrow checker already rules out a
//! mutation racing a lookup. To share a tree between threads while mutating
//! it, wrap it in a `std::sync::RwLock` (or rebuild and swap an immutable
//! tree). Lazily computed paths are stored in `OnceLock`s, so any number of
//! concurrent readers is fine.
//!
//! # Examples
//!
//! ```
//! use nodepath::Tree;
//!
//! let mut tree = Tree::new(());
//! let docs = tree.insert(tree.root(), "docs", ()).unwrap();
//! tree.insert(docs, "guide", ()).unwrap();
//!
//! let guide = tree.find(tree.root(), "/DOCS/guide").unwrap().unwrap();
//! assert_eq!(tree.get(guide).unwrap().full_path(), "/docs/guide");
//! assert!(tree.find(docs, "missing").unwrap().is_none());
//! ```

mod collection;
mod find;
mod node;

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::expr::SEPARATOR;

pub use collection::NodeCollection;
pub use find::FindStep;
pub use node::{validate_name, NodeRef};

use collection::{attach, Attached, InsertPolicy};
use node::{fold_name, join_path, Node};

/// Identifies a node within one [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node property named in a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeProperty {
    /// The node's own name.
    Name,
    /// The parent's full path.
    Path,
    /// The node's full path.
    FullPath,
    /// Display title.
    Title,
    /// Display description.
    Description,
    /// Display icon.
    Icon,
}

impl NodeProperty {
    /// Returns true if a change to this property changes addresses.
    #[must_use]
    pub fn affects_path(self) -> bool {
        matches!(self, Self::Name | Self::Path | Self::FullPath)
    }
}

/// A change notification delivered to [`Tree::subscribe`] listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyChange {
    /// The node that changed.
    pub node: NodeId,
    /// The property that changed.
    pub property: NodeProperty,
}

type Listener = Box<dyn Fn(&PropertyChange) + Send + Sync>;

/// An arena-backed tree of named nodes carrying payloads of type `T`.
///
/// Concrete node kinds are expressed through the payload, e.g.
/// `Tree<Category>`, so lookups stay statically dispatched.
pub struct Tree<T = ()> {
    nodes: Vec<Node<T>>,
    root: NodeId,
    listeners: Vec<Listener>,
}

impl<T: Default> Default for Tree<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("nodes", &self.nodes)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T> Tree<T> {
    /// Creates a tree holding only a root node named `/`.
    pub fn new(root_value: T) -> Self {
        Self {
            nodes: vec![Node::new(SEPARATOR.to_string(), root_value)],
            root: NodeId(0),
            listeners: Vec::new(),
        }
    }

    /// The root node's id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// A view of the root node.
    #[must_use]
    pub fn root_node(&self) -> NodeRef<'_, T> {
        NodeRef::new(self, self.root)
    }

    /// Number of nodes in the arena, attached or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// A view of the node, or `None` if the id is not from this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        (id.index() < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    /// The children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Option<&NodeCollection> {
        self.nodes.get(id.index()).map(|node| &node.children)
    }

    /// Mutable access to a node's payload.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.index()).map(|node| &mut node.value)
    }

    /// Creates a detached node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if the name is not allowed.
    pub fn create_node(&mut self, name: &str, value: T) -> Result<NodeId> {
        validate_name(name)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name.to_string(), value));
        Ok(id)
    }

    /// Creates a node and adds it under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`], [`Error::DuplicateName`] or
    /// [`Error::UnknownNode`].
    pub fn insert(&mut self, parent: NodeId, name: &str, value: T) -> Result<NodeId> {
        self.check(parent)?;
        if self.nodes[parent.index()].children.contains(name) {
            return Err(self.duplicate(parent, name));
        }
        let child = self.create_node(name, value)?;
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// Adds `child` under `parent`, moving it out of any previous parent.
    ///
    /// A sibling whose name differs only in case is a conflict; adding a
    /// node that is already this parent's child is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] on a name conflict,
    /// [`Error::WouldCreateCycle`] if `child` is `parent` or one of its
    /// ancestors, [`Error::Validation`] when attaching the tree root, and
    /// [`Error::UnknownNode`] for foreign ids.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_attach(parent, child)?;
        let name = &self.nodes[child.index()].name;
        match self.nodes[parent.index()].children.try_get(name) {
            Some(existing) if existing == child => return Ok(()),
            Some(_) => return Err(self.duplicate(parent, name)),
            None => {}
        }

        self.detach(child);
        let outcome = attach(&mut self.nodes, parent, child, InsertPolicy::Reject);
        debug_assert_eq!(outcome, Attached::Added);
        log::debug!("attached {} under {}", self.nodes[child.index()].name, self.full_path_of(parent));
        self.moved(child);
        Ok(())
    }

    /// Puts `child` under `parent`, replacing a sibling with the same
    /// case-insensitive name in place.
    ///
    /// Returns the replaced node, which is left detached.
    ///
    /// # Errors
    ///
    /// Same as [`add_child`](Self::add_child), except name conflicts.
    pub fn replace_child(&mut self, parent: NodeId, child: NodeId) -> Result<Option<NodeId>> {
        self.check_attach(parent, child)?;
        let name = &self.nodes[child.index()].name;
        if self.nodes[parent.index()].children.try_get(name) == Some(child) {
            return Ok(None);
        }

        self.detach(child);
        let replaced = match attach(&mut self.nodes, parent, child, InsertPolicy::Replace) {
            Attached::Replaced(previous) => {
                log::debug!(
                    "replaced {} under {}",
                    self.nodes[previous.index()].name,
                    self.full_path_of(parent)
                );
                self.moved(previous);
                Some(previous)
            }
            Attached::Added | Attached::Conflict => None,
        };
        self.moved(child);
        Ok(replaced)
    }

    /// Removes the child called `name` (ignoring case) from `parent`.
    ///
    /// The removed node and its subtree stay in the arena, detached, and may
    /// be attached again later.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `parent` is not from this tree.
    pub fn remove_child(&mut self, parent: NodeId, name: &str) -> Result<Option<NodeId>> {
        self.check(parent)?;
        let removed = self.nodes[parent.index()].children.remove(name);
        if let Some(child) = removed {
            self.nodes[child.index()].parent = None;
            log::debug!("detached {name} from {}", self.full_path_of(parent));
            self.moved(child);
        }
        Ok(removed)
    }

    /// Renames a node, keeping its position among its siblings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`], [`Error::DuplicateName`] if a sibling
    /// already uses the name, [`Error::Validation`] for the root, or
    /// [`Error::UnknownNode`].
    pub fn rename(&mut self, id: NodeId, name: &str) -> Result<()> {
        self.check(id)?;
        if id == self.root {
            return Err(Error::Validation {
                field: "name".to_string(),
                message: "the root node cannot be renamed".to_string(),
            });
        }
        validate_name(name)?;

        let old_name = self.nodes[id.index()].name.clone();
        if let Some(parent) = self.nodes[id.index()].parent {
            match self.nodes[parent.index()].children.try_get(name) {
                Some(existing) if existing != id => return Err(self.duplicate(parent, name)),
                _ => self.nodes[parent.index()].children.rekey(&old_name, name),
            }
        }
        self.nodes[id.index()].name = name.to_string();
        log::debug!("renamed {old_name} to {name}");

        self.invalidate_subtree(id);
        self.publish(id, NodeProperty::Name);
        self.publish(id, NodeProperty::FullPath);
        Ok(())
    }

    /// Sets the display title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] for foreign ids.
    pub fn set_title(&mut self, id: NodeId, title: Option<String>) -> Result<()> {
        self.check(id)?;
        self.nodes[id.index()].title = title;
        self.notify_property_changed(id, NodeProperty::Title)
    }

    /// Sets the display description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] for foreign ids.
    pub fn set_description(&mut self, id: NodeId, description: Option<String>) -> Result<()> {
        self.check(id)?;
        self.nodes[id.index()].description = description;
        self.notify_property_changed(id, NodeProperty::Description)
    }

    /// Sets the display icon.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] for foreign ids.
    pub fn set_icon(&mut self, id: NodeId, icon: Option<String>) -> Result<()> {
        self.check(id)?;
        self.nodes[id.index()].icon = icon;
        self.notify_property_changed(id, NodeProperty::Icon)
    }

    /// Announces that `property` of `id` changed.
    ///
    /// Cached paths and hashes of the node and its descendants are dropped
    /// when the property is `Name`, `Path` or `FullPath`; listeners are
    /// called in every case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] for foreign ids.
    pub fn notify_property_changed(&mut self, id: NodeId, property: NodeProperty) -> Result<()> {
        self.check(id)?;
        if property.affects_path() {
            self.invalidate_subtree(id);
        }
        self.publish(id, property);
        Ok(())
    }

    /// Registers a listener for property change notifications.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&PropertyChange) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Depth-first, pre-order iteration over `from` and its descendants.
    #[must_use]
    pub fn walk(&self, from: NodeId) -> Walk<'_, T> {
        let stack = if from.index() < self.nodes.len() {
            vec![from]
        } else {
            Vec::new()
        };
        Walk { tree: self, stack }
    }

    pub(crate) fn slot(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index()]
    }

    pub(crate) fn check(&self, id: NodeId) -> Result<()> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(Error::UnknownNode { id })
        }
    }

    pub(crate) fn path_of(&self, id: NodeId) -> &str {
        let node = self.slot(id);
        node.path.get_or_init(|| self.compose_path(id))
    }

    pub(crate) fn full_path_of(&self, id: NodeId) -> &str {
        let node = self.slot(id);
        node.full_path
            .get_or_init(|| join_path(self.path_of(id), &node.name))
    }

    pub(crate) fn hash_of(&self, id: NodeId) -> u64 {
        *self.slot(id).hash.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            fold_name(self.full_path_of(id)).hash(&mut hasher);
            hasher.finish()
        })
    }

    fn compose_path(&self, id: NodeId) -> String {
        let Some(parent) = self.slot(id).parent else {
            return String::new();
        };
        if let Some(cached) = self.slot(parent).full_path.get() {
            return cached.clone();
        }

        let mut chain = vec![parent];
        let mut seen = HashSet::from([id, parent]);
        let mut cursor = self.slot(parent).parent;
        while let Some(ancestor) = cursor {
            if !seen.insert(ancestor) {
                log::error!(
                    "parent chain of {} loops at {}; path truncated",
                    self.slot(id).name,
                    self.slot(ancestor).name
                );
                break;
            }
            chain.push(ancestor);
            cursor = self.slot(ancestor).parent;
        }

        chain.iter().rev().fold(String::new(), |path, &ancestor| {
            join_path(&path, &self.slot(ancestor).name)
        })
    }

    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        if child == self.root {
            return Err(Error::Validation {
                field: "child".to_string(),
                message: "the root node cannot be attached to a parent".to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(Error::WouldCreateCycle {
                    node: self.full_path_of(child).to_string(),
                    parent: self.full_path_of(parent).to_string(),
                });
            }
            if !seen.insert(ancestor) {
                break;
            }
            cursor = self.slot(ancestor).parent;
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(previous) = self.nodes[child.index()].parent.take() {
            let name = self.nodes[child.index()].name.clone();
            self.nodes[previous.index()].children.remove(&name);
        }
    }

    fn moved(&mut self, id: NodeId) {
        self.invalidate_subtree(id);
        self.publish(id, NodeProperty::Path);
        self.publish(id, NodeProperty::FullPath);
    }

    fn duplicate(&self, parent: NodeId, name: &str) -> Error {
        Error::DuplicateName {
            name: name.to_string(),
            parent: self.full_path_of(parent).to_string(),
        }
    }

    fn invalidate_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.index()];
            node.invalidate_paths();
            stack.extend(node.children.iter());
        }
    }

    fn publish(&self, node: NodeId, property: NodeProperty) {
        let change = PropertyChange { node, property };
        for listener in &self.listeners {
            listener(&change);
        }
    }

    #[cfg(test)]
    pub(crate) fn set_parent_unchecked(&mut self, child: NodeId, parent: Option<NodeId>) {
        self.nodes[child.index()].parent = parent;
    }
}

/// Iterator returned by [`Tree::walk`].
pub struct Walk<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> Iterator for Walk<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children = &self.tree.slot(id).children;
        let before = self.stack.len();
        self.stack.extend(children.iter());
        self.stack[before..].reverse();
        Some(NodeRef::new(self.tree, id))
    }
}
