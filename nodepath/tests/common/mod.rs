//! Common test utilities for integration tests.

use nodepath::{NodeId, Tree};

/// Builds trees from slash-separated paths, creating missing ancestors.
///
/// # Examples
///
/// ```no_run
/// # use common::TreeFixture;
/// let (tree, ids) = TreeFixture::new().path("/a/b").path("/c").build();
/// ```
#[derive(Debug, Default)]
pub struct TreeFixture {
    paths: Vec<String>,
}

impl TreeFixture {
    /// Creates an empty fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node path such as `/a/b`.
    pub fn path(mut self, path: &str) -> Self {
        self.paths.push(path.to_string());
        self
    }

    /// Builds the tree, returning it with the id of each listed path in order.
    pub fn build(self) -> (Tree<String>, Vec<NodeId>) {
        let mut tree = Tree::new("/".to_string());
        let mut ids = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let mut current = tree.root();
            for name in path.split('/').filter(|s| !s.is_empty()) {
                current = match tree.find(current, name).unwrap() {
                    Some(existing) => existing,
                    None => tree.insert(current, name, name.to_string()).unwrap(),
                };
            }
            ids.push(current);
        }
        (tree, ids)
    }
}

/// A small company tree used across tests.
#[allow(dead_code)]
pub fn sample_tree() -> (Tree<String>, Vec<NodeId>) {
    TreeFixture::new()
        .path("/Company/Engineering/Platform")
        .path("/Company/Engineering/Mobile")
        .path("/Company/Sales")
        .path("/Archive")
        .build()
}
