//! Path resolution over a [`Tree`].

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::expr::{Anchor, PathExpression, RawSegments};
use crate::tree::{NodeId, Tree};

/// One resolved step, handed to the hook of [`Tree::find_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindStep<'s> {
    /// Zero-based index among the processed (non-empty) segments.
    pub index: usize,
    /// The trimmed segment text.
    pub segment: &'s str,
    /// The node reached by this step.
    pub current: NodeId,
    /// The node the step started from.
    pub previous: NodeId,
}

impl<T> Tree<T> {
    /// Resolves `path` relative to `start`.
    ///
    /// An empty path returns `start`. A separator as the very first
    /// character re-anchors at [`find_root`](Self::find_root). Segments are
    /// trimmed and empty ones are skipped; `.` stays put and `..` moves to the
    /// parent (or stays at a parentless node). Names match children ignoring
    /// case. Scanning stops at the first `@` or `[`.
    ///
    /// A missing child is not an error: the walk stops and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `start` is not from this tree and
    /// [`Error::Cycle`] if an absolute path meets a looping parent chain.
    pub fn find(&self, start: NodeId, path: &str) -> Result<Option<NodeId>> {
        self.find_with(start, path, |step| step.current)
    }

    /// Like [`find`](Self::find), calling `hook` after every successful step.
    ///
    /// The id the hook returns is where the walk continues.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find), plus [`Error::UnknownNode`] if the hook
    /// returns an id from another tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use nodepath::Tree;
    ///
    /// let mut tree = Tree::new(());
    /// let a = tree.insert(tree.root(), "a", ()).unwrap();
    ///
    /// let mut visited = Vec::new();
    /// let found = tree
    ///     .find_with(tree.root(), "/a/b", |step| {
    ///         visited.push(step.segment.to_string());
    ///         step.current
    ///     })
    ///     .unwrap();
    /// assert_eq!(found, None);
    /// assert_eq!(visited, ["a"]);
    /// # let _ = a;
    /// ```
    pub fn find_with<F>(&self, start: NodeId, path: &str, hook: F) -> Result<Option<NodeId>>
    where
        F: FnMut(FindStep<'_>) -> NodeId,
    {
        self.check(start)?;
        if path.is_empty() {
            return Ok(Some(start));
        }

        let segments = RawSegments::new(path);
        let from = if segments.is_rooted() {
            self.find_root(start)?
        } else {
            start
        };
        self.walk_segments(from, segments, hook)
    }

    /// Resolves an already parsed expression relative to `start`.
    ///
    /// The accessor, if any, is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find).
    pub fn find_expression<H>(
        &self,
        start: NodeId,
        expression: &PathExpression<H>,
    ) -> Result<Option<NodeId>> {
        self.find_expression_with(start, expression, |step| step.current)
    }

    /// Resolves an already parsed expression with a per-step hook.
    ///
    /// # Errors
    ///
    /// Same as [`find_with`](Self::find_with).
    pub fn find_expression_with<H, F>(
        &self,
        start: NodeId,
        expression: &PathExpression<H>,
        hook: F,
    ) -> Result<Option<NodeId>>
    where
        F: FnMut(FindStep<'_>) -> NodeId,
    {
        self.check(start)?;
        let from = match expression.anchor() {
            Anchor::Root => self.find_root(start)?,
            Anchor::Parent => self.slot(start).parent.unwrap_or(start),
            Anchor::Current | Anchor::None => start,
        };
        let segments = expression.segments().iter().map(String::as_str);
        self.walk_segments(from, segments, hook)
    }

    /// Follows parent links from `start` to the topmost ancestor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cycle`] naming the first node seen twice, or
    /// [`Error::UnknownNode`] for a foreign id.
    pub fn find_root(&self, start: NodeId) -> Result<NodeId> {
        self.check(start)?;
        let mut seen = HashSet::from([start]);
        let mut current = start;
        while let Some(parent) = self.slot(current).parent {
            if !seen.insert(parent) {
                let node = self.slot(parent).name.clone();
                log::error!("cycle in parent chain at {node}");
                return Err(Error::Cycle {
                    node,
                    node_type: std::any::type_name::<T>(),
                });
            }
            current = parent;
        }
        Ok(current)
    }

    fn walk_segments<'s, I, F>(&self, from: NodeId, segments: I, mut hook: F) -> Result<Option<NodeId>>
    where
        I: IntoIterator<Item = &'s str>,
        F: FnMut(FindStep<'_>) -> NodeId,
    {
        let mut current = from;
        let mut index = 0;
        for segment in segments {
            if segment.is_empty() {
                continue;
            }

            let node = self.slot(current);
            let next = match segment {
                "." => current,
                ".." => node.parent.unwrap_or(current),
                name => match node.children.try_get(name) {
                    Some(child) => child,
                    None => {
                        log::trace!("no child {name} under {}", self.full_path_of(current));
                        return Ok(None);
                    }
                },
            };
            log::trace!("step {index}: {segment} -> {}", self.full_path_of(next));

            let chosen = hook(FindStep {
                index,
                segment,
                current: next,
                previous: current,
            });
            self.check(chosen)?;
            current = chosen;
            index += 1;
        }
        Ok(Some(current))
    }
}
