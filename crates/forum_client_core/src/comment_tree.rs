//! crates/forum_client_core/src/comment_tree.rs
//!
//! Assembles the comments of a single post into a reply forest.
//!
//! The tree is an arena: every node lives in one map keyed by comment id and
//! refers to its replies by id. Rendering is a separate step that walks the
//! arena, see [`CommentTree::walk`].
//!
//! A `parent_id` that does not resolve inside the input (deleted or stale
//! parent) makes the comment top-level. Malformed input that would form a
//! cycle is broken the same way, so every input comment ends up reachable.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::Comment;

/// Replies may be composed under comments at depth 0, 1 and 2.
/// Deeper comments are still displayed, only the reply action is hidden.
pub const MAX_REPLY_DEPTH: usize = 3;

/// A comment placed in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    /// Number of ancestors, 0 for top-level comments.
    pub depth: usize,
    /// The resolved parent. `None` for top-level and orphaned comments.
    pub parent: Option<i64>,
    pub children: Vec<i64>,
}

impl CommentNode {
    pub fn can_reply(&self) -> bool {
        self.depth < MAX_REPLY_DEPTH
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentTree {
    nodes: HashMap<i64, CommentNode>,
    roots: Vec<i64>,
}

impl CommentTree {
    /// Builds the tree from the comments of one post, in server order.
    ///
    /// Input may be flat (each comment carrying `parent_id`) or already nested
    /// through `replies`; nested input is flattened parent-first before assembly.
    /// Siblings keep their relative input order.
    pub fn build(comments: Vec<Comment>) -> Self {
        let mut flat = Vec::with_capacity(comments.len());
        for comment in comments {
            flatten_into(comment, None, &mut flat);
        }

        // Pass 1: id -> comment, first occurrence wins.
        let mut order = Vec::with_capacity(flat.len());
        let mut by_id: HashMap<i64, Comment> = HashMap::with_capacity(flat.len());
        for comment in flat {
            if by_id.contains_key(&comment.id) {
                warn!(comment_id = comment.id, "Dropping duplicate comment.");
                continue;
            }
            order.push(comment.id);
            by_id.insert(comment.id, comment);
        }

        // Pass 2: resolve parents.
        let mut parents: HashMap<i64, i64> = HashMap::new();
        for id in &order {
            if let Some(parent_id) = by_id[id].parent_id {
                if parent_id != *id && by_id.contains_key(&parent_id) {
                    parents.insert(*id, parent_id);
                } else {
                    debug!(comment_id = id, parent_id, "Unresolved parent, treating as top-level.");
                }
            }
        }
        break_cycles(&order, &mut parents);

        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut roots = Vec::new();
        for id in &order {
            match parents.get(id) {
                Some(parent_id) => children.entry(*parent_id).or_default().push(*id),
                None => roots.push(*id),
            }
        }

        // Depths, top-down from the roots.
        let mut nodes = HashMap::with_capacity(order.len());
        let mut stack: Vec<(i64, usize)> = roots.iter().map(|id| (*id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            let kids = children.remove(&id).unwrap_or_default();
            stack.extend(kids.iter().map(|child| (*child, depth + 1)));
            if let Some(comment) = by_id.remove(&id) {
                nodes.insert(
                    id,
                    CommentNode {
                        comment,
                        depth,
                        parent: parents.get(&id).copied(),
                        children: kids,
                    },
                );
            }
        }

        Self { nodes, roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Top-level comment ids, in input order.
    pub fn roots(&self) -> &[i64] {
        &self.roots
    }

    pub fn get(&self, comment_id: i64) -> Option<&CommentNode> {
        self.nodes.get(&comment_id)
    }

    pub fn depth(&self, comment_id: i64) -> Option<usize> {
        self.get(comment_id).map(|node| node.depth)
    }

    /// Whether the reply action is offered for this comment.
    /// Unknown ids never allow replies.
    pub fn can_reply(&self, comment_id: i64) -> bool {
        self.get(comment_id).is_some_and(CommentNode::can_reply)
    }

    pub fn children(&self, comment_id: i64) -> &[i64] {
        self.get(comment_id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Pre-order, depth-first traversal: each comment is followed by its replies.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Total number of comments including every nested reply.
    pub fn total_count(&self) -> usize {
        self.walk().count()
    }

    /// The comment and all of its descendants, i.e. what a delete removes.
    pub fn subtree_ids(&self, comment_id: i64) -> Vec<i64> {
        if !self.nodes.contains_key(&comment_id) {
            return Vec::new();
        }
        let mut ids = Vec::new();
        let mut stack = vec![comment_id];
        while let Some(id) = stack.pop() {
            ids.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        ids
    }

    /// Converts the arena back to nested comments with `replies` populated.
    pub fn into_nested(mut self) -> Vec<Comment> {
        let roots = std::mem::take(&mut self.roots);
        roots
            .into_iter()
            .filter_map(|id| assemble(&mut self.nodes, id))
            .collect()
    }
}

/// Iterator returned by [`CommentTree::walk`].
pub struct Walk<'a> {
    tree: &'a CommentTree,
    stack: Vec<i64>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a CommentNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.tree.nodes.get(&id) {
                self.stack.extend(node.children.iter().rev().copied());
                return Some(node);
            }
        }
        None
    }
}

/// Counts comments in an already nested collection, replies included.
pub fn count_nested(comments: &[Comment]) -> usize {
    let mut total = 0;
    let mut stack: Vec<&Comment> = comments.iter().collect();
    while let Some(comment) = stack.pop() {
        total += 1;
        if let Some(replies) = &comment.replies {
            stack.extend(replies.iter());
        }
    }
    total
}

fn flatten_into(mut comment: Comment, nested_under: Option<i64>, out: &mut Vec<Comment>) {
    let replies = comment.replies.take().unwrap_or_default();
    // A reply nested by the server belongs to its container even if it omits `parent_id`.
    if comment.parent_id.is_none() {
        comment.parent_id = nested_under;
    }
    let id = comment.id;
    out.push(comment);
    for reply in replies {
        flatten_into(reply, Some(id), out);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Done,
}

/// Cuts the parent link of the first comment (in input order) found on each cycle.
///
/// Every comment is visited once: a walk up the parent chain stops at the
/// first comment already settled, and a comment met again on the current
/// walk closes a cycle.
fn break_cycles(order: &[i64], parents: &mut HashMap<i64, i64>) {
    let position: HashMap<i64, usize> = order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let mut marks: HashMap<i64, Mark> = HashMap::with_capacity(order.len());

    for &start in order {
        if marks.contains_key(&start) {
            continue;
        }
        let mut path = Vec::new();
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            match marks.get(&id) {
                Some(Mark::Done) => break,
                Some(Mark::OnPath) => {
                    let from = path.iter().position(|p| *p == id).unwrap_or(0);
                    let first = path[from..]
                        .iter()
                        .copied()
                        .min_by_key(|member| position.get(member).copied().unwrap_or(usize::MAX));
                    if let Some(first) = first {
                        warn!(comment_id = first, "Comment parent chain loops back, treating as top-level.");
                        parents.remove(&first);
                    }
                    break;
                }
                None => {
                    marks.insert(id, Mark::OnPath);
                    path.push(id);
                    cursor = parents.get(&id).copied();
                }
            }
        }
        for id in path {
            marks.insert(id, Mark::Done);
        }
    }
}

fn assemble(nodes: &mut HashMap<i64, CommentNode>, id: i64) -> Option<Comment> {
    let node = nodes.remove(&id)?;
    let replies = node
        .children
        .into_iter()
        .filter_map(|child| assemble(nodes, child))
        .collect();
    let mut comment = node.comment;
    comment.replies = Some(replies);
    Some(comment)
}
