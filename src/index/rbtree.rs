//! Arena-backed red-black tree mapping ordered keys to identifier sets.
//!
//! Nodes live in a `Vec` and are addressed by `NodeId`. Slot 0 is the
//! sentinel: always black, keyless, the child on every leaf edge and the
//! parent of the root. Rotations only rewrite indices, so they stay O(1)
//! without shared ownership between parents and children.
//!
//! # Invariants
//!
//! - The sentinel and the root are black
//! - A red node never has a red child
//! - Every root-to-sentinel path carries the same number of black nodes
//! - In-order keys are strictly increasing (one node per distinct key)

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use super::errors::InvariantViolation;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The sentinel slot.
    pub const NIL: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true for the sentinel
    #[inline]
    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node color used for balance enforcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone)]
struct Node<K, I> {
    /// `None` only for the sentinel
    key: Option<K>,
    ids: HashSet<I>,
    left: NodeId,
    right: NodeId,
    parent: NodeId,
    color: Color,
}

impl<K, I> Node<K, I> {
    fn sentinel() -> Self {
        Self {
            key: None,
            ids: HashSet::new(),
            left: NodeId::NIL,
            right: NodeId::NIL,
            parent: NodeId::NIL,
            color: Color::Black,
        }
    }
}

/// Shape summary of a tree, reported by the `stats` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Distinct keys (one node each)
    pub keys: usize,
    /// Total (key, id) pairs
    pub ids: usize,
    /// Black nodes on any root-to-sentinel path
    pub black_height: usize,
}

/// Ordered multi-map from `K` to sets of `I`, balanced as a red-black tree.
///
/// The tree only grows: there is no removal. Inserting an existing key adds
/// the identifier to that key's set without touching the tree shape.
#[derive(Debug, Clone)]
pub struct RangeTree<K, I> {
    nodes: Vec<Node<K, I>>,
    root: NodeId,
}

impl<K: Ord, I: Eq + Hash + Clone> Default for RangeTree<K, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, I: Eq + Hash + Clone> RangeTree<K, I> {
    /// Creates an empty tree holding only the sentinel.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel()],
            root: NodeId::NIL,
        }
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Total number of identifiers across all keys
    pub fn id_count(&self) -> usize {
        self.nodes[1..].iter().map(|n| n.ids.len()).sum()
    }

    /// Root node, or `None` when empty
    pub fn root(&self) -> Option<NodeId> {
        (!self.root.is_nil()).then_some(self.root)
    }

    // ===== Arena accessors =====

    #[inline]
    fn node(&self, id: NodeId) -> &Node<K, I> {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, I> {
        &mut self.nodes[id.index()]
    }

    #[inline]
    fn key(&self, id: NodeId) -> Option<&K> {
        self.node(id).key.as_ref()
    }

    #[inline]
    fn parent(&self, id: NodeId) -> NodeId {
        self.node(id).parent
    }

    #[inline]
    fn left(&self, id: NodeId) -> NodeId {
        self.node(id).left
    }

    #[inline]
    fn right(&self, id: NodeId) -> NodeId {
        self.node(id).right
    }

    #[inline]
    fn child(&self, id: NodeId, side: Side) -> NodeId {
        match side {
            Side::Left => self.left(id),
            Side::Right => self.right(id),
        }
    }

    #[inline]
    fn set_child(&mut self, id: NodeId, side: Side, child: NodeId) {
        let node = self.node_mut(id);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    #[inline]
    fn is_red(&self, id: NodeId) -> bool {
        self.node(id).color == Color::Red
    }

    #[inline]
    fn set_color(&mut self, id: NodeId, color: Color) {
        debug_assert!(!id.is_nil() || color == Color::Black);
        self.node_mut(id).color = color;
    }

    /// Key and identifier set stored at `node`, `None` for the sentinel.
    pub fn entry(&self, node: NodeId) -> Option<(&K, &HashSet<I>)> {
        let n = self.nodes.get(node.index())?;
        n.key.as_ref().map(|k| (k, &n.ids))
    }

    /// Color of `node` (the sentinel reports black)
    pub fn color(&self, node: NodeId) -> Color {
        self.node(node).color
    }

    // ===== Insertion =====

    /// Inserts `id` under `key`.
    ///
    /// An existing key absorbs the identifier in place. A new key gets a red
    /// node at the leaf position followed by the red-black fix-up.
    pub fn insert(&mut self, key: K, id: I) {
        let mut parent = NodeId::NIL;
        let mut cursor = self.root;
        let mut side = Side::Left;

        while let Some(existing) = self.key(cursor) {
            parent = cursor;
            match key.cmp(existing) {
                Ordering::Equal => {
                    self.node_mut(cursor).ids.insert(id);
                    return;
                }
                Ordering::Less => side = Side::Left,
                Ordering::Greater => side = Side::Right,
            }
            cursor = self.child(cursor, side);
        }

        let z = self.alloc(key, id, parent);
        if parent.is_nil() {
            self.root = z;
        } else {
            self.set_child(parent, side, z);
        }
        self.insert_fixup(z);
    }

    /// Inserts only when a key is present; `None` is a silent no-op.
    pub fn insert_opt(&mut self, key: Option<K>, id: I) {
        if let Some(key) = key {
            self.insert(key, id);
        }
    }

    fn alloc(&mut self, key: K, id: I, parent: NodeId) -> NodeId {
        let node_id = NodeId(self.nodes.len() as u32);
        let mut ids = HashSet::with_capacity(1);
        ids.insert(id);
        self.nodes.push(Node {
            key: Some(key),
            ids,
            left: NodeId::NIL,
            right: NodeId::NIL,
            parent,
            color: Color::Red,
        });
        node_id
    }

    /// Side of its parent that `node` hangs from.
    fn side_of(&self, node: NodeId) -> Side {
        if node == self.left(self.parent(node)) {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        // The parent is red, so it is not the root and the grandparent is real.
        while self.is_red(self.parent(z)) {
            let parent = self.parent(z);
            let grand = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.child(grand, side.opposite());

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grand, Color::Red);
                z = grand;
                continue;
            }

            if z == self.child(parent, side.opposite()) {
                // Inner child: straighten into the outer case first
                z = parent;
                self.rotate(z, side);
            }

            let parent = self.parent(z);
            let grand = self.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grand, Color::Red);
            self.rotate(grand, side.opposite());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    // ===== Rotations =====

    /// Pivots `x` down toward `side`; its opposite child takes its place.
    ///
    /// `rotate(x, Side::Left)` is the classic left rotation.
    fn rotate(&mut self, x: NodeId, side: Side) {
        let up = side.opposite();
        let y = self.child(x, up);
        debug_assert!(!y.is_nil());

        let inner = self.child(y, side);
        self.set_child(x, up, inner);
        if !inner.is_nil() {
            self.node_mut(inner).parent = x;
        }

        let x_parent = self.parent(x);
        self.node_mut(y).parent = x_parent;
        if x_parent.is_nil() {
            self.root = y;
        } else {
            let x_side = self.side_of(x);
            self.set_child(x_parent, x_side, y);
        }

        self.set_child(y, side, x);
        self.node_mut(x).parent = y;
    }

    // ===== Navigation =====

    /// Leftmost node of the whole tree
    pub fn min_node(&self) -> Option<NodeId> {
        self.min_from(self.root)
    }

    /// Leftmost node of the subtree rooted at `node`
    pub fn min_from(&self, mut node: NodeId) -> Option<NodeId> {
        if node.is_nil() {
            return None;
        }
        while !self.left(node).is_nil() {
            node = self.left(node);
        }
        Some(node)
    }

    fn max_node(&self) -> Option<NodeId> {
        let mut node = self.root;
        if node.is_nil() {
            return None;
        }
        while !self.right(node).is_nil() {
            node = self.right(node);
        }
        Some(node)
    }

    /// In-order successor of `node`, `None` when `node` holds the maximum.
    pub fn successor(&self, node: NodeId) -> Option<NodeId> {
        if node.is_nil() {
            return None;
        }
        let right = self.right(node);
        if !right.is_nil() {
            return self.min_from(right);
        }

        let mut child = node;
        let mut ancestor = self.parent(node);
        while !ancestor.is_nil() && child == self.right(ancestor) {
            child = ancestor;
            ancestor = self.parent(ancestor);
        }
        (!ancestor.is_nil()).then_some(ancestor)
    }

    pub fn min_key(&self) -> Option<&K> {
        self.min_node().and_then(|n| self.key(n))
    }

    pub fn max_key(&self) -> Option<&K> {
        self.max_node().and_then(|n| self.key(n))
    }

    // ===== Lookup =====

    /// Node holding the smallest key `>= key`.
    ///
    /// An exact match returns immediately.
    pub fn find_ge(&self, key: &K) -> Option<NodeId> {
        let mut cursor = self.root;
        let mut best = None;

        while let Some(current) = self.key(cursor) {
            match key.cmp(current) {
                Ordering::Equal => return Some(cursor),
                Ordering::Less => {
                    best = Some(cursor);
                    cursor = self.left(cursor);
                }
                Ordering::Greater => cursor = self.right(cursor),
            }
        }

        best
    }

    /// Identifier set stored under exactly `key`.
    pub fn get(&self, key: &K) -> Option<&HashSet<I>> {
        let node = self.find_ge(key)?;
        match self.entry(node) {
            Some((found, ids)) if found == key => Some(ids),
            _ => None,
        }
    }

    /// In-order walk over the keys in `[low, high]`.
    ///
    /// `None` leaves that side unbounded. A reversed range yields nothing,
    /// since the first node reached already exceeds `high`.
    pub fn range<'a>(&'a self, low: Option<&K>, high: Option<&'a K>) -> Iter<'a, K, I> {
        let next = match low {
            None => self.min_node(),
            Some(low) => self.find_ge(low),
        };
        Iter {
            tree: self,
            next,
            high,
        }
    }

    /// Union of the identifier sets for every key in `[low, high]`.
    pub fn range_ids(&self, low: Option<&K>, high: Option<&K>) -> HashSet<I> {
        let mut out = HashSet::new();
        for (_, ids) in self.range(low, high) {
            out.extend(ids.iter().cloned());
        }
        out
    }

    /// In-order iterator over every `(key, ids)` entry
    pub fn iter(&self) -> Iter<'_, K, I> {
        self.range(None, None)
    }

    // ===== Diagnostics =====

    /// Black nodes along the left spine, sentinel excluded.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root;
        while !node.is_nil() {
            if !self.is_red(node) {
                height += 1;
            }
            node = self.left(node);
        }
        height
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            keys: self.len(),
            ids: self.id_count(),
            black_height: self.black_height(),
        }
    }

    /// Verifies every structural invariant, returning the black-height.
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        if self.is_red(NodeId::NIL) {
            return Err(InvariantViolation::RedSentinel);
        }
        if self.is_red(self.root) {
            return Err(InvariantViolation::RedRoot);
        }
        if !self.parent(self.root).is_nil() && !self.root.is_nil() {
            return Err(InvariantViolation::BrokenParentLink { node: self.root });
        }
        let height = self.check_subtree(self.root, None, None)?;

        let reachable = self.iter().count();
        if reachable != self.len() {
            return Err(InvariantViolation::UnreachableNodes {
                allocated: self.len(),
                reachable,
            });
        }
        Ok(height)
    }

    fn check_subtree(
        &self,
        node: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<usize, InvariantViolation> {
        let Some(key) = self.key(node) else {
            return Ok(0);
        };

        if lower.is_some_and(|lo| key <= lo) || upper.is_some_and(|hi| key >= hi) {
            return Err(InvariantViolation::OutOfOrder { node });
        }
        if self.node(node).ids.is_empty() {
            return Err(InvariantViolation::EmptyIdSet { node });
        }

        let left = self.left(node);
        let right = self.right(node);
        for child in [left, right] {
            if child.is_nil() {
                continue;
            }
            if self.parent(child) != node {
                return Err(InvariantViolation::BrokenParentLink { node: child });
            }
            if self.is_red(node) && self.is_red(child) {
                return Err(InvariantViolation::RedRedEdge {
                    parent: node,
                    child,
                });
            }
        }

        let left_height = self.check_subtree(left, lower, Some(key))?;
        let right_height = self.check_subtree(right, Some(key), upper)?;
        if left_height != right_height {
            return Err(InvariantViolation::BlackHeightMismatch {
                node,
                left: left_height,
                right: right_height,
            });
        }

        Ok(left_height + usize::from(!self.is_red(node)))
    }
}

/// In-order iterator produced by [`RangeTree::range`] and [`RangeTree::iter`].
pub struct Iter<'a, K, I> {
    tree: &'a RangeTree<K, I>,
    next: Option<NodeId>,
    high: Option<&'a K>,
}

impl<'a, K: Ord, I: Eq + Hash + Clone> Iterator for Iter<'a, K, I> {
    type Item = (&'a K, &'a HashSet<I>);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        let (key, ids) = self.tree.entry(node)?;
        if self.high.is_some_and(|high| key > high) {
            self.next = None;
            return None;
        }
        self.next = self.tree.successor(node);
        Some((key, ids))
    }
}

impl<'a, K: Ord, I: Eq + Hash + Clone> IntoIterator for &'a RangeTree<K, I> {
    type Item = (&'a K, &'a HashSet<I>);
    type IntoIter = Iter<'a, K, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
