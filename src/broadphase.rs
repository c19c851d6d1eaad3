//! Broadphase: find candidate body pairs cheaply.
//!
//! [`AabbTree`] is a dynamic bounding volume tree stored in an arena. Nodes
//! are addressed by index and recycled through a free list, and leaves hold
//! body ids rather than references, so the world stays the only owner of
//! its bodies.
//!
//! There is no exact ray cast. Segment-shaped queries go through
//! [`Broadphase::query_aabb`] with the segment's bounding box, which is a
//! conservative filter.

use alloc::vec::Vec as AllocVec;

use crate::aabb::Aabb;
use crate::body::{Body, BodyId};
use crate::float::Float;
use crate::vec::Vec2;

/// Handle of a leaf in a broadphase structure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProxyId(pub(crate) usize);

/// Spatial index over body bounds, chosen once when the world is built.
pub trait Broadphase<F: Float> {
    /// Index `body` under its tight `aabb`; the structure may store a
    /// fattened copy.
    fn insert(&mut self, body: BodyId, aabb: Aabb<F>) -> ProxyId;

    fn remove(&mut self, proxy: ProxyId);

    /// Re-index every body whose current bounds escaped its stored bounds.
    fn update(&mut self, bodies: &[Body<F>]);

    /// Candidate pairs `(a, b)` with `a < b`, each reported once.
    fn pairs(&self) -> AllocVec<(BodyId, BodyId)>;

    fn query_point(&self, point: Vec2<F>) -> AllocVec<BodyId>;

    fn query_aabb(&self, aabb: &Aabb<F>) -> AllocVec<BodyId>;

    /// The stored (fattened) bounds of a proxy.
    fn fat_aabb(&self, proxy: ProxyId) -> Option<Aabb<F>>;

    fn clear(&mut self);

    /// Number of indexed bodies.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug)]
struct TreeNode<F: Float> {
    aabb: Aabb<F>,
    parent: Option<usize>,
    children: Option<(usize, usize)>,
    height: u32,
    body: Option<BodyId>,
}

impl<F: Float> TreeNode<F> {
    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Dynamic AABB tree with perimeter-based insertion.
#[derive(Clone, Debug)]
pub struct AabbTree<F: Float> {
    nodes: AllocVec<TreeNode<F>>,
    free: AllocVec<usize>,
    root: Option<usize>,
    margin: F,
    leaf_count: usize,
}

impl<F: Float> AabbTree<F> {
    /// Create an empty tree whose leaves are fattened by `margin`.
    pub fn new(margin: F) -> Self {
        AabbTree {
            nodes: AllocVec::new(),
            free: AllocVec::new(),
            root: None,
            margin,
            leaf_count: 0,
        }
    }

    pub fn margin(&self) -> F {
        self.margin
    }

    /// Height of the root, 0 for a single leaf or an empty tree.
    pub fn height(&self) -> u32 {
        self.root.map_or(0, |r| self.nodes[r].height)
    }

    fn alloc_node(&mut self, node: TreeNode<F>) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn free_node(&mut self, index: usize) {
        let node = &mut self.nodes[index];
        node.parent = None;
        node.children = None;
        node.body = None;
        node.height = 0;
        self.free.push(index);
    }

    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if let Some((left, right)) = self.nodes[parent].children {
            self.nodes[parent].children = Some(if left == old { (new, right) } else { (left, new) });
        }
    }

    fn insert_leaf(&mut self, leaf: usize) {
        let Some(root) = self.root else {
            self.nodes[leaf].parent = None;
            self.root = Some(leaf);
            return;
        };

        // Walk down, taking the child whose bounds grow the least.
        let leaf_aabb = self.nodes[leaf].aabb;
        let mut index = root;
        while let Some((left, right)) = self.nodes[index].children {
            let left_aabb = self.nodes[left].aabb;
            let right_aabb = self.nodes[right].aabb;
            let cost_left = left_aabb.union(&leaf_aabb).perimeter() - left_aabb.perimeter();
            let cost_right = right_aabb.union(&leaf_aabb).perimeter() - right_aabb.perimeter();
            index = if cost_left <= cost_right { left } else { right };
        }

        let sibling = index;
        let old_parent = self.nodes[sibling].parent;
        let new_parent = self.alloc_node(TreeNode {
            aabb: leaf_aabb.union(&self.nodes[sibling].aabb),
            parent: old_parent,
            children: Some((sibling, leaf)),
            height: self.nodes[sibling].height + 1,
            body: None,
        });
        self.nodes[sibling].parent = Some(new_parent);
        self.nodes[leaf].parent = Some(new_parent);

        match old_parent {
            Some(p) => self.replace_child(p, sibling, new_parent),
            None => self.root = Some(new_parent),
        }
        self.refit(old_parent);
    }

    fn remove_leaf(&mut self, leaf: usize) {
        if self.root == Some(leaf) {
            self.root = None;
            return;
        }
        let Some(parent) = self.nodes[leaf].parent else {
            return;
        };
        let Some((left, right)) = self.nodes[parent].children else {
            return;
        };
        let sibling = if left == leaf { right } else { left };
        let grandparent = self.nodes[parent].parent;

        self.nodes[sibling].parent = grandparent;
        match grandparent {
            Some(g) => self.replace_child(g, parent, sibling),
            None => self.root = Some(sibling),
        }
        self.free_node(parent);
        self.nodes[leaf].parent = None;
        self.refit(grandparent);
    }

    /// Recompute bounds and heights from `start` up to the root.
    fn refit(&mut self, start: Option<usize>) {
        let mut current = start;
        while let Some(index) = current {
            if let Some((left, right)) = self.nodes[index].children {
                let aabb = self.nodes[left].aabb.union(&self.nodes[right].aabb);
                let height = 1 + self.nodes[left].height.max(self.nodes[right].height);
                let node = &mut self.nodes[index];
                node.aabb = aabb;
                node.height = height;
            }
            current = self.nodes[index].parent;
        }
    }

    /// Visit every leaf whose bounds satisfy `hit`, pruning subtrees that don't.
    fn descend(&self, mut hit: impl FnMut(&Aabb<F>) -> bool, mut visit: impl FnMut(usize)) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack = AllocVec::with_capacity(64);
        stack.push(root);
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if !hit(&node.aabb) {
                continue;
            }
            match node.children {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => visit(index),
            }
        }
    }

    fn leaves(&self) -> AllocVec<usize> {
        let mut leaves = AllocVec::with_capacity(self.leaf_count);
        self.descend(|_| true, |leaf| leaves.push(leaf));
        leaves
    }
}

impl<F: Float> Broadphase<F> for AabbTree<F> {
    fn insert(&mut self, body: BodyId, aabb: Aabb<F>) -> ProxyId {
        let leaf = self.alloc_node(TreeNode {
            aabb: aabb.expand(self.margin),
            parent: None,
            children: None,
            height: 0,
            body: Some(body),
        });
        self.insert_leaf(leaf);
        self.leaf_count += 1;
        ProxyId(leaf)
    }

    fn remove(&mut self, proxy: ProxyId) {
        let Some(node) = self.nodes.get(proxy.0) else {
            return;
        };
        if !node.is_leaf() || node.body.is_none() {
            debug_assert!(false, "removing a proxy that is not a live leaf");
            return;
        }
        self.remove_leaf(proxy.0);
        self.free_node(proxy.0);
        self.leaf_count -= 1;
    }

    fn update(&mut self, bodies: &[Body<F>]) {
        for body in bodies {
            let Some(proxy) = body.proxy else {
                continue;
            };
            let aabb = body.aabb();
            if !aabb.is_valid() || self.nodes[proxy.0].aabb.contains(&aabb) {
                continue;
            }
            // Reinsert the same leaf so the body's proxy stays valid.
            self.remove_leaf(proxy.0);
            self.nodes[proxy.0].aabb = aabb.expand(self.margin);
            self.insert_leaf(proxy.0);
        }
    }

    fn pairs(&self) -> AllocVec<(BodyId, BodyId)> {
        let mut pairs = AllocVec::new();
        for leaf in self.leaves() {
            let fat = self.nodes[leaf].aabb;
            let Some(id) = self.nodes[leaf].body else {
                continue;
            };
            self.descend(
                |aabb| aabb.overlaps(&fat),
                |other| {
                    if let Some(other_id) = self.nodes[other].body {
                        if id < other_id {
                            pairs.push((id, other_id));
                        }
                    }
                },
            );
        }
        pairs
    }

    fn query_point(&self, point: Vec2<F>) -> AllocVec<BodyId> {
        let mut hits = AllocVec::new();
        self.descend(|aabb| aabb.contains_point(point), |leaf| hits.extend(self.nodes[leaf].body));
        hits
    }

    fn query_aabb(&self, aabb: &Aabb<F>) -> AllocVec<BodyId> {
        let mut hits = AllocVec::new();
        self.descend(|node| node.overlaps(aabb), |leaf| hits.extend(self.nodes[leaf].body));
        hits
    }

    fn fat_aabb(&self, proxy: ProxyId) -> Option<Aabb<F>> {
        let node = self.nodes.get(proxy.0)?;
        node.body.map(|_| node.aabb)
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.leaf_count = 0;
    }

    fn len(&self) -> usize {
        self.leaf_count
    }
}
