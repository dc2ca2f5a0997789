//! Skip List
//!
//! An ordered multiset kept as a stack of linked levels. Level 0 holds every
//! element in order; each level above holds a subsequence of the one below.
//!
//! # Height
//!
//! Unlike the textbook skip list, the number of levels is not drawn at random.
//! It is fixed by the element count (see [`target_height`]) and recomputed
//! before every insertion. Only whether a new element reaches that fixed
//! ceiling is random: a fair coin is flipped per level and the first tails
//! stops promotion. Erasing never lowers the height.
//!
//! # Root
//!
//! The root is the top node of the leftmost tower and always spans every
//! level, so it is the entry point for every descent. Two operations rebuild
//! it as a full-height tower instead of using coin flips:
//!
//! - inserting a value smaller than the current minimum
//! - erasing the current minimum
//!
//! ```text
//! Level 2: 1 ---------------------> 9
//! Level 1: 1 ---------> 4 --------> 9
//! Level 0: 1 --> 2 --> 4 --> 6 --> 9 --> 11
//! ```
//!
//! # Duplicates
//!
//! Equal elements are allowed. `insert` and `erase` locate their position by
//! scanning while the next element is strictly less, so they act on the first
//! equal element in level 0 order. `search` and `contains` advance while the
//! next element is less than or equal, so they return the first equal node met
//! on the way down, which may sit on a higher level and belong to a different
//! tower than the one `erase` would remove.

use std::fmt;

use log::debug;
use log::trace;
use rand::SeedableRng;
use rand::distributions::Distribution;
use rand::distributions::Standard;
use rand::rngs::StdRng;
use rand::Rng;
use smallvec::SmallVec;
use smallvec::smallvec;

use crate::error::Error;
use crate::height::target_height;
use crate::node::Arena;
use crate::node::Idx;
use crate::node::Node;

/// A uniform draw at or above this value stops promotion.
pub const PROMOTE_BELOW: f64 = 0.5;

/// Levels kept inline before per-level scratch buffers spill to the heap.
/// 16 levels covers lists of up to 65535 elements.
const INLINE_LEVELS: usize = 16;

type PerLevel<V> = SmallVec<[V; INLINE_LEVELS]>;

/// An ordered, searchable multiset backed by a count-capped skip list.
pub struct SkipList<T, R = StdRng> {
    /// Arena of nodes for every level.
    nodes: Arena<T>,
    /// Top node of the leftmost tower. `None` only when empty.
    root: Option<Idx>,
    /// Number of elements (level 0 nodes).
    len: usize,
    /// Number of levels. Never lowered except by `clear`.
    height: usize,
    /// Coin for tower promotion.
    rng: R,
}

/// A node found by [`SkipList::search`].
///
/// Borrows the list, so it cannot outlive the next mutation.
pub struct NodeRef<'a, T> {
    node: &'a Node<T>,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        return *self;
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return f
            .debug_struct("NodeRef")
            .field("value", &self.node.value)
            .field("level", &self.node.level)
            .finish();
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// The element stored in the node.
    pub fn value(&self) -> &'a T {
        return &self.node.value;
    }

    /// The level the descent stopped on, 0 being the bottom.
    pub fn level(&self) -> usize {
        return self.node.level;
    }
}

impl<T: Ord + Clone> SkipList<T, StdRng> {
    /// Build a list from a non-empty batch, seeding the coin from the OS.
    pub fn new(elements: Vec<T>) -> Result<Self, Error> {
        return Self::with_rng(elements, StdRng::from_entropy());
    }

    /// Build a list by cloning a non-empty slice.
    pub fn from_slice(elements: &[T]) -> Result<Self, Error> {
        return Self::new(elements.to_vec());
    }

    /// Build a list with a deterministic coin.
    pub fn with_seed(elements: Vec<T>, seed: u64) -> Result<Self, Error> {
        return Self::with_rng(elements, StdRng::seed_from_u64(seed));
    }
}

impl<T, R> SkipList<T, R> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        return self.len;
    }

    /// Return true if the list holds no elements.
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Number of levels currently maintained.
    pub fn height(&self) -> usize {
        return self.height;
    }

    /// Iterate over every element in order (level 0).
    pub fn iter(&self) -> Iter<'_, T> {
        let mut current = self.root;
        while let Some(idx) = current {
            match self.nodes.get(idx).down {
                Some(down) => current = Some(down),
                None => break,
            }
        }
        return Iter {
            nodes: &self.nodes,
            current,
        };
    }

    /// Iterate over the levels, top first. Each level yields its elements in order.
    pub fn levels(&self) -> Levels<'_, T> {
        return Levels {
            nodes: &self.nodes,
            head: self.root,
        };
    }

    /// Remove every element and reset the height to 1.
    pub fn clear(&mut self) {
        debug!("clearing skip list of {} elements over {} levels", self.len, self.height);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.height = 1;
    }
}

impl<T: Ord + Clone, R: Rng> SkipList<T, R> {
    /// Build a list from a non-empty batch using the given coin.
    ///
    /// The first element seeds the root tower at the height the whole batch
    /// calls for; the rest are inserted one by one without growing the height.
    pub fn with_rng(elements: Vec<T>, rng: R) -> Result<Self, Error> {
        let mut elements = elements.into_iter();
        let Some(first) = elements.next() else {
            return Err(Error::EmptyBatch);
        };

        let len = elements.len() + 1;
        let mut list = SkipList {
            nodes: Arena::new(),
            root: None,
            len,
            height: target_height(len),
            rng,
        };
        list.root = Some(list.seed_tower(first));

        for value in elements {
            list.insert_inner(value, false);
        }

        list.check_invariants();
        return Ok(list);
    }

    /// Add an element. Equal elements are kept.
    pub fn insert(&mut self, value: T) {
        self.insert_inner(value, true);
        self.check_invariants();
    }

    /// Return true if an equal element is present.
    pub fn contains(&self, value: &T) -> bool {
        return self.search(value).is_some();
    }

    /// Find a node holding an equal element.
    ///
    /// Returns the first equal node reached while descending from the root,
    /// which is not necessarily the first equal element in order.
    pub fn search(&self, value: &T) -> Option<NodeRef<'_, T>> {
        let mut cursor = self.root?;
        loop {
            let node = self.nodes.get(cursor);
            if node.value == *value {
                return Some(NodeRef { node });
            }
            match node.forward {
                Some(next) if self.nodes.get(next).value <= *value => cursor = next,
                _ => cursor = node.down?,
            }
        }
    }

    /// Remove one equal element. Returns false if none was present.
    pub fn erase(&mut self, value: &T) -> bool {
        let Some(root) = self.root else {
            return false;
        };

        if self.nodes.get(root).value == *value {
            self.erase_root(root);
        } else if !self.erase_after_root(root, value) {
            return false;
        }

        self.check_invariants();
        return true;
    }

    fn insert_inner(&mut self, value: T, grow: bool) {
        if grow {
            self.len += 1;
        }

        let Some(root) = self.root else {
            // Emptied by erase: start a fresh root tower at the height already reached.
            self.height = self.height.max(target_height(self.len));
            self.root = Some(self.seed_tower(value));
            return;
        };

        let root = self.update_root(root);
        if value < self.nodes.get(root).value {
            self.push_front(root, value);
            return;
        }

        let preds = self.predecessors(root, &value);

        let pred = preds[0];
        let mut bottom = Node::new(value.clone(), 0);
        bottom.forward = self.nodes.get(pred).forward;
        let mut below = self.nodes.alloc(bottom);
        self.nodes.get_mut(pred).forward = Some(below);

        let mut level = 1;
        while level < self.height && self.flip() {
            let pred = preds[level];
            let mut up = Node::new(value.clone(), level);
            up.forward = self.nodes.get(pred).forward;
            up.down = Some(below);
            below = self.nodes.alloc(up);
            self.nodes.get_mut(pred).forward = Some(below);
            level += 1;
        }
        trace!("inserted tower of height {} (ceiling {})", level, self.height);
    }

    /// Grow the root to the height the current count calls for. Never shrinks.
    fn update_root(&mut self, mut root: Idx) -> Idx {
        let target = target_height(self.len);
        while self.height < target {
            let mut top = Node::new(self.nodes.get(root).value.clone(), self.height);
            top.down = Some(root);
            root = self.nodes.alloc(top);
            self.height += 1;
            debug!("skip list height grew to {} at {} elements", self.height, self.len);
        }
        self.root = Some(root);
        return root;
    }

    /// Allocate a tower spanning every level and return its top.
    fn seed_tower(&mut self, value: T) -> Idx {
        let mut top = self.nodes.alloc(Node::new(value.clone(), 0));
        for level in 1..self.height {
            let mut up = Node::new(value.clone(), level);
            up.down = Some(top);
            top = self.nodes.alloc(up);
        }
        return top;
    }

    /// Put a new minimum in front of the root tower at every level.
    fn push_front(&mut self, old_root: Idx, value: T) {
        let mut displaced = Some(old_root);
        let mut above: Option<Idx> = None;
        while let Some(old) = displaced {
            let level = self.nodes.get(old).level;
            let mut node = Node::new(value.clone(), level);
            node.forward = Some(old);
            let idx = self.nodes.alloc(node);
            match above {
                Some(parent) => self.nodes.get_mut(parent).down = Some(idx),
                None => self.root = Some(idx),
            }
            above = Some(idx);
            displaced = self.nodes.get(old).down;
        }
        debug!("new minimum installed as root across {} levels", self.height);
    }

    /// For each level, the last node whose successor is not strictly less than `value`.
    fn predecessors(&self, root: Idx, value: &T) -> PerLevel<Idx> {
        let mut preds: PerLevel<Idx> = smallvec![root; self.height];
        let mut cursor = root;
        loop {
            while let Some(next) = self.nodes.get(cursor).forward {
                if self.nodes.get(next).value < *value {
                    cursor = next;
                } else {
                    break;
                }
            }
            let node = self.nodes.get(cursor);
            preds[node.level] = cursor;
            match node.down {
                Some(down) => cursor = down,
                None => break,
            }
        }
        return preds;
    }

    /// Remove the root tower and rebuild the next element as a full-height root.
    fn erase_root(&mut self, root: Idx) {
        let mut nexts: PerLevel<Option<Idx>> = smallvec![None; self.height];
        let mut cursor = Some(root);
        while let Some(idx) = cursor {
            let node = self.nodes.get(idx);
            nexts[node.level] = node.forward;
            cursor = node.down;
        }

        self.len -= 1;

        let Some(successor) = nexts[0] else {
            self.free_tower(root);
            self.root = None;
            debug!("erased the last element, {} levels kept", self.height);
            return;
        };

        // The successor's tower already reaches the highest level whose
        // neighbour bottoms out on it.
        let (reached, mut top) = (0..self.height)
            .rev()
            .find_map(|level| {
                let next = nexts[level]?;
                (self.bottom_of(next) == successor).then_some((level, next))
            })
            .unwrap_or((0, successor));

        let value = self.nodes.get(top).value.clone();
        for level in reached + 1..self.height {
            let mut up = Node::new(value.clone(), level);
            up.forward = nexts[level];
            up.down = Some(top);
            top = self.nodes.alloc(up);
        }

        self.free_tower(root);
        self.root = Some(top);
        debug!(
            "root erased, successor promoted from level {} to {}",
            reached,
            self.height - 1
        );
    }

    /// Remove the first equal element after the root. Returns false if absent.
    fn erase_after_root(&mut self, root: Idx, value: &T) -> bool {
        let preds = self.predecessors(root, value);

        match self.nodes.get(preds[0]).forward {
            Some(target) if self.nodes.get(target).value == *value => {}
            _ => return false,
        }

        let mut spliced = 0;
        for pred in preds {
            let Some(next) = self.nodes.get(pred).forward else {
                continue;
            };
            if self.nodes.get(next).value != *value {
                continue;
            }
            let after = self.nodes.get(next).forward;
            self.nodes.get_mut(pred).forward = after;
            self.nodes.free(next);
            spliced += 1;
        }

        self.len -= 1;
        trace!("erased element spliced from {} levels", spliced);
        return true;
    }

    fn bottom_of(&self, mut idx: Idx) -> Idx {
        while let Some(down) = self.nodes.get(idx).down {
            idx = down;
        }
        return idx;
    }

    fn free_tower(&mut self, top: Idx) {
        let mut cursor = Some(top);
        while let Some(idx) = cursor {
            cursor = self.nodes.free(idx).down;
        }
    }

    fn flip(&mut self) -> bool {
        let draw: f64 = Standard.sample(&mut self.rng);
        return draw < PROMOTE_BELOW;
    }

    // --- Invariant checking ---

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        use rustc_hash::FxHashMap;

        let Some(root) = self.root else {
            assert_eq!(self.len, 0, "INVARIANT VIOLATED: no root but len={}", self.len);
            assert_eq!(
                self.nodes.live(),
                0,
                "INVARIANT VIOLATED: no root but {} live nodes",
                self.nodes.live()
            );
            return;
        };

        // Invariant 1: the root chain has one node per level, top to bottom.
        let mut heads = Vec::with_capacity(self.height);
        let mut cursor = Some(root);
        while let Some(idx) = cursor {
            heads.push(idx);
            cursor = self.nodes.get(idx).down;
        }
        assert_eq!(
            heads.len(),
            self.height,
            "INVARIANT VIOLATED: root chain length={} != height={}",
            heads.len(),
            self.height
        );

        // Invariant 2: every level is sorted and its down links land, in order,
        // on equal elements one level below.
        let mut below_positions: FxHashMap<Idx, usize> = FxHashMap::default();
        let mut total = 0usize;
        for (depth, &head) in heads.iter().rev().enumerate() {
            let mut positions = FxHashMap::default();
            let mut last_down: Option<usize> = None;
            let mut prev: Option<&T> = None;
            let mut cursor = Some(head);
            while let Some(idx) = cursor {
                let node = self.nodes.get(idx);
                assert_eq!(node.level, depth, "INVARIANT VIOLATED: node on wrong level");
                if let Some(prev) = prev {
                    assert!(*prev <= node.value, "INVARIANT VIOLATED: level {} unsorted", depth);
                }
                match (depth, node.down) {
                    (0, None) => {}
                    (0, Some(_)) => panic!("INVARIANT VIOLATED: level 0 node has a down link"),
                    (_, None) => panic!("INVARIANT VIOLATED: level {} node lacks a down link", depth),
                    (_, Some(down)) => {
                        assert!(self.nodes.is_live(down), "INVARIANT VIOLATED: dangling down link");
                        assert!(
                            self.nodes.get(down).value == node.value,
                            "INVARIANT VIOLATED: down link changes value"
                        );
                        let pos = match below_positions.get(&down) {
                            Some(&pos) => pos,
                            None => panic!("INVARIANT VIOLATED: down link leaves level {}", depth - 1),
                        };
                        if let Some(last) = last_down {
                            assert!(last < pos, "INVARIANT VIOLATED: level {} out of order", depth);
                        }
                        last_down = Some(pos);
                    }
                }
                positions.insert(idx, positions.len());
                prev = Some(&node.value);
                cursor = node.forward;
            }
            if depth == 0 {
                assert_eq!(
                    positions.len(),
                    self.len,
                    "INVARIANT VIOLATED: level 0 holds {} != len={}",
                    positions.len(),
                    self.len
                );
            }
            total += positions.len();
            below_positions = positions;
        }

        // Invariant 3: nothing in the arena is unreachable.
        assert_eq!(
            total,
            self.nodes.live(),
            "INVARIANT VIOLATED: reachable nodes={} != live nodes={}",
            total,
            self.nodes.live()
        );
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_invariants(&self) {}
}

/// Iterator over the elements of level 0.
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    current: Option<Idx>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.current?);
        self.current = node.forward;
        return Some(&node.value);
    }
}

/// Iterator over the levels of a list, top first.
pub struct Levels<'a, T> {
    nodes: &'a Arena<T>,
    head: Option<Idx>,
}

impl<'a, T> Iterator for Levels<'a, T> {
    type Item = Iter<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.head?;
        self.head = self.nodes.get(head).down;
        return Some(Iter {
            nodes: self.nodes,
            current: Some(head),
        });
    }
}
