//! Node layer: tower nodes stored in an arena and addressed by index.
//!
//! Every node sits on exactly one level. `forward` points at the next node on
//! the same level, `down` at the node one level below that carries the same
//! element. Both are plain indices into the arena; the arena alone owns the
//! nodes, so unlinking a node and releasing its slot are separate steps.

/// Node index type. u32 saves space vs usize on 64-bit.
pub(crate) type Idx = u32;

/// A single node of a tower.
pub(crate) struct Node<T> {
    /// The element this tower represents.
    pub(crate) value: T,
    /// Level this node lives on, 0 being the bottom.
    pub(crate) level: usize,
    /// Next node on the same level.
    pub(crate) forward: Option<Idx>,
    /// Same element one level down. Always `None` on level 0.
    pub(crate) down: Option<Idx>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, level: usize) -> Node<T> {
        return Node {
            value,
            level,
            forward: None,
            down: None,
        };
    }
}

/// Slot storage for nodes with a free list for reuse.
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free_list: Vec<Idx>,
    live: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Arena<T> {
        return Arena {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        };
    }

    /// Number of nodes currently allocated.
    pub(crate) fn live(&self) -> usize {
        return self.live;
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> Idx {
        self.live += 1;
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx as usize] = Some(node);
            return idx;
        }
        let idx = slot_index(self.slots.len());
        self.slots.push(Some(node));
        return idx;
    }

    /// Release a slot. The caller must already have unlinked the node.
    pub(crate) fn free(&mut self, idx: Idx) -> Node<T> {
        let node = match self.slots[idx as usize].take() {
            Some(node) => node,
            None => panic!("node {} freed twice", idx),
        };
        self.free_list.push(idx);
        self.live -= 1;
        return node;
    }

    pub(crate) fn get(&self, idx: Idx) -> &Node<T> {
        match &self.slots[idx as usize] {
            Some(node) => node,
            None => panic!("node {} used after free", idx),
        }
    }

    pub(crate) fn get_mut(&mut self, idx: Idx) -> &mut Node<T> {
        match &mut self.slots[idx as usize] {
            Some(node) => node,
            None => panic!("node {} used after free", idx),
        }
    }

    #[cfg(debug_assertions)]
    pub(crate) fn is_live(&self, idx: Idx) -> bool {
        return matches!(self.slots.get(idx as usize), Some(Some(_)));
    }

    /// Drop every node at once.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.live = 0;
    }
}

/// Index for a new slot at the end of a vector of `len` slots.
fn slot_index(len: usize) -> Idx {
    debug_assert!(len < Idx::MAX as usize, "arena full at {} slots", len);
    return len as Idx;
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        return Self::new();
    }
}
