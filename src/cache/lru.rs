//! LRU List Module
//!
//! Recency ordering for eviction: a doubly-linked list stored in a slab.
//!
//! Nodes live in a `Vec` and link to each other by index, so a [`Handle`]
//! stays valid until its node is removed. Freed slots are recycled by later
//! pushes. Every operation is O(1) except iteration.

// == Handle ==
/// Stable reference to a node in an [`LruList`].
///
/// A handle is invalidated by removing its node; using it afterwards may
/// address a recycled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

#[derive(Debug)]
struct Node {
    key: String,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU List ==
/// Keys ordered by access time.
///
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug, Default)]
pub struct LruList {
    slots: Vec<Option<Node>>,
    /// Indices of empty slots, reused before growing
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl LruList {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Front ==
    /// Inserts a key as the most recently used and returns its handle.
    pub fn push_front(&mut self, key: String) -> Handle {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.link_front(idx);
        self.len += 1;
        Handle(idx)
    }

    // == Move To Front ==
    /// Marks the node as most recently used.
    ///
    /// Returns false if the handle does not address a live node.
    pub fn move_to_front(&mut self, handle: Handle) -> bool {
        if self.node(handle.0).is_none() {
            return false;
        }
        if self.head != Some(handle.0) {
            self.unlink(handle.0);
            self.link_front(handle.0);
        }
        true
    }

    // == Remove ==
    /// Removes the node from anywhere in the list and returns its key.
    pub fn remove(&mut self, handle: Handle) -> Option<String> {
        self.node(handle.0)?;
        self.unlink(handle.0);
        let node = self.slots.get_mut(handle.0)?.take()?;
        self.free.push(handle.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Back ==
    /// Returns the least recently used key without removing it.
    pub fn back(&self) -> Option<&str> {
        self.tail
            .and_then(|idx| self.node(idx))
            .map(|node| node.key.as_str())
    }

    // == Pop Back ==
    /// Removes and returns the least recently used key.
    pub fn pop_back(&mut self) -> Option<String> {
        let tail = self.tail?;
        self.remove(Handle(tail))
    }

    // == Iterate ==
    /// Iterates keys from least to most recently used.
    pub fn iter_from_back(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::successors(self.tail.and_then(|idx| self.node(idx)), move |node| {
            node.prev.and_then(|idx| self.node(idx))
        })
        .map(|node| node.key.as_str())
    }

    // == Clear ==
    /// Drops every node and all recycled slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Linking ==
    fn node(&self, idx: usize) -> Option<&Node> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn unlink(&mut self, idx: usize) {
        let Some((prev, next)) = self.node(idx).map(|node| (node.prev, node.next)) else {
            return;
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.node_mut(h) {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}
