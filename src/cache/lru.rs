//! LRU Tracker Module
//!
//! Implements Least Recently Used ordering for cache eviction.

// == Node Handle ==
/// Handle to a key's position in the tracker.
///
/// A handle stays valid until its node is removed; the slot may then be
/// reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Keys live in a doubly linked list stored in an index arena where:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Every operation is O(1); freed slots are recycled.
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Arena of list nodes, `None` for free slots
    slots: Vec<Option<Node<K>>>,
    /// Indices of free slots
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Adds a key as the most recently used and returns its handle.
    pub fn push_front(&mut self, key: K) -> NodeId {
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
        NodeId(idx)
    }

    // == Touch ==
    /// Marks a node as recently used (moves it to the head).
    ///
    /// Stale handles are ignored.
    pub fn touch(&mut self, id: NodeId) {
        if !self.is_live(id.0) || self.head == Some(id.0) {
            return;
        }
        self.unlink(id.0);
        self.link_front(id.0);
    }

    // == Remove ==
    /// Removes a node and returns its key, or None for a stale handle.
    pub fn remove(&mut self, id: NodeId) -> Option<K> {
        if !self.is_live(id.0) {
            return None;
        }
        self.unlink(id.0);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let tail = self.tail?;
        self.remove(NodeId(tail))
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.tail.map(|idx| &self.node(idx).key)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every node and releases the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iter ==
    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            tracker: self,
            cursor: self.head,
        }
    }

    fn is_live(&self, idx: usize) -> bool {
        matches!(self.slots.get(idx), Some(Some(_)))
    }

    fn node(&self, idx: usize) -> &Node<K> {
        match self.slots.get(idx) {
            Some(Some(node)) => node,
            _ => unreachable!("LRU list links to freed slot {idx}"),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<K> {
        match self.slots.get_mut(idx) {
            Some(Some(node)) => node,
            _ => unreachable!("LRU list links to freed slot {idx}"),
        }
    }

    /// Detaches a live node, patching its neighbours (or head/tail).
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }

        let node = self.node_mut(idx);
        node.prev = None;
        node.next = None;
    }

    /// Attaches a detached node at the head.
    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

// == Iterator ==
/// Iterator over tracked keys, most recently used first.
pub struct Iter<'a, K> {
    tracker: &'a LruTracker<K>,
    cursor: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let tracker: &'a LruTracker<K> = self.tracker;
        let node = tracker.node(idx);
        self.cursor = node.next;
        Some(&node.key)
    }
}
