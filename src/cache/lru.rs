//! LRU Order Module
//!
//! Recency ordering over slot indices with O(1) touch, unlink and eviction.

// == Link ==
#[derive(Debug, Clone, Copy, Default)]
struct Link {
    prev: Option<usize>,
    next: Option<usize>,
    linked: bool,
}

// == LRU Order ==
/// Tracks access order of cache slots as an index-linked list.
///
/// - Front (head) = Most recently used
/// - Back (tail) = Least recently used
///
/// Slots are plain indices owned by the caller; this type only knows how
/// they are ordered.
#[derive(Debug, Default)]
pub struct LruOrder {
    links: Vec<Link>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl LruOrder {
    // == Constructor ==
    /// Creates a new empty order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an order with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Push Front ==
    /// Inserts an unlinked slot as most recently used.
    ///
    /// A slot that is already linked is moved to the front instead.
    pub fn push_front(&mut self, slot: usize) {
        if slot >= self.links.len() {
            self.links.resize(slot + 1, Link::default());
        }
        if self.links[slot].linked {
            self.move_to_front(slot);
            return;
        }

        self.links[slot] = Link {
            prev: None,
            next: self.head,
            linked: true,
        };
        match self.head {
            Some(old_head) => self.links[old_head].prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
        self.len += 1;
    }

    // == Touch ==
    /// Marks a linked slot as most recently used.
    pub fn move_to_front(&mut self, slot: usize) {
        if self.head == Some(slot) || !self.is_linked(slot) {
            return;
        }
        self.unlink(slot);
        self.push_front(slot);
    }

    // == Unlink ==
    /// Removes a slot from the order. Unknown slots are ignored.
    pub fn unlink(&mut self, slot: usize) {
        if !self.is_linked(slot) {
            return;
        }
        let Link { prev, next, .. } = self.links[slot];

        match prev {
            Some(p) => self.links[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.links[n].prev = prev,
            None => self.tail = prev,
        }

        self.links[slot] = Link::default();
        self.len -= 1;
    }

    // == Evict Oldest ==
    /// Returns and unlinks the least recently used slot.
    pub fn pop_back(&mut self) -> Option<usize> {
        let slot = self.tail?;
        self.unlink(slot);
        Some(slot)
    }

    /// Returns the least recently used slot without unlinking it.
    pub fn peek_back(&self) -> Option<usize> {
        self.tail
    }

    /// Returns the most recently used slot.
    pub fn peek_front(&self) -> Option<usize> {
        self.head
    }

    // == Clear ==
    /// Forgets every slot.
    pub fn clear(&mut self) {
        self.links.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates slots from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.head, move |&slot| self.links[slot].next)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_linked(&self, slot: usize) -> bool {
        self.links.get(slot).is_some_and(|link| link.linked)
    }
}
