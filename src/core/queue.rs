use slotmap::SecondaryMap;

use super::state::ProcKey;

#[derive(Debug, Clone, Copy)]
struct Link {
    prev: Option<ProcKey>,
    next: Option<ProcKey>,
}

/// FIFO ready queue over process arena keys.
///
/// Links live in a secondary map keyed by the process slot, so a member can
/// be unlinked by identity in O(1) without walking the queue.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    links: SecondaryMap<ProcKey, Link>,
    head: Option<ProcKey>,
    tail: Option<ProcKey>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: SecondaryMap::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn contains(&self, key: ProcKey) -> bool {
        self.links.contains_key(key)
    }

    pub fn front(&self) -> Option<ProcKey> {
        self.head
    }

    pub fn push_back(&mut self, key: ProcKey) {
        assert!(
            !self.links.contains_key(key),
            "Process {key:?} already present in the ready queue"
        );

        match self.tail {
            Some(tail) => self.links[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.links.insert(
            key,
            Link {
                prev: self.tail,
                next: None,
            },
        );
        self.tail = Some(key);
    }

    pub fn pop_front(&mut self) -> Option<ProcKey> {
        let head = self.head?;
        self.remove(head);
        Some(head)
    }

    /// Unlink `key` wherever it sits. Returns false if it was not queued.
    pub fn remove(&mut self, key: ProcKey) -> bool {
        let Some(link) = self.links.remove(key) else {
            return false;
        };

        match link.prev {
            Some(prev) => self.links[prev].next = link.next,
            None => self.head = link.next,
        }
        match link.next {
            Some(next) => self.links[next].prev = link.prev,
            None => self.tail = link.prev,
        }

        true
    }

    /// Members from front to back.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: self,
            cursor: self.head,
        }
    }
}

pub struct Iter<'a> {
    queue: &'a ReadyQueue,
    cursor: Option<ProcKey>,
}

impl Iterator for Iter<'_> {
    type Item = ProcKey;

    fn next(&mut self) -> Option<ProcKey> {
        let key = self.cursor?;
        self.cursor = self.queue.links[key].next;
        Some(key)
    }
}
