use std::collections::{HashSet, VecDeque};

/// FIFO queue of discovered-but-not-yet-fetched URLs plus the visited set
/// for one crawl session.
///
/// A URL that has ever been queued or visited is never queued again; the
/// visited set only grows.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<(String, usize)>,
    queued: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a URL at the given depth unless it has already been queued or
    /// visited. Returns whether it was accepted.
    pub fn offer(&mut self, url: String, depth: usize) -> bool {
        if self.visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.queue.push_back((url, depth));
        true
    }

    /// Take the next (url, depth) pair off the queue
    pub fn pop(&mut self) -> Option<(String, usize)> {
        let entry = self.queue.pop_front()?;
        self.queued.remove(&entry.0);
        Some(entry)
    }

    /// Record a URL as visited. Returns false if it already was.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }
}
