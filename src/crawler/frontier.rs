//! Crawl frontier: the explicit work list
//!
//! The original recursive traversal is replaced by an explicit stack of
//! tasks with a per-task depth budget, so deep or cyclic link graphs can
//! never exhaust the call stack, and parallel dispatch stays possible.

use crate::url::CrawlUrl;

/// One unit of crawl work
///
/// Created when a link is discovered, consumed when dispatched, and not
/// retained after completion.
#[derive(Debug, Clone)]
pub struct CrawlTask {
    /// The absolute URL to process
    pub url: CrawlUrl,

    /// Remaining hop budget; a task popped with 0 is skipped before fetch
    pub remaining_depth: u32,
}

impl CrawlTask {
    /// Creates a task with the given hop budget
    pub fn new(url: CrawlUrl, remaining_depth: u32) -> Self {
        Self {
            url,
            remaining_depth,
        }
    }

    /// Creates the follow-up task for a link discovered by this task
    pub fn child(&self, url: CrawlUrl) -> Self {
        Self {
            url,
            remaining_depth: self.remaining_depth.saturating_sub(1),
        }
    }
}

/// LIFO work list of pending crawl tasks
///
/// Last-in-first-out ordering gives depth-first traversal as links are
/// discovered. Ordering across branches is not guaranteed stable once
/// fetches run concurrently.
#[derive(Debug, Default)]
pub struct Frontier {
    stack: Vec<CrawlTask>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a task onto the work list
    pub fn push(&mut self, task: CrawlTask) {
        self.stack.push(task);
    }

    /// Pops the most recently discovered task
    pub fn pop(&mut self) -> Option<CrawlTask> {
        self.stack.pop()
    }

    /// Returns the number of pending tasks
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns true if no tasks are pending
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
