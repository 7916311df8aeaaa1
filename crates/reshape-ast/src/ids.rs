//! Fresh identifier sources for renaming.

/// Produces fresh integers on demand. Only uniqueness across one renaming pass
/// is required; the built-in [`Counter`] is also strictly increasing.
pub trait IdentifierSource {
    fn next_id(&mut self) -> u64;
}

/// Monotonic counter, owned by the caller and threaded through a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    next: u64,
}

impl Counter {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// The value the next call to `next_id` will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierSource for Counter {
    fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl<F: FnMut() -> u64> IdentifierSource for F {
    fn next_id(&mut self) -> u64 {
        self()
    }
}
