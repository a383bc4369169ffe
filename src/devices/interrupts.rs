//! Interrupt request queue and vector resolution.
//!
//! The controller keeps pending requests ordered by priority, highest first.
//! Requests that share a priority keep their arrival order, so each priority
//! band drains first-in first-out.
//!
//! # Scope
//!
//! The controller supplies ordering and vector lookup only. It never
//! suspends the running program: checking [`has_pending`] after an
//! instruction, saving PC/PSW, switching to the interrupt stack and jumping
//! to [`resolve_vector`] is left to whoever drives the CPU.
//!
//! [`has_pending`]: InterruptController::has_pending
//! [`resolve_vector`]: InterruptController::resolve_vector

use crate::address_map::VECTOR_TABLE_BASE;
use crate::MemoryBus;

/// A pending interrupt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterruptRequest {
    /// Vector number, indexing the fixed vector table.
    pub vector: u32,

    /// Larger values are serviced first.
    pub priority: u8,

    /// Name of the raising peripheral, for logs and debuggers.
    pub source: String,
}

/// Priority-ordered queue of pending interrupt requests.
///
/// # Example
///
/// ```rust
/// use rxsim::InterruptController;
///
/// let mut ic = InterruptController::new();
/// ic.request_interrupt(10, 1, "low");
/// ic.request_interrupt(20, 5, "high");
///
/// assert_eq!(ic.pop_next().map(|r| r.vector), Some(20));
/// assert_eq!(ic.pop_next().map(|r| r.vector), Some(10));
/// assert_eq!(ic.pop_next(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InterruptController {
    pending: Vec<InterruptRequest>,
}

impl InterruptController {
    /// Creates a controller with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a request behind any already pending at the same priority.
    pub fn request_interrupt(&mut self, vector: u32, priority: u8, source: impl Into<String>) {
        let request = InterruptRequest {
            vector,
            priority,
            source: source.into(),
        };
        log::debug!(
            "interrupt requested: vector {} priority {} from {}",
            request.vector,
            request.priority,
            request.source
        );
        self.pending.push(request);
        // sort_by is stable, which keeps FIFO order within a priority band
        self.pending.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Returns true if any request is pending.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Removes and returns the highest-priority, earliest request.
    pub fn pop_next(&mut self) -> Option<InterruptRequest> {
        if self.pending.is_empty() {
            return None;
        }
        let request = self.pending.remove(0);
        log::debug!(
            "interrupt taken: vector {} priority {}",
            request.vector,
            request.priority
        );
        Some(request)
    }

    /// Pending requests in service order.
    pub fn pending(&self) -> &[InterruptRequest] {
        &self.pending
    }

    /// Number of pending requests.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending request.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Address of the vector table slot for `vector`.
    pub fn vector_address(vector: u32) -> u32 {
        VECTOR_TABLE_BASE.wrapping_add(vector.wrapping_mul(4))
    }

    /// Reads the 32-bit handler address stored for `vector`.
    pub fn resolve_vector<M: MemoryBus>(memory: &M, vector: u32) -> u32 {
        memory.read32(Self::vector_address(vector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address_map::RESET_VECTOR;
    use crate::AddressSpace;

    #[test]
    fn test_empty_controller() {
        let mut ic = InterruptController::new();
        assert!(!ic.has_pending());
        assert!(ic.is_empty());
        assert_eq!(ic.pop_next(), None);
    }

    #[test]
    fn test_priority_ordering() {
        let mut ic = InterruptController::new();
        ic.request_interrupt(1, 1, "a");
        ic.request_interrupt(5, 5, "b");
        ic.request_interrupt(3, 3, "c");

        let order: Vec<u8> = ic.pending().iter().map(|r| r.priority).collect();
        assert_eq!(order, vec![5, 3, 1]);
        assert_eq!(ic.len(), 3);
    }

    #[test]
    fn test_fifo_within_priority_band() {
        let mut ic = InterruptController::new();
        ic.request_interrupt(100, 2, "first");
        ic.request_interrupt(101, 7, "urgent");
        ic.request_interrupt(102, 2, "second");
        ic.request_interrupt(103, 2, "third");

        let sources: Vec<String> = std::iter::from_fn(|| ic.pop_next())
            .map(|r| r.source)
            .collect();
        assert_eq!(sources, vec!["urgent", "first", "second", "third"]);
    }

    #[test]
    fn test_clear() {
        let mut ic = InterruptController::new();
        ic.request_interrupt(1, 1, "a");
        ic.clear();
        assert!(!ic.has_pending());
    }

    #[test]
    fn test_vector_address() {
        assert_eq!(InterruptController::vector_address(0), VECTOR_TABLE_BASE);
        assert_eq!(InterruptController::vector_address(31), RESET_VECTOR);
    }

    #[test]
    fn test_resolve_vector() {
        let mut mem = AddressSpace::new();
        mem.write32(InterruptController::vector_address(28), 0xFFE0_1000);
        assert_eq!(InterruptController::resolve_vector(&mem, 28), 0xFFE0_1000);
    }
}
