//! Spot allocation, fare calculation, and the entry/exit workflow.

/// Registry-backed spot allocation.
pub mod allocator;
/// Rate table and fare calculator.
pub mod fare;
/// Operator input channel.
pub mod input;
/// Entry/exit orchestration.
pub mod parking;
