// ============================================================================
// Event Sourcing Infrastructure
// ============================================================================
//
// Generic, reusable serialization contract for domain events.
// Domain-specific code is in src/domain/
//
// ============================================================================

// Core abstractions (GENERIC - works with any event)
mod core;

// Re-export core infrastructure
pub use core::*;
