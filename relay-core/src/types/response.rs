//! Handler chain result type.

/// Handler result for the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// The event was handled; stop the chain.
    Stop,
    /// Skip this handler, try next.
    Ignore,
}
