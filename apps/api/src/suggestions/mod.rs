// Suggestion engine: rule-based findings over a document plus static
// writing tips and canned rewrites.

pub mod analyzer;
pub mod handlers;
pub mod improvements;
