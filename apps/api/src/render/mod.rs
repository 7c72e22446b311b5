// Rendering engine: layouts, date formatting, style overrides and the
// presentational tree, with HTML and PDF back-ends.
// PDF generation is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod dates;
pub mod handlers;
pub mod html;
pub mod layout;
pub mod layouts;
pub mod pdf;
pub mod style;
pub mod tree;
