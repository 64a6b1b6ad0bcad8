//! Downstream communication formatting
//!
//! Renders the grouped (order, item, quantity) batch summary in the
//! formats the wholesaler workflow expects.

pub mod credit;
pub mod email;

pub use credit::{credit_html, credit_text};
pub use email::email_body;
