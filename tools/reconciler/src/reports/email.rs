//! Return-request email body
//!
//! Plain-text email wrapping the same grouped table as the credit
//! export, ready to paste into the wholesaler correspondence thread.

use allocation_engine::BatchSummaryRow;

/// Render the full email body
pub fn email_body(summary: &[BatchSummaryRow], greeting: &str, signature: &str) -> String {
    let mut lines = vec![
        greeting.to_string(),
        String::new(),
        "I would like to request an overstock return for the following items.".to_string(),
        "Please advise next steps and confirm the return authorization / instructions.".to_string(),
        String::new(),
        "Orders #\tUPC\tQTY".to_string(),
    ];

    for row in summary {
        lines.push(format!(
            "{}\t{}\t{:02}",
            row.order.unbracketed(),
            row.item.as_str(),
            row.total.units()
        ));
    }

    lines.push(String::new());
    lines.push(signature.to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
