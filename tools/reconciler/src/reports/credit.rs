//! Wholesaler credit export
//!
//! Tab-separated text for the credit portal and an HTML table for
//! pasting into rich-text email. Order numbers go out without their
//! canonical brackets; quantities are zero-padded to two digits.

use allocation_engine::BatchSummaryRow;

/// Table header fields shared by both renderings
const HEADER: [&str; 3] = ["Orders #", "UPC", "QTY"];

/// Minimal HTML escaping for table cell content
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the grouped batch as tab-separated credit lines
pub fn credit_text(summary: &[BatchSummaryRow]) -> String {
    let mut lines = vec![format!("**{}**\t**{}**\t**{}**", HEADER[0], HEADER[1], HEADER[2])];
    for row in summary {
        lines.push(format!(
            "{}\t{}\t{:02}",
            row.order.unbracketed(),
            row.item.as_str(),
            row.total.units()
        ));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render the grouped batch as a standalone HTML document
pub fn credit_html(summary: &[BatchSummaryRow]) -> String {
    let mut rows = String::new();
    for row in summary {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:02}</td></tr>",
            escape(row.order.unbracketed()),
            escape(row.item.as_str()),
            row.total.units()
        ));
    }

    format!(
        "<!doctype html><html><head><meta charset='utf-8'>\
         <style>\
         body{{font-family:Calibri,Arial,sans-serif;font-size:11pt;color:#111;}}\
         table{{border-collapse:collapse;margin:0;}}\
         th,td{{border:1px solid #d9d9d9;padding:6px 10px;text-align:left;}}\
         th{{font-weight:700;background:#f7f7f7;}}\
         </style></head><body>\
         <table><thead><tr><th>{}</th><th>{}</th><th>{}</th></tr></thead>\
         <tbody>{rows}</tbody></table>\
         </body></html>",
        HEADER[0], HEADER[1], HEADER[2]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::{ItemId, OrderId};
    use types::quantity::Quantity;

    fn summary() -> Vec<BatchSummaryRow> {
        vec![
            BatchSummaryRow {
                order: OrderId::normalize("100"),
                item: ItemId::normalize("000111"),
                total: Quantity::new(5),
            },
            BatchSummaryRow {
                order: OrderId::normalize("101"),
                item: ItemId::normalize("000222"),
                total: Quantity::new(12),
            },
        ]
    }

    #[test]
    fn test_credit_text_layout() {
        let text = credit_text(&summary());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "**Orders #**\t**UPC**\t**QTY**");
        assert_eq!(lines[1], "100\t000111\t05", "brackets stripped, qty zero-padded");
        assert_eq!(lines[2], "101\t000222\t12");
    }

    #[test]
    fn test_credit_text_empty_batch_is_header_only() {
        let text = credit_text(&[]);
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_credit_html_contains_rows() {
        let html = credit_html(&summary());
        assert!(html.contains("<td>100</td><td>000111</td><td>05</td>"));
        assert!(html.contains("<th>Orders #</th>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#x27;");
    }
}
