//! # Receipt Rendering
//!
//! Materializes a structured [`Receipt`] as HTML: a fragment for on-screen
//! preview, and a self-contained standalone document for export/print.
//!
//! Every free-text field is escaped here, at the single point where data
//! becomes markup. The exported document embeds no external resources -
//! it must stay renderable offline, years later, from a single file.

use std::fmt::Write;

use crate::amount::format_grouped;
use crate::receipt::Receipt;

/// Placeholder for values that are absent or not computable.
pub const PLACEHOLDER: &str = "—";

/// Currency label shown next to the grand total.
pub const CURRENCY_LABEL: &str = "ریال";

// =============================================================================
// Escaping
// =============================================================================

/// Escapes text for safe interpolation into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

fn text_or_dash(field: Option<&str>) -> String {
    match field {
        Some(s) if !s.trim().is_empty() => escape_html(s),
        _ => PLACEHOLDER.to_string(),
    }
}

fn number_or_dash(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format_grouped(v),
        _ => PLACEHOLDER.to_string(),
    }
}

// =============================================================================
// Fragment Rendering
// =============================================================================

const CELL_STYLE: &str = "padding:10px;border-bottom:1px solid rgba(148,163,184,.2)";

/// Renders the receipt body as an HTML fragment (preview pane content).
pub fn render_receipt(receipt: &Receipt) -> String {
    let mut html = String::new();

    // Header: kind, date, event id
    let _ = write!(
        html,
        "<div style=\"font-family:IRANYekan, system-ui; direction:rtl; color:#111827\">\
         <div style=\"padding:14px 16px;border:1px solid rgba(148,163,184,.22);border-radius:18px;background:#fff\">\
         <div style=\"font-size:20px;font-weight:900\">{label}</div>\
         <div style=\"font-size:12px;color:#6b7280;margin-top:4px\">تاریخ: {date}</div>\
         <div style=\"font-size:12px;color:#6b7280;margin-top:2px\">شناسه رویداد: {id}</div>\
         </div>",
        label = receipt.kind.label(),
        date = escape_html(&receipt.created_at.format("%Y-%m-%d %H:%M").to_string()),
        id = escape_html(&receipt.event_id),
    );

    // Customer and event cards
    let _ = write!(
        html,
        "<div style=\"display:grid;grid-template-columns:1fr 1fr;gap:12px;margin-top:12px\">\
         <div style=\"border:1px solid rgba(148,163,184,.2);border-radius:16px;padding:12px;background:#fff\">\
         <div style=\"font-weight:800;margin-bottom:8px\">اطلاعات مشتری</div>\
         <div style=\"font-size:13px;color:#374151\">نام: <b>{name}</b></div>\
         <div style=\"font-size:13px;color:#374151;margin-top:6px\">شماره: <b>{phone}</b></div>\
         <div style=\"font-size:13px;color:#374151;margin-top:6px\">آدرس: <b>{address}</b></div>\
         </div>\
         <div style=\"border:1px solid rgba(148,163,184,.2);border-radius:16px;padding:12px;background:#fff\">\
         <div style=\"font-weight:800;margin-bottom:8px\">جزئیات رویداد</div>\
         <div style=\"font-size:13px;color:#374151\">نوع: <b>{event_type}</b></div>\
         <div style=\"font-size:13px;color:#374151;margin-top:6px\">توضیح: <b>{description}</b></div>\
         </div></div>",
        name = text_or_dash(receipt.customer.name.as_deref()),
        phone = text_or_dash(receipt.customer.phone.as_deref()),
        address = text_or_dash(receipt.customer.address.as_deref()),
        event_type = receipt.event_type.wire_name(),
        description = text_or_dash(receipt.description.as_deref()),
    );

    // Items table
    let _ = write!(
        html,
        "<div style=\"margin-top:12px;border:1px solid rgba(148,163,184,.2);border-radius:16px;overflow:hidden;background:#fff\">\
         <div style=\"padding:12px;font-weight:900;border-bottom:1px solid rgba(148,163,184,.2)\">آیتم‌ها</div>\
         <table style=\"width:100%;border-collapse:collapse;font-size:13px\">\
         <thead><tr style=\"color:#6b7280\">\
         <th style=\"text-align:right;{cell}\">کالا</th>\
         <th style=\"text-align:right;{cell}\">تعداد</th>\
         <th style=\"text-align:right;{cell}\">واحد</th>\
         <th style=\"text-align:right;{cell}\">ارزش</th>\
         <th style=\"text-align:right;{cell}\">جمع</th>\
         </tr></thead><tbody>",
        cell = CELL_STYLE,
    );

    if receipt.lines.is_empty() {
        let note = if receipt.items_unavailable {
            "آیتم‌های این رویداد در دسترس نیست."
        } else {
            "آیتمی برای این رویداد موجود نیست."
        };
        let _ = write!(
            html,
            "<tr><td colspan=\"5\" style=\"padding:12px;color:#6b7280\">{note}</td></tr>"
        );
    } else {
        for line in &receipt.lines {
            let _ = write!(
                html,
                "<tr>\
                 <td style=\"{cell}\">{name}</td>\
                 <td style=\"{cell}\">{quantity}</td>\
                 <td style=\"{cell}\">{unit}</td>\
                 <td style=\"{cell}\">{value}</td>\
                 <td style=\"{cell}\">{amount}</td>\
                 </tr>",
                cell = CELL_STYLE,
                name = text_or_dash(Some(&line.name)),
                quantity = number_or_dash(line.quantity),
                unit = text_or_dash(line.unit.as_deref()),
                value = number_or_dash(line.value),
                amount = number_or_dash(line.amount.map(|a| a.get())),
            );
        }
    }

    // Total line: computed-from-complete-data and not-computable must
    // never look alike.
    let total_html = match receipt.total {
        Some(total) if receipt.total_complete => format!(
            "<div style=\"margin-top:12px;font-weight:900;font-size:18px\">جمع کل: {} {}</div>",
            format_grouped(total.get()),
            CURRENCY_LABEL,
        ),
        _ => "<div style=\"margin-top:12px;color:#6b7280;font-size:13px\">جمع کل قابل محاسبه نیست (ارزش/تعداد کافی نیست).</div>"
            .to_string(),
    };

    let _ = write!(
        html,
        "</tbody></table>\
         <div style=\"padding:12px\">{total_html}\
         <div style=\"margin-top:10px;display:flex;justify-content:space-between;gap:10px;color:#6b7280;font-size:12px\">\
         <div>امضا مشتری: ____________</div>\
         <div>امضا انبار: ____________</div>\
         </div></div></div></div>"
    );

    html
}

// =============================================================================
// Standalone Export
// =============================================================================

/// Wraps the rendered receipt in a complete, self-contained HTML page
/// suitable for saving as a file or sending to a print device.
pub fn standalone_document(title: &str, receipt: &Receipt) -> String {
    format!(
        "<!doctype html><html lang=\"fa\" dir=\"rtl\"><head>\
         <meta charset=\"utf-8\" />\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\
         <title>{title}</title>\
         <style>@media print {{ body {{ margin: 0; }} }}</style>\
         </head><body style=\"margin:18px;background:#fff\">{body}</body></html>",
        title = escape_html(title),
        body = render_receipt(receipt),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::{compose_receipt, ReceiptKind};
    use crate::types::{EventDetail, EventLine, EventType};
    use chrono::Utc;

    fn detail(items: Option<Vec<EventLine>>) -> EventDetail {
        EventDetail {
            id: "e1".to_string(),
            event_type: EventType::Sell,
            description: None,
            created_at: Utc::now(),
            customer_name: None,
            customer_phone: None,
            customer_address: None,
            items,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#039;b&#039;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_free_text_is_escaped_in_output() {
        let mut event = detail(Some(vec![EventLine {
            name: "<script>alert(1)</script>".to_string(),
            quantity: Some(1.0),
            unit: None,
            value: Some(5.0),
        }]));
        event.description = Some("a & b".to_string());

        let html = render_receipt(&compose_receipt(ReceiptKind::Seller, &event));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_missing_values_render_placeholder() {
        let event = detail(Some(vec![EventLine {
            name: "Bolt".to_string(),
            quantity: Some(2.0),
            unit: None,
            value: None,
        }]));
        let html = render_receipt(&compose_receipt(ReceiptKind::Buyer, &event));
        assert!(html.contains(PLACEHOLDER));
        assert!(html.contains("جمع کل قابل محاسبه نیست"));
    }

    #[test]
    fn test_complete_total_renders_grouped() {
        let event = detail(Some(vec![EventLine {
            name: "Bolt".to_string(),
            quantity: Some(500.0),
            unit: None,
            value: Some(10.0),
        }]));
        let html = render_receipt(&compose_receipt(ReceiptKind::Seller, &event));
        assert!(html.contains("جمع کل: 5,000"));
    }

    #[test]
    fn test_unavailable_items_note() {
        let html = render_receipt(&compose_receipt(ReceiptKind::Seller, &detail(None)));
        assert!(html.contains("در دسترس نیست"));
    }

    #[test]
    fn test_standalone_document_is_self_contained() {
        let receipt = compose_receipt(ReceiptKind::Buyer, &detail(None));
        let document = standalone_document("receipt-buy-e1 <draft>", &receipt);
        assert!(document.starts_with("<!doctype html>"));
        assert!(document.contains("receipt-buy-e1 &lt;draft&gt;"));
        // No external resources: nothing fetched over the network.
        assert!(!document.contains("http://"));
        assert!(!document.contains("https://"));
        assert!(!document.contains("<link"));
    }
}
