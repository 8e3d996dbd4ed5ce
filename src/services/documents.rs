use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

use crate::services::purchase_orders::PurchaseOrderDetail;

/// Financial-year voucher reference for one order, e.g. `PO-N-12-24-25`.
pub fn voucher_number(po_no: i32, date: NaiveDate) -> String {
    let current_year = date.year() % 100;
    format!("PO-N-{}-{:02}-{:02}", po_no, current_year, current_year + 1)
}

/// `₹1,234,567.50` style formatting. Non-finite values render as zero.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "₹0.00".to_string();
    }
    let negative = value < 0.0;
    let rounded = format!("{:.2}", value.abs());
    let (integral, fractional) = match rounded.split_once('.') {
        Some(parts) => parts,
        None => (rounded.as_str(), "00"),
    };

    let mut grouped = String::new();
    let digits = integral.as_bytes();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }

    if negative {
        format!("-₹{}.{}", grouped, fractional)
    } else {
        format!("₹{}.{}", grouped, fractional)
    }
}

/// Indian-system number words: crore, lakh, thousand, hundred.
pub fn number_to_words(number: u64) -> String {
    const UNITS: [&str; 10] = [
        "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
    ];
    const TEENS: [&str; 10] = [
        "Ten",
        "Eleven",
        "Twelve",
        "Thirteen",
        "Fourteen",
        "Fifteen",
        "Sixteen",
        "Seventeen",
        "Eighteen",
        "Nineteen",
    ];
    const TENS: [&str; 10] = [
        "", "Ten", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
    ];

    if number == 0 {
        return "Zero".to_string();
    }

    let mut words = String::new();
    let mut number = number;

    if number >= 10_000_000 {
        words.push_str(&number_to_words(number / 10_000_000));
        words.push_str(" Crore ");
        number %= 10_000_000;
    }
    if number >= 100_000 {
        words.push_str(&number_to_words(number / 100_000));
        words.push_str(" Lakh ");
        number %= 100_000;
    }
    if number >= 1_000 {
        words.push_str(&number_to_words(number / 1_000));
        words.push_str(" Thousand ");
        number %= 1_000;
    }
    if number >= 100 {
        words.push_str(&number_to_words(number / 100));
        words.push_str(" Hundred ");
        number %= 100;
    }
    if number > 0 {
        if number < 10 {
            words.push_str(UNITS[number as usize]);
        } else if number < 20 {
            words.push_str(TEENS[(number - 10) as usize]);
        } else {
            words.push_str(TENS[(number / 10) as usize]);
            if number % 10 > 0 {
                words.push(' ');
                words.push_str(UNITS[(number % 10) as usize]);
            }
        }
    }

    words.trim().to_string()
}

/// Amount line printed under the order total: whole rupees in words, paise
/// as a number, always closed with "Only".
pub fn amount_in_words(amount: f64) -> String {
    let rupees = amount.max(0.0).floor() as u64;
    let mut words = format!("{} Rupees", number_to_words(rupees));

    let fraction = amount.max(0.0).fract();
    if fraction > 0.0 {
        let paise = (fraction * 100.0).round() as u64;
        if paise > 0 {
            let _ = write!(words, " and {} Paise", paise);
        }
    }

    words.push_str(" Only");
    words
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn opt(value: &Option<String>) -> String {
    value.as_deref().map(escape_html).unwrap_or_default()
}

/// Renders the printable order document. The HTML is served directly; any
/// PDF conversion happens outside this service.
pub fn render_order_document(detail: &PurchaseOrderDetail) -> String {
    let order = &detail.order;
    let totals = &detail.totals;

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = write!(html, "<title>Purchase Order {}</title>\n", order.po_no);
    html.push_str(
        "<style>body{font-family:sans-serif}table{border-collapse:collapse;width:100%}\
         th,td{border:1px solid #444;padding:4px 8px;text-align:left}\
         .totals td{border:none;text-align:right}</style>\n</head>\n<body>\n",
    );

    html.push_str("<h1>Purchase Order</h1>\n");
    let _ = write!(
        html,
        "<p><strong>Voucher No:</strong> {}<br>\n<strong>PO No:</strong> {}<br>\n\
         <strong>Date:</strong> {}</p>\n",
        voucher_number(order.po_no, order.date),
        order.po_no,
        order.date.format("%Y-%m-%d")
    );

    if let Some(dealer) = &detail.dealer {
        let _ = write!(html, "<h2>Supplier</h2>\n<p>{}", escape_html(&dealer.name));
        for field in [&dealer.address, &dealer.city, &dealer.state, &dealer.pincode] {
            if let Some(value) = field {
                let _ = write!(html, "<br>{}", escape_html(value));
            }
        }
        if let Some(gst_no) = &dealer.gst_no {
            let _ = write!(html, "<br>GSTIN: {}", escape_html(gst_no));
        }
        html.push_str("</p>\n");
    }

    html.push_str(
        "<table>\n<tr><th>#</th><th>Material</th><th>Spec</th><th>Brand</th>\
         <th>Qty</th><th>Unit</th><th>Price</th><th>Amount</th></tr>\n",
    );
    for (i, item) in detail.items.iter().enumerate() {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td></tr>\n",
            i + 1,
            opt(&item.material_name),
            opt(&item.spec),
            opt(&item.brand),
            item.quantity,
            opt(&item.unit),
            format_currency(item.price),
            format_currency(item.price * item.quantity as f64)
        );
    }
    html.push_str("</table>\n");

    let _ = write!(
        html,
        "<table class=\"totals\">\n\
         <tr><td>Subtotal:</td><td>{}</td></tr>\n\
         <tr><td>Tax:</td><td>{}</td></tr>\n\
         <tr><td>Discount ({}%):</td><td>{}</td></tr>\n\
         <tr><td><strong>Grand Total:</strong></td><td><strong>{}</strong></td></tr>\n\
         </table>\n",
        format_currency(totals.subtotal),
        format_currency(totals.tax_amount),
        order.discount,
        format_currency(totals.discount_amount),
        format_currency(totals.grand_total)
    );

    let _ = write!(
        html,
        "<p><strong>Amount in words:</strong> {}</p>\n",
        amount_in_words(totals.grand_total)
    );

    if let Some(notes) = &order.notes {
        let _ = write!(html, "<p><strong>Notes:</strong> {}</p>\n", escape_html(notes));
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_for_small_numbers() {
        assert_eq!(number_to_words(0), "Zero");
        assert_eq!(number_to_words(7), "Seven");
        assert_eq!(number_to_words(13), "Thirteen");
        assert_eq!(number_to_words(55), "Fifty Five");
        assert_eq!(number_to_words(100), "One Hundred");
    }

    #[test]
    fn words_follow_the_indian_grouping() {
        assert_eq!(number_to_words(1_234), "One Thousand Two Hundred Thirty Four");
        assert_eq!(
            number_to_words(1_234_567),
            "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven"
        );
        assert_eq!(
            number_to_words(12_345_678),
            "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight"
        );
    }

    #[test]
    fn amount_in_words_includes_paise_only_when_present() {
        assert_eq!(amount_in_words(55.0), "Fifty Five Rupees Only");
        assert_eq!(amount_in_words(55.5), "Fifty Five Rupees and 50 Paise Only");
        assert_eq!(amount_in_words(0.0), "Zero Rupees Only");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(55.0), "₹55.00");
        assert_eq!(format_currency(1_234_567.5), "₹1,234,567.50");
        assert_eq!(format_currency(-42.25), "-₹42.25");
        assert_eq!(format_currency(f64::NAN), "₹0.00");
    }

    #[test]
    fn voucher_spans_the_financial_year() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(voucher_number(12, date), "PO-N-12-24-25");
    }

    #[test]
    fn html_escapes_user_content() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
