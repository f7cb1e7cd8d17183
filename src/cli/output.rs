use serde::Serialize;

use crate::model::{EditableField, Quote};
use crate::util::{date, unicode};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub showing: usize,
    pub total: usize,
    pub quotes: Vec<&'a Quote>,
}

#[derive(Serialize)]
pub struct DeletedJson<'a> {
    pub deleted: &'a str,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One-line summary: badge, id, name, service, short date
pub fn format_quote_line(quote: &Quote) -> String {
    format!(
        "[{:<4}] {}  {}  {}  {}",
        quote.badge(),
        quote.id,
        unicode::single_line(&quote.name),
        unicode::single_line(&quote.service),
        date::format_date(&quote.created_at)
    )
}

/// The "Showing X of Y quotes" footer
pub fn format_count(showing: usize, total: usize) -> String {
    format!("Showing {} of {} quotes", showing, total)
}

/// Full record, message lines indented under their label
pub fn format_quote_detail(quote: &Quote) -> Vec<String> {
    let mut lines = vec![format!("Quote {}", quote.id)];
    for field in EditableField::ALL {
        let mut rows = field.get(quote).split('\n');
        lines.push(format!(
            "  {:<10}{}",
            format!("{}:", field.label()),
            rows.next().unwrap_or("")
        ));
        for row in rows {
            lines.push(format!("  {:<10}{}", "", row));
        }
    }
    lines.push(format!(
        "  {:<10}{}",
        "Received:",
        date::format_date_time(&quote.created_at)
    ));
    lines.push(format!("  {:<10}{}", "Status:", quote.status_label()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::view::tests::quote;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quote_line() {
        assert_eq!(
            format_quote_line(&quote("7", "Alice", false)),
            "[New ] 7  Alice  Roofing  07/03/2025"
        );
        assert_eq!(
            format_quote_line(&quote("8", "Bob", true)),
            "[Seen] 8  Bob  Roofing  07/03/2025"
        );
    }

    #[test]
    fn test_quote_detail() {
        let mut q = quote("7", "Alice", true);
        q.message = "Line one\nLine two".into();
        assert_eq!(
            format_quote_detail(&q),
            vec![
                "Quote 7",
                "  Name:     Alice",
                "  Phone:    555-017",
                "  Email:    alice@example.com",
                "  Service:  Roofing",
                "  Message:  Line one",
                "            Line two",
                "  Received: 07/03/2025, 12:00 pm",
                "  Status:   Marked as Seen",
            ]
        );
    }

    #[test]
    fn test_list_json_shape() {
        let q = quote("7", "Alice", false);
        let json = serde_json::to_value(ListJson {
            showing: 1,
            total: 3,
            quotes: vec![&q],
        })
        .unwrap();
        assert_eq!(json["showing"], 1);
        assert_eq!(json["total"], 3);
        assert_eq!(json["quotes"][0]["id"], "7");
        assert_eq!(json["quotes"][0]["marked"], false);
    }
}
