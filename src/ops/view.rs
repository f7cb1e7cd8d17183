use crate::model::{Quote, ViewFilter};

/// Case-folded search needle, computed once per derivation
struct Needle(Option<String>);

impl Needle {
    fn new(term: &str) -> Self {
        if term.is_empty() {
            Needle(None)
        } else {
            Needle(Some(term.to_lowercase()))
        }
    }
}

fn admits(quote: &Quote, filter: &ViewFilter, needle: &Needle) -> bool {
    if !filter.status.admits(quote.marked) {
        return false;
    }
    match &needle.0 {
        None => true,
        Some(needle) => quote
            .field_text(filter.field)
            .to_lowercase()
            .contains(needle.as_str()),
    }
}

/// Derive the visible subset, preserving the collection's order.
pub fn derive_view<'a>(quotes: &'a [Quote], filter: &ViewFilter) -> Vec<&'a Quote> {
    let needle = Needle::new(&filter.term);
    quotes
        .iter()
        .filter(|q| admits(q, filter, &needle))
        .collect()
}
