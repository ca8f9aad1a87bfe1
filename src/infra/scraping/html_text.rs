// Cell markup → plain text, and the row/cell walk of a selected table.

use scraper::ElementRef;

/// Line width handed to html2text; wide enough that cell text never wraps.
const TEXT_WIDTH: usize = 1000;

/// Converts an HTML fragment (e.g. a cell's inner HTML) to plain text.
pub fn html_to_text(html: &str) -> String {
    html2text::from_read(html.as_bytes(), TEXT_WIDTH)
        .trim()
        .to_string()
}

/// Plain text of everything inside `element`.
pub fn element_text(element: ElementRef<'_>) -> String {
    html_to_text(&element.inner_html())
}

/// Rows of `table` with their `td`/`th` cells, skipping rows that belong to
/// tables nested inside it.
pub fn table_rows<'a>(table: ElementRef<'a>) -> Vec<Vec<ElementRef<'a>>> {
    table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr" && nearest_table_is(*el, table))
        .map(|row| {
            row.children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                .collect()
        })
        .collect()
}

fn nearest_table_is(element: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "table")
        .is_some_and(|owner| owner.id() == table.id())
}
