// Source-page scraping.
// - `html_table_scraper.rs` fetches the page and picks out the tables.
// - `html_text.rs` turns cell markup into plain text.

pub mod html_table_scraper;
pub mod html_text;

pub use html_table_scraper::HtmlTableScraper;
