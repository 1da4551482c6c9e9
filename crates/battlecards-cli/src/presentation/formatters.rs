//! Text layout helpers shared by the console view and the terminal UI.

use battlecards_engine::{TabPane, markup};

/// Table cell text: markup stripped, line breaks folded onto one line.
pub fn cell_text(raw: &str) -> String {
    markup::plain(raw).lines().collect::<Vec<_>>().join(" / ")
}

/// Display width of each column in `tab`, counting headers and every row.
pub fn column_widths(tab: &TabPane) -> Vec<usize> {
    let columns = tab
        .rows
        .iter()
        .map(|r| r.cells.len())
        .chain(std::iter::once(tab.headers.len()))
        .max()
        .unwrap_or(0);

    (0..columns)
        .map(|i| {
            let header = tab.headers.get(i).map(|h| width(&cell_text(&h.raw)));
            let cells = tab
                .rows
                .iter()
                .filter_map(|r| r.cells.get(i))
                .map(|c| width(&cell_text(&c.raw)));
            header.into_iter().chain(cells).max().unwrap_or(0)
        })
        .collect()
}

pub fn width(text: &str) -> usize {
    text.chars().count()
}

pub fn pad(text: &str, to: usize) -> String {
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat_n(' ', to.saturating_sub(width(text))));
    padded
}

/// Width of the widest row index, at least one digit.
pub fn index_width(rows: usize) -> usize {
    rows.saturating_sub(1).to_string().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_strips_markup() {
        assert_eq!(cell_text("**Per user**\nper *month*"), "Per user / per month");
        assert_eq!(cell_text(""), "");
    }

    #[test]
    fn test_pad_counts_chars() {
        assert_eq!(pad("naïve", 7), "naïve  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }

    #[test]
    fn test_index_width() {
        assert_eq!(index_width(0), 1);
        assert_eq!(index_width(10), 1);
        assert_eq!(index_width(11), 2);
    }
}
