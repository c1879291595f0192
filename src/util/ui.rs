use chrono::{DateTime, Local};
use cursive::traits::Nameable;
use cursive::views::{EditView, NamedView};
use cursive::Cursive;

pub fn format_clock(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

pub fn build_edit_view<S1, S2, F, G>(
    name: S1,
    initial: S2,
    on_edit: F,
    on_submit: G,
) -> NamedView<EditView>
where
    F: Fn(&mut Cursive, &str, usize) + 'static,
    G: Fn(&mut Cursive, &str) + 'static,
    S1: Into<String>,
    S2: Into<String>,
{
    EditView::new()
        .content(initial)
        .on_edit(on_edit)
        .on_submit(on_submit)
        .with_name(name)
}

/// Longest prefix shared by every item, compared char by char.
pub fn common_prefix<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let mut items = items.into_iter();
    let Some(first) = items.next() else {
        return String::new();
    };

    let mut prefix_len = first.len();
    for item in items {
        prefix_len = first
            .char_indices()
            .zip(item.chars())
            .take_while(|((_, a), b)| a == b)
            .map(|((idx, ch), _)| idx + ch.len_utf8())
            .last()
            .unwrap_or(0)
            .min(prefix_len);
    }

    first[..prefix_len].to_string()
}
