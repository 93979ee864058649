pub use crate::error::{Error, Operation};

pub use anstream::eprintln;
pub use anstream::println;
pub use color_eyre::eyre::{eyre, Context, Result};

/// Borderless table with a bold title row.
pub fn new_table(titles: &[&str]) -> prettytable::Table {
    let mut table = prettytable::Table::new();

    let format = prettytable::format::FormatBuilder::new()
        .padding(1, 1)
        .separator(
            prettytable::format::LinePosition::Title,
            prettytable::format::LineSeparator::new('-', '+', '+', '+'),
        )
        .build();

    table.set_format(format);
    table.set_titles(prettytable::Row::new(
        titles
            .iter()
            .map(|title| prettytable::Cell::new(title).style_spec("b"))
            .collect(),
    ));

    table
}
