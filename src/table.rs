use comfy_table::{
    presets::NOTHING,
    ColumnConstraint,
    ContentArrangement,
    Table as Grid,
    Width,
};
use std::io::{
    self,
    Write,
};

pub const ORDINAL_HEADER: &str = "№";

/// Every column is padded to at least this many characters.
pub const MIN_COLUMN_WIDTH: u16 = 10;

/// A borderless, left-aligned table whose first column is a row ordinal.
///
/// A table is consumed by [`Table::write_to`], each report section builds its own.
pub struct Table {
    grid: Grid,
    rows: usize,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header = std::iter::once(ORDINAL_HEADER.to_string())
            .chain(columns.into_iter().map(Into::into))
            .collect::<Vec<_>>();

        let mut grid = Grid::new();
        grid.load_preset(NOTHING)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(header);

        for column in grid.column_iter_mut() {
            column.set_padding((0, 1));
            column.set_constraint(ColumnConstraint::LowerBoundary(Width::Fixed(MIN_COLUMN_WIDTH)));
        }

        Self { grid, rows: 0 }
    }

    pub fn add_row<I>(&mut self, ordinal: usize, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = String>,
    {
        let row = std::iter::once(ordinal.to_string()).chain(fields).collect::<Vec<_>>();
        self.grid.add_row(row);
        self.rows += 1;
        self
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.grid.to_string().lines() {
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    /// Writes the table and flushes `out`. Returns the number of data rows written.
    pub fn write_to<W: Write>(self, out: &mut W) -> io::Result<usize> {
        out.write_all(self.render().as_bytes())?;
        out.flush()?;
        Ok(self.rows)
    }
}
