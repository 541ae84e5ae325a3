use crate::domain::title::BillingTitle;
use crate::error::{RemessaError, Result};
use std::io::Read;

/// Reads billing titles from a CSV source with a header row.
///
/// Whitespace around fields is trimmed and rows may omit trailing columns,
/// which read as empty; only `id`, `amount` and `due_date` need a value.
pub struct TitleReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TitleReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes one title per row, in file order.
    ///
    /// Fails up front only when the header row cannot be read.
    pub fn titles(mut self) -> Result<impl Iterator<Item = Result<BillingTitle>>> {
        let headers = self.reader.headers()?.clone();
        Ok(self.reader.into_records().map(move |row| -> Result<BillingTitle> {
            let mut row = row?;
            while row.len() < headers.len() {
                row.push_field("");
            }
            Ok(row.deserialize(Some(&headers))?)
        }))
    }
}
