/// Spreadsheet reader.
pub mod excel;
/// Pasted JSON reader.
pub mod pasted;
