/// Formatting and writing of the reduced k-point table.
pub mod output;
