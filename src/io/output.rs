use crate::atoms::Coordinates;
use crate::lattice::BravaisLattice;
use crate::orbits::ReducedGrid;
use prettytable::{format, row, Row, Table};
use std::fs::File;
use std::io::Write;

/// Creates a format for the output tables.
pub fn table_format() -> format::TableFormat {
    let line_position =
        &[format::LinePosition::Title, format::LinePosition::Bottom];
    let line_separator = format::LineSeparator::new('-', '+', '+', '+');
    format::FormatBuilder::new().column_separator('|')
                                .separators(line_position, line_separator)
                                .padding(1, 1)
                                .build()
}

/// The header of the k-point table.
pub fn kpoint_titles(coordinates: Coordinates) -> Row {
    match coordinates {
        Coordinates::Cartesian => row![c => "#", "X", "Y", "Z", "Weight"],
        Coordinates::Lattice => row![c => "#", "K1", "K2", "K3", "Weight"],
    }
}

/// Builds the table of representative k-points and their weights.
///
/// * `points`: The representatives, already in the requested coordinates.
/// * `reduced`: The reduced grid the weights are read from.
/// * `coordinates`: Only used to label the columns.
pub fn kpoints_file(points: &[[f64; 3]],
                    reduced: &ReducedGrid,
                    coordinates: Coordinates)
                    -> String {
    let mut table = Table::new();
    table.set_format(table_format());
    table.set_titles(kpoint_titles(coordinates));
    for (i, (p, weight)) in points.iter().zip(reduced.weights.iter()).enumerate() {
        table.add_row(row![r => i + 1,
                              format!("{:.6}", p[0]),
                              format!("{:.6}", p[1]),
                              format!("{:.6}", p[2]),
                              weight]);
    }
    table.to_string()
}

/// Produces the footer of the k-point file.
pub fn footer(lattice_type: BravaisLattice,
              operators: usize,
              reduced: &ReducedGrid)
              -> String {
    format!("  Lattice: {:>26}\n  Operators: {:>24}\n  Irreducible K-Points: {:>13}\n  Total Weight: {:>21}",
            lattice_type.to_string(),
            operators,
            reduced.len(),
            reduced.total_weight())
}

/// Writes contents to the file at filename.
pub fn write(contents: String, filename: String) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
