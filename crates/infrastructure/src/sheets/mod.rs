pub mod a1;
pub mod grid;

pub use a1::{cell_range, column_index, column_letter, header_range, table_range};
pub use grid::{grid_from_response, header_position, parse_sheet_data, Grid, ValuesResponse};
