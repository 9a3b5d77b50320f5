/// Column layout of every Gray Book unit table, in page order.
pub const RAW_HEADERS: [&str; RAW_COLUMNS] = [
    "Employee Name",
    "Job Title",
    "Tenure",
    "Empl Class",
    "Present FTE",
    "Proposed FTE",
    "Present Salary",
    "Proposed Salary",
];
pub const RAW_COLUMNS: usize = 8;

pub const COL_NAME: usize = 0;
pub const COL_TITLE: usize = 1;
pub const COL_TENURE: usize = 2;
pub const COL_CLASS: usize = 3;
pub const COL_PRESENT_FTE: usize = 4;
pub const COL_PROPOSED_FTE: usize = 5;
pub const COL_PRESENT_SALARY: usize = 6;
pub const COL_PROPOSED_SALARY: usize = 7;

/// Employee-name cell of a total row as scraped; becomes its job title once repaired.
pub const TOTAL_SENTINEL: &str = "Employee Total for All Jobs...";

/// One scraped line, positional, blank cells as `None`.
pub type RawRow = [Option<String>; RAW_COLUMNS];

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Unit code the page was published under (e.g. `FY`).
    pub unit: String,
    /// Header names as they appear on the page.
    pub headers: Vec<String>,
    /// Each body row, right-padded with `None` to the full column count.
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(unit: impl Into<String>, headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self {
            unit: unit.into(),
            headers,
            rows,
        }
    }

    /// Build with the canonical headers; rows given as string slices, `""` meaning blank.
    pub fn from_cells(unit: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|cells| {
                let mut row: RawRow = Default::default();
                for (slot, cell) in row.iter_mut().zip(cells.iter()) {
                    if !cell.is_empty() {
                        *slot = Some(cell.to_string());
                    }
                }
                row
            })
            .collect();
        Self::new(
            unit,
            RAW_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows,
        )
    }
}
