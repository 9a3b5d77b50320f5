// src/process/html.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use super::raw_table::{RawRow, RawTable, RAW_COLUMNS};
use super::utils::clean_cell;
use crate::error::GrayBookError;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("table selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("row selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").expect("cell selector"));

/// Parse one unit page into its raw table.
///
/// The page must hold exactly one `<table>`. The first all-`<th>` row supplies the
/// headers; every other non-blank row becomes a body row, `colspan` cells repeated
/// across the columns they span and short rows right-padded with `None`.
#[instrument(level = "debug", skip(html), fields(len = html.len()))]
pub fn parse_unit_table(unit: &str, html: &str) -> Result<RawTable, GrayBookError> {
    let doc = Html::parse_document(html);
    let tables: Vec<ElementRef> = doc.select(&TABLE).collect();
    if tables.len() != 1 {
        return Err(GrayBookError::TableCount {
            unit: unit.to_string(),
            found: tables.len(),
        });
    }

    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<RawRow> = Vec::new();

    for tr in tables[0].select(&ROW) {
        let cells: Vec<ElementRef> = tr.select(&CELL).collect();
        if cells.is_empty() {
            continue;
        }

        if headers.is_empty() && cells.iter().all(|c| c.value().name() == "th") {
            headers = cells
                .iter()
                .map(|c| clean_cell(&c.text().collect::<String>()).unwrap_or_default())
                .collect();
            continue;
        }

        let mut values: Vec<Option<String>> = Vec::with_capacity(RAW_COLUMNS);
        for cell in &cells {
            let text = clean_cell(&cell.text().collect::<String>());
            let span = cell
                .value()
                .attr("colspan")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .unwrap_or(1)
                .max(1);
            let width = values.len().saturating_add(span);
            if width > RAW_COLUMNS {
                return Err(GrayBookError::RowTooWide {
                    unit: unit.to_string(),
                    row: rows.len(),
                    found: width,
                    max: RAW_COLUMNS,
                });
            }
            values.extend(std::iter::repeat(text).take(span));
        }

        if values.iter().all(Option::is_none) {
            continue;
        }
        let mut row: RawRow = Default::default();
        for (slot, value) in row.iter_mut().zip(values) {
            *slot = value;
        }
        rows.push(row);
    }

    if headers.len() != RAW_COLUMNS {
        return Err(GrayBookError::ColumnCount {
            unit: unit.to_string(),
            expected: RAW_COLUMNS,
            found: headers.len(),
        });
    }

    debug!(unit, rows = rows.len(), "parsed unit table");
    Ok(RawTable::new(unit, headers, rows))
}
