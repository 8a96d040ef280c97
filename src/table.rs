//! Table normalization.
//!
//! Turns a raw `<table>` into a header-label row plus data rows whose cells
//! line up with the labels by position. `rowspan`/`colspan` are expanded on a
//! grid so that a cell covering several columns or rows appears in each
//! position it covers.

use crate::dom::{self, NodeRef};
use crate::patterns;

/// Grid cells above this count are ignored.
const MAX_TABLE_CELLS: usize = 20_000;

/// Spans are clamped to this many rows or columns.
const MAX_SPAN: usize = 1_000;

/// A normalized table.
///
/// Every entry of `rows` has exactly `headers.len()` cells. Missing trailing
/// cells are `None`; cells past the last header are dropped.
#[derive(Clone, Default)]
pub struct TableModel<'a> {
    /// Lowercased, trimmed header labels. Duplicates are kept.
    pub headers: Vec<String>,
    /// The last row of the header block.
    pub header_row: Option<NodeRef<'a>>,
    /// Data rows aligned with `headers`.
    pub rows: Vec<Vec<Option<NodeRef<'a>>>>,
}

impl<'a> TableModel<'a> {
    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Cells of one column, skipping rows that are missing it.
    pub fn column(&self, index: usize) -> impl Iterator<Item = NodeRef<'a>> + '_ {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index).copied().flatten())
    }
}

#[derive(Clone, Copy)]
struct GridCell<'a> {
    node: NodeRef<'a>,
    /// False when the cell was carried down from a `rowspan` above.
    own: bool,
}

struct Carry<'a> {
    node: NodeRef<'a>,
    remaining: usize,
}

/// Normalize a `<table>` element.
///
/// The header block is the leading run of rows made only of `th` cells; if
/// the first row has a `td`, the first row alone is the header. Each column
/// is labelled by the bottom-most non-empty header cell covering it, so a
/// group header (`Peak chart positions`) gives way to the labels under it
/// while a cell spanning the whole block (`Title`) still labels its column.
/// Malformed
/// tables degrade to fewer columns or rows, never to an error.
#[must_use]
pub fn normalize_table<'a>(table: &NodeRef<'a>) -> TableModel<'a> {
    let rows = table_rows(table);
    let grid = expand_spans(&rows);

    if grid.is_empty() {
        return TableModel::default();
    }

    let header_count = grid
        .iter()
        .take_while(|(_, line)| {
            line.iter()
                .filter(|c| c.own)
                .all(|c| dom::is_tag(&c.node, "th"))
        })
        .count()
        .max(1);

    let (header_lines, data_lines) = grid.split_at(header_count.min(grid.len()));
    let width = header_lines
        .iter()
        .map(|(_, line)| line.len())
        .max()
        .unwrap_or(0);

    let headers: Vec<String> = (0..width)
        .map(|col| {
            header_lines
                .iter()
                .rev()
                .filter_map(|(_, line)| line.get(col))
                .map(|cell| patterns::normalize_label(&dom::rendered_text(&cell.node)))
                .find(|label| !label.is_empty())
                .unwrap_or_default()
        })
        .collect();

    let header_row = header_lines.last().map(|(tr, _)| *tr);

    let rows = data_lines
        .iter()
        .map(|(_, line)| {
            let mut cells: Vec<Option<NodeRef<'a>>> =
                line.iter().take(width).map(|c| Some(c.node)).collect();
            cells.resize(width, None);
            cells
        })
        .collect();

    TableModel {
        headers,
        header_row,
        rows,
    }
}

/// Rows that belong to this table, not to tables nested in its cells.
fn table_rows<'a>(table: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut rows = Vec::new();
    for child in dom::element_children(table) {
        if dom::is_tag(&child, "tr") {
            rows.push(child);
        } else if dom::is_any_tag(&child, &["thead", "tbody", "tfoot"]) {
            rows.extend(
                dom::element_children(&child)
                    .into_iter()
                    .filter(|n| dom::is_tag(n, "tr")),
            );
        }
    }
    rows
}

fn parse_span(node: &NodeRef, name: &str) -> usize {
    dom::get_attribute(node, name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map_or(1, |n| n.min(MAX_SPAN))
}

fn push_carried<'a>(
    carried: &mut [Option<Carry<'a>>],
    line: &mut Vec<GridCell<'a>>,
    col: &mut usize,
    budget: &mut usize,
) {
    while *col < carried.len() && *budget > 0 {
        let Some(carry) = carried[*col].take() else {
            break;
        };
        line.push(GridCell {
            node: carry.node,
            own: false,
        });
        *budget -= 1;
        if carry.remaining > 1 {
            carried[*col] = Some(Carry {
                node: carry.node,
                remaining: carry.remaining - 1,
            });
        }
        *col += 1;
    }
}

/// Lay the rows out on a grid, repeating spanned cells. Rows without any
/// cell are dropped.
///
/// At most `MAX_TABLE_CELLS` grid cells are produced. The row that reaches
/// the limit is kept up to that point and later rows are not read.
fn expand_spans<'a>(rows: &[NodeRef<'a>]) -> Vec<(NodeRef<'a>, Vec<GridCell<'a>>)> {
    let mut grid = Vec::with_capacity(rows.len());
    let mut carried: Vec<Option<Carry<'a>>> = Vec::new();
    let mut budget = MAX_TABLE_CELLS;

    for tr in rows {
        if budget == 0 {
            tracing::debug!(limit = MAX_TABLE_CELLS, "table grid truncated");
            break;
        }
        let mut line: Vec<GridCell<'a>> = Vec::new();
        let mut col = 0usize;

        for cell in dom::element_children(tr) {
            if !dom::is_any_tag(&cell, &["td", "th"]) {
                continue;
            }
            push_carried(&mut carried, &mut line, &mut col, &mut budget);
            if budget == 0 {
                break;
            }

            let colspan = parse_span(&cell, "colspan").min(budget);
            let rowspan = parse_span(&cell, "rowspan");
            if carried.len() < col + colspan {
                carried.resize_with(col + colspan, || None);
            }

            for i in 0..colspan {
                line.push(GridCell {
                    node: cell,
                    own: true,
                });
                if rowspan > 1 {
                    carried[col + i] = Some(Carry {
                        node: cell,
                        remaining: rowspan - 1,
                    });
                }
            }
            budget -= colspan;
            col += colspan;
        }
        push_carried(&mut carried, &mut line, &mut col, &mut budget);

        if !line.is_empty() {
            grid.push((*tr, line));
        }
    }

    grid
}
