//! Aligned table rendering.

use std::iter;

use gearman_admin::{FunctionStatusRecord, WorkerRecord};
use unicode_width::UnicodeWidthStr;

use crate::query::QueryReport;

const COLUMN_GAP: &str = "  ";
const NO_FUNCTIONS: &str = "-";

pub(crate) fn render_human(report: &QueryReport) -> String {
    match report {
        QueryReport::Workers(workers) if workers.is_empty() => String::from("no workers connected\n"),
        QueryReport::Workers(workers) => render_workers(workers),
        QueryReport::Status(statuses) if statuses.is_empty() => {
            String::from("no functions registered\n")
        }
        QueryReport::Status(statuses) => render_statuses(statuses),
        QueryReport::Version(version) => format!("{version}\n"),
    }
}

fn render_workers(workers: &[WorkerRecord]) -> String {
    let rows: Vec<Vec<String>> = workers
        .iter()
        .map(|worker| {
            let functions = if worker.is_idle() {
                String::from(NO_FUNCTIONS)
            } else {
                worker.functions.join(" ")
            };
            vec![
                worker.file_descriptor.clone(),
                worker.address.clone(),
                worker.client_id.clone(),
                functions,
            ]
        })
        .collect();
    render_table(&["FD", "ADDRESS", "CLIENT-ID", "FUNCTIONS"], &rows)
}

fn render_statuses(statuses: &[FunctionStatusRecord]) -> String {
    let rows: Vec<Vec<String>> = statuses
        .iter()
        .map(|status| {
            vec![
                status.name.clone(),
                status.unfinished_jobs.to_string(),
                status.running_jobs.to_string(),
                status.available_workers.to_string(),
            ]
        })
        .collect();
    render_table(&["FUNCTION", "QUEUED", "RUNNING", "WORKERS"], &rows)
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.width()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut output = String::new();
    push_row(&mut output, headers.iter().copied(), &widths);
    for row in rows {
        push_row(&mut output, row.iter().map(String::as_str), &widths);
    }
    output
}

fn push_row<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (index, (cell, width)) in cells.zip(widths).enumerate() {
        if index > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        line.extend(iter::repeat_n(' ', width.saturating_sub(cell.width())));
    }
    output.push_str(line.trim_end());
    output.push('\n');
}
