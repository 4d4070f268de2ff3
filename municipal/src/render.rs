//! Plain-text tables for the `list` subcommands.

use std::io::{self, Write};

use chrono::{DateTime, NaiveDate, Utc};
use records::model::{Contact, Permit, Resident, ServiceRequest, Task};

/// A titled table with left-aligned, space-padded columns.
pub struct Table {
    title: &'static str,
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: &'static str, headers: &'static [&'static str]) -> Self {
        Self {
            title,
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        let widths = self.column_widths();
        writeln!(out, "{}", self.title)?;
        write_line(out, self.headers.iter().copied(), &widths)?;
        for row in &self.rows {
            write_line(out, row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }
}

fn write_line<'a>(
    out: &mut impl Write,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> io::Result<()> {
    let mut line = String::new();
    for (i, (cell, &width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(&format!("{cell:<width$}"));
    }
    writeln!(out, "{}", line.trim_end())
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_id(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn day(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

fn opt_day(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

pub fn residents_table(residents: &[Resident]) -> Table {
    let mut table = Table::new("Residents", &["ID", "Name", "Email", "Phone", "Address"]);
    for r in residents {
        table.push_row(vec![
            r.id.to_string(),
            r.name.clone(),
            opt(&r.email),
            opt(&r.phone),
            opt(&r.address),
        ]);
    }
    table
}

pub fn service_requests_table(requests: &[ServiceRequest]) -> Table {
    let mut table = Table::new(
        "Service Requests",
        &["ID", "ResidentID", "Category", "Status", "Created"],
    );
    for sr in requests {
        table.push_row(vec![
            sr.id.to_string(),
            opt_id(sr.resident_id),
            sr.category.clone(),
            sr.status.to_string(),
            day(&sr.created_at),
        ]);
    }
    table
}

pub fn permits_table(permits: &[Permit]) -> Table {
    let mut table = Table::new(
        "Permits",
        &["ID", "ResidentID", "Type", "Status", "Submitted"],
    );
    for p in permits {
        table.push_row(vec![
            p.id.to_string(),
            opt_id(p.resident_id),
            p.permit_type.clone(),
            p.status.to_string(),
            day(&p.submitted_at),
        ]);
    }
    table
}

pub fn contacts_table(contacts: &[Contact]) -> Table {
    let mut table = Table::new("Contacts", &["ID", "Dept", "Name", "Email", "Phone"]);
    for c in contacts {
        table.push_row(vec![
            c.id.to_string(),
            c.department.clone(),
            c.name.clone(),
            opt(&c.email),
            opt(&c.phone),
        ]);
    }
    table
}

pub fn tasks_table(tasks: &[Task]) -> Table {
    let mut table = Table::new("Tasks", &["ID", "Title", "Due", "Assigned", "Status"]);
    for t in tasks {
        table.push_row(vec![
            t.id.to_string(),
            t.title.clone(),
            opt_day(t.due_date),
            opt(&t.assigned_to),
            t.status.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use records::model::TaskStatus;

    fn rendered(table: &Table) -> String {
        let mut buf = Vec::new();
        table.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_columns_are_padded_to_widest_cell() {
        let mut table = Table::new("Things", &["ID", "Name"]);
        table.push_row(vec!["1".to_string(), "Short".to_string()]);
        table.push_row(vec!["10".to_string(), "A longer name".to_string()]);

        assert_eq!(
            rendered(&table),
            "Things\nID  Name\n1   Short\n10  A longer name\n"
        );
    }

    #[test]
    fn test_empty_table_prints_title_and_header() {
        assert_eq!(
            rendered(&residents_table(&[])),
            "Residents\nID  Name  Email  Phone  Address\n"
        );
    }

    #[test]
    fn test_tasks_table_renders_due_day_and_blank_optionals() {
        let task = Task {
            id: 3,
            title: "Inspect".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 7, 1),
            assigned_to: None,
            status: TaskStatus::InProgress,
            notes: None,
        };
        let text = rendered(&tasks_table(&[task]));
        let row = text.lines().nth(2).unwrap();
        assert!(row.starts_with("3 "));
        assert!(row.contains("2024-07-01"));
        assert!(row.ends_with("in_progress"));
    }
}
