//! Plain-text roster files.
//!
//! # Input
//!
//! ```text
//! # comment
//! Fire
//! headcount 1
//! SUN_MON_TUE_WED_THU_FRI_SAT
//! Ana_Bea_Ana_Caio_Bea_Ana_Caio
//! Caio_Caio__Ana_Ana_Bea_Bea
//!
//! Phone
//! vacancy
//! Bea_Bea_Bea_Bea_Bea_Bea_Bea
//!
//! quota Ana Fire 3
//! ```
//!
//! A line that is not a keyword and has no `_` starts a category. Rows of
//! seven `_`-separated cells add one candidate per day to the current
//! category's pools; empty cells add nothing. A row of day abbreviations
//! (English or Portuguese) is a header and skipped. Workers are declared
//! by appearing in a row or a quota line.
//!
//! Any line containing `_` is read as a row, so category and worker names
//! in this format cannot contain `_` (`Fire_Station` is a two-cell row,
//! not a category). Domains built through [`DomainSpec`] have no such
//! restriction.
//!
//! # Output
//!
//! [`format_roster`] writes each category name, then one line per
//! headcount position with the seven day names joined by `_`, then a
//! blank line.

use crate::error::{LoadError, ParseError};
use crate::models::{Category, Day, Domain, DomainSpec, Roster, Worker, DAYS_PER_WEEK};

const DAY_HEADERS: [[&str; DAYS_PER_WEEK]; 2] = [
    ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"],
    ["DOM", "SEG", "TER", "QUA", "QUI", "SEX", "SAB"],
];

/// Parses a roster file and builds the domain.
pub fn parse_domain(input: &str) -> Result<Domain, LoadError> {
    Ok(parse_spec(input)?.build()?)
}

/// Parses a roster file into an unvalidated description.
pub fn parse_spec(input: &str) -> Result<DomainSpec, ParseError> {
    let mut spec = DomainSpec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut words = line.split_whitespace();
        match words.next() {
            Some("quota") => {
                let args: Vec<&str> = words.collect();
                let [worker, category, count] = args[..] else {
                    return Err(ParseError::new(
                        line_no,
                        "expected 'quota <worker> <category> <count>'",
                    ));
                };
                let count: i32 = count.parse().map_err(|_| {
                    ParseError::new(line_no, format!("quota '{count}' is not an integer"))
                })?;
                let worker = declare_worker(&mut spec, worker);
                worker.quotas.insert(category.to_string(), count);
            }
            Some("headcount") => {
                let value = words
                    .next()
                    .ok_or_else(|| ParseError::new(line_no, "expected 'headcount <count>'"))?;
                let headcount: usize = value.parse().map_err(|_| {
                    ParseError::new(line_no, format!("headcount '{value}' is not a count"))
                })?;
                current_category(&mut spec, line_no)?.headcount = headcount;
            }
            Some("vacancy") => {
                current_category(&mut spec, line_no)?.allow_vacancy = true;
            }
            _ if line.contains('_') => {
                let cells: Vec<&str> = line.split('_').map(str::trim).collect();
                if cells.len() != DAYS_PER_WEEK {
                    return Err(ParseError::new(
                        line_no,
                        format!("expected {DAYS_PER_WEEK} cells, found {}", cells.len()),
                    ));
                }
                current_category(&mut spec, line_no)?;
                if is_day_header(&cells) {
                    continue;
                }
                for (day, name) in Day::ALL.iter().zip(&cells) {
                    if name.is_empty() {
                        continue;
                    }
                    declare_worker(&mut spec, name);
                    if let Some(category) = spec.categories.last_mut() {
                        category.pools[day.index()].push(name.to_string());
                    }
                }
            }
            _ => spec.categories.push(Category::new(line)),
        }
    }

    Ok(spec)
}

fn is_day_header(cells: &[&str]) -> bool {
    DAY_HEADERS.iter().any(|header| {
        header
            .iter()
            .zip(cells)
            .all(|(h, c)| h.eq_ignore_ascii_case(c))
    })
}

fn current_category(spec: &mut DomainSpec, line: usize) -> Result<&mut Category, ParseError> {
    spec.categories
        .last_mut()
        .ok_or_else(|| ParseError::new(line, "no category declared before this line"))
}

fn declare_worker<'a>(spec: &'a mut DomainSpec, name: &str) -> &'a mut Worker {
    let idx = match spec.workers.iter().position(|w| w.name == name) {
        Some(idx) => idx,
        None => {
            spec.workers.push(Worker::new(name));
            spec.workers.len() - 1
        }
    };
    &mut spec.workers[idx]
}

/// Renders a roster as the weekly text table.
pub fn format_roster(roster: &Roster) -> String {
    let mut out = String::new();
    for entry in &roster.entries {
        out.push_str(&entry.category);
        out.push('\n');

        let headcount = entry.days.iter().map(Vec::len).max().unwrap_or(0);
        for position in 0..headcount {
            let row: Vec<&str> = entry
                .days
                .iter()
                .map(|names| names.get(position).map_or("", String::as_str))
                .collect();
            out.push_str(&row.join("_"));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}
