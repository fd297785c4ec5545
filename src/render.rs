//! Plain-text views of controller state for the terminal.

use crate::core::entity::InfoSheet;
use crate::core::map::MapMarker;
use crate::core::query::{format_cell, sample_title, QueryConsole, ResultsPager};
use crate::core::search::SearchController;
use crate::domain::model::{
    AttributeValueType, EntityAttribute, EntityInfo, HealthMetric, QueryHistory,
};
use chrono::{DateTime, Datelike, NaiveDate};
use std::fmt::Write as _;

pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Thousands separators, at most three fraction digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `M/D/YYYY`; anything that does not parse as a date is returned as-is.
pub fn format_date(value: &str) -> String {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        });
    match date {
        Some(d) => format!("{}/{}/{}", d.month(), d.day(), d.year()),
        None => value.to_string(),
    }
}

pub fn format_attribute_value(attr: &EntityAttribute) -> String {
    let value = match attr.value_type {
        AttributeValueType::Date => format_date(&attr.value),
        AttributeValueType::Number => attr
            .value
            .parse::<f64>()
            .map(format_number)
            .unwrap_or_else(|_| attr.value.clone()),
        AttributeValueType::Entity => attr
            .value_label
            .clone()
            .unwrap_or_else(|| attr.value.clone()),
        AttributeValueType::String | AttributeValueType::Url => attr.value.clone(),
    };
    match &attr.unit {
        Some(unit) => format!("{} {}", value, unit),
        None => value,
    }
}

fn format_metric(metric: &HealthMetric) -> String {
    match metric.unit.as_deref() {
        Some("%") => format!("{}%", format_number(metric.value)),
        Some(unit) => format!("{} {}", format_number(metric.value), unit),
        None => format_number(metric.value),
    }
}

pub fn search_results(search: &SearchController) -> String {
    let mut out = String::new();
    if let Some(error) = &search.error {
        let _ = writeln!(out, "Error: {}", error);
        return out;
    }

    let _ = writeln!(out, "{} found", plural(search.total as usize, "result"));
    for entity in &search.results {
        let badge = entity
            .iso3_code
            .as_deref()
            .map(|code| format!(" [{}]", code))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {}{}  ({})  {}",
            entity.label, badge, entity.entity_type, entity.id
        );
    }

    let pages = search.total_pages();
    if pages > 1 {
        let _ = writeln!(out, "Page {} of {}", search.page, pages);
    }
    out
}

fn metric_section(out: &mut String, title: &str, metrics: &[HealthMetric]) {
    if metrics.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {}", title);
    for metric in metrics {
        let _ = writeln!(out, "    {}: {}", metric.label, format_metric(metric));
    }
}

pub fn info_panel(sheet: &InfoSheet) -> String {
    let mut out = String::new();
    if sheet.is_loading() {
        out.push_str("Loading...\n");
        return out;
    }
    if let Some(error) = sheet.error() {
        let _ = writeln!(out, "Error: {}", error);
        return out;
    }
    let Some(info) = sheet.entity_info() else {
        return out;
    };

    let _ = writeln!(out, "{} ({})", info.label, info.entity_type);
    if let Some(description) = &info.description {
        let _ = writeln!(out, "{}", description);
    }

    if !info.attributes.is_empty() {
        out.push_str("\nAttributes\n");
        for attr in &info.attributes {
            let _ = writeln!(
                out,
                "  {}: {}",
                attr.property_label,
                format_attribute_value(attr)
            );
        }
    }

    if let (Some(year), Some(metrics)) = (sheet.selected_year(), sheet.filtered_metrics()) {
        let years: Vec<String> = sheet.available_years().iter().map(i32::to_string).collect();
        let _ = writeln!(
            out,
            "\nHealth metrics ({}; available: {})",
            year,
            years.join(", ")
        );
        if metrics.is_empty() {
            out.push_str("  No data for this year\n");
        }
        metric_section(&mut out, "Disease cases", &metrics.disease_cases);
        metric_section(&mut out, "Vaccination coverage", &metrics.vaccination_coverage);
        metric_section(&mut out, "Population", &metrics.population);
    }

    if !info.related_entities.is_empty() {
        out.push_str("\nRelated\n");
        for rel in &info.related_entities {
            let _ = writeln!(
                out,
                "  {}: {} ({})",
                rel.relationship_label, rel.label, rel.id
            );
        }
    }

    if !info.sources.is_empty() {
        out.push_str("\nSources\n");
        for source in &info.sources {
            let mut line = format!("  {}", source.name);
            if let Some(url) = &source.url {
                let _ = write!(line, " <{}>", url);
            }
            if let Some(date) = &source.date {
                let _ = write!(line, " ({})", format_date(date));
            }
            let _ = writeln!(out, "{}", line);
        }
    }
    out
}

pub fn related_entities(entities: &[EntityInfo]) -> String {
    let mut out = String::new();
    let noun = if entities.len() == 1 { "entity" } else { "entities" };
    let _ = writeln!(out, "{} related {}", entities.len(), noun);
    for entity in entities {
        let _ = writeln!(out, "  {}  ({})  {}", entity.label, entity.entity_type, entity.id);
    }
    out
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

pub fn query_results(console: &QueryConsole, pager: &ResultsPager) -> String {
    let mut out = String::new();
    if let Some(error) = &console.error {
        let _ = writeln!(out, "Error: {}", error);
        return out;
    }
    let Some(results) = &console.results else {
        return out;
    };

    let _ = writeln!(out, "{}", plural(results.len(), "result"));
    if let Some(ms) = console.execution_time_ms {
        let _ = writeln!(out, "Executed in {}ms", ms);
    }
    if results.is_empty() {
        return out;
    }

    let vars = results.vars();
    let rows = pager.rows(results.bindings());
    let mut table: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    let mut header = vec!["#".to_string()];
    header.extend(vars.iter().cloned());
    table.push(header);
    for row in &rows {
        let mut cells = vec![row.number.to_string()];
        cells.extend(vars.iter().map(|v| format_cell(row.binding.get(v))));
        table.push(cells);
    }

    let mut widths = vec![0usize; vars.len() + 1];
    for cells in &table {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    out.push('\n');
    for cells in &table {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    let _ = writeln!(out, "\n{}", pager.summary());
    out
}

pub fn sample_queries(samples: &[String]) -> String {
    let mut out = String::new();
    for (i, sample) in samples.iter().enumerate() {
        let _ = writeln!(out, "[{}] {}", i + 1, sample_title(sample));
        for line in sample.lines().skip(1) {
            let _ = writeln!(out, "    {}", line);
        }
        out.push('\n');
    }
    out
}

pub fn query_history(history: &[QueryHistory]) -> String {
    let mut out = String::new();
    if history.is_empty() {
        out.push_str("No queries executed yet\n");
        return out;
    }
    for item in history {
        let mut meta = Vec::new();
        if let Some(count) = item.result_count {
            meta.push(plural(count, "result"));
        }
        if let Some(ms) = item.execution_time {
            meta.push(format!("{}ms", ms));
        }
        let first_line = item.query.lines().next().unwrap_or_default();
        let _ = writeln!(
            out,
            "{}  {}  {}",
            item.timestamp.format("%Y-%m-%d %H:%M:%S"),
            meta.join(", "),
            first_line
        );
    }
    out
}

pub fn map_markers(markers: &[MapMarker]) -> String {
    let mut out = String::new();
    let noun = if markers.len() == 1 { "country" } else { "countries" };
    let _ = writeln!(out, "{} {}", markers.len(), noun);
    for marker in markers {
        let _ = writeln!(
            out,
            "  {}  {:<24} x={:>6.1} y={:>5.1}",
            marker.iso3, marker.label, marker.x, marker.y
        );
    }
    out
}
