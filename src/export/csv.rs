use crate::domain::model::SparqlQueryResponse;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::Utc;

/// Present values are always quoted; missing ones stay empty.
fn quote(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("\"{}\"", v.replace('"', "\"\"")),
        None => String::new(),
    }
}

/// Serializes every row (not just the visible page) of a result set.
///
/// Records are joined with `\n` and no trailing newline. A row whose only
/// field is missing becomes an empty line, never `""`.
pub fn to_csv(response: &SparqlQueryResponse) -> String {
    let mut lines = Vec::with_capacity(response.len() + 1);
    lines.push(response.vars().join(","));

    for binding in response.bindings() {
        let fields: Vec<String> = response
            .vars()
            .iter()
            .map(|var| quote(binding.get(var).map(|v| v.value.as_str())))
            .collect();
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

pub fn export_file_name(millis: i64) -> String {
    format!("query-results-{}.csv", millis)
}

/// Writes the CSV through `storage` and returns the path written.
pub async fn export_results<S: Storage>(
    storage: &S,
    response: &SparqlQueryResponse,
) -> Result<String> {
    let content = to_csv(response);
    let name = export_file_name(Utc::now().timestamp_millis());
    let path = storage.write_file(&name, content.as_bytes()).await?;
    tracing::info!("Exported {} rows to {}", response.len(), path);
    Ok(path)
}
