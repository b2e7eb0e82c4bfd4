//! Dashboard rendering of the stored record.

use crate::models::AnalysisRecord;
use anyhow::Result;
use serde_json::Value;

/// Human-readable dashboard summary.
pub fn render_text(record: &AnalysisRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", record.company_name));
    output.push_str(&format!("- **Industry:** {}\n", record.industry));
    output.push_str(&format!("- **Data file:** {}\n", record.file_name));
    if let Some(ref date) = record.analysis_date {
        output.push_str(&format!("- **Analysis date:** {}\n", date));
    }

    output.push_str(&format!(
        "\n## Enrichment ({}/3)\n\n",
        record.enrichment_count()
    ));
    output.push_str(&enrichment_line("Recommendations", &record.recommendations));
    output.push_str(&enrichment_line("Charts", &record.charts));
    output.push_str(&enrichment_line("Predictions", &record.predictions));

    if let Some(Value::Array(items)) = &record.recommendations {
        output.push_str("\n## Recommendations\n\n");
        for (i, item) in items.iter().enumerate() {
            let text = match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            output.push_str(&format!("{}. {}\n", i + 1, text));
        }
    }

    output
}

fn enrichment_line(label: &str, field: &Option<Value>) -> String {
    match field {
        None => format!("- ⚪ {}: not available\n", label),
        Some(Value::Array(items)) => format!("- ✅ {}: {} item(s)\n", label, items.len()),
        Some(Value::Object(map)) => format!("- ✅ {}: {} entr(ies)\n", label, map.len()),
        Some(_) => format!("- ✅ {}: available\n", label),
    }
}

/// Pretty-printed JSON of the full record.
pub fn render_json(record: &AnalysisRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_marks_missing_enrichment() {
        let mut record = AnalysisRecord::new("Acme", "Retail", "q1.csv");
        record.recommendations = Some(json!(["Cut costs", "Expand online"]));
        record.predictions = Some(json!({"trend": "up"}));

        let text = render_text(&record);
        assert!(text.starts_with("# Acme\n"));
        assert!(text.contains("## Enrichment (2/3)"));
        assert!(text.contains("Recommendations: 2 item(s)"));
        assert!(text.contains("Charts: not available"));
        assert!(text.contains("Predictions: 1 entr(ies)"));
        assert!(text.contains("1. Cut costs\n2. Expand online\n"));
    }

    #[test]
    fn test_json_is_the_record() {
        let record = AnalysisRecord::new("Acme", "Retail", "q1.csv");
        let parsed: AnalysisRecord = serde_json::from_str(&render_json(&record).unwrap()).unwrap();
        assert_eq!(parsed, record);
    }
}
