//! Table output formatting

use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format rows as a rounded table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    format_table_or(data, "No results found.")
}

/// Format rows, or print `empty` when there are none
pub fn format_table_or<T: Tabled>(data: &[T], empty: &str) -> String {
    if data.is_empty() {
        return empty.to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Two-column detail view for a single record
pub fn format_details(rows: &[(&str, String)]) -> String {
    let mut builder = Builder::default();
    for (key, value) in rows {
        builder.push_record([key.to_string(), value.clone()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct CodeRow {
        #[tabled(rename = "CODE")]
        code: String,
        #[tabled(rename = "STATUS")]
        status: String,
    }

    #[test]
    fn test_format_table_empty() {
        let rows: Vec<CodeRow> = vec![];
        assert_eq!(format_table(&rows), "No results found.");
        assert_eq!(
            format_table_or(&rows, "No activation codes."),
            "No activation codes."
        );
    }

    #[test]
    fn test_format_table_rows() {
        let rows = vec![
            CodeRow {
                code: "AAAA-1111".to_string(),
                status: "ACTIVE".to_string(),
            },
            CodeRow {
                code: "BBBB-2222".to_string(),
                status: "SUSPENDED".to_string(),
            },
        ];

        let result = format_table(&rows);

        assert!(result.contains("CODE"));
        assert!(result.contains("AAAA-1111"));
        assert!(result.contains("SUSPENDED"));
        assert!(result.contains("╭"));
    }

    #[test]
    fn test_format_details() {
        let result = format_details(&[
            ("Email", "ada@example.com".to_string()),
            ("Role", "superadmin".to_string()),
        ]);

        assert!(result.contains("Email"));
        assert!(result.contains("superadmin"));
        assert!(result.contains("╰"));
    }
}
