use tabled::{settings::Style, Table, Tabled};
use crate::feature::{Feature, FeatureDict};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
pub struct FeatureRow {
    #[tabled(rename = "Id")]
    pub id: i64,
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Values")]
    pub values: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

/// Render `0=[a, b] 1=[c]`
fn render_dict(dict: &FeatureDict) -> String {
    dict.iter()
        .map(|(key, values)| format!("{}=[{}]", key, values.join(", ")))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One row per feature, with its values summarised in the last column
pub fn feature_table(features: &[(Feature, FeatureDict)]) -> String {
    if features.is_empty() {
        return String::new();
    }

    let rows: Vec<FeatureRow> = features
        .iter()
        .map(|(feature, dict)| FeatureRow {
            id: feature.id.as_i64(),
            path: feature.path.clone(),
            values: render_dict(dict),
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureId;

    #[test]
    fn test_render_dict() {
        let mut dict = FeatureDict::new();
        dict.insert(0, vec!["a".to_string(), "b".to_string()]);
        dict.insert(1, vec!["c".to_string()]);
        assert_eq!(render_dict(&dict), "0=[a, b] 1=[c]");
    }

    #[test]
    fn test_feature_table_contents() {
        let mut dict = FeatureDict::new();
        dict.insert(0, vec!["alice".to_string()]);
        let table = feature_table(&[(Feature::new(FeatureId(7), "acc/cont"), dict)]);

        assert!(table.contains("Path"));
        assert!(table.contains("acc/cont"));
        assert!(table.contains("0=[alice]"));
        assert!(feature_table(&[]).is_empty());
    }

    #[test]
    fn test_stats_table() {
        let table = stats_table(&[("Features", "3")]);
        assert!(table.contains("Features"));
        assert!(table.contains('3'));
        assert!(stats_table(&[]).is_empty());
    }
}
