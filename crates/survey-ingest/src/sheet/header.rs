//! Header layout: metadata columns, marker, question columns.

/// A survey header split at its marker column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyLayout {
    /// Header cells, verbatim.
    pub columns: Vec<String>,
    /// Index of the first cell equal to the marker label.
    pub marker_index: usize,
}

impl SurveyLayout {
    /// Locates the marker in `columns`. Returns `None` when no cell is
    /// literally equal to `marker`.
    pub fn locate(columns: Vec<String>, marker: &str) -> Option<Self> {
        let marker_index = columns.iter().position(|column| column == marker)?;
        Some(Self {
            columns,
            marker_index,
        })
    }

    /// Number of header cells.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Columns up to and including the marker.
    pub fn metadata_columns(&self) -> &[String] {
        &self.columns[..=self.marker_index]
    }

    /// Columns strictly after the marker, in header order.
    pub fn question_columns(&self) -> &[String] {
        &self.columns[self.marker_index + 1..]
    }

    pub fn question_count(&self) -> usize {
        self.question_columns().len()
    }

    /// Question texts paired with their 1-based position.
    pub fn positioned_questions(&self) -> impl Iterator<Item = (usize, &str)> {
        self.question_columns()
            .iter()
            .enumerate()
            .map(|(idx, text)| (idx + 1, text.as_str()))
    }

    /// Splits a record of exactly `width()` cells into metadata and answers.
    ///
    /// Returns `None` when the record width differs from the header.
    pub fn split<'a>(&self, fields: &'a [String]) -> Option<(&'a [String], &'a [String])> {
        if fields.len() != self.width() {
            return None;
        }
        Some(fields.split_at(self.marker_index + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_locate_marker() {
        let layout =
            SurveyLayout::locate(columns(&["Name", "Custom Data", "Color", "Size"]), "Custom Data")
                .unwrap();
        assert_eq!(layout.marker_index, 1);
        assert_eq!(layout.metadata_columns(), &["Name", "Custom Data"]);
        assert_eq!(layout.question_columns(), &["Color", "Size"]);
    }

    #[test]
    fn test_locate_missing_marker() {
        assert!(SurveyLayout::locate(columns(&["Name", "Color"]), "Custom Data").is_none());
    }

    #[test]
    fn test_marker_match_is_literal() {
        assert!(SurveyLayout::locate(columns(&["Name", "custom data "]), "Custom Data").is_none());
    }

    #[test]
    fn test_marker_as_last_column_has_no_questions() {
        let layout = SurveyLayout::locate(columns(&["Name", "Custom Data"]), "Custom Data").unwrap();
        assert_eq!(layout.question_count(), 0);
    }

    #[test]
    fn test_positioned_questions_are_one_based() {
        let layout =
            SurveyLayout::locate(columns(&["Custom Data", "Q1", "Q2"]), "Custom Data").unwrap();
        let positioned: Vec<(usize, &str)> = layout.positioned_questions().collect();
        assert_eq!(positioned, vec![(1, "Q1"), (2, "Q2")]);
    }

    #[test]
    fn test_split_record() {
        let layout =
            SurveyLayout::locate(columns(&["Name", "Custom Data", "Color"]), "Custom Data").unwrap();
        let record = columns(&["Ann", "x", "Red"]);
        let (metadata, answers) = layout.split(&record).unwrap();
        assert_eq!(metadata, &["Ann", "x"]);
        assert_eq!(answers, &["Red"]);

        assert!(layout.split(&columns(&["Ann", "x"])).is_none());
        assert!(layout.split(&columns(&["Ann", "x", "Red", "extra"])).is_none());
    }
}
