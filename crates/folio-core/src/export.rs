//! Dated JSON export documents

use chrono::{NaiveDate, Utc};

use crate::claim::Claim;

/// A claim set ready to be written to disk or offered as a download.
///
/// The document body is the bare claims array, pretty-printed, so an export
/// can be fed straight back through [`crate::merge::import_batch`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    claims: Vec<Claim>,
    date: NaiveDate,
}

impl ExportDocument {
    pub fn new(claims: Vec<Claim>, date: NaiveDate) -> Self {
        Self { claims, date }
    }

    /// Export dated with the current UTC day.
    pub fn today(claims: Vec<Claim>) -> Self {
        Self::new(claims, Utc::now().date_naive())
    }

    /// `claims-YYYY-MM-DD.json`
    pub fn file_name(&self) -> String {
        format!("claims-{}.json", self.date.format("%Y-%m-%d"))
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimBuilder;
    use crate::merge::parse_batch;

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let doc = ExportDocument::new(Vec::new(), date);
        assert_eq!(doc.file_name(), "claims-2024-03-07.json");
    }

    #[test]
    fn test_empty_export() {
        let doc = ExportDocument::today(Vec::new());
        assert_eq!(doc.to_json_pretty().unwrap(), "[]");
    }

    #[test]
    fn test_pretty_and_reimportable() {
        let claim = Claim::from_input(
            9,
            ClaimBuilder::new()
                .subject("https://example.com/alice")
                .claim_type("HAS_CERTIFICATION")
                .statement("AWS")
                .effective_date("2023-05-01")
                .stars(4)
                .aspect("certification")
                .build()
                .normalized(),
            "2023-05-02T00:00:00+00:00",
        );
        let doc = ExportDocument::new(vec![claim], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let json = doc.to_json_pretty().unwrap();

        assert!(json.starts_with("[\n"));
        assert!(json.contains("\"claimType\": \"HAS_CERTIFICATION\""));

        let records = parse_batch(&json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].statement, "AWS");
        assert_eq!(doc.claims().len(), 1);
    }
}
