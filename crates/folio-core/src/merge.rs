//! Import of external claim batches into the local set
//!
//! An import is all-or-nothing: the batch is validated in full before the
//! store is touched, every record gets a fresh id above the current maximum,
//! and the merged set is written back in one slot write. Records are never
//! deduplicated by content; importing the same file twice yields two copies.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::claim::{Claim, ClaimInput, HowKnown};
use crate::local::LocalClaimStore;
use crate::storage::{SlotStorage, StoreError};

/// Errors that can occur during import
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    /// Payload is not a list of claim-like records; nothing was written
    #[error("invalid import format: {0}")]
    InvalidFormat(String),

    /// Merged set could not be persisted; the store is unchanged
    #[error("import not persisted: {0}")]
    Persist(#[from] StoreError),
}

/// A claim-like record as found in an import file.
///
/// Export files carry full claims; the incoming `id` is ignored because
/// every imported record is re-identified.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub subject: String,
    pub claim_type: String,
    pub statement: String,
    pub effective_date: String,
    #[serde(default)]
    pub how_known: HowKnown,
    #[serde(default)]
    pub stars: Option<u8>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub aspect: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ImportRecord {
    fn into_parts(self) -> (ClaimInput, Option<String>) {
        let input = ClaimInput {
            subject: self.subject,
            claim_type: self.claim_type,
            statement: self.statement,
            effective_date: self.effective_date,
            how_known: self.how_known,
            stars: self.stars,
            score: self.score,
            aspect: self.aspect,
        };
        (input, self.created_at)
    }
}

/// Result of a successful import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// The re-identified records that were appended
    pub imported: Vec<Claim>,
    /// Size of the merged local set
    pub total: usize,
}

/// Validate an import payload.
///
/// The payload must be a JSON array whose every element is a claim-like
/// object with a 1-5 star rating when stars are present.
pub fn parse_batch(raw: &str) -> Result<Vec<ImportRecord>, ImportError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| ImportError::InvalidFormat(format!("not valid JSON: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(ImportError::InvalidFormat(
            "expected a JSON array of claims".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record: ImportRecord = serde_json::from_value(item).map_err(|e| {
                ImportError::InvalidFormat(format!("record {}: {}", index, e))
            })?;
            if let Some(stars) = record.stars {
                if !(1..=5).contains(&stars) {
                    return Err(ImportError::InvalidFormat(format!(
                        "record {}: stars must be 1-5, got {}",
                        index, stars
                    )));
                }
            }
            Ok(record)
        })
        .collect()
}

/// Append `incoming` to `existing`, assigning `max_id + position + 1` to each
/// incoming record. Records without `created_at` are stamped with `now`.
///
/// Returns the merged set and the re-identified records, or
/// `InvalidFormat` when the new ids would not fit in an `i64`.
pub fn merge_batch(
    existing: &[Claim],
    incoming: Vec<ImportRecord>,
    now: &str,
) -> Result<(Vec<Claim>, Vec<Claim>), ImportError> {
    let max_id = existing.iter().map(|c| c.id).max().unwrap_or(0).max(0);

    let imported = incoming
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            let id = i64::try_from(position)
                .ok()
                .and_then(|p| max_id.checked_add(p))
                .and_then(|id| id.checked_add(1))
                .ok_or_else(|| {
                    ImportError::InvalidFormat(format!(
                        "record {}: no id left above {}",
                        position, max_id
                    ))
                })?;
            let (input, created_at) = record.into_parts();
            Ok(Claim::from_input(
                id,
                input.normalized(),
                created_at.unwrap_or_else(|| now.to_string()),
            ))
        })
        .collect::<Result<Vec<Claim>, ImportError>>()?;

    let mut merged = Vec::with_capacity(existing.len() + imported.len());
    merged.extend_from_slice(existing);
    merged.extend(imported.iter().cloned());

    Ok((merged, imported))
}

/// Validate `raw`, merge it into the local set and persist the result.
///
/// On `InvalidFormat` or `Persist` errors the store is left unchanged.
pub fn import_batch<S: SlotStorage>(
    store: &LocalClaimStore<S>,
    raw: &str,
) -> Result<ImportOutcome, ImportError> {
    let incoming = parse_batch(raw)?;
    let existing = store.list();

    let now = Utc::now().to_rfc3339();
    let (merged, imported) = merge_batch(&existing, incoming, &now)?;

    store.replace_all(&merged)?;

    info!(
        imported = imported.len(),
        total = merged.len(),
        "imported claims into local store"
    );

    Ok(ImportOutcome {
        imported,
        total: merged.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimBuilder;
    use crate::storage::MemorySlots;
    use pretty_assertions::assert_eq;

    const BATCH: &str = r#"[
        {"id": 1, "subject": "example.com/alice", "claimType": "HAS_SKILL",
         "statement": "Rust", "effectiveDate": "2024-01-01", "stars": 5,
         "aspect": "skill", "createdAt": "2024-01-02T00:00:00+00:00"},
        {"subject": "https://example.com/alice", "claimType": "COMPLETED_PROJECT",
         "statement": "Sync layer", "effectiveDate": "2024-02-01"}
    ]"#;

    fn seeded_store(n: usize) -> LocalClaimStore<MemorySlots> {
        let store = LocalClaimStore::new(MemorySlots::new());
        for i in 0..n {
            store
                .create(
                    ClaimBuilder::new()
                        .subject("https://example.com/alice")
                        .claim_type("HAS_SKILL")
                        .statement(format!("existing {i}"))
                        .effective_date("2023-01-01")
                        .build(),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_parse_batch() {
        let records = parse_batch(BATCH).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stars, Some(5));
        assert_eq!(records[1].how_known, HowKnown::FirstHand);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let result = parse_batch(r#"{"claims": []}"#);
        assert!(matches!(result, Err(ImportError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_batch("not json"),
            Err(ImportError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_claim_element() {
        let result = parse_batch(r#"[{"subject": "x"}, 3]"#);
        assert!(matches!(result, Err(ImportError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_rejects_out_of_range_stars() {
        let raw = r#"[{"subject": "x", "claimType": "T", "statement": "s",
                       "effectiveDate": "2024-01-01", "stars": 9}]"#;
        assert!(matches!(
            parse_batch(raw),
            Err(ImportError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_merge_ids_above_existing() {
        let store = seeded_store(3);
        let existing = store.list();
        let max_existing = existing.iter().map(|c| c.id).max().unwrap();

        let (merged, imported) = merge_batch(&existing, parse_batch(BATCH).unwrap(), "now")
            .unwrap();

        assert_eq!(merged.len(), 5);
        assert_eq!(imported[0].id, max_existing + 1);
        assert_eq!(imported[1].id, max_existing + 2);
        assert_eq!(&merged[..3], existing.as_slice());
    }

    #[test]
    fn test_merge_normalizes_and_keeps_created_at() {
        let (_, imported) = merge_batch(&[], parse_batch(BATCH).unwrap(), "now").unwrap();

        assert_eq!(imported[0].id, 1);
        assert_eq!(imported[0].subject, "https://example.com/alice");
        assert_eq!(imported[0].score, Some(1.0));
        assert_eq!(imported[0].created_at, "2024-01-02T00:00:00+00:00");
        assert_eq!(imported[1].created_at, "now");
        assert_eq!(imported[1].score, None);
    }

    #[test]
    fn test_merge_ignores_negative_ids() {
        let existing = vec![Claim::from_input(-5, ClaimInput::default(), "t")];
        let (_, imported) = merge_batch(&existing, parse_batch(BATCH).unwrap(), "now")
            .unwrap();
        assert_eq!(imported[0].id, 1);
    }

    #[test]
    fn test_merge_rejects_id_overflow() {
        let existing = vec![Claim::from_input(i64::MAX - 1, ClaimInput::default(), "t")];
        let result = merge_batch(&existing, parse_batch(BATCH).unwrap(), "now");
        assert!(matches!(
            result,
            Err(ImportError::InvalidFormat(msg)) if msg.starts_with("record 1")
        ));
    }

    #[test]
    fn test_import_batch_counts() {
        let store = seeded_store(2);
        let before = store.list();

        let outcome = import_batch(&store, BATCH).unwrap();
        assert_eq!(outcome.imported.len(), 2);
        assert_eq!(outcome.total, 4);

        let after = store.list();
        assert_eq!(after.len(), 4);
        let old_max = before.iter().map(|c| c.id).max().unwrap();
        for claim in &outcome.imported {
            assert!(claim.id > old_max);
        }
    }

    #[test]
    fn test_import_twice_duplicates() {
        let store = seeded_store(1);
        import_batch(&store, BATCH).unwrap();
        import_batch(&store, BATCH).unwrap();

        let claims = store.list();
        assert_eq!(claims.len(), 5);

        let mut ids: Vec<i64> = claims.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_invalid_import_does_not_mutate() {
        let store = seeded_store(2);
        let before = store.list();

        let result = import_batch(&store, r#"{"not": "a list"}"#);
        assert!(matches!(result, Err(ImportError::InvalidFormat(_))));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_persist_failure_leaves_store_unchanged() {
        let store = LocalClaimStore::new(MemorySlots::with_quota(400));
        store
            .create(
                ClaimBuilder::new()
                    .subject("https://x")
                    .claim_type("HAS_SKILL")
                    .statement("only")
                    .effective_date("2024-01-01")
                    .build(),
            )
            .unwrap();
        let before = store.list();

        let result = import_batch(&store, BATCH);
        assert!(matches!(result, Err(ImportError::Persist(_))));
        assert_eq!(store.list(), before);
    }
}
