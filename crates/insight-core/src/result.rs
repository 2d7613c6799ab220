use crate::catalog::ToolKind;
use crate::error::{InsightError, Result};
use crate::paths::{RESULTS_BACKUP_KEY, RESULTS_KEY};
use crate::response::ResponseState;
use crate::score::ScoreSummary;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CompletedResult
// ---------------------------------------------------------------------------

/// Archived snapshot of one finished assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedResult {
    pub tool_id: ToolKind,
    pub tool_name: String,
    pub response_state: ResponseState,
    pub score_summary: ScoreSummary,
    pub completed_at: DateTime<Utc>,
    pub user_name: String,
    pub user_email: String,
}

// ---------------------------------------------------------------------------
// Result store
// ---------------------------------------------------------------------------
//
// An append-only list of completed results kept as one JSON array under
// `RESULTS_KEY`. Entries are never edited or removed.

/// All stored results in insertion order. Nothing stored yet is an empty
/// list; unparseable data is [`InsightError::StorageCorrupt`].
pub fn load_all(store: &dyn KeyValueStore) -> Result<Vec<CompletedResult>> {
    let Some(raw) = store.get(RESULTS_KEY)? else {
        return Ok(Vec::new());
    };
    let corrupt = |reason: String| InsightError::StorageCorrupt {
        key: RESULTS_KEY.to_string(),
        reason,
    };
    let results: Vec<CompletedResult> =
        serde_json::from_str(&raw).map_err(|e| corrupt(e.to_string()))?;
    for (i, r) in results.iter().enumerate() {
        let Some(dimensions) = r.tool_id.dimensions() else {
            return Err(corrupt(format!("result #{i}: tool '{}' has no ratings", r.tool_id)));
        };
        if !r.response_state.covers_exactly(dimensions) {
            return Err(corrupt(format!(
                "result #{i}: ratings do not match the '{}' areas",
                r.tool_id
            )));
        }
    }
    Ok(results)
}

/// Like [`load_all`], but corrupt data reads as empty.
pub fn load_all_or_empty(store: &dyn KeyValueStore) -> Vec<CompletedResult> {
    match load_all(store) {
        Ok(results) => results,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable results");
            Vec::new()
        }
    }
}

/// Append `record` after every previously stored result and return the
/// full list. Unreadable data is copied to a backup key before a new list
/// is started, so nothing already stored is lost.
pub fn append(store: &mut dyn KeyValueStore, record: &CompletedResult) -> Result<Vec<CompletedResult>> {
    let mut results = match load_all(store) {
        Ok(results) => results,
        Err(e @ InsightError::StorageCorrupt { .. }) => {
            let backup = back_up_corrupt(store)?;
            tracing::warn!(error = %e, backup = %backup, "unreadable results moved aside");
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    results.push(record.clone());
    let data = serde_json::to_string(&results)?;
    store.set(RESULTS_KEY, &data)?;
    tracing::debug!(tool = %record.tool_id, total = results.len(), "result appended");
    Ok(results)
}

/// Copy the raw results payload to the first unused backup key.
fn back_up_corrupt(store: &mut dyn KeyValueStore) -> Result<String> {
    let raw = store.get(RESULTS_KEY)?.unwrap_or_default();
    let mut key = RESULTS_BACKUP_KEY.to_string();
    let mut n = 1;
    while store.get(&key)?.is_some() {
        key = format!("{RESULTS_BACKUP_KEY}.{n}");
        n += 1;
    }
    store.set(&key, &raw)?;
    Ok(key)
}

pub fn get(store: &dyn KeyValueStore, index: usize) -> Result<CompletedResult> {
    load_all(store)?
        .into_iter()
        .nth(index)
        .ok_or(InsightError::ResultNotFound(index))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::LIFE_BALANCE;
    use crate::score::compute_summary;
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn record(name: &str, saude: i64) -> CompletedResult {
        let response = ResponseState::with_ratings(LIFE_BALANCE, [("saude", saude)]).unwrap();
        let summary = compute_summary(&response, LIFE_BALANCE).unwrap();
        CompletedResult {
            tool_id: ToolKind::RodaVida,
            tool_name: ToolKind::RodaVida.name().to_string(),
            response_state: response,
            score_summary: summary,
            completed_at: Utc::now(),
            user_name: name.to_string(),
            user_email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    #[test]
    fn empty_store_loads_empty() {
        let kv = MemoryStore::new();
        assert!(load_all(&kv).unwrap().is_empty());
    }

    #[test]
    fn append_then_load_returns_record_last() {
        let dir = TempDir::new().unwrap();
        let mut kv = FileStore::new(dir.path());
        let first = record("Ana", 3);
        let second = record("Ana", 9);
        append(&mut kv, &first).unwrap();
        append(&mut kv, &second).unwrap();

        let loaded = load_all(&kv).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], first);
        assert_eq!(loaded.last(), Some(&second));
    }

    #[test]
    fn append_never_deduplicates() {
        let mut kv = MemoryStore::new();
        let r = record("Bia", 7);
        append(&mut kv, &r).unwrap();
        append(&mut kv, &r).unwrap();
        assert_eq!(load_all(&kv).unwrap().len(), 2);
    }

    #[test]
    fn corrupt_data_is_reported() {
        let mut kv = MemoryStore::new();
        kv.set(RESULTS_KEY, "{not json").unwrap();
        let err = load_all(&kv).unwrap_err();
        assert!(matches!(err, InsightError::StorageCorrupt { .. }));
        assert!(load_all_or_empty(&kv).is_empty());
    }

    #[test]
    fn append_over_corrupt_data_keeps_a_backup() {
        let mut kv = MemoryStore::new();
        let broken = "[{\"toolId\": 42}]";
        kv.set(RESULTS_KEY, broken).unwrap();
        let r = record("Caio", 4);
        let all = append(&mut kv, &r).unwrap();
        assert_eq!(all, vec![r.clone()]);
        assert_eq!(kv.get(RESULTS_BACKUP_KEY).unwrap().as_deref(), Some(broken));

        // A second corruption does not overwrite the first backup.
        kv.set(RESULTS_KEY, "garbage").unwrap();
        append(&mut kv, &r).unwrap();
        assert_eq!(kv.get(RESULTS_BACKUP_KEY).unwrap().as_deref(), Some(broken));
        let second = format!("{RESULTS_BACKUP_KEY}.1");
        assert_eq!(kv.get(&second).unwrap().as_deref(), Some("garbage"));
    }

    #[test]
    fn append_to_readable_data_makes_no_backup() {
        let mut kv = MemoryStore::new();
        append(&mut kv, &record("Ana", 5)).unwrap();
        append(&mut kv, &record("Ana", 6)).unwrap();
        assert!(kv.get(RESULTS_BACKUP_KEY).unwrap().is_none());
    }

    fn stored_with(response_state: serde_json::Value) -> MemoryStore {
        let mut json = serde_json::to_value(vec![record("Eva", 5)]).unwrap();
        json[0]["responseState"] = response_state;
        let mut kv = MemoryStore::new();
        kv.set(RESULTS_KEY, &json.to_string()).unwrap();
        kv
    }

    #[test]
    fn stored_ratings_outside_range_are_corrupt() {
        for bad in [0, 42] {
            let mut ratings = serde_json::to_value(ResponseState::initialize(LIFE_BALANCE)).unwrap();
            ratings["saude"] = serde_json::json!(bad);
            let kv = stored_with(ratings);
            assert!(
                matches!(load_all(&kv), Err(InsightError::StorageCorrupt { .. })),
                "rating {bad} accepted"
            );
        }
    }

    #[test]
    fn stored_ratings_with_wrong_keys_are_corrupt() {
        let missing = stored_with(serde_json::json!({ "saude": 5 }));
        assert!(matches!(load_all(&missing), Err(InsightError::StorageCorrupt { .. })));

        let mut extra = serde_json::to_value(ResponseState::initialize(LIFE_BALANCE)).unwrap();
        extra["sono"] = serde_json::json!(5);
        let kv = stored_with(extra);
        assert!(matches!(load_all(&kv), Err(InsightError::StorageCorrupt { .. })));
    }

    #[test]
    fn records_use_camel_case_keys() {
        let json = serde_json::to_value(record("Dani", 6)).unwrap();
        for key in [
            "toolId",
            "toolName",
            "responseState",
            "scoreSummary",
            "completedAt",
            "userName",
            "userEmail",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["toolId"], "roda-vida");
        assert_eq!(json["responseState"]["saude"], 6);
    }

    #[test]
    fn get_out_of_range() {
        let kv = MemoryStore::new();
        assert!(matches!(get(&kv, 0), Err(InsightError::ResultNotFound(0))));
    }
}
