use crate::pkg::internal::adaptors::candidates::selectors::parse_candidates_from_value;
use crate::pkg::internal::adaptors::candidates::spec::StoredCandidate;
use crate::pkg::internal::store::{LocalStore, JOB_CANDIDATES_KEY};
use crate::prelude::Result;

pub struct CandidateMutator<'a> {
    store: &'a LocalStore,
}

impl<'a> CandidateMutator<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        CandidateMutator { store }
    }

    /// Prepends and rewrites the whole collection, returning it. Writers
    /// are expected to emit `CandidatesUpdated` afterwards themselves.
    pub fn append(&self, candidate: StoredCandidate) -> Result<Vec<StoredCandidate>> {
        let mut candidates =
            parse_candidates_from_value(self.store.get_item(JOB_CANDIDATES_KEY).as_deref());
        candidates.insert(0, candidate);
        self.store
            .set_item(JOB_CANDIDATES_KEY, &serde_json::to_string(&candidates)?)?;
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::prelude::Result;

    fn candidate(id: &str) -> StoredCandidate {
        StoredCandidate {
            id: id.into(),
            job_id: "job_20250101_1".into(),
            submitted_at: "2025-01-05T08:00:00+00:00".into(),
            attributes: Vec::new(),
        }
    }

    #[test]
    #[traced_test]
    fn test_append_prepends_and_returns_full_collection() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = LocalStore::open(dir.path())?;
        let mutator = CandidateMutator::new(&store);
        let first = mutator.append(candidate("cand_20250105_0001"))?;
        assert_eq!(first.len(), 1);
        let second = mutator.append(candidate("cand_20250105_0002"))?;
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].id, "cand_20250105_0002");
        Ok(())
    }
}
