use crate::error::AppError;
use crate::llm::CANDIDATE_DELIMITER;

/// Candidate commit messages from one model answer, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet(Vec<String>);

impl CandidateSet {
    /// Split a finished answer on `;` and trim each piece.
    ///
    /// Empty pieces (a trailing `;`, say) are dropped. Returns `None` when
    /// nothing is left.
    pub fn from_response(text: &str) -> Option<Self> {
        let candidates: Vec<String> = text
            .split(CANDIDATE_DELIMITER)
            .map(|piece| piece.trim().to_string())
            .filter(|piece| !piece.is_empty())
            .collect();

        if candidates.is_empty() {
            None
        } else {
            Some(CandidateSet(candidates))
        }
    }

    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Drain a fragment stream into a candidate set.
///
/// Fragments are appended exactly as received; trimming only happens per
/// candidate after the split.
pub fn aggregate<I>(stream: I) -> Result<CandidateSet, AppError>
where
    I: IntoIterator<Item = anyhow::Result<String>>,
{
    let mut text = String::new();
    for fragment in stream {
        let fragment = fragment.map_err(|e| AppError::Generation(AppError::chain(&e)))?;
        text.push_str(&fragment);
    }

    log::debug!("Model answered with {} bytes", text.len());

    CandidateSet::from_response(&text)
        .ok_or_else(|| AppError::Generation("the model returned an empty response".to_string()))
}
