//! Reduction of settled probe outcomes to a single winner

use crate::models::{Endpoint, ProbeOutcome, SelectionResult};

/// Choose the reachable endpoint with the lowest priority
///
/// Outcomes must be complete and in candidate order. Failures are skipped.
/// A later endpoint only replaces the current best when its priority is
/// strictly lower, so on a tie the endpoint declared first wins.
///
/// Returns [`SelectionResult::NoneAvailable`] when nothing succeeded,
/// including when `outcomes` is empty.
///
/// # Example
///
/// ```
/// use findserver::models::{Endpoint, ProbeOutcome, SelectionResult};
/// use findserver::prober::ProbeError;
/// use findserver::selector::select;
///
/// let outcomes = vec![
///     ProbeOutcome::failure(Endpoint::new("https://a.test", 1), ProbeError::UnexpectedStatus(503)),
///     ProbeOutcome::Success(Endpoint::new("https://b.test", 4)),
///     ProbeOutcome::Success(Endpoint::new("https://d.test", 2)),
/// ];
///
/// assert_eq!(select(&outcomes), SelectionResult::Selected(Endpoint::new("https://d.test", 2)));
/// ```
pub fn select<'a, I>(outcomes: I) -> SelectionResult
where
    I: IntoIterator<Item = &'a ProbeOutcome>,
{
    let mut best: Option<&Endpoint> = None;

    for outcome in outcomes {
        let ProbeOutcome::Success(endpoint) = outcome else {
            continue;
        };

        match best {
            Some(current) if endpoint.priority() >= current.priority() => {}
            _ => best = Some(endpoint),
        }
    }

    match best {
        Some(endpoint) => SelectionResult::Selected(endpoint.clone()),
        None => SelectionResult::NoneAvailable,
    }
}
