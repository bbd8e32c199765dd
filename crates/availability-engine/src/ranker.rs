//! Order scored resources for presentation.

use crate::availability::AvailabilityResult;

/// Sort results by availability, most available first.
///
/// The sort is stable: resources with the same percentage keep their input
/// order.
pub fn rank(mut results: Vec<AvailabilityResult>) -> Vec<AvailabilityResult> {
    results.sort_by(|a, b| b.availability_percent.cmp(&a.availability_percent));
    results
}
