//! Error type shared by every fallible operation in the crate.

use crate::oracle::CityId;
use thiserror::Error;

/// Errors raised by the viral GA and its distance oracle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViralError {
    /// Neither `from -> to` nor `to -> from` has an edge record.
    ///
    /// Signals a malformed graph, or a route produced by the non-repairing
    /// crossover that walks an edge the graph does not have.
    #[error("no edge between cities {from} and {to} in either direction")]
    UnresolvedEdge { from: CityId, to: CityId },

    /// Rejection sampling could not draw an index pair `length` apart.
    #[error(
        "no index range of length {length} in a route of {route_len} cities after {attempts} draws"
    )]
    DegenerateRange {
        length: usize,
        route_len: usize,
        attempts: usize,
    },

    /// Roulette selection never landed on a populated virus fragment.
    #[error("roulette selection found no populated virus fragment after {attempts} spins")]
    EmptyFragmentSelection { attempts: usize },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Edge-list input could not be parsed.
    #[error("edge list line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The run ended without any legal tour in the hall of fame.
    #[error("hall of fame is empty: no legal tour was archived")]
    EmptyHallOfFame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ViralError::UnresolvedEdge { from: 3, to: 7 };
        assert_eq!(
            err.to_string(),
            "no edge between cities 3 and 7 in either direction"
        );

        let err = ViralError::InvalidConfig("max_generations must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: max_generations must be at least 1"
        );
    }
}
