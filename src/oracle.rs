//! Distance lookup consumed by the solver.
//!
//! The GA never touches graph storage directly. It only needs to enumerate
//! cities and ask for the weight of a directed edge record, which is what
//! [`DistanceOracle`] provides. [`EdgeListGraph`] is a small in-memory
//! implementation good enough for tests, benches and the CLI.

use crate::error::ViralError;
use std::collections::HashMap;

/// City identifier. Cities are numbered `1..=N`.
pub type CityId = usize;

/// Read-only distance lookup over a set of cities numbered `1..=N`.
///
/// # Implementing
///
/// ```
/// use u_viral::{CityId, DistanceOracle};
///
/// struct Line(usize);
///
/// impl DistanceOracle for Line {
///     fn num_cities(&self) -> usize { self.0 }
///     fn distance(&self, from: CityId, to: CityId) -> Option<f64> {
///         (from < to).then(|| (to - from) as f64)
///     }
/// }
///
/// let line = Line(4);
/// assert_eq!(line.cities(), vec![1, 2, 3, 4]);
/// assert_eq!(line.distance(1, 3), Some(2.0));
/// assert_eq!(line.distance(3, 1), None);
/// ```
pub trait DistanceOracle {
    /// Number of cities `N`.
    fn num_cities(&self) -> usize;

    /// All city ids, in a stable order.
    fn cities(&self) -> Vec<CityId> {
        (1..=self.num_cities()).collect()
    }

    /// Weight of the direct record `from -> to`, if one exists.
    ///
    /// Implementations must not fall back to `to -> from`; callers do that
    /// themselves.
    fn distance(&self, from: CityId, to: CityId) -> Option<f64>;
}

impl<O: DistanceOracle + ?Sized> DistanceOracle for &O {
    fn num_cities(&self) -> usize {
        (**self).num_cities()
    }

    fn cities(&self) -> Vec<CityId> {
        (**self).cities()
    }

    fn distance(&self, from: CityId, to: CityId) -> Option<f64> {
        (**self).distance(from, to)
    }
}

/// Directed edge records keyed by `(from, to)`.
#[derive(Debug, Clone, Default)]
pub struct EdgeListGraph {
    num_cities: usize,
    edges: HashMap<(CityId, CityId), f64>,
}

impl EdgeListGraph {
    /// Creates a graph with `num_cities` cities and no edges.
    pub fn new(num_cities: usize) -> Self {
        Self {
            num_cities,
            edges: HashMap::new(),
        }
    }

    /// Records the directed edge `from -> to`, replacing any previous weight.
    pub fn add_edge(&mut self, from: CityId, to: CityId, distance: f64) {
        self.edges.insert((from, to), distance);
    }

    /// Number of edge records.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Builds a complete Euclidean graph from planar coordinates.
    ///
    /// City `i + 1` sits at `points[i]`. Only the `a < b` direction is
    /// recorded, so half of all lookups go through the reverse fallback.
    pub fn from_coordinates(points: &[(f64, f64)]) -> Self {
        let mut graph = Self::new(points.len());
        for (i, &(xa, ya)) in points.iter().enumerate() {
            for (j, &(xb, yb)) in points.iter().enumerate().skip(i + 1) {
                let d = ((xa - xb).powi(2) + (ya - yb).powi(2)).sqrt();
                graph.add_edge(i + 1, j + 1, d);
            }
        }
        graph
    }

    /// Parses a DIMACS-style edge list.
    ///
    /// ```text
    /// c comment
    /// p tsp 3 2
    /// e 1 2 10.5
    /// e 2 3 4
    /// ```
    ///
    /// The `p` line declares the city count (the edge count is advisory) and
    /// must precede every `e` line.
    pub fn parse(input: &str) -> Result<Self, ViralError> {
        let mut graph: Option<Self> = None;

        for (idx, raw) in input.lines().enumerate() {
            let line = idx + 1;
            let mut fields = raw.split_whitespace();
            let Some(tag) = fields.next() else {
                continue;
            };
            let parse_err = |message: String| ViralError::Parse { line, message };

            match tag {
                "c" => {}
                "p" => {
                    if graph.is_some() {
                        return Err(parse_err("duplicate problem line".into()));
                    }
                    let _kind = fields
                        .next()
                        .ok_or_else(|| parse_err("problem line is missing its kind".into()))?;
                    let n = parse_field::<usize>(fields.next(), "city count", line)?;
                    if n == 0 {
                        return Err(parse_err("city count must be positive".into()));
                    }
                    graph = Some(Self::new(n));
                }
                "e" => {
                    let g = graph
                        .as_mut()
                        .ok_or_else(|| parse_err("edge before problem line".into()))?;
                    let from = parse_field::<CityId>(fields.next(), "edge source", line)?;
                    let to = parse_field::<CityId>(fields.next(), "edge target", line)?;
                    let distance = parse_field::<f64>(fields.next(), "edge distance", line)?;
                    for id in [from, to] {
                        if id == 0 || id > g.num_cities {
                            return Err(parse_err(format!(
                                "city {id} outside 1..={}",
                                g.num_cities
                            )));
                        }
                    }
                    g.add_edge(from, to, distance);
                }
                other => return Err(parse_err(format!("unknown line tag `{other}`"))),
            }
        }

        graph.ok_or(ViralError::Parse {
            line: 0,
            message: "missing problem line".into(),
        })
    }
}

fn parse_field<T: std::str::FromStr>(
    field: Option<&str>,
    what: &str,
    line: usize,
) -> Result<T, ViralError> {
    let raw = field.ok_or_else(|| ViralError::Parse {
        line,
        message: format!("missing {what}"),
    })?;
    raw.parse().map_err(|_| ViralError::Parse {
        line,
        message: format!("invalid {what} `{raw}`"),
    })
}

impl DistanceOracle for EdgeListGraph {
    fn num_cities(&self) -> usize {
        self.num_cities
    }

    fn distance(&self, from: CityId, to: CityId) -> Option<f64> {
        self.edges.get(&(from, to)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_lookup_only() {
        let mut g = EdgeListGraph::new(3);
        g.add_edge(3, 1, 2.5);
        assert_eq!(g.distance(3, 1), Some(2.5));
        assert_eq!(g.distance(1, 3), None);
    }

    #[test]
    fn test_cities_default_enumeration() {
        let g = EdgeListGraph::new(5);
        assert_eq!(g.cities(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_from_coordinates_upper_triangle() {
        let g = EdgeListGraph::from_coordinates(&[(0.0, 0.0), (3.0, 4.0), (0.0, 1.0)]);
        assert_eq!(g.num_cities(), 3);
        assert_eq!(g.num_edges(), 3);
        assert!((g.distance(1, 2).unwrap() - 5.0).abs() < 1e-12);
        assert_eq!(g.distance(2, 1), None);
    }

    #[test]
    fn test_parse_edge_list() {
        let text = "c four-cycle\n\np tsp 4 4\ne 1 2 1.0\ne 2 3 1\ne 3 4 1.0\ne 4 1 1.0\n";
        let g = EdgeListGraph::parse(text).unwrap();
        assert_eq!(g.num_cities(), 4);
        assert_eq!(g.num_edges(), 4);
        assert_eq!(g.distance(4, 1), Some(1.0));
    }

    #[test]
    fn test_parse_edge_before_problem_line() {
        let err = EdgeListGraph::parse("e 1 2 3.0\n").unwrap_err();
        assert!(matches!(err, ViralError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_city_out_of_range() {
        let err = EdgeListGraph::parse("p tsp 2 1\ne 1 3 1.0\n").unwrap_err();
        assert!(matches!(err, ViralError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_bad_distance() {
        let err = EdgeListGraph::parse("p tsp 2 1\ne 1 2 far\n").unwrap_err();
        match err {
            ViralError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("far"), "{message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_problem_line() {
        let err = EdgeListGraph::parse("c nothing here\n").unwrap_err();
        assert!(matches!(err, ViralError::Parse { line: 0, .. }));
    }
}
