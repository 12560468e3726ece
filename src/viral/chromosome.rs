//! Candidate tours.

use crate::error::ViralError;
use crate::oracle::{CityId, DistanceOracle};

/// Lifespan a chromosome starts with.
pub const INITIAL_LIFESPAN: i32 = 3;

/// One candidate tour with its cached fitness.
///
/// The route is an ordered sequence of city ids. It is *intended* to be a
/// permutation of `1..=N`, but the tail-swap crossover can produce routes
/// with repeated cities, so nothing here enforces it.
///
/// Fitness is only ever written through [`set_route`](Self::set_route), which
/// keeps it consistent with the route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    route: Vec<CityId>,
    fitness: f64,
    rank: Option<f64>,
    lifespan: i32,
}

impl Chromosome {
    /// Wraps a route and computes its fitness.
    pub fn new<O: DistanceOracle + ?Sized>(
        route: Vec<CityId>,
        oracle: &O,
    ) -> Result<Self, ViralError> {
        let fitness = route_length(&route, oracle)?;
        Ok(Self {
            route,
            fitness,
            rank: None,
            lifespan: INITIAL_LIFESPAN,
        })
    }

    /// Replaces the route and recomputes fitness.
    ///
    /// On error the chromosome is left untouched.
    pub fn set_route<O: DistanceOracle + ?Sized>(
        &mut self,
        route: Vec<CityId>,
        oracle: &O,
    ) -> Result<(), ViralError> {
        self.fitness = route_length(&route, oracle)?;
        self.route = route;
        Ok(())
    }

    pub fn route(&self) -> &[CityId] {
        &self.route
    }

    /// Total travel distance of the route. Lower is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Selection weight, `None` until the chromosome was ranked as a parent.
    pub fn rank(&self) -> Option<f64> {
        self.rank
    }

    pub fn set_rank(&mut self, rank: f64) {
        self.rank = Some(rank);
    }

    pub fn lifespan(&self) -> i32 {
        self.lifespan
    }

    pub fn set_lifespan(&mut self, lifespan: i32) {
        self.lifespan = lifespan;
    }

    /// Subtracts one generation of life. Goes negative freely.
    pub fn decay_lifespan(&mut self) {
        self.lifespan -= 1;
    }

    /// Whether the route starts at city 1 and ends at city `n`.
    pub fn is_legal(&self, n: usize) -> bool {
        self.route.first() == Some(&1) && self.route.last() == Some(&n)
    }

    /// Whether the route visits every city of `1..=n` exactly once.
    pub fn is_permutation(&self, n: usize) -> bool {
        if self.route.len() != n {
            return false;
        }
        let mut seen = vec![false; n + 1];
        for &city in &self.route {
            if city == 0 || city > n || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }

    /// Moves city 1 to the front and city `n` to the back.
    ///
    /// Each is swapped with whatever currently occupies the target slot.
    /// Works on an owned copy of the route and recomputes fitness.
    pub fn fix_endpoints<O: DistanceOracle + ?Sized>(
        &mut self,
        n: usize,
        oracle: &O,
    ) -> Result<(), ViralError> {
        if self.route.is_empty() {
            return Ok(());
        }
        let mut route = self.route.clone();
        let last = route.len() - 1;
        if let Some(pos) = route.iter().position(|&c| c == 1) {
            route.swap(pos, 0);
        }
        if let Some(pos) = route.iter().rposition(|&c| c == n) {
            route.swap(pos, last);
        }
        if route != self.route {
            self.set_route(route, oracle)?;
        }
        Ok(())
    }
}

/// Sum of consecutive leg distances, with no closing leg back to the start.
///
/// Each leg `a -> b` resolves as: the direct record if present; zero when
/// `a == b`; otherwise the reverse record `b -> a`. A leg with neither record
/// is an [`ViralError::UnresolvedEdge`].
pub fn route_length<O: DistanceOracle + ?Sized>(
    route: &[CityId],
    oracle: &O,
) -> Result<f64, ViralError> {
    route
        .windows(2)
        .map(|leg| leg_distance(leg[0], leg[1], oracle))
        .sum()
}

fn leg_distance<O: DistanceOracle + ?Sized>(
    from: CityId,
    to: CityId,
    oracle: &O,
) -> Result<f64, ViralError> {
    if let Some(d) = oracle.distance(from, to) {
        return Ok(d);
    }
    if from == to {
        return Ok(0.0);
    }
    oracle
        .distance(to, from)
        .ok_or(ViralError::UnresolvedEdge { from, to })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::EdgeListGraph;

    fn four_cycle() -> EdgeListGraph {
        let mut g = EdgeListGraph::new(4);
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g.add_edge(3, 4, 1.0);
        g.add_edge(4, 1, 1.0);
        g
    }

    #[test]
    fn test_four_cycle_has_no_wraparound() {
        let g = four_cycle();
        let c = Chromosome::new(vec![1, 2, 3, 4], &g).unwrap();
        assert!((c.fitness() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_city_route_is_free() {
        let g = EdgeListGraph::new(1);
        let c = Chromosome::new(vec![1], &g).unwrap();
        assert_eq!(c.fitness(), 0.0);
    }

    #[test]
    fn test_two_city_route_either_direction() {
        let mut forward = EdgeListGraph::new(2);
        forward.add_edge(1, 2, 7.5);
        let mut backward = EdgeListGraph::new(2);
        backward.add_edge(2, 1, 7.5);

        for g in [&forward, &backward] {
            let c = Chromosome::new(vec![1, 2], g).unwrap();
            assert!((c.fitness() - 7.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reverse_fallback() {
        let mut g = EdgeListGraph::new(4);
        g.add_edge(3, 1, 2.0);
        g.add_edge(3, 2, 1.0);
        g.add_edge(2, 4, 4.0);

        let c = Chromosome::new(vec![1, 3, 2, 4], &g).unwrap();
        assert!((c.fitness() - 7.0).abs() < 1e-12);
        assert_eq!(
            route_length(&[1, 3], &g).unwrap(),
            route_length(&[3, 1], &g).unwrap()
        );
    }

    #[test]
    fn test_repeated_city_costs_nothing() {
        let g = four_cycle();
        let c = Chromosome::new(vec![1, 2, 2, 3], &g).unwrap();
        assert!((c.fitness() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_unresolved_edge() {
        let g = four_cycle();
        let err = Chromosome::new(vec![1, 3], &g).unwrap_err();
        assert_eq!(err, ViralError::UnresolvedEdge { from: 1, to: 3 });
    }

    #[test]
    fn test_set_route_failure_keeps_state() {
        let g = four_cycle();
        let mut c = Chromosome::new(vec![1, 2, 3, 4], &g).unwrap();
        assert!(c.set_route(vec![1, 3, 2, 4], &g).is_err());
        assert_eq!(c.route(), &[1, 2, 3, 4]);
        assert!((c.fitness() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_lifespan_decay() {
        let g = four_cycle();
        let mut c = Chromosome::new(vec![1, 2, 3, 4], &g).unwrap();
        assert_eq!(c.lifespan(), INITIAL_LIFESPAN);
        for expected in [2, 1, 0, -1, -2] {
            c.decay_lifespan();
            assert_eq!(c.lifespan(), expected);
        }
        c.set_lifespan(3);
        assert_eq!(c.lifespan(), 3);
    }

    #[test]
    fn test_rank_unset_until_assigned() {
        let g = four_cycle();
        let mut c = Chromosome::new(vec![1, 2, 3, 4], &g).unwrap();
        assert_eq!(c.rank(), None);
        c.set_rank(99.5);
        assert_eq!(c.rank(), Some(99.5));
    }

    #[test]
    fn test_fix_endpoints() {
        let g = EdgeListGraph::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let mut c = Chromosome::new(vec![4, 2, 1, 3], &g).unwrap();
        c.fix_endpoints(4, &g).unwrap();
        assert_eq!(c.route(), &[1, 2, 3, 4]);
        assert!(c.is_legal(4));
        assert!((c.fitness() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_fix_endpoints_missing_city_one() {
        let g = EdgeListGraph::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let mut c = Chromosome::new(vec![4, 2, 2, 3], &g).unwrap();
        c.fix_endpoints(4, &g).unwrap();
        assert_eq!(c.route(), &[3, 2, 2, 4]);
        assert!(!c.is_legal(4));
    }

    #[test]
    fn test_is_permutation() {
        let g = EdgeListGraph::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!(Chromosome::new(vec![2, 3, 1], &g).unwrap().is_permutation(3));
        assert!(!Chromosome::new(vec![2, 2, 1], &g).unwrap().is_permutation(3));
        assert!(!Chromosome::new(vec![2, 1], &g).unwrap().is_permutation(3));
    }
}
