//! Graph modeling and breadth-first scans.
//!
//! Nodes are identified by their index in the construction order; results
//! come back as one value per node at the matching index. A breadth-first
//! scan with a `+1` level function computes distances; other level functions
//! produce heat maps or territory partitions the same way.

use thiserror::Error;

/// The link arrays given to [`Graph::new`] had different lengths.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("number of link sources ({sources}) and destinations ({destinations}) does not match")]
pub struct LinkMismatch {
    pub sources: usize,
    pub destinations: usize,
}

/// A directed or bidirectional graph over caller-owned nodes.
#[derive(Debug)]
pub struct Graph<N> {
    nodes: Vec<N>,
    neighbours: Vec<Vec<usize>>,
}

impl<N> Graph<N> {
    /// Build a graph from nodes and parallel link arrays: link `i` goes from
    /// node index `sources[i]` to node index `destinations[i]`, and in both
    /// directions unless `directed`.
    pub fn new(
        nodes: Vec<N>,
        sources: &[usize],
        destinations: &[usize],
        directed: bool,
    ) -> Result<Self, LinkMismatch> {
        if sources.len() != destinations.len() {
            return Err(LinkMismatch {
                sources: sources.len(),
                destinations: destinations.len(),
            });
        }
        let mut neighbours = vec![Vec::new(); nodes.len()];
        for (&source, &destination) in sources.iter().zip(destinations) {
            neighbours[source].push(destination);
            if !directed {
                neighbours[destination].push(source);
            }
        }
        Ok(Self { nodes, neighbours })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> &N {
        &self.nodes[index]
    }

    /// Breadth-first scan from `sources`.
    ///
    /// Every node starts at `initial_value`; the sources get `first_value`,
    /// their unvisited neighbours `next_value(first_value, 1)`, and so on by
    /// level. Nodes rejected by `can_visit` keep their value and are not
    /// traversed through. Nodes never reached keep `initial_value`, so an
    /// impossible initial value identifies unreachable nodes.
    pub fn breadth_first_search<T>(
        &self,
        initial_value: T,
        first_value: T,
        can_visit: impl Fn(&N) -> bool,
        next_value: impl Fn(&T, usize) -> T,
        sources: &[usize],
    ) -> Vec<T>
    where
        T: Clone,
    {
        let mut results = vec![initial_value; self.nodes.len()];
        let mut scanned = vec![false; self.nodes.len()];
        let mut current: Vec<usize> = sources.to_vec();
        let mut value = first_value;
        let mut iteration = 0;

        while !current.is_empty() {
            let mut next = Vec::new();
            for index in current {
                if scanned[index] {
                    continue;
                }
                scanned[index] = true;
                if !can_visit(&self.nodes[index]) {
                    continue;
                }
                results[index] = value.clone();
                next.extend(self.neighbours[index].iter().copied().filter(|&n| !scanned[n]));
            }
            iteration += 1;
            value = next_value(&value, iteration);
            current = next;
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //  1-2-3
    //  |   |
    //  4---5---6
    //  |
    //  7
    //
    //  8---9---0
    fn plain() -> Graph<usize> {
        Graph::new(
            (0..10).collect(),
            &[0, 1, 1, 2, 3, 4, 4, 5, 8],
            &[9, 2, 4, 3, 5, 5, 7, 6, 9],
            false,
        )
        .unwrap()
    }

    //  0->1<->2<-3
    //  ^         ^
    //  |         |
    //  4<--------5
    fn directed() -> Graph<usize> {
        Graph::new((0..6).collect(), &[0, 1, 2, 3, 4, 5, 5], &[1, 2, 1, 2, 0, 3, 4], true)
            .unwrap()
    }

    #[test]
    fn distances_around_an_obstacle() {
        let distances = plain().breadth_first_search(
            -1.0,
            0.0,
            |&node| node != 3,
            |_, iteration| iteration as f64,
            &[0, 1, 6],
        );
        assert_eq!(distances, vec![0.0, 0.0, 1.0, -1.0, 1.0, 1.0, 0.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn distances_follow_link_direction() {
        let distances = plain().breadth_first_search(
            -1,
            0,
            |&node| node != 3,
            |_, iteration| iteration as i32,
            &[0, 1, 6],
        );
        assert_eq!(distances, vec![0, 0, 1, -1, 1, 1, 0, 2, 2, 1]);

        let distances = directed().breadth_first_search(
            -1,
            0,
            |&node| node != 2,
            |_, iteration| iteration as i32,
            &[4],
        );
        assert_eq!(distances, vec![1, 2, -1, -1, 0, -1]);
    }

    #[test]
    fn mismatched_links_are_rejected() {
        let graph = Graph::new(vec![0, 1], &[0], &[], false);
        assert_eq!(graph.unwrap_err(), LinkMismatch { sources: 1, destinations: 0 });
    }
}
