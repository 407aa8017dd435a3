// 2-SAT through the implication graph and its strongly connected components.
//
// A formula of clauses with at most two literals is unsatisfiable iff some literal
// and its negation imply each other, ie. they share a strongly connected component.
//
// Clauses with more than two literals are replaced by all of their two-literal
// sub-clauses.  Each pair implies the original clause but not the other way round,
// so for such inputs a SAT verdict is exact while an UNSAT verdict may be spurious.

use std::collections::HashMap;

use log::{debug, trace};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::checker::SatChecker;
use crate::error::{CheckResult, FormulaResult};
use crate::formula::{Clause, Cnf, Literal};
use crate::implication::Implication;
use crate::utils::all_pairs;

#[derive(Debug, Clone, Copy, Default)]
pub struct TwoSat;

/// One node per literal, one edge per implication.
#[derive(Debug, Default)]
pub struct ImplicationGraph {
    graph: DiGraph<Literal, ()>,
    indices: HashMap<Literal, NodeIndex>,
}

impl ImplicationGraph {
    pub fn new() -> ImplicationGraph {
        ImplicationGraph::default()
    }

    fn node(&mut self, literal: &Literal) -> NodeIndex {
        if let Some(index) = self.indices.get(literal) {
            return *index;
        }
        let index = self.graph.add_node(literal.clone());
        self.indices.insert(literal.clone(), index);
        index
    }

    pub fn add_implication(&mut self, implication: &Implication) {
        let premise = self.node(implication.premise());
        let consequence = self.node(implication.consequence());
        self.graph.update_edge(premise, consequence, ());
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The strongly connected components holding a literal together with its negation.
    pub fn contradictory_components(&self) -> Vec<Vec<Literal>> {
        tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                scc.into_iter()
                    .map(|index| self.graph[index].clone())
                    .collect::<Vec<_>>()
            })
            .filter(|component| {
                component
                    .iter()
                    .any(|lit| component.contains(&lit.negated()))
            })
            .collect()
    }
}

impl TwoSat {
    /// Every clause with more than two literals becomes all of its pairs.
    pub fn to_two_clauses(cnf: &Cnf) -> Vec<Clause> {
        cnf.clauses()
            .iter()
            .flat_map(|clause| {
                if clause.len() <= 2 {
                    vec![clause.clone()]
                } else {
                    all_pairs(clause.literals())
                        .into_iter()
                        .map(|(left, right)| Clause::new(vec![left, right]))
                        .collect()
                }
            })
            .collect()
    }

    /// The implication graph of `cnf`: each two-clause and its contrapositive.
    pub fn implication_graph(cnf: &Cnf) -> FormulaResult<ImplicationGraph> {
        let mut graph = ImplicationGraph::new();
        for clause in TwoSat::to_two_clauses(cnf) {
            let implication = clause.to_implication()?;
            graph.add_implication(&implication);
            graph.add_implication(&implication.reverse());
        }
        Ok(graph)
    }
}

impl SatChecker for TwoSat {
    fn name(&self) -> &'static str {
        "2-SAT"
    }

    fn is_sat(&self, cnf: &Cnf) -> CheckResult<bool> {
        let graph = TwoSat::implication_graph(cnf)?;
        debug!(
            "2-SAT: implication graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        let contradictions = graph.contradictory_components();
        for component in &contradictions {
            trace!(
                "2-SAT: contradictory component {}",
                component
                    .iter()
                    .map(|lit| lit.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        let sat = contradictions.is_empty();
        debug!("2-SAT: satisfiable = {sat}");
        Ok(sat)
    }
}
