// NNF to CNF through a parallel-serial graph.
//
// The whole formula starts as the label of one edge from a source to a sink.  An
// edge labelled with a conjunction is split into parallel edges, one per conjunct;
// an edge labelled with a disjunction of k members becomes a chain of k edges
// through k - 1 fresh internal nodes.  Once every label is a literal, each edge
// v -> w labelled l yields the clause (¬v ∨ l ∨ w), where v and w name internal
// nodes (the source and sink contribute no literal).  The internal nodes become
// existentially quantified variables, so the result is equisatisfiable with the
// input rather than equivalent to it.

use log::debug;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use regex::Regex;

use crate::error::{ConversionError, ConversionResult, FormulaResult};
use crate::formula::{Clause, Cnf, Connective, Literal};
use crate::nnf::{Nnf, NnfItem};
use crate::qcnf::{Qcnf, QuantifiedVariable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Source,
    Sink,
    Internal(usize),
}

#[derive(Debug, Clone)]
struct PsEdge {
    // Creation order; petgraph reuses the indices of removed edges.
    serial: usize,
    label: NnfItem,
}

#[derive(Debug)]
pub struct PsGraph {
    graph: StableGraph<Node, PsEdge>,
    prefix: String,
    internal_nodes: usize,
    next_serial: usize,
}

impl PsGraph {
    pub const DEFAULT_PREFIX: &'static str = "internal";

    fn new(nnf: &Nnf, prefix: &str) -> PsGraph {
        let mut graph = StableGraph::new();
        let source = graph.add_node(Node::Source);
        let sink = graph.add_node(Node::Sink);
        let mut ps_graph = PsGraph {
            graph,
            prefix: prefix.to_string(),
            internal_nodes: 0,
            next_serial: 0,
        };
        ps_graph.add_edge(source, sink, NnfItem::Nnf(nnf.clone()));
        ps_graph
    }

    fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, label: NnfItem) {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.graph.add_edge(from, to, PsEdge { serial, label });
    }

    fn add_internal_node(&mut self) -> NodeIndex {
        self.internal_nodes += 1;
        self.graph.add_node(Node::Internal(self.internal_nodes))
    }

    fn internal_variable(&self, index: usize) -> String {
        format!("{}{}", self.prefix, index)
    }

    fn compound_edges(&self) -> Vec<EdgeIndex> {
        let mut edges: Vec<EdgeIndex> = self
            .graph
            .edge_indices()
            .filter(|edge| matches!(self.graph[*edge].label, NnfItem::Nnf(_)))
            .collect();
        edges.sort_by_key(|edge| self.graph[*edge].serial);
        edges
    }

    /// Rewrite until every edge is labelled with a literal.
    fn grow(&mut self) {
        let mut pass = 0;
        loop {
            let compound = self.compound_edges();
            if compound.is_empty() {
                break;
            }
            pass += 1;
            debug!("ps graph: pass {} rewrites {} edges", pass, compound.len());
            for edge in compound {
                self.rewrite(edge);
            }
        }
        debug!("ps graph: created {} internal nodes", self.internal_nodes);
    }

    fn rewrite(&mut self, edge: EdgeIndex) {
        let Some((from, to)) = self.graph.edge_endpoints(edge) else {
            return;
        };
        let (connective, group) = match &self.graph[edge].label {
            NnfItem::Nnf(nnf) => (nnf.connective(), nnf.group().to_vec()),
            NnfItem::Literal(_) => return,
        };
        self.graph.remove_edge(edge);
        match (connective, group.len()) {
            (Some(Connective::Or), k) if k > 1 => {
                let mut entry = from;
                for (index, item) in group.into_iter().enumerate() {
                    let exit = if index == k - 1 {
                        to
                    } else {
                        self.add_internal_node()
                    };
                    self.add_edge(entry, exit, item);
                    entry = exit;
                }
            }
            // Conjunctions, and groups of one member whatever their connective.
            _ => {
                for item in group {
                    self.add_edge(from, to, item);
                }
            }
        }
    }

    fn node_literal(&self, node: NodeIndex, negated: bool) -> Option<Literal> {
        match self.graph[node] {
            Node::Internal(index) => {
                Some(Literal::from_parts(self.internal_variable(index), negated))
            }
            Node::Source | Node::Sink => None,
        }
    }

    fn to_qcnf(&self) -> FormulaResult<Qcnf> {
        let mut edges: Vec<EdgeIndex> = self.graph.edge_indices().collect();
        edges.sort_by_key(|edge| self.graph[*edge].serial);

        let mut clauses = Vec::with_capacity(edges.len());
        for edge in edges {
            let NnfItem::Literal(label) = &self.graph[edge].label else {
                continue;
            };
            let Some((from, to)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            let literals = self
                .node_literal(from, true)
                .into_iter()
                .chain(Some(label.clone()))
                .chain(self.node_literal(to, false))
                .collect();
            clauses.push(Clause::new(literals));
        }

        let quantified_variables = (1..=self.internal_nodes)
            .map(|index| QuantifiedVariable::existential(&self.internal_variable(index)))
            .collect::<FormulaResult<Vec<_>>>()?;
        Ok(Qcnf::new(Cnf::new(clauses)?, quantified_variables))
    }
}

fn check_prefix(nnf: &Nnf, prefix: &str) -> ConversionResult<()> {
    let pattern = Regex::new(&format!(r"^{}\d*$", regex::escape(prefix)))?;
    match nnf.variable_set().into_iter().find(|variable| pattern.is_match(variable)) {
        Some(variable) => Err(ConversionError::PrefixCollision {
            prefix: prefix.to_string(),
            variable,
        }),
        None => Ok(()),
    }
}

/// An equisatisfiable QCNF for `nnf`, naming internal variables `prefix1`, `prefix2`, ...
///
/// Fails if some variable of `nnf` could be mistaken for an internal variable.
pub fn convert_nnf_to_cnf(nnf: &Nnf, prefix: &str) -> ConversionResult<Qcnf> {
    check_prefix(nnf, prefix)?;
    if let Some(lit) = nnf.as_literal() {
        return Ok(Qcnf::from(Cnf::new(vec![Clause::new(vec![lit.clone()])])?));
    }
    let mut graph = PsGraph::new(nnf, prefix);
    graph.grow();
    Ok(graph.to_qcnf()?)
}

pub fn convert_nnf_to_cnf_default(nnf: &Nnf) -> ConversionResult<Qcnf> {
    convert_nnf_to_cnf(nnf, PsGraph::DEFAULT_PREFIX)
}
