use std::collections::BTreeMap;

use crate::{AlgorithmResult, Error, NodeId, NodeRecord, Result};

/// Coordinates and visiting costs of every node of one dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Instance {
    nodes: BTreeMap<NodeId, NodeRecord>,
}

impl Instance {
    /// Builds an instance whose node ids are the records' positions.
    pub fn from_records(records: impl IntoIterator<Item = NodeRecord>) -> Self {
        Self {
            nodes: records
                .into_iter()
                .enumerate()
                .map(|(idx, record)| (NodeId(idx), record))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node, failing with [`Error::UnknownNode`] when it is absent.
    pub fn node(&self, node: NodeId) -> Result<&NodeRecord> {
        self.nodes.get(&node).ok_or(Error::UnknownNode {
            node,
            instance_len: self.nodes.len(),
        })
    }
}

/// Instances keyed by dataset tag (`TSPA`, `TSPB`, ...).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceCatalog {
    instances: BTreeMap<String, Instance>,
}

impl InstanceCatalog {
    pub fn insert(&mut self, tag: impl Into<String>, instance: Instance) -> Result<()> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(Error::invalid_input("instance dataset tag must not be empty"));
        }
        if self.instances.contains_key(&tag) {
            return Err(Error::invalid_input(format!(
                "instance dataset tag '{tag}' given more than once"
            )));
        }
        self.instances.insert(tag, instance);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    /// Instance a result belongs to: the one named by its dataset tag, else
    /// the first tag found among the `_` separated parts of its name.
    pub fn lookup(&self, result: &AlgorithmResult) -> Option<(&str, &Instance)> {
        result
            .dataset()
            .into_iter()
            .chain(result.name.split('_'))
            .find_map(|tag| self.instances.get_key_value(tag))
            .map(|(tag, instance)| (tag.as_str(), instance))
    }
}

#[cfg(test)]
mod tests {
    use super::{Instance, InstanceCatalog};
    use crate::{AlgorithmResult, CostBreakdown, Error, NodeId, NodeRecord, Tour};

    fn triangle() -> Instance {
        Instance::from_records([
            NodeRecord::new(0.0, 0.0, 5.0),
            NodeRecord::new(3.0, 4.0, 2.0),
            NodeRecord::new(0.0, 4.0, 1.0),
        ])
    }

    #[test]
    fn from_records_assigns_row_positions_as_ids() {
        let instance = triangle();
        assert_eq!(instance.len(), 3);
        assert_eq!(instance.node(NodeId(1)).expect("node 1").cost, 2.0);
        assert_eq!(instance.node(NodeId(2)).expect("node 2").x, 0.0);
        assert!(instance.node(NodeId(3)).is_err());
    }

    #[test]
    fn node_reports_unknown_ids() {
        let err = triangle().node(NodeId(9)).expect_err("node 9 is absent");
        assert!(matches!(
            err,
            Error::UnknownNode {
                node: NodeId(9),
                instance_len: 3
            }
        ));
        assert!(err.is_malformed_input());
    }

    fn named(name: &str) -> AlgorithmResult {
        AlgorithmResult {
            name: name.to_string(),
            best_cost: 0,
            worst_cost: 0,
            average_cost: 0.0,
            stored: CostBreakdown::default(),
            best_tour: Tour::default(),
        }
    }

    fn catalog() -> InstanceCatalog {
        let mut catalog = InstanceCatalog::default();
        catalog.insert("TSPA", triangle()).expect("insert TSPA");
        catalog
            .insert("TSPB", Instance::from_records([NodeRecord::new(1.0, 1.0, 1.0)]))
            .expect("insert TSPB");
        catalog
    }

    #[test]
    fn catalog_routes_results_by_dataset_tag() {
        let catalog = catalog();
        assert_eq!(catalog.tags().collect::<Vec<_>>(), vec!["TSPA", "TSPB"]);

        let (tag, instance) = catalog.lookup(&named("GreedyCycle_TSPB")).expect("TSPB");
        assert_eq!(tag, "TSPB");
        assert_eq!(instance.len(), 1);
        assert_eq!(
            catalog.lookup(&named("GreedyCycle_TSPA")).map(|(tag, _)| tag),
            Some("TSPA")
        );
    }

    #[test]
    fn catalog_falls_back_to_any_name_part() {
        let catalog = catalog();
        assert_eq!(
            catalog.lookup(&named("TSPB_random_start")).map(|(tag, _)| tag),
            Some("TSPB")
        );
        assert!(catalog.lookup(&named("GreedyCycle_TSPC")).is_none());
        assert!(catalog.lookup(&named("TSPAB")).is_none());
    }

    #[test]
    fn catalog_rejects_duplicate_and_empty_tags() {
        let mut catalog = catalog();
        let err = catalog.insert("TSPA", triangle()).expect_err("duplicate tag");
        assert!(err.to_string().contains("'TSPA' given more than once"));
        assert!(catalog.insert("", triangle()).is_err());
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }
}
