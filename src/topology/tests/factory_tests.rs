//! A client-defined element pair plugged in through `GraphFactory`.

use crate::graph_error::GraphError;
use crate::topology::arc::ArcLike;
use crate::topology::attributes::{AttrValue, Attributed, Attributes};
use crate::topology::factory::GraphFactory;
use crate::topology::graph::Graph;
use crate::topology::ids::NodeId;
use crate::topology::load::Record;
use crate::topology::node::NodeLike;

#[derive(Clone, Debug)]
struct City {
    name: String,
    population: u64,
    attrs: Attributes,
}

impl NodeLike for City {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Attributed for City {
    fn attributes(&self) -> &Attributes {
        &self.attrs
    }
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }
}

#[derive(Clone, Debug)]
struct Road {
    from: NodeId,
    to: NodeId,
    lanes: u8,
    attrs: Attributes,
}

impl ArcLike for Road {
    fn start(&self) -> NodeId {
        self.from
    }
    fn finish(&self) -> NodeId {
        self.to
    }
}

impl Attributed for Road {
    fn attributes(&self) -> &Attributes {
        &self.attrs
    }
    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }
}

#[derive(Clone, Default)]
struct RoadMap {
    default_lanes: u8,
}

impl GraphFactory for RoadMap {
    type Node = City;
    type Arc = Road;

    fn create_node(&self, name: &str) -> City {
        City {
            name: name.to_owned(),
            population: 0,
            attrs: Attributes::new(),
        }
    }

    fn create_arc(&self, start: NodeId, finish: NodeId) -> Road {
        Road {
            from: start,
            to: finish,
            lanes: self.default_lanes,
            attrs: Attributes::new(),
        }
    }
}

/// Builds nodes under the wrong name.
struct Broken;

impl GraphFactory for Broken {
    type Node = City;
    type Arc = Road;

    fn create_node(&self, name: &str) -> City {
        RoadMap::default().create_node(&format!("{name}!"))
    }

    fn create_arc(&self, start: NodeId, finish: NodeId) -> Road {
        RoadMap::default().create_arc(start, finish)
    }
}

/// Builds every arc backwards.
struct Reversed;

impl GraphFactory for Reversed {
    type Node = City;
    type Arc = Road;

    fn create_node(&self, name: &str) -> City {
        RoadMap::default().create_node(name)
    }

    fn create_arc(&self, start: NodeId, finish: NodeId) -> Road {
        RoadMap::default().create_arc(finish, start)
    }
}

#[test]
fn custom_factory_builds_every_element() {
    let mut g = Graph::with_factory(RoadMap { default_lanes: 2 });
    g.load([Record::edge("Oslo", "Bergen"), Record::arc("Bergen", "Voss")].map(Ok))
        .unwrap();
    assert_eq!(g.to_string(), "<Bergen -> Oslo, Bergen -> Voss, Oslo -> Bergen>");
    assert!(g.arcs().iter().all(|&a| g.arc(a).unwrap().lanes == 2));

    let oslo = g.node_id("Oslo").unwrap();
    g.node_mut(oslo).unwrap().population = 700_000;
    g.node_mut(oslo).unwrap().set_attr("capital", true);
    let city = g.node(oslo).unwrap();
    assert_eq!(city.population, 700_000);
    assert_eq!(city.attr("capital"), Some(&AttrValue::Bool(true)));
}

#[test]
fn factory_name_mismatch_is_rejected() {
    let mut g = Graph::with_factory(Broken);
    assert!(matches!(g.add_node("A"), Err(GraphError::InvalidArgument(_))));
    assert!(g.is_empty());
}

#[test]
fn rejected_arc_leaves_no_new_nodes() {
    let mut g = Graph::with_factory(Reversed);
    assert!(matches!(g.add_arc("A", "B"), Err(GraphError::InvalidArgument(_))));
    assert!(g.is_empty());
    assert_eq!(g.node_id("A"), None);

    // a self-loop survives the reversal; existing endpoints stay as they were
    let a = g.add_arc("A", "A").unwrap();
    assert_eq!(g.arc(a).unwrap().endpoints(), (g.node_id("A").unwrap(), g.node_id("A").unwrap()));
    assert!(g.add_arc("A", "C").is_err());
    assert_eq!(g.node_count(), 1);
    assert_eq!(g.arc_count(), 1);
}

#[test]
fn add_arc_with_mismatched_node_names_creates_nothing() {
    let mut g = Graph::with_factory(Broken);
    assert!(matches!(g.add_arc("A", "B"), Err(GraphError::InvalidArgument(_))));
    assert!(g.is_empty());
}

#[test]
fn new_endpoints_get_consecutive_ids() {
    let mut g = Graph::with_factory(RoadMap::default());
    g.add_node("X").unwrap();
    let arc = g.add_arc("Y", "Z").unwrap();
    let (y, z) = g.arc(arc).unwrap().endpoints();
    assert_eq!(g.node_id("Y"), Some(y));
    assert_eq!(g.node_id("Z"), Some(z));
    assert_eq!(g.node(y).unwrap().name(), "Y");
    assert_eq!(g.node(z).unwrap().name(), "Z");
}
