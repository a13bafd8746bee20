//! Common test utilities for building solid-handle graphs.
use handle_graph::prelude::*;

/// Creates a simple (non-composite) handle; the node name is the last handle segment.
#[allow(dead_code)]
pub fn simple(handle_id: &str, definition: &str) -> NodeHandle {
    NodeHandle::new(
        handle_id,
        Node {
            name: last_segment(handle_id),
            definition: Definition::Simple {
                name: definition.to_string(),
            },
            inputs: vec![],
            outputs: vec![],
        },
    )
}

/// Creates a composite handle.
///
/// Mappings are `(external port, interior solid, interior port)` triples.
#[allow(dead_code)]
pub fn composite(
    handle_id: &str,
    definition: &str,
    input_mappings: &[(&str, &str, &str)],
    output_mappings: &[(&str, &str, &str)],
) -> NodeHandle {
    NodeHandle::new(
        handle_id,
        Node {
            name: last_segment(handle_id),
            definition: Definition::Composite(CompositeDefinition {
                name: definition.to_string(),
                input_mappings: input_mappings
                    .iter()
                    .map(|(external, node, port)| InputMapping {
                        definition_name: external.to_string(),
                        mapped_node: node.to_string(),
                        mapped_input: port.to_string(),
                    })
                    .collect(),
                output_mappings: output_mappings
                    .iter()
                    .map(|(external, node, port)| OutputMapping {
                        definition_name: external.to_string(),
                        mapped_node: node.to_string(),
                        mapped_output: port.to_string(),
                    })
                    .collect(),
            }),
            inputs: vec![],
            outputs: vec![],
        },
    )
}

/// Fluent helpers for attaching ports and their edges to a fixture handle.
#[allow(dead_code)]
pub trait HandleFixture {
    fn with_input(self, port: &str, depends_on: &[(&str, &str)]) -> Self;
    fn with_output(self, port: &str, depended_by: &[(&str, &str)]) -> Self;
}

impl HandleFixture for NodeHandle {
    fn with_input(mut self, port: &str, depends_on: &[(&str, &str)]) -> Self {
        self.node.inputs.push(Input {
            definition_name: port.to_string(),
            depends_on: refs(depends_on),
        });
        self
    }

    fn with_output(mut self, port: &str, depended_by: &[(&str, &str)]) -> Self {
        self.node.outputs.push(Output {
            definition_name: port.to_string(),
            depended_by: refs(depended_by),
        });
        self
    }
}

#[allow(dead_code)]
pub fn refs(pairs: &[(&str, &str)]) -> Vec<PortRef> {
    pairs
        .iter()
        .map(|(solid, port)| PortRef::new(*solid, *port))
        .collect()
}

#[allow(dead_code)]
fn last_segment(handle_id: &str) -> String {
    handle_id.rsplit('.').next().unwrap_or(handle_id).to_string()
}

/// Composite `A` wrapping `A.x -> A.y`, with sibling `B` feeding `A` and fed by it.
///
/// `A`'s input `a_in` is mapped to `A.x.x_in`, its output `a_out` to `A.y.y_out`.
#[allow(dead_code)]
pub fn create_wrapped_pair() -> Vec<NodeHandle> {
    vec![
        composite(
            "A",
            "wrapper",
            &[("a_in", "x", "x_in")],
            &[("a_out", "y", "y_out")],
        )
        .with_input("a_in", &[("B", "b_out")])
        .with_output("a_out", &[("B", "b_in")]),
        simple("A.x", "first")
            .with_input("x_in", &[])
            .with_output("x_out", &[("y", "y_in")]),
        simple("A.y", "second")
            .with_input("y_in", &[("x", "x_out")])
            .with_output("y_out", &[]),
        simple("B", "outside")
            .with_input("b_in", &[("A", "a_out")])
            .with_output("b_out", &[("A", "a_in")]),
    ]
}

/// `source -> A(in) -> [A.b(in) -> [A.b.c]] -> A(out) -> sink`, two levels deep.
#[allow(dead_code)]
pub fn create_doubly_nested() -> Vec<NodeHandle> {
    vec![
        simple("source", "emit").with_output("result", &[("A", "in")]),
        composite("A", "outer", &[("in", "b", "in")], &[("out", "b", "out")])
            .with_input("in", &[("source", "result")])
            .with_output("out", &[("sink", "value")]),
        composite("A.b", "inner", &[("in", "c", "value")], &[("out", "c", "result")])
            .with_input("in", &[])
            .with_output("out", &[]),
        simple("A.b.c", "add_one")
            .with_input("value", &[])
            .with_output("result", &[]),
        simple("sink", "collect").with_input("value", &[("A", "out")]),
    ]
}

/// Builds a chain of `width` solids per scope, where every other solid is a
/// composite wrapping another chain, down to `max_depth`.
///
/// Every solid has an `in` input and an `out` output; composites map them to
/// the first and last solid of their interior chain.
#[allow(dead_code)]
pub fn create_nested_chain(max_depth: usize, width: usize) -> Vec<NodeHandle> {
    let mut handles = Vec::new();
    push_chain_scope(&mut handles, None, 0, max_depth, width);
    handles
}

#[allow(dead_code)]
fn push_chain_scope(
    handles: &mut Vec<NodeHandle>,
    parent: Option<&str>,
    depth: usize,
    max_depth: usize,
    width: usize,
) {
    let names: Vec<String> = (0..width).map(|i| format!("n{}", i)).collect();
    for (i, name) in names.iter().enumerate() {
        let handle_id = match parent {
            Some(parent) => format!("{}.{}", parent, name),
            None => name.clone(),
        };
        let is_composite = depth < max_depth && (i + depth) % 2 == 0;
        let last = format!("n{}", width - 1);
        let handle = if is_composite {
            composite(
                &handle_id,
                "chain",
                &[("in", "n0", "in")],
                &[("out", last.as_str(), "out")],
            )
        } else {
            simple(&handle_id, "step")
        };

        let depends_on: Vec<(&str, &str)> = match i.checked_sub(1) {
            Some(prev) => vec![(names[prev].as_str(), "out")],
            None => vec![],
        };
        let depended_by: Vec<(&str, &str)> = match names.get(i + 1) {
            Some(next) => vec![(next.as_str(), "in")],
            None => vec![],
        };
        handles.push(
            handle
                .with_input("in", &depends_on)
                .with_output("out", &depended_by),
        );

        if is_composite {
            push_chain_scope(handles, Some(&handle_id), depth + 1, max_depth, width);
        }
    }
}

/// Sorts every edge list so graphs can be compared regardless of edge order.
#[allow(dead_code)]
pub fn normalized(handles: &[NodeHandle]) -> Vec<NodeHandle> {
    handles
        .iter()
        .cloned()
        .map(|mut h| {
            h.node.inputs.iter_mut().for_each(|i| i.depends_on.sort());
            h.node.outputs.iter_mut().for_each(|o| o.depended_by.sort());
            h
        })
        .collect()
}

#[allow(dead_code)]
pub fn find<'a>(handles: &'a [NodeHandle], name: &str) -> &'a NodeHandle {
    handles
        .iter()
        .find(|h| h.node.name == name)
        .unwrap_or_else(|| panic!("no handle named '{}'", name))
}

#[allow(dead_code)]
pub fn names(handles: &[NodeHandle]) -> Vec<&str> {
    handles.iter().map(|h| h.node.name.as_str()).collect()
}

/// A solid-handle fragment list in the explorer's GraphQL JSON shape.
#[allow(dead_code)]
pub const WRAPPED_PAIR_JSON: &str = r#"[
  {
    "handleID": "A",
    "solid": {
      "name": "A",
      "definition": {
        "__typename": "CompositeSolidDefinition",
        "name": "wrapper",
        "inputMappings": [
          { "definition": { "name": "a_in" }, "mappedInput": { "definition": { "name": "x_in" }, "solid": { "name": "x" } } }
        ],
        "outputMappings": [
          { "definition": { "name": "a_out" }, "mappedOutput": { "definition": { "name": "y_out" }, "solid": { "name": "y" } } }
        ]
      },
      "inputs": [
        { "definition": { "name": "a_in" }, "dependsOn": [ { "solid": { "name": "B" }, "definition": { "name": "b_out" } } ] }
      ],
      "outputs": [
        { "definition": { "name": "a_out" }, "dependedBy": [ { "solid": { "name": "B" }, "definition": { "name": "b_in" } } ] }
      ]
    }
  },
  {
    "handleID": "A.x",
    "solid": {
      "name": "x",
      "definition": { "__typename": "SolidDefinition", "name": "first" },
      "inputs": [ { "definition": { "name": "x_in" }, "dependsOn": [] } ],
      "outputs": [
        { "definition": { "name": "x_out" }, "dependedBy": [ { "solid": { "name": "y" }, "definition": { "name": "y_in" } } ] }
      ]
    }
  },
  {
    "handleID": "A.y",
    "solid": {
      "name": "y",
      "definition": { "__typename": "SolidDefinition", "name": "second" },
      "inputs": [
        { "definition": { "name": "y_in" }, "dependsOn": [ { "solid": { "name": "x" }, "definition": { "name": "x_out" } } ] }
      ],
      "outputs": [ { "definition": { "name": "y_out" }, "dependedBy": [] } ]
    }
  },
  {
    "handleID": "B",
    "solid": {
      "name": "B",
      "definition": { "__typename": "SolidDefinition", "name": "outside" },
      "inputs": [
        { "definition": { "name": "b_in" }, "dependsOn": [ { "solid": { "name": "A" }, "definition": { "name": "a_out" } } ] }
      ],
      "outputs": [
        { "definition": { "name": "b_out" }, "dependedBy": [ { "solid": { "name": "A" }, "definition": { "name": "a_in" } } ] }
      ]
    }
  }
]"#;
