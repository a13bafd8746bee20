//! Tests for the explorer boundary: snapshot resolution, paths and the handle view.
mod common;
use common::*;
use handle_graph::prelude::*;
use serde_json::json;

fn snapshot_response(handles_json: &str) -> String {
    let handles: serde_json::Value = serde_json::from_str(handles_json).expect("Invalid JSON");
    json!({
        "data": {
            "pipelineSnapshotOrError": {
                "__typename": "PipelineSnapshot",
                "name": "etl",
                "solidHandle": null,
                "solidHandles": handles,
            }
        }
    })
    .to_string()
}

#[test]
fn test_resolve_snapshot_decodes_full_response() {
    let outcome = resolve_snapshot(&snapshot_response(WRAPPED_PAIR_JSON))
        .expect("Failed to resolve snapshot");

    match outcome {
        SnapshotOutcome::Snapshot(snapshot) => {
            assert_eq!(snapshot.name, "etl");
            assert!(snapshot.parent_handle.is_none());
            assert_eq!(snapshot.handles, create_wrapped_pair());
        }
        other => panic!("Expected a snapshot, got {:?}", other),
    }
}

#[test]
fn test_resolve_snapshot_accepts_bare_union_with_parent_handle() {
    let body = json!({
        "__typename": "PipelineSnapshot",
        "name": "etl",
        "solidHandle": {
            "handleID": "A",
            "solid": { "name": "A", "definition": { "__typename": "SolidDefinition", "name": "noop" } }
        },
        "solidHandles": []
    })
    .to_string();

    match resolve_snapshot(&body).expect("Failed to resolve snapshot") {
        SnapshotOutcome::Snapshot(snapshot) => {
            assert_eq!(snapshot.parent_handle, Some(simple("A", "noop")));
            assert!(snapshot.handles.is_empty());
        }
        other => panic!("Expected a snapshot, got {:?}", other),
    }
}

#[test]
fn test_error_variants_become_non_ideal_states() {
    let cases = [
        (
            json!({ "__typename": "PipelineSnapshotNotFoundError", "message": "no snapshot abc" }),
            "Pipeline Snapshot Not Found",
            NonIdealIcon::FlowBranch,
            Some("no snapshot abc"),
        ),
        (
            json!({ "__typename": "PipelineNotFoundError", "message": "no pipeline etl" }),
            "Pipeline Not Found",
            NonIdealIcon::FlowBranch,
            Some("no pipeline etl"),
        ),
        (
            json!({ "__typename": "PythonError", "message": "Traceback ..." }),
            "Query Error",
            NonIdealIcon::Error,
            None,
        ),
    ];

    for (body, title, icon, description) in cases {
        let response = json!({ "pipelineSnapshotOrError": body }).to_string();
        let outcome = resolve_snapshot(&response).expect("Failed to resolve snapshot");
        assert_eq!(
            outcome,
            SnapshotOutcome::NonIdeal(NonIdealState {
                title: title.to_string(),
                icon,
                description: description.map(str::to_string),
            })
        );
    }
}

#[test]
fn test_malformed_response_is_a_parse_error() {
    assert!(matches!(
        resolve_snapshot("{ not json"),
        Err(ConversionError::JsonParseError(_))
    ));
    assert!(matches!(
        resolve_snapshot(r#"{ "__typename": "SomethingElse" }"#),
        Err(ConversionError::JsonParseError(_))
    ));
}

#[test]
fn test_explorer_path_parsing() {
    let path: ExplorerPath = "etl@abc123/outer/inner".parse().expect("Invalid path");
    assert_eq!(path.pipeline_name, "etl");
    assert_eq!(path.snapshot_id.as_deref(), Some("abc123"));
    assert_eq!(path.path_solids, vec!["outer", "inner"]);
    assert_eq!(path.selected_name(), Some("inner"));
    assert_eq!(path.parent_names(), ["outer".to_string()]);
    assert_eq!(path.root_handle_id(), "outer");
    assert!(path.is_historical());
    assert_eq!(path.to_string(), "etl@abc123/outer/inner");

    let live: ExplorerPath = "/etl/".parse().expect("Invalid path");
    assert_eq!(live.snapshot_id, None);
    assert!(live.path_solids.is_empty());
    assert_eq!(live.selected_name(), None);
    assert_eq!(live.root_handle_id(), "");
    assert_eq!(live.to_string(), "etl");

    let deep: ExplorerPath = "etl/a/b/c".parse().expect("Invalid path");
    assert_eq!(deep.root_handle_id(), "a.b");
}

#[test]
fn test_explorer_path_errors() {
    assert_eq!("".parse::<ExplorerPath>(), Err(ExplorerPathError::Empty));
    assert_eq!(
        "@abc/x".parse::<ExplorerPath>(),
        Err(ExplorerPathError::MissingPipelineName("@abc/x".to_string()))
    );
    assert_eq!(
        "etl@/x".parse::<ExplorerPath>(),
        Err(ExplorerPathError::EmptySnapshotId("etl@/x".to_string()))
    );
}

#[test]
fn test_query_variables_follow_snapshot_and_explode_options() {
    let live: ExplorerPath = "etl/outer/inner".parse().expect("Invalid path");
    let vars = ExplorerQueryVariables::new(&live, &ExplorerOptions::default());
    assert_eq!(
        serde_json::to_value(&vars).expect("Failed to encode"),
        json!({
            "pipelineName": "etl",
            "snapshotId": null,
            "rootHandleID": "outer",
            "requestScopeHandleID": "outer",
        })
    );

    let historical: ExplorerPath = "etl@abc/outer/inner".parse().expect("Invalid path");
    let vars = ExplorerQueryVariables::new(
        &historical,
        &ExplorerOptions {
            explode_composites: true,
        },
    );
    assert_eq!(vars.pipeline_name, None);
    assert_eq!(vars.snapshot_id.as_deref(), Some("abc"));
    assert_eq!(vars.root_handle_id, "outer");
    assert_eq!(vars.request_scope_handle_id, None);
}

#[test]
fn test_handle_view_lookups() {
    let handles = create_nested_chain(1, 3);
    let exploded = HandleView::new(
        &handles,
        &ExplorerOptions {
            explode_composites: true,
        },
    )
    .expect("Failed to build view");

    // Both composites at the root wrap a `step, step, step` chain.
    assert!(exploded.handles().iter().all(|h| !h.is_composite()));
    assert_eq!(exploded.invocations("step").len(), 7);
    assert!(exploded.invocations("chain").is_empty());
    assert_eq!(
        exploded.selected("n0.n1").map(|h| h.handle_id.as_str()),
        Some("n0.n1")
    );

    let layered = HandleView::new(&handles, &ExplorerOptions::default()).expect("view");
    assert_eq!(layered.handles(), handles.as_slice());
    assert_eq!(layered.invocations("chain"), vec!["n0", "n2"]);
    assert!(layered.selected("n0.n1").is_none());
}

#[test]
fn test_handle_view_for_historical_snapshot() {
    let snapshot = PipelineSnapshot {
        name: "etl".to_string(),
        parent_handle: Some(simple("outer", "wrapper")),
        handles: create_wrapped_pair(),
    };
    let path: ExplorerPath = "etl@abc/outer".parse().expect("Invalid path");

    let view = HandleView::for_snapshot(&snapshot, &path, &ExplorerOptions::default())
        .expect("Failed to build view");
    assert!(view.is_historical());
    assert_eq!(
        view.parent_handle().map(|h| h.handle_id.as_str()),
        Some("outer")
    );
    assert_eq!(view.invocations("outside"), vec!["B"]);
}

#[test]
fn test_explorer_options_deserialize() {
    let options: ExplorerOptions =
        serde_json::from_str(r#"{ "explodeComposites": true }"#).expect("Invalid options");
    assert!(options.explode_composites);

    let options: ExplorerOptions = serde_json::from_str("{}").expect("Invalid options");
    assert!(!options.explode_composites);
}

#[test]
fn test_handle_view_from_exploded_graph() {
    let snapshot = PipelineSnapshot {
        name: "etl".to_string(),
        parent_handle: None,
        handles: create_wrapped_pair(),
    };
    let path: ExplorerPath = "etl@abc".parse().expect("Invalid path");
    let graph = Exploder::default()
        .explode(&snapshot.handles)
        .expect("Failed to explode");

    let expected = HandleView::for_snapshot(
        &snapshot,
        &path,
        &ExplorerOptions {
            explode_composites: true,
        },
    )
    .expect("Failed to build view");
    let view = HandleView::for_exploded_snapshot(&snapshot, &path, graph);

    assert_eq!(view.handles(), expected.handles());
    assert_eq!(names(view.handles()), vec!["A.x", "A.y", "B"]);
    assert!(view.is_historical());
    assert!(view.parent_handle().is_none());
}

#[test]
fn test_non_ideal_state_display() {
    let state = NonIdealState {
        title: "Pipeline Not Found".to_string(),
        icon: NonIdealIcon::FlowBranch,
        description: Some("no pipeline named etl".to_string()),
    };
    assert_eq!(state.to_string(), "Pipeline Not Found: no pipeline named etl");

    let state = NonIdealState {
        title: "Query Error".to_string(),
        icon: NonIdealIcon::Error,
        description: None,
    };
    assert_eq!(state.to_string(), "Query Error");
}
