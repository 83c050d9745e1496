//! Unit tests for the structural rules.

use rstest::rstest;

use super::{TreeValidator, validate};
use crate::{DuplicateKind, RawTree, StrataError, StructureRule};

fn document(config: RawTree) -> RawTree {
    RawTree::new().with_child("config", config)
}

fn container(name: &str, child: RawTree) -> RawTree {
    RawTree::new().with_child(name, child)
}

fn leaf_under(name: &str, value: &str) -> RawTree {
    RawTree::new().with_child(name, RawTree::leaf(value))
}

#[test]
fn accepts_well_formed_tree() {
    let config = RawTree::new()
        .with_child("default", container("lib", leaf_under("attr", "1")))
        .with_child(
            "app",
            leaf_under("attr", "2").with_child(
                "instance",
                RawTree::new()
                    .with_child("i1", leaf_under("attr", "3"))
                    .with_child("i2", RawTree::new()),
            ),
        );
    assert!(validate("s1.xml", &document(config)).is_ok());
}

#[test]
fn reports_mixed_content_with_full_path() {
    let mut env = leaf_under("attr", "value1");
    env.set_value("data");
    let tree = document(container("app", container("env", env).with_child("x", RawTree::new())));
    let validator = TreeValidator::new("Inconsistent", &tree);
    let err = validator
        .check_no_mixed_content()
        .expect_err("mixed content");
    assert_eq!(
        err.to_string(),
        "Invalid config source 'Inconsistent' at 'config.app.env': element contains both value and child attributes"
    );
}

#[test]
fn reports_pruned_root_data() {
    let tree = document(RawTree::leaf("12345678901"));
    let err = validate("s1.xml", &tree).expect_err("root data");
    assert!(matches!(
        err.as_ref(),
        StrataError::Structure {
            rule: StructureRule::RootData { data },
            ..
        } if data == "1234567..."
    ));
}

#[rstest]
#[case(
    RawTree::new().with_child("default", RawTree::leaf("data123")),
    StructureRule::DefaultData { data: "data123".into() }
)]
#[case(
    RawTree::new().with_child("app_name", RawTree::leaf("data")),
    StructureRule::AppData { data: "data".into() }
)]
#[case(
    RawTree::new().with_child(
        "app_name",
        container("instance", RawTree::new().with_child("i1", RawTree::leaf("data")))
    ),
    StructureRule::InstanceData { data: "data".into() }
)]
#[case(
    RawTree::new().with_child("default", container("Instance", RawTree::new())),
    StructureRule::InstanceUnderDefault { node: "Instance".into() }
)]
#[case(
    RawTree::new().with_child("default", leaf_under("attr1", "value1")),
    StructureRule::DirectDefaultProperty { property: "attr1".into() }
)]
fn reports_structure_rules(#[case] config: RawTree, #[case] expected: StructureRule) {
    let err = validate("s1.xml", &document(config)).expect_err("violation");
    match err.as_ref() {
        StrataError::Structure { rule, .. } => assert_eq!(rule, &expected),
        other => panic!("expected a structure error, got {other:?}"),
    }
}

#[test]
fn instance_data_names_shorthand_path() {
    let config = RawTree::new().with_child(
        "app_name",
        container("instance", RawTree::new().with_child("i1", RawTree::leaf("data"))),
    );
    let err = validate("s1.xml", &document(config)).expect_err("instance data");
    assert!(
        err.to_string()
            .starts_with("Invalid config source 's1.xml' at 'config.app_name..i1'")
    );
}

#[rstest]
#[case(
    RawTree::new()
        .with_child("default", container("lib", RawTree::new()))
        .with_child("default", container("env", RawTree::new())),
    DuplicateKind::DefaultNode,
    "Duplicate default node 'default' in config source 's1.xml'"
)]
#[case(
    RawTree::new().with_child(
        "default",
        RawTree::new()
            .with_child("lib", leaf_under("attr", "value"))
            .with_child("lib", leaf_under("attr2", "value2"))
    ),
    DuplicateKind::DefaultChild,
    "Duplicate default child node 'default.lib' in config source 's1.xml'"
)]
#[case(
    RawTree::new()
        .with_child("app_name", leaf_under("attr", "value"))
        .with_child("app_name", container("env", RawTree::new())),
    DuplicateKind::AppNode,
    "Duplicate node 'app_name' in config source 's1.xml'"
)]
#[case(
    RawTree::new().with_child(
        "app_name",
        RawTree::new()
            .with_child("instance", container("i1", RawTree::new()))
            .with_child("instance", container("i2", RawTree::new()))
    ),
    DuplicateKind::InstanceWrapper,
    "Duplicate instance node under 'app_name' in config source 's1.xml'"
)]
#[case(
    RawTree::new().with_child(
        "app_name",
        container(
            "instance",
            RawTree::new()
                .with_child("i1", leaf_under("attr", "value"))
                .with_child("i1", leaf_under("attr2", "value2"))
        )
    ),
    DuplicateKind::Instance,
    "Duplicate node 'app_name..i1' in config source 's1.xml'"
)]
fn reports_duplicates(
    #[case] config: RawTree,
    #[case] expected: DuplicateKind,
    #[case] message: &str,
) {
    let err = validate("s1.xml", &document(config)).expect_err("duplicate");
    assert!(matches!(err.as_ref(), StrataError::Duplicate { kind, .. } if *kind == expected));
    assert_eq!(err.to_string(), message);
}

#[test]
fn data_checks_run_before_mixed_content() {
    let mut app = leaf_under("attr", "1");
    app.set_value("data");
    let err = validate("s1.xml", &document(container("app", RawTree::new()).with_child("other", app)))
        .expect_err("app data");
    assert!(matches!(
        err.as_ref(),
        StrataError::Structure {
            rule: StructureRule::AppData { .. },
            ..
        }
    ));
}

#[test]
fn empty_default_children_are_containers() {
    let config = RawTree::new().with_child("default", container("lib", RawTree::new()));
    assert!(validate("s1.xml", &document(config)).is_ok());
}
