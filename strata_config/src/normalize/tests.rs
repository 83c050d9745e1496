//! Unit tests for the individual normalisation steps.

use rstest::rstest;

use super::{FileNameStyle, TreeNormalizer, normalize};
use crate::keywords::ATTRIBUTES_MARKER;
use crate::{DuplicateKind, ErrorKind, OutputStyle, RawTree, ShorthandProblem, StrataError};

fn element(attributes: &[(&str, &str)]) -> RawTree {
    let marker = attributes
        .iter()
        .fold(RawTree::new(), |marker, (name, value)| {
            marker.with_child(*name, RawTree::leaf(*value))
        });
    RawTree::new().with_child(ATTRIBUTES_MARKER, marker)
}

fn one_line(tree: &RawTree) -> String {
    tree.render(OutputStyle::OneLine)
}

fn normalizer() -> TreeNormalizer<'static> {
    TreeNormalizer::new("s1.xml", FileNameStyle::CaseSensitive)
}

#[test]
fn rejects_empty_tree() {
    let err = normalize(RawTree::new(), "unknown", FileNameStyle::CaseSensitive)
        .expect_err("empty tree must fail");
    assert_eq!(err.to_string(), "Config source 'unknown' is empty");
}

#[rstest]
#[case("config")]
#[case("conFIG")]
fn keeps_canonical_root(#[case] root: &str) {
    let mut tree = RawTree::new().with_child(root, RawTree::new());
    normalizer().wrap_root(&mut tree).expect("canonical root");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.position(root), Some(0));
}

#[test]
fn wraps_top_level_nodes() {
    let mut tree = RawTree::new()
        .with_child("app", RawTree::new())
        .with_child("default", RawTree::new());
    normalizer().wrap_root(&mut tree).expect("wrap");
    assert_eq!(one_line(&tree), "<config><app/><default/></config>");
}

#[test]
fn rejects_root_keyword_below_other_nodes() {
    let mut tree = RawTree::new()
        .with_child("app", RawTree::new())
        .with_child("Config", RawTree::new());
    let err = normalizer().wrap_root(&mut tree).expect_err("ambiguous root");
    assert_eq!(err.kind(), ErrorKind::StructuralViolation);
    assert!(err.to_string().contains("'config' must be root node"));
}

#[test]
fn flattens_attributes_ahead_of_children() {
    let app = element(&[("attr1", "value1"), ("attr2", "value2")])
        .with_child("attr3", element(&[("attr4", "value4")]).with_child(
            "attr5",
            RawTree::leaf("value5"),
        ));
    let mut tree = RawTree::new().with_child("config", RawTree::new().with_child("app", app));
    normalizer().flatten_attributes(&mut tree).expect("flatten");
    assert_eq!(
        one_line(&tree),
        "<config><app><attr1>value1</attr1><attr2>value2</attr2>\
         <attr3><attr4>value4</attr4><attr5>value5</attr5></attr3></app></config>"
    );
}

#[test]
fn rejects_duplicate_attributes() {
    let mut tree = RawTree::new().with_child("config", element(&[("attr", "1"), ("attr", "2")]));
    let err = normalizer()
        .flatten_attributes(&mut tree)
        .expect_err("duplicate attribute");
    assert!(matches!(
        err.as_ref(),
        StrataError::Duplicate {
            path,
            kind: DuplicateKind::Attribute,
            ..
        } if path == "config.attr"
    ));
}

#[rstest]
#[case("<Default/>", FileNameStyle::CaseSensitive, "<config><default/></config>")]
#[case(
    "<app><Instance><i1/></Instance></app>",
    FileNameStyle::CaseSensitive,
    "<config><app><instance><i1/></instance></app></config>"
)]
#[case("<APP/>", FileNameStyle::CaseSensitive, "<config><APP/></config>")]
#[case("<APP/>", FileNameStyle::CaseInsensitive, "<config><app/></config>")]
fn folds_keywords(#[case] input: &str, #[case] style: FileNameStyle, #[case] expected: &str) {
    let raw = match input {
        "<Default/>" => RawTree::new().with_child("Default", RawTree::new()),
        "<APP/>" => RawTree::new().with_child("APP", RawTree::new()),
        _ => RawTree::new().with_child(
            "app",
            RawTree::new().with_child("Instance", RawTree::new().with_child("i1", RawTree::new())),
        ),
    };
    let tree = normalize(raw, "s1.xml", style).expect("normalize");
    assert_eq!(one_line(&tree), expected);
}

#[test]
fn expands_shorthand_into_existing_app() {
    let config = RawTree::new()
        .with_child("app", RawTree::new().with_child("attr", RawTree::leaf("value")))
        .with_child("app..i2", RawTree::new().with_child("attr2", RawTree::leaf("value2")))
        .with_child("other", RawTree::new());
    let mut tree = RawTree::new().with_child("config", config);
    normalizer()
        .expand_instance_shorthand(&mut tree)
        .expect("expand");
    assert_eq!(
        one_line(&tree),
        "<config><app><attr>value</attr><instance><i2><attr2>value2</attr2></i2></instance></app><other/></config>"
    );
}

#[test]
fn expands_shorthand_in_place() {
    let config = RawTree::new()
        .with_child("first", RawTree::new())
        .with_child("app..i1", RawTree::new().with_child("a", RawTree::leaf("1")))
        .with_child("app..i2", RawTree::new().with_child("b", RawTree::leaf("2")))
        .with_child("last", RawTree::new());
    let mut tree = RawTree::new().with_child("config", config);
    normalizer()
        .expand_instance_shorthand(&mut tree)
        .expect("expand");
    assert_eq!(
        one_line(&tree),
        "<config><first/><app><instance><i1><a>1</a></i1><i2><b>2</b></i2></instance></app><last/></config>"
    );
}

#[rstest]
#[case("app..", ShorthandProblem::MissingPart)]
#[case("..i1", ShorthandProblem::MissingPart)]
#[case("default..i1", ShorthandProblem::DefaultInstance)]
#[case("DEFAULT..i1", ShorthandProblem::DefaultInstance)]
fn rejects_malformed_shorthand(#[case] name: &str, #[case] expected: ShorthandProblem) {
    let mut tree = RawTree::new().with_child("config", RawTree::new().with_child(name, RawTree::new()));
    let err = normalizer()
        .expand_instance_shorthand(&mut tree)
        .expect_err("malformed shorthand");
    assert!(matches!(
        err.as_ref(),
        StrataError::Shorthand { element, problem, .. } if element == name && *problem == expected
    ));
}

#[test]
fn rejects_duplicate_instance() {
    let config = RawTree::new()
        .with_child(
            "app_name",
            RawTree::new().with_child(
                "instance",
                RawTree::new().with_child("i1", RawTree::new()),
            ),
        )
        .with_child("app_name..i1", RawTree::new());
    let mut tree = RawTree::new().with_child("config", config);
    let err = normalizer()
        .expand_instance_shorthand(&mut tree)
        .expect_err("duplicate instance");
    assert_eq!(
        err.to_string(),
        "Duplicate node 'app_name..i1' in config source 's1.xml'"
    );
}

#[test]
fn normalisation_is_idempotent() {
    let raw = RawTree::new()
        .with_child("Default", RawTree::new().with_child("lib", element(&[("a", "1")])))
        .with_child("app..i1", element(&[("attr", "value")]));
    let once = normalize(raw, "s", FileNameStyle::CaseSensitive).expect("first pass");
    let twice = normalize(once.clone(), "s", FileNameStyle::CaseSensitive).expect("second pass");
    assert_eq!(once, twice);
}
