//! End-to-end construction of config sources: normalisation, validation and
//! the error chains reported for rejected documents.

use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use strata_config::{
    ConfigSource, DuplicateKind, ErrorKind, FileNameStyle, InputFormat, OutputStyle,
    ShorthandProblem, StrataError, StructureRule,
};

fn one_line(text: &str) -> Result<String> {
    let source = ConfigSource::parse(text)?;
    Ok(source.to_string(OutputStyle::OneLine))
}

fn rejection(text: &str) -> Result<Arc<StrataError>> {
    match ConfigSource::builder().name("s1.xml").parse_str(text) {
        Ok(source) => Err(anyhow!(
            "expected '{text}' to be rejected, got {}",
            source.to_string(OutputStyle::OneLine)
        )),
        Err(err) => Ok(err),
    }
}

#[rstest]
#[case("<config/>", "<config/>")]
#[case("<Default/>", "<config><default/></config>")]
#[case("<config><Default/></config>", "<config><default/></config>")]
#[case(
    "<app><Instance><i1/></Instance></app>",
    "<config><app><instance><i1/></instance></app></config>"
)]
#[case(
    "<config><app><Instance><i1/></Instance></app></config>",
    "<config><app><instance><i1/></instance></app></config>"
)]
#[case("<APP/>", "<config><APP/></config>")]
fn normalises_keywords(#[case] input: &str, #[case] expected: &str) -> Result<()> {
    let rendered = one_line(input)?;
    ensure!(rendered == expected, "rendered {rendered}, expected {expected}");
    Ok(())
}

#[rstest]
fn case_insensitive_file_names_fold_app_names() -> Result<()> {
    let source = ConfigSource::builder()
        .name("s1.xml")
        .input_format(InputFormat::Xml)
        .file_name_style(FileNameStyle::CaseInsensitive)
        .parse_str("<APP/>")?;
    ensure!(source.to_string(OutputStyle::OneLine) == "<config><app/></config>");
    Ok(())
}

#[rstest]
#[case(
    "<config><default><lib attr='value'/></default><default><env PATH='/usr/bin'/></default></config>",
    DuplicateKind::DefaultNode,
    "default"
)]
#[case(
    "<config><default><lib attr='value'/><lib attr2='value2'/></default></config>",
    DuplicateKind::DefaultChild,
    "default.lib"
)]
#[case(
    "<default><lib attr='value'/><lib attr2='value2'/></default>",
    DuplicateKind::DefaultChild,
    "default.lib"
)]
#[case(
    "<config><app_name attr='value'/><app_name><env PATH='/usr/bin'/></app_name></config>",
    DuplicateKind::AppNode,
    "app_name"
)]
#[case(
    "<config><app_name..i1><env PATH='/usr/bin'/></app_name..i1>\
     <app_name..i1><env PATH='/usr../usr/bin'/></app_name..i1></config>",
    DuplicateKind::Instance,
    "app_name..i1"
)]
#[case(
    "<config><app_name><instance><i1 attr='value'/></instance></app_name>\
     <app_name..i1><env PATH='/usr/bin'/></app_name..i1></config>",
    DuplicateKind::Instance,
    "app_name..i1"
)]
#[case(
    "<app_name><instance><i1 attr='value'/></instance><instance><i2 attr='value'/></instance></app_name>",
    DuplicateKind::InstanceWrapper,
    "app_name"
)]
#[case(
    "<config><app_name><instance><i1 attr='value'/><i1 attr2='value2'/></instance></app_name></config>",
    DuplicateKind::Instance,
    "app_name..i1"
)]
#[case(
    "<config attr='value1' attr='value2'></config>",
    DuplicateKind::Attribute,
    "config.attr"
)]
fn rejects_duplicates(
    #[case] input: &str,
    #[case] expected_kind: DuplicateKind,
    #[case] expected_path: &str,
) -> Result<()> {
    let err = rejection(input)?;
    ensure!(
        matches!(
            err.root_cause(),
            StrataError::Duplicate { kind, path, source_name }
                if *kind == expected_kind && path == expected_path && source_name == "s1.xml"
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
#[case("<config>12345678901</config>", StructureRule::RootData { data: "1234567...".into() })]
#[case("<config><app_name>data</app_name></config>", StructureRule::AppData { data: "data".into() })]
#[case("<config><default>data123</default></config>", StructureRule::DefaultData { data: "data123".into() })]
#[case(
    "<config><app_name..i1>data</app_name..i1></config>",
    StructureRule::InstanceData { data: "data".into() }
)]
#[case("<app><env attr='value1'>data</env></app>", StructureRule::MixedContent)]
#[case(
    "<default attr1='value1'><attr2>value2</attr2></default>",
    StructureRule::DirectDefaultProperty { property: "attr1".into() }
)]
#[case(
    "<default><Instance attr='value'/></default>",
    StructureRule::InstanceUnderDefault { node: "Instance".into() }
)]
fn rejects_structural_violations(
    #[case] input: &str,
    #[case] expected: StructureRule,
) -> Result<()> {
    let err = rejection(input)?;
    ensure!(
        matches!(err.root_cause(), StrataError::Structure { rule, .. } if *rule == expected),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
#[case("<config><app.. attr='value'/></config>", ShorthandProblem::MissingPart)]
#[case("<config><..i1 attr='value'/></config>", ShorthandProblem::MissingPart)]
#[case(
    "<config><default..i1><env PATH='/usr/bin'/></default..i1></config>",
    ShorthandProblem::DefaultInstance
)]
fn rejects_malformed_shorthand(
    #[case] input: &str,
    #[case] expected: ShorthandProblem,
) -> Result<()> {
    let err = rejection(input)?;
    ensure!(
        matches!(err.root_cause(), StrataError::Shorthand { problem, .. } if *problem == expected),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
fn config_next_to_other_top_level_nodes_is_rejected() -> Result<()> {
    let err = rejection("<app/><config/>")?;
    ensure!(
        matches!(
            err.root_cause(),
            StrataError::Structure { rule: StructureRule::RootNotOnTop, path, .. } if path == "config"
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
fn error_trail_lists_wrapper_then_cause() -> Result<()> {
    let err = ConfigSource::builder()
        .name("s1.xml")
        .parse_str("<config><default>data123</default></config>")
        .err()
        .ok_or_else(|| anyhow!("expected default data to be rejected"))?;
    let trail = err.trail();
    let messages: Vec<&str> = trail.iter().map(|record| record.message.as_str()).collect();
    ensure!(
        messages
            == [
                "Couldn't parse config 's1.xml'",
                "Invalid config source 's1.xml' at 'config.default': invalid data node 'data123' under 'default' node",
            ],
        "unexpected trail: {messages:?}"
    );
    ensure!(trail.iter().all(|record| record.kind == ErrorKind::StructuralViolation));
    Ok(())
}
