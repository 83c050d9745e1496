//! Unit tests for the demo pipeline.

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};

use super::{build_config, load_sources, write_report};
use crate::cli::DumpArgs;
use crate::error::DumpError;

#[fixture]
fn args() -> DumpArgs {
    DumpArgs {
        app: "svc".into(),
        ..DumpArgs::default()
    }
}

fn report(args: &DumpArgs) -> Result<String> {
    let mut out = Vec::new();
    write_report(&mut out, args)?;
    Ok(String::from_utf8(out)?)
}

#[rstest]
fn later_properties_override_earlier_ones(mut args: DumpArgs) -> Result<()> {
    args.properties = vec!["port=80:host=a".into(), "port=8080".into()];
    args.queries = vec!["port".into(), "host".into()];
    ensure!(report(&args)? == "port=8080\nhost=a\n");
    Ok(())
}

#[rstest]
fn properties_target_the_instance(mut args: DumpArgs) -> Result<()> {
    args.instance = Some("edge".into());
    args.properties = vec!["tls=on".into()];
    let sources = load_sources(&args)?;
    let config = build_config(&args, &sources)?;
    ensure!(config.name() == "svc..edge");
    ensure!(config.get("tls")? == "on");
    Ok(())
}

#[rstest]
fn whole_config_is_printed_without_queries(mut args: DumpArgs) -> Result<()> {
    args.properties = vec!["a=1".into()];
    ensure!(report(&args)? == "<svc>\n<a>1</a>\n</svc>\n");
    Ok(())
}

#[rstest]
fn one_line_mode_prints_each_source(mut args: DumpArgs) -> Result<()> {
    args.properties = vec!["a=1".into(), "b.c=2".into()];
    args.one_line = true;
    ensure!(
        report(&args)?
            == "a=1: <config><svc><a>1</a></svc></config>\n\
                b.c=2: <config><svc><b><c>2</c></b></svc></config>\n"
    );
    Ok(())
}

#[rstest]
fn missing_query_is_a_configuration_error(mut args: DumpArgs) -> Result<()> {
    args.properties = vec!["a=1".into()];
    args.queries = vec!["b".into()];
    let mut out = Vec::new();
    let err = write_report(&mut out, &args)
        .err()
        .ok_or_else(|| anyhow!("expected the query to fail"))?;
    ensure!(matches!(err, DumpError::Configuration(_)));
    ensure!(
        err.to_string() == "failed to build configuration: Can't find property 'b' in config 'svc'",
        "unexpected message: {err}"
    );
    Ok(())
}
