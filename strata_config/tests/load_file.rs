//! Loading config sources from files on disk.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use strata_config::{Config, ConfigSource, ErrorKind, InputFormat, OutputStyle};
use test_helpers::files::ConfigDir;
use test_helpers::text::{lines, squash};

#[rstest]
fn xml_file_is_named_after_its_path() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.write("app.xml", "<app>\n  <port>80</port>\n</app>\n")?;
    let source = ConfigSource::from_file(&path)?;
    ensure!(source.name() == path.as_str());
    let expected = lines(&[
        "<config>",
        "  <app>",
        "    <port>80</port>",
        "  </app>",
        "</config>",
    ]);
    ensure!(source.to_string(OutputStyle::Pretty) == expected);
    ensure!(source.to_string(OutputStyle::OneLine) == squash(&expected));
    Ok(())
}

#[cfg(feature = "json")]
#[rstest]
fn json_extension_selects_json_reader() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.write(
        "layers.JSON",
        r#"{"default": {"db": {"host": "localhost"}}, "app": {"db": {"port": 5432}}}"#,
    )?;
    let mut config = Config::new("app")?;
    config.merge(&ConfigSource::from_file(&path)?)?;
    config.lock()?;
    ensure!(config.get("db.host")? == "localhost");
    ensure!(config.get_as::<u16>("db.port")? == 5432);
    Ok(())
}

#[rstest]
fn explicit_format_and_name_override_defaults() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.write("app.json", "<app a='1'/>")?;
    let source = ConfigSource::builder()
        .name("inline")
        .input_format(InputFormat::Xml)
        .load_file(&path)?;
    ensure!(source.name() == "inline");
    ensure!(source.to_string(OutputStyle::OneLine) == "<config><app><a>1</a></app></config>");
    Ok(())
}

#[rstest]
fn missing_file_is_an_io_error() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.path().join("absent.xml");
    let err = ConfigSource::from_file(&path)
        .err()
        .ok_or_else(|| anyhow!("expected the missing file to fail"))?;
    ensure!(err.kind() == ErrorKind::Io);
    let trail = err.trail();
    ensure!(trail.len() == 2, "unexpected trail {trail:?}");
    ensure!(
        trail
            .first()
            .is_some_and(|record| record.message == format!("Couldn't parse config '{path}'"))
    );
    Ok(())
}

#[rstest]
fn malformed_file_reports_parse_error() -> Result<()> {
    let dir = ConfigDir::new()?;
    let path = dir.write("broken.xml", "<app><a></app>")?;
    let err = ConfigSource::from_file(&path)
        .err()
        .ok_or_else(|| anyhow!("expected the malformed file to fail"))?;
    ensure!(err.kind() == ErrorKind::Parse);
    Ok(())
}
