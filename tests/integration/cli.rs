//! The `components` binary.

use anyhow::Result;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_render_inferred_template() -> Result<()> {
    let project = TestProject::chain()?.template("mid/show.tera", "Hello {{ name }}")?;

    project
        .cmd()
        .args(["render", "LeafComponent", "--action", "show", "--var", "name=Ada"])
        .assert()
        .success()
        .stdout("Hello Ada\n");
    Ok(())
}

#[test]
fn test_render_with_assigns_json() -> Result<()> {
    let project = TestProject::chain()?.template("leaf/list.tera", "{{ items | join(sep=\",\") }}")?;

    project
        .cmd()
        .args(["render", "LeafComponent", "--template", "list", "--assigns", r#"{"items": [1, 2, 3]}"#])
        .assert()
        .success()
        .stdout("1,2,3\n");
    Ok(())
}

#[test]
fn test_render_without_action_fails() -> Result<()> {
    let project = TestProject::chain()?;

    project
        .cmd()
        .args(["render", "LeafComponent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot infer a template name"))
        .stderr(predicate::str::contains("--action"));
    Ok(())
}

#[test]
fn test_render_missing_template_suggests() -> Result<()> {
    let project = TestProject::chain()?.template("mid/shows.tera", "")?;

    project
        .cmd()
        .args(["render", "MidComponent", "--action", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template 'mid/show' not found"))
        .stderr(predicate::str::contains("mid/shows"));
    Ok(())
}

#[test]
fn test_resolve() -> Result<()> {
    let project = TestProject::chain()?.template("mid/show.tera", "")?;

    project
        .cmd()
        .args(["resolve", "LeafComponent", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MidComponent"))
        .stdout(predicate::str::contains("mid/show"))
        .stdout(predicate::str::contains("yes"));
    Ok(())
}

#[test]
fn test_list_json() -> Result<()> {
    let project = TestProject::chain()?.template("leaf/card.tera", "")?;

    let output = project.cmd().args(["list", "--format", "json"]).output()?;
    assert!(output.status.success());

    let items: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let leaf = items
        .as_array()
        .and_then(|items| items.iter().find(|i| i["name"] == "LeafComponent"))
        .expect("LeafComponent listed");
    assert_eq!(leaf["path"], "leaf");
    assert_eq!(leaf["parent"], "MidComponent");
    assert_eq!(leaf["templates"], serde_json::json!(["leaf/card"]));
    Ok(())
}

#[test]
fn test_config_flag_and_env_var() -> Result<()> {
    let project = TestProject::chain()?.template("mid/show.tera", "ok")?;
    let config = project.dir().join("components.toml");
    let elsewhere = tempfile::TempDir::new()?;

    let mut cmd = project.cmd();
    cmd.current_dir(elsewhere.path())
        .args(["--config", config.to_str().expect("utf-8 path"), "render", "LeafComponent", "-a", "show"])
        .assert()
        .success()
        .stdout("ok\n");

    let mut cmd = project.cmd();
    cmd.current_dir(elsewhere.path())
        .env("COMPONENTS_CONFIG", &config)
        .args(["render", "LeafComponent", "-a", "show"])
        .assert()
        .success()
        .stdout("ok\n");
    Ok(())
}

#[test]
fn test_invalid_config_reports_toml_error() -> Result<()> {
    let project = TestProject::new("[[components]\nname = \"X\"")?;

    project
        .cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration"));
    Ok(())
}

#[test]
fn test_list_table() -> Result<()> {
    let project = TestProject::chain()?.template("mid/show.tera", "")?;

    project
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("LeafComponent"))
        .stdout(predicate::str::contains("(root)"))
        .stdout(predicate::str::contains("mid/show"));
    Ok(())
}
