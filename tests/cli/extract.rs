use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, catalog, run_with_stdin, stderr, stdout};

const HELLO: &str = r#"defineMessage({ id: "hello", defaultMessage: "Hi" });"#;

#[test]
fn test_features_of_one_app_collapse_to_app() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("apps/foo/src/features/x/a.ts", HELLO)?;
    test.write_file("apps/foo/src/features/y/b.ts", HELLO)?;

    let output = test
        .extract_command()
        .args(["apps/foo/src/features/x/a.ts", "apps/foo/src/features/y/b.ts"])
        .output()?;

    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @r#"
    [
      {
        "id": "hello",
        "defaultMessage": "Hi",
        "description": null,
        "sourceFile": "apps/foo/src/features/y/b.ts",
        "appScope": "foo",
        "featureScope": null,
        "packageScope": null,
        "isDuplicate": true
      }
    ]
    "#);

    Ok(())
}

#[test]
fn test_same_feature_merges_fields() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "apps/web/src/features/cart/messages.ts",
        r#"
export default defineMessages({
    title: { id: "cart.title", defaultMessage: "Cart", description: "Heading of the cart page" },
});
"#,
    )?;
    test.write_file(
        "apps/web/src/features/cart/view.tsx",
        r#"
export const View = () => <FormattedMessage id="cart.title" defaultMessage="Your cart" description="" />;
"#,
    )?;

    let output = test
        .extract_command()
        .args([
            "apps/web/src/features/cart/messages.ts",
            "apps/web/src/features/cart/view.tsx",
        ])
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        catalog(&output)?,
        vec![json!({
            "id": "cart.title",
            "defaultMessage": "Your cart",
            "description": "Heading of the cart page",
            "sourceFile": "apps/web/src/features/cart/view.tsx",
            "appScope": "web",
            "featureScope": "cart",
            "packageScope": null,
            "isDuplicate": true
        })]
    );

    Ok(())
}

#[test]
fn test_cross_app_collision_keeps_first() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "apps/admin/src/a.ts",
        r#"defineMessage({ id: "ok", defaultMessage: "Confirm" });"#,
    )?;
    test.write_file(
        "apps/shop/src/b.ts",
        r#"defineMessage({ id: "ok", defaultMessage: "Buy now" });"#,
    )?;

    let output = test
        .extract_command()
        .args(["apps/admin/src/a.ts", "apps/shop/src/b.ts", "--verbose"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        catalog(&output)?,
        vec![json!({
            "id": "ok",
            "defaultMessage": "Confirm",
            "description": null,
            "sourceFile": "apps/admin/src/a.ts",
            "appScope": "admin",
            "featureScope": null,
            "packageScope": null,
            "isDuplicate": true
        })]
    );
    let err = stderr(&output);
    assert!(err.contains("id \"ok\" is shared across unrelated applications"));
    assert!(err.contains("ignored apps/shop/src/b.ts"));
    assert!(err.contains("Extracted 1 message from 2 files"));

    Ok(())
}

#[test]
fn test_package_collision() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "packages/src/ui/button.tsx",
        r#"const b = <FormattedMessage id="submit" defaultMessage="Submit" />;"#,
    )?;
    test.write_file(
        "packages/src/forms/form.tsx",
        r#"const f = <FormattedMessage id="submit" defaultMessage="Send" />;"#,
    )?;

    let output = test
        .extract_command()
        .args(["packages/src/ui/button.tsx", "packages/src/forms/form.tsx"])
        .output()?;

    let messages = catalog(&output)?;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["packageScope"], json!("ui"));
    assert_eq!(messages[0]["defaultMessage"], json!("Submit"));
    assert_eq!(messages[0]["isDuplicate"], json!(true));

    Ok(())
}

#[test]
fn test_out_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/a.ts", HELLO)?;

    let output = test
        .extract_command()
        .args(["src/a.ts", "--out-file", "lang/en.json"])
        .output()?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written: serde_json::Value = serde_json::from_str(&test.read_file("lang/en.json")?)?;
    assert_eq!(written[0]["id"], json!("hello"));
    assert_eq!(written[0]["sourceFile"], json!("src/a.ts"));

    Ok(())
}

#[test]
fn test_missing_id_is_skipped_without_pattern() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/a.ts",
        r#"defineMessage({ defaultMessage: "No id here" });"#,
    )?;

    let output = test.extract_command().arg("src/a.ts").output()?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "[]\n");
    assert!(stderr(&output).contains("warning: src/a.ts:1:15 message has no id"));

    Ok(())
}

#[test]
fn test_id_interpolation_pattern() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/a.ts",
        r#"defineMessage({ defaultMessage: "Hi", description: "greeting" });"#,
    )?;
    test.write_file(
        "src/b.ts",
        r#"defineMessage({ defaultMessage: "Hi", description: "greeting" });"#,
    )?;

    let output = test
        .extract_command()
        .args([
            "src/a.ts",
            "src/b.ts",
            "--id-interpolation-pattern",
            "[sha512:contenthash:base64:6]",
        ])
        .output()?;

    assert!(output.status.success());
    let messages = catalog(&output)?;
    assert_eq!(messages.len(), 1);
    let id = messages[0]["id"].as_str().unwrap_or_default();
    assert_eq!(id.len(), 6);
    assert_eq!(messages[0]["isDuplicate"], json!(true));

    Ok(())
}

#[test]
fn test_object_description_is_kept_as_object() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/nav.tsx",
        r#"export const Nav = () => (
  <FormattedMessage id="nav.home" defaultMessage="Home" description={{ context: "navbar", maxLength: 12 }} />
);"#,
    )?;

    let output = test.extract_command().arg("src/nav.tsx").output()?;

    assert!(output.status.success());
    let messages = catalog(&output)?;
    assert_eq!(
        messages[0]["description"],
        json!({ "context": "navbar", "maxLength": 12 })
    );

    Ok(())
}

#[test]
fn test_parse_error_is_reported_and_skipped() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/broken.tsx", "export const = ;")?;
    test.write_file("src/good.ts", HELLO)?;

    let output = test
        .extract_command()
        .args(["src/broken.tsx", "src/good.ts"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(catalog(&output)?.len(), 1);
    assert!(stderr(&output).contains("1 file(s) could not be extracted"));

    Ok(())
}

#[test]
fn test_throws_aborts_without_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/broken.tsx", "export const = ;")?;
    test.write_file("src/good.ts", HELLO)?;

    let output = test
        .extract_command()
        .args(["src/good.ts", "src/broken.tsx", "--throws"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("src/broken.tsx"));

    Ok(())
}

#[test]
fn test_reads_stdin_without_files() -> Result<()> {
    let test = CliTest::new()?;

    let output = run_with_stdin(
        test.extract_command(),
        r#"intl.formatMessage({ id: "piped", defaultMessage: "From stdin" });"#,
    )?;

    assert!(output.status.success());
    assert_eq!(
        catalog(&output)?,
        vec![json!({
            "id": "piped",
            "defaultMessage": "From stdin",
            "description": null,
            "sourceFile": "<stdin>",
            "appScope": null,
            "featureScope": null,
            "packageScope": null,
            "isDuplicate": false
        })]
    );

    Ok(())
}

#[test]
fn test_glob_inputs_and_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".intlxrc.json",
        r#"{ "ignores": ["**/*.test.tsx"], "additionalComponentNames": ["Trans"] }"#,
    )?;
    test.write_file(
        "src/b.tsx",
        r#"const b = <Trans id="b" defaultMessage="B" />;"#,
    )?;
    test.write_file(
        "src/a.tsx",
        r#"const a = <FormattedMessage id="a" defaultMessage="A" />;"#,
    )?;
    test.write_file(
        "src/a.test.tsx",
        r#"const t = <FormattedMessage id="test-only" defaultMessage="T" />;"#,
    )?;

    let output = test.extract_command().arg("src/*.tsx").output()?;

    assert!(output.status.success());
    let ids: Vec<String> = catalog(&output)?
        .iter()
        .filter_map(|m| m["id"].as_str().map(String::from))
        .collect();
    assert_eq!(ids, vec!["a", "b"]);

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intlxrc.json", r#"{ "ignores": ["[invalid"] }"#)?;
    test.write_file("src/a.ts", HELLO)?;

    let output = test.extract_command().arg("src/a.ts").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ignores"));

    Ok(())
}
