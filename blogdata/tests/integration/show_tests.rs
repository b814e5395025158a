use serde_json::{Value, json};

use crate::common::{assert_contains, blogdata, init_test_logging};

fn show_json(envs: &[(&str, &str)]) -> Value {
    let output = blogdata()
        .arg("show")
        .envs(envs.iter().copied())
        .output()
        .expect("Failed to run blogdata show");
    assert!(
        output.status.success(),
        "blogdata show failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("show output is not JSON")
}

#[test]
fn test_show_defaults() {
    init_test_logging();
    crate::test_log!("TEST START: test_show_defaults");

    let value = show_json(&[]);
    assert_eq!(
        value,
        json!({
            "name": "鲨鱼辣椒侦探",
            "blogTitle": "人生笔记",
            "footerText": "永远相信美好的事情即将发生",
        })
    );

    crate::test_log!("TEST PASS: test_show_defaults");
}

#[test]
fn test_show_decodes_and_keeps_other_defaults() {
    init_test_logging();
    crate::test_log!("TEST START: test_show_decodes_and_keeps_other_defaults");

    let value = show_json(&[("BLOG_TITLE", "%E4%BD%A0%E5%A5%BD")]);
    assert_eq!(value["blogTitle"], "你好");
    assert_eq!(value["name"], "鲨鱼辣椒侦探");
    assert_eq!(value["footerText"], "永远相信美好的事情即将发生");

    let value = show_json(&[("BLOG_NAME", "MyBlog")]);
    assert_eq!(value["name"], "MyBlog");

    crate::test_log!("TEST PASS: test_show_decodes_and_keeps_other_defaults");
}

#[test]
fn test_show_fails_on_malformed_value() {
    init_test_logging();
    crate::test_log!("TEST START: test_show_fails_on_malformed_value");

    let output = blogdata()
        .arg("show")
        .env("BLOG_FOOTER_TEXT", "%")
        .output()
        .expect("Failed to run blogdata show");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no record may be printed on failure");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "BLOG_FOOTER_TEXT");

    crate::test_log!("TEST PASS: test_show_fails_on_malformed_value");
}

#[test]
fn test_show_sources_json() {
    init_test_logging();
    crate::test_log!("TEST START: test_show_sources_json");

    let output = blogdata()
        .args(["show", "--sources"])
        .env("BLOG_NAME", "MyBlog")
        .output()
        .expect("Failed to run blogdata show --sources");

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("sources output is not JSON");
    assert_eq!(
        value["name"],
        json!({"value": "MyBlog", "source": "environment", "env_var": "BLOG_NAME"})
    );
    assert_eq!(value["blogTitle"]["source"], "default");

    crate::test_log!("TEST PASS: test_show_sources_json");
}

#[test]
fn test_show_env_output_feeds_back() {
    init_test_logging();
    crate::test_log!("TEST START: test_show_env_output_feeds_back");

    let output = blogdata()
        .args(["show", "--format", "env"])
        .env("BLOG_FOOTER_TEXT", "a%20b%2Fc")
        .output()
        .expect("Failed to run blogdata show --format env");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let pairs: Vec<(String, String)> = stdout
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(pairs.len(), 3);

    let envs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let value = show_json(&envs);
    assert_eq!(value["footerText"], "a b/c");
    assert_eq!(value["name"], "鲨鱼辣椒侦探");

    crate::test_log!("TEST PASS: test_show_env_output_feeds_back");
}
