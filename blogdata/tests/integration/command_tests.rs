use crate::common::{assert_contains, blogdata, init_test_logging};

#[test]
fn test_help_includes_description() {
    init_test_logging();
    crate::test_log!("TEST START: test_help_includes_description");

    let output = blogdata()
        .arg("--help")
        .output()
        .expect("Failed to run blogdata --help");

    assert!(output.status.success(), "blogdata --help failed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_contains(&stdout, "BLOG_* environment variables");
    assert_contains(&stdout, "show");
    assert_contains(&stdout, "check");

    crate::test_log!("TEST PASS: test_help_includes_description");
}

#[test]
fn test_invalid_log_level_is_not_fatal() {
    init_test_logging();
    crate::test_log!("TEST START: test_invalid_log_level_is_not_fatal");

    let output = blogdata()
        .args(["show"])
        .env("BLOG_LOG_LEVEL", "shouting")
        .output()
        .expect("Failed to run blogdata show");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "BLOG_LOG_LEVEL");

    crate::test_log!("TEST PASS: test_invalid_log_level_is_not_fatal");
}
