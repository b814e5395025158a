use crate::common::{assert_contains, blogdata, init_test_logging};

#[test]
fn test_check_passes_with_clean_environment() {
    init_test_logging();
    crate::test_log!("TEST START: test_check_passes_with_clean_environment");

    let output = blogdata()
        .arg("check")
        .env("BLOG_NAME", "My%20Blog")
        .output()
        .expect("Failed to run blogdata check");

    assert!(output.status.success());
    assert_contains(&String::from_utf8_lossy(&output.stdout), "ok");

    crate::test_log!("TEST PASS: test_check_passes_with_clean_environment");
}

#[test]
fn test_check_reports_all_bad_variables() {
    init_test_logging();
    crate::test_log!("TEST START: test_check_reports_all_bad_variables");

    let output = blogdata()
        .arg("check")
        .env("BLOG_NAME", "%zz")
        .env("BLOG_TITLE", "fine")
        .env("BLOG_FOOTER_TEXT", "%E4")
        .output()
        .expect("Failed to run blogdata check");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "BLOG_NAME");
    assert_contains(&stderr, "BLOG_FOOTER_TEXT");
    assert_contains(&stderr, "2 invalid BLOG_* variable(s)");
    assert!(!stderr.contains("BLOG_TITLE"));

    crate::test_log!("TEST PASS: test_check_reports_all_bad_variables");
}
