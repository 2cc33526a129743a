//! Path normalization and resolution tests using rstest for parameterization.

use rstest::rstest;
use weave_kernel::paths::{file_name, is_within, join, normalize, parent, resolve};

#[rstest]
#[case::root("/", "/")]
#[case::empty("", "/")]
#[case::dotdot_collapses("/a/../b", "/b")]
#[case::repeated_slashes("//a//b/", "/a/b")]
#[case::dot_segments("/a/./b/.", "/a/b")]
#[case::above_root("/../../x", "/x")]
#[case::relative_is_rooted("a/b", "/a/b")]
#[case::trailing_dotdot("/a/b/..", "/a")]
fn normalize_cases(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize(input), expected);
}

#[rstest]
#[case::absolute_ignores_cwd("/etc", "/home/ada", "/etc")]
#[case::relative("docs", "/home/ada", "/home/ada/docs")]
#[case::dot("./docs", "/home/ada", "/home/ada/docs")]
#[case::parent("..", "/home/ada", "/home")]
#[case::sibling("../bob/x", "/home/ada", "/home/bob/x")]
#[case::past_root("../../../..", "/home/ada", "/")]
#[case::empty("", "/home/ada", "/")]
fn resolve_cases(#[case] path: &str, #[case] cwd: &str, #[case] expected: &str) {
    assert_eq!(resolve(path, cwd), expected);
}

#[rstest]
#[case("/a/../b")]
#[case("//a//b/")]
#[case("x/./y/../z")]
#[case("/")]
fn normalize_is_idempotent(#[case] input: &str) {
    let once = normalize(input);
    assert_eq!(normalize(&once), once);
}

#[rstest]
#[case("/")]
#[case("/tmp")]
#[case("/home/ada/Documents")]
fn dot_prefix_is_transparent(#[case] cwd: &str) {
    assert_eq!(resolve("./a", cwd), resolve("a", cwd));
}

#[test]
fn parent_and_name_of_nested_path() {
    assert_eq!(parent("/a/b/c.txt"), "/a/b");
    assert_eq!(file_name("/a/b/c.txt"), "c.txt");
    assert_eq!(join(&parent("/a/b/c.txt"), &file_name("/a/b/c.txt")), "/a/b/c.txt");
}

#[test]
fn containment_is_by_segment() {
    assert!(is_within("/home/ada/x", "/home/ada"));
    assert!(!is_within("/home/adam", "/home/ada"));
}
