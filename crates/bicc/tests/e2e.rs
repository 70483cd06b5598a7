//! End-to-end tests for the bicc binary.
//!
//! Each test writes a `.bic` source file into a temp directory, invokes the
//! built binary, and asserts on the emitted artifacts and exit status.

use std::path::PathBuf;
use std::process::Command;

/// Find the bicc binary next to the test executable in the target dir.
fn find_bicc() -> PathBuf {
    let mut path = std::env::current_exe()
        .expect("cannot find current exe")
        .parent()
        .expect("cannot find parent dir")
        .to_path_buf();

    // Navigate from `deps/` to the target directory.
    if path.file_name().is_some_and(|n| n == "deps") {
        path = path.parent().unwrap().to_path_buf();
    }

    let bicc = path.join("bicc");
    assert!(
        bicc.exists(),
        "bicc binary not found at {}. Run `cargo build -p bicc` first.",
        bicc.display()
    );
    bicc
}

const POINT_BIC: &str = "\
import \"vec.bic\";

class Point {
    mut x : int;
    mut y : int;

    Point(x : int, y : int) {
        .x = x;
        .y = y;
    }

    pub length_squared() const -> int {
        ret x * x + y * y;
    }
};

main() -> int {
    let p : Point* = new Point(1, 2);
    del p;
    ret 0;
}
";

#[test]
fn translates_a_class_into_both_units() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let input = temp.path().join("point.bic");
    std::fs::write(&input, POINT_BIC).expect("failed to write point.bic");
    let out_dir = temp.path().join("out");

    let output = Command::new(find_bicc())
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .output()
        .expect("failed to invoke bicc");

    assert!(
        output.status.success(),
        "bicc failed:\nstdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    // The confirmation line names the input and both artifacts.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("point.bic"));
    assert!(stdout.contains("point.cpp"));
    assert!(stdout.contains("point.hpp"));

    let header = std::fs::read_to_string(out_dir.join("point.hpp")).unwrap();
    let source = std::fs::read_to_string(out_dir.join("point.cpp")).unwrap();

    assert!(header.starts_with("#pragma once\n"));
    assert!(header.contains("#include \"vec.hpp\""));
    assert!(header.contains("class Point {"));
    assert!(header.contains("protected: int x;"));
    assert!(header.contains("protected: Point(int x, int y);"));
    assert!(header.contains("public: [[nodiscard]] int length_squared() const;"));
    // main has no header declaration.
    assert!(!header.contains("main"));

    assert!(source.starts_with("#include \"point.hpp\"\n"));
    assert!(source.contains("#include \"vec.hpp\""));
    assert!(source.contains("Point::Point(int x, int y) {"));
    assert!(source.contains("this->x = x;"));
    assert!(source.contains("int Point::length_squared() const {"));
    assert!(source.contains("int main() {"));
}

#[test]
fn writes_to_the_current_directory_by_default() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(temp.path().join("mini.bic"), "main() -> int { ret 0; }\n").unwrap();

    let output = Command::new(find_bicc())
        .current_dir(temp.path())
        .arg("mini.bic")
        .output()
        .expect("failed to invoke bicc");

    assert!(output.status.success());
    assert!(temp.path().join("mini.cpp").exists());
    assert!(temp.path().join("mini.hpp").exists());
}

#[test]
fn creates_intermediate_output_directories() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let input = temp.path().join("deep.bic");
    std::fs::write(&input, "let answer : int = 42;\n").unwrap();
    let out_dir = temp.path().join("build").join("generated");

    let output = Command::new(find_bicc())
        .arg(&input)
        .arg("--output")
        .arg(&out_dir)
        .output()
        .expect("failed to invoke bicc");

    assert!(output.status.success());
    let source = std::fs::read_to_string(out_dir.join("deep.cpp")).unwrap();
    assert!(source.contains("int const answer = 42;"));
}

#[test]
fn translating_twice_is_byte_identical() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let input = temp.path().join("twice.bic");
    std::fs::write(&input, POINT_BIC).unwrap();

    let run = |dir: &str| {
        let out_dir = temp.path().join(dir);
        let output = Command::new(find_bicc())
            .arg(&input)
            .arg("-o")
            .arg(&out_dir)
            .output()
            .expect("failed to invoke bicc");
        assert!(output.status.success());
        (
            std::fs::read(out_dir.join("twice.hpp")).unwrap(),
            std::fs::read(out_dir.join("twice.cpp")).unwrap(),
        )
    };

    assert_eq!(run("a"), run("b"));
}

#[test]
fn syntax_errors_exit_nonzero_with_a_located_diagnostic() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let input = temp.path().join("bad.bic");
    std::fs::write(&input, "let x : = 3;\n").unwrap();

    let output = Command::new(find_bicc())
        .arg(&input)
        .output()
        .expect("failed to invoke bicc");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad.bic"));
    assert!(stderr.contains("line 1"));
    // Nothing was written.
    assert!(!temp.path().join("bad.cpp").exists());
}

#[test]
fn missing_input_exits_nonzero() {
    let output = Command::new(find_bicc())
        .arg("no-such-file.bic")
        .output()
        .expect("failed to invoke bicc");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"));
}
