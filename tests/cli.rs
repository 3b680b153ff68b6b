// CLI tests — running the built binary against files in the temp directory.
//
// Checks what the commands put on stdout versus stderr, not the math
// (covered by the library tests).

use std::path::PathBuf;
use std::process::Command;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("debias_cli_{}_{name}", std::process::id()))
}

fn debias() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_debias"));
    // Pin config so a developer's .env or shell settings cannot leak in.
    for var in [
        "DEBIAS_VECTORS",
        "DEBIAS_AXIS",
        "DEBIAS_EQUALIZE",
        "DEBIAS_NORMALIZE",
        "DEBIAS_OUTPUT",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "debias=info");
    cmd
}

// ============================================================
// apply --json
// ============================================================

#[test]
fn apply_json_stdout_is_only_the_summary() {
    let vectors = temp_path("vectors.txt");
    let plan = temp_path("plan.json");
    let output = temp_path("out.txt");
    std::fs::write(&vectors, "man 1 0 0.2\nwoman 0 1 0.2\nnurse 0.3 0.9 0.4\n").unwrap();
    std::fs::write(&plan, r#"{"neutral": ["nurse", "zzz"]}"#).unwrap();

    let result = debias()
        .arg("--vectors")
        .arg(&vectors)
        .arg("apply")
        .arg("--plan")
        .arg(&plan)
        .arg("--output")
        .arg(&output)
        .arg("--json")
        .output()
        .unwrap();

    let _ = std::fs::remove_file(&vectors);
    let _ = std::fs::remove_file(&plan);
    let _ = std::fs::remove_file(&output);

    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));

    let stdout = String::from_utf8(result.stdout).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout is not a single JSON document ({e}):\n{stdout}"));
    assert!(summary.is_object());

    // The logs still happen; they just go to stderr.
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Vector table loaded"), "stderr: {stderr}");
}
