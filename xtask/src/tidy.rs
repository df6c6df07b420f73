use std::path::{Path, PathBuf};

use xshell::{cmd, Shell};

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap().to_path_buf()
}

#[test]
fn check_formatting() {
    let sh = Shell::new().unwrap();
    sh.change_dir(project_root());
    cmd!(sh, "cargo fmt --all -- --check").run().unwrap();
}

#[test]
fn no_trailing_whitespace() {
    let sh = Shell::new().unwrap();
    let root = project_root();
    let mut offenders = Vec::new();
    for dir in ["src", "tests", "demos", "xtask/src"] {
        for path in rust_files(&sh, &root.join(dir)) {
            let text = sh.read_file(&path).unwrap();
            for (i, line) in text.lines().enumerate() {
                if line.ends_with([' ', '\t']) {
                    offenders.push(format!("{}:{}", path.display(), i + 1));
                }
            }
        }
    }
    assert!(offenders.is_empty(), "trailing whitespace:\n{}", offenders.join("\n"));
}

fn rust_files(sh: &Shell, dir: &Path) -> Vec<PathBuf> {
    let mut res = sh.read_dir(dir).unwrap_or_default();
    let mut i = 0;
    while i < res.len() {
        if res[i].is_dir() {
            let nested = sh.read_dir(&res[i]).unwrap();
            res.extend(nested);
        }
        i += 1;
    }
    res.retain(|it| it.extension().map_or(false, |ext| ext == "rs"));
    res
}
