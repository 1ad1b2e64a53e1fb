use dirsnap::{
    IgnorePreset, LanguagePreset, SnapshotBuilder, TreeStylePreset, deconstruct_snapshot,
    snapshot, write_snapshot,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn integration_snapshot_round_trip() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/main.py"), "print('hello')").unwrap();
    fs::write(dir.path().join("src/util.py"), "def f():\n    return 1\n").unwrap();
    fs::write(dir.path().join("README.md"), "# demo").unwrap();
    fs::create_dir(dir.path().join("node_modules")).unwrap();
    fs::write(dir.path().join("node_modules/dep.js"), "dep").unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("snapshot.txt");
    let options = SnapshotBuilder::new(dir.path())
        .output(&output)
        .language_presets(vec![LanguagePreset::Python])
        .ignore_presets(vec![IgnorePreset::NodeModules])
        .show_stats(true)
        .show_token_count(true)
        .build();

    let summary = write_snapshot(&options).unwrap();
    assert_eq!(summary.files_included, 2);

    let artifact = fs::read_to_string(&output).unwrap();
    assert!(artifact.starts_with("Token Count (Characters): "));
    assert!(artifact.contains("Project File Structure"));
    assert!(artifact.contains("FILE: src/main.py"));
    assert!(artifact.contains("print('hello')"));
    assert!(!artifact.contains("dep.js"));

    let parsed = deconstruct_snapshot(&output).unwrap();
    assert_eq!(parsed.file_paths, vec!["src/main.py", "src/util.py"]);
    assert!(parsed.tree_lines.iter().any(|l| l.contains("main.py")));
}

#[test]
fn integration_round_trip_matches_scan_for_every_style() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("a/b")).unwrap();
    fs::write(dir.path().join("a/b/deep.txt"), "deep").unwrap();
    fs::write(dir.path().join("a/top.txt"), "top").unwrap();
    fs::write(dir.path().join("root.txt"), "root").unwrap();

    for style in [
        TreeStylePreset::Unicode,
        TreeStylePreset::Ascii,
        TreeStylePreset::Compact,
    ] {
        let out = tempdir().unwrap();
        let output = out.path().join("snap.txt");
        let options = SnapshotBuilder::new(dir.path())
            .output(&output)
            .tree_style(style)
            .build();
        let scanned = snapshot(&options).unwrap();
        let expected: Vec<String> = scanned
            .entries
            .iter()
            .map(|e| e.relative_path.clone())
            .collect();

        write_snapshot(&options).unwrap();
        let parsed = deconstruct_snapshot(&output).unwrap();
        assert_eq!(parsed.file_paths, expected, "style {:?}", style);
    }
}

#[test]
fn integration_search_mode_artifact() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.env"), "password=123\n").unwrap();
    fs::write(dir.path().join("app.py"), "print('no secrets')").unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("search.txt");
    let options = SnapshotBuilder::new(dir.path())
        .output(&output)
        .keywords(vec!["password".into()])
        .search_contents(true)
        .build();

    let summary = write_snapshot(&options).unwrap();
    assert_eq!(summary.files_included, 1);

    let artifact = fs::read_to_string(&output).unwrap();
    assert!(artifact.contains("FILE: config.env"));
    assert!(artifact.contains("password=123"));
    assert!(!artifact.contains("no secrets"));

    let parsed = deconstruct_snapshot(&output).unwrap();
    assert_eq!(parsed.file_paths, vec!["config.env"]);
}

#[test]
fn integration_artifact_is_byte_stable() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("pkg")).unwrap();
    fs::write(dir.path().join("pkg/a.rs"), "fn a() {}").unwrap();
    fs::write(dir.path().join("pkg/z.rs"), "fn z() {}").unwrap();

    let out = tempdir().unwrap();
    let first_path = out.path().join("first.txt");
    let second_path = out.path().join("second.txt");
    let mut first_options = SnapshotBuilder::new(dir.path()).show_stats(true).build();
    first_options.output = first_path.clone();
    let mut second_options = first_options.clone();
    second_options.output = second_path.clone();

    write_snapshot(&first_options).unwrap();
    write_snapshot(&second_options).unwrap();
    assert_eq!(
        fs::read_to_string(&first_path).unwrap(),
        fs::read_to_string(&second_path).unwrap()
    );
}
