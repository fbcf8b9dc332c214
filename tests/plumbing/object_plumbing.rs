use crate::common::command::{
    empty_repository_dir, get_head_commit_sha, init_repository_dir, kit_stdout, run_kit_command,
};
use crate::common::file::{FileSpec, list_object_files, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use sha2::{Digest, Sha256};

fn blob_id(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("blob {}\0{}", content.len(), content));
    format!("{:x}", hasher.finalize())
}

#[rstest]
fn hash_object_matches_framed_sha256(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("hello.txt"), "hello world\n".to_string()));

    assert_eq!(
        kit_stdout(dir, &["hash-object", "hello.txt"]),
        format!("{}\n", blob_id("hello world\n"))
    );
    assert!(list_object_files(dir).is_empty());
}

#[rstest]
fn hash_object_with_write_stores_the_blob(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("hello.txt"), "hello world\n".to_string()));
    let oid = blob_id("hello world\n");

    run_kit_command(dir, &["hash-object", "-w", "hello.txt"])
        .assert()
        .success()
        .stdout(format!("{oid}\n"));
    run_kit_command(dir, &["hash-object", "-w", "hello.txt"])
        .assert()
        .success();

    assert_eq!(
        list_object_files(dir),
        vec![format!("{}/{}", &oid[..2], &oid[2..])]
    );
    assert_eq!(kit_stdout(dir, &["cat-file", "-p", &oid]), "hello world\n");
    assert_eq!(kit_stdout(dir, &["cat-file", "-t", &oid]), "blob\n");
}

#[rstest]
fn empty_file_is_a_valid_blob(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("empty.txt"), String::new()));
    let oid = blob_id("");

    run_kit_command(dir, &["hash-object", "-w", "empty.txt"])
        .assert()
        .success()
        .stdout(format!("{oid}\n"));
    assert_eq!(kit_stdout(dir, &["cat-file", "-p", &oid]), "");
}

#[rstest]
fn cat_file_reports_object_types(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir)?;

    assert_eq!(kit_stdout(dir, &["cat-file", "-t", &head]), "commit\n");

    let commit = kit_stdout(dir, &["cat-file", "-p", &head]);
    let tree_oid = commit
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("tree "))
        .ok_or("commit has no tree line")?;
    assert_eq!(kit_stdout(dir, &["cat-file", "-t", tree_oid]), "tree\n");

    let tree = kit_stdout(dir, &["cat-file", "-p", tree_oid]);
    let entries = tree
        .lines()
        .map(|line| {
            let (meta, name) = line.split_once('\t').unwrap_or((line, ""));
            let mut fields = meta.split(' ');
            (fields.next(), fields.next(), name)
        })
        .collect::<Vec<_>>();
    assert_eq!(
        entries,
        vec![
            (Some("100644"), Some("blob"), ".kitignore"),
            (Some("100644"), Some("blob"), "1.txt"),
            (Some("40000"), Some("tree"), "a"),
        ]
    );
    assert!(tree.contains(&format!("{}\t1.txt", blob_id("one"))));

    Ok(())
}

#[rstest]
fn cat_file_rejects_unknown_objects(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();

    run_kit_command(dir, &["cat-file", "-p", &"ab".repeat(32)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("object not found"));
    run_kit_command(dir, &["cat-file", "-t", "not-a-hash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid object id"));
}

#[rstest]
fn ls_tree_lists_committed_files_recursively(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    let expected = [
        (".kitignore", None),
        ("1.txt", Some("one")),
        ("a/2.txt", Some("two")),
        ("a/b/3.txt", Some("three")),
    ];
    let stdout = kit_stdout(dir, &["ls-tree"]);
    let lines = stdout.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), expected.len());
    for (line, (path, content)) in lines.iter().zip(expected) {
        assert!(line.starts_with("100644 blob "));
        assert!(line.ends_with(&format!("\t{path}")));
        if let Some(content) = content {
            assert!(line.contains(&blob_id(content)));
        }
    }
}

#[rstest]
fn ls_tree_accepts_a_commit_hash(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir)?;

    let by_head = kit_stdout(dir, &["ls-tree", "HEAD"]);
    let by_commit = kit_stdout(dir, &["ls-tree", &head]);

    assert_eq!(by_head, by_commit);

    Ok(())
}

#[rstest]
fn ls_tree_without_commits_fails(empty_repository_dir: TempDir) {
    run_kit_command(empty_repository_dir.path(), &["ls-tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HEAD does not point at a commit yet"));
}
