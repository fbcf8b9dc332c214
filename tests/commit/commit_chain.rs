use crate::common::command::{
    empty_repository_dir, get_head_commit_sha, init_repository_dir, kit_commit, kit_stdout,
    run_kit_command,
};
use crate::common::file::{FileSpec, list_object_files, write_file};
use crate::common::open_repository;
use assert_fs::TempDir;
use kit::artifacts::objects::object::Object;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn first_commit_is_a_root_commit(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "a".to_string()));
    run_kit_command(dir, &["add", "a.txt"]).assert().success();

    let output = kit_commit(dir, "Initial commit\n\nwith a body")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[main \(root-commit\) [0-9a-f]{7}\] Initial commit\n$",
        )?);
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    let head = get_head_commit_sha(dir)?;
    assert!(stdout.contains(&head[..7]));

    let commit = open_repository(dir).database().load_commit(&head.clone().try_into()?)?;
    assert!(commit.is_root());
    assert_eq!(commit.message(), "Initial commit\n\nwith a body");

    Ok(())
}

#[rstest]
fn following_commits_link_to_their_parent(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = get_head_commit_sha(dir)?;

    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    run_kit_command(dir, &["add", "1.txt"]).assert().success();
    kit_commit(dir, "Second commit")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[main [0-9a-f]{7}\] Second commit\n$")?);

    let second = get_head_commit_sha(dir)?;
    assert_ne!(first, second);

    let payload = kit_stdout(dir, &["cat-file", "-p", &second]);
    let lines = payload.lines().collect::<Vec<_>>();
    assert!(lines[0].starts_with("tree "));
    assert_eq!(lines[1], format!("parent {first}"));
    assert_eq!(lines[2], "Second commit");

    Ok(())
}

#[rstest]
fn committing_an_unchanged_index_still_creates_a_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = get_head_commit_sha(dir)?;

    kit_commit(dir, "Same tree").assert().success();

    let repository = open_repository(dir);
    let second_oid = repository.refs().read_head()?.ok_or("no head")?;
    let second = repository.database().load_commit(&second_oid)?;
    let parent_oid = second.parent().ok_or("no parent")?;
    let first_commit = repository.database().load_commit(parent_oid)?;

    assert_eq!(parent_oid.to_string(), first);
    assert_eq!(second.tree_oid(), first_commit.tree_oid());

    Ok(())
}

#[rstest]
fn empty_index_is_rejected_without_writes(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "not staged".to_string()));

    kit_commit(dir, "Nothing staged")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));

    assert!(list_object_files(dir).is_empty());
    assert!(!dir.join(".kit/refs/heads/main").exists());

    let err = open_repository(dir)
        .commit("Nothing staged")
        .expect_err("commit should fail");
    assert!(matches!(
        err.downcast_ref::<kit::KitError>(),
        Some(kit::KitError::EmptyIndex)
    ));

    Ok(())
}

#[rstest]
fn blank_message_is_rejected(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = get_head_commit_sha(dir)?;
    let objects = list_object_files(dir);

    kit_commit(dir, "   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty commit message"));

    assert_eq!(get_head_commit_sha(dir)?, head);
    assert_eq!(list_object_files(dir), objects);

    Ok(())
}

#[rstest]
fn history_length_matches_commits_made(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    let repository = open_repository(dir);

    for round in 0..4 {
        write_file(FileSpec::new(dir.join("counter.txt"), round.to_string()));
        repository.add(&["counter.txt".to_string()])?;
        repository.commit(&format!("round {round}"))?;
    }

    let history = repository.history()?;
    assert_eq!(history.len(), 4);
    for (oid, commit) in &history {
        assert_eq!(&commit.object_id(), oid);
        if let Some(parent) = commit.parent() {
            assert!(repository.database().load_commit(parent).is_ok());
        }
    }
    assert!(history.last().map(|(_, commit)| commit.is_root()).unwrap_or(false));

    Ok(())
}

#[rstest]
fn root_commit_message_may_start_with_parent(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "a".to_string()));
    let repository = open_repository(dir);
    repository.add(&["a.txt".to_string()])?;

    let oid = repository.commit("parent handling")?;

    let history = repository.history()?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].0, oid);
    assert!(history[0].1.is_root());
    assert_eq!(history[0].1.message(), "parent handling");
    assert!(repository.status_report().is_ok());
    assert_eq!(
        kit_stdout(dir, &["log", "--oneline"]),
        format!("{} parent handling\n", oid.to_short_oid())
    );

    Ok(())
}

#[rstest]
fn commit_message_is_stored_verbatim(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "a".to_string()));
    let repository = open_repository(dir);
    repository.add(&["a.txt".to_string()])?;

    let oid = repository.commit("  Subject\n\nBody text\n")?;

    let commit = repository.database().load_commit(&oid)?;
    assert_eq!(commit.message(), "  Subject\n\nBody text\n");

    Ok(())
}
