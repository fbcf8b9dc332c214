use crate::common::command::{repository_dir, run_kit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let kit_dir = repository_dir.path().canonicalize()?.join(".kit");

    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Initialized empty kit repository in"))
        .stdout(predicate::str::contains(kit_dir.display().to_string()));

    assert!(kit_dir.join("objects").is_dir());
    assert!(kit_dir.join("refs").join("heads").is_dir());
    assert!(kit_dir.join("refs").join("tags").is_dir());
    assert_eq!(std::fs::read_to_string(kit_dir.join("index"))?, "[]");
    assert_eq!(
        std::fs::read_to_string(kit_dir.join("HEAD"))?,
        "ref: refs/heads/main\n"
    );
    assert!(repository_dir.path().join(".kitignore").is_file());

    Ok(())
}

#[rstest]
fn init_at_path_creates_the_work_tree(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_kit_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    assert!(repository_dir.path().join("nested/project/.kit/HEAD").is_file());

    Ok(())
}

#[rstest]
fn reinit_keeps_existing_state(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    std::fs::write(repository_dir.path().join(".kitignore"), "*.log\n")?;
    std::fs::write(repository_dir.path().join("a.txt"), "a")?;
    run_kit_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(repository_dir.path().join(".kitignore"))?,
        "*.log\n"
    );
    let index = std::fs::read_to_string(repository_dir.path().join(".kit/index"))?;
    assert!(index.contains("\"a.txt\""));

    Ok(())
}

#[rstest]
#[case(&["status"])]
#[case(&["add", "a.txt"])]
#[case(&["commit", "-m", "message"])]
#[case(&["log"])]
fn commands_outside_a_repository_fail(repository_dir: TempDir, #[case] args: &[&str]) {
    run_kit_command(repository_dir.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a kit repository"));
}

#[rstest]
fn work_tree_can_come_from_the_environment(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let project = repository_dir.path().join("project");
    run_kit_command(repository_dir.path(), &["init", "project"])
        .assert()
        .success();
    std::fs::write(project.join("a.txt"), "a")?;

    run_kit_command(repository_dir.path(), &["add", "a.txt"])
        .env("KIT_WORK_TREE", &project)
        .assert()
        .success()
        .stdout("added a.txt\n");

    run_kit_command(repository_dir.path(), &["--work-tree", "project", "status", "--porcelain"])
        .assert()
        .success()
        .stdout("?? .kitignore\nA  a.txt\n");

    Ok(())
}
