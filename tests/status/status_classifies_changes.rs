use crate::common::command::{
    empty_repository_dir, init_repository_dir, kit_commit, kit_stdout, run_kit_command,
};
use crate::common::file::{FileSpec, delete_path, write_file};
use crate::common::open_repository;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Committed `{a, b}`, staged `{b modified, c new}`, `a` removed everywhere,
/// `b` edited again on disk and `d` never staged
#[rstest]
fn three_way_status_reports_every_classification(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "a".to_string()));
    write_file(FileSpec::new(dir.join("b.txt"), "b".to_string()));
    run_kit_command(dir, &["add", "."]).assert().success();
    kit_commit(dir, "Add a and b").assert().success();

    write_file(FileSpec::new(dir.join("b.txt"), "b staged".to_string()));
    write_file(FileSpec::new(dir.join("c.txt"), "c".to_string()));
    run_kit_command(dir, &["add", "b.txt", "c.txt"]).assert().success();

    let repository = open_repository(dir);
    {
        let mut index = repository.index();
        index.rehydrate()?;
        assert!(index.remove("a.txt"));
        index.write_updates()?;
    }
    delete_path(&dir.join("a.txt"));
    write_file(FileSpec::new(dir.join("b.txt"), "b edited on disk".to_string()));
    write_file(FileSpec::new(dir.join("d.txt"), "d".to_string()));

    let report = repository.status_report()?;

    assert!(report.has_commits);
    assert_eq!(report.staged_modified(), vec!["b.txt"]);
    assert_eq!(report.staged_new(), vec!["c.txt"]);
    assert_eq!(report.staged_deleted(), vec!["a.txt"]);
    assert_eq!(report.unstaged_modified(), vec!["b.txt"]);
    assert!(report.unstaged_deleted().is_empty());
    assert_eq!(report.untracked(), vec!["d.txt"]);

    assert_eq!(
        kit_stdout(dir, &["status", "--porcelain"]),
        "D  a.txt\nMM b.txt\nA  c.txt\n?? d.txt\n"
    );

    Ok(())
}

#[rstest]
fn staged_edit_matching_disk_is_not_unstaged(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a/2.txt"), "two, revised".to_string()));
    run_kit_command(dir, &["add", "a/2.txt"]).assert().success();

    let report = open_repository(dir).status_report()?;

    assert_eq!(report.staged_modified(), vec!["a/2.txt"]);
    assert!(report.unstaged_modified().is_empty());
    assert_eq!(kit_stdout(dir, &["status", "--porcelain"]), "M  a/2.txt\n");

    Ok(())
}

#[rstest]
fn deleted_working_copy_is_unstaged_deletion(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    delete_path(&dir.join("a/b"));

    assert_eq!(kit_stdout(dir, &["status", "--porcelain"]), " D a/b/3.txt\n");
}

#[rstest]
fn rewriting_identical_content_is_clean(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));

    assert_eq!(kit_stdout(dir, &["status", "--porcelain"]), "");
}

#[rstest]
fn clean_tree_long_status(init_repository_dir: TempDir) {
    assert_eq!(
        kit_stdout(init_repository_dir.path(), &["status"]),
        "On branch main\n\nnothing to commit, working tree clean\n"
    );
}

#[rstest]
fn long_status_before_first_commit(empty_repository_dir: TempDir) {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "a".to_string()));
    run_kit_command(dir, &["add", "a.txt"]).assert().success();

    assert_eq!(
        kit_stdout(dir, &["status"]),
        "On branch main\n\
         \n\
         No commits yet\n\
         \n\
         Changes to be committed:\n\
         \x20       new file:   a.txt\n\
         \n\
         Untracked files:\n\
         \x20       .kitignore\n"
    );
}

#[rstest]
fn long_status_groups_unstaged_changes(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    delete_path(&dir.join("a/2.txt"));

    assert_eq!(
        kit_stdout(dir, &["status"]),
        "On branch main\n\
         \n\
         Changes not staged for commit:\n\
         \x20       modified:   1.txt\n\
         \x20       deleted:    a/2.txt\n"
    );
}

#[rstest]
fn ignored_files_are_not_untracked(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join(".kitignore"), "*.tmp\nscratch/\n".to_string()));
    write_file(FileSpec::new(dir.join("x.tmp"), "x".to_string()));
    write_file(FileSpec::new(dir.join("scratch/notes.txt"), "n".to_string()));
    write_file(FileSpec::new(dir.join("y.txt"), "y".to_string()));

    assert_eq!(
        kit_stdout(dir, &["status", "--porcelain"]),
        " M .kitignore\n?? y.txt\n"
    );
}

#[rstest]
fn status_before_first_commit_reports_everything_as_added(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("dir/a.txt"), "a".to_string()));
    run_kit_command(dir, &["add", "."]).assert().success();

    let report = open_repository(dir).status_report()?;

    assert!(!report.has_commits);
    assert_eq!(report.staged_new(), vec![".kitignore", "dir/a.txt"]);
    assert!(report.untracked().is_empty());

    Ok(())
}

#[rstest]
fn touching_a_file_without_editing_it_is_clean(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let later = filetime::FileTime::from_unix_time(2_000_000_000, 0);
    filetime::set_file_mtime(dir.join("a/b/3.txt"), later)?;

    assert!(open_repository(dir).status_report()?.is_clean());

    Ok(())
}

#[rstest]
fn staged_file_matching_a_new_ignore_reads_as_deleted(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();
    write_file(FileSpec::new(dir.join("secret.env"), "TOKEN=1".to_string()));
    run_kit_command(dir, &["add", "."]).assert().success();
    kit_commit(dir, "Track secret").assert().success();

    write_file(FileSpec::new(dir.join(".kitignore"), "*.env\n".to_string()));
    write_file(FileSpec::new(dir.join("secret.env"), "TOKEN=2".to_string()));

    let report = open_repository(dir).status_report()?;

    assert_eq!(report.unstaged_deleted(), vec!["secret.env"]);
    assert_eq!(report.unstaged_modified(), vec![".kitignore"]);
    assert!(report.untracked().is_empty());
    assert_eq!(
        kit_stdout(dir, &["status", "--porcelain"]),
        " M .kitignore\n D secret.env\n"
    );

    Ok(())
}
