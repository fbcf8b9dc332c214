use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use kit::Repository;
use kit::commands::plumbing::cat_file::CatFileMode;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "kit",
    version = "0.1.0",
    about = "A minimal content-addressed version control engine",
    long_about = "kit stores file snapshots in a content-addressed object store, \
    stages them in an index and links them into a linear commit history.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "KIT_WORK_TREE",
        help = "Root of the work tree (defaults to the current directory)"
    )]
    work_tree: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the .kit directory in the work tree or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stages files and, recursively, directories. \
        Paths are relative to the work tree root."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1.., help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged files as a new commit on the current branch."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the commit history of the current branch")]
    Log {
        #[arg(long, help = "Print each commit on a single line")]
        oneline: bool,
    },
    #[command(
        name = "status",
        about = "Show staged, unstaged and untracked changes"
    )]
    Status {
        #[arg(long, help = "Print machine-readable two-column codes")]
        porcelain: bool,
    },
    #[command(
        name = "branch",
        about = "List branches, or create one",
        long_about = "Without arguments this command lists all branches. With a name it creates \
        a branch pointing at the commit of the source branch (the current branch by default)."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
        #[arg(index = 2, requires = "name", help = "The branch to copy")]
        source: Option<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content or type of an object",
        group(ArgGroup::new("mode").required(true).args(["pretty", "object_type"]))
    )]
    CatFile {
        #[arg(short = 'p', value_name = "SHA", help = "Print the object payload")]
        pretty: Option<String>,
        #[arg(short = 't', value_name = "SHA", help = "Print the object type")]
        object_type: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "ls-tree", about = "List the files of a tree or commit")]
    LsTree {
        #[arg(index = 1, default_value = "HEAD", help = "Tree or commit hash, or HEAD")]
        tree: String,
    },
}

fn open_repository(work_tree: &Path) -> Result<Repository> {
    Repository::open(work_tree, Box::new(std::io::stdout()))
}

fn main() -> Result<ExitCode> {
    kit::logging::init();
    let cli = Cli::parse();

    let work_tree = match cli.work_tree {
        Some(work_tree) => work_tree,
        None => std::env::current_dir()?,
    };

    match &cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => work_tree.join(path),
                None => work_tree,
            };

            Repository::new(&path, Box::new(std::io::stdout()))?.init()?
        }
        Commands::Add { paths } => {
            let report = open_repository(&work_tree)?.add(paths)?;

            for (path, err) in &report.failed {
                eprintln!("error: failed to add {}: {:#}", path, err);
            }
            if !report.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Commit { message } => {
            open_repository(&work_tree)?.commit(message)?;
        }
        Commands::Log { oneline } => open_repository(&work_tree)?.log(*oneline)?,
        Commands::Status { porcelain } => {
            open_repository(&work_tree)?.status(*porcelain)?;
        }
        Commands::Branch { name, source } => {
            let repository = open_repository(&work_tree)?;

            match name {
                Some(name) => {
                    repository.branch(name, source.as_deref())?;
                }
                None => {
                    repository.list_branches()?;
                }
            }
        }
        Commands::CatFile {
            pretty,
            object_type,
        } => {
            let (sha, mode) = match (pretty, object_type) {
                (Some(sha), _) => (sha, CatFileMode::Pretty),
                (None, Some(sha)) => (sha, CatFileMode::Type),
                (None, None) => unreachable!("clap requires one of -p or -t"),
            };

            open_repository(&work_tree)?.cat_file(sha, mode)?
        }
        Commands::HashObject { write, file } => {
            open_repository(&work_tree)?.hash_object(file, *write)?;
        }
        Commands::LsTree { tree } => open_repository(&work_tree)?.ls_tree(tree)?,
    }

    Ok(ExitCode::SUCCESS)
}
