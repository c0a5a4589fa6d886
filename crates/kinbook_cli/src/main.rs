//! Interactive session binary.
//!
//! # Responsibility
//! - Resolve data and log locations, open the database, and load the stored
//!   directory.
//! - Run the read-eval-print session and persist the directory when it ends.
//!
//! # Invariants
//! - The session never terminates on bad input; every line gets a reply.
//! - The directory snapshot is saved on `close`, `exit`, and end of input.

use clap::Parser;
use directories::ProjectDirs;
use kinbook_core::{
    default_log_level, init_logging, open_db, respond, CommandOutcome, DirectoryRepository,
    RepoError, SqliteDirectoryRepository,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const DB_FILE_NAME: &str = "kinbook.db3";
const LOG_DIR_NAME: &str = "logs";

/// Personal contact directory with an interactive assistant session.
#[derive(Debug, Parser)]
#[command(name = "kinbook", version, about)]
struct Cli {
    /// Directory holding the database and logs; defaults to the platform data
    /// directory.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Database file path; defaults to `<data-dir>/kinbook.db3`.
    #[arg(long, value_name = "FILE")]
    db_file: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

/// Failure that ends a session before or after the command loop.
#[derive(Debug)]
enum SessionError {
    Repo(RepoError),
    Io(std::io::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "io failure during session: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<std::io::Error> for SessionError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

fn main() {
    if let Err(message) = run() {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir)?;
    std::fs::create_dir_all(&data_dir).map_err(|err| {
        format!(
            "failed to create data directory `{}`: {err}",
            data_dir.display()
        )
    })?;
    // Logging requires an absolute path; canonicalizing also resolves a
    // relative --data-dir.
    let data_dir = data_dir.canonicalize().map_err(|err| {
        format!(
            "failed to resolve data directory `{}`: {err}",
            data_dir.display()
        )
    })?;

    let log_dir = data_dir.join(LOG_DIR_NAME);
    let log_dir_str = log_dir
        .to_str()
        .ok_or_else(|| format!("log directory `{}` is not valid UTF-8", log_dir.display()))?;
    let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
    init_logging(level, log_dir_str)?;

    let db_path = cli.db_file.unwrap_or_else(|| data_dir.join(DB_FILE_NAME));
    let mut conn = open_db(&db_path).map_err(|err| format!("Exception is {err}"))?;
    let mut repo =
        SqliteDirectoryRepository::try_new(&mut conn).map_err(|err| format!("Exception is {err}"))?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_session(&mut repo, &mut input, &mut output).map_err(|err| format!("Exception is {err}"))
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf, String> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    ProjectDirs::from("", "", "kinbook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| "failed to determine a data directory; pass --data-dir".to_string())
}

/// Command loop over any repository and I/O pair.
///
/// Reads one line per iteration, prints the reply, and stops on an exit
/// command or end of input. The directory is saved exactly once, after the
/// loop ends.
fn run_session<R, I, O>(repo: &mut R, input: &mut I, output: &mut O) -> Result<(), SessionError>
where
    R: DirectoryRepository,
    I: BufRead,
    O: Write,
{
    let mut directory = repo.load()?;
    info!(
        "event=session_start module=cli status=ok contacts={}",
        directory.len()
    );

    writeln!(output, "Welcome to the assistant bot!")?;

    loop {
        write!(output, "Enter a command: ")?;
        output.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        if read == 0 {
            // End of input closes the session the same way `exit` does.
            writeln!(output)?;
            break;
        }

        match respond(line.trim_end(), &mut directory) {
            CommandOutcome::Reply(text) => {
                if !text.is_empty() {
                    writeln!(output, "{text}")?;
                }
            }
            CommandOutcome::Exit(farewell) => {
                writeln!(output, "{farewell}")?;
                break;
            }
        }
    }

    repo.save(&directory)?;
    info!(
        "event=session_end module=cli status=ok contacts={}",
        directory.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run_session;
    use kinbook_core::{Directory, DirectoryRepository, RepoResult};
    use std::io::Cursor;

    struct MemoryRepository {
        stored: Directory,
    }

    impl DirectoryRepository for MemoryRepository {
        fn load(&self) -> RepoResult<Directory> {
            Ok(self.stored.clone())
        }

        fn save(&mut self, directory: &Directory) -> RepoResult<()> {
            self.stored = directory.clone();
            Ok(())
        }
    }

    #[test]
    fn session_runs_commands_and_saves_on_exit() {
        let mut repo = MemoryRepository {
            stored: Directory::new(),
        };
        let mut input = Cursor::new("add Edd 1234567890\nphone Edd\nexit\n");
        let mut output = Vec::new();

        run_session(&mut repo, &mut input, &mut output).unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.starts_with("Welcome to the assistant bot!\n"));
        assert!(transcript.contains("Contact added.\n"));
        assert!(transcript.contains("Contact name: Edd, phones: 1234567890\n"));
        assert!(transcript.ends_with("Good bye!\n"));
        assert!(repo.stored.find("Edd").is_some());
    }

    #[test]
    fn session_saves_on_end_of_input() {
        let mut repo = MemoryRepository {
            stored: Directory::new(),
        };
        let mut input = Cursor::new("add Edd 1234567890\n");
        let mut output = Vec::new();

        run_session(&mut repo, &mut input, &mut output).unwrap();

        assert!(repo.stored.find("Edd").is_some());
    }

    #[test]
    fn session_replies_to_every_line_without_stopping() {
        let mut repo = MemoryRepository {
            stored: Directory::new(),
        };
        let mut input = Cursor::new("frobnicate\nadd Edd\nphone Ghost\nclose\n");
        let mut output = Vec::new();

        run_session(&mut repo, &mut input, &mut output).unwrap();

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Invalid command.\n"));
        assert!(transcript.contains("Give me name and phone please.\n"));
        assert!(transcript.contains("No such name found.\n"));
        assert!(transcript.ends_with("Good bye!\n"));
    }
}
