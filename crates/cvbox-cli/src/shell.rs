//! Interactive command loop.

use cvbox_core::CvId;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::controller::Controller;

pub const HELP: &str = "\
Commands:
  list                 reload and show all CVs
  upload PATH          upload a file
  download ID [DIR]    save a CV to DIR (default: current directory)
  delete ID            delete a CV
  seed                 add three sample CVs
  help                 show this help
  quit                 leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Upload(PathBuf),
    Download(CvId, PathBuf),
    Delete(CvId),
    Seed,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "upload" if !rest.is_empty() => ShellCommand::Upload(PathBuf::from(rest)),
        "download" if !rest.is_empty() => {
            let (id, dir) = match rest.split_once(char::is_whitespace) {
                Some((id, dir)) => (id, PathBuf::from(dir.trim())),
                None => (rest, PathBuf::from(".")),
            };
            ShellCommand::Download(CvId::from(id), dir)
        }
        "delete" | "rm" if !rest.is_empty() => ShellCommand::Delete(CvId::from(rest)),
        "seed" => ShellCommand::Seed,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        "upload" | "download" | "delete" | "rm" => {
            return Err(format!("{} needs an argument; type help", verb))
        }
        other => return Err(format!("Unknown command: {}; type help", other)),
    };
    Ok(Some(command))
}

/// Run the shell until `quit` or end of input, re-rendering after each action.
pub async fn run_shell<R, W>(controller: &mut Controller, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    controller.refresh().await;
    write!(out, "{}", controller.render())?;
    writeln!(out, "Type help for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };

        match command {
            ShellCommand::List => controller.refresh().await,
            ShellCommand::Upload(path) => {
                controller.upload_path(&path).await;
            }
            ShellCommand::Download(id, dir) => {
                if let Some(path) = controller.download(&id, &dir).await {
                    writeln!(out, "Saved {}", path.display())?;
                }
            }
            ShellCommand::Delete(id) => {
                controller.delete(&id).await;
            }
            ShellCommand::Seed => controller.add_samples().await,
            ShellCommand::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            ShellCommand::Quit => break,
        }

        write!(out, "{}", controller.render())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvbox_storage::LocalStore;
    use std::sync::Arc;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(parse_command("LIST").unwrap(), Some(ShellCommand::List));
        assert_eq!(
            parse_command("upload ./My CV.pdf").unwrap(),
            Some(ShellCommand::Upload(PathBuf::from("./My CV.pdf")))
        );
        assert_eq!(
            parse_command("download 3").unwrap(),
            Some(ShellCommand::Download(CvId::from(3), PathBuf::from(".")))
        );
        assert_eq!(
            parse_command("download 3 /tmp/out").unwrap(),
            Some(ShellCommand::Download(CvId::from(3), PathBuf::from("/tmp/out")))
        );
        assert_eq!(
            parse_command("rm cv-uploads/a.pdf").unwrap(),
            Some(ShellCommand::Delete(CvId::from("cv-uploads/a.pdf")))
        );
    }

    #[test]
    fn rejects_unknown_and_incomplete_commands() {
        assert!(parse_command("upload").unwrap_err().contains("needs an argument"));
        assert!(parse_command("frobnicate").unwrap_err().starts_with("Unknown command"));
    }

    #[tokio::test]
    async fn shell_session_seeds_and_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("cvbox.db")).await.unwrap();
        let mut controller = Controller::new(Arc::new(store));

        let input: &[u8] = b"seed\ndelete 1\nbogus\nquit\nlist\n";
        let mut out = Vec::new();
        run_shell(&mut controller, input, &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("No CVs uploaded yet."));
        assert!(out.contains("John-Doe-CV.txt"));
        assert!(out.contains("Unknown command: bogus"));
        assert_eq!(controller.items().len(), 2);
        assert!(controller.items().iter().all(|r| r.id.as_str() != "1"));
    }
}
