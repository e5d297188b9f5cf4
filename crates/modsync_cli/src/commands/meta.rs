//! Shell completions and man pages for the `modsync` binary.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

use crate::Cli;

const BIN_NAME: &str = "modsync";
const MAN_SECTION: &str = "1";

fn completion_script(shell: clap_complete::Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut out = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut out);
    out
}

/// Write the completion script for `shell` into `dir`, returning its path.
fn write_completion(shell: clap_complete::Shell, dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let mut cmd = Cli::command();
    clap_complete::generate_to(shell, &mut cmd, BIN_NAME, dir)
}

fn render_man(man: clap_mangen::Man) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    man.render(&mut out)?;
    Ok(out)
}

fn main_man_page() -> std::io::Result<Vec<u8>> {
    render_man(clap_mangen::Man::new(Cli::command()))
}

/// Render `modsync.1` and one `modsync-<subcommand>.1` per visible
/// subcommand into `dir`.
fn write_man_pages(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let cmd = Cli::command();
    let mut pages = vec![(BIN_NAME.to_string(), main_man_page()?)];
    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        let title = format!("{BIN_NAME}-{}", sub.get_name());
        let man = clap_mangen::Man::new(sub.clone())
            .title(title.clone())
            .section(MAN_SECTION);
        pages.push((title, render_man(man)?));
    }

    let mut written = Vec::with_capacity(pages.len());
    for (title, page) in pages {
        let path = dir.join(format!("{title}.{MAN_SECTION}"));
        std::fs::write(&path, page)?;
        written.push(path);
    }
    Ok(written)
}

pub(crate) fn handle_completions(
    shell: clap_complete::Shell,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(dir) => {
            let path = write_completion(shell, &dir)?;
            tracing::info!(shell = %shell, path = %path.display(), "Wrote completions");
        }
        None => std::io::stdout().write_all(&completion_script(shell))?,
    }
    Ok(())
}

pub(crate) fn handle_man(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(dir) => {
            let written = write_man_pages(&dir)?;
            tracing::info!(count = written.len(), dir = %dir.display(), "Wrote man pages");
        }
        None => std::io::stdout().write_all(&main_man_page()?)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_script_covers_fetch_flags() {
        let script = completion_script(clap_complete::Shell::Bash);
        let script = String::from_utf8(script).expect("completion output should be UTF-8");
        assert!(script.contains("fetch"));
        assert!(script.contains("--repo"));
        assert!(script.contains("--cache-dir"));
    }

    #[test]
    fn write_completion_creates_script_in_directory() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let out = dir.path().join("completions");

        let path = write_completion(clap_complete::Shell::Zsh, &out)
            .expect("completion generation should succeed");

        assert!(path.starts_with(&out));
        let script = std::fs::read_to_string(&path).expect("script should be readable");
        assert!(script.contains(BIN_NAME));
    }

    #[test]
    fn main_man_page_is_titled_after_binary() {
        let page = main_man_page().expect("man rendering should succeed");
        let page = String::from_utf8(page).expect("man output should be UTF-8");
        assert!(page.to_lowercase().contains(".th modsync"));
    }

    #[test]
    fn write_man_pages_emits_one_page_per_subcommand() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let out = dir.path().join("man");

        let written = write_man_pages(&out).expect("man page generation should succeed");

        let names: Vec<String> = written
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            ["modsync.1", "modsync-fetch.1", "modsync-completions.1", "modsync-man.1"]
        );

        let fetch = std::fs::read_to_string(out.join("modsync-fetch.1"))
            .expect("fetch page should be readable");
        assert!(fetch.to_lowercase().contains(".th modsync-fetch"));
        assert!(fetch.contains("repo"));
    }
}
