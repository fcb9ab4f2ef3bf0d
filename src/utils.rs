use std::process::Stdio;
use async_trait::async_trait;
use log::info;
use crate::errors::{AppError, Result};

/// Captured result of an external command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Runs commands on the tokio runtime without a shell.
///
/// Both pipes are drained concurrently before the exit status is collected. Dropping the
/// future kills the child.
pub struct TokioCommandRunner;

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AppError::Acquisition(format!("Failed to start {}: {}", program, e)))?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Letters with an upper/lower case distinction; CJK ideographs and digits are not cased.
fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || c.to_lowercase().ne(std::iter::once(c)) || c.to_uppercase().ne(std::iter::once(c))
}

/// Upper-cases the first cased letter of every word and lower-cases the rest.
///
/// Any uncased character starts a new word, so "don't" becomes "Don'T" and "日本abc" becomes "日本Abc".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if is_cased(c) {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Creates a directory if it doesn't exist
pub async fn ensure_dir_exists(path: &std::path::Path) -> Result<()> {
    if !tokio::fs::try_exists(path).await? {
        tokio::fs::create_dir_all(path).await?;
        info!("Created directory: {:?}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("some song"), "Some Song");
        assert_eq!(title_case("HELLO wORLD"), "Hello World");
        assert_eq!(title_case("don't stop"), "Don'T Stop");
        assert_eq!(title_case("2pac - changes"), "2Pac - Changes");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_treats_uncased_letters_as_boundaries() {
        assert_eq!(title_case("日本abc"), "日本Abc");
        assert_eq!(title_case("東京 night drive"), "東京 Night Drive");
        assert_eq!(title_case("ÉTÉ indien"), "Été Indien");
    }

    #[tokio::test]
    async fn ensure_dir_exists_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir_exists(&nested).await.unwrap();
        assert!(nested.is_dir());
        ensure_dir_exists(&nested).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runner_captures_both_streams() {
        let output = TokioCommandRunner
            .run("sh", &["-c".to_string(), "echo out; echo err >&2".to_string()])
            .await
            .unwrap();
        assert_eq!(output.status, Some(0));
        assert_eq!(output.stdout_text().trim(), "out");
        assert_eq!(output.stderr_text(), "err");
    }

    #[tokio::test]
    async fn runner_reports_missing_program() {
        let err = TokioCommandRunner
            .run("/nonexistent/program", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Acquisition(_)));
    }
}
