use std::sync::Arc;
use async_trait::async_trait;
use super::{AcquireRequest, AcquisitionStrategy};
use crate::errors::{AppError, Result};
use crate::utils::CommandRunner;

/// Asks yt-dlp for a signed, directly playable URL without storing anything.
pub struct DirectUrlStrategy {
    runner: Arc<dyn CommandRunner>,
    ytdlp_path: String,
}

impl DirectUrlStrategy {
    pub fn new(runner: Arc<dyn CommandRunner>, ytdlp_path: String) -> Self {
        Self { runner, ytdlp_path }
    }

    pub fn format_code(video: bool) -> &'static str {
        if video {
            "b"
        } else {
            "bestaudio/best"
        }
    }

    pub fn build_args(request: &AcquireRequest) -> Vec<String> {
        let mut args = vec![
            "-g".to_string(),
            "-f".to_string(),
            Self::format_code(request.video).to_string(),
        ];
        if let Some(cookies) = &request.cookie_file {
            args.push("--cookies".to_string());
            args.push(cookies.to_string_lossy().to_string());
        }
        args.push(request.url.clone());
        args
    }
}

#[async_trait]
impl AcquisitionStrategy for DirectUrlStrategy {
    async fn acquire(&self, request: &AcquireRequest) -> Result<String> {
        log::info!("🔗 [DIRECT] Resolving stream URL for {}", request.url);
        let output = self.runner.run(&self.ytdlp_path, &Self::build_args(request)).await?;

        // Video requests may print separate video and audio URLs; the first one plays.
        let stdout = output.stdout_text();
        match stdout.split_whitespace().next() {
            Some(url) => {
                log::debug!("[DIRECT] Resolved {} -> {}", request.url, url);
                Ok(url.to_string())
            }
            None => {
                let stderr = output.stderr_text();
                log::error!("❌ [DIRECT] No URL for {}: {}", request.url, stderr);
                Err(AppError::Acquisition(format!("Failed to get file path: {}", stderr)))
            }
        }
    }

    fn get_name(&self) -> &str {
        "direct-url"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::CommandOutput;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct ScriptedRunner {
        output: CommandOutput,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl ScriptedRunner {
        fn new(stdout: &str, stderr: &str) -> Self {
            Self {
                output: CommandOutput {
                    status: Some(if stdout.is_empty() { 1 } else { 0 }),
                    stdout: stdout.as_bytes().to_vec(),
                    stderr: stderr.as_bytes().to_vec(),
                },
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
            self.calls.lock().unwrap().push((program.to_string(), args.to_vec()));
            Ok(self.output.clone())
        }
    }

    fn request(video: bool, cookies: Option<&str>) -> AcquireRequest {
        AcquireRequest {
            url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            video,
            cookie_file: cookies.map(PathBuf::from),
        }
    }

    #[test]
    fn args_select_format_and_cookies() {
        let args = DirectUrlStrategy::build_args(&request(true, Some("cookies/x.txt")));
        assert_eq!(
            args,
            vec!["-g", "-f", "b", "--cookies", "cookies/x.txt", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"]
        );

        let args = DirectUrlStrategy::build_args(&request(false, None));
        assert_eq!(args, vec!["-g", "-f", "bestaudio/best", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"]);
    }

    #[tokio::test]
    async fn first_token_of_stdout_is_the_url() {
        let runner = Arc::new(ScriptedRunner::new(
            "https://rr1.googlevideo.com/videoplayback?a=1\nhttps://rr1.googlevideo.com/videoplayback?a=2\n",
            "",
        ));
        let strategy = DirectUrlStrategy::new(runner.clone(), "yt-dlp".to_string());

        let url = strategy.acquire(&request(true, None)).await.unwrap();
        assert_eq!(url, "https://rr1.googlevideo.com/videoplayback?a=1");

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "yt-dlp");
    }

    #[tokio::test]
    async fn empty_stdout_carries_stderr() {
        let runner = Arc::new(ScriptedRunner::new("  \n", "ERROR: Sign in to confirm you're not a bot\n"));
        let strategy = DirectUrlStrategy::new(runner, "yt-dlp".to_string());

        match strategy.acquire(&request(false, None)).await {
            Err(AppError::Acquisition(msg)) => {
                assert!(msg.contains("Sign in to confirm you're not a bot"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
