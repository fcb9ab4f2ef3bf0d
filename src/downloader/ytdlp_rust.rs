use std::process::{Command, Stdio};
use crate::downloader::{ExtractOptions, ExtractionEngine, ProbeInfo};
use crate::errors::{AppError, Result};

/// Extraction engine backed by the yt-dlp binary.
pub struct YtDlpEngine {
    ytdlp_path: String,
}

impl YtDlpEngine {
    pub fn new() -> Self {
        Self {
            ytdlp_path: "yt-dlp".to_string(),
        }
    }

    pub fn with_ytdlp_path(mut self, path: String) -> Self {
        self.ytdlp_path = path;
        self
    }

    fn probe_args(url: &str, options: &ExtractOptions) -> Vec<String> {
        let mut args = vec![
            "--dump-json".to_string(),
            "--skip-download".to_string(),
            "--format".to_string(),
            options.format.clone(),
            "--output".to_string(),
            options.output_template.clone(),
        ];
        if options.no_playlist {
            args.push("--no-playlist".to_string());
        }
        if options.geo_bypass {
            args.push("--geo-bypass".to_string());
        }
        if options.no_check_certificate {
            args.push("--no-check-certificate".to_string());
        }
        if options.no_warnings {
            args.push("--no-warnings".to_string());
        }
        if let Some(cookies) = &options.cookie_file {
            args.push("--cookies".to_string());
            args.push(cookies.to_string_lossy().to_string());
        }
        args.push(url.to_string());
        args
    }

    fn fetch_args(url: &str, options: &ExtractOptions) -> Vec<String> {
        let mut args = options.to_args();
        args.push(url.to_string());
        args
    }

    fn run(&self, args: &[String]) -> Result<Vec<u8>> {
        let cmd = Command::new(&self.ytdlp_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AppError::Acquisition(format!("Failed to start {}: {}", self.ytdlp_path, e)))?;

        let output = cmd.wait_with_output()?;
        log::debug!("📊 [EXTRACT] yt-dlp exit status: {}", output.status);

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Acquisition(format!("yt-dlp failed: {}", error.trim())));
        }
        Ok(output.stdout)
    }
}

impl Default for YtDlpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionEngine for YtDlpEngine {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    fn probe(&self, url: &str, options: &ExtractOptions) -> Result<ProbeInfo> {
        log::info!("🔍 [EXTRACT] Probing metadata for URL: {}", url);
        let stdout = self.run(&Self::probe_args(url, options))?;

        // One JSON document per line; a single video yields one line.
        let json_output = String::from_utf8_lossy(&stdout);
        let first = json_output
            .lines()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| AppError::Acquisition("yt-dlp returned no metadata".to_string()))?;

        let info: ProbeInfo = serde_json::from_str(first)
            .map_err(|e| AppError::Acquisition(format!("Invalid yt-dlp metadata: {}", e)))?;
        log::info!("✅ [EXTRACT] Probed {} ({})", info.id, info.ext);
        Ok(info)
    }

    fn fetch(&self, url: &str, options: &ExtractOptions) -> Result<()> {
        log::info!("⬇️ [EXTRACT] Fetching {} into {}", url, options.output_template);
        self.run(&Self::fetch_args(url, options))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn probe_args_skip_download_and_end_with_url() {
        let options = ExtractOptions::for_download(false, Path::new("downloads"), 3, Some(PathBuf::from("c.txt")));
        let args = YtDlpEngine::probe_args("https://youtu.be/dQw4w9WgXcQ", &options);
        assert_eq!(args[0], "--dump-json");
        assert!(args.contains(&"--skip-download".to_string()));
        assert!(args.contains(&"--cookies".to_string()));
        assert_eq!(args.last().unwrap(), "https://youtu.be/dQw4w9WgXcQ");
    }

    #[test]
    fn fetch_args_carry_output_template() {
        let options = ExtractOptions::for_download(true, Path::new("downloads"), 3, None);
        let args = YtDlpEngine::fetch_args("https://youtu.be/dQw4w9WgXcQ", &options);
        let pos = args.iter().position(|a| a == "--output").unwrap();
        assert_eq!(args[pos + 1], "downloads/%(id)s.%(ext)s");
        assert!(!args.contains(&"--cookies".to_string()));
    }

    #[test]
    fn missing_binary_is_an_acquisition_error() {
        let engine = YtDlpEngine::new().with_ytdlp_path("/nonexistent/yt-dlp-binary".to_string());
        let options = ExtractOptions::for_download(false, Path::new("downloads"), 1, None);
        let err = engine.probe("https://youtu.be/dQw4w9WgXcQ", &options).unwrap_err();
        assert!(matches!(err, AppError::Acquisition(_)));
    }
}
