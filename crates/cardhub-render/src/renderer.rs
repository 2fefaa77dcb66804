//! Headless-browser PDF rendering.
//!
//! The renderer writes the profile page to a scratch directory, spawns
//! the browser with `--print-to-pdf`, and races completion against a
//! wall-clock timeout. The child is killed on timeout and on drop.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info};

use cardhub_core::config::render::RenderConfig;
use cardhub_core::error::{AppError, ErrorKind};
use cardhub_core::result::AppResult;
use cardhub_entity::client::Client;

use crate::template::render_profile_html;

/// Renders a client profile to PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render_pdf(&self, client: &Client, public_url: &str) -> AppResult<Bytes>;
}

/// [`PdfRenderer`] backed by a Chromium-family headless browser.
pub struct ChromiumRenderer {
    config: RenderConfig,
}

impl ChromiumRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    async fn print_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> AppResult<()> {
        let html_arg = format!("file://{}", html_path.display());
        let pdf_arg = format!("--print-to-pdf={}", pdf_path.display());

        let mut cmd = tokio::process::Command::new(&self.config.browser_path);
        cmd.args([
            "--headless",
            "--disable-gpu",
            "--no-sandbox",
            "--no-pdf-header-footer",
            &pdf_arg,
            &html_arg,
        ])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::piped())
        .stdin(std::process::Stdio::null())
        .kill_on_drop(true);

        debug!(
            browser = %self.config.browser_path,
            output = %pdf_path.display(),
            timeout_s = self.config.timeout_seconds,
            "Spawning browser print job"
        );

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|e| {
            AppError::with_source(
                ErrorKind::Render,
                format!("Failed to spawn browser: {}", self.config.browser_path),
                e,
            )
        })?;

        let stderr = child.stderr.take();
        let timeout = Duration::from_secs(self.config.timeout_seconds);

        tokio::select! {
            result = child.wait() => {
                let status = result.map_err(|e| {
                    AppError::with_source(ErrorKind::Render, "Browser process wait failed", e)
                })?;
                let elapsed = start.elapsed();

                let stderr_str = if let Some(mut err) = stderr {
                    let mut buf = Vec::new();
                    let _ = err.read_to_end(&mut buf).await;
                    String::from_utf8_lossy(&buf).to_string()
                } else {
                    String::new()
                };

                if status.success() {
                    info!(elapsed_ms = elapsed.as_millis() as u64, "Browser print completed");
                    Ok(())
                } else {
                    let code = status.code().unwrap_or(-1);
                    error!(code, stderr = %stderr_str, "Browser print failed");
                    Err(AppError::render(format!("Browser exited with code {code}")))
                }
            }
            _ = tokio::time::sleep(timeout) => {
                error!(timeout_s = self.config.timeout_seconds, "Browser print timed out, killing");
                let _ = child.kill().await;
                Err(AppError::render(format!(
                    "PDF render timed out after {}s",
                    self.config.timeout_seconds
                )))
            }
        }
    }

    fn validate_output(&self, data: &[u8]) -> AppResult<()> {
        if (data.len() as u64) < self.config.min_output_bytes {
            return Err(AppError::render(format!(
                "Render output too small: {} bytes",
                data.len()
            )));
        }
        if !data.starts_with(b"%PDF") {
            return Err(AppError::render("Render output is not a PDF"));
        }
        Ok(())
    }
}

#[async_trait]
impl PdfRenderer for ChromiumRenderer {
    async fn render_pdf(&self, client: &Client, public_url: &str) -> AppResult<Bytes> {
        let scratch = tempfile::tempdir().map_err(|e| {
            AppError::with_source(ErrorKind::Render, "Failed to create render scratch dir", e)
        })?;

        let html_path = scratch.path().join("profile.html");
        let pdf_path = scratch.path().join("profile.pdf");

        let html = render_profile_html(client, public_url);
        tokio::fs::write(&html_path, html).await.map_err(|e| {
            AppError::with_source(ErrorKind::Render, "Failed to write profile page", e)
        })?;

        self.print_to_pdf(&html_path, &pdf_path).await?;

        let data = tokio::fs::read(&pdf_path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Render, "Browser produced no output file", e)
        })?;
        self.validate_output(&data)?;

        Ok(Bytes::from(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> ChromiumRenderer {
        ChromiumRenderer::new(RenderConfig {
            min_output_bytes: 64,
            ..RenderConfig::default()
        })
    }

    #[test]
    fn undersized_output_is_rejected() {
        let err = renderer().validate_output(b"%PDF-1.4").expect_err("too small");
        assert_eq!(err.kind, ErrorKind::Render);
    }

    #[test]
    fn non_pdf_output_is_rejected() {
        let data = vec![0u8; 128];
        let err = renderer().validate_output(&data).expect_err("not a pdf");
        assert_eq!(err.kind, ErrorKind::Render);
    }

    #[test]
    fn valid_pdf_header_passes() {
        let mut data = b"%PDF-1.7\n".to_vec();
        data.resize(128, b' ');
        assert!(renderer().validate_output(&data).is_ok());
    }

    #[tokio::test]
    async fn missing_browser_binary_is_a_render_error() {
        let r = ChromiumRenderer::new(RenderConfig {
            browser_path: "/nonexistent/browser".into(),
            ..RenderConfig::default()
        });
        let err = r
            .print_to_pdf(Path::new("/tmp/in.html"), Path::new("/tmp/out.pdf"))
            .await
            .expect_err("spawn must fail");
        assert_eq!(err.kind, ErrorKind::Render);
    }
}
