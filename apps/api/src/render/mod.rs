//! PDF rendering. Compiles a LaTeX document with an external `pdflatex`.
//!
//! Each compile runs in its own temp directory that is removed when the call
//! returns. Success is judged by whether `resume.pdf` appeared, not by exit code:
//! `pdflatex` in nonstop mode exits non-zero on recoverable warnings too.

pub mod handlers;

use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;

use bytes::Bytes;
use regex::Regex;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

const COMPILE_TIMEOUT: Duration = Duration::from_secs(30);
const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(5);
const TEX_FILE: &str = "resume.tex";
const PDF_FILE: &str = "resume.pdf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0} is not installed. Install a LaTeX distribution (TeX Live, MiKTeX)")]
    ToolMissing(String),

    #[error("I/O error during compilation: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF compilation timed out (>{}s)", COMPILE_TIMEOUT.as_secs())]
    Timeout,

    #[error("PDF compilation failed: {0}")]
    Compilation(String),
}

/// Patterns tried in order against the combined compiler output; first match wins.
static ERROR_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?m)^! (.+)").expect("tex error pattern is valid"),
        Regex::new(r"Error: (.+)").expect("error line pattern is valid"),
        Regex::new(r"Fatal error (.+)").expect("fatal error pattern is valid"),
    ]
});

#[derive(Debug, Clone)]
pub struct PdfCompiler {
    bin: String,
}

impl PdfCompiler {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// True when `<bin> --version` runs and exits zero within five seconds.
    pub async fn is_available(&self) -> bool {
        let probe = Command::new(&self.bin)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();
        matches!(
            tokio::time::timeout(VERSION_CHECK_TIMEOUT, probe).await,
            Ok(Ok(status)) if status.success()
        )
    }

    pub async fn compile(&self, latex: &str) -> Result<Bytes, RenderError> {
        let workdir = tempfile::tempdir()?;
        let tex_path = workdir.path().join(TEX_FILE);
        tokio::fs::write(&tex_path, latex).await?;

        debug!("Compiling {} with {}", tex_path.display(), self.bin);
        let run = Command::new(&self.bin)
            .arg("-interaction=nonstopmode")
            .arg("-output-directory")
            .arg(workdir.path())
            .arg(&tex_path)
            .current_dir(workdir.path())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(COMPILE_TIMEOUT, run).await {
            Err(_) => {
                warn!("pdflatex exceeded {}s, killed", COMPILE_TIMEOUT.as_secs());
                return Err(RenderError::Timeout);
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::ToolMissing(self.bin.clone()));
            }
            Ok(result) => result?,
        };

        let pdf_path = workdir.path().join(PDF_FILE);
        if !pdf_path.exists() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Compilation(parse_latex_error(&stdout, &stderr)));
        }

        let pdf = tokio::fs::read(&pdf_path).await?;
        info!("Compiled PDF: {} bytes", pdf.len());
        Ok(Bytes::from(pdf))
    }
}

/// Pulls the first meaningful error line out of compiler output.
pub fn parse_latex_error(stdout: &str, stderr: &str) -> String {
    let combined = format!("{stdout}\n{stderr}");

    let first = ERROR_PATTERNS
        .iter()
        .find_map(|re| re.captures(&combined))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());
    if let Some(message) = first {
        return message;
    }

    if combined.contains("Emergency stop") {
        "LaTeX encountered a critical error. Check your LaTeX syntax.".to_string()
    } else {
        "Unknown compilation error. Check LaTeX syntax and packages.".to_string()
    }
}
