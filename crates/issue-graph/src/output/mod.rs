//! Graph emitter.
//!
//! Wraps discovered statements in a `digraph { ... }` envelope and hands the
//! result to one of several backends: plain text on stdout, JSON on stdout,
//! a remote charting service, or a local Graphviz executable.

use crate::error::{Error, Result};
use crate::graph::GraphStatement;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// A complete graph description
#[derive(Debug, Clone, Serialize)]
pub struct DotDocument {
    /// Graphviz shape applied to every node
    pub node_shape: String,
    /// Statements in emission order
    pub statements: Vec<GraphStatement>,
}

impl DotDocument {
    /// Create a document
    pub fn new(node_shape: impl Into<String>, statements: Vec<GraphStatement>) -> Self {
        Self {
            node_shape: node_shape.into(),
            statements,
        }
    }

    fn joined(&self, separator: &str) -> String {
        self.statements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Multi-line text for reading or piping into Graphviz
    pub fn to_pretty(&self) -> String {
        format!(
            "digraph{{\nnode [shape={}];\n\n{}\n}}",
            self.node_shape,
            self.joined(";\n")
        )
    }

    /// Single-line text for submission to the charting service
    pub fn to_compact(&self) -> String {
        format!(
            "digraph{{node [shape={}];{}}}",
            self.node_shape,
            self.joined(";")
        )
    }
}

/// Where the graph ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Print the Graphviz text
    Stdout,

    /// Print the statements as JSON
    Json,

    /// Render through a remote charting service
    Chart {
        /// Service endpoint
        url: String,
        /// Image file to write
        file: PathBuf,
    },

    /// Render through a local Graphviz executable
    Dot {
        /// Executable name or path
        program: String,
        /// Output format passed as `-T<format>`
        format: String,
        /// Image file to write
        file: PathBuf,
    },
}

/// Emit a document to the given target.
///
/// # Errors
///
/// Returns `Error::Render` when the charting service or the Graphviz process
/// reports a failure, and `Error::Io`/`Error::Http` for transport problems.
pub async fn emit(document: &DotDocument, target: &RenderTarget) -> Result<()> {
    match target {
        RenderTarget::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_text(&mut handle, document)?;
        }
        RenderTarget::Json => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_json(&mut handle, document)?;
        }
        RenderTarget::Chart { url, file } => {
            render_chart(document, url, file).await?;
            report_written(file);
        }
        RenderTarget::Dot {
            program,
            format,
            file,
        } => {
            render_dot(document, program, format, file).await?;
            report_written(file);
        }
    }
    Ok(())
}

/// Write the pretty Graphviz text followed by a newline
pub fn write_text<W: Write>(w: &mut W, document: &DotDocument) -> io::Result<()> {
    writeln!(w, "{}", document.to_pretty())
}

/// Write the document as pretty JSON followed by a newline
pub fn write_json<W: Write>(w: &mut W, document: &DotDocument) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, document)?;
    writeln!(w)?;
    Ok(())
}

fn report_written(file: &Path) {
    println!("{} {}", "Wrote".green(), file.display());
}

async fn render_chart(document: &DotDocument, url: &str, file: &Path) -> Result<()> {
    tracing::info!("Rendering through {url}");
    let graph = document.to_compact();
    let response = reqwest::Client::new()
        .post(url)
        .form(&[("cht", "gv"), ("chl", graph.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Render(format!(
            "chart service at {url} returned {status}"
        )));
    }

    let image = response.bytes().await?;
    tokio::fs::write(file, &image).await?;
    Ok(())
}

async fn render_dot(document: &DotDocument, program: &str, format: &str, file: &Path) -> Result<()> {
    tracing::info!("Rendering with {program} -T{format}");
    let mut child = Command::new(program)
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(file)
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Render(format!("failed to start {program}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(document.to_pretty().as_bytes()).await?;
        stdin.shutdown().await?;
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(Error::Render(format!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}
