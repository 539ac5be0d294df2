// WHY: Adapter for the external LexML Linker, the high-precision detector
// Runs the tool as a subprocess and maps its decorated HTML back onto byte spans of the input

use std::process::Stdio;
use std::time::{Duration, Instant};

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::suspect::{DetectorType, IdentifiedCitation, Span, Suspect};

/// Class token marking the anchors the linker adds around citations
const LINKER_ANCHOR_CLASS: &str = "lexmlurnlink";

#[derive(Debug, Error)]
pub enum LinkerError {
    #[error("linker execution failed: {0}")]
    Execution(String),
    #[error("linker output could not be mapped: {0}")]
    Parsing(String),
    #[error("unsupported linker output format: {0}")]
    UnsupportedFormat(String),
}

/// How to invoke the linker for one call
#[derive(Debug, Clone, PartialEq)]
pub struct LinkerOptions {
    /// Program followed by its fixed arguments
    pub command: Vec<String>,
    pub context: String,
    /// `html` or `xml`
    pub output_format: String,
    /// `None` waits forever
    pub timeout: Option<Duration>,
    pub extra_args: Vec<String>,
}

impl LinkerOptions {
    pub fn new(command: Vec<String>, context: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            command,
            context: context.into(),
            output_format: "html".to_string(),
            timeout,
            extra_args: Vec::new(),
        }
    }
}

/// Full argument vector: `command + ["--text", <format flag>, "--contexto=<context>"] + extra`
pub fn build_linker_args(
    command: &[String],
    output_format: &str,
    context: &str,
    extra_args: &[String],
) -> Result<Vec<String>, LinkerError> {
    let flag = match output_format.to_ascii_lowercase().as_str() {
        "html" => "--html",
        "xml" => "--xml",
        _ => return Err(LinkerError::UnsupportedFormat(output_format.to_string())),
    };

    let mut args = command.to_vec();
    args.push("--text".to_string());
    args.push(flag.to_string());
    args.push(format!("--contexto={}", context));
    args.extend(extra_args.iter().cloned());
    Ok(args)
}

/// Run the linker on `text` and return its decorated output
async fn run_linker_process(text: &str, options: &LinkerOptions) -> Result<String, LinkerError> {
    let args = build_linker_args(
        &options.command,
        &options.output_format,
        &options.context,
        &options.extra_args,
    )?;
    let (program, rest) = args
        .split_first()
        .ok_or_else(|| LinkerError::Execution("empty linker command".to_string()))?;

    info!("Running linker: {} {}", program, rest.iter().take(2).cloned().collect::<Vec<_>>().join(" "));

    let mut command = Command::new(program);
    command
        .args(rest)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LinkerError::Execution(format!("linker command not found: {}", program))
        } else {
            LinkerError::Execution(format!("failed to start linker: {}", e))
        }
    })?;

    // feed stdin concurrently so a chatty child cannot fill its stdout pipe and stall
    let writer = child.stdin.take().map(|mut stdin| {
        let input = text.as_bytes().to_vec();
        tokio::spawn(async move {
            let result = stdin.write_all(&input).await;
            drop(stdin);
            result
        })
    });

    let started = Instant::now();
    let output = match options.timeout {
        Some(limit) => timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| LinkerError::Execution(format!("linker timed out after {:.3}s", limit.as_secs_f64())))?,
        None => child.wait_with_output().await,
    }
    .map_err(|e| LinkerError::Execution(format!("failed to wait for linker: {}", e)))?;

    if let Some(writer) = writer {
        match writer.await {
            Ok(Ok(())) => {}
            // the child may exit without draining its input
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                debug!("Linker closed stdin early");
            }
            Ok(Err(e)) => return Err(LinkerError::Execution(format!("failed to write linker input: {}", e))),
            Err(e) => return Err(LinkerError::Execution(format!("linker input task failed: {}", e))),
        }
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let code = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        return Err(LinkerError::Execution(format!(
            "linker exited with code {}: {}",
            code,
            stderr.trim()
        )));
    }

    info!(
        "Linker finished in {:.3}s ({} bytes)",
        started.elapsed().as_secs_f64(),
        output.stdout.len()
    );

    String::from_utf8(output.stdout)
        .map_err(|e| LinkerError::Parsing(format!("linker output is not UTF-8: {}", e)))
}

fn has_linker_class(start: &BytesStart<'_>) -> bool {
    start
        .attributes()
        .with_checks(false)
        .flatten()
        .filter(|attr| attr.key.as_ref().eq_ignore_ascii_case(b"class"))
        .any(|attr| {
            String::from_utf8_lossy(&attr.value)
                .split_whitespace()
                .any(|token| token == LINKER_ANCHOR_CLASS)
        })
}

fn is_anchor(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"a")
}

/// Forward-only alignment of decorated text segments onto the original
struct Aligner<'a> {
    original: &'a str,
    cursor: usize,
}

impl<'a> Aligner<'a> {
    fn align(&mut self, segment: &str) -> Result<Span, LinkerError> {
        let tail = self.original.get(self.cursor..).unwrap_or("");
        let start = if tail.starts_with(segment) {
            self.cursor
        } else {
            let offset = tail.find(segment).ok_or_else(|| {
                LinkerError::Parsing("could not align decorated segment with original text".to_string())
            })?;
            self.cursor + offset
        };
        self.cursor = start + segment.len();
        Ok(Span::new(start, self.cursor))
    }
}

/// Spans of the linker anchors in `decorated`, in closing order
///
/// Every text node is aligned onto `original`; an anchor spans from its first
/// segment start to its last segment end. Anchors without text are ignored.
pub fn parse_linker_html(original: &str, decorated: &str) -> Result<Vec<Span>, LinkerError> {
    let mut reader = Reader::from_str(decorated);
    {
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
    }

    let mut aligner = Aligner { original, cursor: 0 };
    // one entry per open anchor: `Some` for linker anchors, `None` for unrelated ones
    let mut anchors: Vec<Option<Vec<Span>>> = Vec::new();
    let mut references = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) if is_anchor(start.name().as_ref()) => {
                anchors.push(has_linker_class(&start).then(Vec::new));
            }
            Ok(Event::Text(text)) => {
                // named HTML entities (`&eacute;`, `&nbsp;`) as well as XML ones
                let segment = match text.unescape_with(resolve_html5_entity) {
                    Ok(unescaped) => unescaped.into_owned(),
                    Err(_) => String::from_utf8_lossy(&text).into_owned(),
                };
                if segment.is_empty() {
                    continue;
                }
                let span = aligner.align(&segment)?;
                if let Some(Some(segments)) = anchors.iter_mut().rev().find(|a| a.is_some()) {
                    segments.push(span);
                }
            }
            Ok(Event::End(end)) if is_anchor(end.name().as_ref()) => {
                if let Some(Some(segments)) = anchors.pop() {
                    if let (Some(first), Some(last)) = (segments.first(), segments.last()) {
                        references.push(Span::new(first.start, last.end));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(LinkerError::Parsing(format!(
                    "malformed linker output at byte {}: {}",
                    reader.error_position(),
                    e
                )))
            }
        }
    }

    if aligner.cursor > original.len() {
        return Err(LinkerError::Parsing(
            "decorated output diverges from original text".to_string(),
        ));
    }
    if anchors.iter().any(Option::is_some) {
        return Err(LinkerError::Parsing("unbalanced <a> tags in linker output".to_string()));
    }

    Ok(references)
}

/// Linker suspects of `text`, each carrying one enrichment record
pub async fn run_linker(text: &str, options: &LinkerOptions) -> Result<Vec<Suspect>, LinkerError> {
    let decorated = run_linker_process(text, options).await?;
    let spans = parse_linker_html(text, &decorated)?;

    let suspects: Vec<Suspect> = spans
        .into_iter()
        .map(|span| {
            let mut suspect = Suspect::from_text(text, span, DetectorType::Linker);
            let literal = suspect.suspect_string.clone();
            suspect.identified_citations.push(IdentifiedCitation {
                identified_string: literal.clone(),
                formatted_name: literal,
                citation_type: "unknown".to_string(),
                confidence: 1.0,
                justification: "linker".to_string(),
            });
            suspect
        })
        .collect();

    if suspects.is_empty() {
        warn!("Linker returned no citations");
    } else {
        debug!("Linker mapped {} citations", suspects.len());
    }
    Ok(suspects)
}
