//! Conversion driver for the command line

use std::{fs, path::Path};

use anyhow::{Context, Result};
use danmaku_core::{
    parser::niconico::read_files, CommentFilter, ConversionReport, Converter,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::args::Cli;

/// Byte-order mark written at the start of output files
const BOM: char = '\u{FEFF}';

/// Read, convert and write everything the command line asks for
pub fn run(cli: &Cli) -> Result<ConversionReport> {
    let config = cli.stage_config();
    let filter = build_filter(cli)?;

    let documents = cli
        .files
        .iter()
        .map(|path| read_lossy(path))
        .collect::<Result<Vec<_>>>()?;
    let outcome = read_files(&documents, config.font_size).context("Failed to parse comments")?;
    if !outcome.issues.is_empty() {
        warn!("{} malformed comments skipped", outcome.issues.len());
    }
    info!("read {} comments from {} files", outcome.comments.len(), documents.len());

    let progress = match cli.output {
        Some(_) => progress_bar()?,
        None => ProgressBar::hidden(),
    };
    let hook = progress.clone();
    let mut script = String::new();
    let report = Converter::new(config)
        .with_filter(filter)
        .with_progress(move |done, total| {
            hook.set_length(total as u64);
            hook.set_position(done as u64);
        })
        .convert(&outcome.comments, &mut script)
        .context("Failed to convert comments")?;
    progress.finish_and_clear();

    match &cli.output {
        Some(path) => fs::write(path, to_file_text(&script))
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{script}"),
    }
    Ok(report)
}

fn build_filter(cli: &Cli) -> Result<CommentFilter> {
    let mut filter = CommentFilter::new(&cli.filter).context("Invalid --filter")?;
    if let Some(path) = &cli.filter_file {
        let lines = read_lossy(path)?;
        let from_file = CommentFilter::from_lines(&lines)
            .with_context(|| format!("Invalid pattern in {}", path.display()))?;
        filter = filter.merged(from_file);
    }
    Ok(filter)
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn progress_bar() -> Result<ProgressBar> {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>8}/{len:8} {msg}")?
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    bar.set_message("placing");
    Ok(bar)
}

/// Prefix a byte-order mark and switch to CRLF line endings
fn to_file_text(script: &str) -> String {
    let mut text = String::with_capacity(script.len() + script.len() / 16 + 3);
    text.push(BOM);
    text.push_str(&script.replace('\n', "\r\n"));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsStr;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    const XML: &str = r#"<packet>
<chat vpos="100" date="1" mail="ue">keep</chat>
<chat vpos="200" date="2">drop me</chat>
</packet>"#;

    fn input_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn writes_bom_and_crlf() {
        let input = input_file(XML.as_bytes());
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.ass");
        let cli = Cli::try_parse_from([
            OsStr::new("danmaku2ass"),
            OsStr::new("-o"),
            output.as_os_str(),
            OsStr::new("--filter"),
            OsStr::new("^drop"),
            input.path().as_os_str(),
        ])
        .unwrap();

        let report = run(&cli).unwrap();
        assert_eq!(report.placed, 1);
        assert_eq!(report.filtered, 1);

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("\u{FEFF}[Script Info]\r\n"));
        assert!(text.contains("}keep\r\n"));
        assert!(!text.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn filter_file_patterns_apply() {
        let input = input_file(XML.as_bytes());
        let patterns = input_file(b"  keep  \n\n");
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.ass");
        let cli = Cli::try_parse_from([
            OsStr::new("danmaku2ass"),
            OsStr::new("-o"),
            output.as_os_str(),
            OsStr::new("--filter-file"),
            patterns.path().as_os_str(),
            input.path().as_os_str(),
        ])
        .unwrap();

        let report = run(&cli).unwrap();
        assert_eq!(report.filtered, 1);
        assert!(fs::read_to_string(&output).unwrap().contains("}drop me\r\n"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut bytes = b"<packet><chat vpos=\"0\" date=\"0\">a".to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice(b"b</chat></packet>");
        let input = input_file(&bytes);
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.ass");
        let cli = Cli::try_parse_from([
            OsStr::new("danmaku2ass"),
            OsStr::new("-o"),
            output.as_os_str(),
            input.path().as_os_str(),
        ])
        .unwrap();

        run(&cli).unwrap();
        assert!(fs::read_to_string(&output).unwrap().contains("}a\u{FFFD}b\r\n"));
    }

    #[test]
    fn invalid_filter_is_fatal() {
        let input = input_file(XML.as_bytes());
        let cli = Cli::try_parse_from([
            OsStr::new("danmaku2ass"),
            OsStr::new("--filter"),
            OsStr::new("("),
            input.path().as_os_str(),
        ])
        .unwrap();
        let err = run(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid --filter"));
    }

    #[test]
    fn missing_input_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.xml");
        let cli = Cli::try_parse_from([OsStr::new("danmaku2ass"), missing.as_os_str()]).unwrap();
        let err = run(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read"));
    }
}
