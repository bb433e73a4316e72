//! Pattern analysis command handler

use anyhow::{bail, Context, Result};
use ashen::ReferenceRange;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::Config;
use crate::file_io::ensure_parent;

/// Analyze `input` record by record, printing each block and writing it to
/// the report in the same order. Returns the number of records.
pub fn analyze(
    config: &Config,
    input: Option<&Path>,
    output: Option<&Path>,
    include_ff: bool,
) -> Result<usize> {
    let input = input.unwrap_or(&config.pattern.input);
    let report_path = output.unwrap_or(&config.pattern.report);
    let range = ReferenceRange::from_include_ff(include_ff || config.pattern.include_ff);

    if !input.is_file() {
        bail!(
            "Input file {} does not exist, run the extractor first",
            input.display()
        );
    }

    let source =
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;

    ensure_parent(report_path)?;
    let report = File::create(report_path)
        .with_context(|| format!("Failed to create report {}", report_path.display()))?;

    let stdout = io::stdout();
    let count = write_report(
        BufReader::new(source),
        range,
        &mut stdout.lock(),
        BufWriter::new(report),
    )
    .with_context(|| format!("Failed to analyze {}", input.display()))?;

    tracing::info!(
        "Analyzed {} records, report written to {}",
        count,
        report_path.display()
    );

    Ok(count)
}

fn write_report<R, C, W>(
    source: R,
    range: ReferenceRange,
    console: &mut C,
    mut report: W,
) -> Result<usize>
where
    R: io::Read,
    C: Write,
    W: Write,
{
    let mut count = 0;

    for record in ashen::records(source, range) {
        let block = record?.to_string();
        console.write_all(block.as_bytes())?;
        report.write_all(block.as_bytes())?;
        count += 1;
    }

    report.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_write_report() {
        let mut data: Vec<u8> = (0..=u8::MAX).collect();
        data.extend(vec![0u8; 256]);

        let mut console = Vec::new();
        let mut report = Vec::new();
        let count =
            write_report(&data[..], ReferenceRange::default(), &mut console, &mut report).unwrap();

        assert_eq!(count, 2);
        assert_eq!(console, report);

        let text = String::from_utf8(report).unwrap();
        assert!(text.starts_with("0\n    - Removed: NOTHING\n    - Repeated: NOTHING\n1\n"));
        assert!(text.ends_with("    - Repeated: 00\n"));
    }

    #[test]
    fn test_analyze_writes_report() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("A20.dat");
        let report = temp_dir.path().join("out").join("A20_pattern.txt");
        fs::write(&input, [0x41u8; 300]).unwrap();

        let count = analyze(
            &Config::default(),
            Some(input.as_path()),
            Some(report.as_path()),
            false,
        )
        .unwrap();
        assert_eq!(count, 2);

        let text = fs::read_to_string(&report).unwrap();
        assert_eq!(text.lines().filter(|l| l.contains("Repeated: 41")).count(), 2);
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let report = temp_dir.path().join("A20_pattern.txt");

        let result = analyze(
            &Config::default(),
            Some(temp_dir.path().join("A20.dat").as_path()),
            Some(report.as_path()),
            false,
        );
        assert!(result.is_err());
        assert!(!report.exists());
    }
}
