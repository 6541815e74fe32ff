//! PDF to EPS conversion through an external program.
//!
//! The converter (Ghostscript by default) is run directly with an argument
//! vector and waited for. Its outcome is reported, never raised: the PDF it
//! reads has already been written by the time it runs.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use log::{debug, warn};

use crate::config::ExportOptions;

/// Result of running the external converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    /// The converter exited successfully
    Converted,
    /// The converter ran and failed; carries the exit code when there is one
    Failed(Option<i32>),
    /// The converter could not be started
    Unavailable,
}

impl ConversionStatus {
    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionStatus::Converted)
    }
}

/// Full argument list: the configured prefix, then `-sOutputFile=<eps>` and the input PDF.
pub fn converter_args(options: &ExportOptions, pdf: &Path, eps: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = options
        .converter_args_prefix
        .iter()
        .map(OsString::from)
        .collect();
    let mut output = OsString::from("-sOutputFile=");
    output.push(eps.as_os_str());
    args.push(output);
    args.push(pdf.as_os_str().to_owned());
    args
}

/// Convert `pdf` into `eps` with the configured converter.
pub fn pdf_to_eps(options: &ExportOptions, pdf: &Path, eps: &Path) -> ConversionStatus {
    let args = converter_args(options, pdf, eps);
    debug!("Running {} {:?}", options.converter, args);

    let output = Command::new(&options.converter)
        .args(&args)
        .stdin(Stdio::null())
        .output();

    match output {
        Ok(output) if output.status.success() => {
            debug!("Converted {} to {}", pdf.display(), eps.display());
            ConversionStatus::Converted
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "{} failed to convert {} ({}): {}",
                options.converter,
                pdf.display(),
                output.status,
                stderr.trim()
            );
            ConversionStatus::Failed(output.status.code())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(
                "Converter {} not found; {} was written but no EPS was produced",
                options.converter,
                pdf.display()
            );
            ConversionStatus::Unavailable
        }
        Err(err) => {
            warn!("Could not run converter {}: {}", options.converter, err);
            ConversionStatus::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(converter: &str, prefix: &[&str]) -> ExportOptions {
        ExportOptions {
            converter: converter.to_string(),
            converter_args_prefix: prefix.iter().map(|s| s.to_string()).collect(),
            ..ExportOptions::default()
        }
    }

    #[test]
    fn test_default_argument_list() {
        let args = converter_args(&ExportOptions::default(), Path::new("out.pdf"), Path::new("out.eps"));
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec![
                "-q",
                "-dNOCACHE",
                "-dNOPAUSE",
                "-dBATCH",
                "-dSAFER",
                "-sDEVICE=eps2write",
                "-sOutputFile=out.eps",
                "out.pdf",
            ]
        );
    }

    #[test]
    fn test_paths_with_spaces_stay_single_arguments() {
        let args = converter_args(&options("gs", &[]), Path::new("my plot.pdf"), Path::new("my plot.eps"));
        assert_eq!(args.len(), 2);
        assert_eq!(args[1], OsString::from("my plot.pdf"));
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options("wackyplot-no-such-converter", &[]);
        let status = pdf_to_eps(&opts, &dir.path().join("a.pdf"), &dir.path().join("a.eps"));
        assert_eq!(status, ConversionStatus::Unavailable);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_reported() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("a.pdf");
        let eps = dir.path().join("a.eps");
        assert_eq!(pdf_to_eps(&options("true", &[]), &pdf, &eps), ConversionStatus::Converted);
        assert_eq!(pdf_to_eps(&options("false", &[]), &pdf, &eps), ConversionStatus::Failed(Some(1)));
    }
}
