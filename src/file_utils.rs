use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

// @module: Text input and output for the command line

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Path means standard input/output
    pub fn is_stdio(path: Option<&Path>) -> bool {
        path.is_none_or(|p| p.as_os_str() == "-")
    }

    // @creates: Parent directory of a file if needed
    pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        Ok(())
    }

    /// Read text from a file, or from stdin when the path is absent or `-`
    pub fn read_input(path: Option<&Path>) -> Result<String> {
        match path {
            Some(p) if !Self::is_stdio(Some(p)) => fs::read_to_string(p)
                .with_context(|| format!("Failed to read input file: {}", p.display())),
            _ => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read from stdin")?;
                Ok(text)
            }
        }
    }

    /// Write text to a file, or to stdout when the path is absent or `-`
    pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
        match path {
            Some(p) if !Self::is_stdio(Some(p)) => {
                Self::ensure_parent_dir(p)?;
                fs::write(p, text)
                    .with_context(|| format!("Failed to write output file: {}", p.display()))
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes()).context("Failed to write to stdout")?;
                if !text.ends_with('\n') {
                    stdout.write_all(b"\n").context("Failed to write to stdout")?;
                }
                stdout.flush().context("Failed to flush stdout")
            }
        }
    }

    // @generates: Output path next to the input, tagged with the target language
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, target_language: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = match input_file.extension() {
            Some(ext) => format!("{}.{}.{}", stem, target_language, ext.to_string_lossy()),
            None => format!("{}.{}", stem, target_language),
        };

        input_file.with_file_name(file_name)
    }
}
