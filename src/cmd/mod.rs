pub mod bands;
pub mod calculate;
pub mod schema;

use crate::input::{self, CalculationInput};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read a calculation input document (JSON), or stdin with "-"
pub fn read_input(path: &Path) -> anyhow::Result<CalculationInput> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        read_from_file(path)
    }
}

fn read_from_file(path: &Path) -> anyhow::Result<CalculationInput> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    input::read_input_json(reader)
}

fn read_from_stdin() -> anyhow::Result<CalculationInput> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    let cursor = io::Cursor::new(buffer);
    input::read_input_json(cursor)
}
