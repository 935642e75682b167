//! JSON output for CLI commands
//!
//! One JSON object per invocation on stdout, UTF-8.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;

use super::errors::CliResult;

/// Wrap `data` in the success envelope
pub fn envelope<T: Serialize>(data: &T) -> CliResult<Value> {
    Ok(serde_json::json!({
        "status": "ok",
        "data": serde_json::to_value(data)?,
    }))
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T, pretty: bool) -> CliResult<()> {
    let response = envelope(data)?;

    let mut stdout = io::stdout();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, &response)?;
    } else {
        serde_json::to_writer(&mut stdout, &response)?;
    }
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let value = envelope(&vec!["summary"]).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"][0], "summary");
    }
}
