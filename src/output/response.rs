//! CLI response formatting and output.
//!
//! Provides the JSON envelope, human-readable error printing, and exit code mapping.

use repackage::error::Hint;
use repackage::{Error, ErrorCode, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    use std::io::{self, Write};

    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn print_success<T: Serialize>(data: T) -> Result<()> {
    print_response(&CliResponse::success(data))
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigNotFound
        | ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationMissingArgument
        | ErrorCode::ValidationInvalidArgument => 2,

        ErrorCode::InternalIoError | ErrorCode::InternalJsonError => 1,
    }
}

pub fn print_json_result(result: Result<serde_json::Value>) -> Result<()> {
    match result {
        Ok(data) => print_success(data),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

/// Print an error for a human reader on stderr.
pub fn print_human_error(err: &Error) {
    eprintln!("Error [{}]: {}", err.code.as_str(), err.message);
    if let Some(obj) = err.details.as_object() {
        for (key, value) in obj {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => eprintln!("  {}: {}", key, s),
                other => eprintln!("  {}: {}", key, other),
            }
        }
    }
    for hint in &err.hints {
        eprintln!("  hint: {}", hint.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_carries_code_and_hints() {
        let err = Error::config_not_found("missing.json");
        let json = CliResponse::<()>::from_error(&err).to_json().unwrap();

        assert!(json.contains("\"success\": false"));
        assert!(json.contains("\"code\": \"config.not_found\""));
        assert!(json.contains("missing.json"));
        assert!(json.contains("\"hints\""));
    }

    #[test]
    fn success_envelope_omits_error() {
        let json = CliResponse::success(serde_json::json!({"filesUpdated": 3}))
            .to_json()
            .unwrap();
        assert!(json.contains("\"success\": true"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn validation_errors_map_to_exit_code_2() {
        let err = Error::validation_invalid_argument("extension", "bad", None);
        let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));
        assert_eq!(exit_code, 2);
    }

    #[test]
    fn io_errors_map_to_exit_code_1() {
        assert_eq!(exit_code_for_error(ErrorCode::InternalIoError), 1);
    }

    #[test]
    fn success_keeps_command_exit_code() {
        let (value, exit_code) = map_cmd_result_to_json(Ok((serde_json::json!({"a": 1}), 0)));
        assert_eq!(exit_code, 0);
        assert_eq!(value.unwrap()["a"], 1);
    }
}
