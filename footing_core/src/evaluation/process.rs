//! External-command workbook evaluator.
//!
//! Runs a helper program that owns the actual workbook. The protocol is a
//! single JSON round trip:
//!
//! - stdin: one object mapping input cell name to value,
//!   e.g. `{"PDL": 438.0, "Include Ftg SW": "YES", ...}`
//! - stdout: one object mapping output cell name to value,
//!   e.g. `{"Bearing_DCR": 0.87, ..., "CodeCheck": "OK"}`
//!
//! A non-zero exit status fails the evaluation; stderr is logged. When a
//! deadline is given and passes, the helper is killed and reaped before the
//! timeout error is returned.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wait_timeout::ChildExt;

use super::{CellValue, NamedInput, SpreadsheetEvaluator};
use crate::errors::{CalcError, CalcResult};

/// Evaluates the workbook by running `program args...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessEvaluator {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ProcessEvaluator {
    pub fn new(program: impl Into<String>) -> Self {
        ProcessEvaluator {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// JSON document written to the helper's stdin
    pub fn request_json(inputs: &[NamedInput]) -> CalcResult<String> {
        let request: BTreeMap<&str, &CellValue> = inputs.iter().map(|i| (i.name.as_str(), &i.value)).collect();
        Ok(serde_json::to_string(&request)?)
    }
}

impl ProcessEvaluator {
    /// Run the helper once, killing it if `deadline` passes first.
    fn run(&self, inputs: &[NamedInput], deadline: Option<Duration>) -> CalcResult<BTreeMap<String, CellValue>> {
        let request = Self::request_json(inputs)?;

        tracing::debug!(program = %self.program, args = ?self.args, ?deadline, "spawning workbook evaluator");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CalcError::evaluation_failure(format!("failed to run '{}': {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(request.as_bytes()) {
                stop(&mut child);
                return Err(CalcError::evaluation_failure(format!("failed to send inputs: {}", e)));
            }
            // Dropping stdin closes the pipe so the helper sees EOF
        }

        // Drain both pipes while waiting so a chatty helper cannot block on a full pipe
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let status = match deadline {
            Some(timeout) => {
                match child.wait_timeout(timeout) {
                    Ok(Some(status)) => status,
                    Err(e) => {
                        stop(&mut child);
                        return Err(CalcError::evaluation_failure(format!("failed to wait for evaluator: {}", e)));
                    }
                    Ok(None) => {
                        stop(&mut child);
                        tracing::warn!(program = %self.program, ?timeout, "workbook evaluator killed after timeout");
                        return Err(CalcError::evaluation_failure(format!(
                            "'{}' timed out after {:.1} s and was killed",
                            self.program,
                            timeout.as_secs_f64()
                        )));
                    }
                }
            }
            None => child
                .wait()
                .map_err(|e| CalcError::evaluation_failure(format!("failed to wait for evaluator: {}", e)))?,
        };

        let stdout = collect(stdout)?;
        let stderr = collect(stderr)?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            tracing::error!(%status, stderr = %stderr.trim(), "workbook evaluator failed");
            return Err(CalcError::evaluation_failure(format!(
                "'{}' exited with {}",
                self.program, status
            )));
        }

        serde_json::from_slice(&stdout)
            .map_err(|e| CalcError::evaluation_failure(format!("evaluator returned invalid JSON: {}", e)))
    }
}

impl SpreadsheetEvaluator for ProcessEvaluator {
    fn evaluate(&self, inputs: &[NamedInput]) -> CalcResult<BTreeMap<String, CellValue>> {
        self.run(inputs, None)
    }

    fn evaluate_within(&self, inputs: &[NamedInput], timeout: Duration) -> CalcResult<BTreeMap<String, CellValue>> {
        self.run(inputs, Some(timeout))
    }
}

/// Kill and reap a helper we are giving up on.
fn stop(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf).map(|_| buf)
    })
}

fn collect(reader: Option<JoinHandle<io::Result<Vec<u8>>>>) -> CalcResult<Vec<u8>> {
    let Some(handle) = reader else {
        return Ok(Vec::new());
    };
    handle
        .join()
        .map_err(|_| CalcError::evaluation_failure("evaluator output reader panicked"))?
        .map_err(|e| CalcError::evaluation_failure(format!("failed to read evaluator output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{evaluate_with_timeout, workbook_inputs};
    use crate::footing::FootingInput;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn test_request_json() {
        let json = ProcessEvaluator::request_json(&workbook_inputs(&FootingInput::default())).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["PDL"], 438.0);
        assert_eq!(parsed["Include Ftg SW"], "YES");
        assert_eq!(parsed["Bar Size y"], 11.0);
        assert_eq!(parsed.as_object().unwrap().len(), 23);
    }

    #[test]
    fn test_missing_program() {
        let evaluator = ProcessEvaluator::new("definitely-not-a-real-workbook-helper");
        let err = evaluator.evaluate(&[]).unwrap_err();
        assert_eq!(err.error_code(), "EVALUATION_FAILURE");
    }

    #[cfg(unix)]
    #[test]
    fn test_round_trip_through_shell() {
        let script = r#"cat > /dev/null; echo '{"Bearing_DCR": 0.5, "CodeCheck": "OK"}'"#;
        let evaluator = ProcessEvaluator::new("sh").with_args(["-c", script]);
        let cells = evaluator.evaluate(&workbook_inputs(&FootingInput::default())).unwrap();
        assert_eq!(cells["Bearing_DCR"], CellValue::Number(0.5));
        assert_eq!(cells["CodeCheck"], CellValue::Text("OK".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit() {
        let evaluator = ProcessEvaluator::new("sh").with_args(["-c", "cat > /dev/null; exit 3"]);
        let err = evaluator.evaluate(&[]).unwrap_err();
        assert_eq!(err.error_code(), "EVALUATION_FAILURE");
    }

    #[cfg(unix)]
    #[test]
    fn test_fast_helper_within_deadline() {
        let script = r#"cat > /dev/null; echo '{"Bearing_DCR": 0.5}'"#;
        let evaluator = ProcessEvaluator::new("sh").with_args(["-c", script]);
        let cells = evaluator.evaluate_within(&[], Duration::from_secs(10)).unwrap();
        assert_eq!(cells["Bearing_DCR"], CellValue::Number(0.5));
    }

    #[cfg(unix)]
    #[test]
    fn test_timed_out_helper_is_killed() {
        let marker = std::env::temp_dir().join(format!("footing_eval_killed_{}", std::process::id()));
        let _ = std::fs::remove_file(&marker);

        let script = format!("cat > /dev/null; sleep 2; touch '{}'", marker.display());
        let evaluator = ProcessEvaluator::new("sh").with_args(["-c".to_string(), script]);

        let started = Instant::now();
        let err = evaluate_with_timeout(
            Arc::new(evaluator),
            workbook_inputs(&FootingInput::default()),
            Duration::from_millis(200),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "EVALUATION_FAILURE");
        assert!(started.elapsed() < Duration::from_secs(2));

        // Had the helper survived, it would have written the marker by now
        thread::sleep(Duration::from_millis(2500));
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_json_output() {
        let evaluator = ProcessEvaluator::new("sh").with_args(["-c", "cat > /dev/null; echo not-json"]);
        let err = evaluator.evaluate(&[]).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }
}
