use std::io::Write;

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};

use crate::hooks::HookResult;

/// The narrow view handlers get: diagnostics only.
pub trait LogSink {
    /// Emit a `{"log": ...}` frame. Best-effort; a failed diagnostic
    /// write must not fail the invocation.
    fn log(&mut self, message: &str);
}

/// Line-delimited JSON frames over one output stream.
///
/// Log frames and result frames share the stream and are distinguished by
/// key alone, so they are distinct operations here and can never mix in a
/// single object.
pub struct FrameSink<W: Write> {
    out: W,
}

impl<W: Write> FrameSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, frame: &Value) -> Result<()> {
        serde_json::to_writer(&mut self.out, frame).context("Failed to encode frame")?;
        self.out.write_all(b"\n").context("Failed to write frame")?;
        self.out.flush().context("Failed to flush frame")?;
        Ok(())
    }

    /// Emit one single-key frame per key the hook produced.
    pub fn emit(&mut self, result: &HookResult) -> Result<()> {
        let value = serde_json::to_value(result).context("Failed to encode hook result")?;
        if let Value::Object(fields) = value {
            for (key, value) in fields {
                let mut frame = Map::with_capacity(1);
                frame.insert(key, value);
                self.write_frame(&Value::Object(frame))?;
            }
        }
        Ok(())
    }

    /// Protocol-level error object: unknown hook, bad usage, or a caught
    /// handler failure.
    pub fn error(&mut self, message: &str) -> Result<()> {
        self.write_frame(&json!({ "error": message }))
    }
}

impl<W: Write> LogSink for FrameSink<W> {
    fn log(&mut self, message: &str) {
        let _ = self.write_frame(&json!({ "log": message }));
    }
}
