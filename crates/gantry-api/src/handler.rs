// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The request-in, response-out entry point.
//!
//! `handle_message` consumes one JSON request and always produces one JSON
//! response. Parse failures and internal panics are converted into the
//! error envelope; the caller gets a response for every request, never an
//! unwound stack.

use crate::{
    request::SolveRequest,
    response::{ErrorResponse, SolveResponse},
};
use anyhow::{anyhow, Context};
use gantry_solver::HybridSolver;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Handles one JSON request and returns the JSON response.
pub fn handle_message(payload: &str) -> String {
    match run(payload) {
        Ok(response) => serde_json::to_string(&response)
            .unwrap_or_else(|error| error_json(&format!("failed to serialize response: {}", error))),
        Err(error) => {
            tracing::error!(error = %error, "request failed");
            error_json(&format!("{:#}", error))
        }
    }
}

fn run(payload: &str) -> anyhow::Result<SolveResponse> {
    let request: SolveRequest =
        serde_json::from_str(payload).context("failed to parse request")?;
    request.validate()?;

    // The solver must never take the process down; a panic becomes an
    // error envelope like any other failure.
    panic::catch_unwind(AssertUnwindSafe(|| solve(&request)))
        .map_err(|cause| anyhow!("solve failed: {}", panic_message(cause.as_ref())))
}

fn solve(request: &SolveRequest) -> SolveResponse {
    let items = request.items();
    let solver = HybridSolver::new(request.config());

    let start = Instant::now();
    let outcome = solver.solve(&items);
    let elapsed_seconds = start.elapsed().as_secs_f64();

    let metrics = outcome.objective();
    SolveResponse::new(
        outcome.into_partition(),
        items.len(),
        elapsed_seconds,
        metrics,
        request.mode(),
    )
}

fn panic_message(cause: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = cause.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = cause.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn error_json(message: &str) -> String {
    serde_json::to_string(&ErrorResponse::new(message))
        .unwrap_or_else(|_| r#"{"error":"failed to serialize error response"}"#.to_string())
}
