//! Interactive escalation: ask the operator for a corrected field.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, BufRead, StdinLock, Stderr, Write};

use jmig_fields::{Escalation, EscalationRequest};
use tracing::warn;

/// Prompts on `output` and reads one line from `input` per unresolved field.
///
/// An empty answer declines. Answers are remembered for the rest of the run,
/// so a value repeated across rows is asked about once.
pub struct PromptEscalation<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
    answers: RefCell<HashMap<String, Option<String>>>,
}

impl PromptEscalation<StdinLock<'static>, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> PromptEscalation<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
            answers: RefCell::new(HashMap::new()),
        }
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn ask(&self, request: &EscalationRequest<'_>) -> io::Result<Option<String>> {
        let mut output = self.output.borrow_mut();
        match request.location {
            Some(location) => writeln!(output, "Unresolved field at {location}:")?,
            None => writeln!(output, "Unresolved field:")?,
        }
        writeln!(output, "  value:    {}", request.raw)?;
        writeln!(output, "  expected: {}", request.schema.describe())?;
        writeln!(output, "  problem:  {}", request.diagnostic())?;
        write!(output, "Corrected value (empty to skip): ")?;
        output.flush()?;

        let mut line = String::new();
        if self.input.borrow_mut().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim_end_matches(['\r', '\n']);
        Ok((!answer.trim().is_empty()).then(|| answer.to_string()))
    }
}

impl<R: BufRead, W: Write> Escalation for PromptEscalation<R, W> {
    fn correct(&self, request: &EscalationRequest<'_>) -> Option<String> {
        if let Some(answer) = self.answers.borrow().get(request.raw) {
            return answer.clone();
        }
        let answer = match self.ask(request) {
            Ok(answer) => answer,
            Err(error) => {
                warn!(%error, "prompt failed; leaving field unresolved");
                None
            }
        };
        self.answers
            .borrow_mut()
            .insert(request.raw.to_string(), answer.clone());
        answer
    }
}
