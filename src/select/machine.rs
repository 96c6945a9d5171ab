use std::io;

use thiserror::Error;

use super::prompt::PromptSource;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal dialog failures. Malformed replies never show up here; they are
/// recovered by reprompting.
#[derive(Debug, Error)]
pub enum SelectError {
    /// The prompt source reached end of input mid-dialog.
    #[error("input closed before a selection was confirmed")]
    InputClosed,

    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// Reply-level problems, recovered by reprompting the same step.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ReplyError {
    WrongFieldCount,
    NotAnInteger,
    ZeroStep,
}

/// Selection-level problems, recovered by restarting from the mode prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ValidationError {
    NotAscending,
    OutOfBounds,
    Empty,
}

// ---------------------------------------------------------------------------
// Dialog state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Range,
    List,
}

/// Dialog position. Every transition is written out in `run`.
enum Step {
    ChooseMode,
    ReadIndices(Mode),
    Validate(Vec<i64>),
    Confirm(Vec<i64>),
}

/// One interactive index selection for a named axis.
///
/// `bound_max` is the axis size; validation accepts `0..=bound_max`, so an
/// index equal to the size slips through and fails later during figure
/// assembly. That off-by-one is long-standing observable behavior and is
/// kept as is.
pub struct SelectionDialog {
    axis: String,
    bound_max: usize,
}

impl SelectionDialog {
    pub fn new(axis: impl Into<String>, bound_max: usize) -> Self {
        Self {
            axis: axis.into(),
            bound_max,
        }
    }

    /// Drive the dialog until the user confirms a selection.
    ///
    /// Malformed replies reprompt the current step; failed validation and
    /// declined confirmation restart from the mode prompt. The only `Err`
    /// outcomes are end of input and console failures.
    pub fn run(&self, prompt: &mut dyn PromptSource) -> Result<Vec<usize>, SelectError> {
        let mut step = Step::ChooseMode;

        loop {
            step = match step {
                Step::ChooseMode => match self.ask(prompt, &self.mode_prompt())?.as_str() {
                    "range" => Step::ReadIndices(Mode::Range),
                    "list" => Step::ReadIndices(Mode::List),
                    _ => {
                        prompt.notify("Invalid input, please try again.");
                        Step::ChooseMode
                    }
                },

                Step::ReadIndices(mode) => {
                    let reply = self.ask(prompt, &self.indices_prompt(mode))?;
                    match parse_reply(mode, &reply) {
                        Ok(indices) => Step::Validate(indices),
                        Err(err) => {
                            prompt.notify(reply_notice(err));
                            Step::ReadIndices(mode)
                        }
                    }
                }

                Step::Validate(indices) => match validate(&indices, self.bound_max) {
                    Ok(()) => Step::Confirm(indices),
                    Err(err) => {
                        prompt.notify(validation_notice(err));
                        Step::ChooseMode
                    }
                },

                Step::Confirm(indices) => {
                    prompt.notify(&format!(
                        "You've selected the {} indices given by the following list:",
                        self.axis
                    ));
                    prompt.notify(&format!("{indices:?}"));
                    let reply = self.ask(
                        prompt,
                        "To confirm your selection, enter 'confirm', enter anything else to try again: ",
                    )?;
                    if reply == "confirm" {
                        log::debug!("confirmed {} indices: {indices:?}", self.axis);
                        return Ok(indices.into_iter().map(|i| i as usize).collect());
                    }
                    Step::ChooseMode
                }
            };
        }
    }

    fn ask(&self, prompt: &mut dyn PromptSource, message: &str) -> Result<String, SelectError> {
        match prompt.prompt_line(message)? {
            Some(reply) => Ok(reply),
            None => Err(SelectError::InputClosed),
        }
    }

    fn mode_prompt(&self) -> String {
        format!(
            "To input a range of {axis} indices, enter 'range', to input a list of {axis} indices enter 'list': ",
            axis = self.axis
        )
    }

    fn indices_prompt(&self, mode: Mode) -> String {
        match mode {
            Mode::Range => format!(
                "Enter the range of {} indices in start,stop,step format where start is included and stop is not (the range must be a subset of the range 0,{},1): ",
                self.axis, self.bound_max
            ),
            Mode::List => format!(
                "Enter the list of {} indices in ascending order using format: 1,2,3,4,5,... (all indices must lie in 0..{}): ",
                self.axis, self.bound_max
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Reply parsing
// ---------------------------------------------------------------------------

fn parse_reply(mode: Mode, reply: &str) -> Result<Vec<i64>, ReplyError> {
    match mode {
        Mode::Range => {
            let (start, stop, step) = parse_range_reply(reply)?;
            Ok(expand_range(start, stop, step))
        }
        Mode::List => parse_list_reply(reply),
    }
}

/// Parse a `start,stop,step` triple. Integer tokens may carry surrounding
/// whitespace; the field count may not vary.
fn parse_range_reply(reply: &str) -> Result<(i64, i64, i64), ReplyError> {
    let fields: Vec<&str> = reply.split(',').collect();
    if fields.len() != 3 {
        return Err(ReplyError::WrongFieldCount);
    }

    let mut parsed = [0i64; 3];
    for (slot, field) in parsed.iter_mut().zip(&fields) {
        *slot = field.trim().parse().map_err(|_| ReplyError::NotAnInteger)?;
    }
    let [start, stop, step] = parsed;

    if step == 0 {
        return Err(ReplyError::ZeroStep);
    }
    Ok((start, stop, step))
}

/// Half-open expansion: every value from `start` stepping by `step` while
/// it stays short of `stop` (or above it, for a negative step).
fn expand_range(start: i64, stop: i64, step: i64) -> Vec<i64> {
    let mut out = Vec::new();
    let mut v = start;
    while (step > 0 && v < stop) || (step < 0 && v > stop) {
        out.push(v);
        v = match v.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    out
}

fn parse_list_reply(reply: &str) -> Result<Vec<i64>, ReplyError> {
    reply
        .split(',')
        .map(|field| field.trim().parse().map_err(|_| ReplyError::NotAnInteger))
        .collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Ascending order first, then bounds. The upper bound deliberately admits
/// `bound_max` itself (see `SelectionDialog`).
fn validate(indices: &[i64], bound_max: usize) -> Result<(), ValidationError> {
    let (Some(&first), Some(&last)) = (indices.first(), indices.last()) else {
        return Err(ValidationError::Empty);
    };

    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    if indices != sorted.as_slice() {
        return Err(ValidationError::NotAscending);
    }

    if first < 0 || last > bound_max as i64 {
        return Err(ValidationError::OutOfBounds);
    }
    Ok(())
}

fn reply_notice(err: ReplyError) -> &'static str {
    match err {
        ReplyError::WrongFieldCount => "Invalid format, please try again.",
        ReplyError::NotAnInteger => {
            "One or more of the values you entered was not a number, please try again."
        }
        ReplyError::ZeroStep => "The step must not be zero, please try again.",
    }
}

fn validation_notice(err: ValidationError) -> &'static str {
    match err {
        ValidationError::NotAscending => {
            "The list of indices you've selected is not in ascending order, please try again."
        }
        ValidationError::OutOfBounds => {
            "Your selected range of indices is not within the required bounds, please try again"
        }
        ValidationError::Empty => "Your selection is empty, please try again.",
    }
}
