use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

// ---------------------------------------------------------------------------
// Prompt capability
// ---------------------------------------------------------------------------

/// Something that can show protocol text and hand back user replies.
///
/// `prompt_line` returns `Ok(None)` once the underlying input is closed;
/// the dialog treats that as fatal because it can no longer make progress.
pub trait PromptSource {
    fn prompt_line(&mut self, message: &str) -> io::Result<Option<String>>;

    /// Show a line that expects no reply (selection echoes, notices).
    fn notify(&mut self, message: &str);
}

// ---------------------------------------------------------------------------
// Console implementation
// ---------------------------------------------------------------------------

/// Prompts on stdout, reads replies from stdin.
pub struct ConsolePrompt;

impl PromptSource for ConsolePrompt {
    fn prompt_line(&mut self, message: &str) -> io::Result<Option<String>> {
        print!("{message}");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None); // EOF
        }
        // Strip the line ending, nothing else: token matching is exact.
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn notify(&mut self, message: &str) {
        println!("{message}");
    }
}

// ---------------------------------------------------------------------------
// Scripted implementation
// ---------------------------------------------------------------------------

/// In-memory prompt for tests and deterministic playback: replies come
/// from a queue and everything shown is captured in a transcript.
pub struct ScriptedPrompt {
    replies: VecDeque<String>,
    /// Every prompt and notice, in display order.
    pub transcript: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// How many transcript lines equal `message`.
    pub fn count_shown(&self, message: &str) -> usize {
        self.transcript.iter().filter(|l| *l == message).count()
    }
}

impl PromptSource for ScriptedPrompt {
    fn prompt_line(&mut self, message: &str) -> io::Result<Option<String>> {
        self.transcript.push(message.to_string());
        Ok(self.replies.pop_front())
    }

    fn notify(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }
}
