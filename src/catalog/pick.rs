//! Interactive selection of SN types, photometric bands and the output
//! quantity. Speaks through [`PromptSource`] so tests can script it.

use crate::select::machine::SelectError;
use crate::select::prompt::PromptSource;

use super::model::OutputKind;

/// Collect a subset of `allowed` values one reply at a time, until the
/// user enters `done` or every value is taken. Unknown and repeated
/// values notify and reprompt; `done` with nothing picked reprompts too.
/// Matching is exact, no trimming or case folding.
pub fn pick_from(
    prompt: &mut dyn PromptSource,
    what: &str,
    allowed: &[&str],
) -> Result<Vec<String>, SelectError> {
    let mut picked: Vec<String> = Vec::new();

    while picked.len() < allowed.len() {
        let reply = ask(
            prompt,
            &format!("Enter a {what} from the list, otherwise enter 'done': "),
        )?;
        if reply == "done" {
            if picked.is_empty() {
                prompt.notify("Your selection is empty, please try again.");
                continue;
            }
            break;
        }
        if !allowed.contains(&reply.as_str()) {
            prompt.notify(&format!("You entered an invalid {what}. Try again."));
            continue;
        }
        if picked.contains(&reply) {
            prompt.notify(&format!("You've already entered this {what}. Try again."));
            continue;
        }
        prompt.notify(&format!("{what} {reply} added to list of requested {what}s"));
        picked.push(reply);
    }

    prompt.notify(&format!(
        "Your list of requested {what}s ({}) has been stored.",
        picked.join(", ")
    ));
    log::debug!("requested {what}s: {picked:?}");
    Ok(picked)
}

/// The quantity choice: the exact token `lums` selects luminosities,
/// anything else keeps absolute magnitudes.
pub fn pick_output_kind(prompt: &mut dyn PromptSource) -> Result<OutputKind, SelectError> {
    prompt.notify("Finally, before we begin reading data, would you like the apparent magnitudes");
    prompt.notify("stored in the files to be converted to absolute magnitudes or luminosities");
    let reply = ask(
        prompt,
        "(in erg/s)? (Enter 'lums' for luminosities and anything else for abs. magnitudes): ",
    )?;
    Ok(if reply == "lums" {
        OutputKind::Luminosity
    } else {
        OutputKind::AbsoluteMagnitude
    })
}

fn ask(prompt: &mut dyn PromptSource, message: &str) -> Result<String, SelectError> {
    match prompt.prompt_line(message)? {
        Some(reply) => Ok(reply),
        None => Err(SelectError::InputClosed),
    }
}
