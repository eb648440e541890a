use std::io::{BufRead, Write};

use klara_assessment::error::AssessmentError;
use klara_assessment::questionnaire::Phase;
use klara_assessment::{Event, Questionnaire, Session, State};

use crate::report;

/// Run the questionnaire over a line-oriented terminal.
///
/// A number picks that option and moves on, `b` goes back, `q` quits.
/// Returns the session as it stood when the flow ended or the user quit;
/// end of input counts as quitting.
pub fn run<R: BufRead, W: Write>(
    questionnaire: &Questionnaire,
    mut input: R,
    mut output: W,
) -> eyre::Result<Session> {
    let mut session = questionnaire.start();

    loop {
        if let State::Referral { red_flags } = session.state() {
            write!(output, "\n{}", report::referral(red_flags))?;
            if prompt(&mut input, &mut output, "\nRetake the safety questions? [y/N] ")?
                .is_some_and(|answer| answer.eq_ignore_ascii_case("y"))
            {
                session = questionnaire.transition(&session, Event::Retake)?;
                continue;
            }
            return Ok(session);
        }

        let (Some(question), Some(progress)) = (
            questionnaire.current_question(&session),
            questionnaire.progress(&session),
        ) else {
            return Ok(session);
        };

        let phase = match progress.phase {
            Phase::Screening => "Safety check",
            _ => "Symptoms",
        };
        writeln!(
            output,
            "\n{phase} {} of {}\n{}",
            progress.position,
            progress.total,
            question.prompt()
        )?;
        if let Some(context) = question.context() {
            writeln!(output, "  {context}")?;
        }
        for i in 0..question.option_count() {
            let marker = if session.selection() == Some(i) { '*' } else { ' ' };
            writeln!(
                output,
                " {marker}{}) {}",
                i + 1,
                question.option_label(i).unwrap_or_default()
            )?;
        }

        let Some(line) = prompt(&mut input, &mut output, "> ")? else {
            return Ok(session);
        };

        match line.as_str() {
            "q" => return Ok(session),
            "b" => {
                if !questionnaire.can_retreat(&session) {
                    writeln!(output, "This is the first question.")?;
                }
                session = questionnaire.transition(&session, Event::Retreat)?;
            }
            "" if questionnaire.can_advance(&session) => {
                session = questionnaire.transition(&session, Event::Advance)?;
            }
            choice => {
                let Some(index) = choice.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
                else {
                    writeln!(output, "Enter an option number, b to go back, or q to quit.")?;
                    continue;
                };
                match questionnaire.transition(&session, Event::Select(index)) {
                    Ok(selected) => {
                        session = questionnaire.transition(&selected, Event::Advance)?;
                    }
                    Err(AssessmentError::OptionOutOfRange { option_count, .. }) => {
                        writeln!(output, "Choose a number between 1 and {option_count}.")?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }
}

/// Print `text` and read one trimmed line; `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> eyre::Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
