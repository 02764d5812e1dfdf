//! Terminal renderer for the profile questionnaire.

use anyhow::Result;
use colored::Colorize;
use serde_json::Value;
use strokerisk_application::{ProfileWizardUseCase, StrokeRiskApp};
use strokerisk_core::StrokeRiskError;
use strokerisk_core::profile::{FieldKind, ProfileField};
use strokerisk_core::wizard::{ReviewLine, STEP_COUNT, StepForm};

use super::prompt::{ReplEditor, ask, print_field_errors};

/// What the renderer needs from one field, detached from the wizard lock.
struct FieldPrompt {
    field: ProfileField,
    current: String,
    error: Option<String>,
}

enum Answer {
    Keep,
    Set(Value),
    Back,
    Cancel,
}

pub async fn run(rl: &mut ReplEditor, app: &StrokeRiskApp) -> Result<()> {
    let wizard = app.open_profile_wizard().await?;
    if wizard.needs_onboarding() {
        println!("{}", "Let's set up your medical profile.".bright_magenta());
    } else {
        println!("{}", "Editing your medical profile.".bright_magenta());
    }
    println!(
        "{}",
        "Enter keeps the current value, '<' goes back, Ctrl-C cancels.".bright_black()
    );

    loop {
        let (step, progress, prompts, summary) = {
            let controller = wizard.controller().await;
            if controller.is_submitted() {
                return Ok(());
            }
            let form = controller.form();
            let prompts: Vec<FieldPrompt> = form
                .inputs()
                .into_iter()
                .map(|input| FieldPrompt {
                    field: input.field,
                    current: controller.draft().display(input.field),
                    error: input.error.map(str::to_string),
                })
                .collect();
            let summary = match form {
                StepForm::Review { summary } => summary,
                _ => Vec::new(),
            };
            (controller.current_step(), controller.progress_percent(), prompts, summary)
        };

        println!();
        println!(
            "{} {}",
            format!("Step {}/{}: {}", step.ordinal(), STEP_COUNT, step.title()).bold(),
            format!("[{}%]", progress).bright_black()
        );

        let keep_going = if step.is_review() {
            review(rl, &wizard, &summary).await?
        } else {
            edit_step(rl, &wizard, &prompts).await?
        };
        if !keep_going {
            println!("{}", "Profile not saved.".yellow());
            return Ok(());
        }
    }
}

/// Collects the answers of one step and tries to advance.
/// Returns `false` when the user cancelled.
async fn edit_step(rl: &mut ReplEditor, wizard: &ProfileWizardUseCase, prompts: &[FieldPrompt]) -> Result<bool> {
    for prompt in prompts {
        if let Some(error) = &prompt.error {
            println!("  {}", error.red());
        }
        loop {
            match read_answer(rl, prompt)? {
                Answer::Cancel => return Ok(false),
                Answer::Back => {
                    wizard.retreat().await?;
                    return Ok(true);
                }
                Answer::Keep => break,
                Answer::Set(value) => {
                    wizard.set_field(prompt.field, value).await?;
                    let controller = wizard.controller().await;
                    match controller.errors().get(prompt.field.key()) {
                        Some(error) => println!("  {}", error.message.red()),
                        None => break,
                    }
                }
            }
        }
    }

    match wizard.advance().await {
        Ok(_) => Ok(true),
        Err(StrokeRiskError::Validation(errors)) => {
            print_field_errors(&errors);
            Ok(true)
        }
        Err(err) => Err(err.into()),
    }
}

async fn review(rl: &mut ReplEditor, wizard: &ProfileWizardUseCase, summary: &[ReviewLine]) -> Result<bool> {
    for line in summary {
        println!("  {:<26} {}", line.label.bright_black(), line.value);
    }

    loop {
        let Some(choice) = ask(rl, "[s]ubmit, [b]ack or [c]ancel?")? else {
            return Ok(false);
        };
        match choice.as_str() {
            "s" | "submit" => {
                return match wizard.submit().await {
                    Ok(_) => Ok(true),
                    Err(StrokeRiskError::Validation(errors)) => {
                        print_field_errors(&errors);
                        jump_to_first_error(wizard).await?;
                        Ok(true)
                    }
                    // Notified already; the draft is intact on Review.
                    Err(err) if err.is_retryable() => Ok(true),
                    Err(err) => Err(err.into()),
                };
            }
            "b" | "back" | "<" => {
                wizard.retreat().await?;
                return Ok(true);
            }
            "c" | "cancel" => return Ok(false),
            _ => println!("{}", "Please answer s, b or c.".yellow()),
        }
    }
}

async fn jump_to_first_error(wizard: &ProfileWizardUseCase) -> Result<()> {
    let target = wizard.controller().await.first_step_with_errors();
    if let Some(target) = target {
        while wizard.current_step().await > target {
            wizard.retreat().await?;
        }
    }
    Ok(())
}

fn read_answer(rl: &mut ReplEditor, prompt: &FieldPrompt) -> Result<Answer> {
    let kind = prompt.field.kind();
    let hint = match &kind {
        FieldKind::Number(rule) => format!("{}-{}", rule.min, rule.max),
        FieldKind::Choice(options) => options.join("/"),
        FieldKind::Flag => "y/n".to_string(),
    };
    let question = format!(
        "{} ({}) [{}]:",
        prompt.field.label(),
        hint,
        prompt.current
    );

    let Some(raw) = ask(rl, &question)? else {
        return Ok(Answer::Cancel);
    };
    Ok(match raw.as_str() {
        "" => Answer::Keep,
        "<" => Answer::Back,
        text => Answer::Set(parse_answer(&kind, text)),
    })
}

/// Turns typed text into a form value. Numbers stay text so the schema's
/// coercion applies; unrecognised flag answers are passed through and
/// rejected by the schema.
fn parse_answer(kind: &FieldKind, text: &str) -> Value {
    match kind {
        FieldKind::Flag => match text.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" => Value::Bool(true),
            "n" | "no" | "false" => Value::Bool(false),
            _ => Value::String(text.to_string()),
        },
        FieldKind::Number(_) | FieldKind::Choice(_) => Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_answers() {
        assert_eq!(parse_answer(&FieldKind::Flag, "Y"), Value::Bool(true));
        assert_eq!(parse_answer(&FieldKind::Flag, "no"), Value::Bool(false));
        assert_eq!(
            parse_answer(&FieldKind::Flag, "maybe"),
            Value::String("maybe".to_string())
        );
    }

    #[test]
    fn test_numbers_stay_text_for_coercion() {
        let kind = ProfileField::Age.kind();
        assert_eq!(parse_answer(&kind, "45"), Value::String("45".to_string()));
    }
}
