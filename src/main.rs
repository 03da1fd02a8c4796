use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use daybook_core::AppError;
use daybook_ui::{Action, CalendarPage, Confirm, EventFormFields, SubmitOutcome};
use dialoguer::Input;

/// One line typed at the `daybook` prompt.
#[derive(Parser)]
#[command(name = "daybook", no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the previous month
    Prev,
    /// Show the next month
    Next,
    /// Jump to a year
    Year {
        #[arg(allow_hyphen_values = true)]
        year: String,
    },
    /// Press the button shown as [n]
    #[command(alias = "p")]
    Press { number: usize },
    /// Fill one form field; asks for the value when it is left out
    Set {
        field: Field,
        #[arg(trailing_var_arg = true)]
        value: Vec<String>,
    },
    /// Fill every form field in turn
    Fill,
    /// Add or update the event in the form
    Submit,
    /// Leave edit mode without saving
    Cancel,
    /// Print the page again
    Show,
    #[command(alias = "exit")]
    Quit,
}

#[derive(Clone, Copy, ValueEnum)]
enum Field {
    Title,
    Date,
    Start,
    End,
    Location,
    Description,
}

impl Field {
    const ALL: [Field; 6] = [
        Field::Title,
        Field::Date,
        Field::Start,
        Field::End,
        Field::Location,
        Field::Description,
    ];

    fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Date => "Date (YYYY-MM-DD)",
            Field::Start => "Start (HH:MM)",
            Field::End => "End (HH:MM)",
            Field::Location => "Location",
            Field::Description => "Description",
        }
    }

    fn slot(self, fields: &mut EventFormFields) -> &mut String {
        match self {
            Field::Title => &mut fields.title,
            Field::Date => &mut fields.date,
            Field::Start => &mut fields.start_time,
            Field::End => &mut fields.end_time,
            Field::Location => &mut fields.location,
            Field::Description => &mut fields.description,
        }
    }
}

/// Asks on the terminal; a failed prompt counts as "no".
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Confirmation prompt failed");
                false
            })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize core
    daybook_core::init()?;

    let mut app = match daybook_core::App::new() {
        Ok(app) => app,
        Err(e) => return Err(report(AppError::from(e))),
    };
    let mut page = match CalendarPage::from_app(&app, Box::new(TerminalConfirm)) {
        Ok(page) => page,
        Err(e) => return Err(report(AppError::from(e))),
    };

    tracing::info!("Daybook started");
    println!("Daybook - {}", app.config().backend.base_url);

    page.load().await;
    println!("{}", page.page().to_text());
    println!("Type `help` for commands.");

    loop {
        let line = match Input::<String>::new()
            .with_prompt("daybook")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = %e, "Input closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Line::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if !run(&mut page, command).await? {
            break;
        }
    }

    app.shutdown()?;
    Ok(())
}

fn report(err: AppError) -> anyhow::Error {
    eprintln!("{}", err.user_message());
    err.into()
}

/// Returns false when the session should end.
async fn run(page: &mut CalendarPage, command: Command) -> Result<bool> {
    match command {
        Command::Quit => return Ok(false),
        Command::Show => {}
        Command::Prev => page.previous_month().await,
        Command::Next => page.next_month().await,
        Command::Year { year } => page.dispatch(Action::SetYear(year)).await,
        Command::Cancel => {
            if !page.cancel_edit() {
                println!("Not editing an event.");
            }
        }
        Command::Set { field, value } => {
            let value = if value.is_empty() {
                prompt_field(page, field)?
            } else {
                value.join(" ")
            };
            *field.slot(page.form_mut().fields_mut()) = value;
        }
        Command::Fill => {
            for field in Field::ALL {
                let value = prompt_field(page, field)?;
                *field.slot(page.form_mut().fields_mut()) = value;
            }
        }
        Command::Submit => match page.submit_form().await {
            SubmitOutcome::Created => println!("Event added."),
            SubmitOutcome::Updated => println!("Event updated."),
            SubmitOutcome::Failed => {
                println!("{}", page.last_error().unwrap_or("The change was not saved."));
            }
            SubmitOutcome::Ignored => {
                println!("Title, date, start and end are required.");
                return Ok(true);
            }
        },
        Command::Press { number } => {
            let action = number
                .checked_sub(1)
                .and_then(|i| page.page().actions().get(i).map(|a| (*a).clone()));
            match action {
                Some(action) => page.dispatch(action).await,
                None => {
                    println!("No button [{}]", number);
                    return Ok(true);
                }
            }
        }
    }

    println!("{}", page.page().to_text());
    Ok(true)
}

fn prompt_field(page: &mut CalendarPage, field: Field) -> Result<String> {
    let current = field.slot(page.form_mut().fields_mut()).clone();
    let value = Input::<String>::new()
        .with_prompt(field.label())
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic)]
    use super::*;

    fn parse(line: &str) -> Result<Command, clap::Error> {
        Line::try_parse_from(line.split_whitespace()).map(|l| l.command)
    }

    #[test]
    fn test_set_joins_the_rest_of_the_line() {
        match parse("set title Team sync at noon") {
            Ok(Command::Set { field: Field::Title, value }) => {
                assert_eq!(value.join(" "), "Team sync at noon");
            }
            _ => panic!("expected a title assignment"),
        }
        assert!(matches!(
            parse("set location"),
            Ok(Command::Set { field: Field::Location, value }) if value.is_empty()
        ));
    }

    #[test]
    fn test_press_and_year_arguments() {
        assert!(matches!(parse("p 3"), Ok(Command::Press { number: 3 })));
        assert!(matches!(parse("press 12"), Ok(Command::Press { number: 12 })));
        assert!(matches!(parse("year 2030"), Ok(Command::Year { year }) if year == "2030"));
        assert!(matches!(parse("exit"), Ok(Command::Quit)));
    }

    #[test]
    fn test_bad_lines_are_rejected() {
        assert!(parse("press two").is_err());
        assert!(parse("set colour red").is_err());
        assert!(parse("dance").is_err());
    }

    #[test]
    fn test_field_slots_cover_the_form() {
        let mut fields = EventFormFields::default();
        for (i, field) in Field::ALL.into_iter().enumerate() {
            *field.slot(&mut fields) = i.to_string();
        }
        assert_eq!(fields.title, "0");
        assert_eq!(fields.description, "5");
    }
}
