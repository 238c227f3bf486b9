//! Line-oriented driver for the booking wizard
//!
//! Reads commands from stdin on a background thread and multiplexes them with
//! the transition ticker and wizard events on the main thread.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use chrono::NaiveDate;
use crossbeam_channel::{select, unbounded, Receiver};

use booking_wizard::catalog;
use booking_wizard::clock::SystemClock;
use booking_wizard::config::WizardConfig;
use booking_wizard::form::{DateRange, FieldValue};
use booking_wizard::logging::{initialize_tracing, log_runtime_environment};
use booking_wizard::messaging::{EventBus, WizardEvent};
use booking_wizard::schema::Binding;
use booking_wizard::submission::LogSink;
use booking_wizard::{AppResult, BookingStep, BookingWizard, NavigationResult, WizardError};

const HELP: &str = "\
Commands:
  set <field> <value>       write a field on the current step
  dates <start> <end>       set the travel dates (YYYY-MM-DD)
  next                      validate the step and continue
  back                      return to the previous step
  show                      print the current step
  options <field>           list choices for a select field
  reset                     discard the booking in progress
  help                      show this message
  quit                      exit";

enum Flow {
    Continue,
    Quit,
}

fn main() -> AppResult<()> {
    let config = WizardConfig::load().context("Failed to load configuration")?;

    initialize_tracing(&config);
    log_runtime_environment(&config);

    let bus = EventBus::new();
    let events = bus.subscribe();
    let mut wizard = BookingWizard::new(&config, Arc::new(SystemClock), Box::new(LogSink))
        .with_event_bus(bus);

    let lines = spawn_stdin_reader()?;
    let ticker = crossbeam_channel::tick(config.tick());

    println!("===========================================");
    println!("  Travel Booking");
    println!("===========================================\n");
    println!("{}\n", HELP);
    print_step(&wizard);

    loop {
        select! {
            recv(lines) -> line => {
                let Ok(line) = line else {
                    tracing::debug!(
                        step = wizard.current_step().number(),
                        phase = wizard.phase().description(),
                        "stdin closed, stopping"
                    );
                    break;
                };
                if let Flow::Quit = handle_command(&mut wizard, line.trim()) {
                    break;
                }
            }
            recv(ticker) -> _ => {
                wizard.tick();
            }
            recv(events) -> event => {
                if let Ok(event) = event {
                    print_event(&wizard, &event);
                }
            }
        }
    }

    tracing::info!(
        submitted = wizard.state().submitted_count(),
        "Booking wizard stopped"
    );
    Ok(())
}

fn spawn_stdin_reader() -> AppResult<Receiver<String>> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("Failed to spawn stdin reader")?;
    Ok(rx)
}

fn handle_command(wizard: &mut BookingWizard, line: &str) -> Flow {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default().trim();

    let outcome = match command {
        "" => Ok(()),
        "set" => set_field(wizard, rest),
        "dates" => set_dates(wizard, rest),
        "next" => wizard.advance().map(print_navigation),
        "back" => wizard.retreat().map(print_navigation),
        "show" => {
            print_step(wizard);
            Ok(())
        }
        "options" => {
            print_options(rest);
            Ok(())
        }
        "reset" => {
            wizard.reset();
            println!("Booking discarded, type 'show' to start over.");
            Ok(())
        }
        "help" => {
            println!("{}", HELP);
            Ok(())
        }
        "quit" | "exit" => return Flow::Quit,
        other => {
            println!("Unknown command '{}', try 'help'", other);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        println!("✗ {}", e);
    }
    Flow::Continue
}

fn set_field(wizard: &mut BookingWizard, args: &str) -> Result<(), WizardError> {
    let mut parts = args.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let value = FieldValue::text(parts.next().unwrap_or_default().trim());

    let binding = wizard
        .current_step()
        .schema()
        .field(name)
        .map(|rule| rule.binding);

    match binding {
        Some(Binding::Controlled) => wizard.update_controlled_field(name, value),
        // Let the store report unknown or out-of-step fields
        _ => wizard.set_direct(name, value),
    }
}

fn set_dates(wizard: &mut BookingWizard, args: &str) -> Result<(), WizardError> {
    let dates: Vec<_> = args
        .split_whitespace()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .collect();

    match dates.as_slice() {
        [Ok(start), Ok(end)] => {
            wizard.update_controlled_field("dateRange", DateRange::new(*start, *end).into())
        }
        _ => {
            println!("Usage: dates <start> <end>, e.g. dates 2027-06-01 2027-06-08");
            Ok(())
        }
    }
}

fn print_navigation(result: NavigationResult) {
    match result {
        NavigationResult::Moving(step) => println!("→ {}", step.title()),
        NavigationResult::Invalid(errors) => {
            println!("✗ Please fix the following:");
            for (field, message) in errors.iter() {
                println!("  {}: {}", field, message);
            }
        }
        NavigationResult::Completed { fields } => {
            println!("✓ Booking submitted ({} fields). Starting a new booking.", fields)
        }
        NavigationResult::SubmissionFailed { reason } => {
            println!("✗ Booking could not be submitted: {}", reason);
            println!("  Your details are kept, try 'next' again.");
        }
        NavigationResult::Blocked { reason } => println!("{}", reason),
    }
}

fn print_event(wizard: &BookingWizard, event: &WizardEvent) {
    match event {
        WizardEvent::StepChanged { .. } => print_step(wizard),
        WizardEvent::PhaseChanged { .. } | WizardEvent::FieldChanged { .. } => {
            tracing::trace!("{}", event.description());
        }
        _ => tracing::debug!("{}", event.description()),
    }
}

fn print_step(wizard: &BookingWizard) {
    let step = wizard.current_step();
    let content = wizard.step_content();
    println!(
        "\n[{}/{}] {}  ({})",
        step.number(),
        BookingStep::total_steps(),
        content.heading,
        content.background_key
    );
    println!("{}", content.text);

    let schema = step.schema();
    for name in schema.field_names() {
        let value = match wizard.selected_label(name) {
            Some(label) => label.to_string(),
            None => wizard
                .field_value(name)
                .map(ToString::to_string)
                .unwrap_or_default(),
        };
        let marker = match schema.field(name) {
            Some(rule) if rule.is_required() => "*",
            _ => " ",
        };
        match wizard.errors().get(name) {
            Some(error) => println!("  {}{:<18} {:<24} ✗ {}", marker, name, value, error),
            None => println!("  {}{:<18} {}", marker, name, value),
        }
    }

    let back = if step.is_first() { "" } else { "'back' or " };
    println!("{}'next' to {}", back, content.submit_label.to_lowercase());
}

fn print_options(field: &str) {
    match catalog::options_for(field) {
        Some(options) => {
            for option in options {
                println!("  {:<10} {}", option.value, option.label);
            }
        }
        None if field == "hotelStarRating" => {
            for stars in 1..=5 {
                println!("  {:<10} {}", stars, catalog::star_label(stars));
            }
        }
        None => println!("'{}' is not a select field", field),
    }
}
