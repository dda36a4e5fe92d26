//! Terminal walkthrough of the quote form.
//!
//! Walks the six steps on stdin/stdout and submits to a running quote desk
//! at `QUOTE_DESK_URL` (default `http://127.0.0.1:3000`).

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use quote_desk::config::BusinessProfile;
use quote_desk::form::steps::{self, StepId};
use quote_desk::form::{
    DependentField, FormField, HttpQuoteEndpoint, QuoteForm, SubmitStatus,
};

type Input = Lines<BufReader<Stdin>>;

/// Print `prompt` and read one trimmed line. `None` on EOF.
async fn ask(input: &mut Input, prompt: &str) -> std::io::Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

/// Prompt for each field; a blank answer keeps the current value.
async fn fill_fields(
    form: &mut QuoteForm,
    fields: &[FormField],
    input: &mut Input,
) -> std::io::Result<bool> {
    for &field in fields {
        loop {
            if let Some(options) = field.options() {
                for (i, option) in options.iter().enumerate() {
                    println!("  {}) {option}", i + 1);
                }
            }
            let current = form.data().field(field).to_string();
            let prompt = if current.is_empty() {
                format!("{}: ", field.label())
            } else {
                format!("{} [{current}]: ", field.label())
            };
            let Some(answer) = ask(input, &prompt).await? else {
                return Ok(false);
            };
            if answer.is_empty() {
                break;
            }
            match resolve_option(field, &answer) {
                Some(value) => {
                    form.set_field(field, value);
                    break;
                }
                None => println!("Please pick one of the listed options."),
            }
        }
    }
    Ok(true)
}

/// Map a numbered or typed answer onto the field's options.
fn resolve_option(field: FormField, answer: &str) -> Option<String> {
    let Some(options) = field.options() else {
        return Some(answer.to_string());
    };
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).map(|s| s.to_string());
    }
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(answer))
        .map(|s| s.to_string())
}

fn print_dependents(form: &QuoteForm) {
    if form.data().dependents.is_empty() {
        println!("  (no dependents)");
        return;
    }
    for (i, dep) in form.data().dependents.iter().enumerate() {
        let relationship = dep
            .relationship
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  {}. {} ({relationship}, {})",
            i + 1,
            dep.name,
            dep.date_of_birth
        );
    }
}

async fn edit_dependents(form: &mut QuoteForm, input: &mut Input) -> std::io::Result<bool> {
    loop {
        print_dependents(form);
        let Some(answer) = ask(input, "[a]dd, [r]emove N, [d]one: ").await? else {
            return Ok(false);
        };
        let mut parts = answer.split_whitespace();
        match parts.next() {
            Some("a") => {
                let id = form.add_dependent();
                let prompts = [
                    (DependentField::Name, "  Name: "),
                    (DependentField::Relationship, "  Relationship (Spouse/Child/Other): "),
                    (DependentField::DateOfBirth, "  Date of birth (YYYY-MM-DD): "),
                ];
                for (field, prompt) in prompts {
                    let Some(value) = ask(input, prompt).await? else {
                        return Ok(false);
                    };
                    form.update_dependent(id, field, &value);
                }
            }
            Some("r") => {
                let target = parts
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| form.data().dependents.iter().nth(i))
                    .map(|d| d.id);
                match target {
                    Some(id) => form.remove_dependent(id),
                    None => println!("No such dependent."),
                }
            }
            Some("d") | None => return Ok(true),
            Some(other) => println!("Unknown command: {other}"),
        }
    }
}

async fn fill_referral(form: &mut QuoteForm, input: &mut Input) -> std::io::Result<bool> {
    let current = if form.data().referred_by { "y" } else { "n" };
    let Some(answer) = ask(input, &format!("Were you referred by someone? (y/n) [{current}]: ")).await?
    else {
        return Ok(false);
    };
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => form.set_referred_by(true),
        "n" | "no" => form.set_referred_by(false),
        _ => {}
    }
    if form.data().referred_by {
        return fill_fields(form, &[FormField::ReferralName], input).await;
    }
    Ok(true)
}

async fn submit(form: &mut QuoteForm, endpoint: &HttpQuoteEndpoint) {
    println!("Submitting...");
    match form.submit(endpoint).await.cloned() {
        Ok(SubmitStatus::Success {
            message,
            redirect_after,
        }) => {
            println!("\n{message}");
            println!("Returning to the start in {} seconds.", redirect_after.as_secs());
            tokio::time::sleep(redirect_after).await;
            form.reset();
        }
        Ok(SubmitStatus::Failed { message, contact }) => {
            println!("\n{message}");
            println!("Call {} or email {}.", contact.phone, contact.email);
        }
        Ok(_) => {}
        Err(e) => println!("{e}"),
    }
}

#[tokio::main]
async fn main() -> quote_desk::error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let base_url =
        std::env::var("QUOTE_DESK_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let endpoint = HttpQuoteEndpoint::new(&base_url);
    let mut form = QuoteForm::new(BusinessProfile::from_env().contact);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("Get your free insurance quote. Submitting to {}", endpoint.url());

    loop {
        let step = form.current_step();
        println!(
            "\nStep {} of {}: {} ({})",
            form.step(),
            steps::step_count(),
            step.title,
            step.description
        );

        let more = match step.id {
            StepId::Dependents => edit_dependents(&mut form, &mut input).await?,
            StepId::Referral => fill_referral(&mut form, &mut input).await?,
            _ => fill_fields(&mut form, step.fields, &mut input).await?,
        };
        if !more {
            return Ok(());
        }

        let prompt = if form.is_last_step() {
            "[s]ubmit, [b]ack, [q]uit: "
        } else {
            "[n]ext, [b]ack, [q]uit: "
        };
        let Some(answer) = ask(&mut input, prompt).await? else {
            return Ok(());
        };
        match answer.as_str() {
            "n" => {
                if let Err(e) = form.next() {
                    println!("{e}");
                }
            }
            "b" => {
                form.previous();
            }
            "s" => submit(&mut form, &endpoint).await,
            "q" => return Ok(()),
            _ => {}
        }
    }
}
