//! Interactive session.
//!
//! Slash commands map onto the application's use cases. Commands behind a
//! sign-in mount a fresh session gate, the way a protected page would.

mod helper;
mod prompt;
mod wizard;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use strokerisk_application::StrokeRiskApp;
use strokerisk_core::StrokeRiskError;
use strokerisk_core::auth::FederatedProvider;
use strokerisk_core::config::AppConfig;
use strokerisk_core::hospital::Coordinates;
use strokerisk_core::scan::RiskFilter;
use strokerisk_core::session::{AuthUser, Gated, SessionGate};
use tracing::debug;

use crate::output::{self, CliNotifier};
use helper::ReplHelper;
use prompt::{ReplEditor, ask, ask_secret, print_field_errors};

enum Flow {
    Continue,
    Quit,
}

pub async fn run(config: AppConfig) -> Result<()> {
    let app = StrokeRiskApp::new(config, CliNotifier::shared());

    let mut rl: ReplEditor = ReplEditor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    println!("{}", "=== StrokeRisk ===".bright_magenta().bold());
    println!(
        "{}",
        "Demo only: results are simulated and are not medical advice.".bright_black()
    );
    println!("{}", "Checking session...".bright_black());
    app.settle();
    let state = app.session.wait_until_settled().await;
    debug!("Session settled: {:?}", state);
    println!("{}", "Type /help for commands, /login to sign in.".bright_black());
    println!();

    loop {
        let readline = rl.readline("strokerisk> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match dispatch(&mut rl, &app, trimmed).await {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(err) => eprintln!("{}", format!("Error: {:#}", err).red()),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    app.shutdown();
    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

async fn dispatch(rl: &mut ReplEditor, app: &StrokeRiskApp, line: &str) -> Result<Flow> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match command {
        "/quit" | "/exit" | "quit" | "exit" => return Ok(Flow::Quit),
        "/help" => print_help(),
        "/login" => login(rl, app).await?,
        "/signup" => signup(rl, app).await?,
        "/oauth" => oauth(app, args.first().copied()).await?,
        "/logout" => {
            app.auth.logout().await?;
            println!("{}", "Signed out.".bright_green());
        }
        "/whoami" => match app.session.current().user() {
            Some(user) => println!("{} <{}>", user.greeting_name().bold(), user.email),
            None => println!("{}", "Not signed in.".bright_black()),
        },
        "/hospitals" => hospitals(app, &args).await?,
        "/emergency" => emergency(app).await?,
        "/profile" => {
            if signed_in(app).is_some() {
                wizard::run(rl, app).await?;
            }
        }
        "/scan" => {
            if signed_in(app).is_some() {
                scan(app, args.first().copied()).await?;
            }
        }
        "/results" => {
            if signed_in(app).is_some() {
                match app.scans.latest().await? {
                    Some(result) => output::print_result(&result),
                    None => println!("{}", "No scans yet. Try /scan.".bright_black()),
                }
            }
        }
        "/history" => {
            if signed_in(app).is_some() {
                let filter = match args.first() {
                    Some(raw) => raw.parse::<RiskFilter>().map_err(|_| {
                        anyhow::anyhow!("Unknown filter '{}' (all, high, medium, low)", raw)
                    })?,
                    None => RiskFilter::All,
                };
                output::print_history(&app.scans.history(filter).await?);
            }
        }
        "/analytics" => {
            if let Some(user) = signed_in(app) {
                println!("{}", format!("Analytics for {}", user.greeting_name()).bold());
                output::print_summary(&app.scans.summary().await?);
            }
        }
        other => println!("{}", format!("Unknown command: {}", other).bright_black()),
    }
    Ok(Flow::Continue)
}

/// Mounts a session gate for one protected command.
fn signed_in(app: &StrokeRiskApp) -> Option<AuthUser> {
    let mut gate = SessionGate::new(app.config.session.sign_in_route.clone());
    match gate.guard(&app.session.current(), AuthUser::clone) {
        Gated::Render(user) => Some(user),
        Gated::Checking => {
            println!("{}", "Checking session...".bright_black());
            None
        }
        Gated::Redirect(route) => {
            println!("{}", format!("Please sign in first: {}", route).yellow());
            None
        }
        Gated::Hidden => None,
    }
}

async fn login(rl: &mut ReplEditor, app: &StrokeRiskApp) -> Result<()> {
    let Some(email) = ask(rl, "Email:")? else { return Ok(()) };
    let Some(password) = ask_secret(rl, "Password:")? else { return Ok(()) };

    match app.auth.login(&form(json!({ "email": email, "password": password }))).await {
        Ok(user) => println!("Hello, {}.", user.greeting_name().bold()),
        Err(err) => report(err)?,
    }
    Ok(())
}

async fn signup(rl: &mut ReplEditor, app: &StrokeRiskApp) -> Result<()> {
    let Some(name) = ask(rl, "Full name:")? else { return Ok(()) };
    let Some(email) = ask(rl, "Email:")? else { return Ok(()) };
    let Some(password) = ask_secret(rl, "Password:")? else { return Ok(()) };
    let Some(confirm) = ask_secret(rl, "Confirm password:")? else { return Ok(()) };

    let candidate = form(json!({
        "name": name,
        "email": email,
        "password": password,
        "confirmPassword": confirm,
    }));
    match app.auth.signup(&candidate).await {
        Ok(user) => println!("Welcome, {}.", user.greeting_name().bold()),
        Err(err) => report(err)?,
    }
    Ok(())
}

async fn oauth(app: &StrokeRiskApp, provider: Option<&str>) -> Result<()> {
    let Some(raw) = provider else {
        println!("{}", "Usage: /oauth <google|microsoft|yahoo>".yellow());
        return Ok(());
    };
    let provider: FederatedProvider = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown provider '{}'", raw))?;
    if let Err(err) = app.auth.login_with_provider(provider).await {
        report(err)?;
    }
    Ok(())
}

/// Field errors are printed inline; retryable failures were already
/// notified; anything else is a real error.
fn report(err: StrokeRiskError) -> Result<()> {
    match err {
        StrokeRiskError::Validation(errors) => {
            print_field_errors(&errors);
            Ok(())
        }
        err if err.is_retryable() => Ok(()),
        err => Err(err.into()),
    }
}

async fn scan(app: &StrokeRiskApp, image_path: Option<&str>) -> Result<()> {
    let image_data = match image_path {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            if bytes.is_empty() {
                String::new()
            } else {
                format!("file://{}", path)
            }
        }
        None => format!("capture://camera/{}", std::process::id()),
    };

    println!("{}", "Analysing...".bright_black());
    match app.scans.analyze(&image_data).await {
        Ok(result) => output::print_result(&result),
        Err(StrokeRiskError::Analysis(message)) => {
            println!("{}", format!("Analysis failed: {}. Please try again.", message).red())
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

async fn hospitals(app: &StrokeRiskApp, args: &[&str]) -> Result<()> {
    let origin = match args {
        [] => None,
        [lat, lng] => Some(Coordinates::new(lat.parse()?, lng.parse()?)),
        _ => anyhow::bail!("Usage: /hospitals [lat lng]"),
    };
    println!("{}", "Finding nearby hospitals...".bright_black());
    output::print_hospitals(&app.emergency.nearest_hospitals(origin).await?);
    Ok(())
}

async fn emergency(app: &StrokeRiskApp) -> Result<()> {
    println!(
        "{}",
        format!("Call {} now if you notice stroke symptoms.", app.emergency.phone_number())
            .on_red()
            .white()
            .bold()
    );
    println!("Remember BE FAST: Balance, Eyes, Face, Arms, Speech, Time.");
    if let Some(center) = app.emergency.nearest_stroke_center(None).await? {
        println!(
            "Nearest stroke center: {} ({:.1} km, {})",
            center.name.bold(),
            center.distance,
            center.phone
        );
    }
    Ok(())
}

fn form(value: serde_json::Value) -> strokerisk_core::validation::Candidate {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Default::default(),
    }
}

fn print_help() {
    let rows = [
        ("/login", "Sign in with email and password"),
        ("/signup", "Create an account"),
        ("/oauth <provider>", "Sign in with google, microsoft or yahoo"),
        ("/logout", "Sign out"),
        ("/whoami", "Show the signed-in user"),
        ("/profile", "Fill in or edit your medical profile"),
        ("/scan [image]", "Run a (simulated) risk scan"),
        ("/results", "Show the latest scan result"),
        ("/history [filter]", "List past scans (all, high, medium, low)"),
        ("/analytics", "Summary and trend of your scans"),
        ("/hospitals [lat lng]", "Nearby hospitals"),
        ("/emergency", "Emergency number and nearest stroke center"),
        ("/help", "This help"),
        ("/quit", "Exit"),
    ];
    for (command, description) in rows {
        println!("  {:<22} {}", command.bright_cyan(), description);
    }
}
