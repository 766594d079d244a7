//! ResumeDrop - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use std::time::Duration;

use resumedrop::repl::{ActiveView, Command, DisplayManager, ReplSession, UploadRecord};
use resumedrop::{
    cli::{Args, Commands, Config, Verbosity},
    doctor::Doctor,
    flows::{self, ListOutcome, UploadOutcome},
    upload::UploadForm,
    ApiClient,
};

/// Build the API client from flags and config
fn build_client(args: &Args, config: &Config) -> Result<ApiClient> {
    let client = ApiClient::with_config(
        &args.server_url(config),
        Duration::from_secs(config.http.timeout_secs),
    )?;
    Ok(client)
}

/// Build a display manager honoring quiet mode and config
fn build_display(args: &Args, config: &Config) -> DisplayManager {
    let mut display = DisplayManager::new();
    display.set_progress(config.display.show_progress && args.verbosity().show_progress());
    display
}

/// Prompt for one wizard field, treating Ctrl-C/Ctrl-D as cancel
fn prompt_field(repl: &mut ReplSession, label: &str, initial: &str) -> Option<String> {
    repl.read_field(label, initial).ok().flatten()
}

/// Interactive upload: prompt for each field, then validate and submit
///
/// Every answered prompt is saved into the session draft immediately,
/// so cancelling midway or failing validation keeps what was typed and
/// `/upload` resumes from there.
async fn upload_in_shell(client: &ApiClient, repl: &mut ReplSession) {
    repl.session_mut().set_active_view(ActiveView::Upload);
    repl.display().show_upload_header();

    let draft = repl.session().draft().clone();

    let name = match prompt_field(repl, "Name: ", &draft.name) {
        Some(value) => value,
        None => {
            repl.display().show_info("Upload cancelled. Draft kept.");
            return;
        }
    };
    repl.session_mut().draft_mut().name = name;

    let mobile = match prompt_field(repl, "Mobile number: ", &draft.mobile_number) {
        Some(value) => value,
        None => {
            repl.display().show_info("Upload cancelled. Draft kept.");
            return;
        }
    };
    repl.session_mut().draft_mut().mobile_number = mobile;

    let file_path = match prompt_field(repl, "Resume file: ", &draft.file_path) {
        Some(value) => value,
        None => {
            repl.display().show_info("Upload cancelled. Draft kept.");
            return;
        }
    };
    repl.session_mut().draft_mut().file_path = file_path;

    let verbose = repl.is_verbose();
    let form = repl.session().draft().clone();

    match flows::run_upload(client, &form, repl.display_mut(), verbose).await {
        UploadOutcome::Completed {
            name,
            file_name,
            success,
            error,
            duration_ms,
        } => {
            let record = UploadRecord {
                name,
                file_name,
                success,
                error,
                duration_ms,
                timestamp: std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap()
                    .as_secs(),
            };
            repl.session_mut().finish_upload(record);
        }
        UploadOutcome::Blocked => {
            repl.display().show_info("Draft kept. Run /upload to correct it.");
        }
    }
}

/// Fetch the listing into the session cache and render it
async fn list_in_shell(client: &ApiClient, repl: &mut ReplSession) {
    let verbose = repl.is_verbose();

    match flows::run_list(client, repl.display_mut(), verbose).await {
        ListOutcome::Loaded(submissions) => {
            let count = submissions.len();
            repl.session_mut().set_submissions(submissions);
            if count > 0 {
                repl.display().show_listing_hint();
            }
        }
        ListOutcome::Failed(message) => {
            repl.session_mut().set_fetch_error(message);
            repl.display().show_retry_hint();
        }
    }
}

/// Save one cached submission's resume to the download directory
async fn download_in_shell(
    client: &ApiClient,
    config: &Config,
    repl: &mut ReplSession,
    index: Option<usize>,
) {
    let index = match index {
        Some(index) => index,
        None => {
            repl.display().show_warning("Usage: /download <number> (see /list)");
            return;
        }
    };

    if !repl.session().has_fetched() {
        repl.display().show_warning("No cached listing. Run /list first.");
        return;
    }

    let submission = match repl.session().submission(index) {
        Some(submission) => submission.clone(),
        None => {
            repl.display().show_warning(&format!(
                "No submission {}. The listing has {} entries.",
                index,
                repl.session().submissions().len()
            ));
            return;
        }
    };

    let download_dir = config.download_dir();
    flows::run_download(client, &submission, &download_dir, repl.display_mut()).await;
}

/// Open one cached submission's resume in the system browser
fn view_in_shell(client: &ApiClient, repl: &mut ReplSession, index: Option<usize>) {
    let index = match index {
        Some(index) => index,
        None => {
            repl.display().show_warning("Usage: /view <number> (see /list)");
            return;
        }
    };

    if !repl.session().has_fetched() {
        repl.display().show_warning("No cached listing. Run /list first.");
        return;
    }

    let submission = match repl.session().submission(index) {
        Some(submission) => submission,
        None => {
            repl.display().show_warning(&format!(
                "No submission {}. The listing has {} entries.",
                index,
                repl.session().submissions().len()
            ));
            return;
        }
    };

    flows::run_view(client, submission, repl.display());
}

/// Dispatch a parsed shell command that talks to the backend
async fn run_backend_command(
    client: &ApiClient,
    config: &Config,
    repl: &mut ReplSession,
    command: Command,
) {
    match command {
        Command::Upload => upload_in_shell(client, repl).await,
        Command::List | Command::Refresh => list_in_shell(client, repl).await,
        Command::Retry => {
            if repl.session().can_retry() {
                list_in_shell(client, repl).await;
            } else {
                repl.display()
                    .show_info("Nothing to retry. Run /list to fetch submissions.");
            }
        }
        Command::Download { index } => download_in_shell(client, config, repl, index).await,
        Command::View { index } => view_in_shell(client, repl, index),
        _ => {}
    }
}

async fn run_shell(args: &Args, config: &Config) -> Result<()> {
    let server_url = args.server_url(config);
    let client = build_client(args, config)?;

    // Shell history lives under the state directory
    std::fs::create_dir_all(config.state_dir())?;

    let mut repl = ReplSession::with_history(config.history_file())?;
    repl.set_verbose(args.verbosity().show_details());
    repl.display_mut()
        .set_progress(config.display.show_progress && args.verbosity().show_progress());

    repl.display().clear_screen()?;
    repl.show_welcome("v0.1.0", &server_url);

    if !client.is_available().await {
        repl.display()
            .show_warning(&format!("Server not reachable at {}", server_url));
    }

    // Main shell loop
    loop {
        match repl.read_input() {
            Ok(Some(input)) => {
                if input.is_empty() {
                    continue;
                }

                match repl.handle_input(&input) {
                    Ok(should_continue) => {
                        if !should_continue {
                            // User requested exit
                            break;
                        }

                        // Commands that talk to the backend are parsed
                        // but not executed by the handler; run them here
                        // where the client is in scope
                        if let Some(command) = repl.backend_command(&input) {
                            run_backend_command(&client, config, &mut repl, command).await;
                        }
                    }
                    Err(e) => {
                        repl.display_mut().finish_with_error(&format!("Error: {}", e));
                    }
                }
            }
            Ok(None) => {
                // EOF (Ctrl-D) - exit gracefully
                break;
            }
            Err(e) => {
                // Interrupted (Ctrl-C) or other error
                if e.to_string().contains("Interrupted") {
                    println!("\nUse /exit to quit gracefully");
                    continue;
                } else {
                    return Err(e);
                }
            }
        }
    }

    // Save shell history
    repl.save()?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.clone())?;

    if matches!(args.verbosity(), Verbosity::Quiet) || !config.display.color_output {
        colored::control::set_override(false);
    }

    match &args.command {
        Some(Commands::Start) => {
            run_shell(&args, &config).await?;
        }
        Some(Commands::Upload { name, mobile, file }) => {
            run_upload_once(&args, &config, name, mobile, file).await?;
        }
        Some(Commands::List) => {
            run_list_once(&args, &config).await?;
        }
        Some(Commands::Download { index, output }) => {
            run_download_once(&args, &config, *index, output.as_deref()).await?;
        }
        Some(Commands::View { index }) => {
            run_view_once(&args, &config, *index).await?;
        }
        Some(Commands::Doctor) => {
            run_doctor(&args, &config).await?;
        }
        Some(Commands::Config) => {
            show_config(&args, &config)?;
        }
        Some(Commands::Clean { downloads }) => {
            clean_state(&config, *downloads).await?;
        }
        None => {
            // No subcommand - show usage
            println!("ResumeDrop v0.1.0 - Resume Collection Client");
            println!("\nUsage:");
            println!("  resumedrop start              Interactive shell");
            println!("  resumedrop upload             Submit a resume (--name, --mobile, --file)");
            println!("  resumedrop list               Print all submissions");
            println!("  resumedrop download <n>       Save submission n's resume");
            println!("  resumedrop view <n>           Open submission n's resume in the browser");
            println!("  resumedrop doctor             System health checks");
            println!("  resumedrop config             Show configuration");
            println!("  resumedrop clean              Clear client state");
            println!("\nExample:");
            println!("  resumedrop upload --name \"Asha Rao\" --mobile 9876543210 --file resume.pdf");
            println!();
        }
    }

    Ok(())
}

async fn run_upload_once(
    args: &Args,
    config: &Config,
    name: &str,
    mobile: &str,
    file: &Path,
) -> Result<()> {
    let client = build_client(args, config)?;
    let mut display = build_display(args, config);

    let form = UploadForm {
        name: name.to_string(),
        mobile_number: mobile.to_string(),
        file_path: file.display().to_string(),
    };

    match flows::run_upload(&client, &form, &mut display, args.verbosity().show_details()).await {
        UploadOutcome::Completed { success: true, .. } => Ok(()),
        _ => std::process::exit(1),
    }
}

async fn run_list_once(args: &Args, config: &Config) -> Result<()> {
    let client = build_client(args, config)?;
    let mut display = build_display(args, config);

    match flows::run_list(&client, &mut display, args.verbosity().show_details()).await {
        ListOutcome::Loaded(_) => Ok(()),
        ListOutcome::Failed(_) => std::process::exit(1),
    }
}

async fn run_download_once(
    args: &Args,
    config: &Config,
    index: usize,
    output: Option<&Path>,
) -> Result<()> {
    let client = build_client(args, config)?;
    let mut display = build_display(args, config);
    let verbose = args.verbosity().show_details();

    let submissions = match flows::fetch_listing(&client, &mut display, verbose).await {
        ListOutcome::Loaded(submissions) => submissions,
        ListOutcome::Failed(_) => std::process::exit(1),
    };

    let submission = match index.checked_sub(1).and_then(|i| submissions.get(i)) {
        Some(submission) => submission,
        None => {
            display.show_error(&format!(
                "No submission {}. The listing has {} entries.",
                index,
                submissions.len()
            ));
            std::process::exit(1);
        }
    };

    let download_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.download_dir());

    if flows::run_download(&client, submission, &download_dir, &mut display).await {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

async fn run_view_once(args: &Args, config: &Config, index: usize) -> Result<()> {
    let client = build_client(args, config)?;
    let mut display = build_display(args, config);
    let verbose = args.verbosity().show_details();

    let submissions = match flows::fetch_listing(&client, &mut display, verbose).await {
        ListOutcome::Loaded(submissions) => submissions,
        ListOutcome::Failed(_) => std::process::exit(1),
    };

    let submission = match index.checked_sub(1).and_then(|i| submissions.get(i)) {
        Some(submission) => submission,
        None => {
            display.show_error(&format!(
                "No submission {}. The listing has {} entries.",
                index,
                submissions.len()
            ));
            std::process::exit(1);
        }
    };

    if flows::run_view(&client, submission, &display) {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

async fn run_doctor(args: &Args, config: &Config) -> Result<()> {
    let doctor = Doctor::new(args.server_url(config), config.download_dir());

    let checks = doctor.run_diagnostics().await;
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

async fn clean_state(config: &Config, downloads: bool) -> Result<()> {
    use tokio::fs;

    let state_dir = config.state_dir();

    if state_dir.exists() {
        fs::remove_dir_all(&state_dir).await?;
        println!("✓ Cleaned state directory: {:?}", state_dir);
    } else {
        println!("No state directory found.");
    }

    if downloads {
        let download_dir = config.download_dir();
        if download_dir.exists() {
            fs::remove_dir_all(&download_dir).await?;
            println!("✓ Cleaned download directory: {:?}", download_dir);
        }
    }

    Ok(())
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    println!("\n{}", "ResumeDrop Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();

    println!("Server:");
    println!("  Host:  {}", config.server.host);
    println!("  Port:  {}", config.server.port);
    println!("  URL:   {}", args.server_url(config));
    println!();

    println!("HTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!();

    println!("Paths:");
    println!("  State dir:    {:?}", config.state_dir());
    println!("  Download dir: {:?}", config.download_dir());
    println!();

    println!("Display:");
    println!(
        "  Color output:  {}",
        if config.display.color_output { "enabled" } else { "disabled" }
    );
    println!(
        "  Progress bars: {}",
        if config.display.show_progress { "enabled" } else { "disabled" }
    );
    println!("  Verbosity:     {}", args.verbosity().as_str());
    println!();

    Ok(())
}
