//! Colored narration on the terminal

use super::{ProgressEvent, ProgressHandler};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

const RULE: &str = "========================================";

/// Human-facing narration of a run.
///
/// A spinner covers the clone; everything else is printed line by line.
#[derive(Default)]
pub struct ConsoleHandler {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banner() {
        println!("{}", style(RULE).green());
        println!("{}", style("Service Integration").green());
        println!("{}\n", style(RULE).green());
    }

    fn start_spinner(&self, message: String) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::with_template("{spinner:.yellow} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.lock().unwrap_or_else(|e| e.into_inner()) = Some(spinner);
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self.spinner.lock().unwrap_or_else(|e| e.into_inner()).take() {
            spinner.finish_and_clear();
        }
    }
}

fn found(what: &str, file: Option<&str>) {
    match file {
        Some(file) => println!("{} Found {}: {}", style("✓").green(), what, file),
        None => println!("  No {} found", what),
    }
}

impl ProgressHandler for ConsoleHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::FetchStarted { url } => {
                println!("{}\n", style(format!("Repository: {}", url)).blue());
                self.start_spinner("Cloning repository...".to_string());
            }
            ProgressEvent::Fetched { repo } => {
                self.stop_spinner();
                println!("{} Repository cloned ({})\n", style("✓").green(), repo);
            }
            ProgressEvent::Analyzed {
                repo,
                build_file,
                compose_file,
                doc_file,
                needs_postgres,
                needs_redis,
            } => {
                found("Dockerfile", build_file.then_some("Dockerfile"));
                found("docker-compose", compose_file.as_deref());
                found("README", doc_file.as_deref());

                println!("\n{}", style("Analysis Results:").yellow());
                println!("  Repository: {}", repo);
                println!("  Has Docker: {}", build_file);
                println!("  Has Compose: {}", compose_file.is_some());
                println!("  Needs PostgreSQL: {}", needs_postgres);
                println!("  Needs Redis: {}", needs_redis);
            }
            ProgressEvent::DescriptorReady { fields } => {
                println!("\n{}", style("Summary:").yellow());
                for (key, value) in fields {
                    println!("  {}: {}", key, value);
                }
            }
            ProgressEvent::StepStarted { index, total, label } => {
                println!(
                    "\n{}",
                    style(format!("[{}/{}] Updating {}...", index, total, label)).blue()
                );
            }
            ProgressEvent::StepCompleted {
                label,
                path,
                skipped,
            } => {
                if *skipped {
                    println!(
                        "{} {}: no insertion point found, review manually",
                        style("⚠").yellow(),
                        path.display()
                    );
                } else {
                    println!("{} Added to {}", style("✓").green(), label);
                }
            }
            ProgressEvent::ManualStep {
                index,
                total,
                instruction,
            } => {
                println!(
                    "\n{}",
                    style(format!("[{}/{}] Updating README.md...", index, total)).blue()
                );
                println!(
                    "{}",
                    style(format!("⚠ Manual step required: {}", instruction)).yellow()
                );
            }
            ProgressEvent::Completed { name, display_name } => {
                println!("\n{}", style(RULE).green());
                println!("{}", style("✓ Integration Complete!").green());
                println!("{}\n", style(RULE).green());

                println!("{}", style("Next Steps:").yellow());
                println!("1. Review changes: git diff");
                println!("2. Update README.md (manual)");
                println!(
                    "3. Commit: git commit -am 'Add {} service'",
                    display_name
                );
                println!("4. Push: git push origin main\n");

                println!(
                    "{}\n",
                    style(format!("Test with: docker compose --profile {} up -d", name)).blue()
                );
            }
            ProgressEvent::Cancelled => {
                println!("{}", style("Integration cancelled").red());
            }
            ProgressEvent::Failed { error } => {
                self.stop_spinner();
                eprintln!("\n{}", style(format!("Error: {}", error)).red());
            }
        }
    }
}
