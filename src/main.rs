use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use channel_release::cli::orchestration;
use channel_release::config::{self, Config};
use channel_release::git::Git2Repository;
use channel_release::notes::ConventionalNotesGenerator;
use channel_release::ui::{self, ConsoleLogger, Logger};

#[derive(clap::Parser)]
#[command(
    name = "channel-release",
    version,
    about = "Cut release tags and notes for final and prerelease channels from conventional commits"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Branch to release (defaults to the checked out branch)")]
    branch: Option<String>,

    #[arg(short, long, help = "Skip confirmation prompts")]
    force: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Push the release tag to the configured remote")]
    push: bool,

    #[arg(long, help = "Show configured release branches and exit")]
    list: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Apply the channel promotion rule to explicit versions and print the result
    Resolve {
        #[arg(long, help = "Branch the release would be cut from")]
        branch: String,

        #[arg(long, help = "Version of the last release, if any")]
        last_release: Option<String>,

        #[arg(long, help = "Tentatively computed next version")]
        next_release: String,

        #[arg(long, help = "Also print the generated release notes")]
        notes: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        ConsoleLogger::stderr().error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;

    if let Some(Command::Resolve {
        branch,
        last_release,
        next_release,
        notes,
    }) = &args.command
    {
        return resolve(&config, branch, last_release.as_deref(), next_release, *notes);
    }

    if args.list {
        list_configured_branches(&config)?;
        return Ok(());
    }

    let repo = Git2Repository::open(".").context("Git repository error")?;
    let branch = orchestration::resolve_branch(args.branch.as_deref(), &config, &repo)?;
    ui::display_status(&format!(
        "Planning release on branch '{}' ({} channel)",
        branch.name, branch.channel
    ));

    let logger = ConsoleLogger::stdout();
    let generator = ConventionalNotesGenerator::new(&config.conventional_commits);
    let today = chrono::Local::now().date_naive();

    let Some(outcome) =
        orchestration::plan_release(&branch, &config, &repo, &generator, &logger, today)?
    else {
        println!("Nothing to release.");
        return Ok(());
    };

    ui::display_commit_analysis(&outcome.commits, &branch.name);
    ui::display_release_plan(
        outcome.last_release.as_ref().map(|last| last.git_tag.as_str()),
        &outcome.plan,
    );
    ui::display_notes(&outcome.plan.notes);

    let tag = outcome.plan.git_tag.clone();
    let remote = config.publish.remote.clone();

    if args.dry_run {
        ui::display_status("Dry run:");
        let mut steps = Vec::new();
        if config.publish.write_changelog {
            steps.push(format!(
                "would prepend the notes to {}",
                config.notes.changelog_file
            ));
        }
        steps.push(format!("would create tag {}", tag));
        steps.push(format!("(optional) push {} to {}", tag, remote));
        for (i, step) in steps.iter().enumerate() {
            ui::display_success(&format!("  Step {}: {}", i + 1, step));
        }
        return Ok(());
    }

    if !args.force && !ui::confirm_release(&tag)? {
        println!("Release cancelled by user.");
        return Ok(());
    }

    let should_push = if args.push || config.publish.push {
        true
    } else if !args.force {
        ui::confirm_push_tag(&tag, &remote)?
    } else {
        false
    };

    let workdir = repo.workdir().unwrap_or_else(|| Path::new("."));
    let result =
        orchestration::publish_release(&repo, &config, &outcome, should_push, workdir, &logger)?;

    if result.pushed {
        println!(
            "\n{} Released {} from branch {}\n",
            console::style("✓").green(),
            result.tag,
            result.branch
        );
    } else {
        ui::display_manual_push_instruction(&result.tag, &remote);
        println!(
            "\n{} Tag {} created locally for branch {}\n",
            console::style("✓").green(),
            result.tag,
            result.branch
        );
    }

    Ok(())
}

fn resolve(
    config: &Config,
    branch: &str,
    last_release: Option<&str>,
    next_release: &str,
    print_notes: bool,
) -> Result<()> {
    let generator = ConventionalNotesGenerator::new(&config.conventional_commits);
    let today = chrono::Local::now().date_naive();

    let plan = orchestration::resolve_next_release(
        branch,
        last_release,
        next_release,
        config,
        &generator,
        &ConsoleLogger::stderr(),
        today,
    )?;

    println!("version: {}", plan.version);
    println!("tag: {}", plan.git_tag);
    println!("promoted: {}", plan.promoted);
    if print_notes {
        ui::display_notes(&plan.notes);
    }
    Ok(())
}

fn list_configured_branches(config: &Config) -> Result<()> {
    let branches = config
        .branches
        .iter()
        .map(|branch| Ok((branch.name.clone(), branch.channel()?.to_string())))
        .collect::<channel_release::Result<Vec<_>>>()?;

    ui::display_available_branches(&branches);
    Ok(())
}
