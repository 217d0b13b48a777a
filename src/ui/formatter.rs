//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::git::CommitInfo;
use crate::release::ReleasePlan;

/// Red `ERROR:` line
pub fn error_line(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Green checkmark line
pub fn success_line(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Yellow arrow line
pub fn status_line(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Yellow warning sign line
pub fn warning_line(message: &str) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), message)
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{}", success_line(message));
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{}", status_line(message));
}

/// One numbered line per commit: first line of the message and its author
fn commit_line(index: usize, commit: &CommitInfo) -> String {
    let first_line = commit.message.lines().next().unwrap_or("");
    let short_msg: String = first_line.chars().take(60).collect();
    format!("  {}. {} ({})", index + 1, short_msg, commit.author)
}

/// Display commit analysis for a branch.
///
/// Shows the branch name and up to 10 commits.
/// If more than 10 commits exist, displays count of remaining commits.
///
/// # Arguments
/// * `commits` - Commits since the last release, oldest first
/// * `branch_name` - The name of the branch being analyzed
pub fn display_commit_analysis(commits: &[CommitInfo], branch_name: &str) {
    println!(
        "\n{}",
        style(format!("Analyzing commits on branch '{}'", branch_name)).bold()
    );
    println!(
        "{}",
        style(format!("{} commits since last release:", commits.len())).underlined()
    );

    for (i, commit) in commits.iter().take(10).enumerate() {
        println!("{}", commit_line(i, commit));
    }

    if commits.len() > 10 {
        println!("  ... and {} more commits", commits.len() - 10);
    }
}

/// Display the planned release.
///
/// Shows either:
/// - If a release exists: "From: last_tag -> To: new_tag"
/// - If initial: "Initial Release: new_tag"
///
/// Promoted versions are marked so the override is visible.
pub fn display_release_plan(last_tag: Option<&str>, plan: &ReleasePlan) {
    let marker = if plan.promoted {
        format!(" {}", style("(channel promotion)").cyan())
    } else {
        String::new()
    };

    match last_tag {
        Some(last) => {
            println!("\n{}", style("Planned Release:").bold());
            println!("  From: {}", style(last).red());
            println!("  To:   {}{}", style(&plan.git_tag).green(), marker);
        }
        None => {
            println!("\n{}", style("Initial Release:").bold());
            println!("  New tag: {}{}", style(&plan.git_tag).green(), marker);
        }
    }
}

/// Print release notes framed by a rule.
pub fn display_notes(notes: &str) {
    let rule = style("─".repeat(60)).dim();
    println!("\n{}\n{}\n{}", rule, notes.trim_end(), rule);
}

/// Display configured release branches with their channels.
pub fn display_available_branches(branches: &[(String, String)]) {
    println!("{}", style("Configured branches:").bold());
    for (branch, channel) in branches {
        println!("  - {} ({})", branch, channel);
    }
}

/// Display manual push instruction for a tag.
///
/// # Arguments
/// * `tag` - The tag that was created locally
/// * `remote` - The remote name (e.g., "origin")
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}
