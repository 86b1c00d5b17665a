//! CLI Command Handlers
//!
//! Implements the interactive shell loop, the script runner and the one-shot
//! queries. Each handler takes its args and an Output, returns ExitCode.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

use crate::cli::{CountResponse, ExitCode, Output, RunCmd, SearchCmd};
use crate::config::Config;
use crate::engine::VideoPlayer;
use crate::library::load_library;
use crate::shell::{listing_lines, Reply, Shell, FOLLOW_UP_PROMPT};

// =============================================================================
// Setup
// =============================================================================

/// Load the catalogue and build a player, honouring the configured seed
pub async fn build_player(library: &Path, seed: Option<u64>) -> VideoPlayer {
    let library = load_library(library).await;
    match seed {
        Some(seed) => VideoPlayer::with_seed(library, seed),
        None => VideoPlayer::new(library),
    }
}

fn print_reply(reply: &Reply, output: &Output) -> Result<()> {
    if output.json {
        output.print_line(reply)?;
    } else if !reply.lines.is_empty() {
        output.text(reply.text());
    }
    Ok(())
}

fn print_follow_up_prompt(output: &Output) {
    if !output.json {
        for line in FOLLOW_UP_PROMPT {
            output.text(line);
        }
    }
}

// =============================================================================
// Interactive Shell
// =============================================================================

pub async fn shell_cmd(player: VideoPlayer, config: &Config, output: &Output) -> ExitCode {
    match run_shell(Shell::new(player), config.prompt(), output).await {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Shell failed: {:#}", e), ExitCode::Error),
    }
}

async fn run_shell(mut shell: Shell, prompt: &str, output: &Output) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    output.info("Type HELP for a list of available commands.");

    loop {
        if !output.json {
            print!("{}", prompt);
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let reply = shell.execute(&line);
        print_reply(&reply, output)?;
        if reply.exit {
            break;
        }

        if shell.awaiting_answer() {
            print_follow_up_prompt(output);
            let answer = lines.next_line().await?.unwrap_or_default();
            if let Some(reply) = shell.answer(&answer) {
                print_reply(&reply, output)?;
            }
        }
    }

    Ok(())
}

// =============================================================================
// Script Runner
// =============================================================================

async fn read_script(cmd: &RunCmd) -> Result<String> {
    if cmd.from_stdin() {
        let mut script = String::new();
        tokio::io::stdin()
            .read_to_string(&mut script)
            .await
            .context("Failed to read script from stdin")?;
        Ok(script)
    } else {
        tokio::fs::read_to_string(&cmd.script)
            .await
            .with_context(|| format!("Failed to read script: {}", cmd.script.display()))
    }
}

/// Summary of a script run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Execute every command in `script`, returning the rendered replies.
///
/// Blank lines and `#` comments are skipped. With `answer_prompts`, the line
/// following a search that found something is consumed as its answer.
pub fn run_script(
    shell: &mut Shell,
    script: &str,
    answer_prompts: bool,
) -> (Vec<Reply>, RunSummary) {
    let mut replies = Vec::new();
    let mut summary = RunSummary::default();
    let mut lines = script
        .lines()
        .filter(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'));

    while let Some(line) = lines.next() {
        let reply = shell.execute(line);
        summary.executed += 1;
        if !reply.ok {
            summary.failed += 1;
        }
        let exit = reply.exit;
        replies.push(reply);
        if exit {
            break;
        }

        if answer_prompts && shell.awaiting_answer() {
            let answer = lines.next().unwrap_or_default();
            if let Some(reply) = shell.answer(answer) {
                if !reply.ok {
                    summary.failed += 1;
                }
                replies.push(reply);
            }
        }
    }

    (replies, summary)
}

pub async fn run_cmd(cmd: RunCmd, player: VideoPlayer, output: &Output) -> ExitCode {
    let script = match read_script(&cmd).await {
        Ok(s) => s,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::InvalidArgs),
    };

    let mut shell = Shell::new(player);
    let (replies, summary) = run_script(&mut shell, &script, cmd.answer_prompts);

    for reply in &replies {
        if let Err(e) = print_reply(reply, output) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    }

    tracing::debug!(
        executed = summary.executed,
        failed = summary.failed,
        "Script finished"
    );

    if cmd.strict && summary.failed > 0 {
        return output.error(
            format!("{} of {} commands failed", summary.failed, summary.executed),
            ExitCode::CommandFailed,
        );
    }
    ExitCode::Success
}

// =============================================================================
// One-shot Queries
// =============================================================================

pub fn list_cmd(player: &VideoPlayer, output: &Output) -> ExitCode {
    let entries = player.list_all();

    if output.json {
        if let Err(e) = output.print(&entries) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        for line in listing_lines(&entries) {
            output.text(line);
        }
    }
    ExitCode::Success
}

pub fn search_cmd(cmd: SearchCmd, player: &VideoPlayer, output: &Output) -> ExitCode {
    let results = if cmd.tag {
        player.search_by_tag(&cmd.term)
    } else {
        player.search(&cmd.term)
    };

    if results.is_empty() {
        if output.json {
            return output.error(results.to_string(), ExitCode::NoResults);
        }
        output.text(&results);
        return ExitCode::NoResults;
    }

    if output.json {
        if let Err(e) = output.print(&results) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.text(&results);
    }
    ExitCode::Success
}

pub fn count_cmd(player: &VideoPlayer, output: &Output) -> ExitCode {
    let videos = player.number_of_videos();

    if output.json {
        if let Err(e) = output.print(CountResponse { videos }) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.text(format!("{} videos in the library", videos));
    }
    ExitCode::Success
}
