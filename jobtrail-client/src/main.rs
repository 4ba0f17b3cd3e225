//! jobtrail headless runner.
//!
//! `jobtrail --config <path>` prints the board.
//! `jobtrail --config <path> move <job-id> <column-id> [index]` moves a job
//! the way a drag would, then prints the board.

use jobtrail_board::{Board, BoardStatus, DropResult, EMPTY_BOARD_MESSAGE};
use jobtrail_client::{ClientConfig, ClientError, FileOverrides};
use jobtrail_core::{ColumnId, JobId};
use jobtrail_storage::OverrideStore;
use std::process::ExitCode;

#[derive(Debug)]
enum Command {
    Show,
    Move {
        job_id: JobId,
        column: ColumnId,
        index: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = jobtrail_client::init_tracing(config.log.json) {
        eprintln!("Failed to init tracing: {}", err);
    }

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "jobtrail failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &ClientConfig) -> Result<(), ClientError> {
    let command = parse_command(std::env::args().skip(1))?;
    let mut board = jobtrail_client::connect(config)?;
    board.refresh().await;

    if let Command::Move { job_id, column, index } = command {
        move_job(&mut board, job_id, column, index).await;
    }

    print_board(&board);
    Ok(())
}

async fn move_job(board: &mut Board<FileOverrides>, job_id: JobId, column: ColumnId, index: usize) {
    let Some((source, position)) = board.columns().locate(job_id) else {
        tracing::warn!(job_id = %job_id, "Job is not on the board");
        return;
    };

    board.on_drag_start(job_id);
    let update = board.on_drop(Some(DropResult::new(source, position, column, index)));
    if update.is_some() {
        board.process_next_event().await;
    }
}

fn print_board<O: OverrideStore>(board: &Board<O>) {
    match board.status() {
        BoardStatus::Empty => println!("{}", EMPTY_BOARD_MESSAGE),
        BoardStatus::Unloaded | BoardStatus::Loading => println!("Loading..."),
        BoardStatus::Ready => {
            for column in board.columns().iter() {
                println!("{} ({})", column.name, column.len());
                for job in &column.items {
                    println!("  [{}] {} at {}", job.id, job.job_title, job.company_title);
                }
            }
        }
    }
    let pins = board.map_pins();
    if !pins.is_empty() {
        println!("{} job(s) on the map", pins.len());
    }
    for notice in board.notifications() {
        println!("{:?}: {}", notice.level, notice.message);
    }
}

fn parse_command(args: impl Iterator<Item = String>) -> Result<Command, ClientError> {
    let mut positional = Vec::new();
    let mut args = args;
    while let Some(arg) = args.next() {
        if arg == "--config" {
            args.next();
        } else {
            positional.push(arg);
        }
    }

    match positional.as_slice() {
        [] => Ok(Command::Show),
        [cmd, job_id, column, rest @ ..] if cmd == "move" && rest.len() <= 1 => {
            let job_id = job_id
                .parse::<i64>()
                .map(JobId::new)
                .map_err(|e| ClientError::Usage(format!("invalid job id: {}", e)))?;
            let column = column
                .parse::<ColumnId>()
                .map_err(|e| ClientError::Usage(e.to_string()))?;
            let index = match rest.first() {
                Some(index) => index
                    .parse::<usize>()
                    .map_err(|e| ClientError::Usage(format!("invalid index: {}", e)))?,
                None => 0,
            };
            Ok(Command::Move { job_id, column, index })
        }
        _ => Err(ClientError::Usage(
            "usage: jobtrail --config <path> [move <job-id> <column-id> [index]]".to_string(),
        )),
    }
}
