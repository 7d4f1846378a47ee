//! Interactive shell: live filter, debounced search, and mutations.

use std::io::Write as _;

use anyhow::Result;
use taskdeck_app::TaskSession;
use taskdeck_core::task_patch::{TaskDraft, TaskPatch};
use taskdeck_core::{StatusFilter, TaskId};
use taskdeck_gateway_http::HttpGateway;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::{render_stats, render_tasks, summary};

const HELP: &str = "\
commands:
  list                 show visible tasks
  filter <f>           all | active | completed
  search <term>        debounced text search
  clear                clear the search term
  add <text>           create a task
  toggle <id>          flip completion
  rm <id>              delete a task
  mv <from> <to>       move between positions (1-based)
  stats                aggregate counts
  refresh              reload from the backend
  quit                 leave the shell";

/// Drive the session from stdin until EOF or `quit`.
pub async fn run(mut session: TaskSession<HttpGateway>) -> Result<()> {
    println!("taskdeck shell; type `help` for commands");
    render(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let words = match shell_words::split(&line) {
            Ok(words) => words,
            Err(err) => {
                println!("parse error: {err}");
                continue;
            }
        };
        let Some((cmd, rest)) = words.split_first() else {
            continue;
        };

        match cmd.as_str() {
            "help" => println!("{HELP}"),
            "list" | "ls" => render(&session),
            "filter" => match rest.first().map_or("all", String::as_str).parse::<StatusFilter>() {
                Ok(filter) => {
                    session.set_filter(filter);
                    render(&session);
                }
                Err(err) => println!("{err}"),
            },
            "search" => {
                let term = rest.join(" ");
                let mut rx = session.subscribe_search();
                session.search(&term);
                if !term.trim().is_empty() {
                    // Wait out the quiet window so the listing shows the
                    // committed term, not the stale one.
                    rx.changed().await.ok();
                }
                render(&session);
            }
            "clear" => {
                session.search("");
                render(&session);
            }
            "add" => {
                let text = rest.join(" ");
                match session.create(TaskDraft::new(text)).await {
                    Ok(task) => println!("created {}", summary(task)),
                    Err(err) => println!("error: {err}"),
                }
            }
            "toggle" => {
                let Some(id) = parse_id(rest) else { continue };
                match session.store().find(id).map(|task| task.completed) {
                    None => println!("task {id} not found"),
                    Some(completed) => {
                        match session.update(id, TaskPatch::completed(!completed)).await {
                            Ok(task) => println!("updated {}", summary(task)),
                            Err(err) => println!("error: {err}"),
                        }
                    }
                }
            }
            "rm" => {
                let Some(id) = parse_id(rest) else { continue };
                match session.delete(id).await {
                    Ok(()) => println!("deleted task {id}"),
                    Err(err) => println!("error: {err}"),
                }
            }
            "mv" => {
                let Some((source, destination)) = parse_positions(rest) else {
                    continue;
                };
                match session.reorder(source - 1, Some(destination - 1)).await {
                    Ok(()) => render(&session),
                    Err(err) => println!("error: {err}"),
                }
            }
            "stats" => render_stats(&session.stats()),
            "refresh" => match session.initialize().await {
                Ok(()) => render(&session),
                Err(err) => println!("error: {err}"),
            },
            "quit" | "exit" => break,
            other => println!("unknown command: {other} (try `help`)"),
        }
    }

    Ok(())
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn render(session: &TaskSession<HttpGateway>) {
    let term = session.search_term();
    if term.is_empty() {
        println!("[{}]", session.filter());
    } else {
        println!("[{} / \"{term}\"]", session.filter());
    }
    render_tasks(&session.visible_tasks());
}

fn parse_id(args: &[String]) -> Option<TaskId> {
    let Some(raw) = args.first() else {
        println!("expected a task id");
        return None;
    };
    match raw.parse() {
        Ok(id) => Some(id),
        Err(err) => {
            println!("invalid task id {raw}: {err}");
            None
        }
    }
}

fn parse_positions(args: &[String]) -> Option<(usize, usize)> {
    let (Some(source), Some(destination)) = (args.first(), args.get(1)) else {
        println!("expected source and destination positions");
        return None;
    };
    match (source.parse::<usize>(), destination.parse::<usize>()) {
        (Ok(source), Ok(destination)) if source > 0 && destination > 0 => {
            Some((source, destination))
        }
        _ => {
            println!("positions are 1-based integers, as shown by `list`");
            None
        }
    }
}
