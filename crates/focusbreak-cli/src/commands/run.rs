//! The interactive session loop.
//!
//! A stdin reader thread feeds line commands into a channel; the main loop
//! waits on that channel with a one-second timeout. Every state mutation
//! happens on this thread - the channel is the single timer queue.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use focusbreak_core::error::Result;
use focusbreak_core::{Event, SessionController, SessionEngine, SystemClock};

use crate::presenter::TerminalPresenter;

enum Input {
    Toggle,
    Rest,
    Reset,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "t" | "toggle" => Input::Toggle,
        "r" | "rest" => Input::Rest,
        "reset" => Input::Reset,
        "q" | "quit" | "exit" => Input::Quit,
        other => Input::Unknown(other.to_string()),
    }
}

pub fn run(seed: Option<u64>, json: bool) -> Result<()> {
    let presenter = TerminalPresenter::new()?;
    let engine = SessionEngine::with_clock(Box::new(SystemClock), seed);

    println!("focusbreak: t(oggle) starts and pauses, r(est) takes a break now, reset, q(uit)");
    let mut controller = SessionController::new(engine, presenter);

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(line) => {
                let event = match parse_input(&line) {
                    Input::Toggle => controller.toggle(),
                    Input::Rest => controller.rest(),
                    Input::Reset => controller.reset(),
                    Input::Quit => break,
                    Input::Unknown(cmd) => {
                        if !cmd.is_empty() {
                            eprintln!("unknown command: {cmd}");
                        }
                        None
                    }
                };
                if let Some(event) = event {
                    emit(&event, json)?;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                for event in controller.tick() {
                    emit(&event, json)?;
                }
                // JSON mode doubles as a status poll: one snapshot per tick.
                emit(&controller.engine().snapshot(), json)?;
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    controller.shutdown();
    println!();
    Ok(())
}

fn emit(event: &Event, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    Ok(())
}
