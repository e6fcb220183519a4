//! Interactive chat loop

use super::commands::print_status;
use super::output::Output;
use crate::agent::format::EXAMPLE_QUERIES;
use crate::agent::TransitAgent;

/// Input that ends the session
const QUIT_WORDS: &[&str] = &["quit", "exit", "q"];

enum Input<'a> {
    Quit,
    Status,
    Recent,
    Help,
    Empty,
    Query(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "" => Input::Empty,
        word if QUIT_WORDS.contains(&word) => Input::Quit,
        "status" => Input::Status,
        "recent" => Input::Recent,
        "help" => Input::Help,
        _ => Input::Query(line),
    }
}

fn print_help(output: &Output) {
    output.header("Commands");
    output.list_item("status   OTP and component status");
    output.list_item("recent   recently used places");
    output.list_item("help     this message");
    output.list_item("quit     leave (also: exit, q)");
    output.subheader("Example questions");
    for example in EXAMPLE_QUERIES {
        output.list_item(example);
    }
}

/// Run the chat loop until the user quits or stdin closes
pub async fn run(agent: &TransitAgent, output: &Output) {
    output.banner();

    let status = agent.check_system_status().await;
    if !status.is_healthy() {
        output.warning(&format!(
            "OTP server at {} is {}; replies will use basic route information",
            status.otp_url,
            status.otp.label()
        ));
    }
    output.hint("Ask in English or Arabic. Type 'help' for commands, 'quit' to leave.");

    loop {
        let Some(line) = output.prompt("You") else {
            output.newline();
            break;
        };

        match classify(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Help => print_help(output),
            Input::Status => {
                let status = agent.check_system_status().await;
                print_status(&status, output);
            }
            Input::Recent => {
                let recent = agent.memory().recent_locations(10);
                output.header("Recent Places");
                if recent.is_empty() {
                    output.info("No recent places yet");
                }
                for place in recent {
                    output.list_item(&place.name);
                }
            }
            Input::Query(query) => {
                let reply = agent.process_query(query).await;
                output.answer(&reply.text);
            }
        }
    }

    output.info("Goodbye! مع السلامة");
}
