//! Build and inspect rollup input payloads from the command line.
//!
//! Type commands like:
//!   createAccount alice 200
//!   sendBid alice 150
//!   endAuction
//!   checkState
//! to get the `0x...` payload to submit, or paste a `0x...` payload to
//! see the JSON document inside it.

use std::error::Error;
use std::io::{self, BufRead, Write};

use auction_core::{AdvanceCommand, CreateAccount, InspectQuery, SendBid};
use auction_protocol::payload::decode_text;
use auction_protocol::{encode_advance, encode_inspect, PAYLOAD_PREFIX};

fn main() -> Result<(), Box<dyn Error>> {
    println!("Enter commands (createAccount NAME BALANCE | sendBid NAME VALUE | endAuction | checkState)");
    println!("or a 0x... payload to decode. Type 'quit' or 'exit' to leave.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!(">> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        if trimmed.starts_with(PAYLOAD_PREFIX) {
            match decode_text(trimmed) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("Could not decode payload: {}", e),
            }
            continue;
        }

        match encode_line(trimmed) {
            Ok(payload) => println!("{}", payload),
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}

fn encode_line(line: &str) -> Result<String, Box<dyn Error>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let payload = match tokens.as_slice() {
        ["createAccount", name, balance] => encode_advance(&AdvanceCommand::CreateAccount(CreateAccount {
            name: name.to_string(),
            balance: balance.parse()?,
        }))?,
        ["sendBid", name, value] => encode_advance(&AdvanceCommand::SendBid(SendBid {
            name: name.to_string(),
            value: value.parse()?,
        }))?,
        ["endAuction"] => encode_advance(&AdvanceCommand::EndAuction)?,
        ["checkState"] => encode_inspect(&InspectQuery::CheckState)?,
        _ => return Err(format!("Could not parse command: {}", line).into()),
    };

    Ok(payload)
}
