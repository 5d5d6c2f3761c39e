//! Feeds stdin to the parser in small chunks and prints the resulting tree.
//!
//! ```sh
//! echo '{ "greeting" , ["hello", "doll"] }' | cargo run --example stream_stdin
//! ```

use std::io::Read;
use std::process::ExitCode;

use jsonbaud::{ParseStatus, Parser, TreeBuilder};

fn main() -> ExitCode {
    let mut parser = Parser::new();
    let mut tree = TreeBuilder::new();

    let mut stdin = std::io::stdin().lock();
    let mut buf = [0u8; 512];
    // Chunk boundaries may split a UTF-8 sequence; carry the incomplete
    // tail bytes over to the next read.
    let mut carry: Vec<u8> = Vec::new();

    loop {
        let n = match stdin.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) => {
                eprintln!("read error: {err}");
                return ExitCode::FAILURE;
            }
        };
        carry.extend_from_slice(&buf[..n]);
        let valid = match std::str::from_utf8(&carry) {
            Ok(text) => text.len(),
            Err(err) => err.valid_up_to(),
        };
        parser.feed(std::str::from_utf8(&carry[..valid]).unwrap());
        carry.drain(..valid);

        match parser.parse(&mut tree) {
            Ok(ParseStatus::Pending) => {}
            Ok(ParseStatus::Complete) => unreachable!("completion requires closure"),
            Err(err) => {
                eprintln!("parse error: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    // The scanner is greedy: after closing, keep calling until it has
    // drained any trailing token and the automaton reaches a decision.
    parser.close();
    loop {
        match parser.parse(&mut tree) {
            Ok(ParseStatus::Pending) => {}
            Ok(ParseStatus::Complete) => break,
            Err(err) => {
                eprintln!("parse error: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    match tree.into_root() {
        Some(root) => println!("{root}"),
        None => println!("null"),
    }
    ExitCode::SUCCESS
}
