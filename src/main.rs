// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! httptap CLI - Instrumented HTTP fetches
//!
//! Example usage and demonstration of the httptap library.

use std::env;
use std::process::ExitCode;

use httptap::{instrument, transport, Request};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("httptap=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "fetch" => {
            if args.len() < 3 {
                eprintln!("Usage: httptap fetch <url>");
                return ExitCode::from(1);
            }
            fetch_url(&args[2]).await
        }
        "post" => {
            if args.len() < 4 {
                eprintln!("Usage: httptap post <url> <body>");
                return ExitCode::from(1);
            }
            post_url(&args[2], &args[3]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("httptap {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"httptap - Transparent HTTP Traffic Instrumentation

USAGE:
    httptap <COMMAND> [OPTIONS]

COMMANDS:
    fetch <url>          GET a URL through the instrumented async stack
    post <url> <body>    POST a body through the instrumented async stack
    version              Print version
    help                 Print this help

The request and response are logged as delimited blocks on stderr with
sensitive headers redacted; OAuth traffic gets distinct banners."#
    );
}

async fn fetch_url(url: &str) -> ExitCode {
    instrument::enable();

    match transport::async_stack().get(url).await {
        Ok(response) => {
            println!("{}", response.text_lossy());
            instrument::disable();
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            instrument::disable();
            ExitCode::from(1)
        }
    }
}

async fn post_url(url: &str, body: &str) -> ExitCode {
    instrument::enable();

    let request = match Request::post(url) {
        Ok(request) => request.body(body.to_string()),
        Err(e) => {
            eprintln!("Invalid URL: {}", e);
            instrument::disable();
            return ExitCode::from(1);
        }
    };

    match transport::async_stack().execute(request).await {
        Ok(response) => {
            println!("{}", response.text_lossy());
            instrument::disable();
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            instrument::disable();
            ExitCode::from(1)
        }
    }
}
