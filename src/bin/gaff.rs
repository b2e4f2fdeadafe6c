//! CLI wrapper for the gaff interpreter.
//!
//! Usage:
//!   gaff <file.gaff>            # Execute a script file
//!   gaff -e "code"              # Evaluate gaff code
//!   gaff                        # Start REPL (interactive mode)

use gaff::parser;
use gaff::runner;
use gaff::runner::ds::env::{stdout_sink, Bindings, EvalContext};
use gaff::runner::ds::value::Value;
use gaff::runner::eval::statement::execute_statement;
use gaff::runner::eval::CompletionType;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => {
            // No arguments: start REPL
            run_repl();
        }
        2 => {
            let arg = &args[1];
            // Check for help flags
            if arg == "-h" || arg == "--help" {
                print_usage();
                process::exit(0);
            }
            // Single argument: execute file
            run_file(arg);
        }
        3 if args[1] == "-e" || args[1] == "--eval" => {
            // -e flag: evaluate expression
            let code = &args[2];
            eval_code(code);
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("gaff - embedded plugin scripting");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  gaff <file.gaff>            Execute a script file");
    eprintln!("  gaff -e \"code\"              Evaluate gaff code");
    eprintln!("  gaff --eval \"code\"          Evaluate gaff code");
    eprintln!("  gaff                        Start REPL (interactive mode)");
}

fn run_file(filename: &str) {
    let source = match fs::read_to_string(filename) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", filename, e);
            process::exit(1);
        }
    };

    if let Err(e) = runner::execute(&source, filename, Bindings::new(), stdout_sink()) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn eval_code(code: &str) {
    let ast = match parser::parse_to_ast(code) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            process::exit(1);
        }
    };

    let mut ctx = EvalContext::new(Bindings::new(), stdout_sink(), "eval");

    let mut last_value: Option<Value> = None;
    for stmt in &ast.body {
        match execute_statement(stmt, &mut ctx) {
            Ok(completion) => match completion.completion_type {
                CompletionType::Normal => {
                    last_value = completion.value;
                }
                CompletionType::Return => {
                    eprintln!("'return' outside function");
                    process::exit(1);
                }
                CompletionType::Break => {
                    eprintln!("'break' outside loop");
                    process::exit(1);
                }
                CompletionType::Continue => {
                    eprintln!("'continue' outside loop");
                    process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }

    // Print the last value if it's not none
    if let Some(val) = last_value {
        if !matches!(val, Value::None) {
            println!("{}", val.repr());
        }
    }
}

fn run_repl() {
    println!("gaff v0.1.0 - embedded plugin scripting");
    println!("Type gaff code and press Enter. Type .exit to quit.");
    println!();

    let mut ctx = EvalContext::new(Bindings::new(), stdout_sink(), "repl");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().unwrap();

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }

        let input = input.trim();

        // Handle special commands
        if input == ".exit" || input == ".quit" {
            break;
        }

        if input.is_empty() {
            continue;
        }

        // Try to parse and execute
        let ast = match parser::parse_to_ast(input) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Parse error: {}", e);
                continue;
            }
        };

        for stmt in &ast.body {
            match execute_statement(stmt, &mut ctx) {
                Ok(completion) => match completion.completion_type {
                    CompletionType::Normal => {
                        // Echo non-none values
                        if let Some(val) = completion.value {
                            if !matches!(val, Value::None) {
                                println!("{}", val.repr());
                            }
                        }
                    }
                    CompletionType::Return => eprintln!("'return' outside function"),
                    CompletionType::Break => eprintln!("'break' outside loop"),
                    CompletionType::Continue => eprintln!("'continue' outside loop"),
                },
                Err(e) => {
                    eprintln!("{}", e);
                }
            }
        }
    }

    println!("Goodbye!");
}
