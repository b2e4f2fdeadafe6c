/// Benchmark runner for the gaff interpreter.
///
/// Times representative scripts and then checks their results, so both
/// slowdowns and wrong answers show up in one run.

extern crate gaff;

use std::sync::Arc;
use std::time::{Duration, Instant};

use gaff::parser::parse_to_ast;
use gaff::runner::ds::env::{Bindings, EvalContext, OutputSink};
use gaff::runner::ds::value::Value;
use gaff::runner::eval::statement::execute_statement;

fn quiet_sink() -> OutputSink {
    Arc::new(|_: &str| {})
}

/// Run a benchmark and return the execution time.
fn run_benchmark(name: &str, code: &str, iterations: u32) -> Duration {
    let script = parse_to_ast(code).expect(&format!("Failed to parse benchmark: {}", name));

    let start = Instant::now();

    for _ in 0..iterations {
        let mut ctx = EvalContext::new(Bindings::new(), quiet_sink(), "bench");
        for stmt in &script.body {
            let _ = execute_statement(stmt, &mut ctx);
        }
    }

    start.elapsed()
}

/// Get the result of running code.
fn run_and_get_var(code: &str, var_name: &str) -> Value {
    let script = parse_to_ast(code).unwrap();
    let mut ctx = EvalContext::new(Bindings::new(), quiet_sink(), "bench");
    for stmt in &script.body {
        let _ = execute_statement(stmt, &mut ctx);
    }
    ctx.into_globals()
        .get(var_name)
        .cloned()
        .unwrap_or(Value::None)
}

// ============================================================================
// Benchmark definitions
// ============================================================================

const BENCH_FIBONACCI: &str = r#"
n = 20;
a = 0;
b = 1;
for i in range(n) {
    temp = a;
    a = b;
    b = temp + b;
}
"#;

const BENCH_LOOP_SUM: &str = r#"
total = 0;
for i in range(10000) {
    total += i;
}
"#;

const BENCH_NESTED_LOOPS: &str = r#"
count = 0;
for i in range(100) {
    for j in range(100) {
        count += 1;
    }
}
"#;

const BENCH_CONDITIONALS: &str = r#"
count = 0;
for i in range(1000) {
    if i % 2 == 0 {
        count += 1;
    } else {
        count += 2;
    }
}
"#;

const BENCH_WHILE_LOOP: &str = r#"
i = 0;
total = 0;
while i < 5000 {
    total += i;
    i += 1;
}
"#;

const BENCH_ARITHMETIC: &str = r#"
result = 0;
for i in range(1, 1000) {
    result = result + i * 2 - i // 2;
}
"#;

const BENCH_FACTORIAL: &str = r#"
n = 12;
result = 1;
for i in range(2, n + 1) {
    result *= i;
}
"#;

const BENCH_PRIME_SIEVE: &str = r#"
count = 0;
for n in range(2, 100) {
    is_prime = true;
    i = 2;
    while i * i <= n {
        if n % i == 0 {
            is_prime = false;
            break;
        }
        i += 1;
    }
    if is_prime {
        count += 1;
    }
}
"#;

const BENCH_GCD: &str = r#"
result = 0;
for k in range(100) {
    a = 48;
    b = 18;
    while b != 0 {
        temp = b;
        b = a % b;
        a = temp;
    }
    result += a;
}
"#;

const BENCH_RECURSIVE_FIB: &str = r#"
fn fib(n) {
    if n < 2 {
        return n;
    }
    return fib(n - 1) + fib(n - 2);
}
result = fib(15);
"#;

const BENCH_STRING_BUILD: &str = r#"
out = "";
for i in range(200) {
    out += "x";
}
n = len(out);
"#;

fn main() {
    println!("=======================================================");
    println!("  Gaff Interpreter - Performance Benchmarks");
    println!("=======================================================\n");

    let benchmarks: Vec<(&str, &str, u32)> = vec![
        ("Fibonacci (n=20)", BENCH_FIBONACCI, 1000),
        ("Loop Sum (10K iterations)", BENCH_LOOP_SUM, 100),
        ("Nested Loops (100x100)", BENCH_NESTED_LOOPS, 100),
        ("Conditionals (1K)", BENCH_CONDITIONALS, 500),
        ("While Loop (5K)", BENCH_WHILE_LOOP, 100),
        ("Arithmetic (1K)", BENCH_ARITHMETIC, 500),
        ("Factorial (n=12)", BENCH_FACTORIAL, 5000),
        ("Prime Sieve (<100)", BENCH_PRIME_SIEVE, 200),
        ("GCD (100 iterations)", BENCH_GCD, 200),
        ("Recursive Fib (n=15)", BENCH_RECURSIVE_FIB, 100),
        ("String Build (200 chars)", BENCH_STRING_BUILD, 200),
    ];

    println!("{:<30} {:>14}", "Benchmark", "Time");
    println!("{}", "-".repeat(46));

    let mut total = Duration::new(0, 0);

    for (name, code, iterations) in &benchmarks {
        let duration = run_benchmark(name, code, *iterations);
        total += duration;
        println!("{:<30} {:>12.2?}", name, duration);
    }

    println!("{}", "-".repeat(46));
    println!("{:<30} {:>12.2?}", "TOTAL", total);

    // Verify correctness
    println!("\n=======================================================");
    println!("  Correctness Verification");
    println!("=======================================================\n");

    let verifications: Vec<(&str, &str, &str, i128)> = vec![
        ("Fibonacci", BENCH_FIBONACCI, "a", 6765),
        ("Loop Sum", BENCH_LOOP_SUM, "total", 49_995_000),
        ("Nested Loops", BENCH_NESTED_LOOPS, "count", 10_000),
        ("Conditionals", BENCH_CONDITIONALS, "count", 1_500),
        ("While Loop", BENCH_WHILE_LOOP, "total", 12_497_500),
        ("Arithmetic", BENCH_ARITHMETIC, "result", 749_500),
        ("Factorial", BENCH_FACTORIAL, "result", 479_001_600),
        ("Prime Count", BENCH_PRIME_SIEVE, "count", 25),
        ("GCD", BENCH_GCD, "result", 600),
        ("Recursive Fib", BENCH_RECURSIVE_FIB, "result", 610),
        ("String Build", BENCH_STRING_BUILD, "n", 200),
    ];

    println!("{:<20} {:>14} {:>14} {:>4}", "Test", "Expected", "Actual", "");
    println!("{}", "-".repeat(56));

    for (name, code, var, expected) in verifications {
        let actual = match run_and_get_var(code, var) {
            Value::Int(n) => n,
            _ => -1,
        };
        let status = if actual == expected { "✓" } else { "✗" };
        println!("{:<20} {:>14} {:>14} {:>4}", name, expected, actual, status);
    }
}
