use optwack::prelude::*;
use std::{hint::black_box, process::ExitCode, time::Instant};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const BENCH_ARGS: [&str; 9] = [
    "", "in.txt", "-vvx", "--output", "out.txt", "-j", "8", "--color=red", "extra",
];

#[derive(Debug, Default)]
struct Settings<'s> {
    verbose: u32,
    output: Option<&'s str>,
    color: Option<&'s str>,
    jobs: Option<u32>,
    bench: Option<u32>,
}

fn scan<'s>(args: &mut [&'s str], report: bool) -> Result<(Settings<'s>, usize), ArgError<'s>> {
    let mut settings = Settings::default();
    let mut scanner = Scanner::permuting(args);
    while scanner.advance() {
        let Some(option) = scanner.current() else {
            break;
        };
        let mut value = None;
        if scanner.matches("v|verbose") {
            settings.verbose += 1;
        } else if scanner.matches("o|output") {
            value = Some(scanner.value()?);
            settings.output = value;
        } else if scanner.matches("c|color=") {
            value = Some(scanner.value()?);
            settings.color = value;
        } else if scanner.matches("j|jobs") {
            let jobs: u32 = scanner.parsed_value()?;
            settings.jobs = Some(jobs);
            if report {
                println!("option: {option} = {jobs}");
            }
            continue;
        } else if scanner.matches("bench") {
            settings.bench = Some(scanner.parsed_value()?);
        } else {
            warn!(%option, "ignoring unknown option");
            if report {
                eprintln!("{}: unknown option '{option}'", scanner.program());
            }
            continue;
        }
        if report {
            match value {
                Some(value) => println!("option: {option} = {value}"),
                None => println!("option: {option}"),
            }
        }
    }
    Ok((settings, scanner.positional_start()))
}

fn bench(rounds: u32) {
    let start = Instant::now();
    for _ in 0..rounds {
        let mut args = black_box(BENCH_ARGS);
        let scanned = scan(&mut args, false).map(|(settings, first)| settings.verbose as usize + first);
        black_box(scanned.ok());
        black_box(&args);
    }
    let took = start.elapsed();
    println!("{rounds} permuting scans of {} args each took {took:?}", BENCH_ARGS.len());
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let owned: Vec<String> = std::env::args().collect();
    let mut args: Vec<&str> = owned.iter().map(String::as_str).collect();
    let (settings, first) = match scan(&mut args, true) {
        Ok(scanned) => scanned,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(rounds) = settings.bench {
        bench(rounds);
        return ExitCode::SUCCESS;
    }
    tracing::debug!(?settings, "scanned");
    for positional in &args[first..] {
        println!("positional: {positional}");
    }
    println!("argv after scan: {:?}", &args[1..]);
    ExitCode::SUCCESS
}
