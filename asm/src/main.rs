use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};

use color_print::{cformat, cprintln};

use fxasm::error::{AtLine, Error};
use fxasm::{label, parser};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file (`-` or absent reads stdin)
    input: Option<String>,

    /// Output file (absent writes stdout)
    #[clap(short, long)]
    output: Option<String>,

    /// Emit 8-digit hexadecimal instead of binary strings
    #[clap(short = 'x', long)]
    hex: bool,

    /// Stop after label resolution and print the rewritten lines
    #[clap(short = 'E', long)]
    resolve_only: bool,

    /// Dump a listing of the assembled program
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;
    let args: Args = Args::parse();

    let (path, raw_lines) = match read_input(&args) {
        Ok(ok) => ok,
        Err(err) => fail(err),
    };

    let mut token_lines: Vec<Vec<String>> =
        raw_lines.iter().map(|l| label::tokenize(l)).collect();

    if let Err(err) = label::resolve(&mut token_lines) {
        fail_at(&path, &raw_lines, err);
    }

    if args.resolve_only {
        let resolved: Vec<String> = token_lines.iter().map(|l| l.join(" ")).collect();
        if let Err(err) = write_output(&args, &resolved) {
            fail(err);
        }
        return;
    }

    // (source index, encoded word) per instruction, in program order.
    let mut words: Vec<(usize, u32)> = vec![];
    for (idx, tokens) in token_lines.iter().enumerate() {
        if tokens.is_empty() {
            continue;
        }
        match parser::decode(&tokens.join(" ")) {
            Ok(decoded) => words.push((idx, decoded.to_bin())),
            Err(err) => fail_at(&path, &raw_lines, err.at(idx + 1)),
        }
    }

    let formatted: Vec<String> = words
        .iter()
        .map(|&(_, word)| {
            if args.hex {
                format!("{:08x}", word)
            } else {
                format!("{:032b}", word)
            }
        })
        .collect();
    if let Err(err) = write_output(&args, &formatted) {
        fail(err);
    }

    if args.dump {
        print_dump(&raw_lines, &words);
    }
}

fn fail(err: Error) -> ! {
    cprintln!("<red,bold>error</>: {}", err);
    std::process::exit(1);
}

fn fail_at(path: &str, raw_lines: &[String], err: AtLine) -> ! {
    let content = raw_lines
        .get(err.line - 1)
        .map(String::as_str)
        .unwrap_or("");
    err.kind.print_diag(path, err.line, content);
    std::process::exit(1);
}

fn read_input(args: &Args) -> Result<(String, Vec<String>), Error> {
    match args.input.as_deref() {
        Some(path) if path != "-" => {
            let file = std::fs::File::open(path)
                .map_err(|e| Error::FileOpen(path.to_string(), e))?;
            let lines = BufReader::new(file)
                .lines()
                .collect::<Result<Vec<_>, _>>()
                .map_err(Error::FileRead)?;
            Ok((path.to_string(), lines))
        }
        _ => {
            let lines = std::io::stdin()
                .lock()
                .lines()
                .collect::<Result<Vec<_>, _>>()
                .map_err(Error::FileRead)?;
            Ok(("<stdin>".to_string(), lines))
        }
    }
}

fn write_output(args: &Args, lines: &[String]) -> Result<(), Error> {
    match args.output.as_deref() {
        Some(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| Error::FileCreate(path.to_string(), e))?;
            write_lines(file, lines).map_err(|e| Error::FileWrite(path.to_string(), e))
        }
        None => write_lines(std::io::stdout().lock(), lines)
            .map_err(|e| Error::FileWrite("<stdout>".to_string(), e)),
    }
}

fn write_lines(mut sink: impl Write, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(sink, "{}", line)?;
    }
    Ok(())
}

fn print_dump(raw_lines: &[String], words: &[(usize, u32)]) {
    let encoded: HashMap<usize, (usize, u32)> = words
        .iter()
        .enumerate()
        .map(|(addr, &(idx, word))| (idx, (addr, word)))
        .collect();
    for (idx, raw) in raw_lines.iter().enumerate() {
        let head = match encoded.get(&idx) {
            Some(&(addr, word)) => cformat!("[<yellow>{:04X}</>] {:08X}", addr, word),
            None => " ".repeat(15),
        };
        cprintln!("{} | <blue>{:>4}:</> {}", head, idx + 1, raw);
    }
}
