use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::{fs::read_to_string, process::ExitCode};

use plox::diagnostic::{pretty::PrettyReporter, Diagnostic, ErrorReporter, StderrReporter};
use plox::interpreter::context::StdioContext;
use plox::session::Session;

const EXIT_DATA_ERROR: u8 = 65;

#[derive(Debug, Parser)]
#[clap(name = "plox", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: PloxCommand,
}

#[derive(Debug, Subcommand)]
pub enum PloxCommand {
    /// List the tokens of a source file.
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    /// Print the statements of a source file as S-expressions.
    Parse {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "sexpr")]
        format: ExpressionFormat,
        #[clap(long = "diagnostics", value_enum, default_value = "basic")]
        diagnostics: DiagnosticStyle,
    },
    /// Run a source file.
    Run {
        path: PathBuf,
        #[clap(long = "diagnostics", value_enum, default_value = "basic")]
        diagnostics: DiagnosticStyle,
    },
    /// Start an interactive prompt.
    Prompt,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ExpressionFormat {
    Debug,
    #[clap(name = "sexpr")]
    SExpr,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum DiagnosticStyle {
    Basic,
    Pretty,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    env_logger::init();
    let args = CLArgs::parse();
    let succeeded = match args.routine {
        PloxCommand::Tokenize { path, format } => {
            eprintln!("Tokenizing {:?}...", path);
            let src = read_to_string(path)?;
            tokenize(&src, &format)
        }
        PloxCommand::Parse {
            path,
            format,
            diagnostics,
        } => {
            eprintln!("Parsing {:?}...", path);
            let src = read_to_string(&path)?;
            match diagnostics {
                DiagnosticStyle::Basic => parse(&src, &format, StderrReporter),
                DiagnosticStyle::Pretty => parse(&src, &format, pretty_reporter(&src, &path)),
            }
        }
        PloxCommand::Run { path, diagnostics } => {
            eprintln!("Running {:?}...", path);
            let src = read_to_string(&path)?;
            match diagnostics {
                DiagnosticStyle::Basic => run(&src, StderrReporter),
                DiagnosticStyle::Pretty => run(&src, pretty_reporter(&src, &path)),
            }
        }
        PloxCommand::Prompt => prompt()?,
    };

    if succeeded {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_DATA_ERROR))
    }
}

fn pretty_reporter<'src>(src: &'src str, path: &Path) -> PrettyReporter<'src> {
    PrettyReporter::new(src, path.to_string_lossy())
}

fn tokenize(src: &str, format: &TokenFormat) -> bool {
    use plox::lexer::formatter::{BasicFormatter, DebugFormatter, TokenFormatter};
    use plox::lexer::Lexer;

    let mut scanner = Lexer::new(src);
    let formatter: Box<dyn TokenFormatter> = match format {
        TokenFormat::Debug => Box::new(DebugFormatter),
        TokenFormat::Basic => Box::new(BasicFormatter),
    };
    let mut succeeded = true;
    loop {
        match scanner.next_token() {
            Ok(token) => {
                println!("{}", formatter.format(&token));
                if token.is_eof() {
                    return succeeded;
                }
            }
            Err(error) => {
                eprintln!("{}", formatter.format_lexical_error(&error));
                succeeded = false;
            }
        };
    }
}

fn parse<R: ErrorReporter>(src: &str, format: &ExpressionFormat, mut reporter: R) -> bool {
    use plox::lexer::Lexer;
    use plox::parser::{
        formatter::{DebugExpressionFormatter, ExpressionFormatter, SExpressionFormatter},
        Parser,
    };

    let (tokens, had_errors) = Lexer::new(src).scan(&mut reporter);
    if had_errors {
        return false;
    }
    let (statements, had_errors) = Parser::new(tokens).parse(&mut reporter);

    let formatter: Box<dyn ExpressionFormatter> = match format {
        ExpressionFormat::Debug => Box::new(DebugExpressionFormatter),
        ExpressionFormat::SExpr => Box::new(SExpressionFormatter),
    };
    for statement in statements.iter() {
        println!("{}", formatter.format_statement(statement));
    }
    !had_errors
}

fn run<R: ErrorReporter>(src: &str, reporter: R) -> bool {
    let mut session = Session::new(StdioContext, reporter);
    session.run(src).is_ok()
}

fn prompt() -> Result<bool> {
    let mut session = Session::new(StdioContext, StderrReporter);
    let stdin = std::io::stdin();
    let mut line_number = 0u32;
    let mut line = String::new();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        line_number += 1;

        let source = line.trim_end_matches(['\n', '\r']);
        if source.is_empty() || source == "exit" {
            break;
        }

        if let Err(error) = session.run(source) {
            StderrReporter.report(&Diagnostic::general(line_number, error.to_string()));
        }
        println!();
    }
    Ok(true)
}
