use std::{
    fs::{read_dir, read_to_string},
    path::Path,
};

use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use plox::{
    diagnostic::{pretty::PrettyReporter, BufferedReporter, ErrorReporter},
    interpreter::{context::BufferedContext, value::LoxValue, TreeWalkInterpreter},
    lexer::Lexer,
    parser::Parser,
    session::{Session, SessionError},
};

#[test]
fn test_operator() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/operator");
    test_engine(input_dir)
}

#[test]
fn test_string() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/string");
    test_engine(input_dir)
}

#[test]
fn test_variable() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/variable");
    test_engine(input_dir)
}

#[test]
fn test_block() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/block");
    test_engine(input_dir)
}

#[test]
fn test_errors() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/errors");
    test_engine(input_dir)
}

fn run(source: &str) -> (Result<(), SessionError>, String, String) {
    let mut session = Session::new(BufferedContext::new(), BufferedReporter::new());
    let result = session.run(source);
    let (context, reporter) = session.finish();
    (result, context.into_data(), reporter.into_data())
}

#[test]
fn test_print_has_no_newline() {
    let (result, output, diagnostics) = run("print 1; print \"a\"; print nil; print true;");

    assert_eq!(result, Ok(()));
    assert_eq!(output, "1aniltrue");
    assert_eq!(diagnostics, "");
}

#[test]
fn test_number_display() {
    let (_, output, _) = run("print 3.0;");
    assert_eq!(output, "3");
    let (_, output, _) = run("print 0.5 * 3;");
    assert_eq!(output, "1.5");
    let (_, output, _) = run("print 1 / 0;");
    assert_eq!(output, "inf");
    assert_eq!(
        LoxValue::Number(1e23).to_string(),
        "100000000000000000000000"
    );
}

#[test]
fn test_runtime_error_format() {
    let (result, output, diagnostics) = run("var a = 1;\nprint a;\nprint a + nil;\nprint a;");

    assert_eq!(result, Err(SessionError::Runtime));
    assert_eq!(output, "1");
    assert_eq!(diagnostics, "operands must be numbers.\n[line 3]\n");
}

#[test]
fn test_both_operands_evaluated_before_type_check() {
    let (result, _, diagnostics) = run("print nil + missing;");

    assert_eq!(result, Err(SessionError::Runtime));
    assert_eq!(diagnostics, "undefined variable 'missing'.\n[line 1]\n");
}

#[test]
fn test_failed_assignment_does_not_define() {
    let mut session = Session::new(BufferedContext::new(), BufferedReporter::new());

    assert_eq!(session.run("x = 1;"), Err(SessionError::Runtime));
    assert!(!session.interpreter().environment().contains("x"));
    assert_eq!(session.run("var x = 2; print x;"), Ok(()));

    let (context, _) = session.finish();
    assert_eq!(context.into_data(), "2");
}

#[test]
fn test_session_keeps_globals_between_runs() {
    let mut session = Session::new(BufferedContext::new(), BufferedReporter::new());

    assert_eq!(session.run("var count = 1;"), Ok(()));
    assert_eq!(session.run("count = count + 1;"), Ok(()));
    assert_eq!(session.run("print count;"), Ok(()));
    assert!(session.reporter().diagnostics().is_empty());

    let (context, _) = session.finish();
    assert_eq!(context.into_data(), "2");
}

#[test]
fn test_parse_error_stops_session_before_interpretation() {
    let (result, output, diagnostics) = run("var ; print 1;");

    assert_eq!(result, Err(SessionError::Parse));
    assert_eq!(output, "");
    assert_eq!(diagnostics, "[line 1] Error at ';': Expect variable name.\n");
}

#[test]
fn test_salvaged_statements_still_run() {
    let mut reporter = BufferedReporter::new();
    let (tokens, _) = Lexer::new("var ; print 1;").scan(&mut reporter);
    let (statements, had_errors) = Parser::new(tokens).parse(&mut reporter);
    assert!(had_errors);

    let mut interpreter = TreeWalkInterpreter::new(BufferedContext::new());
    assert!(!interpreter.interpret(&statements, &mut reporter));
    assert_eq!(interpreter.into_context().into_data(), "1");
}

#[test]
fn test_lexical_error_stops_session() {
    let (result, output, diagnostics) = run("print 1;\nprint \"abc;");

    assert_eq!(result, Err(SessionError::Scan));
    assert_eq!(output, "");
    assert_eq!(diagnostics, "[line 2] Error: unterminated string\n");
}

#[test]
fn test_environment_values() {
    let mut session = Session::new(BufferedContext::new(), BufferedReporter::new());
    assert_eq!(session.run("var s = \"a\" + \"b\"; var n = -(1 + 1); var t = !nil;"), Ok(()));

    let environment = session.interpreter().environment();
    assert!(environment.contains("s"));
    assert!(environment.contains("n"));
    assert!(environment.contains("t"));
    assert!(!environment.contains("u"));
    assert_eq!(LoxValue::Number(-2.0).to_string(), "-2");
}

#[test]
fn test_nested_expression_runs() {
    let depth = 100;
    let source = format!(
        "print {}1{} + {}2;",
        "(".repeat(depth),
        ")".repeat(depth),
        "-".repeat(depth)
    );
    let (result, output, diagnostics) = run(&source);

    assert_eq!(result, Ok(()));
    assert_eq!(output, "3");
    assert_eq!(diagnostics, "");
}

#[test]
fn test_too_deep_expression_is_a_parse_error() {
    let depth = 5000;
    let source = format!("print {}1{};", "(".repeat(depth), ")".repeat(depth));
    let (result, output, _) = run(&source);

    assert_eq!(result, Err(SessionError::Parse));
    assert_eq!(output, "");
}

#[test]
fn test_pretty_reporter_mentions_message() {
    let source = "print 1 + \"a\";";
    let mut reporter = PrettyReporter::new(source, "inline.lox").without_color();
    let (tokens, _) = Lexer::new(source).scan(&mut reporter);
    let (statements, _) = Parser::new(tokens).parse(&mut reporter);

    let mut buffered = BufferedReporter::new();
    let mut interpreter = TreeWalkInterpreter::new(BufferedContext::new());
    assert!(interpreter.interpret(&statements, &mut buffered));

    let diagnostic = &buffered.diagnostics()[0];
    let rendered = reporter.render(diagnostic);
    assert!(rendered.contains("[line 1] operands must be numbers."));
    assert!(rendered.contains("inline.lox"));
    reporter.report(diagnostic);
}

struct TestCase {
    name: String,
    source: String,
    output: String,
    errors: String,
}

impl TestCase {
    pub fn check(&self) {
        let (_, output, diagnostics) = run(&self.source);
        assert_eq!(self.errors, diagnostics, "Failed test {} at diagnostics.", self.name);
        assert_eq!(self.output, output, "Failed test {} at print.", self.name);
    }
}

fn test_engine(input_dir: &Path) -> Result<()> {
    let mut succeeded = true;
    for entry in read_dir(input_dir).context("Failed to open input test data folder")? {
        let entry = entry?;
        let path = entry.path();

        let Some(extension) = path.extension() else {
            continue;
        };

        if extension != "lox" {
            continue;
        }

        println!("Parsing {path:?}");
        let test_case = parse_test_case(&path)?;
        println!("Checking {}", test_case.name);

        let res = std::panic::catch_unwind(|| {
            test_case.check();
        });
        if res.is_err() {
            println!("\tFails test case {}", test_case.name);
            succeeded = false;
        }
    }

    assert!(succeeded);
    Ok(())
}

fn parse_test_case(input_path: &Path) -> Result<TestCase> {
    let test_name = AsRef::<Path>::as_ref(
        input_path
            .file_name()
            .expect("File name can't be none as the path is to a real file."),
    )
    .to_string_lossy();

    let input = read_to_string(input_path).context("Failed to open input test data file")?;

    let mut expected_outputs = String::new();
    let mut expected_errors = String::new();

    for (line_index, line) in input.lines().enumerate() {
        let line_number = line_index + 1;
        if let Some(expected) = after(line, "// expect:") {
            expected_outputs.push_str(expected);
        } else if let Some(expected) = after(line, "// expect runtime error:") {
            expected_errors.push_str(&format!("{expected}\n[line {line_number}]\n"));
        } else if let Some(expected) = after(line, "// Error at") {
            expected_errors.push_str(&format!("[line {line_number}] Error at {expected}\n"));
        } else if let Some(comment_index) = line.find("// [line ") {
            let expected = line[comment_index + "// ".len()..].trim();
            if !expected.contains("] ") {
                return Err(eyre!("Malformed error expectation in {test_name}"));
            }
            expected_errors.push_str(&format!("{expected}\n"));
        }
    }

    Ok(TestCase {
        name: test_name.into_owned(),
        source: input,
        output: expected_outputs,
        errors: expected_errors,
    })
}

fn after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let index = line.find(marker)?;
    Some(line[index + marker.len()..].trim())
}
