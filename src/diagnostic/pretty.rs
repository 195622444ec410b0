use super::{Diagnostic, ErrorReporter, Phase};
use ariadne::{Color, Config, Label, Report, ReportKind, Source};

/// Renders diagnostics with a source excerpt underneath, falling back to the plain
/// one-line form for diagnostics without a span.
pub struct PrettyReporter<'src> {
    text: &'src str,
    path: String,
    color: bool,
}

impl<'src> PrettyReporter<'src> {
    pub fn new(text: &'src str, path: impl Into<String>) -> Self {
        Self {
            text,
            path: path.into(),
            color: true,
        }
    }

    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let Some(span) = diagnostic.span else {
            return diagnostic.to_string();
        };
        let path = self.path.as_str();
        // Clamp so the EOF span, which sits one past the last byte, still has a target.
        let end = span.range().end.min(self.text.len());
        let start = span.range().start.min(end);
        let range = start..end;

        let label_message = match diagnostic.phase {
            Phase::Lexical => "not a valid lexeme",
            Phase::Parse => "parsing stopped here",
            Phase::Runtime => "evaluated here",
            Phase::General => "here",
        };

        let mut builder = Report::build(ReportKind::Error, (path, range.clone()))
            .with_config(Config::default().with_color(self.color))
            .with_message(format!("[line {}] {}", diagnostic.line, diagnostic.message))
            .with_label(
                Label::new((path, range))
                    .with_message(label_message)
                    .with_color(Color::BrightRed),
            );
        if let Some(code) = diagnostic.code {
            builder = builder.with_code(code);
        }

        let mut output = std::io::Cursor::new(Vec::new());
        if builder
            .finish()
            .write((path, Source::from(self.text)), &mut output)
            .is_err()
        {
            return diagnostic.to_string();
        }
        String::from_utf8_lossy(&output.into_inner()).into_owned()
    }
}

impl<'src> ErrorReporter for PrettyReporter<'src> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        eprint!("{}", self.render(diagnostic));
    }
}
