// An error type for nom parsers that mirrors nom::error::VerboseError, but
// keeps owned context strings so external errors (bad tile ids, unknown pixel
// characters) can be carried along without leaking them.

#[derive(Clone, Debug, PartialEq)]
pub enum NomErrorKind {
    Context(String),
    Char(char),
    Nom(nom::error::ErrorKind),
}

#[derive(Clone, Debug, PartialEq)]
pub struct NomError<I> {
    pub errors: std::vec::Vec<(I, NomErrorKind)>,
}

impl<I> nom::error::ParseError<I> for NomError<I> {
    fn from_error_kind(input: I, kind: nom::error::ErrorKind) -> Self {
        Self {
            errors: vec![(input, NomErrorKind::Nom(kind))],
        }
    }

    fn append(input: I, kind: nom::error::ErrorKind, mut other: Self) -> Self {
        other.errors.push((input, NomErrorKind::Nom(kind)));
        other
    }

    fn from_char(input: I, c: char) -> Self {
        Self {
            errors: vec![(input, NomErrorKind::Char(c))],
        }
    }
}

impl<I, E> nom::error::FromExternalError<I, E> for NomError<I>
where
    E: std::fmt::Display + 'static,
{
    fn from_external_error(input: I, _kind: nom::error::ErrorKind, e: E) -> Self
    where
        E: std::fmt::Display + 'static,
    {
        Self {
            errors: vec![(input, NomErrorKind::Context(format!("{}", e)))],
        }
    }
}

impl<I> nom::error::ContextError<I> for NomError<I> {
    fn add_context(input: I, ctx: &'static str, mut other: Self) -> Self {
        other
            .errors
            .push((input, NomErrorKind::Context(ctx.to_owned())));
        other
    }
}

impl<I> NomError<I> {
    pub fn into_verbose_string(self, i: I) -> String
    where
        I: core::ops::Deref<Target = str>,
    {
        convert_error(i, self)
    }

    pub fn into_anyhow(self, i: I) -> anyhow::Error
    where
        I: core::ops::Deref<Target = str>,
    {
        anyhow::anyhow!("{}", self.into_verbose_string(i))
    }
}

/// Renders each error of the trace with its line number and a caret under the offending column.
pub fn convert_error<I: core::ops::Deref<Target = str>>(input: I, e: NomError<I>) -> String {
    use nom::Offset;
    use std::fmt::Write;

    let mut result = String::new();

    for (i, (substring, kind)) in e.errors.iter().enumerate() {
        let what = match kind {
            NomErrorKind::Char(c) => match substring.chars().next() {
                Some(actual) => format!("expected '{}', found '{}'", c, actual),
                None => format!("expected '{}', got end of input", c),
            },
            NomErrorKind::Context(s) => format!("in {}", s),
            NomErrorKind::Nom(e) => format!("in {:?}", e),
        };

        if input.is_empty() {
            // Writing to a String can't fail.
            writeln!(&mut result, "{}: {}, got empty input", i, what).ok();
            continue;
        }

        let offset = input.offset(substring);
        let prefix = &input.as_bytes()[..offset];
        let line_number = bytecount::count(prefix, b'\n') + 1;

        // The line holding the substring starts right after the last newline before it.
        let line_begin = prefix
            .iter()
            .rev()
            .position(|&b| b == b'\n')
            .map(|pos| offset - pos)
            .unwrap_or(0);
        let line = input[line_begin..]
            .lines()
            .next()
            .unwrap_or(&input[line_begin..])
            .trim_end();
        let column_number = offset - line_begin + 1;

        writeln!(
            &mut result,
            "{i}: at line {line_number}, {what}:\n{line}\n{caret:>column$}\n",
            i = i,
            line_number = line_number,
            what = what,
            line = line,
            caret = '^',
            column = column_number,
        )
        .ok();
    }

    result
}
