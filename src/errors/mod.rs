use crate::span::Source;

use colored::*;
use std::fs;
use std::io;
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ElzErrorKind {
    Parse,
    Name,
    Compile,
    Type,
    IO,
}

impl fmt::Display for ElzErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ElzErrorKind::Parse => "parse error",
                ElzErrorKind::Name => "name error",
                ElzErrorKind::Compile => "compile error",
                ElzErrorKind::Type => "type error",
                ElzErrorKind::IO => "i/o error",
            }
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElzError {
    pub msg: String,
    pub src: Vec<Source>,
    pub kind: ElzErrorKind,
}

const ELLIPSIS: &'static str = "...";

impl ElzError {
    pub fn new<S: Into<String>>(kind: ElzErrorKind, msg: S, src: Vec<Source>) -> ElzError {
        ElzError {
            msg: msg.into(),
            src,
            kind,
        }
    }

    pub fn emit(self) {
        let kind = format!("{}:", self.kind);
        let mut msg_lines = self.msg.lines().collect::<Vec<_>>();
        msg_lines.sort();
        msg_lines.dedup();
        let msg = if msg_lines.len() <= 1 {
            msg_lines.pop().unwrap_or_default().to_string()
        } else {
            let indent = " ".repeat(kind.len() + 1);
            msg_lines
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    if i == 0 {
                        s.to_string()
                    } else {
                        format!("{}{}", indent, s)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        eprintln!("{} {}", kind.bold().red(), msg.bold());

        for src in self.src {
            let arrow = "-->".bold();
            let span = match src.span {
                Some(span) => span,
                None => {
                    eprintln!(" {} {}", arrow, src.filepath);
                    continue;
                }
            };

            // sources that aren't files (e.g. a `--call` expression) only get a location
            let buf = match fs::read_to_string(&src.filepath) {
                Ok(buf) => buf,
                Err(_) => {
                    eprintln!(" {} {}:{}", arrow, src.filepath, span);
                    continue;
                }
            };

            let start_line = span.start.lineno;
            let end_line = span.end.lineno;
            let line_count = span.lines();
            let max_num_width = if line_count == 1 {
                (end_line + 1).to_string().len() + 1
            } else {
                ELLIPSIS.len() + 1
            };
            let full_spacing = " ".repeat(max_num_width);
            let pipe = "|".bold();

            eprintln!(
                "{}{} {}:{}",
                " ".repeat(max_num_width - 1),
                arrow,
                src.filepath,
                span
            );
            eprintln!("{}{}", full_spacing, pipe);

            let mut lines = buf.lines().skip(start_line).take(line_count);
            let mut lineno = start_line + 1;
            let red_slash = "/".bold().red();
            let red_pipe = "|".bold().red();
            if line_count == 1 {
                let line = lines.next().unwrap_or_default();
                let lineno_str = lineno.to_string();
                let spacing = " ".repeat(max_num_width - lineno_str.len());
                eprintln!("{}{}{} {}", lineno_str.bold(), spacing, pipe, line);
                let indent = " ".repeat(span.start.col);
                let indicator = "^".repeat(span.len().max(1)).bold().red();
                eprintln!("{}{} {}{}", full_spacing, pipe, indent, indicator);
            } else {
                for (i, line) in lines.enumerate() {
                    if line_count > 3 && i > 1 && i < line_count - 2 {
                        if i == 2 {
                            let after = line.trim_start();
                            let spacing = " ".repeat(line.len() - after.len());
                            eprintln!(
                                "{} {} {} {}{}",
                                ELLIPSIS.bold(),
                                pipe,
                                red_pipe,
                                spacing,
                                ELLIPSIS
                            );
                        }
                        lineno += 1;
                        continue;
                    }

                    let lineno_str = lineno.to_string();
                    let spacing = " ".repeat(max_num_width - lineno_str.len());
                    let prefix = if i == 0 { &red_slash } else { &red_pipe };
                    eprintln!(
                        "{}{}{} {} {}",
                        lineno_str.bold(),
                        spacing,
                        pipe,
                        prefix,
                        line
                    );
                    lineno += 1;
                }
                let indent = "_".repeat(span.end.col + 1).bold().red();
                let indicator = "^".bold().red();
                eprintln!(
                    "{}{} {}{}{}",
                    full_spacing, pipe, red_pipe, indent, indicator
                );
            }
        }
        eprintln!()
    }
}

impl fmt::Display for ElzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl From<ElzError> for Vec<ElzError> {
    fn from(err: ElzError) -> Vec<ElzError> {
        vec![err]
    }
}

impl From<io::Error> for ElzError {
    fn from(err: io::Error) -> ElzError {
        ElzError {
            msg: err.to_string(),
            src: vec![],
            kind: ElzErrorKind::IO,
        }
    }
}
