use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("illegal instruction: `{0}`")]
    Illegal(String),

    #[error("range error: {field} = {value}, allowed [{min}:{max}]")]
    Range {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    pub fn at(self, line: usize) -> AtLine {
        AtLine { line, kind: self }
    }

    /// Print the error with source location and line content
    pub fn print_diag(&self, path: &str, line_num: usize, content: &str) {
        cprintln!("<red,bold>error</>: {}", self);
        cprintln!("     <blue>--></> <underline>{}:{}</>", path, line_num);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line_num, content);
        cprintln!("      <blue>|</>");
    }
}

/// An error tagged with the 1-based source line it occurred on.
#[derive(Error, Debug)]
#[error("line {line}: {kind}")]
pub struct AtLine {
    pub line: usize,
    #[source]
    pub kind: Error,
}
