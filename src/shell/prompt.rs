use std::io::{self, BufRead, Write};

/// Blocking line-oriented console: write a prompt, read one line back.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `prompt` (no newline) and reads the reply.
    ///
    /// Returns `None` once input is exhausted. The line terminator is
    /// stripped; everything else, including surrounding spaces, is kept.
    /// Bytes that are not valid UTF-8 become U+FFFD instead of failing.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            // Keep the transcript tidy when stdin closes mid-prompt.
            writeln!(self.output)?;
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&raw).into_owned();
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Writes `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Writes `text` as-is.
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
