//! System call dispatch.
//!
//! `ecall` selects a service with `a7` and passes its argument in `a0`:
//!
//! | a7      | service                                         |
//! |---------|-------------------------------------------------|
//! | 0       | print the NUL-terminated string at `a0`         |
//! | 1       | print the low byte of `a0` as a raw byte        |
//! | 2       | print `a0` as a signed 32-bit integer           |
//! | 4       | read one non-blank character into `a0`          |
//! | 5       | read a signed 64-bit integer into `a0`          |
//! | 3, 93   | exit                                            |
//!
//! Console streams are injected so tests can script them. Reads leave `a0`
//! unchanged at end of input or when the input does not parse.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::common::error::SimError;
use crate::core::pipeline::engine::SyscallOutcome;
use crate::soc::memory::Memory;

/// Print string.
pub const SYS_PRINT_STRING: u64 = 0;
/// Print character.
pub const SYS_PRINT_CHAR: u64 = 1;
/// Print integer.
pub const SYS_PRINT_INT: u64 = 2;
/// Exit with status 0.
pub const SYS_EXIT: u64 = 3;
/// Read character.
pub const SYS_READ_CHAR: u64 = 4;
/// Read integer.
pub const SYS_READ_INT: u64 = 5;
/// Exit with status `a0`.
pub const SYS_EXIT_CODE: u64 = 93;

/// Message printed by the exit services.
pub const EXIT_MESSAGE: &str = "Program exit from an exit() system call";

/// Console streams used by system calls.
pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

impl Default for Console {
    /// Process stdin and stdout.
    fn default() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl Console {
    /// Wraps the given streams.
    pub fn new(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// Output stream, for messages the driver prints alongside program output.
    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    /// Executes system call `code` with argument `a0`, issued by the `ecall` at `pc`.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownSyscall`] for an unsupported code,
    /// [`SimError::MemoryOutOfRange`] when a string runs off memory, or
    /// [`SimError::Io`] when the console fails.
    pub fn dispatch(
        &mut self,
        memory: &Memory,
        code: u64,
        a0: u64,
        pc: u64,
    ) -> Result<SyscallOutcome, SimError> {
        debug!(code, a0, pc = format_args!("{pc:#x}"), "syscall");
        match code {
            SYS_PRINT_STRING => {
                let text = memory
                    .read_cstr(a0)
                    .map_err(|e| SimError::MemoryOutOfRange { addr: e.addr, pc })?;
                self.emit(text)?;
                Ok(SyscallOutcome::Continue(a0))
            }
            SYS_PRINT_CHAR => {
                self.emit(&[a0 as u8])?;
                Ok(SyscallOutcome::Continue(a0))
            }
            SYS_PRINT_INT => {
                self.print(format_args!("{}", a0 as i32))?;
                Ok(SyscallOutcome::Continue(a0))
            }
            SYS_READ_CHAR => {
                let ch = self.read_char().map_err(console_error)?;
                Ok(SyscallOutcome::Continue(ch.map_or(a0, u64::from)))
            }
            SYS_READ_INT => {
                let val = self.read_int().map_err(console_error)?;
                Ok(SyscallOutcome::Continue(val.map_or(a0, |v| v as u64)))
            }
            SYS_EXIT | SYS_EXIT_CODE => {
                self.print(format_args!("{EXIT_MESSAGE}\n"))?;
                let status = if code == SYS_EXIT_CODE { a0 as i32 } else { 0 };
                Ok(SyscallOutcome::Exit(status))
            }
            _ => Err(SimError::UnknownSyscall { code, pc }),
        }
    }

    /// Reads one line of input, used by single-step mode. `None` at end of input.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] when the console fails.
    pub fn read_line(&mut self) -> Result<Option<String>, SimError> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line).map_err(console_error)?;
        Ok((n > 0).then_some(line))
    }

    fn print(&mut self, args: std::fmt::Arguments<'_>) -> Result<(), SimError> {
        self.output
            .write_fmt(args)
            .and_then(|()| self.output.flush())
            .map_err(console_error)
    }

    /// Writes raw bytes, so characters above 0x7F reach the console unchanged.
    fn emit(&mut self, bytes: &[u8]) -> Result<(), SimError> {
        self.output
            .write_all(bytes)
            .and_then(|()| self.output.flush())
            .map_err(console_error)
    }

    fn peek(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.fill_buf()?.first().copied())
    }

    fn skip_whitespace(&mut self) -> io::Result<()> {
        while let Some(b) = self.peek()? {
            if !b.is_ascii_whitespace() {
                break;
            }
            self.input.consume(1);
        }
        Ok(())
    }

    fn read_char(&mut self) -> io::Result<Option<u8>> {
        self.skip_whitespace()?;
        let b = self.peek()?;
        if b.is_some() {
            self.input.consume(1);
        }
        Ok(b)
    }

    /// Reads an optional sign followed by decimal digits.
    fn read_int(&mut self) -> io::Result<Option<i64>> {
        self.skip_whitespace()?;
        let mut token = String::new();
        if let Some(b @ (b'-' | b'+')) = self.peek()? {
            token.push(char::from(b));
            self.input.consume(1);
        }
        while let Some(b) = self.peek()? {
            if !b.is_ascii_digit() {
                break;
            }
            token.push(char::from(b));
            self.input.consume(1);
        }
        Ok(token.parse::<i64>().ok())
    }
}

fn console_error(source: io::Error) -> SimError {
    SimError::io("<console>", source)
}
