//! Waveform output for debug traces.
//!
//! [`VcdRecorder`] writes IEEE 1364 Value Change Dump text for one-bit cell
//! ports. GTKWave and Surfer both open it.

use std::collections::HashMap;
use std::io::Write;

use cellcheck_common::Logic;

use crate::error::SimError;

/// Identifies a scalar signal within one recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignalId(pub u32);

/// A sink for scalar port waveforms.
///
/// Calls arrive as: scopes and signals, then value changes in
/// non-decreasing time order, then one `finalize`.
pub trait WaveformRecorder {
    /// Declares a one-bit signal in the open scope.
    fn register_signal(&mut self, id: SignalId, name: &str) -> Result<(), SimError>;

    /// Opens a module scope.
    fn begin_scope(&mut self, name: &str) -> Result<(), SimError>;

    /// Closes the innermost scope.
    fn end_scope(&mut self) -> Result<(), SimError>;

    /// Records `value` on `id` at `time_fs` femtoseconds.
    fn record_change(&mut self, time_fs: u64, id: SignalId, value: Logic) -> Result<(), SimError>;

    /// Ends the recording and flushes the output.
    fn finalize(&mut self) -> Result<(), SimError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Empty,
    Declarations,
    Changes { at: u64 },
}

/// Writes VCD text with a 1fs timescale.
pub struct VcdRecorder<W: Write> {
    out: W,
    codes: HashMap<SignalId, String>,
    section: Section,
}

impl<W: Write> VcdRecorder<W> {
    /// A recorder that writes to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            codes: HashMap::new(),
            section: Section::Empty,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn declare(&mut self) -> Result<(), SimError> {
        if self.section == Section::Empty {
            write!(
                self.out,
                "$version\n  cellcheck functional emulator\n$end\n$timescale\n  1fs\n$end\n"
            )?;
            self.section = Section::Declarations;
        }
        Ok(())
    }

    fn close_declarations(&mut self) -> Result<(), SimError> {
        self.declare()?;
        if self.section == Section::Declarations {
            writeln!(self.out, "$enddefinitions $end")?;
        }
        Ok(())
    }
}

/// The short identifier VCD uses for the `n`th declared signal: printable
/// ASCII from `!` to `~`, growing a character every 94 signals.
fn id_code(n: usize) -> String {
    const BASE: usize = 94;
    let mut code = String::new();
    let mut rest = n;
    loop {
        code.push(char::from(b'!' + (rest % BASE) as u8));
        if rest < BASE {
            return code;
        }
        rest = rest / BASE - 1;
    }
}

fn vcd_char(value: Logic) -> char {
    match value {
        Logic::Zero => '0',
        Logic::One => '1',
        Logic::X => 'x',
        Logic::Z => 'z',
    }
}

impl<W: Write> WaveformRecorder for VcdRecorder<W> {
    fn register_signal(&mut self, id: SignalId, name: &str) -> Result<(), SimError> {
        self.declare()?;
        let code = id_code(self.codes.len());
        writeln!(self.out, "$var wire 1 {code} {name} $end")?;
        self.codes.insert(id, code);
        Ok(())
    }

    fn begin_scope(&mut self, name: &str) -> Result<(), SimError> {
        self.declare()?;
        writeln!(self.out, "$scope module {name} $end")?;
        Ok(())
    }

    fn end_scope(&mut self) -> Result<(), SimError> {
        writeln!(self.out, "$upscope $end")?;
        Ok(())
    }

    fn record_change(&mut self, time_fs: u64, id: SignalId, value: Logic) -> Result<(), SimError> {
        let code = self
            .codes
            .get(&id)
            .ok_or_else(|| SimError::InvalidSignalRef {
                reason: format!("signal {} was never registered", id.0),
            })?
            .clone();
        match self.section {
            Section::Changes { at } if at == time_fs => {}
            Section::Changes { .. } => writeln!(self.out, "#{time_fs}")?,
            _ => {
                self.close_declarations()?;
                write!(self.out, "$dumpvars\n#{time_fs}\n")?;
            }
        }
        self.section = Section::Changes { at: time_fs };
        writeln!(self.out, "{}{code}", vcd_char(value))?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), SimError> {
        if !matches!(self.section, Section::Changes { .. }) {
            self.close_declarations()?;
        }
        self.out.flush()?;
        Ok(())
    }
}
