//! Console front end: a numbered menu over a [`Session`].
//!
//! Reads from any `BufRead` and writes to any `Write` so that whole
//! sessions can be scripted. End of input ends the session.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::component::{Build, ComponentKind, ComponentRequest};
use crate::error::DomainError;
use crate::report::ImpedanceReport;
use crate::session::Session;

const MENU: &str = "\
 1 - Add component to the circuit components catalogue.
 2 - Display the circuit components catalogue.
 3 - Add component in series.
 4 - Add component in parallel.
 5 - Display current circuit information.
 6 - Display individual components information.
 7 - Add a new circuit.
 8 - Display all created circuits information.
 9 - Combine all made circuits in series and display the total circuit information.
 10 - Exit.
 Enter your choice and press return: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow { Continue, Exit }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YesNo { Yes, No }

impl FromStr for YesNo {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Y" => Ok(YesNo::Yes),
            "N" => Ok(YesNo::No),
            _ => Err(()),
        }
    }
}

pub struct Shell<R, W> {
    input: R,
    out: W,
    session: Session,
    /// Maximum printed width of report numbers
    width: Option<usize>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, out: W, width: Option<usize>) -> Self {
        Self { input, out, session: Session::new(), width }
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Run the menu until the user exits or input ends.
    /// `frequency` is used for the first circuit instead of asking for it.
    pub fn run(&mut self, frequency: Option<f64>) -> io::Result<()> {
        let frequency = match frequency {
            Some(f) => f,
            None => match self.ask_frequency()? {
                Some(f) => f,
                None => return Ok(()),
            },
        };
        self.session.new_circuit(frequency);

        loop {
            let choice = match self.ask::<u32>(MENU)? {
                Some(c) => c,
                None => return Ok(()),
            };
            writeln!(self.out)?;
            if self.menu_action(choice)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn menu_action(&mut self, choice: u32) -> io::Result<Flow> {
        match choice {
            1 => self.add_component(),
            2 => self.show_catalogue().map(|_| Flow::Continue),
            3 => self.combine(false),
            4 => self.combine(true),
            5 => {
                let text = match self.session.current() {
                    Ok(circ) => styled(circ, self.width),
                    Err(e) => e.to_string(),
                };
                writeln!(self.out, "CIRCUIT INFORMATION\n{}", text)?;
                Ok(Flow::Continue)
            }
            6 => self.show_components().map(|_| Flow::Continue),
            7 => self.another_circuit(),
            8 => {
                writeln!(self.out, "All created circuits information.")?;
                for (i, circ) in self.session.circuits().iter().enumerate() {
                    writeln!(self.out, "Circuit-{}\n{}", i + 1, styled(circ, self.width))?;
                }
                Ok(Flow::Continue)
            }
            9 => {
                writeln!(
                    self.out,
                    "Circuit information after combining all created circuits in series."
                )?;
                let report = ImpedanceReport::new(self.session.combine_all());
                writeln!(self.out, "{}", styled(&report, self.width))?;
                Ok(Flow::Continue)
            }
            10 => {
                writeln!(self.out, "End of Program.")?;
                Ok(Flow::Exit)
            }
            _ => {
                writeln!(self.out, "Not a Valid Choice. \nChoose again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn add_component(&mut self) -> io::Result<Flow> {
        writeln!(self.out, "Add a component to the circuit components catalogue")?;
        let Some(build) = self.ask::<Build>("Is your component real[R] or ideal[I]? ")? else {
            return Ok(Flow::Exit);
        };
        let kind_prompt = "Do you want to add a Resistor[R], Inductor[I] or a Capacitor[C]? ";
        let Some(kind) = self.ask::<ComponentKind>(kind_prompt)? else {
            return Ok(Flow::Exit);
        };

        let (question, units) = match kind {
            ComponentKind::Resistor => ("What is the resistance of the resistor", "ohms"),
            ComponentKind::Inductor => ("What is the inductance of the inductor", "H"),
            ComponentKind::Capacitor => ("What is the capacitance of the capacitor", "F"),
        };
        let Some(value) = self.ask_magnitude(&format!("{} in {}? ", question, units))? else {
            return Ok(Flow::Exit);
        };

        let build = match build {
            Build::Ideal => Build::Ideal,
            Build::Real { .. } => {
                let mut parasitics = [0.0; 3];
                let wanted: [(usize, &str, &str); 2] = match kind {
                    ComponentKind::Resistor => [(1, "inductance", "H"), (2, "capacitance", "F")],
                    ComponentKind::Inductor => [(0, "resistance", "ohms"), (2, "capacitance", "F")],
                    ComponentKind::Capacitor => [(0, "resistance", "ohms"), (1, "inductance", "H")],
                };
                for (slot, what, units) in wanted {
                    let q = format!(
                        "What is the parasitic {} of the {} in {}? ",
                        what, kind, units
                    );
                    match self.ask_magnitude(&q)? {
                        Some(v) => parasitics[slot] = v,
                        None => return Ok(Flow::Exit),
                    }
                }
                let [resistance, inductance, capacitance] = parasitics;
                Build::Real { resistance, inductance, capacitance }
            }
        };

        match self.session.add_component(ComponentRequest { kind, value, build }) {
            Ok((id, component)) => {
                let entry = component.catalogue_entry(id.position());
                writeln!(self.out, "Added {}", styled(&entry, self.width))?;
            }
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_catalogue(&mut self) -> io::Result<bool> {
        writeln!(self.out, "\n***COMPONENTS CATALOGUE***")?;
        if self.session.catalogue().is_empty() {
            writeln!(self.out, "You need to add components")?;
            return Ok(false);
        }
        for entry in self.session.catalogue().entries() {
            writeln!(self.out, "{}", styled(&entry, self.width))?;
        }
        Ok(true)
    }

    fn show_components(&mut self) -> io::Result<()> {
        if self.session.catalogue().is_empty() {
            writeln!(self.out, "You need to add components")?;
            return Ok(());
        }
        writeln!(self.out, "INDIVIDUAL COMPONENTS INFORMATION.")?;
        for entry in self.session.catalogue().entries() {
            writeln!(self.out, "{}\n", styled(&entry, self.width))?;
        }
        Ok(())
    }

    fn combine(&mut self, parallel: bool) -> io::Result<Flow> {
        let how = if parallel { "in parallel" } else { "in series" };
        writeln!(self.out, "Add a component/ components from the catalogue {}", how)?;
        if !self.show_catalogue()? {
            return Ok(Flow::Continue);
        }
        if parallel && self.session.current().map_or(true, |c| c.series_list().is_empty()) {
            writeln!(self.out, "{}", DomainError::NoSeriesBackbone)?;
            return Ok(Flow::Continue);
        }

        let prompt = format!("Enter the numbers of the components to add {}: ", how);
        let Some(positions) = self.ask_indices(&prompt)? else {
            return Ok(Flow::Exit);
        };
        let result = if parallel {
            self.session.add_parallel(&positions)
        } else {
            self.session.add_series(&positions)
        };
        match result {
            Ok(z) => {
                let report = ImpedanceReport::new(z);
                writeln!(self.out, "Added impedance:\n{}", styled(&report, self.width))?;
            }
            Err(e) => writeln!(self.out, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn another_circuit(&mut self) -> io::Result<Flow> {
        match self.ask::<YesNo>("Do you want to add another circuit [Y/N]? ")? {
            Some(YesNo::Yes) => match self.ask_frequency()? {
                Some(f) => {
                    let idx = self.session.new_circuit(f);
                    writeln!(self.out, "Now editing Circuit-{}", idx + 1)?;
                    Ok(Flow::Continue)
                }
                None => Ok(Flow::Exit),
            },
            Some(YesNo::No) | None => Ok(Flow::Exit),
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match self.input.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line.trim().to_owned())),
        }
    }

    /// Prompt until the answer parses as `T`; `None` when input ends
    fn ask<T: FromStr>(&mut self, prompt: &str) -> io::Result<Option<T>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        loop {
            let Some(line) = self.read_line()? else { return Ok(None) };
            match line.parse::<T>() {
                Ok(v) => return Ok(Some(v)),
                Err(_) => {
                    write!(self.out, "You have entered wrong input\nPlease try again: ")?;
                    self.out.flush()?;
                }
            }
        }
    }

    /// Non-negative finite number
    fn ask_magnitude(&mut self, prompt: &str) -> io::Result<Option<f64>> {
        loop {
            match self.ask::<f64>(prompt)? {
                Some(v) if v.is_finite() && v >= 0.0 => return Ok(Some(v)),
                Some(_) => writeln!(self.out, "Please enter a non-negative number")?,
                None => return Ok(None),
            }
        }
    }

    fn ask_frequency(&mut self) -> io::Result<Option<f64>> {
        loop {
            match self.ask::<f64>("What is the frequency of the circuit in Hz? ")? {
                Some(f) if f.is_finite() && f > 0.0 => return Ok(Some(f)),
                Some(_) => writeln!(self.out, "Please enter a positive number")?,
                None => return Ok(None),
            }
        }
    }

    /// Whitespace or comma separated list of positive integers
    fn ask_indices(&mut self, prompt: &str) -> io::Result<Option<Vec<usize>>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        loop {
            let Some(line) = self.read_line()? else { return Ok(None) };
            let parsed = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(str::parse::<usize>)
                .collect::<Result<Vec<_>, _>>();
            match parsed {
                Ok(v) => return Ok(Some(v)),
                Err(_) => {
                    let retry = "You have entered wrong input\nPlease enter component numbers: ";
                    write!(self.out, "{}", retry)?;
                    self.out.flush()?;
                }
            }
        }
    }
}

/// Render `x` with report numbers capped at `width` characters
fn styled<T: Display + ?Sized>(x: &T, width: Option<usize>) -> String {
    match width {
        Some(w) => format!("{:.*}", w, x),
        None => x.to_string(),
    }
}
