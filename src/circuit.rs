use std::fmt;

use crate::catalogue::{ComponentCatalogue, ComponentId};
use crate::error::{DomainError, Result};
use crate::imped_math::{self, defined, Cplx, ZERO};
use crate::report::ImpedanceReport;


/// A circuit driven at one fixed frequency.
///
/// Components picked from the catalogue are combined into a running total:
/// every series batch adds its sum, every parallel group adds its
/// reciprocal-sum impedance as one more series element. Repeated calls
/// keep adding to the total, they never replace it.
#[derive(Debug, Clone)]
pub struct Circuit {
    frequency: f64,
    series_list: Vec<ComponentId>,
    parallel_list: Vec<ComponentId>,
    total: Cplx,
}

impl Circuit {
    /// `frequency` in Hz
    pub fn new(frequency: f64) -> Self {
        Self { frequency, series_list: vec![], parallel_list: vec![], total: ZERO }
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn series_list(&self) -> &[ComponentId] {
        &self.series_list
    }

    pub fn parallel_list(&self) -> &[ComponentId] {
        &self.parallel_list
    }

    /// Impedances of the selected components at this circuit's frequency, in selection order
    fn evaluate(
        &self,
        catalogue: &ComponentCatalogue,
        selected: &[ComponentId],
    ) -> Result<Vec<Cplx>> {
        selected
            .iter()
            .map(|&id| catalogue.get(id)?.impedance_at(self.frequency))
            .collect()
    }

    /// Add `selected` in series and return their summed impedance.
    /// An empty selection adds nothing. On error the circuit is unchanged.
    pub fn series_component(
        &mut self,
        catalogue: &ComponentCatalogue,
        selected: &[ComponentId],
    ) -> Result<Cplx> {
        let imps = self.evaluate(catalogue, selected)?;
        let z = defined(imped_math::series(imps), "series sum out of range")?;
        let total = defined(self.total + z, "circuit impedance out of range")?;

        self.series_list.extend_from_slice(selected);
        self.total = total;
        tracing::debug!(components = ?selected, %z, total = %self.total, "series batch added");
        Ok(z)
    }

    /// Combine `selected` in parallel, add the group in series with the rest
    /// of the circuit and return the group impedance.
    ///
    /// The group needs at least one series component already in the circuit,
    /// a non-empty selection and no zero-impedance member. On error the
    /// circuit is unchanged.
    ///
    /// A circuit with no series component yet fails with
    /// [`DomainError::NoSeriesBackbone`], not `InvalidSelection`: the
    /// selection itself may be fine, the circuit is what is missing.
    pub fn parallel_component(
        &mut self,
        catalogue: &ComponentCatalogue,
        selected: &[ComponentId],
    ) -> Result<Cplx> {
        if self.series_list.is_empty() {
            return Err(DomainError::NoSeriesBackbone);
        }
        let imps = self.evaluate(catalogue, selected)?;
        let z = imped_math::parallel(imps)?;
        let total = defined(self.total + z, "circuit impedance out of range")?;

        self.parallel_list.extend_from_slice(selected);
        self.total = total;
        tracing::debug!(components = ?selected, %z, total = %self.total, "parallel group added");
        Ok(z)
    }

    /// Running total of everything added so far
    pub fn impedance(&self) -> Cplx {
        self.total
    }

    pub fn summary(&self) -> ImpedanceReport {
        ImpedanceReport::new(self.total)
    }
}

fn id_list(f: &mut fmt::Formatter<'_>, ids: &[ComponentId]) -> fmt::Result {
    if ids.is_empty() {
        return f.write_str("none");
    }
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", id)?;
    }
    Ok(())
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FREQUENCY: {} Hz", self.frequency)?;
        f.write_str("SERIES COMPONENTS: ")?;
        id_list(f, &self.series_list)?;
        f.write_str("\nPARALLEL COMPONENTS: ")?;
        id_list(f, &self.parallel_list)?;
        f.write_str("\n")?;
        match f.precision() {
            Some(w) => write!(f, "{:.*}", w, self.summary()),
            None => write!(f, "{}", self.summary()),
        }
    }
}


/// Every circuit built in a session, in creation order
#[derive(Debug, Clone, Default)]
pub struct CircuitSet {
    circuits: Vec<Circuit>,
}

impl CircuitSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, circuit: Circuit) -> usize {
        self.circuits.push(circuit);
        self.circuits.len() - 1
    }

    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Circuit> {
        self.circuits.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Circuit> {
        self.circuits.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Circuit> {
        self.circuits.iter()
    }

    /// All circuits chained in series
    pub fn combine_all(&self) -> Cplx {
        combine_all(&self.circuits)
    }
}

impl<'a> IntoIterator for &'a CircuitSet {
    type Item = &'a Circuit;
    type IntoIter = std::slice::Iter<'a, Circuit>;
    fn into_iter(self) -> Self::IntoIter {
        self.circuits.iter()
    }
}

/// Sum of the total impedances of `circuits`, each counted once
pub fn combine_all<'a, I: IntoIterator<Item = &'a Circuit>>(circuits: I) -> Cplx {
    let _span = tracing::info_span!("combine_all").entered();
    let mut count = 0usize;
    let z = imped_math::series(circuits.into_iter().map(|c| {
        count += 1;
        c.impedance()
    }));
    tracing::debug!(circuits = count, %z, "circuits combined in series");
    z
}


// ---------- Unit tests ----------
