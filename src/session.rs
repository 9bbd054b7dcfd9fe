use crate::catalogue::{ComponentCatalogue, ComponentId};
use crate::circuit::{Circuit, CircuitSet};
use crate::component::{Component, ComponentRequest};
use crate::error::{DomainError, Result};
use crate::imped_math::Cplx;


/// State of one interactive session: the shared component catalogue and
/// every circuit built so far. The circuit being edited is the one created last.
#[derive(Debug, Clone, Default)]
pub struct Session {
    catalogue: ComponentCatalogue,
    circuits: CircuitSet,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalogue(&self) -> &ComponentCatalogue {
        &self.catalogue
    }

    pub fn circuits(&self) -> &CircuitSet {
        &self.circuits
    }

    /// Start a new circuit at `frequency` (Hz); it becomes the current one
    pub fn new_circuit(&mut self, frequency: f64) -> usize {
        let idx = self.circuits.push(Circuit::new(frequency));
        tracing::debug!(circuit = idx + 1, frequency, "new circuit");
        idx
    }

    fn current_index(&self) -> Result<usize> {
        self.circuits.len().checked_sub(1).ok_or(DomainError::NoCircuit)
    }

    pub fn current(&self) -> Result<&Circuit> {
        let idx = self.current_index()?;
        self.circuits.get(idx).ok_or(DomainError::NoCircuit)
    }

    /// Append a component built for the current circuit's frequency.
    /// Returns its handle together with the component that was stored.
    pub fn add_component(&mut self, request: ComponentRequest) -> Result<(ComponentId, Component)> {
        let component = request.build(self.current()?.frequency());
        let id = self.catalogue.push(component);
        tracing::debug!(%id, %component, "component added to catalogue");
        Ok((id, component))
    }

    /// Resolve 1-based `positions` and run `op` on the current circuit
    fn with_current<T>(
        &mut self,
        positions: &[usize],
        op: impl FnOnce(&mut Circuit, &ComponentCatalogue, &[ComponentId]) -> Result<T>,
    ) -> Result<T> {
        let idx = self.current_index()?;
        let ids = self.catalogue.resolve(positions)?;
        let circ = self.circuits.get_mut(idx).ok_or(DomainError::NoCircuit)?;
        op(circ, &self.catalogue, &ids)
    }

    /// Add the components at `positions` in series to the current circuit
    pub fn add_series(&mut self, positions: &[usize]) -> Result<Cplx> {
        self.with_current(positions, |circ, cat, ids| circ.series_component(cat, ids))
    }

    /// Add the components at `positions` as one parallel group of the current circuit
    pub fn add_parallel(&mut self, positions: &[usize]) -> Result<Cplx> {
        self.with_current(positions, |circ, cat, ids| circ.parallel_component(cat, ids))
    }

    /// Every circuit chained in series
    pub fn combine_all(&self) -> Cplx {
        self.circuits.combine_all()
    }
}
