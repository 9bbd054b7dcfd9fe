use std::f64::consts::TAU;

use crate::error::{DomainError, Result};

pub type Cplx = num::complex::Complex<f64>;

pub const ZERO: Cplx = Cplx { re: 0.0, im: 0.0 };
pub const J: Cplx = Cplx { re: 0.0, im: 1.0 };

fn undefined(reason: &'static str) -> DomainError {
    DomainError::UndefinedImpedance { reason }
}

/// Pass `z` on only if both parts are finite
pub fn defined(z: Cplx, reason: &'static str) -> Result<Cplx> {
    if z.is_finite() {
        Ok(z)
    } else {
        Err(undefined(reason))
    }
}

/// Angular frequency of a frequency given in Hz
pub fn omega(frequency: f64) -> f64 {
    TAU * frequency
}

/// Reactance of an inductance `l` (H) at `frequency` (Hz)
pub fn inductive(l: f64, frequency: f64) -> Cplx {
    J * omega(frequency) * l
}

/// Reactance of a capacitance `c` (F) at `frequency` (Hz).
/// Zero frequency or zero capacitance would divide by zero.
pub fn capacitive(c: f64, frequency: f64) -> Result<Cplx> {
    if frequency == 0.0 {
        return Err(undefined("capacitor driven at zero frequency"));
    }
    if c == 0.0 {
        return Err(undefined("zero capacitance"));
    }
    defined((J * omega(frequency) * c).finv(), "capacitive reactance out of range")
}

/// Impedances in series: plain sum, empty input gives zero
pub fn series<I: IntoIterator<Item = Cplx>>(imps: I) -> Cplx {
    imps.into_iter().fold(ZERO, |acc, z| acc + z)
}

/// Impedances in parallel: reciprocal of the summed admittances.
/// `finv` keeps the reciprocals scaled so tiny impedances do not underflow.
pub fn parallel<I: IntoIterator<Item = Cplx>>(imps: I) -> Result<Cplx> {
    let mut admit = ZERO;
    let mut branches = 0usize;
    for z in imps {
        if z == ZERO {
            return Err(undefined("zero-impedance branch in a parallel group"));
        }
        admit += defined(z.finv(), "branch admittance out of range")?;
        branches += 1;
    }
    if branches == 0 {
        return Err(undefined("empty parallel group"));
    }
    if admit == ZERO {
        return Err(undefined("parallel admittances cancel out"));
    }
    defined(admit, "total admittance out of range")?;
    defined(admit.finv(), "parallel impedance out of range")
}

/// `z` shunted by a stray capacitance `c`.
/// A capacitance that draws no current (zero `c` or DC) is an open branch
/// and leaves `z` as is; a shorted `z` stays shorted.
pub fn shunt_capacitance(z: Cplx, c: f64, frequency: f64) -> Result<Cplx> {
    if c == 0.0 || frequency == 0.0 {
        return Ok(z);
    }
    if z == ZERO {
        return Ok(ZERO);
    }
    parallel([z, capacitive(c, frequency)?])
}


// ---------- Unit tests ----------
