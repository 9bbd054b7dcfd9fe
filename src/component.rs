use std::fmt;
use std::str::FromStr;

use float_pretty_print::PrettyPrintFloat;

use crate::error::Result;
use crate::imped_math::{self, Cplx};
use crate::report::ImpedanceReport;

/// A passive circuit element, either ideal or carrying its parasitics.
///
/// Every variant is a plain value: the impedance depends only on the
/// stored magnitudes and the frequency it is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    Resistor {
        resistance: f64,
    },
    Inductor {
        inductance: f64,
        frequency: f64,
    },
    Capacitor {
        capacitance: f64,
        frequency: f64,
    },
    /// Resistance shunted by its stray capacitance, in series with its lead inductance
    RealResistor {
        resistance: f64,
        frequency: f64,
        parasitic_inductance: f64,
        parasitic_capacitance: f64,
    },
    /// Winding (inductance plus copper resistance) shunted by the interwinding capacitance
    RealInductor {
        inductance: f64,
        frequency: f64,
        parasitic_capacitance: f64,
        parasitic_resistance: f64,
    },
    /// Capacitance in series with its lead inductance and equivalent series resistance
    RealCapacitor {
        capacitance: f64,
        frequency: f64,
        parasitic_inductance: f64,
        parasitic_resistance: f64,
    },
}

impl Component {
    /// The frequency (Hz) the component was created for; an ideal resistor has none
    pub fn frequency(&self) -> Option<f64> {
        use Component::*;
        match *self {
            Resistor { .. } => None,
            Inductor { frequency, .. }
            | Capacitor { frequency, .. }
            | RealResistor { frequency, .. }
            | RealInductor { frequency, .. }
            | RealCapacitor { frequency, .. } => Some(frequency),
        }
    }

    /// Impedance at the frequency stored in the component
    pub fn impedance(&self) -> Result<Cplx> {
        self.impedance_at(self.frequency().unwrap_or(0.0))
    }

    /// Impedance at an explicit `frequency` (Hz), ignoring the stored one.
    /// Values too large for an `f64` fail instead of turning into infinities.
    pub fn impedance_at(&self, frequency: f64) -> Result<Cplx> {
        use imped_math::{capacitive, defined, inductive, shunt_capacitance};
        use Component::*;

        let z = match *self {
            Resistor { resistance } => Cplx::new(resistance, 0.0),
            Inductor { inductance, .. } => inductive(inductance, frequency),
            Capacitor { capacitance, .. } => capacitive(capacitance, frequency)?,
            RealResistor { resistance, parasitic_inductance, parasitic_capacitance, .. } => {
                let r = Cplx::new(resistance, 0.0);
                let body = shunt_capacitance(r, parasitic_capacitance, frequency)?;
                body + inductive(parasitic_inductance, frequency)
            }
            RealInductor { inductance, parasitic_capacitance, parasitic_resistance, .. } => {
                let winding = inductive(inductance, frequency) + parasitic_resistance;
                shunt_capacitance(winding, parasitic_capacitance, frequency)?
            }
            RealCapacitor { capacitance, parasitic_inductance, parasitic_resistance, .. } => {
                let reactive = capacitive(capacitance, frequency)?
                    + inductive(parasitic_inductance, frequency);
                reactive + parasitic_resistance
            }
        };
        defined(z, "component impedance out of range")
    }

    pub fn kind(&self) -> ComponentKind {
        use Component::*;
        match self {
            Resistor { .. } | RealResistor { .. } => ComponentKind::Resistor,
            Inductor { .. } | RealInductor { .. } => ComponentKind::Inductor,
            Capacitor { .. } | RealCapacitor { .. } => ComponentKind::Capacitor,
        }
    }

    pub fn is_real(&self) -> bool {
        use Component::*;
        matches!(self, RealResistor { .. } | RealInductor { .. } | RealCapacitor { .. })
    }

    /// Impedance report at the component's own frequency
    pub fn summary(&self) -> Result<ImpedanceReport> {
        self.impedance().map(ImpedanceReport::new)
    }

    /// Catalogue line for this component at the 1-based `index`
    pub fn catalogue_entry(&self, index: usize) -> CatalogueEntry<'_> {
        CatalogueEntry { index, component: self }
    }
}

fn value(f: &mut fmt::Formatter<'_>, letter: &str, x: f64, unit: &str) -> fmt::Result {
    write!(f, "{} = {} {}", letter, PrettyPrintFloat(x), unit)
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Component::*;

        let build = if self.is_real() { "Real" } else { "Ideal" };
        write!(f, "{} {} (", build, self.kind())?;
        match *self {
            Resistor { resistance } => value(f, "R", resistance, "Ohm")?,
            Inductor { inductance, .. } => value(f, "L", inductance, "H")?,
            Capacitor { capacitance, .. } => value(f, "C", capacitance, "F")?,
            RealResistor { resistance, parasitic_inductance, parasitic_capacitance, .. } => {
                value(f, "R", resistance, "Ohm")?;
                f.write_str(", ")?;
                value(f, "Lp", parasitic_inductance, "H")?;
                f.write_str(", ")?;
                value(f, "Cp", parasitic_capacitance, "F")?;
            }
            RealInductor { inductance, parasitic_capacitance, parasitic_resistance, .. } => {
                value(f, "L", inductance, "H")?;
                f.write_str(", ")?;
                value(f, "Rp", parasitic_resistance, "Ohm")?;
                f.write_str(", ")?;
                value(f, "Cp", parasitic_capacitance, "F")?;
            }
            RealCapacitor { capacitance, parasitic_inductance, parasitic_resistance, .. } => {
                value(f, "C", capacitance, "F")?;
                f.write_str(", ")?;
                value(f, "Rp", parasitic_resistance, "Ohm")?;
                f.write_str(", ")?;
                value(f, "Lp", parasitic_inductance, "H")?;
            }
        }
        if let Some(freq) = self.frequency() {
            f.write_str(", ")?;
            value(f, "f", freq, "Hz")?;
        }
        f.write_str(")")
    }
}

/// Catalogue listing of one component: `index: description` followed by
/// its impedance report, or by the reason it has none.
/// `{:.N}` caps the report numbers at `N` characters.
pub struct CatalogueEntry<'c> {
    pub index: usize,
    pub component: &'c Component,
}

impl fmt::Display for CatalogueEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.index, self.component)?;
        match (self.component.summary(), f.precision()) {
            (Ok(report), Some(w)) => write!(f, "{:.*}", w, report),
            (Ok(report), None) => write!(f, "{}", report),
            (Err(e), _) => write!(f, "{}", e),
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind { Resistor, Inductor, Capacitor }

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ComponentKind::*;
        let name = match self {
            Resistor => "resistor",
            Inductor => "inductor",
            Capacitor => "capacitor",
        };
        f.write_str(name)
    }
}

/// Console tag: `R`, `I` or `C`, case-insensitive
impl FromStr for ComponentKind {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.trim().to_ascii_uppercase().as_str() {
            "R" => Ok(ComponentKind::Resistor),
            "I" => Ok(ComponentKind::Inductor),
            "C" => Ok(ComponentKind::Capacitor),
            _ => Err(()),
        }
    }
}

/// Whether a new component carries parasitics. Parasitic values the kind
/// does not use are ignored: a resistor reads `inductance` and `capacitance`,
/// an inductor `resistance` and `capacitance`, a capacitor `resistance` and `inductance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Build {
    Ideal,
    Real { resistance: f64, inductance: f64, capacitance: f64 },
}

/// Console tag: `I` for ideal, `R` for real (parasitics default to zero)
impl FromStr for Build {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" => Ok(Build::Ideal),
            "R" => Ok(Build::Real { resistance: 0.0, inductance: 0.0, capacitance: 0.0 }),
            _ => Err(()),
        }
    }
}

/// Everything needed to create a catalogue entry except the frequency,
/// which comes from the circuit being edited
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentRequest {
    pub kind: ComponentKind,
    /// Primary magnitude: resistance (Ohm), inductance (H) or capacitance (F)
    pub value: f64,
    pub build: Build,
}

impl ComponentRequest {
    pub fn ideal(kind: ComponentKind, value: f64) -> Self {
        Self { kind, value, build: Build::Ideal }
    }

    pub fn build(&self, frequency: f64) -> Component {
        use ComponentKind::*;
        let v = self.value;
        match (self.kind, self.build) {
            (Resistor, Build::Ideal) => Component::Resistor { resistance: v },
            (Inductor, Build::Ideal) => Component::Inductor { inductance: v, frequency },
            (Capacitor, Build::Ideal) => Component::Capacitor { capacitance: v, frequency },
            (Resistor, Build::Real { inductance, capacitance, .. }) => Component::RealResistor {
                resistance: v,
                frequency,
                parasitic_inductance: inductance,
                parasitic_capacitance: capacitance,
            },
            (Inductor, Build::Real { resistance, capacitance, .. }) => Component::RealInductor {
                inductance: v,
                frequency,
                parasitic_capacitance: capacitance,
                parasitic_resistance: resistance,
            },
            (Capacitor, Build::Real { resistance, inductance, .. }) => Component::RealCapacitor {
                capacitance: v,
                frequency,
                parasitic_inductance: inductance,
                parasitic_resistance: resistance,
            },
        }
    }
}


// ---------- Unit tests ----------

#[cfg(test)]
mod test {
    use std::f64::consts::TAU;

    use approx::assert_relative_eq;

    use super::*;
    use crate::error::DomainError;

    fn approx_cplx(x: Cplx, y: Cplx, dev: f64) -> bool {
        (y - x).norm() < dev
    }
    const APPROX_VAL: f64 = 1e-9;

    fn is_undefined(r: Result<Cplx>) -> bool {
        matches!(r, Err(DomainError::UndefinedImpedance { .. }))
    }

    #[test]
    fn test_ideal_elements() {
        for r in [0.0, 20.0, 2000.0] {
            for f in [0.0, 1.0, 1e6] {
                let z = Component::Resistor { resistance: r }.impedance_at(f).unwrap();
                assert_eq!(z, Cplx::new(r, 0.0));
            }
        }

        let l = Component::Inductor { inductance: 1e-3, frequency: 1000.0 };
        assert!(approx_cplx(l.impedance().unwrap(), Cplx::new(0.0, TAU), APPROX_VAL));

        let c = Component::Capacitor { capacitance: 1e-6, frequency: 1000.0 };
        let expected = Cplx::new(0.0, -1.0 / (TAU * 1e-3));
        assert!(approx_cplx(c.impedance().unwrap(), expected, APPROX_VAL));
    }

    #[test]
    fn test_inductor_grows_with_frequency() {
        let l = Component::Inductor { inductance: 2e-3, frequency: 1.0 };
        let mut last = 0.0;
        for f in [1.0, 10.0, 100.0, 1e3, 1e4] {
            let mag = l.impedance_at(f).unwrap().norm();
            assert!(mag > last);
            last = mag;
        }
    }

    #[test]
    fn test_capacitor_undefined() {
        let dc = Component::Capacitor { capacitance: 1e-6, frequency: 0.0 };
        assert!(is_undefined(dc.impedance()));

        let open = Component::Capacitor { capacitance: 0.0, frequency: 50.0 };
        assert!(is_undefined(open.impedance()));

        let esr = Component::RealCapacitor {
            capacitance: 0.0,
            frequency: 50.0,
            parasitic_inductance: 1e-9,
            parasitic_resistance: 0.1,
        };
        assert!(is_undefined(esr.impedance()));
    }

    #[test]
    fn test_out_of_range_values() {
        let tiny = Component::Capacitor { capacitance: 1e-170, frequency: 1.0 };
        assert!(tiny.impedance().unwrap().is_finite());

        let too_tiny = Component::Capacitor { capacitance: 1e-320, frequency: 1.0 };
        assert!(is_undefined(too_tiny.impedance()));

        let huge = Component::Inductor { inductance: 1e300, frequency: 1e300 };
        assert!(is_undefined(huge.impedance()));

        let esr = Component::RealCapacitor {
            capacitance: 1e-6,
            frequency: 1e3,
            parasitic_inductance: 0.0,
            parasitic_resistance: f64::INFINITY,
        };
        assert!(is_undefined(esr.impedance()));
    }

    #[test]
    fn test_real_resistor() {
        let (r, lp, cp, f) = (1000.0, 1e-6, 1e-9, 1e5);
        let comp = Component::RealResistor {
            resistance: r,
            frequency: f,
            parasitic_inductance: lp,
            parasitic_capacitance: cp,
        };
        let z = comp.impedance().unwrap();

        let zc = 1.0 / (Cplx::new(0.0, 1.0) * TAU * f * cp);
        let expected = 1.0 / (1.0 / r + 1.0 / zc) + Cplx::new(0.0, TAU * f * lp);
        assert!(approx_cplx(z, expected, APPROX_VAL));

        // no stray capacitance: just R plus the lead inductance
        let comp = Component::RealResistor {
            resistance: r,
            frequency: f,
            parasitic_inductance: lp,
            parasitic_capacitance: 0.0,
        };
        let z = comp.impedance().unwrap();
        assert_relative_eq!(z.re, r);
        assert_relative_eq!(z.im, TAU * f * lp);
    }

    #[test]
    fn test_real_inductor() {
        let (l, rp, cp, f) = (1e-3, 2.0, 1e-10, 1e4);
        let comp = Component::RealInductor {
            inductance: l,
            frequency: f,
            parasitic_capacitance: cp,
            parasitic_resistance: rp,
        };
        let z = comp.impedance().unwrap();

        let winding = Cplx::new(rp, TAU * f * l);
        let zc = Cplx::new(0.0, -1.0 / (TAU * f * cp));
        let expected = winding * zc / (winding + zc);
        assert!(approx_cplx(z, expected, 1e-6));
    }

    #[test]
    fn test_real_capacitor() {
        let (c, lp, rp, f) = (1e-6, 1e-8, 0.05, 1e3);
        let comp = Component::RealCapacitor {
            capacitance: c,
            frequency: f,
            parasitic_inductance: lp,
            parasitic_resistance: rp,
        };
        let z = comp.impedance().unwrap();
        assert_relative_eq!(z.re, rp);
        assert_relative_eq!(z.im, TAU * f * lp - 1.0 / (TAU * f * c), epsilon = 1e-9);
    }

    #[test]
    fn test_request_build() {
        let real: Build = "r".parse().unwrap();
        assert!(matches!(real, Build::Real { .. }));
        assert_eq!("c".parse::<ComponentKind>(), Ok(ComponentKind::Capacitor));
        assert!("x".parse::<ComponentKind>().is_err());

        let req = ComponentRequest {
            kind: ComponentKind::Inductor,
            value: 1e-3,
            build: Build::Real { resistance: 2.0, inductance: 7.0, capacitance: 1e-12 },
        };
        let expected = Component::RealInductor {
            inductance: 1e-3,
            frequency: 50.0,
            parasitic_capacitance: 1e-12,
            parasitic_resistance: 2.0,
        };
        assert_eq!(req.build(50.0), expected);

        let ideal = ComponentRequest::ideal(ComponentKind::Resistor, 10.0);
        assert_eq!(ideal.build(50.0), Component::Resistor { resistance: 10.0 });
    }

    #[test]
    fn test_catalogue_entry() {
        let text = Component::Resistor { resistance: 100.0 }.catalogue_entry(3).to_string();
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("3: Ideal resistor (R = "));
        assert!(lines[0].ends_with("Ohm)"));
        assert!(text.contains("IMPEDANCE MAGNITUDE"));

        let l = Component::Inductor { inductance: 1e-3, frequency: 1000.0 };
        let text = format!("{:.6}", l.catalogue_entry(1));
        assert!(text.contains("IMPEDANCE MAGNITUDE"));
        assert!(text.contains("IMPEDANCE PHASE"));

        // a component without a defined impedance says why
        let dc = Component::Capacitor { capacitance: 1e-6, frequency: 0.0 };
        let text = dc.catalogue_entry(2).to_string();
        assert!(text.starts_with("2: Ideal capacitor"));
        assert!(text.contains("undefined impedance"));
    }
}
