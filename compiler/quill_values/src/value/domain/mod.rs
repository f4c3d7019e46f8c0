//! Opaque domain objects.
//!
//! These are produced by macros outside the value core. The core only
//! needs to classify them, compare them structurally, combine the ones that
//! support `+`, and render them back to source.

use std::fmt::{self, Write};

use super::source::write_call;
use super::Value;
use crate::typed_var::TypedVar;

/// One changer macro call, e.g. `(bold:)` or `(text-colour: red)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangerCall {
    pub name: String,
    pub args: Vec<Value>,
}

/// A hook-styling changer: one or more calls applied in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Changer {
    pub calls: Vec<ChangerCall>,
}

impl Changer {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Changer {
            calls: vec![ChangerCall {
                name: name.into(),
                args,
            }],
        }
    }

    /// Compose two changers; `self`'s calls run first.
    #[must_use]
    pub fn combine(&self, other: &Changer) -> Changer {
        let mut calls = self.calls.clone();
        calls.extend(other.calls.iter().cloned());
        Changer { calls }
    }

    /// Short description like `(bold:)` or `(bold:)-and-(italic:)`.
    pub fn describe(&self) -> String {
        self.calls
            .iter()
            .map(|call| format!("({}:)", call.name))
            .collect::<Vec<_>>()
            .join("-and-")
    }
}

impl fmt::Display for Changer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, call) in self.calls.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write_call(f, &call.name, call.args.iter())?;
        }
        Ok(())
    }
}

/// RGBA colour; alpha is in `0.0..=1.0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Colour {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Colour { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Colour {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Average each channel of two colours.
    #[must_use]
    pub fn mix(self, other: Colour) -> Colour {
        let avg = |x: u8, y: u8| u8::try_from((u16::from(x) + u16::from(y)) / 2).unwrap_or(u8::MAX);
        Colour {
            r: avg(self.r, other.r),
            g: avg(self.g, other.g),
            b: avg(self.b, other.b),
            a: (self.a + other.a) / 2.0,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "(rgb: {}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "(rgba: {}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, `0.0..=1.0`.
    pub position: f64,
    pub colour: Colour,
}

/// Linear gradient.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    /// Angle in degrees.
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(gradient: {}", self.angle)?;
        for stop in &self.stops {
            write!(f, ", {}, {}", stop.position, stop.colour)?;
        }
        f.write_char(')')
    }
}

/// Lambda, held as its source text (`each _x where _x > 2`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lambda {
    pub source: String,
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Custom macro: typed-variable parameters plus body source.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomMacro {
    pub params: Vec<TypedVar>,
    pub body: String,
}

impl fmt::Display for CustomMacro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(macro: ")?;
        for param in &self.params {
            write!(f, "{param}, ")?;
        }
        write!(f, "[{}])", self.body)
    }
}

/// Code hook: markup held as source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeHook {
    pub source: String,
}

impl fmt::Display for CodeHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.source)
    }
}

/// A command such as `(go-to: "Cellar")`.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    pub name: String,
    pub args: Vec<Value>,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_call(f, &self.name, self.args.iter())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
