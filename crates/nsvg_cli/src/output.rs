//! Rendering normalized values for the terminal

use anyhow::{Context, Result};
use nsvg_core::{NormalizedColor, NormalizedList, NormalizedMatrix, NormalizedScalar};
use nsvg_props::{Paint, ResolvedElement};
use serde::Serialize;
use std::fmt::Write;

use crate::config::{OutputConfig, OutputFormat};

/// Human-readable rendering with a fixed number of decimal places
pub trait Pretty {
    fn pretty(&self, precision: usize) -> String;
}

/// Trims trailing zeros so `1.0000` prints as `1`
fn num(value: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, value);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

impl Pretty for NormalizedScalar {
    fn pretty(&self, precision: usize) -> String {
        if self.is_percentage {
            format!("{}%", num(self.value, precision))
        } else {
            num(self.value, precision)
        }
    }
}

impl Pretty for NormalizedColor {
    fn pretty(&self, precision: usize) -> String {
        format!(
            "{} rgba({}, {}, {}, {})",
            self.to_hex(),
            num(self.r, precision),
            num(self.g, precision),
            num(self.b, precision),
            num(self.a, precision)
        )
    }
}

impl Pretty for NormalizedList {
    fn pretty(&self, precision: usize) -> String {
        let items: Vec<_> = self.iter().map(|v| num(*v, precision)).collect();
        format!("[{}]", items.join(", "))
    }
}

impl Pretty for Vec<(f64, f64)> {
    fn pretty(&self, precision: usize) -> String {
        let items: Vec<_> = self
            .iter()
            .map(|(x, y)| format!("({}, {})", num(*x, precision), num(*y, precision)))
            .collect();
        items.join(" ")
    }
}

impl Pretty for NormalizedMatrix {
    fn pretty(&self, precision: usize) -> String {
        let items: Vec<_> = self.elements.iter().map(|v| num(*v, precision)).collect();
        format!("matrix({})", items.join(", "))
    }
}

impl Pretty for Paint {
    fn pretty(&self, precision: usize) -> String {
        match self {
            Paint::None => "none".to_string(),
            Paint::Color { color } => color.pretty(precision),
            Paint::CurrentColor => "currentColor".to_string(),
            Paint::Reference { id, fallback: None } => format!("url(#{})", id),
            Paint::Reference {
                id,
                fallback: Some(fallback),
            } => format!("url(#{}) {}", id, fallback.pretty(precision)),
        }
    }
}

impl Pretty for ResolvedElement {
    fn pretty(&self, precision: usize) -> String {
        let mut out = String::new();
        let _ = write!(out, "<{}", self.kind);
        if let Some(id) = &self.id {
            let _ = write!(out, " id={:?}", id);
        }
        out.push('>');

        if self.opacity < 1.0 {
            let _ = write!(out, "\n  opacity: {}", num(self.opacity, precision));
        }
        for (name, length) in &self.lengths {
            let _ = write!(out, "\n  {}: {}", name, length.pretty(precision));
        }
        for (name, value) in &self.attributes {
            let _ = write!(out, "\n  {}: {}", name, value);
        }
        if let Some(presentation) = &self.presentation {
            let fill = &presentation.fill;
            let _ = write!(
                out,
                "\n  fill: {} (opacity {}, {})",
                fill.paint.pretty(precision),
                num(fill.opacity, precision),
                fill.rule
            );
            if let Some(stroke) = &presentation.stroke {
                let _ = write!(
                    out,
                    "\n  stroke: {} (width {}, {} {})",
                    stroke.paint.pretty(precision),
                    stroke.width.pretty(precision),
                    stroke.linecap,
                    stroke.linejoin
                );
                if let Some(dashes) = &stroke.dasharray {
                    let _ = write!(out, "\n  dasharray: {}", dashes.pretty(precision));
                }
            }
            if !presentation.transform.is_identity() {
                let _ = write!(out, "\n  transform: {}", presentation.transform.pretty(precision));
            }
        }
        if let Some(font) = &self.font {
            let _ = write!(
                out,
                "\n  font: {} {} {}",
                font.size.pretty(precision),
                font.weight,
                font.family.as_deref().unwrap_or("<default>")
            );
        }
        if let Some(points) = &self.points {
            let _ = write!(out, "\n  points: {}", points.pretty(precision));
        }
        if let Some(stop) = &self.stop {
            let _ = write!(
                out,
                "\n  stop: {} at {}",
                stop.color.pretty(precision),
                num(stop.offset, precision)
            );
        }
        if let Some(color) = &self.color {
            let _ = write!(out, "\n  color: {}", color.pretty(precision));
        }
        if let Some(transform) = &self.content_transform {
            let _ = write!(out, "\n  content transform: {}", transform.pretty(precision));
        }
        out
    }
}

impl<T: Pretty> Pretty for [T] {
    fn pretty(&self, precision: usize) -> String {
        let items: Vec<_> = self.iter().map(|item| item.pretty(precision)).collect();
        items.join("\n")
    }
}

/// Format a value according to the output config
pub fn render<T: Pretty + Serialize + ?Sized>(value: &T, config: &OutputConfig) -> Result<String> {
    match config.format {
        OutputFormat::Pretty => Ok(value.pretty(config.precision)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize output")
        }
    }
}
