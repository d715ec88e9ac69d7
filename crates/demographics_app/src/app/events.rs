use anyhow::{Context, Result, bail};
use demographics_core::CategoryKind;
use std::fmt;
use std::str::FromStr;

/// A user interaction, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Category(CategoryKind),
    Select { kind: CategoryKind, label: String },
    Reset,
    Confirm,
}

impl FromStr for Event {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reset" => return Ok(Event::Reset),
            "confirm" => return Ok(Event::Confirm),
            _ => {}
        }
        let (verb, rest) = s
            .split_once(':')
            .with_context(|| format!("unrecognised event {s:?}"))?;
        match verb {
            "category" => Ok(Event::Category(rest.parse()?)),
            "select" => {
                let (kind, label) = rest
                    .split_once('=')
                    .with_context(|| format!("expected select:<category>=<label>, got {s:?}"))?;
                Ok(Event::Select {
                    kind: kind.parse()?,
                    label: label.to_string(),
                })
            }
            other => bail!("unrecognised event verb {other:?}"),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Category(kind) => write!(f, "category:{}", token(*kind)),
            Event::Select { kind, label } => {
                write!(f, "select:{}={label}", token(*kind))
            }
            Event::Reset => f.write_str("reset"),
            Event::Confirm => f.write_str("confirm"),
        }
    }
}

fn token(kind: CategoryKind) -> &'static str {
    match kind {
        CategoryKind::Race => "race",
        CategoryKind::AgeRange => "age",
        CategoryKind::Sex => "sex",
    }
}
