use orbit_layout::ItemIndex;
use std::fmt;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
enum StepKind {
    Layout,
    Drag,
    Jump,
    Glide,
    Reset,
    Items,
}

/// One host event to replay against the carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Full layout pass, as after a structural change.
    Layout,
    /// Horizontal drag by this many distance units.
    Drag(f64),
    /// Jump so the item sits at the front.
    Jump(ItemIndex),
    /// Animate until the item sits at the front.
    Glide(ItemIndex),
    /// Replace the data set.
    Reset,
    /// Change the item count and lay out again.
    Items(usize),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    #[error("unknown step '{0}' (expected layout, drag, jump, glide, reset or items)")]
    Unknown(String),
    #[error("step '{0}' needs a value, e.g. {0}=3")]
    MissingValue(String),
    #[error("step '{0}' takes no value")]
    UnexpectedValue(String),
    #[error("invalid value '{value}' for step '{step}'")]
    InvalidValue { step: String, value: String },
}

fn parse_value<T: FromStr>(kind: StepKind, value: &str) -> Result<T, StepError> {
    value.trim().parse().map_err(|_| StepError::InvalidValue {
        step: kind.to_string(),
        value: value.to_string(),
    })
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (s, None),
        };
        let kind = StepKind::from_str(name.trim())
            .map_err(|_| StepError::Unknown(name.trim().to_string()))?;

        match (kind, value) {
            (StepKind::Layout, None) => Ok(Step::Layout),
            (StepKind::Reset, None) => Ok(Step::Reset),
            (StepKind::Layout | StepKind::Reset, Some(_)) => {
                Err(StepError::UnexpectedValue(kind.to_string()))
            }
            (_, None) => Err(StepError::MissingValue(kind.to_string())),
            (StepKind::Drag, Some(v)) => {
                let dx: f64 = parse_value(kind, v)?;
                if !dx.is_finite() {
                    return Err(StepError::InvalidValue {
                        step: kind.to_string(),
                        value: v.to_string(),
                    });
                }
                Ok(Step::Drag(dx))
            }
            (StepKind::Jump, Some(v)) => Ok(Step::Jump(ItemIndex::new(parse_value(kind, v)?))),
            (StepKind::Glide, Some(v)) => Ok(Step::Glide(ItemIndex::new(parse_value(kind, v)?))),
            (StepKind::Items, Some(v)) => Ok(Step::Items(parse_value(kind, v)?)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Layout => write!(f, "layout"),
            Step::Drag(dx) => write!(f, "drag={dx}"),
            Step::Jump(index) => write!(f, "jump={index}"),
            Step::Glide(index) => write!(f, "glide={index}"),
            Step::Reset => write!(f, "reset"),
            Step::Items(count) => write!(f, "items={count}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_parsing() {
        let cases = vec![
            ("layout", Step::Layout),
            ("RESET", Step::Reset),
            ("drag=120", Step::Drag(120.0)),
            ("drag=-35.5", Step::Drag(-35.5)),
            ("Jump=3", Step::Jump(ItemIndex::new(3))),
            ("glide= 7", Step::Glide(ItemIndex::new(7))),
            ("items=0", Step::Items(0)),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<Step>(), Ok(expected));
        }
    }

    #[test]
    fn test_step_errors() {
        assert_eq!(
            "spin=3".parse::<Step>(),
            Err(StepError::Unknown("spin".to_string()))
        );
        assert_eq!(
            "drag".parse::<Step>(),
            Err(StepError::MissingValue("drag".to_string()))
        );
        assert_eq!(
            "reset=1".parse::<Step>(),
            Err(StepError::UnexpectedValue("reset".to_string()))
        );
        assert_eq!(
            "jump=-1".parse::<Step>(),
            Err(StepError::InvalidValue {
                step: "jump".to_string(),
                value: "-1".to_string(),
            })
        );
        assert!("drag=inf".parse::<Step>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for step in [
            Step::Layout,
            Step::Drag(-12.5),
            Step::Jump(ItemIndex::new(4)),
            Step::Glide(ItemIndex::new(0)),
            Step::Reset,
            Step::Items(9),
        ] {
            assert_eq!(step.to_string().parse::<Step>(), Ok(step));
        }
    }
}
