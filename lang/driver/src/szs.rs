use std::fmt;

/// The SZS status vocabulary used to label reasoner verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SzsStatus {
    Theorem,
    Unsatisfiable,
    Satisfiable,
    CounterSatisfiable,
    EquiSatisfiable,
    Unknown,
    GaveUp,
    Timeout,
    Inappropriate,
    InputError,
    SyntaxError,
    TypeError,
    UsageError,
}

impl fmt::Display for SzsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            SzsStatus::Theorem => "Theorem",
            SzsStatus::Unsatisfiable => "Unsatisfiable",
            SzsStatus::Satisfiable => "Satisfiable",
            SzsStatus::CounterSatisfiable => "CounterSatisfiable",
            SzsStatus::EquiSatisfiable => "EquiSatisfiable",
            SzsStatus::Unknown => "Unknown",
            SzsStatus::GaveUp => "GaveUp",
            SzsStatus::Timeout => "Timeout",
            SzsStatus::Inappropriate => "Inappropriate",
            SzsStatus::InputError => "InputError",
            SzsStatus::SyntaxError => "SyntaxError",
            SzsStatus::TypeError => "TypeError",
            SzsStatus::UsageError => "UsageError",
        };
        write!(f, "{word}")
    }
}

/// The standard reporting line.
pub fn szs_line(status: SzsStatus, problem: &str) -> String {
    format!("% SZS status {status} for {problem}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_format() {
        assert_eq!(
            szs_line(SzsStatus::EquiSatisfiable, "PUZ001+1"),
            "% SZS status EquiSatisfiable for PUZ001+1"
        );
    }
}
