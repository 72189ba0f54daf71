/// Errors raised while building or reconfiguring a sheet.
///
/// Only malformed configuration and out-of-range snap requests are errors.
/// Disabled capabilities and unmeasured layout are handled silently.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetError {
    EmptySnapPoints,
    InvalidSnapPoint { value: String },
    InitialSnapOutOfRange { index: usize, len: usize },
    SnapIndexOutOfRange { index: usize, len: usize },
    InvalidConfig { field: &'static str, reason: &'static str },
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetError::EmptySnapPoints => write!(f, "at least one snap point is required"),
            SheetError::InvalidSnapPoint { value } => {
                write!(f, "invalid snap point {value:?}; expected a number or a percentage")
            }
            SheetError::InitialSnapOutOfRange { index, len } => {
                write!(f, "initial snap {index} out of range for {len} snap points")
            }
            SheetError::SnapIndexOutOfRange { index, len } => {
                write!(f, "snap index {index} out of range for {len} snap points")
            }
            SheetError::InvalidConfig { field, reason } => {
                write!(f, "invalid {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for SheetError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = SheetError::SnapIndexOutOfRange { index: 4, len: 3 };
        assert_eq!(err.to_string(), "snap index 4 out of range for 3 snap points");

        let err = SheetError::InvalidSnapPoint {
            value: "half".into(),
        };
        assert!(err.to_string().contains("\"half\""));

        let err = SheetError::InvalidConfig {
            field: "callback_threshold",
            reason: "must be within [0, 0.5)",
        };
        assert_eq!(
            err.to_string(),
            "invalid callback_threshold: must be within [0, 0.5)"
        );
    }
}
