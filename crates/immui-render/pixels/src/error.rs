use std::fmt;

#[derive(Debug)]
pub enum RenderError {
    Io(std::io::Error),
    InvalidFont,
    InvalidImage { expected: usize, found: usize },
    SizeMismatch { expected: usize, found: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(err) => write!(f, "i/o error: {err}"),
            RenderError::InvalidFont => write!(f, "font data could not be parsed"),
            RenderError::InvalidImage { expected, found } => {
                write!(f, "image needs {expected} bytes of RGBA data, got {found}")
            }
            RenderError::SizeMismatch { expected, found } => {
                write!(f, "target buffer holds {found} bytes, expected {expected}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err)
    }
}
